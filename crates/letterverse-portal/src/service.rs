use letterverse_blocks::{Block, TileKind};
use letterverse_geom::GridPos;
use letterverse_world::{AgentId, DimensionId, World};

use crate::active::ActiveFrames;
use crate::census::{FrameClass, classify_at};
use crate::config::PortalConfig;
use crate::detector::{self, MaintenanceReport};
use crate::frame::Frame;
use crate::gate::{GateOutcome, Observation, TransitGate, TravelDecision};
use crate::relocate::{self, Arrival};

/// Owns the active-frame set and the per-agent transit map for one running world.
pub struct PortalService {
    pub cfg: PortalConfig,
    pub frames: ActiveFrames,
    pub gate: TransitGate,
    pub relocations: u64,
}

impl PortalService {
    pub fn new(cfg: PortalConfig) -> Self {
        let gate = TransitGate::new(cfg.trigger_ticks);
        Self {
            cfg,
            frames: ActiveFrames::new(),
            gate,
            relocations: 0,
        }
    }

    /// World unload: runtime caches go away with it.
    pub fn reset(&mut self) {
        self.frames.clear();
        self.gate.clear();
    }

    pub fn on_block_placed(
        &mut self,
        world: &mut World,
        dim: DimensionId,
        pos: GridPos,
        block: Block,
    ) -> Option<Frame> {
        if world.registry.kind_of(block) != TileKind::Marker {
            return None;
        }
        let level = world.level_mut(dim)?;
        detector::on_marker_placed(level, &mut self.frames, pos, &self.cfg)
    }

    /// `previous` is the block that stood at `pos` before it was broken.
    pub fn on_block_broken(
        &mut self,
        world: &mut World,
        dim: DimensionId,
        pos: GridPos,
        previous: Block,
    ) -> usize {
        if world.registry.kind_of(previous) != TileKind::Marker {
            return 0;
        }
        match world.level_mut(dim) {
            Some(level) => detector::on_marker_broken(level, &mut self.frames, pos, &self.cfg),
            None => 0,
        }
    }

    /// Upkeep sweep on the configured cadence of the level's game time.
    pub fn tick_level(&mut self, world: &mut World, dim: DimensionId) -> Option<MaintenanceReport> {
        let level = world.level_mut(dim)?;
        let interval = self.cfg.maintenance_interval.max(1);
        if level.game_time % interval != 0 {
            return None;
        }
        Some(detector::periodic_maintenance(level, &mut self.frames))
    }

    pub fn observe(&self, world: &World, id: AgentId) -> Observation {
        let Some(agent) = world.agent(id) else {
            return Observation::Outside;
        };
        let Some(level) = world.level(agent.dimension) else {
            return Observation::Outside;
        };
        let pos = agent.block_pos();
        if !level.kind_at(pos).is_filler() {
            return Observation::Outside;
        }
        match classify_at(level, pos, &self.cfg) {
            (census, FrameClass::Letterverse) => {
                log::trace!(
                    target: "transit",
                    "bookshelf portal at {}: {} markers, {} native",
                    pos,
                    census.markers,
                    census.native_markers
                );
                Observation::LetterversePortal(pos)
            }
            (_, FrameClass::Native) => Observation::NativePortal,
        }
    }

    /// Per-tick transit poll for one agent, after the agent has moved.
    pub fn tick_agent(&mut self, world: &mut World, id: AgentId) -> (GateOutcome, Option<Arrival>) {
        let obs = self.observe(world, id);
        let outcome = self.gate.observe(id, obs);
        if outcome != GateOutcome::Relocate {
            return (outcome, None);
        }
        match relocate::relocate(world, &mut self.frames, &self.cfg, id) {
            Ok(arrival) => {
                self.relocations += 1;
                (outcome, Some(arrival))
            }
            Err(err) => {
                log::error!(target: "transit", "portal transit for agent {} aborted: {}", id, err);
                (outcome, None)
            }
        }
    }

    /// Veto engine-driven dimension travel that our own portals handle.
    pub fn on_travel_request(&self, world: &World, id: AgentId, target: DimensionId) -> TravelDecision {
        let Some(agent) = world.agent(id) else {
            return TravelDecision::Allow;
        };
        if matches!(self.observe(world, id), Observation::LetterversePortal(_)) {
            log::info!(
                target: "transit",
                "cancelled native travel for {}: bookshelf portal",
                agent.name
            );
            return TravelDecision::Cancel;
        }
        if agent.dimension.is_letterverse() && target == DimensionId::Nether {
            log::info!(
                target: "transit",
                "cancelled nether travel from the Letterverse for {}",
                agent.name
            );
            return TravelDecision::Cancel;
        }
        TravelDecision::Allow
    }
}
