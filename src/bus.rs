use letterverse_portal::{PortalService, TravelDecision};
use letterverse_realm::RealmService;
use letterverse_world::{AgentId, DimensionId, World};
use letterverse_words::WordScanner;

use crate::commands;
use crate::event::BlockChange;

/// A subscriber to server events. Every hook defaults to doing nothing.
pub trait Handler {
    fn name(&self) -> &'static str;

    fn on_block_placed(&mut self, _world: &mut World, _ev: &BlockChange) {}
    fn on_block_broken(&mut self, _world: &mut World, _ev: &BlockChange) {}
    /// Before the agent's own movement update for this tick.
    fn before_agent_update(&mut self, _world: &mut World, _agent: AgentId) {}
    /// After the agent has moved this tick.
    fn after_agent_update(&mut self, _world: &mut World, _agent: AgentId) {}
    fn on_level_tick(&mut self, _world: &mut World, _dim: DimensionId) {}
    fn on_login(&mut self, _world: &mut World, _agent: AgentId) {}
    fn on_respawn(&mut self, _world: &mut World, _agent: AgentId, _end_conquered: bool) {}
    fn on_wand_used(&mut self, _world: &mut World, _agent: AgentId) {}
    fn on_chunk_loaded(&mut self, _world: &mut World, _dim: DimensionId, _cx: i32, _cz: i32) {}

    fn on_travel_request(&mut self, _world: &World, _agent: AgentId, _target: DimensionId) -> TravelDecision {
        TravelDecision::Allow
    }

    /// Run `command` if this handler owns it.
    fn on_command(&mut self, _world: &mut World, _agent: Option<AgentId>, _command: &str) -> Option<i32> {
        None
    }

    /// Counters reported at the end of a run.
    fn stats(&self) -> Vec<(&'static str, u64)> {
        Vec::new()
    }
}

/// Handlers in subscription order; each event visits all of them.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Box<dyn Handler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: Box<dyn Handler>) {
        log::debug!(target: "events", "subscribed {}", handler.name());
        self.handlers.push(handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn block_placed(&mut self, world: &mut World, ev: &BlockChange) {
        for h in &mut self.handlers {
            h.on_block_placed(world, ev);
        }
    }

    pub fn block_broken(&mut self, world: &mut World, ev: &BlockChange) {
        for h in &mut self.handlers {
            h.on_block_broken(world, ev);
        }
    }

    pub fn before_agent_update(&mut self, world: &mut World, agent: AgentId) {
        for h in &mut self.handlers {
            h.before_agent_update(world, agent);
        }
    }

    pub fn after_agent_update(&mut self, world: &mut World, agent: AgentId) {
        for h in &mut self.handlers {
            h.after_agent_update(world, agent);
        }
    }

    pub fn level_tick(&mut self, world: &mut World, dim: DimensionId) {
        for h in &mut self.handlers {
            h.on_level_tick(world, dim);
        }
    }

    pub fn login(&mut self, world: &mut World, agent: AgentId) {
        for h in &mut self.handlers {
            h.on_login(world, agent);
        }
    }

    pub fn respawn(&mut self, world: &mut World, agent: AgentId, end_conquered: bool) {
        for h in &mut self.handlers {
            h.on_respawn(world, agent, end_conquered);
        }
    }

    pub fn wand_used(&mut self, world: &mut World, agent: AgentId) {
        for h in &mut self.handlers {
            h.on_wand_used(world, agent);
        }
    }

    pub fn chunk_loaded(&mut self, world: &mut World, dim: DimensionId, cx: i32, cz: i32) {
        for h in &mut self.handlers {
            h.on_chunk_loaded(world, dim, cx, cz);
        }
    }

    /// Cancelled if any handler cancels.
    pub fn travel_request(&mut self, world: &World, agent: AgentId, target: DimensionId) -> TravelDecision {
        let mut decision = TravelDecision::Allow;
        for h in &mut self.handlers {
            if h.on_travel_request(world, agent, target) == TravelDecision::Cancel {
                decision = TravelDecision::Cancel;
            }
        }
        decision
    }

    /// First handler that owns the command runs it.
    pub fn command(&mut self, world: &mut World, agent: Option<AgentId>, command: &str) -> Option<i32> {
        self.handlers
            .iter_mut()
            .find_map(|h| h.on_command(world, agent, command))
    }

    pub fn stats(&self) -> Vec<(&'static str, u64)> {
        self.handlers.iter().flat_map(|h| h.stats()).collect()
    }
}

impl Handler for PortalService {
    fn name(&self) -> &'static str {
        "portal"
    }

    fn on_block_placed(&mut self, world: &mut World, ev: &BlockChange) {
        PortalService::on_block_placed(self, world, ev.dim, ev.pos, ev.block);
    }

    fn on_block_broken(&mut self, world: &mut World, ev: &BlockChange) {
        PortalService::on_block_broken(self, world, ev.dim, ev.pos, ev.block);
    }

    fn after_agent_update(&mut self, world: &mut World, agent: AgentId) {
        self.tick_agent(world, agent);
    }

    fn on_level_tick(&mut self, world: &mut World, dim: DimensionId) {
        if let Some(report) = self.tick_level(world, dim) {
            if report.relit > 0 || report.removed > 0 {
                log::debug!(
                    target: "portal",
                    "{} upkeep: {} checked, {} relit, {} removed",
                    dim,
                    report.checked,
                    report.relit,
                    report.removed
                );
            }
        }
    }

    fn on_travel_request(&mut self, world: &World, agent: AgentId, target: DimensionId) -> TravelDecision {
        PortalService::on_travel_request(self, world, agent, target)
    }

    fn on_command(&mut self, world: &mut World, agent: Option<AgentId>, command: &str) -> Option<i32> {
        (command == commands::TESTPORTAL).then(|| commands::testportal(world, agent, &self.cfg))
    }

    fn stats(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("active_frames", self.frames.len() as u64),
            ("relocations", self.relocations),
        ]
    }
}

impl Handler for WordScanner {
    fn name(&self) -> &'static str {
        "words"
    }

    fn on_block_placed(&mut self, world: &mut World, ev: &BlockChange) {
        if let Some(level) = world.level_mut(ev.dim) {
            WordScanner::on_block_placed(self, level, ev.pos);
        }
    }

    fn stats(&self) -> Vec<(&'static str, u64)> {
        vec![("words_spelled", self.words_spelled)]
    }
}

impl Handler for RealmService {
    fn name(&self) -> &'static str {
        "realm"
    }

    fn before_agent_update(&mut self, world: &mut World, agent: AgentId) {
        RealmService::before_agent_update(self, world, agent);
    }

    fn on_login(&mut self, world: &mut World, agent: AgentId) {
        RealmService::on_login(self, world, agent);
    }

    fn on_respawn(&mut self, world: &mut World, agent: AgentId, end_conquered: bool) {
        RealmService::on_respawn(self, world, agent, end_conquered);
    }

    fn on_wand_used(&mut self, world: &mut World, agent: AgentId) {
        RealmService::on_wand_used(self, world, agent);
    }

    fn on_chunk_loaded(&mut self, world: &mut World, dim: DimensionId, cx: i32, cz: i32) {
        RealmService::on_chunk_loaded(self, world, dim, cx, cz);
    }

    fn stats(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("islands_built", self.islands_built),
            ("wand_uses", self.wand_uses),
        ]
    }
}
