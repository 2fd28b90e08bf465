use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use letterverse_blocks::{Block, BlockRegistry};
use letterverse_geom::Vec3;
use letterverse_portal::{PortalService, TravelDecision};
use letterverse_realm::RealmService;
use letterverse_world::{AgentId, DimensionId, Level, UpdateMode, World};
use letterverse_words::{RewardTable, WordScanner};

use crate::bus::EventBus;
use crate::config::ServerConfig;
use crate::event::{BlockChange, Event, EventQueue};

/// One running world: levels, agents, the subscribed handlers and the event queue.
pub struct Server {
    pub cfg: ServerConfig,
    pub world: World,
    pub queue: EventQueue,
    bus: EventBus,
    // Chunk column each agent was last seen in
    last_chunk: HashMap<AgentId, (DimensionId, i32, i32)>,
    pub command_results: Vec<(String, i32)>,
}

impl Server {
    pub fn new(cfg: ServerConfig, registry: Arc<BlockRegistry>, seed: u64) -> Self {
        let mut dims = vec![DimensionId::Overworld, DimensionId::Nether];
        if cfg.letterverse_enabled {
            dims.push(DimensionId::Letterverse);
        } else {
            log::warn!(target: "realm", "the Letterverse is disabled; bookshelf portals lead nowhere");
        }
        let world = World::new(registry, &dims);

        let mut table = RewardTable::standard();
        table.merge(&cfg.words);

        let mut bus = EventBus::new();
        bus.subscribe(Box::new(PortalService::new(cfg.portal.clone())));
        bus.subscribe(Box::new(WordScanner::new(table)));
        bus.subscribe(Box::new(RealmService::new(
            cfg.realm.clone(),
            cfg.starter.clone(),
            cfg.wand.clone(),
            seed,
        )));

        Self {
            cfg,
            world,
            queue: EventQueue::new(),
            bus,
            last_chunk: HashMap::new(),
            command_results: Vec::new(),
        }
    }

    #[inline]
    pub fn now(&self) -> u64 {
        self.queue.now
    }

    /// One server tick: queued events, agent pre-update, transit poll, chunk loading,
    /// level upkeep, then time moves on.
    pub fn tick(&mut self) {
        while let Some(env) = self.queue.pop_ready() {
            log_event(env.tick, &env.kind);
            self.handle(env.kind);
        }

        let agents = self.world.agent_ids();
        for id in &agents {
            self.bus.before_agent_update(&mut self.world, *id);
        }
        for id in &agents {
            self.bus.after_agent_update(&mut self.world, *id);
        }
        self.load_chunks_around_agents();

        for dim in DimensionId::ALL {
            self.bus.level_tick(&mut self.world, dim);
        }
        self.world.advance_time();
        self.queue.advance_tick();
    }

    /// Tick until the queue's clock reaches `tick`.
    pub fn run_until(&mut self, tick: u64) {
        while self.queue.now < tick {
            self.tick();
        }
    }

    fn handle(&mut self, ev: Event) {
        match ev {
            Event::Tick => {}
            Event::PlaceRequested {
                agent,
                dim,
                pos,
                block,
            } => {
                let Some(level) = self.world.level_mut(dim) else {
                    log::warn!(target: "events", "place in missing dimension {}", dim);
                    return;
                };
                level.set_block(pos, block, UpdateMode::Notify);
                self.queue.emit_now(Event::BlockPlaced(BlockChange {
                    agent,
                    dim,
                    pos,
                    block,
                }));
            }
            Event::BreakRequested { agent, dim, pos } => {
                let Some(level) = self.world.level_mut(dim) else {
                    log::warn!(target: "events", "break in missing dimension {}", dim);
                    return;
                };
                let previous = level.block_at(pos);
                if previous == Block::AIR {
                    return;
                }
                level.set_block(pos, Block::AIR, UpdateMode::Notify);
                self.queue.emit_now(Event::BlockBroken(BlockChange {
                    agent,
                    dim,
                    pos,
                    block: previous,
                }));
            }
            Event::MoveRequested { agent, pos, look } => {
                let Some(a) = self.world.agent_mut(agent) else {
                    log::warn!(target: "events", "move for unknown agent {}", agent);
                    return;
                };
                a.pos = pos;
                if let Some((yaw, pitch)) = look {
                    a.yaw = yaw;
                    a.pitch = pitch;
                }
                self.queue.emit_now(Event::AgentMoved { agent });
            }
            Event::InputChanged {
                agent,
                jumping,
                sneaking,
            } => {
                if let Some(a) = self.world.agent_mut(agent) {
                    a.jumping = jumping;
                    a.sneaking = sneaking;
                }
            }
            Event::BlockPlaced(change) => self.bus.block_placed(&mut self.world, &change),
            Event::BlockBroken(change) => self.bus.block_broken(&mut self.world, &change),
            Event::AgentMoved { .. } => {}
            Event::AgentLoggedIn { agent } => self.bus.login(&mut self.world, agent),
            Event::AgentRespawned {
                agent,
                end_conquered,
            } => {
                let spawn = self.cfg.spawn_point();
                if let Some(a) = self.world.agent_mut(agent) {
                    a.dimension = DimensionId::Overworld;
                    a.pos = spawn;
                    a.velocity = Vec3::ZERO;
                    a.fall_distance = 0.0;
                }
                self.bus.respawn(&mut self.world, agent, end_conquered);
            }
            Event::TravelRequested { agent, target } => self.travel(agent, target),
            Event::CommandIssued { agent, command } => {
                let result = self.bus.command(&mut self.world, agent, &command);
                if result.is_none() {
                    log::warn!(target: "events", "unknown command '{}'", command);
                }
                self.command_results.push((command, result.unwrap_or(0)));
            }
            Event::WandUsed { agent } => self.bus.wand_used(&mut self.world, agent),
            Event::ChunkLoaded { dim, cx, cz } => self.bus.chunk_loaded(&mut self.world, dim, cx, cz),
        }
    }

    // Engine-driven dimension change, unless a handler vetoes it.
    fn travel(&mut self, agent: AgentId, target: DimensionId) {
        if self.bus.travel_request(&self.world, agent, target) == TravelDecision::Cancel {
            return;
        }
        if self.world.level(target).is_none() {
            log::warn!(target: "events", "travel of {} to missing dimension {}", agent, target);
            return;
        }
        if let Some(a) = self.world.agent_mut(agent) {
            log::info!(target: "events", "{} travelled from {} to {}", a.name, a.dimension, target);
            a.dimension = target;
        }
    }

    fn load_chunks_around_agents(&mut self) {
        let r = self.cfg.view_radius.max(0);
        let mut loads = Vec::new();
        for agent in self.world.agents.values() {
            let (cx, cz) = Level::chunk_column_of(agent.block_pos());
            let here = (agent.dimension, cx, cz);
            if self.last_chunk.insert(agent.id, here) == Some(here) {
                continue;
            }
            for dx in -r..=r {
                for dz in -r..=r {
                    loads.push(Event::ChunkLoaded {
                        dim: agent.dimension,
                        cx: cx + dx,
                        cz: cz + dz,
                    });
                }
            }
        }
        for ev in loads {
            log_event(self.now(), &ev);
            self.handle(ev);
        }
    }

    pub fn summary(&self) -> Summary {
        let agents = self
            .world
            .agents
            .values()
            .map(|a| AgentReport {
                name: a.name.clone(),
                dimension: a.dimension,
                pos: a.pos,
                inbox: a.inbox.clone(),
            })
            .collect();
        let mut items = Vec::new();
        for dim in DimensionId::ALL {
            let Some(level) = self.world.level(dim) else {
                continue;
            };
            for e in &level.items {
                items.push((dim, e.stack.item.clone(), e.stack.count));
            }
        }
        Summary {
            ticks: self.now(),
            stats: self.bus.stats(),
            agents,
            items,
            commands: self.command_results.clone(),
        }
    }
}

fn log_event(tick: u64, ev: &Event) {
    match ev {
        Event::Tick => log::trace!(target: "events", "[tick {}] Tick", tick),
        Event::MoveRequested { agent, pos, .. } => log::trace!(
            target: "events",
            "[tick {}] MoveRequested {} to ({:.2}, {:.2}, {:.2})",
            tick,
            agent,
            pos.x,
            pos.y,
            pos.z
        ),
        Event::AgentMoved { .. } | Event::InputChanged { .. } | Event::ChunkLoaded { .. } => {
            log::trace!(target: "events", "[tick {}] {:?}", tick, ev)
        }
        Event::BlockPlaced(c) => log::debug!(
            target: "events",
            "[tick {}] BlockPlaced {} {} block={:?}",
            tick,
            c.dim,
            c.pos,
            c.block
        ),
        Event::BlockBroken(c) => log::debug!(
            target: "events",
            "[tick {}] BlockBroken {} {} was={:?}",
            tick,
            c.dim,
            c.pos,
            c.block
        ),
        _ => log::info!(target: "events", "[tick {}] {:?}", tick, ev),
    }
}

#[derive(Clone, Debug)]
pub struct AgentReport {
    pub name: String,
    pub dimension: DimensionId,
    pub pos: Vec3,
    pub inbox: Vec<String>,
}

/// End-of-run state for printing and assertions.
#[derive(Clone, Debug)]
pub struct Summary {
    pub ticks: u64,
    pub stats: Vec<(&'static str, u64)>,
    pub agents: Vec<AgentReport>,
    pub items: Vec<(DimensionId, String, u32)>,
    pub commands: Vec<(String, i32)>,
}

impl Summary {
    pub fn stat(&self, name: &str) -> Option<u64> {
        self.stats.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ran {} ticks", self.ticks)?;
        for (name, value) in &self.stats {
            writeln!(f, "  {name}: {value}")?;
        }
        for a in &self.agents {
            writeln!(
                f,
                "  {} in {} at ({:.2}, {:.2}, {:.2})",
                a.name, a.dimension, a.pos.x, a.pos.y, a.pos.z
            )?;
            for line in &a.inbox {
                writeln!(f, "    > {line}")?;
            }
        }
        for (dim, item, count) in &self.items {
            writeln!(f, "  item {item} x{count} in {dim}")?;
        }
        for (command, result) in &self.commands {
            writeln!(f, "  /{command} -> {result}")?;
        }
        Ok(())
    }
}
