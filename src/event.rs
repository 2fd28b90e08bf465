use std::collections::{BTreeMap, VecDeque};

use letterverse_blocks::Block;
use letterverse_geom::{GridPos, Vec3};
use letterverse_world::{AgentId, DimensionId};

/// A block that just changed. For breaks, `block` is what stood there before.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockChange {
    pub agent: Option<AgentId>,
    pub dim: DimensionId,
    pub pos: GridPos,
    pub block: Block,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    // Time housekeeping
    Tick,

    // Intents from the outside; the server applies them and reports what happened
    PlaceRequested {
        agent: Option<AgentId>,
        dim: DimensionId,
        pos: GridPos,
        block: Block,
    },
    BreakRequested {
        agent: Option<AgentId>,
        dim: DimensionId,
        pos: GridPos,
    },
    MoveRequested {
        agent: AgentId,
        pos: Vec3,
        look: Option<(f32, f32)>,
    },
    InputChanged {
        agent: AgentId,
        jumping: bool,
        sneaking: bool,
    },

    // Things that happened
    BlockPlaced(BlockChange),
    BlockBroken(BlockChange),
    AgentMoved { agent: AgentId },
    AgentLoggedIn { agent: AgentId },
    AgentRespawned { agent: AgentId, end_conquered: bool },
    TravelRequested { agent: AgentId, target: DimensionId },
    CommandIssued { agent: Option<AgentId>, command: String },
    WandUsed { agent: AgentId },
    ChunkLoaded { dim: DimensionId, cx: i32, cz: i32 },
}

pub struct EventEnvelope {
    pub tick: u64,
    pub kind: Event,
}

#[derive(Default)]
pub struct EventQueue {
    // map of tick -> FIFO queue of events
    by_tick: BTreeMap<u64, VecDeque<EventEnvelope>>,
    pub now: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit_now(&mut self, kind: Event) {
        self.emit_at(self.now, kind)
    }

    /// Events for a tick already past land in the current tick.
    pub fn emit_at(&mut self, tick: u64, kind: Event) {
        let tick = tick.max(self.now);
        let env = EventEnvelope { tick, kind };
        self.by_tick.entry(tick).or_default().push_back(env);
    }

    pub fn pop_ready(&mut self) -> Option<EventEnvelope> {
        self.by_tick
            .get_mut(&self.now)
            .and_then(|q| q.pop_front())
    }

    pub fn advance_tick(&mut self) {
        // clean empty current bucket
        if self.by_tick.get(&self.now).is_some_and(|q| q.is_empty()) {
            self.by_tick.remove(&self.now);
        }
        self.now = self.now.wrapping_add(1);
    }

    /// Last tick with anything scheduled.
    pub fn last_scheduled(&self) -> Option<u64> {
        self.by_tick
            .iter()
            .rev()
            .find(|(_, q)| !q.is_empty())
            .map(|(t, _)| *t)
    }

    pub fn pending(&self) -> usize {
        self.by_tick.values().map(VecDeque::len).sum()
    }
}
