use std::collections::{HashMap, HashSet};

use letterverse_blocks::ItemStack;
use letterverse_geom::{GridPos, Vec3};
use serde::{Deserialize, Serialize};

use crate::dimension::DimensionId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub const INVENTORY_SLOTS: usize = 36;
pub const MAX_STACK: u32 = 64;

#[derive(Clone, Debug)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_slots(INVENTORY_SLOTS)
    }
}

impl Inventory {
    pub fn with_slots(n: usize) -> Self {
        Self {
            slots: vec![None; n],
        }
    }

    /// Merge into matching stacks first, then empty slots. All-or-nothing.
    pub fn add(&mut self, stack: &ItemStack) -> bool {
        let mut room: u32 = 0;
        for slot in &self.slots {
            room += match slot {
                None => MAX_STACK,
                Some(s) if s.item == stack.item => MAX_STACK.saturating_sub(s.count),
                Some(_) => 0,
            };
        }
        if room < stack.count {
            return false;
        }
        let mut left = stack.count;
        for slot in self.slots.iter_mut().filter(|s| s.is_some()) {
            if let Some(s) = slot.as_mut().filter(|s| s.item == stack.item) {
                let moved = left.min(MAX_STACK.saturating_sub(s.count));
                s.count += moved;
                left -= moved;
            }
        }
        for slot in self.slots.iter_mut() {
            if left == 0 {
                break;
            }
            if slot.is_none() {
                let moved = left.min(MAX_STACK);
                *slot = Some(ItemStack::with_count(stack.item.clone(), moved));
                left -= moved;
            }
        }
        true
    }

    pub fn count(&self, item: &str) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| s.item == item)
            .map(|s| s.count)
            .sum()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| s.is_some())
    }
}

pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub dimension: DimensionId,
    pub pos: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub jumping: bool,
    pub sneaking: bool,
    pub fall_distance: f32,
    pub inventory: Inventory,
    /// Survives relogs; the engine saves it with the agent.
    pub persistent_flags: HashSet<String>,
    /// Chat lines sent to this agent, oldest first.
    pub inbox: Vec<String>,
    /// Item name -> game tick when the item becomes usable again.
    pub cooldowns: HashMap<String, u64>,
}

impl Agent {
    pub fn new(id: AgentId, name: impl Into<String>, dimension: DimensionId, pos: Vec3) -> Self {
        Self {
            id,
            name: name.into(),
            dimension,
            pos,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            jumping: false,
            sneaking: false,
            fall_distance: 0.0,
            inventory: Inventory::default(),
            persistent_flags: HashSet::new(),
            inbox: Vec::new(),
            cooldowns: HashMap::new(),
        }
    }

    #[inline]
    pub fn block_pos(&self) -> GridPos {
        self.pos.grid_pos()
    }

    pub fn send_message(&mut self, line: impl Into<String>) {
        self.inbox.push(line.into());
    }

    pub fn on_cooldown(&self, item: &str, now: u64) -> bool {
        self.cooldowns.get(item).is_some_and(|until| now < *until)
    }

    pub fn start_cooldown(&mut self, item: &str, now: u64, ticks: u64) {
        self.cooldowns.insert(item.to_string(), now + ticks);
    }
}
