use hashbrown::HashMap;
use letterverse_geom::GridPos;
use letterverse_world::AgentId;

/// Where an agent stands this tick, as far as the gate cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    Outside,
    /// In a portal tile of an engine-native frame.
    NativePortal,
    /// In a portal tile of a bookshelf frame.
    LetterversePortal(GridPos),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitState {
    Counting { ticks: u32, at: GridPos },
    /// Already moved during this stay; stays quiet until the agent leaves or changes tile.
    Suppressed { at: GridPos },
}

impl TransitState {
    fn at(&self) -> GridPos {
        match *self {
            TransitState::Counting { at, .. } | TransitState::Suppressed { at } => at,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    Outside,
    Native,
    Counting(u32),
    /// Threshold reached this tick; the caller moves the agent.
    Relocate,
    Suppressed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TravelDecision {
    Allow,
    Cancel,
}

/// Per-agent dwell tracking for Letterverse portals.
#[derive(Debug, Clone)]
pub struct TransitGate {
    threshold: u32,
    states: HashMap<AgentId, TransitState>,
}

impl TransitGate {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            states: HashMap::new(),
        }
    }

    pub fn state(&self, agent: AgentId) -> Option<TransitState> {
        self.states.get(&agent).copied()
    }

    pub fn observe(&mut self, agent: AgentId, obs: Observation) -> GateOutcome {
        let pos = match obs {
            Observation::Outside => {
                self.states.remove(&agent);
                return GateOutcome::Outside;
            }
            Observation::NativePortal => {
                self.states.remove(&agent);
                return GateOutcome::Native;
            }
            Observation::LetterversePortal(pos) => pos,
        };
        let state = self
            .states
            .entry(agent)
            .or_insert(TransitState::Counting { ticks: 0, at: pos });
        if state.at() != pos {
            log::debug!(target: "transit", "agent {} entered portal tile {}", agent, pos);
            *state = TransitState::Counting { ticks: 0, at: pos };
        }
        match *state {
            TransitState::Suppressed { .. } => GateOutcome::Suppressed,
            TransitState::Counting { ticks, at } => {
                let ticks = ticks + 1;
                if ticks >= self.threshold {
                    *state = TransitState::Suppressed { at };
                    GateOutcome::Relocate
                } else {
                    *state = TransitState::Counting { ticks, at };
                    GateOutcome::Counting(ticks)
                }
            }
        }
    }

    pub fn forget(&mut self, agent: AgentId) {
        self.states.remove(&agent);
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn tracked(&self) -> usize {
        self.states.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: AgentId = AgentId(1);

    fn inside(x: i32) -> Observation {
        Observation::LetterversePortal(GridPos::new(x, 65, 0))
    }

    #[test]
    fn two_ticks_inside_relocates_once() {
        let mut g = TransitGate::new(2);
        assert_eq!(g.observe(A, inside(1)), GateOutcome::Counting(1));
        assert_eq!(g.observe(A, inside(1)), GateOutcome::Relocate);
        for _ in 0..5000 {
            assert_eq!(g.observe(A, inside(1)), GateOutcome::Suppressed);
        }
    }

    #[test]
    fn stepping_out_after_one_tick_resets() {
        let mut g = TransitGate::new(2);
        assert_eq!(g.observe(A, inside(1)), GateOutcome::Counting(1));
        assert_eq!(g.observe(A, Observation::Outside), GateOutcome::Outside);
        assert_eq!(g.state(A), None);
        assert_eq!(g.observe(A, inside(1)), GateOutcome::Counting(1));
    }

    #[test]
    fn changing_tile_restarts_the_count() {
        let mut g = TransitGate::new(2);
        g.observe(A, inside(1));
        assert_eq!(g.observe(A, inside(2)), GateOutcome::Counting(1));
        assert_eq!(g.observe(A, inside(2)), GateOutcome::Relocate);
    }

    #[test]
    fn native_portals_are_not_tracked() {
        let mut g = TransitGate::new(2);
        g.observe(A, inside(1));
        assert_eq!(g.observe(A, Observation::NativePortal), GateOutcome::Native);
        assert_eq!(g.tracked(), 0);
    }
}
