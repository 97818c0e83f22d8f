use std::cmp::Ordering;

use crate::common::Position;
use crate::maze::Maze;

/// One node of the search graph: where the agent stands, which collectibles
/// are still missing (bit i maps to `Maze::collectibles()[i]`) and how many
/// steps of wall passability remain. The timer is part of the identity: the
/// same position with a different timer reaches different cells later, so
/// the two must stay distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SearchState {
    pub(crate) position: Position,
    pub(crate) remaining: u64,
    pub(crate) power_timer: u8,
}

impl SearchState {
    pub(crate) fn start(maze: &Maze) -> Self {
        let mut remaining = maze.full_collectible_mask();
        // Standing on a collectible at time zero already clears it.
        if let Some(bit) = maze.collectible_bit(maze.agent_start()) {
            remaining &= !(1u64 << bit);
        }

        SearchState {
            position: maze.agent_start(),
            remaining,
            power_timer: 0,
        }
    }

    pub(crate) fn is_goal(&self) -> bool {
        self.remaining == 0
    }
}

/// Frontier entry. Ordering never touches the state itself: ties on f fall
/// back to g, then to the strictly increasing push sequence number, so two
/// equally priced entries pop in insertion order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct OpenNode {
    pub(crate) state: SearchState,
    pub(crate) f_cost: usize,
    pub(crate) g_cost: usize,
    pub(crate) seq: usize,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.g_cost.cmp(&self.g_cost))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
