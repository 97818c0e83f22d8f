use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

use tracing::{debug, instrument};

use super::comm::{OpenNode, SearchState};
use super::Solver;
use crate::common::{Move, Solution, SolveOutcome, POWER_UP_STEPS};
use crate::config::Config;
use crate::maze::Maze;
use crate::stat::Stats;

/// A* over the composite (position, remaining collectibles, power timer)
/// state space. The explored set is bounded by
/// |cells| * 2^|collectibles| * (timer range).
pub struct AStarSolver {
    maze: Maze,
    stats: Stats,
}

impl AStarSolver {
    pub fn new(maze: &Maze) -> Self {
        AStarSolver {
            maze: maze.clone(),
            stats: Stats::default(),
        }
    }

    // Smallest Manhattan distance from the state to any remaining
    // collectible, zero at the goal. Teleports can only shorten real paths,
    // never lengthen them, so the straight-grid figure stays a lower bound;
    // treated as a close approximation rather than proven tight for every
    // teleporter layout.
    fn heuristic(&self, state: &SearchState) -> usize {
        let (row, col) = state.position;
        self.maze
            .collectibles()
            .iter()
            .enumerate()
            .filter(|(bit, _)| state.remaining & (1u64 << bit) != 0)
            .map(|(_, &(cr, cc))| row.abs_diff(cr) + col.abs_diff(cc))
            .min()
            .unwrap_or(0)
    }

    /// Legal single-step moves out of `state`, at most one per cardinal
    /// direction. Teleportation resolves before the bounds and wall checks:
    /// a step onto a registered corner lands on the opposite corner within
    /// the same move, for the same cost of 1.
    fn successors(&self, state: &SearchState) -> Vec<(SearchState, Move)> {
        let (row, col) = state.position;
        let mut successors = Vec::with_capacity(4);

        for mv in Move::ALL {
            let (dr, dc) = mv.delta();
            let raw_row = row as isize + dr;
            let raw_col = col as isize + dc;
            if raw_row < 0 || raw_col < 0 {
                continue;
            }
            let (tr, tc) = self.maze.teleport((raw_row as usize, raw_col as usize));
            if !self.maze.contains((tr, tc)) {
                continue;
            }
            // A live power timer lets the agent occupy wall cells.
            if self.maze.is_wall(tr, tc) && state.power_timer == 0 {
                continue;
            }

            let mut remaining = state.remaining;
            if let Some(bit) = self.maze.collectible_bit((tr, tc)) {
                remaining &= !(1u64 << bit);
            }

            // Natural decay first; landing on a power-up refills the timer
            // outright instead of stacking on top of what was left.
            let mut power_timer = state.power_timer.saturating_sub(1);
            if self.maze.is_power_up(tr, tc) {
                power_timer = POWER_UP_STEPS;
            }

            successors.push((
                SearchState {
                    position: (tr, tc),
                    remaining,
                    power_timer,
                },
                mv,
            ));
        }

        successors
    }

    fn construct_moves(
        trace: &HashMap<SearchState, (SearchState, Move)>,
        goal: SearchState,
    ) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut current = goal;
        while let Some(&(parent, mv)) = trace.get(&current) {
            moves.push(mv);
            current = parent;
        }
        moves.reverse();
        moves
    }
}

impl Solver for AStarSolver {
    #[instrument(skip_all, name = "a_star", level = "debug")]
    fn solve(&mut self, config: &Config) -> SolveOutcome {
        let total_solve_start_time = Instant::now();

        let mut frontier = BinaryHeap::new();
        let mut explored: HashSet<SearchState> = HashSet::new();
        let mut trace: HashMap<SearchState, (SearchState, Move)> = HashMap::new();
        let mut g_cost: HashMap<SearchState, usize> = HashMap::new();
        let mut seq: usize = 0;
        let mut pops: usize = 0;

        let start = SearchState::start(&self.maze);
        g_cost.insert(start, 0);
        frontier.push(OpenNode {
            state: start,
            f_cost: self.heuristic(&start),
            g_cost: 0,
            seq,
        });

        while let Some(current) = frontier.pop() {
            pops += 1;
            if let Some(cap) = config.max_expansions {
                if pops > cap {
                    debug!("frontier pop budget of {cap} exhausted");
                    return SolveOutcome::BudgetExhausted;
                }
            }

            if current.state.is_goal() {
                self.stats.time_us = total_solve_start_time.elapsed().as_micros() as usize;
                self.stats.cost = current.g_cost;
                self.stats.print();

                return SolveOutcome::Solved(Solution {
                    moves: Self::construct_moves(&trace, current.state),
                    cost: current.g_cost,
                });
            }

            // Stale frontier entries for already-expanded states are skipped
            // rather than removed eagerly.
            if explored.contains(&current.state) {
                continue;
            }
            explored.insert(current.state);
            self.stats.expand_nodes += 1;
            debug!("expand node: {current:?}");

            let tentative_g_cost = current.g_cost + 1;
            for (child, mv) in self.successors(&current.state) {
                if explored.contains(&child) {
                    continue;
                }

                if tentative_g_cost < *g_cost.get(&child).unwrap_or(&usize::MAX) {
                    trace.insert(child, (current.state, mv));
                    g_cost.insert(child, tentative_g_cost);
                    seq += 1;
                    frontier.push(OpenNode {
                        state: child,
                        f_cost: tentative_g_cost + self.heuristic(&child),
                        g_cost: tentative_g_cost,
                        seq,
                    });
                }
            }
        }

        SolveOutcome::Unreachable
    }
}
