mod astar;
mod comm;

pub use astar::AStarSolver;

use crate::common::SolveOutcome;
use crate::config::Config;

pub trait Solver {
    fn solve(&mut self, config: &Config) -> SolveOutcome;
}
