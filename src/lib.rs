//! Collect-all maze pathfinding: A* over a composite (position, remaining
//! collectibles, power-up timer) state space. The explored set grows
//! exponentially with the collectible count, so the engine targets mazes
//! with tens of collectibles, not hundreds.

pub mod common;
pub mod config;
pub mod maze;
pub mod solver;
pub(crate) mod stat;
