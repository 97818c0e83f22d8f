use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Write};

use crate::maze::Maze;

pub type Position = (usize, usize);

/// Steps of wall passability granted when the agent lands on a power-up.
pub(crate) const POWER_UP_STEPS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    North,
    South,
    West,
    East,
}

impl Move {
    pub(crate) const ALL: [Move; 4] = [Move::North, Move::South, Move::West, Move::East];

    pub(crate) fn delta(self) -> (isize, isize) {
        match self {
            Move::North => (-1, 0),
            Move::South => (1, 0),
            Move::West => (0, -1),
            Move::East => (0, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub moves: Vec<Move>,
    pub cost: usize,
}

impl Solution {
    /// Replays the move sequence from the agent start, applying the same
    /// teleport, wall-pass and timer rules the search uses. Returns false if
    /// any move is illegal, a collectible is left over, or the cost disagrees
    /// with the move count.
    pub fn verify(&self, maze: &Maze) -> bool {
        if self.cost != self.moves.len() {
            return false;
        }

        let (mut row, mut col) = maze.agent_start();
        let mut remaining: HashSet<Position> = maze.collectibles().iter().copied().collect();
        remaining.remove(&(row, col));
        let mut timer: u8 = 0;

        for mv in &self.moves {
            let (dr, dc) = mv.delta();
            let raw_row = row as isize + dr;
            let raw_col = col as isize + dc;
            if raw_row < 0 || raw_col < 0 {
                return false;
            }
            let (tr, tc) = maze.teleport((raw_row as usize, raw_col as usize));
            if !maze.contains((tr, tc)) {
                return false;
            }
            if maze.is_wall(tr, tc) && timer == 0 {
                return false;
            }
            timer = timer.saturating_sub(1);
            if maze.is_power_up(tr, tc) {
                timer = POWER_UP_STEPS;
            }
            remaining.remove(&(tr, tc));
            row = tr;
            col = tc;
        }

        remaining.is_empty()
    }

    pub fn write_to_yaml(&self, path: &str) -> anyhow::Result<()> {
        let file = File::create(path)?;
        let mut writer = io::BufWriter::new(file);
        let yaml_data = serde_yaml::to_string(self)?;
        writer.write_all(yaml_data.as_bytes())?;

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved(Solution),
    /// Frontier exhausted with collectibles left over: some collectible is
    /// walled off from every reachable cell. A normal result, not an error.
    Unreachable,
    /// The configured cap on frontier pops was hit before reaching a goal.
    BudgetExhausted,
}

impl SolveOutcome {
    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            SolveOutcome::Unreachable | SolveOutcome::BudgetExhausted => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn power_up_maze() -> Maze {
        let lines = ["%%%%%%%", "%PO%.%%", "%%%%%%%"];
        Maze::from_lines(&lines).unwrap()
    }

    #[test]
    fn test_verify_accepts_wall_pass_route() {
        let maze = power_up_maze();
        let solution = Solution {
            moves: vec![Move::East, Move::East, Move::East],
            cost: 3,
        };
        assert!(solution.verify(&maze));
    }

    #[test]
    fn test_verify_rejects_wall_without_power() {
        // Same corridor but with no power-up to eat first.
        let lines = ["%%%%%%%", "%P %.%%", "%%%%%%%"];
        let maze = Maze::from_lines(&lines).unwrap();
        // Second East heads into the wall at (1, 3) with the timer at zero.
        let solution = Solution {
            moves: vec![Move::East, Move::East],
            cost: 2,
        };
        assert!(!solution.verify(&maze));
    }

    #[test]
    fn test_verify_rejects_cost_mismatch() {
        let maze = power_up_maze();
        let solution = Solution {
            moves: vec![Move::East, Move::East, Move::East],
            cost: 2,
        };
        assert!(!solution.verify(&maze));
    }

    #[test]
    fn test_verify_rejects_leftover_collectibles() {
        let maze = power_up_maze();
        let solution = Solution {
            moves: vec![Move::East, Move::East],
            cost: 2,
        };
        assert!(!solution.verify(&maze));
    }
}
