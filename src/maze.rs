use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::common::Position;

/// Most collectibles a single maze may carry; the remaining-collectible set
/// is tracked as a u64 bit mask during search.
pub const MAX_COLLECTIBLES: usize = 64;

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("failed to read maze file")]
    Io(#[from] std::io::Error),
    #[error("maze has no cells")]
    Empty,
    #[error("non-rectangular maze: row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("no agent start cell ('P') found")]
    MissingStart,
    #[error("multiple agent start cells: {0:?} and {1:?}")]
    DuplicateStart(Position, Position),
    #[error("{0} collectibles exceed the supported maximum of {MAX_COLLECTIBLES}")]
    TooManyCollectibles(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
    Collectible,
    PowerUp,
    Start,
}

impl Tile {
    fn from_char(ch: char) -> Self {
        match ch {
            '%' => Tile::Wall,
            '.' => Tile::Collectible,
            'O' => Tile::PowerUp,
            'P' => Tile::Start,
            _ => Tile::Open,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Maze {
    height: usize,
    width: usize,
    grid: Vec<Vec<Tile>>,
    agent_start: Position,
    collectibles: Vec<Position>,
    collectible_bits: HashMap<Position, usize>,
    power_ups: HashSet<Position>,
    teleport_map: HashMap<Position, Position>,
}

impl Maze {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MazeError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut rows = Vec::new();
        for line in reader.lines() {
            rows.push(line?);
        }

        Self::from_lines(&rows)
    }

    /// Parses a textual maze: `%` wall, `.` collectible, `O` power-up, `P`
    /// agent start, anything else open floor. Rows are taken verbatim so
    /// column alignment survives; only fully empty lines are skipped.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, MazeError> {
        let grid: Vec<Vec<Tile>> = lines
            .iter()
            .map(|line| line.as_ref())
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(Tile::from_char).collect())
            .collect();
        if grid.is_empty() {
            return Err(MazeError::Empty);
        }

        let mut agent_start = None;
        let mut collectibles = Vec::new();
        let mut power_ups = HashSet::new();
        for (row, tiles) in grid.iter().enumerate() {
            for (col, tile) in tiles.iter().enumerate() {
                match tile {
                    Tile::Start => match agent_start {
                        None => agent_start = Some((row, col)),
                        Some(first) => {
                            return Err(MazeError::DuplicateStart(first, (row, col)))
                        }
                    },
                    Tile::Collectible => collectibles.push((row, col)),
                    Tile::PowerUp => {
                        power_ups.insert((row, col));
                    }
                    Tile::Wall | Tile::Open => {}
                }
            }
        }
        let agent_start = agent_start.ok_or(MazeError::MissingStart)?;

        Self::new(grid, agent_start, collectibles, power_ups)
    }

    /// Builds a maze from already-structured parts. The teleport mapping is
    /// always derived from the grid dimensions: the four literal corners pair
    /// with their diagonal opposites.
    pub fn new(
        grid: Vec<Vec<Tile>>,
        agent_start: Position,
        collectibles: Vec<Position>,
        power_ups: HashSet<Position>,
    ) -> Result<Self, MazeError> {
        if grid.is_empty() || grid[0].is_empty() {
            return Err(MazeError::Empty);
        }
        let height = grid.len();
        let width = grid[0].len();
        for (row, tiles) in grid.iter().enumerate() {
            if tiles.len() != width {
                return Err(MazeError::Ragged {
                    row,
                    found: tiles.len(),
                    expected: width,
                });
            }
        }
        if collectibles.len() > MAX_COLLECTIBLES {
            return Err(MazeError::TooManyCollectibles(collectibles.len()));
        }

        let collectible_bits = collectibles
            .iter()
            .enumerate()
            .map(|(bit, &pos)| (pos, bit))
            .collect();

        let (bottom, right) = (height - 1, width - 1);
        let mut teleport_map = HashMap::with_capacity(4);
        teleport_map.insert((0, 0), (bottom, right));
        teleport_map.insert((bottom, right), (0, 0));
        teleport_map.insert((0, right), (bottom, 0));
        teleport_map.insert((bottom, 0), (0, right));

        Ok(Maze {
            height,
            width,
            grid,
            agent_start,
            collectibles,
            collectible_bits,
            power_ups,
            teleport_map,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn agent_start(&self) -> Position {
        self.agent_start
    }

    /// Collectible cells in row-major order; the index of a cell in this
    /// slice is its bit in the search's remaining-set mask.
    pub fn collectibles(&self) -> &[Position] {
        &self.collectibles
    }

    pub fn power_ups(&self) -> &HashSet<Position> {
        &self.power_ups
    }

    /// Out-of-range coordinates are a caller bug and panic.
    pub fn is_wall(&self, row: usize, col: usize) -> bool {
        self.grid[row][col] == Tile::Wall
    }

    pub fn is_power_up(&self, row: usize, col: usize) -> bool {
        self.power_ups.contains(&(row, col))
    }

    /// The paired opposite corner for the four registered corners, identity
    /// for every other cell. Pure lookup.
    pub fn teleport(&self, pos: Position) -> Position {
        self.teleport_map.get(&pos).copied().unwrap_or(pos)
    }

    pub(crate) fn contains(&self, pos: Position) -> bool {
        pos.0 < self.height && pos.1 < self.width
    }

    pub(crate) fn collectible_bit(&self, pos: Position) -> Option<usize> {
        self.collectible_bits.get(&pos).copied()
    }

    pub(crate) fn full_collectible_mask(&self) -> u64 {
        if self.collectibles.is_empty() {
            0
        } else {
            u64::MAX >> (64 - self.collectibles.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let lines = ["%%%%%", "%P.O%", "%. %%", "%%%%%"];
        let maze = Maze::from_lines(&lines).unwrap();

        assert_eq!(maze.height(), 4);
        assert_eq!(maze.width(), 5);
        assert_eq!(maze.agent_start(), (1, 1));
        assert_eq!(maze.collectibles(), &[(1, 2), (2, 1)]);
        assert!(maze.is_power_up(1, 3));

        assert!(maze.is_wall(0, 0));
        assert!(!maze.is_wall(1, 1));
        assert!(!maze.is_wall(2, 2));
    }

    #[test]
    fn test_teleport_corners_derived_from_dimensions() {
        let lines = ["%%%%%", "%P.O%", "%. %%", "%%%%%"];
        let maze = Maze::from_lines(&lines).unwrap();

        assert_eq!(maze.teleport((0, 0)), (3, 4));
        assert_eq!(maze.teleport((3, 4)), (0, 0));
        assert_eq!(maze.teleport((0, 4)), (3, 0));
        assert_eq!(maze.teleport((3, 0)), (0, 4));
        // Everything that is not a corner teleports to itself.
        assert_eq!(maze.teleport((1, 1)), (1, 1));
        assert_eq!(maze.teleport((9, 9)), (9, 9));
    }

    #[test]
    fn test_parse_skips_empty_lines() {
        let lines = ["%%%", "%P%", "%%%", ""];
        let maze = Maze::from_lines(&lines).unwrap();
        assert_eq!(maze.height(), 3);
    }

    #[test]
    fn test_parse_missing_start() {
        let lines = ["%%%", "%.%", "%%%"];
        assert!(matches!(
            Maze::from_lines(&lines),
            Err(MazeError::MissingStart)
        ));
    }

    #[test]
    fn test_parse_duplicate_start() {
        let lines = ["%%%%", "%PP%", "%%%%"];
        assert!(matches!(
            Maze::from_lines(&lines),
            Err(MazeError::DuplicateStart((1, 1), (1, 2)))
        ));
    }

    #[test]
    fn test_parse_ragged_rows() {
        let lines = ["%%%%", "%P%", "%%%%"];
        assert!(matches!(
            Maze::from_lines(&lines),
            Err(MazeError::Ragged { row: 1, .. })
        ));
    }

    #[test]
    fn test_parse_empty_input() {
        let lines: [&str; 0] = [];
        assert!(matches!(Maze::from_lines(&lines), Err(MazeError::Empty)));
    }

    #[test]
    fn test_parse_too_many_collectibles() {
        let row = format!("P{}", ".".repeat(MAX_COLLECTIBLES + 1));
        let lines = [row];
        assert!(matches!(
            Maze::from_lines(&lines),
            Err(MazeError::TooManyCollectibles(n)) if n == MAX_COLLECTIBLES + 1
        ));
    }

    #[test]
    fn test_read_example_map() {
        let maze = Maze::from_file("maps/example.map").unwrap();

        assert_eq!(maze.height(), 7);
        assert_eq!(maze.width(), 10);
        assert_eq!(maze.agent_start(), (1, 1));
        assert_eq!(maze.collectibles().len(), 4);
        assert!(maze.is_power_up(3, 3));
        assert!(maze.is_power_up(5, 5));
        assert_eq!(maze.teleport((0, 0)), (6, 9));
    }
}
