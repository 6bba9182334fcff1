use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::BOARD_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarbleColor {
    White,
    Black,
    Red,
}

impl MarbleColor {
    /// The opposing player color. Red is neutral and has no opponent.
    pub fn opponent(self) -> MarbleColor {
        match self {
            MarbleColor::White => MarbleColor::Black,
            MarbleColor::Black => MarbleColor::White,
            MarbleColor::Red => MarbleColor::Red,
        }
    }

    /// Single-character tag used in board signatures and display.
    pub fn tag(self) -> char {
        match self {
            MarbleColor::White => 'W',
            MarbleColor::Black => 'B',
            MarbleColor::Red => 'R',
        }
    }
}

impl fmt::Display for MarbleColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Probe order for move enumeration. Stable: enumeration order defines
    /// search branch order and tie-breaking everywhere downstream.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit step as (row delta, col delta).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }

    /// Total and involutive: no direction is its own opposite.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::Up => "Up",
            Direction::Down => "Down",
        };
        write!(f, "{name}")
    }
}

/// A cell on the 7×7 board. Always in-bounds by construction when produced
/// by [`Coordinate::offset`]; raw construction is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Coordinate { row, col }
    }

    pub fn in_bounds(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// One step in `direction`, or `None` if that leaves the board.
    pub fn offset(self, direction: Direction) -> Option<Coordinate> {
        let (dr, dc) = direction.delta();
        let row = self.row as i32 + dr;
        let col = self.col as i32 + dc;
        if row < 0 || row >= BOARD_SIZE as i32 || col < 0 || col >= BOARD_SIZE as i32 {
            return None;
        }
        Some(Coordinate::new(row as usize, col as usize))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The atomic unit accepted by the rule engine: push the marble at `coord`
/// one step in `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub coord: Coordinate,
    pub direction: Direction,
}

impl Move {
    pub fn new(coord: Coordinate, direction: Direction) -> Self {
        Move { coord, direction }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.coord, self.direction)
    }
}
