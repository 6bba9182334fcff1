use super::types::{Coordinate, Direction, MarbleColor};

pub const BOARD_SIZE: usize = 7;

/// The fixed standard starting layout: 8 White, 8 Black, and a centered
/// cluster of 13 Red marbles.
const STANDARD_LAYOUT: [[u8; BOARD_SIZE]; BOARD_SIZE] = [
    *b"WW...BB",
    *b"WW.R.BB",
    *b"..RRR..",
    *b".RRRRR.",
    *b"..RRR..",
    *b"BB.R.WW",
    *b"BB...WW",
];

/// A 7×7 grid of optional marbles. Pure data plus line queries; all rule
/// enforcement lives in [`super::Game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<MarbleColor>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create a board with no marbles.
    pub fn empty() -> Self {
        Board {
            grid: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Create a board in the standard starting layout.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for (row, cells) in STANDARD_LAYOUT.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                board.grid[row][col] = match cell {
                    b'W' => Some(MarbleColor::White),
                    b'B' => Some(MarbleColor::Black),
                    b'R' => Some(MarbleColor::Red),
                    _ => None,
                };
            }
        }
        board
    }

    /// Get the marble at a coordinate. Out-of-range reads return `None`.
    pub fn get(&self, coord: Coordinate) -> Option<MarbleColor> {
        self.grid
            .get(coord.row)
            .and_then(|row| row.get(coord.col))
            .copied()
            .flatten()
    }

    /// Set or clear a cell. Out-of-range writes are ignored.
    pub fn set(&mut self, coord: Coordinate, marble: Option<MarbleColor>) {
        if coord.in_bounds() {
            self.grid[coord.row][coord.col] = marble;
        }
    }

    /// The maximal contiguous occupied run starting at `start` (inclusive),
    /// walking in `direction` and stopping at the first empty cell or the
    /// board edge. This is the "what would be pushed" query.
    pub fn trace_line(&self, start: Coordinate, direction: Direction) -> Vec<Coordinate> {
        let mut run = Vec::new();
        let mut cursor = start;
        while cursor.in_bounds() {
            if self.get(cursor).is_none() {
                break;
            }
            run.push(cursor);
            match cursor.offset(direction) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        run
    }

    /// All occupied cells, optionally filtered by color, in row-major order.
    /// The order is stable and significant: it defines move enumeration order.
    pub fn all_marbles(&self, color: Option<MarbleColor>) -> Vec<Coordinate> {
        let mut coords = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Some(marble) = self.grid[row][col] {
                    if color.is_none() || color == Some(marble) {
                        coords.push(Coordinate::new(row, col));
                    }
                }
            }
        }
        coords
    }

    /// Count of marbles of a given color.
    pub fn count(&self, color: MarbleColor) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(color))
            .count()
    }

    /// Canonical 49-character encoding of the grid in row-major order
    /// (`W`/`B`/`R` for marbles, `.` for empty). Two boards with identical
    /// cell contents always produce identical signatures.
    pub fn signature(&self) -> String {
        let mut sig = String::with_capacity(BOARD_SIZE * BOARD_SIZE);
        for row in &self.grid {
            for cell in row {
                sig.push(cell.map_or('.', MarbleColor::tag));
            }
        }
        sig
    }
}
