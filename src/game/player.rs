use serde::{Deserialize, Serialize};

use super::types::{Coordinate, Direction, MarbleColor};

/// Record of a player's last push, kept for KO-rule checks against the
/// opponent's next move. Plain owned data, copied wholesale on clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviousMove {
    pub coord: Coordinate,
    pub direction: Direction,
    pub affected: Vec<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub color: MarbleColor,
    pub captured_red: u32,
    pub previous_move: Option<PreviousMove>,
}

impl Player {
    pub fn new(name: impl Into<String>, color: MarbleColor) -> Self {
        Player {
            name: name.into(),
            color,
            captured_red: 0,
            previous_move: None,
        }
    }
}
