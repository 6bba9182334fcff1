//! Core Kuba game logic: board representation, marble/direction types, and
//! the rule engine state machine with its move enumerator.

mod board;
mod game;
mod player;
mod types;

pub use board::{Board, BOARD_SIZE};
pub use game::{Game, IllegalMove, MarbleCounts};
pub use player::{Player, PreviousMove};
pub use types::{Coordinate, Direction, MarbleColor, Move};
