use crate::game::{Game, Move};

use super::qlearning::StateKey;

/// A single step of experience for the learning strategy.
#[derive(Debug, Clone)]
pub struct Experience {
    pub state: StateKey,
    pub action: Move,
    pub reward: f64,
    pub next_state: StateKey,
    pub done: bool,
}

/// Universal interface for move-choosing strategies. A driver selects the
/// concrete strategy at construction time; all it needs afterwards is
/// `choose_action`.
pub trait Strategy {
    /// Pick a legal move for the current player, or `None` if no legal move
    /// exists. Implementations must never mutate `game`; look-ahead works on
    /// independently owned clones.
    fn choose_action(&mut self, game: &Game) -> Option<Move>;

    /// The strategy's display name.
    fn name(&self) -> &str;

    /// Feed back one step of experience. No-op for non-learning strategies.
    fn update(&mut self, _experience: &Experience) {}
}
