use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::game::{Game, MarbleColor, Move};

use super::evaluate;
use super::strategy::Strategy;

/// Minimax search parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Look-ahead depth in plies.
    pub depth: usize,
    /// Probability of playing a uniformly random legal move instead of
    /// searching (exploration).
    pub epsilon: f64,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        MinimaxConfig {
            depth: 2,
            epsilon: 0.1,
        }
    }
}

/// Depth-bounded minimax over cloned games, with epsilon-greedy exploration.
/// Every branch works on an exclusively owned clone; the live game is never
/// mutated.
pub struct MinimaxStrategy {
    config: MinimaxConfig,
    rng: StdRng,
}

impl MinimaxStrategy {
    pub fn new(config: MinimaxConfig) -> Self {
        MinimaxStrategy {
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic RNG, for reproducible games and tests.
    pub fn seeded(config: MinimaxConfig, seed: u64) -> Self {
        MinimaxStrategy {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn best_move(&self, game: &Game) -> Option<Move> {
        let perspective = game.current_player().color;
        let mut best: Option<(Move, i64)> = None;

        for mv in game.legal_moves(None) {
            let mut next = game.clone();
            next.attempt_move(mv.coord, mv.direction)
                .expect("enumerated move must be legal");
            let score = self.minimax(
                &next,
                self.config.depth.saturating_sub(1),
                false,
                perspective,
            );
            // Strict comparison: the first move wins ties.
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((mv, score)),
            }
        }

        best.map(|(mv, _)| mv)
    }

    /// Recursive search. Leaves are always scored from the root mover's
    /// perspective; `maximizing` alternates with the side to move.
    fn minimax(
        &self,
        game: &Game,
        depth: usize,
        maximizing: bool,
        perspective: MarbleColor,
    ) -> i64 {
        if depth == 0 || game.is_over() {
            return evaluate::score(game, perspective);
        }

        let legal = game.legal_moves(None);
        if legal.is_empty() {
            // Degenerate branch: nobody to move, evaluate directly.
            return evaluate::score(game, perspective);
        }

        let mut best = if maximizing { i64::MIN } else { i64::MAX };
        for mv in legal {
            let mut next = game.clone();
            next.attempt_move(mv.coord, mv.direction)
                .expect("enumerated move must be legal");
            let score = self.minimax(&next, depth - 1, !maximizing, perspective);
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }
}

impl Strategy for MinimaxStrategy {
    fn choose_action(&mut self, game: &Game) -> Option<Move> {
        let legal = game.legal_moves(None);
        if legal.is_empty() {
            return None;
        }

        if self.config.epsilon > 0.0 && self.rng.random_range(0.0..1.0) < self.config.epsilon {
            let idx = self.rng.random_range(0..legal.len());
            return Some(legal[idx]);
        }

        self.best_move(game)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
