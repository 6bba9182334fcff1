use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game::{Game, Move};

use super::strategy::Strategy;

/// Uniformly random legal play. The evaluation baseline.
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    pub fn new() -> Self {
        RandomStrategy {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomStrategy {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn choose_action(&mut self, game: &Game) -> Option<Move> {
        let legal = game.legal_moves(None);
        if legal.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..legal.len());
        Some(legal[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
