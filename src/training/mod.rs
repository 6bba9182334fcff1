//! Self-play training loop, episode driver, and rolling metrics.

mod episode;
mod metrics;
mod trainer;

pub use episode::{evaluate_vs_random, play_game, shaped_reward, GameOutcome};
pub use metrics::TrainingMetrics;
pub use trainer::{Trainer, TrainerConfig};
