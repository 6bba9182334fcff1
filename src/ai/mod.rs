//! Move-choosing strategies: a shared [`Strategy`] trait, a heuristic
//! position evaluator, depth-bounded minimax search, tabular Q-learning,
//! and a random baseline.

pub mod evaluate;
mod minimax;
mod qlearning;
mod random;
mod strategy;

pub use minimax::{MinimaxConfig, MinimaxStrategy};
pub use qlearning::{QLearningConfig, QLearningStrategy, StateKey, ValueTable};
pub use random::RandomStrategy;
pub use strategy::{Experience, Strategy};
