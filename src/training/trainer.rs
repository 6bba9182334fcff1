use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ai::{QLearningStrategy, StateKey, Strategy, ValueTable};
use crate::error::TrainingError;
use crate::game::Game;
use crate::model::ModelStore;

use super::episode::{evaluate_vs_random, shaped_reward, GameOutcome};
use super::metrics::TrainingMetrics;

/// Training loop parameters. An interval of 0 disables that activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub num_episodes: u32,
    pub max_moves_per_episode: u32,
    pub log_interval: u32,
    pub eval_interval: u32,
    pub eval_games: u32,
    pub save_interval: u32,
    pub model_path: PathBuf,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            num_episodes: 10_000,
            max_moves_per_episode: 1_000,
            log_interval: 100,
            eval_interval: 500,
            eval_games: 100,
            save_interval: 1_000,
            model_path: PathBuf::from("models/kuba.json"),
        }
    }
}

/// Self-play trainer: the learner plays both colors of every episode and
/// receives a temporal-difference update after each move it makes.
pub struct Trainer {
    config: TrainerConfig,
    learner: QLearningStrategy,
    metrics: TrainingMetrics,
    store: ModelStore,
}

impl Trainer {
    pub fn new(config: TrainerConfig, learner: QLearningStrategy) -> Self {
        let store = ModelStore::new(config.model_path.clone());
        Trainer {
            config,
            learner,
            metrics: TrainingMetrics::new(100),
            store,
        }
    }

    pub fn metrics(&self) -> &TrainingMetrics {
        &self.metrics
    }

    pub fn table(&self) -> &ValueTable {
        self.learner.table()
    }

    pub fn into_table(self) -> ValueTable {
        self.learner.into_table()
    }

    pub fn run(&mut self) -> Result<(), TrainingError> {
        for episode in 1..=self.config.num_episodes {
            let (outcome, moves) = self.run_episode();
            self.metrics.record_episode(outcome, moves);

            if self.config.log_interval > 0 && episode % self.config.log_interval == 0 {
                println!(
                    "episode {episode}: avg moves {:.1}, draw rate {:.2}, table size {}",
                    self.metrics.avg_moves(),
                    self.metrics.draw_rate(),
                    self.learner.table().len()
                );
            }

            if self.config.eval_interval > 0 && episode % self.config.eval_interval == 0 {
                let win_rate = self.evaluate();
                self.metrics.record_eval(win_rate);
                println!("episode {episode}: eval win rate vs random {win_rate:.2}");
            }

            if self.config.save_interval > 0 && episode % self.config.save_interval == 0 {
                self.store.save(self.learner.table())?;
            }
        }

        self.store.save(self.learner.table())?;
        Ok(())
    }

    /// One self-play episode with online updates.
    fn run_episode(&mut self) -> (GameOutcome, u32) {
        let mut game = Game::new();
        let mut moves = 0u32;

        while moves < self.config.max_moves_per_episode && !game.is_over() {
            let mover = game.current_player().color;
            let state = StateKey::from_game(&game);
            let Some(action) = self.learner.choose_action(&game) else {
                break;
            };
            game.attempt_move(action.coord, action.direction)
                .expect("chosen move must be legal");
            moves += 1;

            let next_state = StateKey::from_game(&game);
            let reward = shaped_reward(&game, mover);
            let done = game.is_over();
            self.learner
                .learn(state, action, &next_state, reward, done);
        }

        let outcome = match game.winner() {
            Some(player) => GameOutcome::Win(player.color),
            None => GameOutcome::Draw,
        };
        (outcome, moves)
    }

    /// Greedy win rate against the random baseline. Exploration is switched
    /// off for the measurement and restored afterwards.
    fn evaluate(&mut self) -> f64 {
        let epsilon = self.learner.epsilon();
        self.learner.set_epsilon(0.0);
        let win_rate = evaluate_vs_random(
            &mut self.learner,
            self.config.eval_games,
            self.config.max_moves_per_episode,
        );
        self.learner.set_epsilon(epsilon);
        win_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::QLearningConfig;

    fn small_config(model_path: PathBuf) -> TrainerConfig {
        TrainerConfig {
            num_episodes: 3,
            max_moves_per_episode: 30,
            log_interval: 0,
            eval_interval: 2,
            eval_games: 2,
            save_interval: 0,
            model_path,
        }
    }

    #[test]
    fn test_short_run_learns_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kuba.json");
        let learner = QLearningStrategy::seeded(QLearningConfig::default(), 17);
        let mut trainer = Trainer::new(small_config(path.clone()), learner);

        trainer.run().unwrap();

        assert_eq!(trainer.metrics().episodes(), 3);
        assert!(!trainer.table().is_empty());
        assert!(trainer.metrics().last_eval_win_rate().is_some());
        assert!(path.exists());

        let saved = ModelStore::new(path).load().unwrap();
        assert_eq!(saved.len(), trainer.table().len());
    }

    #[test]
    fn test_epsilon_restored_after_evaluation() {
        let dir = tempfile::tempdir().unwrap();
        let learner = QLearningStrategy::seeded(QLearningConfig::default(), 17);
        let mut trainer = Trainer::new(small_config(dir.path().join("m.json")), learner);

        trainer.run().unwrap();
        assert_eq!(trainer.learner.epsilon(), QLearningConfig::default().epsilon);
    }
}
