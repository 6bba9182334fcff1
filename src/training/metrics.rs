use std::collections::VecDeque;

use super::episode::GameOutcome;
use crate::game::MarbleColor;

/// Rolling training statistics over a fixed window of recent episodes.
pub struct TrainingMetrics {
    window: usize,
    outcomes: VecDeque<GameOutcome>,
    moves: VecDeque<u32>,
    episodes: u64,
    last_eval_win_rate: Option<f64>,
}

impl TrainingMetrics {
    pub fn new(window: usize) -> Self {
        TrainingMetrics {
            window,
            outcomes: VecDeque::with_capacity(window),
            moves: VecDeque::with_capacity(window),
            episodes: 0,
            last_eval_win_rate: None,
        }
    }

    pub fn record_episode(&mut self, outcome: GameOutcome, moves: u32) {
        if self.outcomes.len() == self.window {
            self.outcomes.pop_front();
            self.moves.pop_front();
        }
        self.outcomes.push_back(outcome);
        self.moves.push_back(moves);
        self.episodes += 1;
    }

    pub fn record_eval(&mut self, win_rate: f64) {
        self.last_eval_win_rate = Some(win_rate);
    }

    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    /// Fraction of windowed episodes won by `color`.
    pub fn win_rate(&self, color: MarbleColor) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let wins = self
            .outcomes
            .iter()
            .filter(|o| **o == GameOutcome::Win(color))
            .count();
        wins as f64 / self.outcomes.len() as f64
    }

    /// Fraction of windowed episodes that hit the move cap.
    pub fn draw_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let draws = self
            .outcomes
            .iter()
            .filter(|o| **o == GameOutcome::Draw)
            .count();
        draws as f64 / self.outcomes.len() as f64
    }

    pub fn avg_moves(&self) -> f64 {
        if self.moves.is_empty() {
            return 0.0;
        }
        self.moves.iter().map(|&m| f64::from(m)).sum::<f64>() / self.moves.len() as f64
    }

    pub fn last_eval_win_rate(&self) -> Option<f64> {
        self.last_eval_win_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metrics_read_zero() {
        let metrics = TrainingMetrics::new(10);
        assert_eq!(metrics.episodes(), 0);
        assert_eq!(metrics.win_rate(MarbleColor::White), 0.0);
        assert_eq!(metrics.draw_rate(), 0.0);
        assert_eq!(metrics.avg_moves(), 0.0);
        assert_eq!(metrics.last_eval_win_rate(), None);
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut metrics = TrainingMetrics::new(2);
        metrics.record_episode(GameOutcome::Win(MarbleColor::White), 10);
        metrics.record_episode(GameOutcome::Win(MarbleColor::Black), 20);
        metrics.record_episode(GameOutcome::Win(MarbleColor::Black), 30);

        // The White win has scrolled out of the window.
        assert_eq!(metrics.win_rate(MarbleColor::White), 0.0);
        assert_eq!(metrics.win_rate(MarbleColor::Black), 1.0);
        assert_eq!(metrics.avg_moves(), 25.0);
        assert_eq!(metrics.episodes(), 3);
    }

    #[test]
    fn test_rates_partition() {
        let mut metrics = TrainingMetrics::new(10);
        metrics.record_episode(GameOutcome::Win(MarbleColor::White), 12);
        metrics.record_episode(GameOutcome::Draw, 40);
        metrics.record_episode(GameOutcome::Win(MarbleColor::Black), 18);
        metrics.record_episode(GameOutcome::Win(MarbleColor::White), 22);

        assert_eq!(metrics.win_rate(MarbleColor::White), 0.5);
        assert_eq!(metrics.win_rate(MarbleColor::Black), 0.25);
        assert_eq!(metrics.draw_rate(), 0.25);
    }

    #[test]
    fn test_eval_win_rate_is_latest() {
        let mut metrics = TrainingMetrics::new(10);
        metrics.record_eval(0.4);
        metrics.record_eval(0.7);
        assert_eq!(metrics.last_eval_win_rate(), Some(0.7));
    }
}
