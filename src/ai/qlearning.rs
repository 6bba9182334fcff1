use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::game::{Game, MarbleColor, Move};

use super::strategy::{Experience, Strategy};

/// Canonical key for a game position: the board signature plus the side to
/// move. Two games with equal keys are interchangeable for value lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey {
    pub board: String,
    pub to_move: MarbleColor,
}

impl StateKey {
    pub fn from_game(game: &Game) -> Self {
        StateKey {
            board: game.board().signature(),
            to_move: game.current_player().color,
        }
    }
}

/// One `(state, action) -> value` record in the serialized table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TableEntry {
    state: StateKey,
    action: Move,
    value: f64,
}

/// Learned action values, keyed by state then action.
///
/// JSON-serializable: the nested maps flatten into a sorted entry list on the
/// wire, so saved artifacts are stable byte-for-byte across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "Vec<TableEntry>", from = "Vec<TableEntry>")]
pub struct ValueTable {
    values: HashMap<StateKey, HashMap<Move, f64>>,
}

impl From<ValueTable> for Vec<TableEntry> {
    fn from(table: ValueTable) -> Self {
        let mut entries: Vec<TableEntry> = table
            .values
            .into_iter()
            .flat_map(|(state, actions)| {
                actions.into_iter().map(move |(action, value)| TableEntry {
                    state: state.clone(),
                    action,
                    value,
                })
            })
            .collect();
        entries.sort_by(|a, b| (&a.state, &a.action).cmp(&(&b.state, &b.action)));
        entries
    }
}

impl From<Vec<TableEntry>> for ValueTable {
    fn from(entries: Vec<TableEntry>) -> Self {
        let mut table = ValueTable::new();
        for entry in entries {
            table.set(entry.state, entry.action, entry.value);
        }
        table
    }
}

impl ValueTable {
    pub fn new() -> Self {
        ValueTable {
            values: HashMap::new(),
        }
    }

    /// The learned value of `(state, action)`, or 0.0 if never visited.
    pub fn get(&self, state: &StateKey, action: &Move) -> f64 {
        self.values
            .get(state)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, state: StateKey, action: Move, value: f64) {
        self.values.entry(state).or_default().insert(action, value);
    }

    /// Greatest learned value over all recorded actions in `state`, or 0.0
    /// for an unseen state. The bootstrap term of the TD update. Negative
    /// maxima propagate as-is; only unseen states read as 0.
    pub fn max_value(&self, state: &StateKey) -> f64 {
        self.values
            .get(state)
            .and_then(|actions| actions.values().copied().reduce(f64::max))
            .unwrap_or(0.0)
    }

    /// Highest-valued move among `candidates`, by strict comparison: the
    /// first candidate wins ties, so greedy play is deterministic.
    pub fn best_action(&self, state: &StateKey, candidates: &[Move]) -> Option<Move> {
        let mut best: Option<(Move, f64)> = None;
        for &mv in candidates {
            let value = self.get(state, &mv);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((mv, value)),
            }
        }
        best.map(|(mv, _)| mv)
    }

    /// Number of recorded `(state, action)` pairs.
    pub fn len(&self) -> usize {
        self.values.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Combine tables from independent runs into the per-key average. Keys
    /// missing from some tables average in an implicit 0.0 for them.
    pub fn merge(tables: Vec<ValueTable>) -> ValueTable {
        let count = tables.len();
        if count == 0 {
            return ValueTable::new();
        }

        let mut sums: HashMap<StateKey, HashMap<Move, f64>> = HashMap::new();
        for table in tables {
            for (state, actions) in table.values {
                let slot = sums.entry(state).or_default();
                for (action, value) in actions {
                    *slot.entry(action).or_insert(0.0) += value;
                }
            }
        }
        for actions in sums.values_mut() {
            for value in actions.values_mut() {
                *value /= count as f64;
            }
        }
        ValueTable { values: sums }
    }
}

/// Q-learning hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    /// Probability of exploring with a uniformly random legal move.
    pub epsilon: f64,
    /// Learning rate.
    pub alpha: f64,
    /// Discount factor on future value.
    pub gamma: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        QLearningConfig {
            epsilon: 0.1,
            alpha: 0.1,
            gamma: 0.9,
        }
    }
}

/// Tabular Q-learning strategy: epsilon-greedy over a [`ValueTable`],
/// updated one temporal-difference step at a time.
pub struct QLearningStrategy {
    table: ValueTable,
    config: QLearningConfig,
    rng: StdRng,
}

impl QLearningStrategy {
    pub fn new(config: QLearningConfig) -> Self {
        QLearningStrategy {
            table: ValueTable::new(),
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Resume from a previously learned table.
    pub fn with_table(table: ValueTable, config: QLearningConfig) -> Self {
        QLearningStrategy {
            table,
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic RNG, for reproducible training runs and tests.
    pub fn seeded(config: QLearningConfig, seed: u64) -> Self {
        QLearningStrategy {
            table: ValueTable::new(),
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn into_table(self) -> ValueTable {
        self.table
    }

    pub fn epsilon(&self) -> f64 {
        self.config.epsilon
    }

    /// Exploration is adjusted externally: the trainer zeroes it for
    /// evaluation games and restores it afterwards.
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.config.epsilon = epsilon;
    }

    /// One temporal-difference step:
    /// `Q(s,a) += alpha * (reward + gamma * max_a' Q(s',a') - Q(s,a))`.
    /// Unseen next states bootstrap a future value of 0.
    pub fn learn(
        &mut self,
        state: StateKey,
        action: Move,
        next_state: &StateKey,
        reward: f64,
        _done: bool,
    ) {
        let current = self.table.get(&state, &action);
        let future = self.table.max_value(next_state);
        let updated = current + self.config.alpha * (reward + self.config.gamma * future - current);
        self.table.set(state, action, updated);
    }
}

impl Strategy for QLearningStrategy {
    fn choose_action(&mut self, game: &Game) -> Option<Move> {
        let legal = game.legal_moves(None);
        if legal.is_empty() {
            return None;
        }

        if self.config.epsilon > 0.0 && self.rng.random_range(0.0..1.0) < self.config.epsilon {
            let idx = self.rng.random_range(0..legal.len());
            return Some(legal[idx]);
        }

        let state = StateKey::from_game(game);
        self.table.best_action(&state, &legal)
    }

    fn name(&self) -> &str {
        "Q-learning"
    }

    fn update(&mut self, experience: &Experience) {
        self.learn(
            experience.state.clone(),
            experience.action,
            &experience.next_state,
            experience.reward,
            experience.done,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Coordinate, Direction};

    fn key(tag: &str) -> StateKey {
        StateKey {
            board: tag.to_string(),
            to_move: MarbleColor::White,
        }
    }

    fn mv(row: usize, col: usize, direction: Direction) -> Move {
        Move::new(Coordinate::new(row, col), direction)
    }

    #[test]
    fn test_unseen_pairs_read_zero() {
        let table = ValueTable::new();
        assert_eq!(table.get(&key("a"), &mv(0, 0, Direction::Right)), 0.0);
        assert_eq!(table.max_value(&key("a")), 0.0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_set_then_get() {
        let mut table = ValueTable::new();
        let state = key("a");
        let action = mv(0, 0, Direction::Right);
        table.set(state.clone(), action, 1.5);
        assert_eq!(table.get(&state, &action), 1.5);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_best_action_ties_favor_first_candidate() {
        let table = ValueTable::new();
        let candidates = [
            mv(0, 0, Direction::Right),
            mv(0, 0, Direction::Down),
            mv(1, 1, Direction::Left),
        ];
        // All unseen, all 0.0: the first listed candidate wins.
        assert_eq!(table.best_action(&key("a"), &candidates), Some(candidates[0]));
    }

    #[test]
    fn test_best_action_prefers_highest_value() {
        let mut table = ValueTable::new();
        let state = key("a");
        let candidates = [mv(0, 0, Direction::Right), mv(0, 0, Direction::Down)];
        table.set(state.clone(), candidates[1], 2.0);
        assert_eq!(table.best_action(&state, &candidates), Some(candidates[1]));
    }

    #[test]
    fn test_td_update_moves_toward_target() {
        let mut strategy = QLearningStrategy::seeded(QLearningConfig::default(), 3);
        let state = key("s");
        let next = key("t");
        let action = mv(0, 0, Direction::Right);

        strategy.learn(state.clone(), action, &next, 10.0, false);
        // Q += 0.1 * (10 + 0.9 * 0 - 0) = 1.0
        assert!((strategy.table().get(&state, &action) - 1.0).abs() < 1e-9);

        strategy.learn(state.clone(), action, &next, 10.0, false);
        // Q += 0.1 * (10 - 1.0) = 0.9 more
        assert!((strategy.table().get(&state, &action) - 1.9).abs() < 1e-9);
    }

    #[test]
    fn test_max_value_propagates_negative_maxima() {
        let mut table = ValueTable::new();
        let state = key("s");
        table.set(state.clone(), mv(0, 0, Direction::Right), -5.0);
        table.set(state.clone(), mv(0, 0, Direction::Down), -8.0);
        assert_eq!(table.max_value(&state), -5.0);
    }

    #[test]
    fn test_td_update_with_negative_future() {
        // A next state whose every recorded action is a loss must pull the
        // current value down, not bootstrap a phantom 0.
        let config = QLearningConfig {
            epsilon: 0.0,
            alpha: 1.0,
            gamma: 1.0,
        };
        let mut strategy = QLearningStrategy::seeded(config, 3);
        let state = key("s");
        let next = key("t");
        let action = mv(0, 0, Direction::Right);

        strategy
            .table
            .set(next.clone(), mv(1, 1, Direction::Up), -1000.0);
        strategy.learn(state.clone(), action, &next, 0.0, false);
        assert!((strategy.table().get(&state, &action) - (-1000.0)).abs() < 1e-9);
    }

    #[test]
    fn test_td_update_bootstraps_from_next_state() {
        let config = QLearningConfig {
            epsilon: 0.0,
            alpha: 1.0,
            gamma: 0.5,
        };
        let mut strategy = QLearningStrategy::seeded(config, 3);
        let state = key("s");
        let next = key("t");
        let action = mv(0, 0, Direction::Right);

        strategy
            .table
            .set(next.clone(), mv(1, 1, Direction::Up), 4.0);
        strategy.learn(state.clone(), action, &next, 1.0, false);
        // alpha 1.0: Q = reward + gamma * max = 1 + 0.5 * 4 = 3
        assert!((strategy.table().get(&state, &action) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_greedy_choice_follows_learned_values() {
        let config = QLearningConfig {
            epsilon: 0.0,
            ..QLearningConfig::default()
        };
        let mut strategy = QLearningStrategy::seeded(config, 3);
        let game = Game::new();
        let state = StateKey::from_game(&game);
        let legal = game.legal_moves(None);
        let preferred = legal[legal.len() - 1];
        strategy.table.set(state, preferred, 5.0);

        assert_eq!(strategy.choose_action(&game), Some(preferred));
    }

    #[test]
    fn test_exploration_returns_legal_move() {
        let config = QLearningConfig {
            epsilon: 1.0,
            ..QLearningConfig::default()
        };
        let mut strategy = QLearningStrategy::seeded(config, 11);
        let game = Game::new();
        let legal = game.legal_moves(None);
        for _ in 0..20 {
            let action = strategy.choose_action(&game).unwrap();
            assert!(legal.contains(&action));
        }
    }

    #[test]
    fn test_serde_round_trip_preserves_lookups() {
        let mut table = ValueTable::new();
        table.set(key("a"), mv(0, 0, Direction::Right), 1.25);
        table.set(key("a"), mv(2, 3, Direction::Up), -0.5);
        table.set(key("b"), mv(6, 6, Direction::Left), 7.0);

        let json = serde_json::to_string(&table).unwrap();
        let restored: ValueTable = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), 3);
        assert_eq!(restored.get(&key("a"), &mv(0, 0, Direction::Right)), 1.25);
        assert_eq!(restored.get(&key("a"), &mv(2, 3, Direction::Up)), -0.5);
        assert_eq!(restored.get(&key("b"), &mv(6, 6, Direction::Left)), 7.0);
    }

    #[test]
    fn test_serialized_output_is_stable() {
        let mut a = ValueTable::new();
        let mut b = ValueTable::new();
        // Insert in different orders; the wire form sorts entries.
        a.set(key("a"), mv(0, 0, Direction::Right), 1.0);
        a.set(key("b"), mv(1, 1, Direction::Up), 2.0);
        b.set(key("b"), mv(1, 1, Direction::Up), 2.0);
        b.set(key("a"), mv(0, 0, Direction::Right), 1.0);

        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_merge_averages_per_key() {
        let state = key("s");
        let action = mv(0, 0, Direction::Right);

        let mut first = ValueTable::new();
        first.set(state.clone(), action, 4.0);
        let mut second = ValueTable::new();
        second.set(state.clone(), action, 2.0);
        // Third table never saw the pair; it contributes 0.
        let third = ValueTable::new();

        let merged = ValueTable::merge(vec![first, second, third]);
        assert!((merged.get(&state, &action) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_merge_of_nothing_is_empty() {
        assert!(ValueTable::merge(Vec::new()).is_empty());
    }

    #[test]
    fn test_state_key_captures_side_to_move() {
        let game = Game::new();
        let white_key = StateKey::from_game(&game);
        assert_eq!(white_key.to_move, MarbleColor::White);
        assert_eq!(white_key.board.len(), 49);
    }
}
