use crate::ai::{evaluate, RandomStrategy, Strategy};
use crate::game::{Game, MarbleColor};

/// How a played-out game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Win(MarbleColor),
    /// The move cap was hit before anyone won.
    Draw,
}

/// Play one game between two strategies, White moving first. Stops at
/// `max_moves` total moves and calls it a draw.
pub fn play_game(
    white: &mut dyn Strategy,
    black: &mut dyn Strategy,
    max_moves: u32,
) -> GameOutcome {
    let mut game = Game::new();

    for _ in 0..max_moves {
        if game.is_over() {
            break;
        }
        let mover = game.current_player().color;
        let strategy: &mut dyn Strategy = match mover {
            MarbleColor::White => white,
            _ => black,
        };
        let Some(action) = strategy.choose_action(&game) else {
            break;
        };
        game.attempt_move(action.coord, action.direction)
            .expect("chosen move must be legal");
    }

    match game.winner() {
        Some(player) => GameOutcome::Win(player.color),
        None => GameOutcome::Draw,
    }
}

/// Reward for the marble just pushed by `mover`, judged on the resulting
/// position. The heuristic score shapes intermediate steps; losing the game
/// on the spot dominates everything else.
pub fn shaped_reward(game: &Game, mover: MarbleColor) -> f64 {
    if let Some(winner) = game.winner() {
        if winner.color != mover {
            return -1000.0;
        }
    }
    evaluate::score(game, mover) as f64
}

/// Win rate of `strategy` over `games` games against a random baseline,
/// alternating colors so neither side-to-move advantage skews the measure.
pub fn evaluate_vs_random(strategy: &mut dyn Strategy, games: u32, max_moves: u32) -> f64 {
    if games == 0 {
        return 0.0;
    }

    let mut wins = 0u32;
    for i in 0..games {
        let mut baseline = RandomStrategy::seeded(u64::from(i));
        let color = if i % 2 == 0 {
            MarbleColor::White
        } else {
            MarbleColor::Black
        };
        let outcome = match color {
            MarbleColor::White => play_game(strategy, &mut baseline, max_moves),
            _ => play_game(&mut baseline, strategy, max_moves),
        };
        if outcome == GameOutcome::Win(color) {
            wins += 1;
        }
    }
    f64::from(wins) / f64::from(games)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_game_reaches_outcome() {
        let mut white = RandomStrategy::seeded(1);
        let mut black = RandomStrategy::seeded(2);
        // Any outcome is fine; the driver must terminate.
        let _ = play_game(&mut white, &mut black, 200);
    }

    #[test]
    fn test_move_cap_forces_draw() {
        let mut white = RandomStrategy::seeded(1);
        let mut black = RandomStrategy::seeded(2);
        assert_eq!(play_game(&mut white, &mut black, 1), GameOutcome::Draw);
    }

    #[test]
    fn test_shaped_reward_penalizes_losing() {
        use crate::game::{Board, Coordinate, Direction};

        // White wins by eliminating Black's last marble; the position is a
        // disaster for Black.
        let mut board = Board::empty();
        board.set(Coordinate::new(3, 5), Some(MarbleColor::White));
        board.set(Coordinate::new(3, 6), Some(MarbleColor::Black));
        let mut game = Game::with_board(board);
        game.attempt_move(Coordinate::new(3, 5), Direction::Right)
            .unwrap();
        assert_eq!(
            game.winner().map(|p| p.color),
            Some(MarbleColor::White)
        );

        assert_eq!(shaped_reward(&game, MarbleColor::Black), -1000.0);
        assert!(shaped_reward(&game, MarbleColor::White) > -1000.0);
    }

    #[test]
    fn test_shaped_reward_tracks_heuristic_midgame() {
        let game = Game::new();
        let expected = evaluate::score(&game, MarbleColor::White) as f64;
        assert_eq!(shaped_reward(&game, MarbleColor::White), expected);
    }

    #[test]
    fn test_evaluate_vs_random_is_a_rate() {
        let mut strategy = RandomStrategy::seeded(5);
        let rate = evaluate_vs_random(&mut strategy, 4, 60);
        assert!((0.0..=1.0).contains(&rate));
    }

    #[test]
    fn test_evaluate_zero_games() {
        let mut strategy = RandomStrategy::seeded(5);
        assert_eq!(evaluate_vs_random(&mut strategy, 0, 60), 0.0);
    }
}
