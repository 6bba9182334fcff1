use crate::game::{Coordinate, Game, MarbleColor, BOARD_SIZE};

/// Static heuristic score of a position from `perspective`'s viewpoint.
/// Pure and total: defined for every reachable state, terminal ones included.
///
/// Linear combination of capture lead, opponent attrition, marble advantage,
/// board control, and distance to the 7-capture victory threshold.
pub fn score(game: &Game, perspective: MarbleColor) -> i64 {
    let own = game.player(perspective);
    let opp = game.player(perspective.opponent());
    let counts = game.marble_counts();

    let mut score = 0i64;
    score += 10 * (own.captured_red as i64 - opp.captured_red as i64);
    score += 5 * (8 - counts.of(opp.color) as i64);
    score += 2 * (counts.of(own.color) as i64 - counts.of(opp.color) as i64);
    score += control(game, perspective);
    score += distance_to_victory(own.captured_red);
    score
}

/// Board control: corners are worth 3, other edge cells 2, the central 3×3
/// region 1, anything else 0.
fn control(game: &Game, color: MarbleColor) -> i64 {
    game.board()
        .all_marbles(Some(color))
        .into_iter()
        .map(cell_weight)
        .sum()
}

fn cell_weight(coord: Coordinate) -> i64 {
    let edge_row = coord.row == 0 || coord.row == BOARD_SIZE - 1;
    let edge_col = coord.col == 0 || coord.col == BOARD_SIZE - 1;
    if edge_row && edge_col {
        3
    } else if edge_row || edge_col {
        2
    } else if (2..=4).contains(&coord.row) && (2..=4).contains(&coord.col) {
        1
    } else {
        0
    }
}

/// Linear bonus that grows as `captured_red` approaches the 7-capture win.
fn distance_to_victory(captured_red: u32) -> i64 {
    let marbles_to_win = 7 - captured_red.min(7) as i64;
    (8 - marbles_to_win) * 5
}
