use super::board::Board;
use super::player::{Player, PreviousMove};
use super::types::{Coordinate, Direction, MarbleColor, Move};

/// Why a push was rejected. Validation is side-effect-free: on any of these
/// the game state is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMove {
    #[error("can't move after the game is over")]
    GameOver,

    #[error("can't move an empty cell")]
    EmptyCell,

    #[error("can't push: the cell behind the marble is occupied")]
    Blocked,

    #[error("can't initiate a push with a marble you don't own")]
    WrongColor,

    #[error("can't push your own marble off the board")]
    SelfElimination,

    #[error("this move violates the KO rule")]
    KoViolation,
}

/// Marble counts per color, as shown to a rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarbleCounts {
    pub white: usize,
    pub black: usize,
    pub red: usize,
}

impl MarbleCounts {
    pub fn of(&self, color: MarbleColor) -> usize {
        match color {
            MarbleColor::White => self.white,
            MarbleColor::Black => self.black,
            MarbleColor::Red => self.red,
        }
    }
}

/// A full Kuba game: board, players, turn, and winner state. The only
/// mutation path is [`Game::attempt_move`]; search strategies operate on
/// deep copies via `Clone` and never touch the live game.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    players: [Player; 2],
    board: Board,
    current_player_index: usize,
    winner: Option<usize>,
    moves: u32,
    selected: Option<Coordinate>,
    last_alert: Option<String>,
}

impl Game {
    /// A fresh game in the standard starting layout. White moves first.
    pub fn new() -> Self {
        Self::with_board(Board::standard())
    }

    /// A game starting from an arbitrary position. White moves first.
    pub fn with_board(board: Board) -> Self {
        Game {
            players: [
                Player::new("You", MarbleColor::White),
                Player::new("Bot", MarbleColor::Black),
            ],
            board,
            current_player_index: 0,
            winner: None,
            moves: 0,
            selected: None,
            last_alert: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    pub fn opponent(&self) -> &Player {
        &self.players[(self.current_player_index + 1) % 2]
    }

    pub fn player(&self, color: MarbleColor) -> &Player {
        if self.players[0].color == color {
            &self.players[0]
        } else {
            &self.players[1]
        }
    }

    pub(crate) fn player_mut(&mut self, color: MarbleColor) -> &mut Player {
        if self.players[0].color == color {
            &mut self.players[0]
        } else {
            &mut self.players[1]
        }
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.map(|i| &self.players[i])
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Human-readable message from the last rejection or win announcement.
    pub fn alert(&self) -> Option<&str> {
        self.last_alert.as_deref()
    }

    pub fn selected(&self) -> Option<Coordinate> {
        self.selected
    }

    pub fn marble_counts(&self) -> MarbleCounts {
        MarbleCounts {
            white: self.board.count(MarbleColor::White),
            black: self.board.count(MarbleColor::Black),
            red: self.board.count(MarbleColor::Red),
        }
    }

    /// Side-effect-free probe: would this push be legal right now?
    pub fn check_move(&self, coord: Coordinate, direction: Direction) -> bool {
        self.validate(coord, direction).is_ok()
    }

    /// Validate and apply a push for the current player. On rejection the
    /// game is unchanged and the reason is also available via [`Game::alert`].
    /// On success the push is applied, captures credited, and the winner /
    /// turn state advanced.
    pub fn attempt_move(
        &mut self,
        coord: Coordinate,
        direction: Direction,
    ) -> Result<(), IllegalMove> {
        let affected = match self.validate(coord, direction) {
            Ok(run) => run,
            Err(reason) => {
                self.last_alert = Some(reason.to_string());
                return Err(reason);
            }
        };

        self.last_alert = None;
        self.moves += 1;

        // Shift far-end-first so each vacated cell is filled before it is
        // overwritten; marbles stepping past the edge leave the board.
        let mut captured_red = 0u32;
        for &old in affected.iter().rev() {
            let marble = self.board.get(old);
            match old.offset(direction) {
                Some(new) => self.board.set(new, marble),
                None => {
                    if marble == Some(MarbleColor::Red) {
                        captured_red += 1;
                    }
                }
            }
            self.board.set(old, None);
        }

        let mover = self.current_player_index;
        self.players[mover].captured_red += captured_red;
        self.players[mover].previous_move = Some(PreviousMove {
            coord,
            direction,
            affected,
        });

        // Win checks, in order: capture threshold, then elimination.
        let opponent_color = self.players[mover].color.opponent();
        if self.players[mover].captured_red >= 7 {
            self.winner = Some(mover);
            self.last_alert = Some(format!(
                "{} wins by capturing 7 red marbles!",
                self.players[mover].name
            ));
        } else if self.board.count(opponent_color) == 0 {
            self.winner = Some(mover);
            self.last_alert = Some(format!(
                "{} wins by eliminating all opponent's marbles!",
                self.players[mover].name
            ));
        }

        if self.winner.is_none() {
            self.current_player_index = (mover + 1) % 2;
            // A player left without a single legal move loses immediately.
            if self.legal_moves(None).is_empty() {
                self.winner = Some(mover);
                self.last_alert = Some(format!(
                    "{} wins since opponent has no moves",
                    self.players[mover].name
                ));
            }
        }

        Ok(())
    }

    /// Every legal push for the current player, or for a single coordinate
    /// when given. Order is stable: row-major marbles × Left, Right, Up, Down.
    pub fn legal_moves(&self, coord: Option<Coordinate>) -> Vec<Move> {
        let coords = match coord {
            Some(c) => vec![c],
            None => self.board.all_marbles(Some(self.current_player().color)),
        };
        let mut moves = Vec::new();
        for c in coords {
            for direction in Direction::ALL {
                if self.check_move(c, direction) {
                    moves.push(Move::new(c, direction));
                }
            }
        }
        moves
    }

    /// UI affordance: clicking a destination cell of the current selection
    /// plays that push; clicking an own marble (re)selects it.
    pub fn select(&mut self, coord: Coordinate) {
        if let Some(selected) = self.selected {
            for mv in self.legal_moves(Some(selected)) {
                if selected.offset(mv.direction) == Some(coord) {
                    let _ = self.attempt_move(selected, mv.direction);
                    self.selected = None;
                    return;
                }
            }
        }

        if self.board.get(coord) == Some(self.current_player().color) {
            self.selected = Some(coord);
        } else {
            self.selected = None;
        }
    }

    /// The full validation sequence. Returns the affected run on success.
    fn validate(
        &self,
        coord: Coordinate,
        direction: Direction,
    ) -> Result<Vec<Coordinate>, IllegalMove> {
        if self.winner.is_some() {
            return Err(IllegalMove::GameOver);
        }

        if self.board.get(coord).is_none() {
            return Err(IllegalMove::EmptyCell);
        }

        // Push clearance: the cell behind the initiating marble must be
        // empty or off the board.
        if let Some(behind) = coord.offset(direction.opposite()) {
            if self.board.get(behind).is_some() {
                return Err(IllegalMove::Blocked);
            }
        }

        let affected = self.board.trace_line(coord, direction);
        let Some(&last) = affected.last() else {
            return Err(IllegalMove::EmptyCell);
        };

        let mover = self.current_player().color;
        if self.board.get(affected[0]) != Some(mover) {
            return Err(IllegalMove::WrongColor);
        }

        // A player may never push their own marble off the edge.
        if last.offset(direction).is_none() && self.board.get(last) == Some(mover) {
            return Err(IllegalMove::SelfElimination);
        }

        if self.violates_ko(coord, direction, &affected) {
            return Err(IllegalMove::KoViolation);
        }

        Ok(affected)
    }

    /// KO rule: a push that exactly reverses the opponent's immediately
    /// preceding push along the same line is forbidden.
    fn violates_ko(
        &self,
        coord: Coordinate,
        direction: Direction,
        affected: &[Coordinate],
    ) -> bool {
        let Some(prev) = &self.opponent().previous_move else {
            return false;
        };

        if !affected.iter().any(|c| prev.affected.contains(c)) {
            return false;
        }

        direction == prev.direction.opposite()
            && (coord.row == prev.coord.row || coord.col == prev.coord.col)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
