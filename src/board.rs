//! Board capability contract and the two concrete games
//!
//! Search, training and session code are generic over [`Board`]; they never
//! branch on which game is being played.

pub mod cell;
pub mod drop;
pub mod grid;
pub mod lines;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use cell::{Cell, GameOutcome, Seat, Token};
pub use drop::DropBoard;
pub use grid::GridBoard;
pub use lines::{Alignment, LineCount, alignments};

use crate::{Error, Result};

/// Weight of an alignment one token short of a win
pub const NEAR_WIN_WEIGHT: i32 = 100;
/// Weight of an alignment two tokens short of a win
pub const OPEN_RUN_WEIGHT: i32 = 10;

/// Capabilities every game must provide.
///
/// Moves are opaque `usize` handles: a cell index for the grid game and a
/// column index for the drop game. Cells are indexed row-major with row 0 at
/// the bottom.
pub trait Board: Clone + fmt::Debug {
    /// Short name used in table keys and messages
    fn game_name(&self) -> &'static str;

    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Number of equal tokens in a row required to win
    fn win_length(&self) -> usize;

    fn cells(&self) -> &[Cell];

    /// Every winning alignment of the board
    fn alignments(&self) -> &[Alignment];

    /// Mark the target of `mv` with `token`.
    ///
    /// # Panics
    ///
    /// Panics if `mv` is not currently legal.
    fn place(&mut self, mv: usize, token: Token);

    /// Undo a hypothetical placement made by [`Board::place`].
    ///
    /// # Panics
    ///
    /// Panics if the target of `mv` holds no token.
    fn remove(&mut self, mv: usize);

    /// Legal moves in ascending order; empty when the board is full
    fn remaining_moves(&self) -> Vec<usize>;

    /// Legal moves of the position described by `encoding`
    fn moves_from_encoding(&self, encoding: &str) -> Vec<usize>;

    /// Clear every cell
    fn reset(&mut self);

    /// Human-readable layout of the position
    fn render(&self) -> String;

    fn cell(&self, index: usize) -> Cell {
        self.cells()[index]
    }

    fn size_label(&self) -> String {
        format!("{}x{}", self.rows(), self.cols())
    }

    fn occupied_count(&self) -> usize {
        self.cells().iter().filter(|&&c| c != Cell::Empty).count()
    }

    fn is_legal(&self, mv: usize) -> bool {
        self.remaining_moves().contains(&mv)
    }

    /// With a token: does some alignment hold only that token.
    /// Without: does some alignment hold only one non-empty token.
    fn check_win(&self, token: Option<Token>) -> bool {
        let cells = self.cells();
        match token {
            Some(token) => {
                let target = token.to_cell();
                self.alignments()
                    .iter()
                    .any(|line| line.iter().all(|&idx| cells[idx] == target))
            }
            None => self
                .alignments()
                .iter()
                .any(|line| lines::uniform_token(cells, line).is_some()),
        }
    }

    fn winner(&self) -> Option<Token> {
        let cells = self.cells();
        self.alignments()
            .iter()
            .find_map(|line| lines::uniform_token(cells, line))
    }

    fn is_terminal(&self) -> bool {
        self.check_win(None) || self.remaining_moves().is_empty()
    }

    /// Outcome of the position, `None` while the game is still running
    fn outcome(&self) -> Option<GameOutcome> {
        if let Some(winner) = self.winner() {
            Some(GameOutcome::Win(winner))
        } else if self.remaining_moves().is_empty() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Canonical encoding: one character per cell in index order
    fn encode_state(&self) -> String {
        self.cells().iter().map(|c| c.to_char()).collect()
    }

    /// Number of alignments holding exactly `n` of `token` and blanks otherwise
    fn count_runs(&self, token: Token, n: usize) -> usize {
        let cells = self.cells();
        self.alignments()
            .iter()
            .filter(|line| LineCount::of(cells, line, token).is_run(n))
            .count()
    }

    /// Static evaluation for positions cut off before they are terminal
    fn evaluate_heuristic(&self, side: Token, opponent: Token) -> i32 {
        let length = self.win_length();
        let mut score = 0;
        for (short_by, weight) in [(1, NEAR_WIN_WEIGHT), (2, OPEN_RUN_WEIGHT)] {
            if length <= short_by {
                continue;
            }
            let n = length - short_by;
            score += weight * self.count_runs(side, n) as i32;
            score -= weight * self.count_runs(opponent, n) as i32;
        }
        score
    }

    /// Label shown to humans for a move (1-based)
    fn move_label(&self, mv: usize) -> String {
        (mv + 1).to_string()
    }

    /// Parse a 1-based human move; legality is checked separately
    fn parse_move(&self, input: &str) -> Option<usize> {
        input
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&n| n >= 1)
            .map(|n| n - 1)
    }
}

/// Which game to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    TicTacToe,
    ConnectFour,
}

/// Board dimensions for a [`GameKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    pub rows: usize,
    pub cols: usize,
    pub win_length: usize,
}

impl GameKind {
    pub fn default_size(self) -> BoardSize {
        match self {
            GameKind::TicTacToe => BoardSize {
                rows: 3,
                cols: 3,
                win_length: 3,
            },
            GameKind::ConnectFour => BoardSize {
                rows: 6,
                cols: 7,
                win_length: 4,
            },
        }
    }
}

/// Validate dimensions shared by both board types
pub(crate) fn check_size(rows: usize, cols: usize, win_length: usize) -> Result<()> {
    if rows == 0 || cols == 0 || win_length < 2 || (win_length > rows && win_length > cols) {
        return Err(Error::InvalidBoardSize {
            rows,
            cols,
            win_length,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_size_rejects_unwinnable_boards() {
        assert!(check_size(3, 3, 3).is_ok());
        assert!(check_size(6, 7, 4).is_ok());
        assert!(check_size(2, 2, 3).is_err());
        assert!(check_size(3, 3, 1).is_err());
        assert!(check_size(0, 3, 2).is_err());
    }

    #[test]
    fn test_heuristic_is_antisymmetric() {
        let mut board = GridBoard::tic_tac_toe();
        board.place(4, Token::X);
        board.place(0, Token::O);
        board.place(1, Token::X);
        let x_view = board.evaluate_heuristic(Token::X, Token::O);
        let o_view = board.evaluate_heuristic(Token::O, Token::X);
        assert_eq!(x_view, -o_view);
        assert!(x_view > 0);
    }
}
