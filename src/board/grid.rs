//! Square grid game (tic-tac-toe and its N x N generalisations)

use std::fmt::Write;

use super::{Alignment, Board, Cell, Token, alignments, check_size};
use crate::{Error, Result};

/// An N x N grid where a move is a direct cell index.
///
/// Cell 0 is the bottom-left corner, matching a numeric keypad for the
/// 3 x 3 game (key 1 is cell 0, key 9 is cell 8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBoard {
    size: usize,
    win_length: usize,
    cells: Vec<Cell>,
    lines: Vec<Alignment>,
}

impl GridBoard {
    /// Create an empty `size` x `size` grid
    pub fn new(size: usize, win_length: usize) -> Result<Self> {
        check_size(size, size, win_length)?;
        Ok(Self {
            size,
            win_length,
            cells: vec![Cell::Empty; size * size],
            lines: alignments(size, size, win_length),
        })
    }

    /// The classic 3 x 3 board
    pub fn tic_tac_toe() -> Self {
        Self {
            size: 3,
            win_length: 3,
            cells: vec![Cell::Empty; 9],
            lines: alignments(3, 3, 3),
        }
    }

    /// Build a grid from a state encoding such as `"XX.OO...."`.
    ///
    /// The side length is the square root of the encoding length.
    pub fn parse(encoding: &str, win_length: usize) -> Result<Self> {
        let chars: Vec<char> = encoding.chars().collect();
        let size = (chars.len() as f64).sqrt().round() as usize;
        if size * size != chars.len() {
            return Err(Error::InvalidBoardSize {
                rows: size,
                cols: size,
                win_length,
            });
        }

        let mut board = Self::new(size, win_length)?;
        for (idx, c) in chars.into_iter().enumerate() {
            board.cells[idx] = Cell::from_char(c).ok_or_else(|| Error::IllegalMove {
                position: idx,
                reason: format!("invalid cell character '{c}' in '{encoding}'"),
            })?;
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Board for GridBoard {
    fn game_name(&self) -> &'static str {
        "tictactoe"
    }

    fn rows(&self) -> usize {
        self.size
    }

    fn cols(&self) -> usize {
        self.size
    }

    fn win_length(&self) -> usize {
        self.win_length
    }

    fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn alignments(&self) -> &[Alignment] {
        &self.lines
    }

    fn place(&mut self, mv: usize, token: Token) {
        assert!(
            self.cells.get(mv) == Some(&Cell::Empty),
            "place on unavailable cell {mv}"
        );
        self.cells[mv] = token.to_cell();
    }

    fn remove(&mut self, mv: usize) {
        assert!(
            matches!(self.cells.get(mv), Some(Cell::X | Cell::O)),
            "remove from empty cell {mv}"
        );
        self.cells[mv] = Cell::Empty;
    }

    fn remaining_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(idx, _)| idx)
            .collect()
    }

    fn moves_from_encoding(&self, encoding: &str) -> Vec<usize> {
        encoding
            .chars()
            .enumerate()
            .filter(|&(_, c)| Cell::from_char(c) == Some(Cell::Empty))
            .map(|(idx, _)| idx)
            .collect()
    }

    fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    fn is_legal(&self, mv: usize) -> bool {
        self.cells.get(mv) == Some(&Cell::Empty)
    }

    fn render(&self) -> String {
        let width = (self.size * self.size).to_string().len();
        let separator = vec!["-".repeat(width + 2); self.size].join("+");
        let mut out = String::new();
        for row in (0..self.size).rev() {
            let line: Vec<String> = (0..self.size)
                .map(|col| {
                    let idx = row * self.size + col;
                    match self.cells[idx].token() {
                        Some(token) => format!(" {:>width$} ", token.symbol()),
                        None => format!(" {:>width$} ", self.move_label(idx)),
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", line.join("|"));
            if row > 0 {
                let _ = writeln!(out, "{separator}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = GridBoard::tic_tac_toe();
        assert_eq!(board.remaining_moves(), (0..9).collect::<Vec<_>>());
        assert_eq!(board.encode_state(), ".........");
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = GridBoard::tic_tac_toe();
        board.place(4, Token::X);
        assert!(!board.remaining_moves().contains(&4));
        assert_eq!(board.encode_state(), "....X....");
        board.remove(4);
        assert_eq!(board.encode_state(), ".........");
    }

    #[test]
    #[should_panic(expected = "place on unavailable cell")]
    fn test_place_on_occupied_cell_panics() {
        let mut board = GridBoard::tic_tac_toe();
        board.place(0, Token::X);
        board.place(0, Token::O);
    }

    #[test]
    fn test_parse_and_winner() {
        let board = GridBoard::parse("XXXOO....", 3).unwrap();
        assert_eq!(board.winner(), Some(Token::X));
        assert!(board.check_win(Some(Token::X)));
        assert!(!board.check_win(Some(Token::O)));
        assert!(board.check_win(None));
    }

    #[test]
    fn test_moves_from_encoding_matches_board() {
        let board = GridBoard::parse("X.O.X.O..", 3).unwrap();
        assert_eq!(
            board.moves_from_encoding(&board.encode_state()),
            board.remaining_moves()
        );
    }

    #[test]
    fn test_larger_grid() {
        let mut board = GridBoard::new(4, 3).unwrap();
        assert_eq!(board.remaining_moves().len(), 16);
        board.place(0, Token::O);
        board.place(5, Token::O);
        board.place(10, Token::O);
        assert_eq!(board.winner(), Some(Token::O));
    }

    #[test]
    fn test_render_shows_keys_for_empty_cells() {
        let mut board = GridBoard::tic_tac_toe();
        board.place(6, Token::X);
        let text = board.render();
        let first_line = text.lines().next().unwrap();
        assert!(first_line.contains('X'));
        assert!(first_line.contains('8'));
        assert!(text.lines().last().unwrap().contains('1'));
    }
}
