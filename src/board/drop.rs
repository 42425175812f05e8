//! Column-drop game (connect four and its R x C generalisations)

use std::fmt::Write;

use super::{Alignment, Board, Cell, Token, alignments, check_size};
use crate::Result;

/// Bonus per token in the centre column(s)
const CENTER_WEIGHT: i32 = 3;

/// A board where a move names a column and the token falls to the lowest
/// empty row. Row 0 is the bottom row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropBoard {
    rows: usize,
    cols: usize,
    win_length: usize,
    cells: Vec<Cell>,
    /// Number of tokens in each column
    heights: Vec<usize>,
    lines: Vec<Alignment>,
}

impl DropBoard {
    pub fn new(rows: usize, cols: usize, win_length: usize) -> Result<Self> {
        check_size(rows, cols, win_length)?;
        Ok(Self {
            rows,
            cols,
            win_length,
            cells: vec![Cell::Empty; rows * cols],
            heights: vec![0; cols],
            lines: alignments(rows, cols, win_length),
        })
    }

    /// The classic 6 x 7 board with four in a row
    pub fn connect_four() -> Self {
        Self {
            rows: 6,
            cols: 7,
            win_length: 4,
            cells: vec![Cell::Empty; 42],
            heights: vec![0; 7],
            lines: alignments(6, 7, 4),
        }
    }

    /// Number of tokens already dropped into `col`
    pub fn height(&self, col: usize) -> usize {
        self.heights[col]
    }

    pub fn is_column_full(&self, col: usize) -> bool {
        self.heights.get(col).is_none_or(|&h| h >= self.rows)
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl Board for DropBoard {
    fn game_name(&self) -> &'static str {
        "connect4"
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
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
        assert!(!self.is_column_full(mv), "place into unavailable column {mv}");
        let idx = self.index(self.heights[mv], mv);
        self.cells[idx] = token.to_cell();
        self.heights[mv] += 1;
    }

    fn remove(&mut self, mv: usize) {
        assert!(
            self.heights.get(mv).is_some_and(|&h| h > 0),
            "remove from empty column {mv}"
        );
        self.heights[mv] -= 1;
        let idx = self.index(self.heights[mv], mv);
        self.cells[idx] = Cell::Empty;
    }

    fn remaining_moves(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| self.heights[col] < self.rows)
            .collect()
    }

    fn moves_from_encoding(&self, encoding: &str) -> Vec<usize> {
        // A column is open while its top cell is empty
        let chars: Vec<char> = encoding.chars().collect();
        let top = (self.rows - 1) * self.cols;
        (0..self.cols)
            .filter(|&col| {
                chars
                    .get(top + col)
                    .is_some_and(|&c| Cell::from_char(c) == Some(Cell::Empty))
            })
            .collect()
    }

    fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.heights.fill(0);
    }

    fn is_legal(&self, mv: usize) -> bool {
        !self.is_column_full(mv)
    }

    fn evaluate_heuristic(&self, side: Token, opponent: Token) -> i32 {
        let mut score = 0;
        for (short_by, weight) in [(1, super::NEAR_WIN_WEIGHT), (2, super::OPEN_RUN_WEIGHT)] {
            if self.win_length <= short_by {
                continue;
            }
            let n = self.win_length - short_by;
            score += weight * self.count_runs(side, n) as i32;
            score -= weight * self.count_runs(opponent, n) as i32;
        }

        let centers = if self.cols.is_multiple_of(2) {
            vec![self.cols / 2 - 1, self.cols / 2]
        } else {
            vec![self.cols / 2]
        };
        for col in centers {
            for row in 0..self.heights[col] {
                match self.cells[self.index(row, col)].token() {
                    Some(token) if token == side => score += CENTER_WEIGHT,
                    Some(token) if token == opponent => score -= CENTER_WEIGHT,
                    _ => {}
                }
            }
        }
        score
    }

    fn render(&self) -> String {
        let mut out = String::new();
        for row in (0..self.rows).rev() {
            let line: String = (0..self.cols)
                .map(|col| format!("| {} ", self.cells[self.index(row, col)].to_char()))
                .collect();
            let _ = writeln!(out, "{line}|");
        }
        let _ = writeln!(out, "+{}", "---+".repeat(self.cols));
        let footer: String = (0..self.cols)
            .map(|col| {
                if self.is_column_full(col) {
                    "    ".to_string()
                } else {
                    format!("{:^4}", self.move_label(col))
                }
            })
            .collect();
        let _ = writeln!(out, "{}", footer.trim_end());
        out
    }
}
