//! Winning alignments for rectangular boards

use super::{Cell, Token};

/// Cell indices of one winning alignment
pub type Alignment = Vec<usize>;

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Enumerate every contiguous run of `length` cells on a `rows` x `cols` board.
///
/// Cells are indexed row-major (`row * cols + col`). Runs are listed by
/// direction: rows, columns, rising diagonals, falling diagonals.
pub fn alignments(rows: usize, cols: usize, length: usize) -> Vec<Alignment> {
    let mut lines = Vec::new();
    if length == 0 {
        return lines;
    }

    for (dr, dc) in DIRECTIONS {
        for row in 0..rows {
            for col in 0..cols {
                let end_row = row as isize + dr * (length as isize - 1);
                let end_col = col as isize + dc * (length as isize - 1);
                if end_row < 0
                    || end_row >= rows as isize
                    || end_col < 0
                    || end_col >= cols as isize
                {
                    continue;
                }

                let line = (0..length as isize)
                    .map(|step| {
                        let r = row as isize + dr * step;
                        let c = col as isize + dc * step;
                        r as usize * cols + c as usize
                    })
                    .collect();
                lines.push(line);
            }
        }
    }

    lines
}

/// Counts of the contents of one alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineCount {
    pub own: usize,
    pub other: usize,
    pub empty: usize,
}

impl LineCount {
    /// Tally a line from `token`'s point of view
    pub fn of(cells: &[Cell], line: &[usize], token: Token) -> Self {
        let target = token.to_cell();
        let mut count = LineCount::default();
        for &idx in line {
            match cells[idx] {
                Cell::Empty => count.empty += 1,
                c if c == target => count.own += 1,
                _ => count.other += 1,
            }
        }
        count
    }

    /// Exactly `n` of our tokens and nothing of the opponent's
    pub fn is_run(&self, n: usize) -> bool {
        self.other == 0 && self.own == n
    }
}

/// The token filling every cell of `line`, if the line is uniform
pub fn uniform_token(cells: &[Cell], line: &[usize]) -> Option<Token> {
    let first = cells[*line.first()?].token()?;
    line.iter()
        .all(|&idx| cells[idx] == first.to_cell())
        .then_some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tic_tac_toe_has_eight_lines() {
        let lines = alignments(3, 3, 3);
        assert_eq!(lines.len(), 8);
        assert!(lines.contains(&vec![0, 1, 2]));
        assert!(lines.contains(&vec![0, 3, 6]));
        assert!(lines.contains(&vec![0, 4, 8]));
        assert!(lines.contains(&vec![2, 4, 6]));
    }

    #[test]
    fn test_connect_four_has_69_lines() {
        let lines = alignments(6, 7, 4);
        // 24 horizontal + 21 vertical + 12 + 12 diagonal
        assert_eq!(lines.len(), 69);
        assert!(lines.iter().all(|line| line.len() == 4));
    }

    #[test]
    fn test_line_count() {
        let mut cells = vec![Cell::Empty; 9];
        cells[0] = Cell::X;
        cells[1] = Cell::X;
        cells[2] = Cell::O;
        let count = LineCount::of(&cells, &[0, 1, 2], Token::X);
        assert_eq!(
            count,
            LineCount {
                own: 2,
                other: 1,
                empty: 0
            }
        );
        assert!(!count.is_run(2));
    }

    #[test]
    fn test_uniform_token() {
        let mut cells = vec![Cell::Empty; 9];
        assert_eq!(uniform_token(&cells, &[0, 4, 8]), None);
        cells[0] = Cell::O;
        cells[4] = Cell::O;
        cells[8] = Cell::O;
        assert_eq!(uniform_token(&cells, &[0, 4, 8]), Some(Token::O));
    }
}
