//! Cells, tokens, seats and outcomes shared by every board

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single cell of a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Character used for this cell in state encodings
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The token occupying this cell, if any
    pub fn token(self) -> Option<Token> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Token::X),
            Cell::O => Some(Token::O),
        }
    }
}

/// One of the two side markers
///
/// `X` always opens a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    X,
    O,
}

impl Token {
    /// The token that makes the first move of every game
    pub const FIRST: Token = Token::X;

    /// Get the opposing token
    pub fn opponent(self) -> Token {
        match self {
            Token::X => Token::O,
            Token::O => Token::X,
        }
    }

    /// Convert token to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Token::X => Cell::X,
            Token::O => Cell::O,
        }
    }

    pub fn symbol(self) -> char {
        self.to_cell().to_char()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Whether an agent moves first or second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub const ALL: [Seat; 2] = [Seat::First, Seat::Second];

    /// Token held by whoever sits in this seat
    pub fn token(self) -> Token {
        match self {
            Seat::First => Token::FIRST,
            Seat::Second => Token::FIRST.opponent(),
        }
    }

    pub fn of(token: Token) -> Seat {
        if token == Token::FIRST {
            Seat::First
        } else {
            Seat::Second
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Seat::First => "first",
            Seat::Second => "second",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Token),
    Draw,
}

impl GameOutcome {
    /// Swap the winner perspective (X <-> O)
    pub fn swap_tokens(self) -> Self {
        match self {
            GameOutcome::Win(token) => GameOutcome::Win(token.opponent()),
            GameOutcome::Draw => GameOutcome::Draw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_tokens() {
        assert_eq!(Seat::First.token(), Token::X);
        assert_eq!(Seat::Second.token(), Token::O);
        assert_eq!(Seat::of(Token::O), Seat::Second);
    }

    #[test]
    fn test_cell_roundtrip_chars() {
        for cell in [Cell::Empty, Cell::X, Cell::O] {
            assert_eq!(Cell::from_char(cell.to_char()), Some(cell));
        }
        assert_eq!(Cell::from_char('?'), None);
    }
}
