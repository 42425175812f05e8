//! Arguments shared by every command: which game, its size, and where
//! learned tables live

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::{
    Error, Result,
    adapters::MsgPackStore,
    board::{BoardSize, DropBoard, GameKind, GridBoard, Seat},
};

/// Game selector on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameArg {
    /// Square grid, any free cell (3x3 tic-tac-toe by default)
    #[value(alias = "ttt")]
    Tictactoe,
    /// Tokens drop to the lowest free row (6x7 connect four by default)
    #[value(alias = "c4")]
    Connect4,
}

impl From<GameArg> for GameKind {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::Tictactoe => GameKind::TicTacToe,
            GameArg::Connect4 => GameKind::ConnectFour,
        }
    }
}

/// Seat selector for training and evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeatArg {
    First,
    Second,
    Both,
}

impl SeatArg {
    pub fn seats(self) -> &'static [Seat] {
        match self {
            SeatArg::First => &[Seat::First],
            SeatArg::Second => &[Seat::Second],
            SeatArg::Both => &Seat::ALL,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// Game to play
    #[arg(long, value_enum, default_value_t = GameArg::Tictactoe)]
    pub game: GameArg,

    /// Number of rows (defaults to the game's classic size)
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of columns (defaults to the game's classic size)
    #[arg(long)]
    pub cols: Option<usize>,

    /// Tokens in a row needed to win
    #[arg(long)]
    pub win_length: Option<usize>,

    /// Directory holding learned tables
    #[arg(long, default_value = "tables")]
    pub tables: PathBuf,
}

impl GameArgs {
    pub fn kind(&self) -> GameKind {
        self.game.into()
    }

    /// Classic size of the game with any command line overrides applied
    pub fn size(&self) -> BoardSize {
        let default = self.kind().default_size();
        BoardSize {
            rows: self.rows.unwrap_or(default.rows),
            cols: self.cols.unwrap_or(default.cols),
            win_length: self.win_length.unwrap_or(default.win_length),
        }
    }

    pub fn grid_board(&self) -> Result<GridBoard> {
        let size = self.size();
        if size.rows != size.cols {
            return Err(Error::InvalidBoardSize {
                rows: size.rows,
                cols: size.cols,
                win_length: size.win_length,
            });
        }
        GridBoard::new(size.rows, size.win_length)
    }

    pub fn drop_board(&self) -> Result<DropBoard> {
        let size = self.size();
        DropBoard::new(size.rows, size.cols, size.win_length)
    }

    pub fn store(&self) -> MsgPackStore {
        MsgPackStore::new(&self.tables)
    }

    /// Search depth used when none is given: exhaustive for the grid game,
    /// shallow for the much larger drop game
    pub fn default_search_depth(&self) -> Option<usize> {
        match self.kind() {
            GameKind::TicTacToe => None,
            GameKind::ConnectFour => Some(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        game: GameArgs,
    }

    #[test]
    fn test_defaults_follow_game() {
        let args = Harness::parse_from(["test", "--game", "connect4"]).game;
        assert_eq!(
            args.size(),
            BoardSize {
                rows: 6,
                cols: 7,
                win_length: 4
            }
        );
        assert_eq!(args.default_search_depth(), Some(5));
    }

    #[test]
    fn test_overrides_and_square_check() {
        let args = Harness::parse_from(["test", "--rows", "4", "--cols", "4"]).game;
        let board = args.grid_board().unwrap();
        assert_eq!(board.size(), 4);

        let args = Harness::parse_from(["test", "--rows", "3", "--cols", "4"]).game;
        assert!(args.grid_board().is_err());
    }
}
