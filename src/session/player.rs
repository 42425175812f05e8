//! Player kinds and the runtime agents behind them

use std::{fmt, str::FromStr, sync::Arc};

use rand::{SeedableRng, rngs::StdRng};
use tracing::trace;

use crate::{
    Error, Result,
    adapters::StdinInput,
    board::{Board, Token},
    ports::{MoveInput, TableStore},
    q_learning::SeatTables,
    search::{SearchConfig, Searcher},
    strategy::{heuristic_move, random_move},
};

/// Every kind of player a session can seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Human,
    Heuristic,
    Random,
    Minimax,
    MinimaxPruned,
    QLearned,
}

impl PlayerKind {
    pub const NAMES: &'static str = "human, heuristic, random, minimax, minimax-pruned, qlearn";

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerKind::Human => "human",
            PlayerKind::Heuristic => "heuristic",
            PlayerKind::Random => "random",
            PlayerKind::Minimax => "minimax",
            PlayerKind::MinimaxPruned => "minimax-pruned",
            PlayerKind::QLearned => "qlearn",
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "heuristic" | "algo" | "algorithm" => Ok(PlayerKind::Heuristic),
            "random" => Ok(PlayerKind::Random),
            "minimax" => Ok(PlayerKind::Minimax),
            "minimax-pruned" | "alphabeta" => Ok(PlayerKind::MinimaxPruned),
            "qlearn" | "qlearning" => Ok(PlayerKind::QLearned),
            _ => Err(Error::UnknownPlayerType {
                input: s.to_string(),
                expected: Self::NAMES.to_string(),
            }),
        }
    }
}

/// Settings used when building a [`Player`] from a [`PlayerKind`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerOptions {
    /// Search depth for minimax players; `None` searches to the end
    pub max_depth: Option<usize>,
    /// Seed for players that draw random numbers
    pub seed: Option<u64>,
}

impl PlayerOptions {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

/// A seated player together with everything its kind needs to move
pub enum Player {
    Human(Box<dyn MoveInput>),
    Heuristic(StdRng),
    Random(StdRng),
    Minimax(Searcher),
    QLearned {
        tables: Arc<SeatTables>,
        rng: StdRng,
    },
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Player").field(&self.kind()).finish()
    }
}

impl Player {
    /// Build a player of `kind` for `board`.
    ///
    /// Humans read from the terminal. Learned players load both seat tables
    /// from `store`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingTable`] when a learned player has no trained tables.
    pub fn build<B: Board>(
        kind: PlayerKind,
        board: &B,
        store: &dyn TableStore,
        options: &PlayerOptions,
    ) -> Result<Self> {
        let player = match kind {
            PlayerKind::Human => Player::Human(Box::new(StdinInput::new())),
            PlayerKind::Heuristic => Player::Heuristic(options.rng()),
            PlayerKind::Random => Player::Random(options.rng()),
            PlayerKind::Minimax | PlayerKind::MinimaxPruned => {
                let pruning = kind == PlayerKind::MinimaxPruned;
                let config = match options.max_depth {
                    Some(depth) => SearchConfig::new(depth, pruning),
                    None => SearchConfig::full_depth(board, pruning),
                };
                Player::Minimax(Searcher::new(config))
            }
            PlayerKind::QLearned => Player::QLearned {
                tables: SeatTables::load(store, board)?,
                rng: options.rng(),
            },
        };
        Ok(player)
    }

    pub fn kind(&self) -> PlayerKind {
        match self {
            Player::Human(_) => PlayerKind::Human,
            Player::Heuristic(_) => PlayerKind::Heuristic,
            Player::Random(_) => PlayerKind::Random,
            Player::Minimax(searcher) if searcher.config().pruning => PlayerKind::MinimaxPruned,
            Player::Minimax(_) => PlayerKind::Minimax,
            Player::QLearned { .. } => PlayerKind::QLearned,
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Player::Human(_))
    }

    /// Choose a legal move for `token`. The board is left as it was found.
    pub fn select_move<B: Board>(&mut self, board: &mut B, token: Token) -> Result<usize> {
        let mv = match self {
            Player::Human(input) => read_human_move(input.as_mut(), board, token)?,
            Player::Heuristic(rng) => heuristic_move(board, token, rng)?,
            Player::Random(rng) => random_move(board, rng)?,
            Player::Minimax(searcher) => searcher.choose_move(board, token)?,
            Player::QLearned { tables, rng } => {
                let state = board.encode_state();
                tables
                    .for_token(token)
                    .greedy_move(&state, &board.remaining_moves(), rng)
                    .ok_or(Error::NoValidMoves)?
            }
        };
        trace!(kind = %self.kind(), %token, mv, "move selected");
        Ok(mv)
    }
}

/// Prompt until the human enters a legal move
fn read_human_move<B: Board>(input: &mut dyn MoveInput, board: &B, token: Token) -> Result<usize> {
    if board.remaining_moves().is_empty() {
        return Err(Error::NoValidMoves);
    }
    input.show(&board.render())?;
    loop {
        let line = input
            .read_move(&format!("Player {token}, choose a move:"))?
            .ok_or(Error::InputClosed)?;
        match board.parse_move(&line) {
            Some(mv) if board.is_legal(mv) => return Ok(mv),
            _ => input.show("Select a valid move.")?,
        }
    }
}
