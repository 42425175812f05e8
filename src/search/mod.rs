//! Depth-limited minimax search
//!
//! The searcher drives a single board through hypothetical placements and
//! removals; no board is ever copied during a search.
//!
//! ## Usage Example
//!
//! ```
//! use boardgames::board::{Board, GridBoard, Token};
//! use boardgames::search::{SearchConfig, Searcher};
//!
//! let mut board = GridBoard::parse("XX.OO....", 3).unwrap();
//! let mut searcher = Searcher::new(SearchConfig::full_depth(&board, true));
//! assert_eq!(searcher.choose_move(&mut board, Token::X).unwrap(), 2);
//! ```

pub mod cache;
pub mod minimax;

pub use cache::MoveCache;
pub use minimax::{HEURISTIC_BOUND, SearchConfig, Searcher, WIN_SCORE};
