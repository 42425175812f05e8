//! Non-searching move policies
//!
//! - [`heuristic_move`]: win, else block, else grow the longest runs
//! - [`random_move`]: uniform over legal moves
//! - [`OpponentPolicy`]: scripted opponent built from the two above
//!
//! All take the random source as a parameter so callers control seeding.

pub mod heuristic;
pub mod opponent;

pub use heuristic::{heuristic_move, random_move, winning_move};
pub use opponent::OpponentPolicy;
