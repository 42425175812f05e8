//! Move input port for human players

use crate::Result;

/// Source of human move entries.
///
/// Implementations decide where text comes from (a terminal, a script) and
/// where messages to the player go.
pub trait MoveInput {
    /// Show `text` to the player
    fn show(&mut self, text: &str) -> Result<()>;

    /// Prompt for a move and read one line.
    ///
    /// Returns `Ok(None)` when the input is exhausted.
    fn read_move(&mut self, prompt: &str) -> Result<Option<String>>;
}
