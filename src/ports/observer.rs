//! Observer port for game series and training runs
//!
//! Observers decouple progress reporting from the loops that play games.

use crate::{Result, board::GameOutcome, q_learning::BatchReport};

/// Observer of a series of games or a batched training run.
///
/// # Event Sequence
///
/// 1. `on_start(total)` once; `total` counts games for a series and batches
///    for a training run
/// 2. `on_game_end(...)` after every session game, or `on_batch_end(...)`
///    after every training batch
/// 3. `on_end()` once
///
/// # Examples
///
/// ```no_run
/// use boardgames::{board::GameOutcome, ports::Observer};
///
/// struct DrawCounter {
///     draws: usize,
/// }
///
/// impl Observer for DrawCounter {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         outcome: GameOutcome,
///         _board: &str,
///     ) -> boardgames::Result<()> {
///         if outcome == GameOutcome::Draw {
///             self.draws += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    fn on_start(&mut self, _total: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a session game is over.
    ///
    /// * `game_num` - 1-based index of the game within the series
    /// * `outcome` - who won, by token
    /// * `board` - rendering of the final position
    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome, _board: &str) -> Result<()> {
        Ok(())
    }

    /// Called after a training batch has been evaluated
    fn on_batch_end(&mut self, _report: &BatchReport) -> Result<()> {
        Ok(())
    }

    fn on_end(&mut self) -> Result<()> {
        Ok(())
    }
}
