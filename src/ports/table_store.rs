//! Table store port for learned Q-table persistence.

use std::fmt;

use crate::{
    Result,
    board::{Board, Seat},
    q_learning::SavedTable,
};

/// Identifies one learned table: game, board size, win length and seat
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableKey {
    pub game: String,
    pub size: String,
    pub win_length: usize,
    pub seat: Seat,
}

impl TableKey {
    pub fn new<B: Board>(board: &B, seat: Seat) -> Self {
        Self {
            game: board.game_name().to_string(),
            size: board.size_label(),
            win_length: board.win_length(),
            seat,
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_w{}_{}",
            self.game, self.size, self.win_length, self.seat
        )
    }
}

/// Port for persisting and loading learned tables.
///
/// # Examples
///
/// ```no_run
/// use boardgames::board::{GridBoard, Seat};
/// use boardgames::ports::{TableKey, TableStore};
///
/// fn has_table<S: TableStore>(store: &S) -> boardgames::Result<bool> {
///     let key = TableKey::new(&GridBoard::tic_tac_toe(), Seat::First);
///     Ok(store.load(&key)?.is_some())
/// }
/// ```
pub trait TableStore {
    /// Load the table stored under `key`, `Ok(None)` if there is none
    ///
    /// # Errors
    ///
    /// Returns an error if a stored table exists but cannot be read or
    /// decoded.
    fn load(&self, key: &TableKey) -> Result<Option<SavedTable>>;

    /// Store `table` under `key`, replacing any previous table
    fn save(&self, key: &TableKey, table: &SavedTable) -> Result<()>;
}
