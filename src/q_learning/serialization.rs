//! Persistence format for learned tables

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{EvaluationResult, QTable};
use crate::{
    Error, Result,
    board::{Board, Seat, Token},
    ports::{TableKey, TableStore},
};

/// Provenance stored next to a table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub episodes_trained: usize,
    pub batches: usize,
    /// Opponent policy faced while learning
    pub opponent: String,
    pub seed: Option<u64>,
    /// Whether the evaluation targets were met
    pub converged: bool,
    pub final_evaluation: Option<EvaluationResult>,
}

/// Versioned envelope around one seat's table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTable {
    pub version: u32,
    pub game: String,
    pub size: String,
    pub win_length: usize,
    pub seat: Seat,
    table: QTable,
    pub metadata: TrainingMetadata,
}

impl SavedTable {
    /// Current save format version
    pub const VERSION: u32 = 2;

    pub fn new<B: Board>(board: &B, seat: Seat, table: QTable, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            game: board.game_name().to_string(),
            size: board.size_label(),
            win_length: board.win_length(),
            seat,
            table,
            metadata,
        }
    }

    pub fn key(&self) -> TableKey {
        TableKey {
            game: self.game.clone(),
            size: self.size.clone(),
            win_length: self.win_length,
            seat: self.seat,
        }
    }

    /// Confirm the table was trained for the board and seat of `key`
    pub fn ensure_key(&self, key: &TableKey) -> Result<()> {
        let found = self.key();
        if &found != key {
            return Err(Error::TableMismatch {
                expected: key.to_string(),
                found: found.to_string(),
            });
        }
        Ok(())
    }

    /// The stored table, provided the format version is understood
    pub fn into_table(self) -> Result<QTable> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedFormat {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(self.table)
    }
}

/// The tables of both seats, shared by learned players at play time
#[derive(Debug, Clone, Default)]
pub struct SeatTables {
    first: QTable,
    second: QTable,
}

impl SeatTables {
    pub fn new(first: QTable, second: QTable) -> Self {
        Self { first, second }
    }

    /// Load both seats of `board`'s game and size from `store`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingTable`] if either seat has never been trained, and
    /// [`Error::TableMismatch`] if a stored table was trained for another
    /// board.
    pub fn load<B: Board, S: TableStore + ?Sized>(store: &S, board: &B) -> Result<Arc<Self>> {
        let load_seat = |seat: Seat| -> Result<QTable> {
            let key = TableKey::new(board, seat);
            let saved = store.load(&key)?.ok_or_else(|| Error::MissingTable {
                key: key.to_string(),
            })?;
            saved.ensure_key(&key)?;
            saved.into_table()
        };
        let first = load_seat(Seat::First)?;
        let second = load_seat(Seat::Second)?;
        Ok(Arc::new(Self::new(first, second)))
    }

    pub fn for_seat(&self, seat: Seat) -> &QTable {
        match seat {
            Seat::First => &self.first,
            Seat::Second => &self.second,
        }
    }

    /// Table trained for whoever holds `token`
    pub fn for_token(&self, token: Token) -> &QTable {
        self.for_seat(Seat::of(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::InMemoryStore,
        board::{DropBoard, GridBoard},
    };

    fn saved(seat: Seat, value: f64) -> SavedTable {
        let mut table = QTable::new();
        table.set(".........", 4, value);
        SavedTable::new(
            &GridBoard::tic_tac_toe(),
            seat,
            table,
            TrainingMetadata::default(),
        )
    }

    #[test]
    fn test_future_version_is_rejected() {
        let mut table = saved(Seat::First, 1.0);
        table.version = SavedTable::VERSION + 1;
        assert!(matches!(
            table.into_table(),
            Err(Error::UnsupportedFormat { found: 3, expected: 2 })
        ));
    }

    #[test]
    fn test_load_picks_table_by_token() {
        let store = InMemoryStore::new();
        for (seat, value) in [(Seat::First, 1.0), (Seat::Second, 2.0)] {
            let table = saved(seat, value);
            store.save(&table.key(), &table).unwrap();
        }
        let tables = SeatTables::load(&store, &GridBoard::tic_tac_toe()).unwrap();
        assert_eq!(tables.for_token(Token::X).get(".........", 4), 1.0);
        assert_eq!(tables.for_token(Token::O).get(".........", 4), 2.0);
    }

    #[test]
    fn test_missing_seat_names_the_key() {
        let store = InMemoryStore::new();
        let table = saved(Seat::First, 1.0);
        store.save(&table.key(), &table).unwrap();
        let err = SeatTables::load(&store, &GridBoard::tic_tac_toe()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingTable { ref key } if key == "tictactoe_3x3_w3_second"
        ));
    }

    #[test]
    fn test_tables_for_another_win_length_are_missing() {
        let store = InMemoryStore::new();
        let three = GridBoard::new(4, 3).unwrap();
        for seat in [Seat::First, Seat::Second] {
            let table = SavedTable::new(&three, seat, QTable::new(), TrainingMetadata::default());
            store.save(&table.key(), &table).unwrap();
        }
        assert!(SeatTables::load(&store, &three).is_ok());

        let err = SeatTables::load(&store, &GridBoard::new(4, 4).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingTable { ref key } if key == "tictactoe_4x4_w4_first"
        ));
    }

    #[test]
    fn test_table_stored_under_wrong_key_is_rejected() {
        let store = InMemoryStore::new();
        let board = DropBoard::connect_four();
        let other = DropBoard::new(6, 7, 3).unwrap();
        for seat in [Seat::First, Seat::Second] {
            let table = SavedTable::new(&other, seat, QTable::new(), TrainingMetadata::default());
            store.save(&TableKey::new(&board, seat), &table).unwrap();
        }
        assert!(matches!(
            SeatTables::load(&store, &board),
            Err(Error::TableMismatch { .. })
        ));
    }
}
