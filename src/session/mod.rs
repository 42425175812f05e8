//! Seating players and running games between them
//!
//! [`PlayerKind`] is the closed set of player types a front end may ask for;
//! [`Player`] carries what each kind needs at run time. A [`Session`] owns the
//! board and both players and plays single games or alternating series.

pub mod game;
pub mod observers;
pub mod player;

pub use game::{GameRecord, Session, SeriesResult};
pub use observers::{BatchProgressObserver, BoardPrinter, ProgressObserver};
pub use player::{Player, PlayerKind, PlayerOptions};
