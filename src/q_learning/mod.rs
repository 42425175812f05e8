//! Tabular Q-learning
//!
//! - [`QTable`]: lazily populated state/move values
//! - [`QTrainer`]: epsilon-greedy episodes against a scripted opponent,
//!   evaluated after every batch
//! - [`SavedTable`] / [`SeatTables`]: persistence and play-time lookup
//!
//! One table is trained per seat. The first seat always plays `X` and the
//! second `O`, so a table never has to reason about which token it holds.

pub mod config;
pub mod evaluation;
pub mod q_table;
pub mod serialization;
pub mod trainer;

pub use config::TrainerConfig;
pub use evaluation::{EvaluationResult, evaluate_table};
pub use q_table::QTable;
pub use serialization::{SavedTable, SeatTables, TrainingMetadata};
pub use trainer::{BatchReport, QTrainer, TrainingReport};
