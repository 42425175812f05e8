//! Ports (trait boundaries) for external dependencies.
//!
//! Following hexagonal architecture, these traits are owned by the domain and
//! implemented by adapters in the infrastructure layer.

pub mod cache_store;
pub mod input;
pub mod observer;
pub mod table_store;

pub use cache_store::{CacheKey, CacheStore};
pub use input::MoveInput;
pub use observer::Observer;
pub use table_store::{TableKey, TableStore};
