//! Move cache store port for persisting search decisions between runs.

use std::fmt;

use crate::{
    Result,
    board::Board,
    search::{MoveCache, SearchConfig},
};

/// Identifies one move cache: board shape and search settings
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub game: String,
    pub size: String,
    pub win_length: usize,
    pub max_depth: usize,
    pub pruning: bool,
}

impl CacheKey {
    pub fn new<B: Board>(board: &B, config: SearchConfig) -> Self {
        Self {
            game: board.game_name().to_string(),
            size: board.size_label(),
            win_length: board.win_length(),
            max_depth: config.max_depth,
            pruning: config.pruning,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let algorithm = if self.pruning { "alphabeta" } else { "minimax" };
        write!(
            f,
            "{}_{}_w{}_d{}_{algorithm}",
            self.game, self.size, self.win_length, self.max_depth
        )
    }
}

/// Port for persisting and loading searcher move caches
pub trait CacheStore {
    /// Load the cache stored under `key`, `Ok(None)` if there is none
    ///
    /// # Errors
    ///
    /// Returns an error if a stored cache exists but cannot be read or
    /// decoded.
    fn load_cache(&self, key: &CacheKey) -> Result<Option<MoveCache>>;

    /// Store `cache` under `key`, replacing any previous cache
    fn save_cache(&self, key: &CacheKey, cache: &MoveCache) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{DropBoard, GridBoard};

    #[test]
    fn test_key_names_search_settings() {
        let board = GridBoard::tic_tac_toe();
        let key = CacheKey::new(&board, SearchConfig::full_depth(&board, true));
        assert_eq!(key.to_string(), "tictactoe_3x3_w3_d9_alphabeta");

        let key = CacheKey::new(&DropBoard::connect_four(), SearchConfig::new(5, false));
        assert_eq!(key.to_string(), "connect4_6x7_w4_d5_minimax");
    }
}
