//! Remembered root decisions of a searcher

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::board::Token;

/// Best move per position and mover.
///
/// Entries are only meaningful for the board shape and search settings they
/// were computed with; [`crate::ports::CacheKey`] names that combination when
/// the cache is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCache {
    moves: HashMap<String, usize>,
}

impl MoveCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry_key(state: &str, token: Token) -> String {
        format!("{state}_{token}")
    }

    pub fn get(&self, state: &str, token: Token) -> Option<usize> {
        self.moves.get(&Self::entry_key(state, token)).copied()
    }

    pub fn insert(&mut self, state: &str, token: Token, mv: usize) {
        self.moves.insert(Self::entry_key(state, token), mv);
    }

    /// Add every entry of `other`, keeping existing ones
    pub fn merge(&mut self, other: &MoveCache) {
        for (key, &mv) in &other.moves {
            self.moves.entry(key.clone()).or_insert(mv);
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_per_mover() {
        let mut cache = MoveCache::new();
        cache.insert("X...O....", Token::X, 2);
        assert_eq!(cache.get("X...O....", Token::X), Some(2));
        assert_eq!(cache.get("X...O....", Token::O), None);
    }

    #[test]
    fn test_merge_keeps_existing_entries() {
        let mut cache = MoveCache::new();
        cache.insert("s", Token::X, 1);
        let mut other = MoveCache::new();
        other.insert("s", Token::X, 5);
        other.insert("t", Token::O, 3);

        cache.merge(&other);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("s", Token::X), Some(1));
        assert_eq!(cache.get("t", Token::O), Some(3));
    }
}
