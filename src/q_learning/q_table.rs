//! Q-table with lazily created rows

use std::collections::{BTreeMap, HashMap};

use rand::{Rng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

/// Q-values keyed by state encoding, then by move.
///
/// A row is created the first time its state is visited, with every legal
/// move of that state at 0.0. Moves within a row are kept ordered so that
/// seeded tie-breaking is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    rows: HashMap<String, BTreeMap<usize, f64>>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the row for `state` if missing, adding any absent legal moves
    pub fn ensure_row(&mut self, state: &str, legal: &[usize]) {
        let row = self.rows.entry(state.to_string()).or_default();
        for &mv in legal {
            row.entry(mv).or_insert(0.0);
        }
    }

    pub fn row(&self, state: &str) -> Option<&BTreeMap<usize, f64>> {
        self.rows.get(state)
    }

    /// Q-value of a pair; unseen pairs read as 0.0
    pub fn get(&self, state: &str, mv: usize) -> f64 {
        self.rows
            .get(state)
            .and_then(|row| row.get(&mv))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, state: &str, mv: usize, value: f64) {
        self.rows
            .entry(state.to_string())
            .or_default()
            .insert(mv, value);
    }

    /// Largest value in the row of `state`, 0.0 for a missing or empty row
    pub fn max_q(&self, state: &str) -> f64 {
        self.rows
            .get(state)
            .and_then(|row| row.values().copied().reduce(f64::max))
            .unwrap_or(0.0)
    }

    /// Every move of `legal` tied at the best value for `state`
    pub fn best_moves(&self, state: &str, legal: &[usize]) -> Vec<usize> {
        let best = legal
            .iter()
            .map(|&mv| self.get(state, mv))
            .fold(f64::NEG_INFINITY, f64::max);
        legal
            .iter()
            .copied()
            .filter(|&mv| self.get(state, mv) == best)
            .collect()
    }

    /// Greedy move with a uniform tie-break; `None` when `legal` is empty
    pub fn greedy_move<R: Rng + ?Sized>(
        &self,
        state: &str,
        legal: &[usize],
        rng: &mut R,
    ) -> Option<usize> {
        self.best_moves(state, legal).choose(rng).copied()
    }

    /// Temporal difference update
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// `next_state` is `None` for a terminal transition. Returns the new value.
    pub fn td_update(
        &mut self,
        state: &str,
        mv: usize,
        reward: f64,
        next_state: Option<&str>,
        learning_rate: f64,
        discount_factor: f64,
    ) -> f64 {
        let current = self.get(state, mv);
        let next_max = next_state.map_or(0.0, |next| self.max_q(next));
        let target = reward + discount_factor * next_max;
        let updated = current + learning_rate * (target - current);
        self.set(state, mv, updated);
        updated
    }

    /// State encodings that have a row, in no particular order
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Number of states with a row
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of stored (state, move) pairs
    pub fn entry_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }
}
