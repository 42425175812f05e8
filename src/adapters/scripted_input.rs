//! Pre-recorded move input for tests and replays

use std::collections::VecDeque;

use crate::{Result, ports::MoveInput};

/// Replays a fixed list of entries and records everything shown
#[derive(Debug, Default)]
pub struct ScriptedInput {
    entries: VecDeque<String>,
    shown: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
            shown: Vec::new(),
        }
    }

    /// Messages shown to the player so far
    pub fn shown(&self) -> &[String] {
        &self.shown
    }

    pub fn remaining(&self) -> usize {
        self.entries.len()
    }
}

impl MoveInput for ScriptedInput {
    fn show(&mut self, text: &str) -> Result<()> {
        self.shown.push(text.to_string());
        Ok(())
    }

    fn read_move(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.entries.pop_front())
    }
}
