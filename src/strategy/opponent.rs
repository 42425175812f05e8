//! Scripted opponents used while training and evaluating learned tables

use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{heuristic_move, random_move};
use crate::{
    Error, Result,
    board::{Board, Token},
};

/// How the scripted side picks its moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentPolicy {
    /// Uniformly random legal moves
    Random,
    /// The three-tier heuristic
    Heuristic,
    /// Heuristic or random with equal probability, decided per move
    #[default]
    Mixed,
}

impl OpponentPolicy {
    pub const NAMES: &'static str = "random, heuristic, mixed";

    pub fn choose<B: Board, R: Rng + ?Sized>(
        self,
        board: &mut B,
        token: Token,
        rng: &mut R,
    ) -> Result<usize> {
        match self {
            OpponentPolicy::Random => random_move(board, rng),
            OpponentPolicy::Heuristic => heuristic_move(board, token, rng),
            OpponentPolicy::Mixed => {
                if rng.random_bool(0.5) {
                    heuristic_move(board, token, rng)
                } else {
                    random_move(board, rng)
                }
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OpponentPolicy::Random => "random",
            OpponentPolicy::Heuristic => "heuristic",
            OpponentPolicy::Mixed => "mixed",
        }
    }
}

impl fmt::Display for OpponentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpponentPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(OpponentPolicy::Random),
            "heuristic" | "algo" | "algorithm" => Ok(OpponentPolicy::Heuristic),
            "mixed" => Ok(OpponentPolicy::Mixed),
            _ => Err(Error::UnknownOpponent {
                input: s.to_string(),
                expected: Self::NAMES.to_string(),
            }),
        }
    }
}
