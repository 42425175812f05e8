//! Trainer hyperparameters

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, strategy::OpponentPolicy};

/// Hyperparameters of a [`QTrainer`](super::QTrainer) run.
///
/// Every field has a default, so a JSON file only needs the fields it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Episodes played between two evaluations
    pub batch_size: usize,
    /// Upper bound on the number of batches
    pub max_batches: usize,
    /// Greedy games played after each batch
    pub eval_games: usize,
    /// Initial learning rate α
    pub learning_rate: f64,
    /// Multiplicative decay of α after every episode
    pub learning_rate_decay: f64,
    pub min_learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Initial exploration rate ε
    pub epsilon: f64,
    /// Multiplicative decay of ε after every episode
    pub epsilon_decay: f64,
    pub min_epsilon: f64,
    /// Factor applied to the final reward per step walked back from the end
    pub reward_decay: f64,
    pub win_reward: f64,
    pub loss_reward: f64,
    pub draw_reward: f64,
    /// Opponent faced while learning
    pub opponent: OpponentPolicy,
    /// Opponent faced by the greedy evaluation
    pub eval_opponent: OpponentPolicy,
    /// Training stops once the evaluation loss rate is at most this
    pub max_loss_rate: f64,
    /// ... and the evaluation draw rate is at most this
    pub max_draw_rate: f64,
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_batches: 100,
            eval_games: 200,
            learning_rate: 0.5,
            learning_rate_decay: 0.9999,
            min_learning_rate: 0.05,
            discount_factor: 0.9,
            epsilon: 0.5,
            epsilon_decay: 0.999,
            min_epsilon: 0.01,
            reward_decay: 0.9,
            win_reward: 100.0,
            loss_reward: -100.0,
            draw_reward: 0.5,
            opponent: OpponentPolicy::Mixed,
            eval_opponent: OpponentPolicy::Heuristic,
            max_loss_rate: 0.0,
            max_draw_rate: 1.0,
            seed: None,
        }
    }
}

impl TrainerConfig {
    /// Read a JSON configuration file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read trainer config {path:?}"),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        fn invalid(message: String) -> Result<()> {
            Err(Error::InvalidConfiguration { message })
        }
        fn unit(value: f64) -> bool {
            (0.0..=1.0).contains(&value)
        }

        if self.batch_size == 0 || self.max_batches == 0 || self.eval_games == 0 {
            return invalid(
                "batch_size, max_batches and eval_games must be positive".to_string(),
            );
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return invalid(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            ));
        }
        if !(self.min_learning_rate > 0.0 && self.min_learning_rate <= self.learning_rate) {
            return invalid(format!(
                "min_learning_rate must be in (0, learning_rate], got {}",
                self.min_learning_rate
            ));
        }
        if !unit(self.epsilon) || self.min_epsilon <= 0.0 || self.min_epsilon > self.epsilon {
            return invalid(format!(
                "epsilon bounds must satisfy 0 < min_epsilon <= epsilon <= 1, got {} and {}",
                self.min_epsilon, self.epsilon
            ));
        }
        for (name, value) in [
            ("learning_rate_decay", self.learning_rate_decay),
            ("epsilon_decay", self.epsilon_decay),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return invalid(format!("{name} must be in (0, 1], got {value}"));
            }
        }
        for (name, value) in [
            ("discount_factor", self.discount_factor),
            ("reward_decay", self.reward_decay),
            ("max_loss_rate", self.max_loss_rate),
            ("max_draw_rate", self.max_draw_rate),
        ] {
            if !unit(value) {
                return invalid(format!("{name} must be in [0, 1], got {value}"));
            }
        }
        if self.win_reward <= self.loss_reward {
            return invalid(format!(
                "win_reward ({}) must exceed loss_reward ({})",
                self.win_reward, self.loss_reward
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TrainerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_rates() {
        let config = TrainerConfig {
            learning_rate: 0.0,
            ..TrainerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));

        let config = TrainerConfig {
            epsilon: 0.1,
            min_epsilon: 0.2,
            ..TrainerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TrainerConfig {
            min_epsilon: 0.0,
            ..TrainerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));

        let config = TrainerConfig {
            max_draw_rate: 1.5,
            ..TrainerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"batch_size": 50, "opponent": "heuristic", "seed": 7}}"#
        )
        .unwrap();

        let config = TrainerConfig::load(file.path()).unwrap();
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.opponent, OpponentPolicy::Heuristic);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.discount_factor, 0.9);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"discount_factor": 2.0}}"#).unwrap();
        assert!(TrainerConfig::load(file.path()).is_err());
    }
}
