//! Batched tabular Q-learning for one seat

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::{
    EvaluationResult, QTable, SavedTable, TrainerConfig, TrainingMetadata, evaluate_table,
};
use crate::{
    Error, Result,
    board::{Board, GameOutcome, Seat, Token},
    ports::Observer,
};

/// Statistics recorded after one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// 1-based batch number
    pub batch: usize,
    /// Episodes played so far, this batch included
    pub episodes: usize,
    pub learning_rate: f64,
    pub epsilon: f64,
    /// States with a row in the table
    pub states: usize,
    pub evaluation: EvaluationResult,
}

/// Outcome of a complete training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub seat: Seat,
    pub episodes: usize,
    /// The evaluation targets were met before `max_batches` ran out
    pub converged: bool,
    pub batches: Vec<BatchReport>,
}

impl TrainingReport {
    pub fn final_evaluation(&self) -> Option<&EvaluationResult> {
        self.batches.last().map(|batch| &batch.evaluation)
    }
}

/// Trains the table of one seat against a scripted opponent.
///
/// The agent always holds the token of its seat: `X` for the first seat,
/// `O` for the second. `X` opens every episode.
pub struct QTrainer<B: Board> {
    board: B,
    seat: Seat,
    config: TrainerConfig,
    table: QTable,
    learning_rate: f64,
    epsilon: f64,
    episodes: usize,
    rng: StdRng,
    observers: Vec<Box<dyn Observer>>,
}

impl<B: Board> QTrainer<B> {
    pub fn new(board: B, seat: Seat, config: TrainerConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            board,
            seat,
            learning_rate: config.learning_rate,
            epsilon: config.epsilon,
            config,
            table: QTable::new(),
            episodes: 0,
            rng,
            observers: Vec::new(),
        })
    }

    /// Continue training from an existing table
    pub fn with_table(mut self, table: QTable) -> Self {
        self.table = table;
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn into_table(self) -> QTable {
        self.table
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }

    /// Play batches until the evaluation targets are met or `max_batches`
    /// batches have run
    pub fn train(&mut self) -> Result<TrainingReport> {
        for observer in &mut self.observers {
            observer.on_start(self.config.max_batches)?;
        }
        info!(
            game = self.board.game_name(),
            size = %self.board.size_label(),
            seat = %self.seat,
            opponent = %self.config.opponent,
            "training started"
        );

        let mut report = TrainingReport {
            seat: self.seat,
            episodes: 0,
            converged: false,
            batches: Vec::new(),
        };

        for batch in 1..=self.config.max_batches {
            for _ in 0..self.config.batch_size {
                self.run_episode()?;
            }
            let evaluation = self.evaluate(self.config.eval_games)?;
            let entry = BatchReport {
                batch,
                episodes: self.episodes,
                learning_rate: self.learning_rate,
                epsilon: self.epsilon,
                states: self.table.len(),
                evaluation,
            };
            info!(
                batch,
                episodes = self.episodes,
                states = entry.states,
                win_rate = evaluation.win_rate,
                draw_rate = evaluation.draw_rate,
                loss_rate = evaluation.loss_rate,
                "batch evaluated"
            );
            for observer in &mut self.observers {
                observer.on_batch_end(&entry)?;
            }
            report.batches.push(entry);

            if self.targets_met(&evaluation) {
                report.converged = true;
                break;
            }
        }

        report.episodes = self.episodes;
        for observer in &mut self.observers {
            observer.on_end()?;
        }
        info!(
            seat = %self.seat,
            episodes = report.episodes,
            converged = report.converged,
            "training finished"
        );
        Ok(report)
    }

    /// Play one learning episode and back up its reward
    pub fn run_episode(&mut self) -> Result<GameOutcome> {
        self.board.reset();
        let agent = self.seat.token();
        let mut to_move = Token::FIRST;
        let mut steps: Vec<(String, usize)> = Vec::new();
        let mut plies = 0;

        let outcome = loop {
            if let Some(outcome) = self.board.outcome() {
                break outcome;
            }
            let mv = if to_move == agent {
                let state = self.board.encode_state();
                let legal = self.board.remaining_moves();
                self.table.ensure_row(&state, &legal);
                let mv = self.epsilon_greedy(&state, &legal)?;
                steps.push((state, mv));
                mv
            } else {
                self.config
                    .opponent
                    .choose(&mut self.board, to_move, &mut self.rng)?
            };
            self.board.place(mv, to_move);
            plies += 1;
            to_move = to_move.opponent();
        };

        let reward = self.final_reward(outcome, plies);
        trace!(?outcome, plies, reward, steps = steps.len(), "episode finished");

        self.back_up(&steps, reward);
        self.episodes += 1;
        self.learning_rate = (self.learning_rate * self.config.learning_rate_decay)
            .max(self.config.min_learning_rate);
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.min_epsilon);
        Ok(outcome)
    }

    /// Greedy games against the evaluation opponent; the table is untouched
    pub fn evaluate(&mut self, games: usize) -> Result<EvaluationResult> {
        let result = evaluate_table(
            &mut self.board,
            &self.table,
            self.seat,
            self.config.eval_opponent,
            games,
            &mut self.rng,
        )?;
        debug!(?result, "evaluation finished");
        Ok(result)
    }

    /// Wrap the current table for persistence
    pub fn saved_table(&self, report: &TrainingReport) -> SavedTable {
        let metadata = TrainingMetadata {
            episodes_trained: report.episodes,
            batches: report.batches.len(),
            opponent: self.config.opponent.to_string(),
            seed: self.config.seed,
            converged: report.converged,
            final_evaluation: report.final_evaluation().copied(),
        };
        SavedTable::new(&self.board, self.seat, self.table.clone(), metadata)
    }

    fn targets_met(&self, evaluation: &EvaluationResult) -> bool {
        evaluation.loss_rate <= self.config.max_loss_rate
            && evaluation.draw_rate <= self.config.max_draw_rate
    }

    fn epsilon_greedy(&mut self, state: &str, legal: &[usize]) -> Result<usize> {
        let choice = if self.rng.random::<f64>() < self.epsilon {
            legal.choose(&mut self.rng).copied()
        } else {
            self.table.greedy_move(state, legal, &mut self.rng)
        };
        choice.ok_or(Error::NoValidMoves)
    }

    fn final_reward(&self, outcome: GameOutcome, plies: usize) -> f64 {
        let plies = plies as f64;
        match outcome {
            GameOutcome::Win(token) if token == self.seat.token() => {
                self.config.win_reward - plies
            }
            GameOutcome::Win(_) => self.config.loss_reward + plies,
            GameOutcome::Draw => self.config.draw_reward,
        }
    }

    /// Walk the agent's decisions from last to first. The step `k` places
    /// from the end receives `reward * reward_decay^k` and bootstraps from the
    /// agent's following decision state; the last step is terminal.
    fn back_up(&mut self, steps: &[(String, usize)], reward: f64) {
        let mut propagated = reward;
        for (k, (state, mv)) in steps.iter().enumerate().rev() {
            let next = steps.get(k + 1).map(|(next, _)| next.as_str());
            if let Some(next) = next {
                let legal = self.board.moves_from_encoding(next);
                self.table.ensure_row(next, &legal);
            }
            self.table.td_update(
                state,
                *mv,
                propagated,
                next,
                self.learning_rate,
                self.config.discount_factor,
            );
            propagated *= self.config.reward_decay;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{board::GridBoard, strategy::OpponentPolicy};

    fn config(seed: u64) -> TrainerConfig {
        TrainerConfig {
            batch_size: 50,
            max_batches: 2,
            eval_games: 20,
            seed: Some(seed),
            ..TrainerConfig::default()
        }
    }

    #[test]
    fn test_episode_only_records_agent_states() {
        let mut trainer = QTrainer::new(GridBoard::tic_tac_toe(), Seat::First, config(1)).unwrap();
        trainer.run_episode().unwrap();
        // X moves from states with an even number of tokens
        assert!(!trainer.table().is_empty());
        for state in trainer.table().states() {
            let tokens = state.chars().filter(|&c| c != '.').count();
            assert!(tokens.is_multiple_of(2), "state {state} is not an X decision");
        }
    }

    #[test]
    fn test_rates_decay_to_floors() {
        let cfg = TrainerConfig {
            learning_rate_decay: 0.5,
            epsilon_decay: 0.5,
            ..config(2)
        };
        let mut trainer = QTrainer::new(GridBoard::tic_tac_toe(), Seat::Second, cfg).unwrap();
        for _ in 0..30 {
            trainer.run_episode().unwrap();
        }
        assert_eq!(trainer.learning_rate(), trainer.config().min_learning_rate);
        assert_eq!(trainer.epsilon(), trainer.config().min_epsilon);
        assert_eq!(trainer.episodes(), 30);
    }

    #[test]
    fn test_final_reward_depends_on_plies() {
        let trainer = QTrainer::new(GridBoard::tic_tac_toe(), Seat::First, config(3)).unwrap();
        assert_eq!(trainer.final_reward(GameOutcome::Win(Token::X), 5), 95.0);
        assert_eq!(trainer.final_reward(GameOutcome::Win(Token::O), 6), -94.0);
        assert_eq!(trainer.final_reward(GameOutcome::Draw, 9), 0.5);
    }

    #[test]
    fn test_back_up_decays_reward() {
        let cfg = TrainerConfig {
            learning_rate: 1.0,
            min_learning_rate: 1.0,
            discount_factor: 0.0,
            reward_decay: 0.5,
            ..config(4)
        };
        let mut trainer = QTrainer::new(GridBoard::tic_tac_toe(), Seat::First, cfg).unwrap();
        let steps = vec![("a".to_string(), 0), ("b".to_string(), 1)];
        trainer.back_up(&steps, 8.0);
        assert_eq!(trainer.table().get("b", 1), 8.0);
        assert_eq!(trainer.table().get("a", 0), 4.0);
    }

    #[test]
    fn test_train_reports_every_batch() {
        let cfg = TrainerConfig {
            max_loss_rate: 0.0,
            max_draw_rate: 0.0,
            opponent: OpponentPolicy::Random,
            ..config(5)
        };
        let mut trainer = QTrainer::new(GridBoard::tic_tac_toe(), Seat::First, cfg).unwrap();
        let report = trainer.train().unwrap();
        // A zero draw rate against the heuristic is out of reach in two batches
        assert!(!report.converged);
        assert_eq!(report.batches.len(), 2);
        assert_eq!(report.episodes, 100);
        assert_eq!(report.batches[1].episodes, 100);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let cfg = TrainerConfig {
            batch_size: 0,
            ..TrainerConfig::default()
        };
        assert!(QTrainer::new(GridBoard::tic_tac_toe(), Seat::First, cfg).is_err());
    }
}
