//! Train command - Learn Q-tables for one or both seats

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    board::{Board, GameKind, Seat},
    cli::{
        config::{GameArgs, SeatArg},
        output,
    },
    ports::{TableKey, TableStore},
    q_learning::{QTrainer, TrainerConfig, TrainingReport},
    session::BatchProgressObserver,
    strategy::OpponentPolicy,
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    game: String,
    size: String,
    config: TrainerConfig,
    reports: Vec<TrainingReport>,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train Q-tables against a scripted opponent")]
pub struct TrainArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Seat(s) to train
    #[arg(long, value_enum, default_value_t = SeatArg::Both)]
    pub seat: SeatArg,

    /// JSON file with trainer settings; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Episodes per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Maximum number of batches
    #[arg(long)]
    pub max_batches: Option<usize>,

    /// Evaluation games after each batch
    #[arg(long)]
    pub eval_games: Option<usize>,

    /// Training opponent (random, heuristic, mixed)
    #[arg(long, short = 'o')]
    pub opponent: Option<String>,

    /// Evaluation opponent (random, heuristic, mixed)
    #[arg(long)]
    pub eval_opponent: Option<String>,

    /// Stop once the evaluation loss rate is at most this
    #[arg(long)]
    pub max_loss_rate: Option<f64>,

    /// Stop once the evaluation draw rate is also at most this
    #[arg(long)]
    pub max_draw_rate: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Continue from the stored tables instead of starting empty
    #[arg(long, default_value_t = false)]
    pub resume: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

impl TrainArgs {
    fn trainer_config(&self) -> Result<TrainerConfig> {
        let mut config = match &self.config {
            Some(path) => TrainerConfig::load(path)
                .with_context(|| format!("Failed to load trainer config {}", path.display()))?,
            None => TrainerConfig::default(),
        };

        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if let Some(max_batches) = self.max_batches {
            config.max_batches = max_batches;
        }
        if let Some(eval_games) = self.eval_games {
            config.eval_games = eval_games;
        }
        if let Some(opponent) = &self.opponent {
            config.opponent = opponent.parse::<OpponentPolicy>()?;
        }
        if let Some(opponent) = &self.eval_opponent {
            config.eval_opponent = opponent.parse::<OpponentPolicy>()?;
        }
        if let Some(rate) = self.max_loss_rate {
            config.max_loss_rate = rate;
        }
        if let Some(rate) = self.max_draw_rate {
            config.max_draw_rate = rate;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.trainer_config()?;
    match args.game.kind() {
        GameKind::TicTacToe => run(args.game.grid_board()?, config, &args),
        GameKind::ConnectFour => run(args.game.drop_board()?, config, &args),
    }
}

fn run<B: Board>(board: B, config: TrainerConfig, args: &TrainArgs) -> Result<()> {
    let store = args.game.store();
    output::print_section(&format!(
        "Training {} {} against {} opponent",
        board.game_name(),
        board.size_label(),
        config.opponent
    ));

    let mut reports = Vec::new();
    for &seat in args.seat.seats() {
        let report = train_seat(board.clone(), seat, config.clone(), &store, args)?;
        output::print_subsection(&format!("Seat {seat}"));
        output::print_training_report(&report);
        reports.push(report);
    }
    println!("\nTables saved to {}", args.game.tables.display());

    if let Some(summary) = &args.summary {
        let path = sanitize_summary_path(summary);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create summary file {}", path.display()))?;
        let summary = TrainingSummaryFile {
            game: board.game_name().to_string(),
            size: board.size_label(),
            config,
            reports,
        };
        to_writer_pretty(file, &summary).context("Failed to write training summary")?;
        println!("Summary written to {}", path.display());
    }
    Ok(())
}

fn train_seat<B: Board, S: TableStore>(
    board: B,
    seat: Seat,
    config: TrainerConfig,
    store: &S,
    args: &TrainArgs,
) -> Result<TrainingReport> {
    let key = TableKey::new(&board, seat);
    let mut trainer = QTrainer::new(board, seat, config)?;

    if args.resume
        && let Some(saved) = store
            .load(&key)
            .with_context(|| format!("Failed to load table {key}"))?
    {
        saved.ensure_key(&key)?;
        trainer = trainer.with_table(saved.into_table()?);
    }
    if args.progress {
        trainer = trainer.with_observer(Box::new(BatchProgressObserver::new()));
    }

    let report = trainer.train()?;
    store
        .save(&key, &trainer.saved_table(&report))
        .with_context(|| format!("Failed to save table {key}"))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/summary")),
            PathBuf::from("out/summary.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("summary.JSON")),
            PathBuf::from("summary.JSON")
        );
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = TrainArgs::parse_from([
            "train",
            "--batch-size",
            "10",
            "--opponent",
            "random",
            "--seed",
            "3",
        ]);
        let config = args.trainer_config().unwrap();
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.opponent, OpponentPolicy::Random);
        assert_eq!(config.seed, Some(3));
        assert_eq!(args.seat, SeatArg::Both);
    }

    #[test]
    fn test_unknown_opponent_is_rejected() {
        let args = TrainArgs::parse_from(["train", "--opponent", "oracle"]);
        assert!(args.trainer_config().is_err());
    }
}
