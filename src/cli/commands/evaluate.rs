//! Evaluate command - Measure stored tables against a scripted opponent

use anyhow::{Context, Result};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Error,
    board::{Board, GameKind},
    cli::{
        config::{GameArgs, SeatArg},
        output,
    },
    ports::{TableKey, TableStore},
    q_learning::evaluate_table,
    strategy::OpponentPolicy,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate learned tables")]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// Seat(s) to evaluate
    #[arg(long, value_enum, default_value_t = SeatArg::Both)]
    pub seat: SeatArg,

    /// Opponent to evaluate against (random, heuristic, mixed)
    #[arg(long, short = 'o', default_value = "heuristic")]
    pub opponent: String,

    /// Number of evaluation games per seat
    #[arg(long, short = 'g', default_value_t = 500)]
    pub games: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let opponent = args.opponent.parse::<OpponentPolicy>()?;
    match args.game.kind() {
        GameKind::TicTacToe => run(args.game.grid_board()?, opponent, &args),
        GameKind::ConnectFour => run(args.game.drop_board()?, opponent, &args),
    }
}

fn run<B: Board>(mut board: B, opponent: OpponentPolicy, args: &EvaluateArgs) -> Result<()> {
    let store = args.game.store();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    for &seat in args.seat.seats() {
        let key = TableKey::new(&board, seat);
        let saved = store
            .load(&key)
            .with_context(|| format!("Failed to load table {key}"))?
            .ok_or_else(|| Error::MissingTable {
                key: key.to_string(),
            })?;
        saved.ensure_key(&key)?;

        output::print_section(&format!("Table {key}"));
        output::print_kv(
            "Trained episodes",
            &output::format_number(saved.metadata.episodes_trained),
        );
        output::print_kv("Trained against", &saved.metadata.opponent);
        let table = saved.into_table()?;
        output::print_kv("States", &output::format_number(table.len()));

        let result = evaluate_table(&mut board, &table, seat, opponent, args.games, &mut rng)?;
        output::print_subsection(&format!("Against {opponent}"));
        output::print_evaluation(&result);
    }
    Ok(())
}
