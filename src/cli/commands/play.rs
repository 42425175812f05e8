//! Play command - Seat two players and play one or more games

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use crate::{
    board::{Board, GameKind},
    cli::{config::GameArgs, output},
    ports::{CacheKey, CacheStore, TableStore},
    session::{BoardPrinter, Player, PlayerKind, PlayerOptions, ProgressObserver, Session},
};

#[derive(Parser, Debug)]
#[command(about = "Play games between two players")]
pub struct PlayArgs {
    #[command(flatten)]
    pub game: GameArgs,

    /// First player (human, heuristic, random, minimax, minimax-pruned, qlearn)
    #[arg(long = "p1", alias = "player1", default_value = "minimax")]
    pub player1: String,

    /// Second player
    #[arg(long = "p2", alias = "player2", default_value = "heuristic")]
    pub player2: String,

    /// Number of games; the opening move alternates between players
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,

    /// Depth limit for minimax players
    #[arg(long, short = 'd')]
    pub depth: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print every finished game (implied when a human plays)
    #[arg(long, short = 'v', default_value_t = false)]
    pub visualise: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let kinds = [
        args.player1
            .parse::<PlayerKind>()
            .context("Invalid first player")?,
        args.player2
            .parse::<PlayerKind>()
            .context("Invalid second player")?,
    ];

    match args.game.kind() {
        GameKind::TicTacToe => run(args.game.grid_board()?, kinds, &args),
        GameKind::ConnectFour => run(args.game.drop_board()?, kinds, &args),
    }
}

fn run<B: Board>(board: B, kinds: [PlayerKind; 2], args: &PlayArgs) -> Result<()> {
    let store = args.game.store();
    let depth = args.depth.or(args.game.default_search_depth());
    let first = build_player(kinds[0], &board, &store, depth, args.seed)?;
    let first = load_move_cache(first, &board, &store)?;
    let second = build_player(kinds[1], &board, &store, depth, second_seed(args.seed))?;
    let second = load_move_cache(second, &board, &store)?;

    let visualise = args.visualise || first.is_human() || second.is_human();
    info!(
        game = board.game_name(),
        size = %board.size_label(),
        first = %kinds[0],
        second = %kinds[1],
        games = args.games,
        "starting series"
    );

    let mut session = Session::new(board, first, second);
    if visualise {
        session = session.with_observer(Box::new(BoardPrinter::new()));
    } else if args.games > 1 {
        session = session.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = session.play_series(args.games)?;
    save_move_caches(session.board(), session.players(), &store)?;

    output::print_section("Results");
    output::print_kv(
        &format!("Player 1 ({})", kinds[0]),
        &format!("{} wins", result.wins[0]),
    );
    output::print_kv(
        &format!("Player 2 ({})", kinds[1]),
        &format!("{} wins", result.wins[1]),
    );
    output::print_kv("Ties", &result.draws.to_string());
    Ok(())
}

fn build_player<B: Board>(
    kind: PlayerKind,
    board: &B,
    store: &dyn TableStore,
    max_depth: Option<usize>,
    seed: Option<u64>,
) -> Result<Player> {
    let options = PlayerOptions { max_depth, seed };
    Player::build(kind, board, store, &options)
        .with_context(|| format!("Failed to set up {kind} player"))
}

/// The second player draws from a different stream than the first
fn second_seed(seed: Option<u64>) -> Option<u64> {
    seed.map(|seed| seed.wrapping_add(1))
}

/// Seed a minimax player with the decisions stored by earlier runs
fn load_move_cache<B: Board, S: CacheStore>(
    player: Player,
    board: &B,
    store: &S,
) -> Result<Player> {
    let Player::Minimax(searcher) = player else {
        return Ok(player);
    };
    let key = CacheKey::new(board, searcher.config());
    let cache = store
        .load_cache(&key)
        .with_context(|| format!("Failed to load move cache {key}"))?
        .unwrap_or_default();
    info!(%key, entries = cache.len(), "move cache loaded");
    Ok(Player::Minimax(searcher.with_cache(cache)))
}

/// Merge what the minimax players learned into the stored caches
fn save_move_caches<B: Board, S: CacheStore>(
    board: &B,
    players: &[Player; 2],
    store: &S,
) -> Result<()> {
    for player in players {
        let Player::Minimax(searcher) = player else {
            continue;
        };
        let key = CacheKey::new(board, searcher.config());
        let mut cache = store
            .load_cache(&key)
            .with_context(|| format!("Failed to load move cache {key}"))?
            .unwrap_or_default();
        cache.merge(searcher.cache());
        store
            .save_cache(&key, &cache)
            .with_context(|| format!("Failed to save move cache {key}"))?;
        info!(%key, entries = cache.len(), "move cache saved");
    }
    Ok(())
}
