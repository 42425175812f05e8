//! Persisting learned tables and playing with them

use boardgames::{
    adapters::{InMemoryStore, MsgPackStore},
    board::{GridBoard, Seat},
    ports::{TableKey, TableStore},
    q_learning::{QTrainer, SeatTables, TrainerConfig},
    session::{Player, PlayerKind, PlayerOptions, Session},
};
use rand::{SeedableRng, rngs::StdRng};
use tempfile::TempDir;

fn train_both_seats<S: TableStore>(store: &S) {
    let config = TrainerConfig {
        batch_size: 200,
        max_batches: 2,
        eval_games: 20,
        seed: Some(12),
        ..TrainerConfig::default()
    };
    for seat in Seat::ALL {
        let mut trainer = QTrainer::new(GridBoard::tic_tac_toe(), seat, config.clone()).unwrap();
        let report = trainer.train().unwrap();
        let saved = trainer.saved_table(&report);
        assert_eq!(saved.metadata.episodes_trained, report.episodes);
        store.save(&saved.key(), &saved).unwrap();
    }
}

#[test]
fn test_msgpack_store_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = MsgPackStore::new(temp_dir.path());
    train_both_seats(&store);

    let board = GridBoard::tic_tac_toe();
    for seat in Seat::ALL {
        let key = TableKey::new(&board, seat);
        assert!(store.path_for(&key).exists());
        let saved = store.load(&key).unwrap().unwrap();
        assert_eq!(saved.seat, seat);
        assert_eq!(saved.metadata.opponent, "mixed");
        assert!(!saved.into_table().unwrap().is_empty());
    }
}

#[test]
fn test_learned_players_play_a_series() {
    let store = InMemoryStore::new();
    train_both_seats(&store);
    assert_eq!(store.count(), 2);

    let board = GridBoard::tic_tac_toe();
    let tables = SeatTables::load(&store, &board).unwrap();
    assert!(!tables.for_seat(Seat::First).is_empty());

    let options = PlayerOptions {
        max_depth: None,
        seed: Some(4),
    };
    let learned = Player::build(PlayerKind::QLearned, &board, &store, &options).unwrap();
    let mut session = Session::new(board, learned, Player::Random(StdRng::seed_from_u64(5)));
    let result = session.play_series(10).unwrap();
    assert_eq!(result.games, 10);
    assert_eq!(result.wins[0] + result.wins[1] + result.draws, 10);
}
