//! Minimax behaviour over many positions

use boardgames::{
    board::{Board, DropBoard, GridBoard, Token},
    search::{SearchConfig, Searcher},
    strategy::winning_move,
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

/// Random non-terminal position and the token to move
fn random_position<B: Board>(mut board: B, max_plies: usize, rng: &mut StdRng) -> (B, Token) {
    loop {
        board.reset();
        let plies = rng.random_range(0..=max_plies);
        let mut token = Token::FIRST;
        for _ in 0..plies {
            if board.is_terminal() {
                break;
            }
            let &mv = board.remaining_moves().choose(rng).unwrap();
            board.place(mv, token);
            token = token.opponent();
        }
        if !board.is_terminal() {
            return (board, token);
        }
    }
}

#[test]
fn test_pruning_never_changes_the_move() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..60 {
        let (mut board, token) = random_position(GridBoard::tic_tac_toe(), 6, &mut rng);
        let mut plain = Searcher::new(SearchConfig::full_depth(&board, false));
        let mut pruned = Searcher::new(SearchConfig::full_depth(&board, true));
        assert_eq!(
            plain.choose_move(&mut board, token).unwrap(),
            pruned.choose_move(&mut board, token).unwrap(),
            "position {}",
            board.encode_state()
        );
    }
}

#[test]
fn test_depth_limited_pruning_matches_plain_search() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..10 {
        let (mut board, token) = random_position(DropBoard::connect_four(), 12, &mut rng);
        let mut plain = Searcher::new(SearchConfig::new(2, false));
        let mut pruned = Searcher::new(SearchConfig::new(2, true));
        assert_eq!(
            plain.choose_move(&mut board, token).unwrap(),
            pruned.choose_move(&mut board, token).unwrap(),
            "position {}",
            board.encode_state()
        );
    }
}

#[test]
fn test_takes_the_winning_cell() {
    for (encoding, token, cell) in [
        ("XX.OO....", Token::X, 2),
        ("O..XO.X..", Token::O, 8),
        ("X.OXO....", Token::X, 6),
    ] {
        let mut board = GridBoard::parse(encoding, 3).unwrap();
        let mut searcher = Searcher::new(SearchConfig::full_depth(&board, true));
        assert_eq!(searcher.choose_move(&mut board, token).unwrap(), cell, "{encoding}");
    }
}

#[test]
fn test_never_hands_over_an_immediate_win() {
    let mut rng = StdRng::seed_from_u64(29);
    for _ in 0..60 {
        let (mut board, token) = random_position(GridBoard::tic_tac_toe(), 5, &mut rng);
        if winning_move(&mut board, token).is_some() {
            continue;
        }

        let safe_exists = board.remaining_moves().into_iter().any(|mv| {
            board.place(mv, token);
            let safe = board.is_terminal() || winning_move(&mut board, token.opponent()).is_none();
            board.remove(mv);
            safe
        });
        if !safe_exists {
            continue;
        }

        let mut searcher = Searcher::new(SearchConfig::full_depth(&board, true));
        let mv = searcher.choose_move(&mut board, token).unwrap();
        board.place(mv, token);
        assert!(
            board.is_terminal() || winning_move(&mut board, token.opponent()).is_none(),
            "move {mv} hands over a win in {}",
            board.encode_state()
        );
    }
}
