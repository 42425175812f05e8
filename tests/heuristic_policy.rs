//! Priority order of the heuristic policy

use boardgames::{
    board::{Board, DropBoard, GridBoard, Token},
    strategy::{heuristic_move, winning_move},
};
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

#[test]
fn test_win_is_preferred_over_block() {
    // X wins at 5, O would win at 7
    let mut board = GridBoard::parse("...XX.O.O", 3).unwrap();
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        assert_eq!(heuristic_move(&mut board, Token::X, &mut rng).unwrap(), 5);
    }
}

/// Across random positions: a win when one exists, else the first block
fn check_priorities<B: Board>(template: B, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..200 {
        let mut board = template.clone();
        let mut token = Token::FIRST;
        while !board.is_terminal() {
            let expected = winning_move(&mut board, token)
                .or_else(|| winning_move(&mut board, token.opponent()));
            let mv = heuristic_move(&mut board, token, &mut rng).unwrap();
            assert!(board.is_legal(mv));
            if let Some(expected) = expected {
                assert_eq!(mv, expected, "position {}", board.encode_state());
            }

            // Mix in random moves so the heuristic meets varied positions
            let &played = [mv, *board.remaining_moves().choose(&mut rng).unwrap()]
                .choose(&mut rng)
                .unwrap();
            board.place(played, token);
            token = token.opponent();
        }
    }
}

#[test]
fn test_priorities_on_grid() {
    check_priorities(GridBoard::tic_tac_toe(), 1);
    check_priorities(GridBoard::new(4, 3).unwrap(), 2);
}

#[test]
fn test_priorities_on_drop_board() {
    check_priorities(DropBoard::connect_four(), 3);
}

#[test]
fn test_extends_runs_when_nothing_is_urgent() {
    // Two X tokens stacked in the centre column; nothing to win or block
    let mut board = DropBoard::connect_four();
    board.place(3, Token::X);
    board.place(3, Token::X);
    board.place(0, Token::O);
    board.place(6, Token::O);
    let mut rng = StdRng::seed_from_u64(4);
    let mv = heuristic_move(&mut board, Token::X, &mut rng).unwrap();
    let before = board.count_runs(Token::X, 3);
    board.place(mv, Token::X);
    assert!(board.count_runs(Token::X, 3) > before);
}
