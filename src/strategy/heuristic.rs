//! Three-tier greedy policy with one ply of lookahead

use rand::{Rng, seq::IndexedRandom};

use crate::{
    Error, Result,
    board::{Board, Token},
};

/// First legal move (in enumeration order) that wins immediately for `token`
pub fn winning_move<B: Board>(board: &mut B, token: Token) -> Option<usize> {
    board.remaining_moves().into_iter().find(|&mv| {
        board.place(mv, token);
        let wins = board.check_win(Some(token));
        board.remove(mv);
        wins
    })
}

/// Every legal move that wins immediately for `token`
fn winning_moves<B: Board>(board: &mut B, token: Token) -> Vec<usize> {
    board
        .remaining_moves()
        .into_iter()
        .filter(|&mv| {
            board.place(mv, token);
            let wins = board.check_win(Some(token));
            board.remove(mv);
            wins
        })
        .collect()
}

/// Playing `mv` leaves the mover a single threat whose forced block gives
/// the opponent two immediate wins at once
fn block_creates_fork<B: Board>(board: &mut B, mv: usize, mover: Token) -> bool {
    board.place(mv, mover);
    let fork = match winning_moves(board, mover).as_slice() {
        &[block] => {
            board.place(block, mover.opponent());
            let replies = winning_moves(board, mover.opponent()).len();
            board.remove(block);
            replies >= 2
        }
        _ => false,
    };
    board.remove(mv);
    fork
}

/// Uniformly random legal move
pub fn random_move<B: Board, R: Rng + ?Sized>(board: &B, rng: &mut R) -> Result<usize> {
    board
        .remaining_moves()
        .choose(rng)
        .copied()
        .ok_or(Error::NoValidMoves)
}

/// Choose a move for `mover`:
///
/// 1. play an immediate win;
/// 2. else block the opponent's immediate win;
/// 3. else maximise the number of alignments holding exactly `L - 1`, then
///    `L - 2`, of the mover's tokens and blanks otherwise, as long as the
///    best move improves on the current count (ties broken at random);
/// 4. else play a random legal move.
///
/// Tiers 3 and 4 skip moves whose forced block hands the opponent a fork,
/// unless every legal move does.
pub fn heuristic_move<B: Board, R: Rng + ?Sized>(
    board: &mut B,
    mover: Token,
    rng: &mut R,
) -> Result<usize> {
    let moves = board.remaining_moves();
    if moves.is_empty() {
        return Err(Error::NoValidMoves);
    }

    if let Some(mv) = winning_move(board, mover) {
        return Ok(mv);
    }
    if let Some(mv) = winning_move(board, mover.opponent()) {
        return Ok(mv);
    }

    let safe: Vec<usize> = moves
        .iter()
        .copied()
        .filter(|&mv| !block_creates_fork(board, mv, mover))
        .collect();
    let candidates = if safe.is_empty() { moves } else { safe };

    let length = board.win_length();
    for short_by in [1, 2] {
        if length <= short_by {
            continue;
        }
        let n = length - short_by;
        let current = board.count_runs(mover, n);

        let scored: Vec<(usize, usize)> = candidates
            .iter()
            .map(|&mv| {
                board.place(mv, mover);
                let runs = board.count_runs(mover, n);
                board.remove(mv);
                (mv, runs)
            })
            .collect();

        let best = scored.iter().map(|&(_, runs)| runs).max().unwrap_or(0);
        if best > current {
            let tied: Vec<usize> = scored
                .iter()
                .filter(|&&(_, runs)| runs == best)
                .map(|&(mv, _)| mv)
                .collect();
            if let Some(&mv) = tied.choose(rng) {
                return Ok(mv);
            }
        }
    }

    candidates.choose(rng).copied().ok_or(Error::NoValidMoves)
}
