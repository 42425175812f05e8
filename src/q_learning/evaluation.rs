//! Greedy, read-only evaluation of a learned table

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::QTable;
use crate::{
    Error, Result,
    board::{Board, GameOutcome, Seat, Token},
    strategy::OpponentPolicy,
};

/// Win/draw/loss tally from the table's point of view
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
}

impl EvaluationResult {
    pub fn new(total_games: usize, wins: usize, draws: usize, losses: usize) -> Self {
        let rate = |count: usize| {
            if total_games == 0 {
                0.0
            } else {
                count as f64 / total_games as f64
            }
        };
        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
        }
    }
}

/// Play `games` games with the table choosing greedily for `seat` against
/// `opponent`. The table is never modified; unseen states fall back to a
/// random choice among all legal moves.
pub fn evaluate_table<B: Board, R: Rng + ?Sized>(
    board: &mut B,
    table: &QTable,
    seat: Seat,
    opponent: OpponentPolicy,
    games: usize,
    rng: &mut R,
) -> Result<EvaluationResult> {
    let agent = seat.token();
    let (mut wins, mut draws, mut losses) = (0, 0, 0);

    for _ in 0..games {
        board.reset();
        let mut to_move = Token::FIRST;
        while !board.is_terminal() {
            let mv = if to_move == agent {
                let state = board.encode_state();
                table
                    .greedy_move(&state, &board.remaining_moves(), rng)
                    .ok_or(Error::NoValidMoves)?
            } else {
                opponent.choose(board, to_move, rng)?
            };
            board.place(mv, to_move);
            to_move = to_move.opponent();
        }

        match board.outcome() {
            Some(GameOutcome::Win(token)) if token == agent => wins += 1,
            Some(GameOutcome::Win(_)) => losses += 1,
            Some(GameOutcome::Draw) | None => draws += 1,
        }
    }
    board.reset();

    Ok(EvaluationResult::new(games, wins, draws, losses))
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::board::GridBoard;

    #[test]
    fn test_rates() {
        let result = EvaluationResult::new(4, 1, 2, 1);
        assert_eq!(result.win_rate, 0.25);
        assert_eq!(result.draw_rate, 0.5);
        assert_eq!(result.loss_rate, 0.25);
        assert_eq!(EvaluationResult::new(0, 0, 0, 0).loss_rate, 0.0);
    }

    #[test]
    fn test_empty_table_still_plays_every_game() {
        let mut board = GridBoard::tic_tac_toe();
        let mut rng = StdRng::seed_from_u64(3);
        let table = QTable::new();
        let result = evaluate_table(
            &mut board,
            &table,
            Seat::Second,
            OpponentPolicy::Random,
            25,
            &mut rng,
        )
        .unwrap();
        assert_eq!(result.wins + result.draws + result.losses, 25);
        assert!(table.is_empty());
        assert_eq!(board.occupied_count(), 0);
    }
}
