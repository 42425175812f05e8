//! Playing games and series between two seated players

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Player;
use crate::{
    Error, Result,
    board::{Board, GameOutcome, Token},
    ports::Observer,
};

/// Moves and result of one finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Index (0 or 1) of the player that held the opening token
    pub opener: usize,
    pub moves: Vec<usize>,
    pub outcome: GameOutcome,
}

impl GameRecord {
    /// Token held by player `index` in this game
    pub fn token_of(&self, index: usize) -> Token {
        if index == self.opener {
            Token::FIRST
        } else {
            Token::FIRST.opponent()
        }
    }

    /// Index of the winning player, `None` for a draw
    pub fn winner(&self) -> Option<usize> {
        match self.outcome {
            GameOutcome::Win(token) => (0..2).find(|&index| self.token_of(index) == token),
            GameOutcome::Draw => None,
        }
    }
}

/// Tally of a series, per player index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesResult {
    pub games: usize,
    pub wins: [usize; 2],
    pub draws: usize,
}

impl SeriesResult {
    pub fn record(&mut self, game: &GameRecord) {
        self.games += 1;
        match game.winner() {
            Some(index) => self.wins[index] += 1,
            None => self.draws += 1,
        }
    }
}

/// Two players sharing one board
pub struct Session<B: Board> {
    board: B,
    players: [Player; 2],
    observers: Vec<Box<dyn Observer>>,
}

impl<B: Board> Session<B> {
    pub fn new(board: B, first: Player, second: Player) -> Self {
        Self {
            board,
            players: [first, second],
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Play one game from an empty board.
    ///
    /// Player 0 holds the opening token unless `swap_sides` is set.
    pub fn play_game(&mut self, swap_sides: bool) -> Result<GameRecord> {
        self.board.reset();
        let opener = usize::from(swap_sides);
        let mut token = Token::FIRST;
        let mut moves = Vec::new();

        let outcome = loop {
            if let Some(outcome) = self.board.outcome() {
                break outcome;
            }
            let index = if token == Token::FIRST {
                opener
            } else {
                1 - opener
            };
            let mv = self.players[index].select_move(&mut self.board, token)?;
            if !self.board.is_legal(mv) {
                return Err(Error::IllegalMove {
                    position: mv,
                    reason: format!(
                        "{} player chose an unavailable move",
                        self.players[index].kind()
                    ),
                });
            }
            self.board.place(mv, token);
            moves.push(mv);
            token = token.opponent();
        };

        debug!(?outcome, plies = moves.len(), opener, "game finished");
        Ok(GameRecord {
            opener,
            moves,
            outcome,
        })
    }

    /// Play `games` games; the opening token passes to player 1 on every
    /// odd-numbered game
    pub fn play_series(&mut self, games: usize) -> Result<SeriesResult> {
        for observer in &mut self.observers {
            observer.on_start(games)?;
        }

        let mut result = SeriesResult::default();
        for game in 0..games {
            let record = self.play_game(game % 2 == 1)?;
            result.record(&record);

            let rendered = self.board.render();
            for observer in &mut self.observers {
                observer.on_game_end(game + 1, record.outcome, &rendered)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_end()?;
        }
        debug!(?result, "series finished");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        adapters::ScriptedInput,
        board::{GridBoard, Seat},
        search::{SearchConfig, Searcher},
    };

    #[test]
    fn test_record_winner_follows_opener() {
        let record = GameRecord {
            opener: 1,
            moves: vec![],
            outcome: GameOutcome::Win(Token::X),
        };
        assert_eq!(record.winner(), Some(1));
        assert_eq!(record.token_of(0), Seat::Second.token());
    }

    #[test]
    fn test_scripted_human_loses_to_search() {
        let board = GridBoard::tic_tac_toe();
        // The human opens in a corner and never covers the 2-4-6 diagonal
        let human = Player::Human(Box::new(ScriptedInput::new(["1", "2", "4", "8", "6"])));
        let search = Player::Minimax(Searcher::new(SearchConfig::full_depth(&board, true)));
        let mut session = Session::new(board, human, search);

        let record = session.play_game(false).unwrap();
        assert_ne!(record.winner(), Some(0));
        assert!(session.board().is_terminal());
    }

    #[test]
    fn test_series_alternates_opener() {
        let board = GridBoard::tic_tac_toe();
        let mut session = Session::new(
            board,
            Player::Random(StdRng::seed_from_u64(1)),
            Player::Random(StdRng::seed_from_u64(2)),
        );
        let result = session.play_series(6).unwrap();
        assert_eq!(result.games, 6);
        assert_eq!(result.wins[0] + result.wins[1] + result.draws, 6);
    }
}
