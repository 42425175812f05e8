//! Minimax with optional alpha-beta pruning

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::MoveCache;
use crate::{
    Error, Result,
    board::{Board, Token},
};

/// Score of a win found at depth 0; deeper wins score less
pub const WIN_SCORE: i32 = 10_000;

/// Heuristic evaluations are clamped to this magnitude so they never
/// outrank a forced win or loss
pub const HEURISTIC_BOUND: i32 = WIN_SCORE / 2;

/// Search parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies below the root move after which the heuristic is used
    pub max_depth: usize,
    /// Enable alpha-beta pruning
    pub pruning: bool,
}

impl SearchConfig {
    pub fn new(max_depth: usize, pruning: bool) -> Self {
        Self { max_depth, pruning }
    }

    /// Depth large enough to reach every terminal position of `board`
    pub fn full_depth<B: Board>(board: &B, pruning: bool) -> Self {
        Self::new(board.cells().len(), pruning)
    }
}

/// Minimax move chooser.
///
/// Results are cached per position and mover; the cache is only valid for
/// the configuration the searcher was built with.
#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfig,
    nodes_visited: u64,
    cache: MoveCache,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            nodes_visited: 0,
            cache: MoveCache::new(),
        }
    }

    /// Start from previously computed decisions
    pub fn with_cache(mut self, cache: MoveCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Nodes expanded since creation
    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    pub fn cache(&self) -> &MoveCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Choose the best move for `token`.
    ///
    /// Ties are broken by move enumeration order: the first move reaching the
    /// best score is kept.
    pub fn choose_move<B: Board>(&mut self, board: &mut B, token: Token) -> Result<usize> {
        let state = board.encode_state();
        if let Some(mv) = self.cache.get(&state, token) {
            return Ok(mv);
        }

        let moves = board.remaining_moves();
        if moves.is_empty() {
            return Err(Error::NoValidMoves);
        }

        let opponent = token.opponent();
        let mut best_move = moves[0];
        let mut best_score = i32::MIN;

        for mv in moves {
            board.place(mv, token);
            let score = self.minimax(board, token, opponent, 0, false, best_score, i32::MAX);
            board.remove(mv);

            trace!(mv, score, "root move scored");
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
        }

        self.cache.insert(&state, token, best_move);
        Ok(best_move)
    }

    /// Exact minimax score of every legal move for `token`
    pub fn evaluate_moves<B: Board>(&mut self, board: &mut B, token: Token) -> Vec<(usize, i32)> {
        let opponent = token.opponent();
        let mut scored = Vec::new();
        for mv in board.remaining_moves() {
            board.place(mv, token);
            let score = self.minimax(board, token, opponent, 0, false, i32::MIN, i32::MAX);
            board.remove(mv);
            scored.push((mv, score));
        }
        scored
    }

    /// Score the position from `player`'s perspective.
    ///
    /// `maximizing` is true when `player` is to move. `alpha`/`beta` are only
    /// consulted when pruning is enabled.
    #[allow(clippy::too_many_arguments)]
    fn minimax<B: Board>(
        &mut self,
        board: &mut B,
        player: Token,
        opponent: Token,
        depth: usize,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes_visited += 1;

        if board.check_win(Some(player)) {
            return WIN_SCORE - depth as i32;
        }
        if board.check_win(Some(opponent)) {
            return -WIN_SCORE + depth as i32;
        }

        let moves = board.remaining_moves();
        if moves.is_empty() {
            return 0;
        }

        if depth >= self.config.max_depth {
            return board
                .evaluate_heuristic(player, opponent)
                .clamp(-HEURISTIC_BOUND, HEURISTIC_BOUND);
        }

        if maximizing {
            let mut best = i32::MIN;
            for mv in moves {
                board.place(mv, player);
                let score = self.minimax(board, player, opponent, depth + 1, false, alpha, beta);
                board.remove(mv);

                best = best.max(score);
                if self.config.pruning {
                    alpha = alpha.max(best);
                    if beta <= alpha {
                        break;
                    }
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in moves {
                board.place(mv, opponent);
                let score = self.minimax(board, player, opponent, depth + 1, true, alpha, beta);
                board.remove(mv);

                best = best.min(score);
                if self.config.pruning {
                    beta = beta.min(best);
                    if beta <= alpha {
                        break;
                    }
                }
            }
            best
        }
    }
}
