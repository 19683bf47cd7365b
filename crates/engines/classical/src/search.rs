//! Fixed-depth minimax search with optional alpha-beta pruning

use std::time::Instant;

use chess_core::{Color, Game, Move};
use tracing::debug;

use crate::eval::evaluate;

/// Score of a checkmate, well above any material total.
pub const MATE_SCORE: i32 = 1_000_000;

/// Initial search window bound.
const INFINITY: i32 = 10_000_000;

/// Which side the scores favor and which side the root plays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Scores are positive when good for this side
    pub positive_side: Color,
    /// The side the root picks a move for
    pub engine_side: Color,
    /// Alpha-beta cutoffs; off means plain minimax
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            positive_side: Color::White,
            engine_side: Color::Black,
            pruning: true,
        }
    }
}

/// Result from pick_best_move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best move found with its score (None if the engine side has no move)
    pub best_move: Option<(Move, i32)>,
    /// Number of minimax calls made
    pub nodes: u64,
}

/// A search bound to one `SearchConfig`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Searcher {
    config: SearchConfig,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn best_move(&self, game: &mut Game, depth: u8) -> SearchOutcome {
        pick_best_move(game, depth, &self.config)
    }
}

/// Searches the position and returns the best move for `cfg.engine_side`.
///
/// # Arguments
/// * `game` - The game to search; restored to its prior state on return
/// * `depth` - Search depth in plies (0 is treated as 1)
/// * `cfg` - Score orientation, root side and pruning switch
///
/// # Returns
/// `SearchOutcome` with the chosen move and the node count. Ties keep the
/// earliest move in generation order.
pub fn pick_best_move(game: &mut Game, depth: u8, cfg: &SearchConfig) -> SearchOutcome {
    let depth = depth.max(1);
    let started = Instant::now();
    let mut nodes = 0u64;

    let mut moves = Vec::with_capacity(48);
    game.legal_moves_into(cfg.engine_side, &mut moves);
    let maximizing = cfg.engine_side == cfg.positive_side;

    let mut best: Option<(Move, i32)> = None;

    for mv in moves {
        if !game.apply(mv.from, mv.to) {
            continue;
        }
        let score = minimax(game, depth - 1, -INFINITY, INFINITY, cfg, &mut nodes);
        game.undo();

        let better = match best {
            None => true,
            Some((_, b)) if maximizing => score > b,
            Some((_, b)) => score < b,
        };
        if better {
            best = Some((mv, score));
        }
    }

    debug!(
        depth,
        nodes,
        elapsed_ms = started.elapsed().as_millis() as u64,
        best = ?best.map(|(mv, s)| (mv.to_string(), s)),
        "search finished"
    );

    SearchOutcome {
        best_move: best,
        nodes,
    }
}

/// Recursive minimax. The side to move maximizes when it is the positive side.
fn minimax(
    game: &mut Game,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    cfg: &SearchConfig,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;

    if depth == 0 {
        return evaluate(game.board(), cfg.positive_side);
    }

    let side = game.side_to_move();
    let mut moves = Vec::with_capacity(48);
    game.legal_moves_into(side, &mut moves);

    if moves.is_empty() {
        if game.is_in_check(side) {
            // Checkmate: the side not to move wins
            return if side == cfg.positive_side {
                -MATE_SCORE
            } else {
                MATE_SCORE
            };
        }
        return 0; // Stalemate
    }

    if side == cfg.positive_side {
        let mut best = -INFINITY;
        for mv in moves {
            if !game.apply(mv.from, mv.to) {
                continue;
            }
            let score = minimax(game, depth - 1, alpha, beta, cfg, nodes);
            game.undo();

            best = best.max(score);
            alpha = alpha.max(score);
            if cfg.pruning && beta <= alpha {
                break; // Beta cutoff
            }
        }
        best
    } else {
        let mut best = INFINITY;
        for mv in moves {
            if !game.apply(mv.from, mv.to) {
                continue;
            }
            let score = minimax(game, depth - 1, alpha, beta, cfg, nodes);
            game.undo();

            best = best.min(score);
            beta = beta.min(score);
            if cfg.pruning && beta <= alpha {
                break; // Alpha cutoff
            }
        }
        best
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
