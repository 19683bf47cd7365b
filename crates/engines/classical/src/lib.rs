//! Classical Chess Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over a material and
//! piece-square evaluation.

mod eval;
mod search;

use chess_core::{Color, Engine, Game, SearchResult};

pub use eval::{evaluate, piece_score, PIECE_VALUES};
pub use search::{pick_best_move, SearchConfig, SearchOutcome, Searcher, MATE_SCORE};

/// Classical chess engine.
///
/// This engine uses:
/// - Minimax with alpha-beta pruning (can be switched off)
/// - Material plus piece-square evaluation
/// - Scores oriented toward a fixed positive side (white by default)
#[derive(Debug, Clone)]
pub struct ClassicalEngine {
    /// Scores are positive when good for this side
    positive_side: Color,
    pruning: bool,
    /// Node counter for statistics
    nodes: u64,
}

impl ClassicalEngine {
    pub fn new() -> Self {
        Self {
            positive_side: Color::White,
            pruning: true,
            nodes: 0,
        }
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn with_positive_side(mut self, side: Color) -> Self {
        self.positive_side = side;
        self
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Default for ClassicalEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for ClassicalEngine {
    /// Plays for whichever side is to move.
    fn search(&mut self, game: &mut Game, depth: u8) -> SearchResult {
        let cfg = SearchConfig {
            positive_side: self.positive_side,
            engine_side: game.side_to_move(),
            pruning: self.pruning,
        };
        let outcome = Searcher::new(cfg).best_move(game, depth);
        self.nodes = outcome.nodes;

        SearchResult {
            best_move: outcome.best_move.map(|(mv, _)| mv),
            score: outcome.best_move.map(|(_, s)| s).unwrap_or(0),
            depth: depth.max(1),
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Classical v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }

    fn set_option(&mut self, name: &str, value: &str) -> bool {
        if !name.eq_ignore_ascii_case("pruning") {
            return false;
        }
        match value.to_ascii_lowercase().as_str() {
            "true" => self.pruning = true,
            "false" => self.pruning = false,
            _ => return false,
        }
        true
    }
}
