pub mod attacks;
pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod types;
pub mod uci;

// Re-export core game logic (not engine-specific)
pub use attacks::*;
pub use board::*;
pub use error::ChessError;
pub use game::*;
pub use movegen::*;
pub use perft::perft;
pub use types::*;
pub use uci::*;

// =============================================================================
// Engine trait, implemented by move-choosing engines
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Evaluation of the chosen line, positive favoring the evaluator's positive side
    pub score: i32,
    /// Search depth in plies
    pub depth: u8,
    /// Number of nodes searched
    pub nodes: u64,
}

/// Trait that all chess engines must implement.
///
/// The engine borrows the live game for the duration of one search and must
/// hand it back exactly as it found it.
pub trait Engine: Send {
    /// Pick a move for the side to move, searching `depth` plies.
    fn search(&mut self, game: &mut Game, depth: u8) -> SearchResult;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    /// Returns the engine's author for UCI identification
    fn author(&self) -> &str {
        "ML-chess"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}

    /// Optional: Set a UCI option. Returns true if the option was recognized.
    fn set_option(&mut self, _name: &str, _value: &str) -> bool {
        false
    }
}
