//! Reversible game state: turn, castling rights, history and the terminal flag.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    attacks::{is_square_attacked, king_attacked, king_attacked_with},
    board::{Board, CastlingRights},
    error::ChessError,
    movegen::{pseudo_legal_moves, pseudo_legal_moves_into},
    types::*,
};

/// One applied move, holding everything `undo` needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// Piece standing on `to` afterwards (a queen after promotion).
    pub piece: Piece,
    /// Piece that stood on `from` before the move.
    pub original_piece: Piece,
    pub captured: Option<Piece>,
    pub castle: Option<CastleSide>,
    pub prev_castling: CastlingRights,
}

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    history: Vec<MoveRecord>,
    game_over: bool,
    /// Fullmove number and mover of the position the history starts from.
    start_fullmove: u32,
    start_side: Color,
}

/// Reusable buffers for one legality pass.
#[derive(Default)]
struct Scratch {
    candidates: Vec<Move>,
    attacks: Vec<Move>,
}

/// Appends the legal moves of `side`'s piece on `from` to `out`.
///
/// Each candidate is played on `board` as a single-ply placement, the king is
/// tested, and the grid is put back before the next candidate. `board` is
/// unchanged on return.
fn legal_moves_on(
    board: &mut Board,
    castling: &CastlingRights,
    side: Color,
    from: Square,
    scratch: &mut Scratch,
    out: &mut Vec<Move>,
) {
    let pc = match board.piece_at(from) {
        Some(p) if p.color == side => p,
        _ => return,
    };

    scratch.candidates.clear();
    pseudo_legal_moves_into(board, castling, from, &mut scratch.candidates);
    for &mv in &scratch.candidates {
        let saved = board.piece_at(mv.to);
        board.set_piece(mv.to, Some(pc));
        board.set_piece(mv.from, None);
        let exposed = king_attacked_with(board, side, &mut scratch.attacks);
        board.set_piece(mv.from, Some(pc));
        board.set_piece(mv.to, saved);
        if !exposed {
            out.push(mv);
        }
    }
}

impl Game {
    pub fn new() -> Self {
        Game {
            board: Board::startpos(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            history: Vec::new(),
            game_over: false,
            start_fullmove: 1,
            start_side: Color::White,
        }
    }

    /// Load a position from FEN. The en-passant and clock fields are accepted
    /// but ignored. The terminal flag is computed for the loaded position.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(ChessError::InvalidFen(format!(
                "expected at least 2 fields, found {}",
                parts.len()
            )));
        }

        let board = Board::from_fen_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(ChessError::InvalidFen(format!(
                    "invalid side to move '{other}'"
                )))
            }
        };

        let mut castling = CastlingRights::NONE;
        let castle_part = parts.get(2).copied().unwrap_or("-");
        if castle_part != "-" {
            for c in castle_part.chars() {
                match c {
                    'K' => castling.wk = true,
                    'Q' => castling.wq = true,
                    'k' => castling.bk = true,
                    'q' => castling.bq = true,
                    _ => {
                        return Err(ChessError::InvalidFen(format!(
                            "invalid castling char '{c}'"
                        )))
                    }
                }
            }
        }

        // Halfmove clock (parts[4]) is accepted but not tracked
        let start_fullmove = match parts.get(5) {
            Some(txt) => txt
                .parse::<u32>()
                .map_err(|_| ChessError::InvalidFen(format!("invalid fullmove number '{txt}'")))?
                .max(1),
            None => 1,
        };

        let mut game = Game {
            board,
            side_to_move,
            castling,
            history: Vec::new(),
            game_over: false,
            start_fullmove,
            start_side: side_to_move,
        };
        game.game_over = !game.has_legal_move(side_to_move);
        Ok(game)
    }

    pub fn to_fen(&self) -> String {
        let mut castle = String::new();
        for (flag, ch) in [
            (self.castling.wk, 'K'),
            (self.castling.wq, 'Q'),
            (self.castling.bk, 'k'),
            (self.castling.bq, 'q'),
        ] {
            if flag {
                castle.push(ch);
            }
        }
        if castle.is_empty() {
            castle.push('-');
        }
        let stm = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!(
            "{} {} {} - 0 {}",
            self.board.to_fen_placement(),
            stm,
            castle,
            self.fullmove_number()
        )
    }

    /// Starts at the loaded position's number and grows after each black move.
    pub fn fullmove_number(&self) -> u32 {
        let plies = self.history.len() as u32;
        let black_moves = match self.start_side {
            Color::White => plies / 2,
            Color::Black => (plies + 1) / 2,
        };
        self.start_fullmove + black_moves
    }

    /// Back to the standard starting position.
    pub fn reset(&mut self) {
        *self = Game::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn is_terminal(&self) -> bool {
        self.game_over
    }

    /// Pseudo-legal moves of whatever stands on `from`.
    pub fn pseudo_legal_moves(&self, from: Square) -> Vec<Move> {
        pseudo_legal_moves(&self.board, &self.castling, from)
    }

    /// Legal moves of the side-to-move's piece on `from`.
    pub fn legal_moves(&self, from: Square) -> Vec<Move> {
        if self.game_over {
            return Vec::new();
        }
        let mut board = self.board.clone();
        let mut out = Vec::with_capacity(28);
        legal_moves_on(
            &mut board,
            &self.castling,
            self.side_to_move,
            from,
            &mut Scratch::default(),
            &mut out,
        );
        out
    }

    /// Legal moves for every piece of `side`, in row-major square order.
    /// Empty unless `side` is to move.
    pub fn all_legal_moves(&self, side: Color) -> Vec<Move> {
        let mut out = Vec::with_capacity(48);
        if self.game_over || side != self.side_to_move {
            return out;
        }
        let mut board = self.board.clone();
        let mut scratch = Scratch::default();
        for from in Square::all() {
            legal_moves_on(&mut board, &self.castling, side, from, &mut scratch, &mut out);
        }
        out
    }

    /// In-place form of [`Game::all_legal_moves`]: clears `out` and fills it,
    /// simulating on the live board. The game is unchanged on return.
    pub fn legal_moves_into(&mut self, side: Color, out: &mut Vec<Move>) {
        out.clear();
        if self.game_over || side != self.side_to_move {
            return;
        }
        let mut scratch = Scratch::default();
        for from in Square::all() {
            legal_moves_on(&mut self.board, &self.castling, side, from, &mut scratch, out);
        }
    }

    /// Does `side` have at least one legal move? Stops at the first one.
    fn has_legal_move(&mut self, side: Color) -> bool {
        let mut scratch = Scratch::default();
        let mut found = Vec::with_capacity(28);
        for from in Square::all() {
            legal_moves_on(&mut self.board, &self.castling, side, from, &mut scratch, &mut found);
            if !found.is_empty() {
                return true;
            }
        }
        false
    }

    /// Apply a move given by its squares; `false` (state untouched) if it is
    /// not currently legal.
    pub fn apply(&mut self, from: Square, to: Square) -> bool {
        self.try_apply(from, to).is_ok()
    }

    pub fn try_apply(&mut self, from: Square, to: Square) -> Result<&MoveRecord, ChessError> {
        if self.game_over {
            warn!(%from, %to, "move attempted after the game ended");
            return Err(ChessError::GameOver);
        }
        let mut candidates = Vec::with_capacity(28);
        legal_moves_on(
            &mut self.board,
            &self.castling,
            self.side_to_move,
            from,
            &mut Scratch::default(),
            &mut candidates,
        );
        let mv = match candidates.into_iter().find(|m| m.to == to) {
            Some(m) => m,
            None => {
                warn!(%from, %to, "illegal move attempted");
                return Err(ChessError::IllegalMove { from, to });
            }
        };
        let piece = self
            .board
            .piece_at(from)
            .ok_or(ChessError::IllegalMove { from, to })?;
        Ok(self.play(mv, piece))
    }

    fn play(&mut self, mv: Move, piece: Piece) -> &MoveRecord {
        let Move { from, to, castle } = mv;
        let captured = self.board.piece_at(to);
        let prev_castling = self.castling;

        self.board.set_piece(to, Some(piece));
        self.board.set_piece(from, None);

        if let Some(side) = castle {
            let (rf, rt) = side.rook_cols();
            let rook_from = Square::new(to.row, rf);
            let rook_to = Square::new(to.row, rt);
            let rook = self.board.piece_at(rook_from);
            self.board.set_piece(rook_to, rook);
            self.board.set_piece(rook_from, None);
        }

        // Auto-queen
        let mut landed = piece;
        if piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row() {
            landed = Piece::new(piece.color, PieceKind::Queen);
            self.board.set_piece(to, Some(landed));
        }

        if piece.kind == PieceKind::King {
            self.castling.revoke_all(piece.color);
        }
        if piece.kind == PieceKind::Rook {
            self.castling.revoke_corner(from);
        }
        if let Some(cp) = captured {
            if cp.kind == PieceKind::Rook {
                self.castling.revoke_corner(to);
            }
        }

        self.history.push(MoveRecord {
            from,
            to,
            piece: landed,
            original_piece: piece,
            captured,
            castle,
            prev_castling,
        });

        self.side_to_move = self.side_to_move.other();
        if !self.has_legal_move(self.side_to_move) {
            self.game_over = true;
            debug!(side = %self.side_to_move, "no legal replies, game over");
        }

        debug!(%mv, "move applied");
        // Just pushed above.
        &self.history[self.history.len() - 1]
    }

    /// Take back the last move. Does nothing on an empty history.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let rec = self.history.pop()?;

        self.board.set_piece(rec.from, Some(rec.original_piece));
        self.board.set_piece(rec.to, rec.captured);

        if let Some(side) = rec.castle {
            let (rf, rt) = side.rook_cols();
            let rook_from = Square::new(rec.to.row, rf);
            let rook_to = Square::new(rec.to.row, rt);
            let rook = self.board.piece_at(rook_to);
            self.board.set_piece(rook_from, rook);
            self.board.set_piece(rook_to, None);
        }

        self.castling = rec.prev_castling;
        self.side_to_move = self.side_to_move.other();
        self.game_over = false;
        Some(rec)
    }

    /// Is `side`'s king attacked? A missing king counts as in check.
    pub fn is_in_check(&self, side: Color) -> bool {
        king_attacked(&self.board, side)
    }

    pub fn is_square_attacked(&self, target: Square, by: Color) -> bool {
        is_square_attacked(&self.board, target, by)
    }

    pub fn is_checkmate(&self) -> bool {
        self.game_over && self.is_in_check(self.side_to_move)
    }

    pub fn is_stalemate(&self) -> bool {
        self.game_over && !self.is_in_check(self.side_to_move)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if !self.game_over {
            return None;
        }
        if self.is_in_check(self.side_to_move) {
            Some(Outcome::Checkmate {
                winner: self.side_to_move.other(),
            })
        } else {
            Some(Outcome::Stalemate)
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
