//! Pseudo-legal move generation.
//!
//! Two layers: [`piece_moves`] covers the plain movement patterns and never
//! looks at attacks; [`castling_moves`] adds the king's castling candidates and
//! is the only generator that consults the attack detector.

use crate::{attacks::is_square_attacked_with, board::Board, board::CastlingRights, types::*};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// All pseudo-legal moves of the piece on `from`, castling included.
pub fn pseudo_legal_moves(board: &Board, castling: &CastlingRights, from: Square) -> Vec<Move> {
    let mut out = Vec::with_capacity(28);
    pseudo_legal_moves_into(board, castling, from, &mut out);
    out
}

/// Appends the pseudo-legal moves of the piece on `from` to `out`.
pub fn pseudo_legal_moves_into(
    board: &Board,
    castling: &CastlingRights,
    from: Square,
    out: &mut Vec<Move>,
) {
    piece_moves_into(board, from, out);
    if let Some(pc) = board.piece_at(from) {
        if pc.kind == PieceKind::King {
            castling_moves_into(board, castling, from, pc.color, out);
        }
    }
}

/// Movement-pattern moves of the piece on `from`, without castling.
pub fn piece_moves(board: &Board, from: Square) -> Vec<Move> {
    let mut out = Vec::with_capacity(28);
    piece_moves_into(board, from, &mut out);
    out
}

pub fn piece_moves_into(board: &Board, from: Square, out: &mut Vec<Move>) {
    let pc = match board.piece_at(from) {
        Some(p) => p,
        None => return,
    };
    match pc.kind {
        PieceKind::Pawn => gen_pawn(board, from, pc.color, out),
        PieceKind::Knight => gen_steps(board, from, pc.color, out, &KNIGHT_DELTAS),
        PieceKind::Bishop => gen_slider(board, from, pc.color, out, &BISHOP_DIRS),
        PieceKind::Rook => gen_slider(board, from, pc.color, out, &ROOK_DIRS),
        PieceKind::Queen => {
            gen_slider(board, from, pc.color, out, &ROOK_DIRS);
            gen_slider(board, from, pc.color, out, &BISHOP_DIRS);
        }
        PieceKind::King => gen_steps(board, from, pc.color, out, &KING_DELTAS),
    }
}

fn gen_pawn(board: &Board, from: Square, c: Color, out: &mut Vec<Move>) {
    let dir = c.forward();

    // forward 1, then forward 2 from the start row
    if let Some(to) = from.offset(dir, 0) {
        if board.is_empty(to) {
            out.push(Move::new(from, to));
            if from.row == c.pawn_row() {
                if let Some(to2) = from.offset(2 * dir, 0) {
                    if board.is_empty(to2) {
                        out.push(Move::new(from, to2));
                    }
                }
            }
        }
    }

    // diagonal captures only onto an enemy piece
    for dc in [1, -1] {
        if let Some(to) = from.offset(dir, dc) {
            if let Some(tpc) = board.piece_at(to) {
                if tpc.color != c {
                    out.push(Move::new(from, to));
                }
            }
        }
    }
}

fn gen_steps(board: &Board, from: Square, c: Color, out: &mut Vec<Move>, deltas: &[(i8, i8)]) {
    for &(dr, dc) in deltas {
        if let Some(to) = from.offset(dr, dc) {
            match board.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => out.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

fn gen_slider(board: &Board, from: Square, c: Color, out: &mut Vec<Move>, dirs: &[(i8, i8)]) {
    for &(dr, dc) in dirs {
        let mut cur = from.offset(dr, dc);
        while let Some(to) = cur {
            match board.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) if pc.color != c => {
                    out.push(Move::new(from, to));
                    break;
                }
                _ => break,
            }
            cur = to.offset(dr, dc);
        }
    }
}

/// Castling candidates for a king of color `c` standing on `from`.
pub fn castling_moves(
    board: &Board,
    castling: &CastlingRights,
    from: Square,
    c: Color,
) -> Vec<Move> {
    let mut out = Vec::with_capacity(2);
    castling_moves_into(board, castling, from, c, &mut out);
    out
}

fn castling_moves_into(
    board: &Board,
    castling: &CastlingRights,
    from: Square,
    c: Color,
    out: &mut Vec<Move>,
) {
    let row = c.home_row();
    if from != Square::new(row, 4) {
        return;
    }
    if !castling.has(c, CastleSide::King) && !castling.has(c, CastleSide::Queen) {
        return;
    }

    // Can't castle out of check; the origin square is covered here.
    let enemy = c.other();
    let mut buf = Vec::with_capacity(28);
    if is_square_attacked_with(board, from, enemy, &mut buf) {
        return;
    }

    let rook = Some(Piece::new(c, PieceKind::Rook));
    let empty = |col: u8| board.is_empty(Square::new(row, col));
    let mut safe =
        |col: u8| !is_square_attacked_with(board, Square::new(row, col), enemy, &mut buf);

    // King side: f and g empty, neither attacked
    if castling.has(c, CastleSide::King)
        && board.piece_at(Square::new(row, 7)) == rook
        && empty(5)
        && empty(6)
        && safe(5)
        && safe(6)
    {
        out.push(Move::castling(from, Square::new(row, 6), CastleSide::King));
    }

    // Queen side: b, c, d empty; only d and c need to be safe
    if castling.has(c, CastleSide::Queen)
        && board.piece_at(Square::new(row, 0)) == rook
        && empty(3)
        && empty(2)
        && empty(1)
        && safe(3)
        && safe(2)
    {
        out.push(Move::castling(from, Square::new(row, 2), CastleSide::Queen));
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
