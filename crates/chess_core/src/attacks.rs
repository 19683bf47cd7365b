//! Attack detection.
//!
//! Pawns and kings are tested geometrically. Every other piece is tested by
//! membership in [`piece_moves`](crate::movegen::piece_moves), which never
//! produces castling moves, so a query can't re-enter castling generation.

use crate::{board::Board, movegen::piece_moves_into, types::*};

/// Is `target` attacked by any piece of color `by`?
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    let mut buf = Vec::with_capacity(28);
    is_square_attacked_with(board, target, by, &mut buf)
}

/// Same as [`is_square_attacked`], reusing `buf` for move generation.
pub fn is_square_attacked_with(
    board: &Board,
    target: Square,
    by: Color,
    buf: &mut Vec<Move>,
) -> bool {
    for (from, pc) in board.pieces_of(by) {
        let dr = target.row as i8 - from.row as i8;
        let dc = target.col as i8 - from.col as i8;
        if dr == 0 && dc == 0 {
            continue;
        }
        let straight = dr == 0 || dc == 0;
        let diagonal = dr.abs() == dc.abs();

        let candidate = match pc.kind {
            PieceKind::Pawn => {
                if dr == by.forward() && dc.abs() == 1 {
                    return true;
                }
                false
            }
            PieceKind::King => {
                if dr.abs().max(dc.abs()) == 1 {
                    return true;
                }
                false
            }
            PieceKind::Knight => dr.abs() * dc.abs() == 2,
            PieceKind::Rook => straight,
            PieceKind::Bishop => diagonal,
            PieceKind::Queen => straight || diagonal,
        };
        if !candidate {
            continue;
        }

        // Lined up: the generator decides whether anything blocks
        buf.clear();
        piece_moves_into(board, from, buf);
        if buf.iter().any(|m| m.to == target && m.castle.is_none()) {
            return true;
        }
    }
    false
}

/// Is the king of color `c` attacked? A missing king counts as attacked.
pub fn king_attacked(board: &Board, c: Color) -> bool {
    let mut buf = Vec::with_capacity(28);
    king_attacked_with(board, c, &mut buf)
}

/// Same as [`king_attacked`], reusing `buf` for move generation.
pub fn king_attacked_with(board: &Board, c: Color, buf: &mut Vec<Move>) -> bool {
    match board.king_sq(c) {
        Some(ksq) => is_square_attacked_with(board, ksq, c.other(), buf),
        None => true,
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
