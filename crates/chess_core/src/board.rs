use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ChessError;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        wk: true,
        wq: true,
        bk: true,
        bq: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        wk: false,
        wq: false,
        bk: false,
        bq: false,
    };

    pub fn has(&self, c: Color, side: CastleSide) -> bool {
        match (c, side) {
            (Color::White, CastleSide::King) => self.wk,
            (Color::White, CastleSide::Queen) => self.wq,
            (Color::Black, CastleSide::King) => self.bk,
            (Color::Black, CastleSide::Queen) => self.bq,
        }
    }

    pub fn revoke(&mut self, c: Color, side: CastleSide) {
        match (c, side) {
            (Color::White, CastleSide::King) => self.wk = false,
            (Color::White, CastleSide::Queen) => self.wq = false,
            (Color::Black, CastleSide::King) => self.bk = false,
            (Color::Black, CastleSide::Queen) => self.bq = false,
        }
    }

    pub fn revoke_all(&mut self, c: Color) {
        self.revoke(c, CastleSide::King);
        self.revoke(c, CastleSide::Queen);
    }

    /// Clear the right tied to a rook's original corner, if `s` is one.
    pub fn revoke_corner(&mut self, s: Square) {
        match (s.row, s.col) {
            (0, 0) => self.bq = false,
            (0, 7) => self.bk = false,
            (7, 0) => self.wq = false,
            (7, 7) => self.wk = false,
            _ => {}
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::ALL
    }
}

/// 8x8 grid indexed `[row][col]`, row 0 = black's home rank.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    pub fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty();
        for c in [Color::White, Color::Black] {
            for (col, &kind) in BACK_RANK.iter().enumerate() {
                b.grid[c.home_row() as usize][col] = Some(Piece::new(c, kind));
                b.grid[c.pawn_row() as usize][col] = Some(Piece::new(c, PieceKind::Pawn));
            }
        }
        b
    }

    /// Parse the piece-placement field of a FEN string.
    pub fn from_fen_placement(placement: &str) -> Result<Self, ChessError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(ChessError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                rows.len()
            )));
        }

        // FEN lists rank 8 first, which is row 0 here.
        let mut board = Board::empty();
        for (row, row_str) in rows.iter().enumerate() {
            let mut col: usize = 0;
            for ch in row_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as usize;
                } else {
                    let pc = Piece::from_char(ch).ok_or_else(|| {
                        ChessError::InvalidFen(format!("invalid piece char '{ch}'"))
                    })?;
                    if col >= 8 {
                        return Err(ChessError::InvalidFen(format!(
                            "too many files in rank '{row_str}'"
                        )));
                    }
                    board.grid[row][col] = Some(pc);
                    col += 1;
                }
                if col > 8 {
                    return Err(ChessError::InvalidFen(format!(
                        "too many files in rank '{row_str}'"
                    )));
                }
            }
            if col != 8 {
                return Err(ChessError::InvalidFen(format!(
                    "not enough files in rank '{row_str}'"
                )));
            }
        }
        Ok(board)
    }

    pub fn to_fen_placement(&self) -> String {
        let mut out = String::new();
        for (row, cells) in self.grid.iter().enumerate() {
            let mut gap = 0;
            for cell in cells {
                match cell {
                    Some(pc) => {
                        if gap > 0 {
                            out.push_str(&gap.to_string());
                            gap = 0;
                        }
                        out.push(pc.to_char());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                out.push_str(&gap.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }

    /// The raw grid, for rendering collaborators.
    pub fn grid(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.grid
    }

    #[inline]
    pub fn piece_at(&self, s: Square) -> Option<Piece> {
        self.grid[s.row as usize][s.col as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, s: Square, pc: Option<Piece>) {
        self.grid[s.row as usize][s.col as usize] = pc;
    }

    pub fn is_empty(&self, s: Square) -> bool {
        self.piece_at(s).is_none()
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        let king = Piece::new(c, PieceKind::King);
        Square::all().find(|&s| self.piece_at(s) == Some(king))
    }

    /// Occupied squares of one side, in row-major order.
    pub fn pieces_of(&self, c: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |s| match self.piece_at(s) {
            Some(pc) if pc.color == c => Some((s, pc)),
            _ => None,
        })
    }

    /// Every occupied square, in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |s| self.piece_at(s).map(|pc| (s, pc)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.grid.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for cell in cells {
                let ch = cell.map(|pc| pc.to_char()).unwrap_or('.');
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
