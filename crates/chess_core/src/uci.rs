use crate::{board::Board, error::ChessError, game::Game, types::*};

/// Long algebraic text (`e2e4`). Promotions carry the `q` suffix.
pub fn move_to_uci(board: &Board, mv: Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&mv.from.to_coord());
    s.push_str(&mv.to.to_coord());
    if let Some(pc) = board.piece_at(mv.from) {
        if pc.kind == PieceKind::Pawn && mv.to.row == pc.color.promotion_row() {
            s.push('q');
        }
    }
    s
}

pub fn parse_uci_move(game: &Game, txt: &str) -> Result<Move, ChessError> {
    // We parse and then match against legal moves so the castle tag is correct.
    if txt.len() < 4 || txt.len() > 5 || !txt.is_ascii() {
        return Err(ChessError::InvalidMoveText(txt.to_string()));
    }
    let from = Square::from_coord(&txt[0..2])
        .ok_or_else(|| ChessError::InvalidSquare(txt[0..2].to_string()))?;
    let to = Square::from_coord(&txt[2..4])
        .ok_or_else(|| ChessError::InvalidSquare(txt[2..4].to_string()))?;

    // Only queen promotion exists in this rule set.
    if txt.len() == 5 && !txt[4..].eq_ignore_ascii_case("q") {
        return Err(ChessError::InvalidMoveText(txt.to_string()));
    }

    game.legal_moves(from)
        .into_iter()
        .find(|m| m.to == to)
        .ok_or(ChessError::IllegalMove { from, to })
}

/// Apply a `position` command's arguments: `startpos` or `fen <fields>`,
/// optionally followed by `moves ...`.
pub fn set_position_from_uci(game: &mut Game, args: &[&str]) -> Result<(), ChessError> {
    let moves_at = args.iter().position(|&a| a == "moves").unwrap_or(args.len());
    let (setup, moves) = args.split_at(moves_at);

    match setup.first().copied() {
        None | Some("startpos") => game.reset(),
        Some("fen") => *game = Game::from_fen(&setup[1..].join(" "))?,
        Some(other) => return Err(ChessError::InvalidFen(other.to_string())),
    }

    for txt in moves.iter().skip(1) {
        let mv = parse_uci_move(game, txt)?;
        game.try_apply(mv.from, mv.to)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
