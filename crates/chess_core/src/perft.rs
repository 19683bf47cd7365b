use crate::{game::Game, types::Color};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`,
/// walking the tree with `apply`/`undo` on the live game.
pub fn perft(game: &mut Game, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let side: Color = game.side_to_move();
    let mut moves = Vec::with_capacity(48);
    game.legal_moves_into(side, &mut moves);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        if game.apply(mv.from, mv.to) {
            nodes += perft(game, depth - 1);
            game.undo();
        }
    }
    nodes
}
