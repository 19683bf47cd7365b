//! apply/undo must restore the exact pre-move state, for every reachable
//! position we can wander into.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use chess_core::{Color, Game};

fn random_walk(seed: u64, plies: usize) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();

    for _ in 0..plies {
        let side: Color = game.side_to_move();
        let moves = game.all_legal_moves(side);
        if moves.is_empty() {
            assert!(game.is_terminal());
            break;
        }

        // Every legal move must round-trip
        for mv in &moves {
            let before = game.clone();
            assert!(game.apply(mv.from, mv.to), "legal move {mv} rejected");
            game.undo();
            assert_eq!(game, before, "apply/undo of {mv} changed the game");
        }

        let mv = *moves.choose(&mut rng).expect("non-empty");
        assert!(game.apply(mv.from, mv.to));
    }

    // Unwind the whole game back to the start
    while game.undo().is_some() {}
    assert_eq!(game, Game::new());
}

#[test]
fn apply_undo_round_trip_random_games() {
    for seed in 0..12 {
        random_walk(seed, 80);
    }
}

#[test]
fn legal_moves_never_leave_king_attacked() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let mut game = Game::new();
    for _ in 0..60 {
        let mover = game.side_to_move();
        let moves = game.all_legal_moves(mover);
        if moves.is_empty() {
            break;
        }
        for mv in &moves {
            game.apply(mv.from, mv.to);
            assert!(!game.is_in_check(mover), "{mv} leaves the king attacked");
            game.undo();
        }
        let mv = *moves.choose(&mut rng).expect("non-empty");
        game.apply(mv.from, mv.to);
    }
}
