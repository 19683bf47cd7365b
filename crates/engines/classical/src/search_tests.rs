use super::*;
use chess_core::Square;
use std::time::Instant;

fn s(coord: &str) -> Square {
    Square::from_coord(coord).unwrap()
}

fn white_to_play() -> SearchConfig {
    SearchConfig {
        engine_side: Color::White,
        ..SearchConfig::default()
    }
}

#[test]
fn test_pick_best_move_start_position() {
    let mut game = Game::new();
    let result = pick_best_move(&mut game, 3, &white_to_play());
    assert!(result.best_move.is_some());
    assert!(result.nodes > 0);
}

#[test]
fn test_pick_best_move_finds_mate_in_one() {
    // Back rank: Qe8 is mate
    let mut game = Game::from_fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1").unwrap();
    let result = pick_best_move(&mut game, 2, &white_to_play());
    let (mv, score) = result.best_move.unwrap();
    assert_eq!((mv.from, mv.to), (s("e1"), s("e8")));
    assert_eq!(score, MATE_SCORE);
}

#[test]
fn test_black_finds_fools_mate() {
    let mut game = Game::new();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4")] {
        assert!(game.apply(s(from), s(to)));
    }
    // Default config: black plays, white is the positive side
    let result = pick_best_move(&mut game, 2, &SearchConfig::default());
    let (mv, score) = result.best_move.unwrap();
    assert_eq!((mv.from, mv.to), (s("d8"), s("h4")));
    assert_eq!(score, -MATE_SCORE);
}

#[test]
fn test_captures_hanging_queen() {
    let mut game = Game::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
    let (mv, score) = pick_best_move(&mut game, 1, &white_to_play())
        .best_move
        .unwrap();
    assert_eq!((mv.from, mv.to), (s("d1"), s("d5")));
    assert!(score > 0);
}

#[test]
fn test_none_when_not_engine_turn() {
    let mut game = Game::new();
    let result = pick_best_move(&mut game, 2, &SearchConfig::default());
    assert!(result.best_move.is_none());
    assert_eq!(result.nodes, 0);
}

#[test]
fn test_none_when_game_over() {
    let mut game = Game::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(game.is_terminal());
    let result = pick_best_move(&mut game, 3, &SearchConfig::default());
    assert!(result.best_move.is_none());
}

#[test]
fn test_search_leaves_game_untouched() {
    let mut game = Game::from_fen("r3k2r/pppq1ppp/2n5/4p3/4P3/2N5/PPPQ1PPP/R3K2R w KQkq - 0 1")
        .unwrap();
    let before = game.clone();
    pick_best_move(&mut game, 3, &white_to_play());
    assert_eq!(game, before);
}

#[test]
fn test_depth_zero_searches_one_ply() {
    let mut game = Game::new();
    let zero = pick_best_move(&mut game, 0, &white_to_play());
    let one = pick_best_move(&mut game, 1, &white_to_play());
    assert_eq!(zero, one);
}

#[test]
fn test_node_count_plain_minimax() {
    let cfg = SearchConfig {
        pruning: false,
        ..white_to_play()
    };
    let mut game = Game::new();
    assert_eq!(pick_best_move(&mut game, 1, &cfg).nodes, 20);
    assert_eq!(pick_best_move(&mut game, 2, &cfg).nodes, 20 + 400);
}

#[test]
fn test_pruning_matches_plain_minimax() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 0 1",
        "4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1",
    ];
    for fen in fens {
        let mut game = Game::from_fen(fen).unwrap();
        let pruned = pick_best_move(&mut game, 3, &white_to_play());
        let plain = pick_best_move(
            &mut game,
            3,
            &SearchConfig {
                pruning: false,
                ..white_to_play()
            },
        );
        assert_eq!(pruned.best_move, plain.best_move, "{fen}");
        assert!(pruned.nodes <= plain.nodes, "{fen}");
    }
}

#[test]
fn test_positive_side_flips_scores() {
    let mut game = Game::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
    let white_view = pick_best_move(&mut game, 1, &white_to_play()).best_move.unwrap();
    let black_view = pick_best_move(
        &mut game,
        1,
        &SearchConfig {
            positive_side: Color::Black,
            engine_side: Color::White,
            pruning: true,
        },
    )
    .best_move
    .unwrap();
    assert_eq!(white_view.0, black_view.0);
    assert_eq!(white_view.1, -black_view.1);
}

#[test]
fn test_searcher_uses_its_config() {
    let searcher = Searcher::new(white_to_play());
    assert_eq!(searcher.config().engine_side, Color::White);
    let mut game = Game::new();
    let outcome = searcher.best_move(&mut game, 1);
    assert_eq!(outcome, pick_best_move(&mut game, 1, &white_to_play()));

    // Default searcher plays black and so has nothing to say here
    assert!(Searcher::default().best_move(&mut game, 1).best_move.is_none());
}

#[test]
fn test_deeper_search_never_visits_fewer_nodes() {
    let mut game = Game::new();
    let mut last = 0;
    for depth in 1..=3 {
        let nodes = pick_best_move(&mut game, depth, &white_to_play()).nodes;
        assert!(nodes >= last, "depth {depth}: {nodes} < {last}");
        last = nodes;
    }
}

#[test]
fn test_busy_middlegame_search_stays_fast() {
    // Kiwipete: many sliders and both castling options
    let mut game =
        Game::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let started = Instant::now();
    let outcome = pick_best_move(&mut game, 3, &white_to_play());
    let elapsed = started.elapsed();

    assert!(outcome.best_move.is_some());
    assert!(outcome.nodes > 10_000);
    assert!(
        elapsed.as_secs_f64() < 5.0,
        "{} nodes took {elapsed:?}",
        outcome.nodes
    );
}
