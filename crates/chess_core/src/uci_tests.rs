use super::*;

#[test]
fn test_move_text_round_trip() {
    let game = Game::new();
    let mv = parse_uci_move(&game, "g1f3").unwrap();
    assert_eq!(mv.from, Square::new(7, 6));
    assert_eq!(mv.to, Square::new(5, 5));
    assert_eq!(move_to_uci(game.board(), mv), "g1f3");
}

#[test]
fn test_parse_rejects_bad_text() {
    let game = Game::new();
    assert!(matches!(
        parse_uci_move(&game, "e2"),
        Err(ChessError::InvalidMoveText(_))
    ));
    assert!(matches!(
        parse_uci_move(&game, "z2e4"),
        Err(ChessError::InvalidSquare(_))
    ));
    assert!(matches!(
        parse_uci_move(&game, "e2e5"),
        Err(ChessError::IllegalMove { .. })
    ));
}

#[test]
fn test_promotion_suffix() {
    let game = Game::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let mv = parse_uci_move(&game, "a7a8q").unwrap();
    assert_eq!(move_to_uci(game.board(), mv), "a7a8q");
    // Bare form is accepted too; auto-queen applies either way
    assert_eq!(parse_uci_move(&game, "a7a8").unwrap(), mv);
    // Under-promotion is not part of this rule set
    assert!(parse_uci_move(&game, "a7a8n").is_err());
}

#[test]
fn test_castling_text_carries_tag() {
    let game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let mv = parse_uci_move(&game, "e1c1").unwrap();
    assert_eq!(mv.castle, Some(CastleSide::Queen));
}

#[test]
fn test_set_position_startpos_moves() {
    let mut game = Game::new();
    set_position_from_uci(&mut game, &["startpos", "moves", "e2e4", "e7e5", "g1f3"]).unwrap();
    assert_eq!(game.history().len(), 3);
    assert_eq!(game.side_to_move(), Color::Black);

    // A fresh position command starts over
    set_position_from_uci(&mut game, &["startpos"]).unwrap();
    assert_eq!(game, Game::new());
}

#[test]
fn test_set_position_fen_moves() {
    let mut game = Game::new();
    let args: Vec<&str> = "fen r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1 moves e1g1"
        .split_whitespace()
        .collect();
    set_position_from_uci(&mut game, &args).unwrap();
    assert_eq!(
        game.board().piece_at(Square::new(7, 5)),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
}

#[test]
fn test_set_position_illegal_move_is_error() {
    let mut game = Game::new();
    let err = set_position_from_uci(&mut game, &["startpos", "moves", "e2e5"]).unwrap_err();
    assert!(matches!(err, ChessError::IllegalMove { .. }));
}
