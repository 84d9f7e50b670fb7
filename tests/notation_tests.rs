//! The text pipeline end to end: FEN round trips, algebraic replay with
//! context tracking, and PGN games driving the resolver.

use plyscope::board::{Board, Context, PieceKind, Side};
use plyscope::io::{
    make_canvas, make_input_move, make_input_moves, print_fen, replay_pgn, scan_board, scan_canvas,
    scan_fen, GameResult, ParseError, LONG_ALGEBRAIC, PGN_INPUT, SHORT_ALGEBRAIC,
};

#[test]
fn fen_round_trip_with_en_passant_target() {
    let fen = "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2";
    let (board, ctx) = scan_fen(fen).unwrap();
    assert_eq!(print_fen(&board, &ctx), fen);
    let c6 = scan_canvas(
        "........\n\
         ........\n\
         ..x.....\n\
         ........\n\
         ........\n\
         ........\n\
         ........\n\
         ........\n",
        'x',
    );
    assert_eq!(ctx.ep_info, c6);
}

#[test]
fn fen_and_replay_agree() {
    // the same position reached by FEN and by replaying the moves
    let mut board = Board::initial();
    let mut ctx = Context::start();
    make_input_moves(
        &mut board,
        &mut ctx,
        &["e2-e4", "c7-c5"],
        LONG_ALGEBRAIC,
        |_, _| {},
    )
    .unwrap();
    let (fen_board, fen_ctx) =
        scan_fen("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2").unwrap();
    assert_eq!(board, fen_board);
    assert_eq!(ctx.ep_info, fen_ctx.ep_info);
    assert_eq!(ctx.side(), Side::White);
    assert_eq!(print_fen(&board, &ctx), print_fen(&fen_board, &fen_ctx));
}

#[test]
fn en_passant_capture_replays() {
    let mut board = scan_board(
        "....k...\n\
         ...p....\n\
         ........\n\
         ....P...\n\
         ........\n\
         ........\n\
         ........\n\
         ....K...\n",
    );
    let mut ctx = Context {
        castling_rights: plyscope::board::all_castling_blocked(),
        ..Context::start()
    };
    ctx.set_fullmove(1, Side::Black);
    make_input_moves(
        &mut board,
        &mut ctx,
        &["d7-d5", "e5xd6e.p."],
        LONG_ALGEBRAIC,
        |_, _| {},
    )
    .unwrap();
    assert_eq!(
        make_canvas(&board),
        "....k...\n\
         ........\n\
         ...P....\n\
         ........\n\
         ........\n\
         ........\n\
         ........\n\
         ....K...\n"
    );
}

#[test]
fn short_castling_sequence() {
    let mut board = Board::initial();
    let mut ctx = Context::start();
    let mut positions = 0;
    make_input_moves(
        &mut board,
        &mut ctx,
        &["e2-e4", "e7-e5", "Ng1-f3", "Nb8-c6", "Bf1-c4", "Ng8-f6", "O-O"],
        LONG_ALGEBRAIC,
        |_, _| positions += 1,
    )
    .unwrap();
    assert_eq!(positions, 8);
    assert_eq!(
        make_canvas(&board),
        "r.bqkb.r\n\
         pppp.ppp\n\
         ..n..n..\n\
         ....p...\n\
         ..B.P...\n\
         .....N..\n\
         PPPP.PPP\n\
         RNBQ.RK.\n"
    );
}

#[test]
fn short_and_long_algebraic_reach_the_same_position() {
    let mut long_board = Board::initial();
    let mut long_ctx = Context::start();
    make_input_moves(
        &mut long_board,
        &mut long_ctx,
        &["d2-d4", "d7-d5", "c2-c4", "d5xc4", "Ng1-f3"],
        LONG_ALGEBRAIC,
        |_, _| {},
    )
    .unwrap();

    let mut short_board = Board::initial();
    let mut short_ctx = Context::start();
    make_input_moves(
        &mut short_board,
        &mut short_ctx,
        &["d4", "d5", "c4", "dxc4", "Nf3"],
        SHORT_ALGEBRAIC,
        |_, _| {},
    )
    .unwrap();

    assert_eq!(long_board, short_board);
    assert_eq!(long_ctx, short_ctx);
}

#[test]
fn pgn_implicit_en_passant() {
    // exd6 carries no marker in PGN; the resolver detects it from the target
    let mut board = Board::initial();
    let mut ctx = Context::start();
    make_input_moves(
        &mut board,
        &mut ctx,
        &["e4", "Nf6", "e5", "d5", "exd6", "exd6"],
        PGN_INPUT,
        |_, _| {},
    )
    .unwrap();
    assert_eq!(board.piece(Side::Black, PieceKind::Pawn) & (0xFF << 32), 0);
    assert_eq!(
        make_canvas(&board),
        "rnbqkb.r\n\
         ppp..ppp\n\
         ...p.n..\n\
         ........\n\
         ........\n\
         ........\n\
         PPPP.PPP\n\
         RNBQKBNR\n"
    );
}

#[test]
fn pgn_full_game_replays() {
    // a short miniature with attributes, comments and a result
    let pgn = "[Event \"casual\"]\n\
               [White \"N.N.\"]\n\
               [Black \"N.N.\"]\n\
               [Result \"0-1\"]\n\
               \n\
               1. f3 {weakening} e5 2. g4 $4 Qh4# 0-1\n";
    let mut final_canvas = String::new();
    let result = replay_pgn(pgn.as_bytes(), |board, _| {
        final_canvas = make_canvas(board);
    })
    .unwrap();
    assert_eq!(result, GameResult::BlackWin);
    assert_eq!(
        final_canvas,
        "rnb.kbnr\n\
         pppp.ppp\n\
         ........\n\
         ....p...\n\
         ......Pq\n\
         .....P..\n\
         PPPPP..P\n\
         RNBQKBNR\n"
    );
}

#[test]
fn replay_reports_wrapped_errors() {
    let mut board = Board::initial();
    let mut ctx = Context::start();
    let err = make_input_moves(
        &mut board,
        &mut ctx,
        &["e2-e4", "e7-e6", "Ke1-e3"],
        LONG_ALGEBRAIC,
        |_, _| {},
    )
    .unwrap_err();
    match err {
        ParseError::InMove { notation, cause } => {
            assert_eq!(notation, "Ke1-e3");
            assert_eq!(*cause, ParseError::IllegalMove);
        }
        other => panic!("expected InMove, got {other}"),
    }
}

#[test]
fn check_flags_must_match_position() {
    let mut board = Board::initial();
    let mut ctx = Context::start();
    // a quiet opening move marked as check must be rejected
    assert!(make_input_move(&mut board, &mut ctx, "d2-d4+", LONG_ALGEBRAIC).is_err());

    // a genuine check is accepted with its flag and rejected without it
    let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2";
    let (mut board, mut ctx) = scan_fen(fen).unwrap();
    assert!(make_input_move(&mut board, &mut ctx, "Bf1-b5+", LONG_ALGEBRAIC).is_ok());
    let (mut board, mut ctx) = scan_fen(fen).unwrap();
    assert!(make_input_move(&mut board, &mut ctx, "Bf1-b5", LONG_ALGEBRAIC).is_err());
}
