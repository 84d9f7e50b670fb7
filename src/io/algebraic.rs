//! Input-move resolution.
//!
//! Takes long- or short-algebraic move text, finds the one origin square
//! that makes the move legal (reverse generators narrowed by the board, the
//! notation's partial origin and a king-safety simulation), applies the move
//! to the board and rolls the context forward. A `+`/`#` suffix is verified
//! against the position, checkmate by a one-ply search.

use crate::bits::{is_single_bit, lowest_bit, BitIter};
use crate::board::{
    castling_block_mask, long_castling, short_castling, ActiveSide, Board, CastlingSpec, Context,
    Metrics, PieceKind, Side,
};
use crate::control::MinimaxController;
use crate::io::{
    bump, peek, scan_algebraic_square, scan_partial_square, skip_prefix, ParseError,
};
use crate::movegen::{
    en_passant_mask, piece_move_generator, promoting_pawns, reverse_pawn_capture,
    reverse_pawn_push,
};
use crate::search::{
    analyze_position, basic_capture_info, basic_move_info, castle_info, en_passant_info,
    is_king_under_attack, own_under_attack, promotion_info, MoveInfo,
};
use crate::score;

/// How move text spells origins and separators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveFormat {
    /// Full origin square and a mandatory 'x' or '-' separator.
    LongAlgebraic,
    /// Partial origin, no '-' separator.
    ShortAlgebraic,
}

/// Whether en-passant captures carry an explicit `e.p.` marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpFormat {
    Annotated,
    Implicit,
}

/// A move-text dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Format {
    pub moves: MoveFormat,
    pub ep: EpFormat,
}

/// `e2-e4`, `e5xd6e.p.`, `O-O`.
pub const LONG_ALGEBRAIC: Format = Format {
    moves: MoveFormat::LongAlgebraic,
    ep: EpFormat::Annotated,
};

/// `e4`, `exd6e.p.`, `O-O`.
pub const SHORT_ALGEBRAIC: Format = Format {
    moves: MoveFormat::ShortAlgebraic,
    ep: EpFormat::Annotated,
};

/// PGN movetext: short algebraic with en passant left implicit.
pub const PGN_INPUT: Format = Format {
    moves: MoveFormat::ShortAlgebraic,
    ep: EpFormat::Implicit,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MoveKind {
    Normal,
    LongCastling,
    ShortCastling,
    Promotion,
    EpCapture,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GameStatus {
    Normal,
    Check,
    Checkmate,
}

#[derive(Clone, Copy, Debug)]
struct InputMove {
    kind: MoveKind,
    is_capture: bool,
    status: GameStatus,
    piece: PieceKind,
    /// Partial origin mask from the notation; narrowed later.
    origin: u64,
    destination: u64,
    promoting: PieceKind,
}

impl InputMove {
    fn castling(kind: MoveKind) -> InputMove {
        InputMove {
            kind,
            is_capture: false,
            status: GameStatus::Normal,
            piece: PieceKind::King,
            origin: 0,
            destination: 0,
            promoting: PieceKind::Queen,
        }
    }
}

fn character_to_moved_piece(c: char) -> PieceKind {
    match c {
        'B' => PieceKind::Bishop,
        'K' => PieceKind::King,
        'N' => PieceKind::Knight,
        'Q' => PieceKind::Queen,
        'R' => PieceKind::Rook,
        _ => PieceKind::Pawn,
    }
}

fn scan_move_suffix(im: &mut InputMove, s: &mut &str) -> Result<(), ParseError> {
    if peek(s) == Some('=') {
        bump(s)?;
        let c = bump(s)?;
        im.promoting = match c {
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            found => return Err(ParseError::WrongPromotionPiece { found }),
        };
        im.kind = MoveKind::Promotion;
    }
    match peek(s) {
        Some('+') => {
            bump(s)?;
            im.status = GameStatus::Check;
        }
        Some('#') => {
            bump(s)?;
            im.status = GameStatus::Checkmate;
        }
        _ => {}
    }
    Ok(())
}

fn scan_input_move(s: &mut &str, fmt: Format) -> Result<InputMove, ParseError> {
    let mut im;
    if skip_prefix(s, "O-O-O") {
        im = InputMove::castling(MoveKind::LongCastling);
    } else if skip_prefix(s, "O-O") {
        im = InputMove::castling(MoveKind::ShortCastling);
    } else {
        im = InputMove {
            kind: MoveKind::Normal,
            is_capture: false,
            status: GameStatus::Normal,
            piece: PieceKind::Pawn,
            origin: !0,
            destination: 0,
            promoting: PieceKind::Queen,
        };
        let lead = peek(s).ok_or(ParseError::TruncatedInput)?;
        im.piece = character_to_moved_piece(lead);
        if im.piece != PieceKind::Pawn {
            bump(s)?;
        }
        if fmt.moves == MoveFormat::ShortAlgebraic {
            let pos1 = scan_partial_square(s);
            if is_single_bit(pos1) {
                // a bare square is the destination unless more move text
                // follows
                let len_before = s.len();
                scan_move_suffix(&mut im, s)?;
                let suffix_taken = s.len() != len_before;
                let more = peek(s).map_or(false, |c| c.is_ascii_graphic());
                if suffix_taken || !more {
                    im.destination = pos1;
                    return Ok(im);
                }
            }
            im.origin = pos1;
        } else {
            im.origin = scan_algebraic_square(s)?;
        }
        match peek(s) {
            Some('x') => {
                bump(s)?;
                im.is_capture = true;
            }
            Some('-') => {
                if fmt.moves == MoveFormat::ShortAlgebraic {
                    return Err(ParseError::BadSeparator { found: '-' });
                }
                bump(s)?;
            }
            Some(found) => {
                if fmt.moves == MoveFormat::LongAlgebraic {
                    return Err(ParseError::BadSeparator { found });
                }
            }
            None => return Err(ParseError::TruncatedInput),
        }
        im.destination = scan_algebraic_square(s)?;
    }
    if fmt.ep == EpFormat::Annotated
        && im.piece == PieceKind::Pawn
        && im.is_capture
        && (skip_prefix(s, "e.p.") || skip_prefix(s, "ep"))
    {
        im.kind = MoveKind::EpCapture;
    }
    scan_move_suffix(&mut im, s)?;
    Ok(im)
}

// PGN never writes the ep marker; recognize the capture by its target
fn detect_ep_capture(im: &mut InputMove, ctx: &Context) {
    if im.kind == MoveKind::Normal
        && im.piece == PieceKind::Pawn
        && im.is_capture
        && im.destination == ctx.ep_info
    {
        im.kind = MoveKind::EpCapture;
    }
}

fn make_castling_move<S: ActiveSide>(
    board: &mut Board,
    bm: &Metrics,
    ctx: &Context,
    spec: CastlingSpec,
) -> Result<(), ParseError> {
    let attacked = own_under_attack::<S>(board, bm);
    if !spec.castling_allowed(bm.own(S::SIDE) | ctx.castling_rights, attacked) {
        return Err(ParseError::CastlingNotAllowed);
    }
    for info in castle_info::<S>(&spec) {
        info.apply(board);
    }
    Ok(())
}

fn candidate_origins<S: ActiveSide>(bm: &Metrics, im: &InputMove) -> u64 {
    let obstacles = bm.all();
    if im.kind == MoveKind::EpCapture {
        return reverse_pawn_capture(S::SIDE, im.destination);
    }
    if im.piece == PieceKind::Pawn {
        if im.destination & bm.opposing(S::SIDE) != 0 {
            reverse_pawn_capture(S::SIDE, im.destination)
        } else {
            reverse_pawn_push(S::SIDE, im.destination, obstacles)
        }
    } else {
        piece_move_generator(im.piece)(im.destination, obstacles)
    }
}

/// Pick the unique origin that keeps the king safe, teleporting the mover
/// between candidates to test each one.
fn resolve_origin<S: ActiveSide>(
    board: &mut Board,
    piece: PieceKind,
    origins: u64,
    first: u64,
) -> Result<(), ParseError> {
    let safe_now = !is_king_under_attack::<S>(board, &Metrics::new(board));
    let mut valid_origin = if safe_now { Some(first) } else { None };
    for candidate in BitIter(origins ^ first) {
        let swap = MoveInfo {
            side: S::SIDE,
            piece,
            mask: first | candidate,
        };
        swap.apply(board);
        let safe = !is_king_under_attack::<S>(board, &Metrics::new(board));
        swap.apply(board);
        if safe {
            if valid_origin.is_some() {
                return Err(ParseError::AmbiguousOrigin);
            }
            valid_origin = Some(candidate);
        }
    }
    let chosen = valid_origin.ok_or(ParseError::SelfCheck)?;
    if chosen != first {
        MoveInfo {
            side: S::SIDE,
            piece,
            mask: first | chosen,
        }
        .apply(board);
    }
    Ok(())
}

fn check_game_state<S: ActiveSide>(
    board: &Board,
    ctx: &Context,
    im: &InputMove,
) -> Result<(), ParseError> {
    let bm = Metrics::new(board);
    let analyzed = is_king_under_attack::<S::Opponent>(board, &bm);
    let indicated = im.status != GameStatus::Normal;
    if analyzed != indicated {
        return Err(ParseError::CheckFlagMismatch {
            indicated,
            analyzed,
        });
    }
    let mut mate_analyzed = false;
    if indicated {
        let mut ec = MinimaxController::new(*board, ctx, 1);
        analyze_position::<S::Opponent, _, _, _, _>(&mut ec, ctx);
        mate_analyzed = ec.pruning.score == score::checkmate(S::SIDE);
    }
    let mate_indicated = im.status == GameStatus::Checkmate;
    if mate_analyzed != mate_indicated {
        return Err(ParseError::CheckmateFlagMismatch {
            indicated: mate_indicated,
            analyzed: mate_analyzed,
        });
    }
    Ok(())
}

fn apply_input_move<S: ActiveSide>(
    board: &mut Board,
    ctx: &mut Context,
    mut im: InputMove,
) -> Result<(), ParseError> {
    let bm = Metrics::new(board);
    let old_pawns = board.piece(S::SIDE, PieceKind::Pawn);

    match im.kind {
        MoveKind::LongCastling => {
            make_castling_move::<S>(board, &bm, ctx, long_castling(S::SIDE))?;
        }
        MoveKind::ShortCastling => {
            make_castling_move::<S>(board, &bm, ctx, short_castling(S::SIDE))?;
        }
        _ => {
            im.origin &= board.piece(S::SIDE, im.piece);
            if im.origin == 0 {
                return Err(ParseError::MissingPiece);
            }
            im.origin &= candidate_origins::<S>(&bm, &im);
            if im.origin == 0 {
                return Err(ParseError::IllegalMove);
            }
            let first = lowest_bit(im.origin);

            if im.kind == MoveKind::EpCapture {
                if im.destination != ctx.ep_info {
                    return Err(ParseError::EnPassantNotAllowed);
                }
                for info in en_passant_info::<S>(first, im.destination) {
                    info.apply(board);
                }
            } else {
                let destination_occupied = im.destination & bm.opposing(S::SIDE) != 0;
                if im.destination & bm.own(S::SIDE) != 0 {
                    return Err(ParseError::IllegalMove);
                }
                if im.is_capture && !destination_occupied {
                    return Err(ParseError::MissingCaptureTarget);
                }
                if !im.is_capture && destination_occupied {
                    return Err(ParseError::CaptureWithoutIndication);
                }
                let promotion_square = im.piece == PieceKind::Pawn
                    && promoting_pawns(S::SIDE, im.destination) != 0;
                if (im.kind == MoveKind::Promotion) != promotion_square {
                    return Err(ParseError::PromotionExpected);
                }
                if im.is_capture {
                    for info in
                        basic_capture_info::<S>(board, im.piece, first, im.destination)
                    {
                        info.apply(board);
                    }
                } else {
                    basic_move_info::<S>(im.piece, first, im.destination).apply(board);
                }
                if im.kind == MoveKind::Promotion {
                    for info in promotion_info::<S>(im.promoting, im.destination) {
                        info.apply(board);
                    }
                }
            }
            resolve_origin::<S>(board, im.piece, im.origin, first)?;
        }
    }

    ctx.ep_info = en_passant_mask(S::SIDE, old_pawns, board.piece(S::SIDE, PieceKind::Pawn));
    ctx.castling_rights |= castling_block_mask(
        S::SIDE,
        board.piece(S::SIDE, PieceKind::Rook),
        board.piece(S::SIDE, PieceKind::King),
    );
    let was_capture = im.is_capture || im.kind == MoveKind::EpCapture;
    ctx.halfmove_clock = if im.piece == PieceKind::Pawn || was_capture {
        0
    } else {
        ctx.halfmove_clock + 1
    };
    ctx.halfmove_count += 1;

    check_game_state::<S>(board, ctx, &im)
}

pub(crate) fn consume_input_move(
    board: &mut Board,
    ctx: &mut Context,
    s: &mut &str,
    fmt: Format,
) -> Result<(), ParseError> {
    let start = *s;
    let inner = (|| {
        let mut im = scan_input_move(s, fmt)?;
        if fmt.ep == EpFormat::Implicit {
            detect_ep_capture(&mut im, ctx);
        }
        match ctx.side() {
            Side::White => apply_input_move::<crate::board::White>(board, ctx, im),
            Side::Black => apply_input_move::<crate::board::Black>(board, ctx, im),
        }
    })();
    inner.map_err(|cause| {
        let notation: String = start
            .chars()
            .take_while(|c| c.is_ascii_graphic())
            .collect();
        ParseError::InMove {
            notation,
            cause: Box::new(cause),
        }
    })
}

/// Parse one move for the side the context says is to move, apply it to the
/// board and advance the context (en passant, castling rights, counters).
///
/// On an error after text scanning the board may already be partially
/// updated; replay drivers treat any error as fatal for the game.
pub fn make_input_move(
    board: &mut Board,
    ctx: &mut Context,
    text: &str,
    fmt: Format,
) -> Result<(), ParseError> {
    let token = text.trim();
    if token.is_empty() {
        return Err(ParseError::EmptyMove);
    }
    let mut cursor = token;
    consume_input_move(board, ctx, &mut cursor, fmt)?;
    if let Some(found) = peek(&cursor) {
        if found.is_ascii_graphic() {
            return Err(ParseError::InMove {
                notation: token.to_string(),
                cause: Box::new(ParseError::InvalidCharacter {
                    found,
                    expected: "end of move",
                }),
            });
        }
    }
    Ok(())
}

/// Replay a whole move list, reporting every position (including the last)
/// to `on_position`.
pub fn make_input_moves(
    board: &mut Board,
    ctx: &mut Context,
    moves: &[&str],
    fmt: Format,
    mut on_position: impl FnMut(&Board, &Context),
) -> Result<(), ParseError> {
    for text in moves {
        on_position(board, ctx);
        make_input_move(board, ctx, text, fmt)?;
    }
    on_position(board, ctx);
    Ok(())
}
