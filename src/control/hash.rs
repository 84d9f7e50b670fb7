//! Position hashing without Zobrist tables.
//!
//! A bit-mixer (the Murmur3 finalizer) stands in for the usual table of
//! random keys: all locations of one piece kind hash in a single call over
//! `premix(side) ^ premix(kind) ^ bitboard`. Incremental updates XOR the
//! hash of a bitboard before and after a move, plus deltas for the side to
//! move and the en-passant/castling context.

use crate::board::{Board, Context, PieceKind, Side, SidePieces};

#[inline]
const fn bit_mixer(mut p: u64) -> u64 {
    p ^= p >> 33;
    p = p.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    p ^= p >> 33;
    p = p.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    p ^= p >> 33;
    p
}

// Premix values only need to be distinct; columns 0/4 shifted by the kind
// index (0-7, with 6 and 7 reserved for castling and en passant) and four
// even rows shifted by the side keep the eight kinds and two sides apart.
#[inline]
const fn premix_kind(kind: u32) -> u64 {
    use crate::bits::{column_mask, COLUMN_A};
    (COLUMN_A | column_mask(4)) << kind
}

#[inline]
const fn premix_side(side: Side) -> u64 {
    use crate::bits::row_mask;
    let rows = row_mask(0) | row_mask(2) | row_mask(4) | row_mask(6);
    rows << (side as u64 * 8)
}

/// Hash of every piece of one kind of one side at once.
#[inline]
#[must_use]
pub const fn hhash_piece(side: Side, piece: PieceKind, bitboard: u64) -> u64 {
    bit_mixer(premix_side(side) ^ premix_kind(piece as u32) ^ bitboard)
}

/// Hash of one side's six bitboards.
#[must_use]
pub fn hhash_side(side: Side, pieces: &SidePieces) -> u64 {
    let mut r = 0;
    for piece in PieceKind::ALL {
        r ^= hhash_piece(side, piece, pieces[piece.index()]);
    }
    r
}

/// Hash of the board alone.
#[must_use]
pub fn hhash_board(board: &Board) -> u64 {
    hhash_side(Side::White, board.side(Side::White)) ^ hhash_side(Side::Black, board.side(Side::Black))
}

/// Hash of a castling-rights word. Kind slot 6 is reserved for it.
#[inline]
#[must_use]
pub const fn hhash_castling(castling_rights: u64) -> u64 {
    bit_mixer(premix_kind(6) ^ castling_rights)
}

/// Hash of an en-passant target. Kind slot 7 is reserved for it.
#[inline]
#[must_use]
pub const fn hhash_ep(ep_info: u64) -> u64 {
    bit_mixer(premix_kind(7) ^ ep_info)
}

/// Hash contribution of the side to move.
#[inline]
#[must_use]
pub const fn hhash_turn(side: Side) -> u64 {
    bit_mixer(premix_side(side))
}

/// Delta that flips the side to move.
#[inline]
#[must_use]
pub const fn hhash_make_turn() -> u64 {
    hhash_turn(Side::White) ^ hhash_turn(Side::Black)
}

/// Delta between `ep_info` and a cleared en-passant target; 0 when already
/// clear.
#[inline]
#[must_use]
pub const fn hhash_ep_change0(ep_info: u64) -> u64 {
    if ep_info != 0 {
        hhash_ep(ep_info) ^ hhash_ep(0)
    } else {
        0
    }
}

/// Delta between two castling-rights words; 0 when unchanged.
#[inline]
#[must_use]
pub const fn hhash_castling_change(before: u64, after: u64) -> u64 {
    if before != after {
        hhash_castling(before) ^ hhash_castling(after)
    } else {
        0
    }
}

/// Hash of the non-board context fields.
#[inline]
#[must_use]
pub const fn hhash_context(ctx: &Context) -> u64 {
    hhash_ep(ctx.ep_info) ^ hhash_castling(ctx.castling_rights)
}

/// Full recomputed hash of a position; the incremental hash must equal this
/// at every node.
#[must_use]
pub fn hhash_position(board: &Board, side: Side, ctx: &Context) -> u64 {
    hhash_board(board) ^ hhash_turn(side) ^ hhash_context(ctx)
}

/// The hashing aspect of the search controller.
///
/// `TRACKING` lets the scoped guards skip delta computation entirely when
/// the no-op variant is plugged in.
pub trait HashPolicy {
    const TRACKING: bool;

    fn new(board: &Board, side: Side, ctx: &Context) -> Self;

    /// Apply an XOR delta; its own inverse, so guards undo by re-applying.
    fn xor(&mut self, delta: u64);

    /// The current position hash (0 for the no-op variant).
    fn hash(&self) -> u64;
}

/// Maintains the position hash incrementally through the scoped guards.
#[derive(Clone, Copy, Debug)]
pub struct IncrementalHash {
    pub hash: u64,
}

impl HashPolicy for IncrementalHash {
    const TRACKING: bool = true;

    #[inline]
    fn new(board: &Board, side: Side, ctx: &Context) -> IncrementalHash {
        IncrementalHash {
            hash: hhash_position(board, side, ctx),
        }
    }

    #[inline]
    fn xor(&mut self, delta: u64) {
        self.hash ^= delta;
    }

    #[inline]
    fn hash(&self) -> u64 {
        self.hash
    }
}

/// Hashing disabled; pairs with [`crate::control::NoopCache`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHash;

impl HashPolicy for NoopHash {
    const TRACKING: bool = false;

    #[inline]
    fn new(_board: &Board, _side: Side, _ctx: &Context) -> NoopHash {
        NoopHash
    }

    #[inline]
    fn xor(&mut self, _delta: u64) {}

    #[inline]
    fn hash(&self) -> u64 {
        0
    }
}
