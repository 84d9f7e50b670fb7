//! Board and search context.
//!
//! The board is twelve bitboards: two sides times six piece kinds. A search
//! owns exactly one and mutates it in place; scoped guards in the search
//! module guarantee every mutation is undone on scope exit.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bits::{count_bits, is_single_bit, row_mask};
use crate::board::castling::is_valid_rights;
use crate::board::types::{ActiveSide, PieceKind, Side, PIECE_KINDS};

/// One side's six piece bitboards, indexed by [`PieceKind`].
pub type SidePieces = [u64; PIECE_KINDS];

const fn sq(file: u64, rank: u64) -> u64 {
    1u64 << (rank * 8 + file)
}

const INITIAL_WHITE: SidePieces = [
    row_mask(1),          // pawns
    sq(1, 0) | sq(6, 0),  // knights
    sq(2, 0) | sq(5, 0),  // bishops
    sq(0, 0) | sq(7, 0),  // rooks
    sq(3, 0),             // queen
    sq(4, 0),             // king
];

/// The full position: `sides[side][piece]` occupancy, 96 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    sides: [SidePieces; 2],
}

impl Board {
    /// A board with no pieces.
    #[inline]
    #[must_use]
    pub const fn empty() -> Board {
        Board {
            sides: [[0; PIECE_KINDS]; 2],
        }
    }

    /// The standard initial position.
    #[must_use]
    pub fn initial() -> Board {
        let mut board = Board {
            sides: [INITIAL_WHITE; 2],
        };
        mirror_side(&mut board.sides[Side::Black.index()]);
        board
    }

    /// One side's piece bitboards.
    #[inline]
    #[must_use]
    pub fn side(&self, side: Side) -> &SidePieces {
        &self.sides[side.index()]
    }

    /// Occupancy of one piece kind of one side.
    #[inline]
    #[must_use]
    pub fn piece(&self, side: Side, piece: PieceKind) -> u64 {
        self.sides[side.index()][piece.index()]
    }

    /// Mutable occupancy of one piece kind; the scoped-move guards XOR
    /// through this.
    #[inline]
    pub fn piece_mut(&mut self, side: Side, piece: PieceKind) -> &mut u64 {
        &mut self.sides[side.index()][piece.index()]
    }

    /// Union of one side's pieces.
    #[inline]
    #[must_use]
    pub fn obstacles(&self, side: Side) -> u64 {
        let mut r = 0;
        for p in self.sides[side.index()] {
            r |= p;
        }
        r
    }

    /// The position with ranks reversed and sides swapped. Used for
    /// side-agnostic testing only.
    #[must_use]
    pub fn mirror(mut self) -> Board {
        mirror_side(&mut self.sides[0]);
        mirror_side(&mut self.sides[1]);
        self.sides.swap(0, 1);
        self
    }

    /// Structural validity: per side, pairwise-disjoint piece boards, exactly
    /// one king, at most eight pawns and at most sixteen pieces; the two
    /// sides disjoint. Search positions must always pass.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let mut occupied = 0u64;
        for side in [Side::White, Side::Black] {
            let pieces = self.side(side);
            for p in pieces {
                if occupied & p != 0 {
                    return false;
                }
                occupied |= p;
            }
            if !is_single_bit(pieces[PieceKind::King.index()]) {
                return false;
            }
            if count_bits(pieces[PieceKind::Pawn.index()]) > 8 {
                return false;
            }
            if count_bits(self.obstacles(side)) > 16 {
                return false;
            }
        }
        true
    }
}

fn mirror_side(side: &mut SidePieces) {
    for p in side.iter_mut() {
        *p = p.swap_bytes();
    }
}

/// Derived occupancy record, rebuilt once per search node.
#[derive(Clone, Copy, Debug)]
pub struct Metrics {
    pieces: [u64; 2],
}

impl Metrics {
    #[inline]
    #[must_use]
    pub fn new(board: &Board) -> Metrics {
        Metrics {
            pieces: [board.obstacles(Side::White), board.obstacles(Side::Black)],
        }
    }

    /// Union of both sides.
    #[inline]
    #[must_use]
    pub fn all(&self) -> u64 {
        self.pieces[0] | self.pieces[1]
    }

    /// One side's occupancy.
    #[inline]
    #[must_use]
    pub fn own(&self, side: Side) -> u64 {
        self.pieces[side.index()]
    }

    /// The opponent's occupancy.
    #[inline]
    #[must_use]
    pub fn opposing(&self, side: Side) -> u64 {
        self.pieces[side.other().index()]
    }

    /// Monomorphized accessor for the generic search loops.
    #[inline]
    #[must_use]
    pub fn own_of<S: ActiveSide>(&self) -> u64 {
        self.pieces[S::SIDE.index()]
    }
}

/// Everything beyond the board needed to replay or hash a position.
///
/// `halfmove_count` is the number of plies since the start of the game; its
/// parity is the side to move. `castling_rights` holds blocking masks (see
/// [`crate::board::castling_block_mask`]). `ep_info` carries at most one
/// bit, on rank 3 or 6: the square a pawn just double-pushed over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Context {
    pub ep_info: u64,
    pub castling_rights: u64,
    pub halfmove_count: i32,
    /// Fifty-move-rule counter; tracked by the resolver, not enforced by the
    /// search.
    pub halfmove_clock: i32,
}

impl Context {
    /// Game-start context: every right available, no en-passant target.
    #[inline]
    #[must_use]
    pub const fn start() -> Context {
        Context {
            ep_info: 0,
            castling_rights: 0,
            halfmove_count: 0,
            halfmove_clock: 0,
        }
    }

    /// The side to move.
    #[inline]
    #[must_use]
    pub const fn side(&self) -> Side {
        if self.halfmove_count & 1 == 0 {
            Side::White
        } else {
            Side::Black
        }
    }

    /// Set the ply counter from a FEN-style fullmove number and side.
    #[inline]
    pub fn set_fullmove(&mut self, fullmove_number: i32, side: Side) {
        self.halfmove_count = (fullmove_number - 1) * 2 + side.index() as i32;
    }

    /// The FEN-style fullmove number and side to move.
    #[inline]
    #[must_use]
    pub const fn fullmove_number(&self) -> (i32, Side) {
        (1 + self.halfmove_count / 2, self.side())
    }

    /// Contextual validity: a well-formed rights word and an ep target on
    /// rank 3 or 6 at most one bit wide.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        use crate::bits::is_at_most_single_bit;
        is_valid_rights(self.castling_rights)
            && is_at_most_single_bit(self.ep_info)
            && self.ep_info & !(row_mask(2) | row_mask(5)) == 0
            && self.halfmove_count >= 0
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::start()
    }
}
