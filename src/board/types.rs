//! Side and piece-kind types.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two players. White occupies ranks 1-2 in the initial position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    White = 0,
    Black = 1,
}

impl Side {
    /// The opponent of this side.
    #[inline]
    #[must_use]
    pub const fn other(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Number of piece kinds per side.
pub const PIECE_KINDS: usize = 6;

/// Chess piece kinds, pawn first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    Pawn = 0,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All kinds in index order.
    pub const ALL: [PieceKind; PIECE_KINDS] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Promotion candidates in the order the search tries them.
pub const PROMOTION_ORDER: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Bishop,
];

/// Type-level side token. Search and move generation are generic over an
/// `ActiveSide`, so each side's code path monomorphizes with the side known
/// at compile time and no side branch survives in the inner loops.
pub trait ActiveSide: Copy + 'static {
    /// The runtime value of this token.
    const SIDE: Side;
    /// The opposing token.
    type Opponent: ActiveSide;
}

/// White to move.
#[derive(Clone, Copy, Debug)]
pub struct White;

/// Black to move.
#[derive(Clone, Copy, Debug)]
pub struct Black;

impl ActiveSide for White {
    const SIDE: Side = Side::White;
    type Opponent = Black;
}

impl ActiveSide for Black {
    const SIDE: Side = Side::Black;
    type Opponent = White;
}
