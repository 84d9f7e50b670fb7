//! Board model: sides, piece kinds, the twelve-bitboard position, castling
//! descriptors and the per-frame search context.

mod castling;
mod state;
mod types;

pub use castling::{
    all_castling_blocked, castling_block_mask, castling_specs, long_castling, short_castling,
    CastlingSpec,
};
pub use state::{Board, Context, Metrics, SidePieces};
pub use types::{
    ActiveSide, Black, PieceKind, Side, White, PIECE_KINDS, PROMOTION_ORDER,
};
