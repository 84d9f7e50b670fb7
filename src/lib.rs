//! Bounded-ply chess position analyzer.
//!
//! Given a board and a side to move, the engine explores the game tree to a
//! fixed ply depth and returns a centipawn-unit material score, with
//! sentinel scores for checkmate and stalemate. The whole search runs on a
//! single in-place board; every mutation is a scoped guard that undoes
//! itself on drop, and the pruning, hashing, material and caching concerns
//! are independent policies assembled into one [`control::Controller`].
//!
//! ```
//! use plyscope::board::{Board, Context};
//! use plyscope::control::MinimaxController;
//! use plyscope::search::score_position;
//!
//! let ctx = Context::start();
//! let mut ec = MinimaxController::new(Board::initial(), &ctx, 2);
//! // two quiet plies from the initial position keep material level
//! assert_eq!(score_position(&mut ec, &ctx), 0);
//! ```

pub mod bits;
pub mod board;
pub mod control;
pub mod io;
pub mod movegen;
pub mod score;
pub mod search;

pub use board::{Board, Context, PieceKind, Side};
pub use control::{
    AlphaBetaController, Controller, FullController, MaterialController, MinimaxController,
};
pub use io::{make_input_move, make_input_moves, scan_fen, ParseError};
pub use search::score_position;
