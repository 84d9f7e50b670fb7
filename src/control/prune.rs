//! Pruning policies: plain minimax and alpha-beta.
//!
//! Both expose the same shape to the search: a score register, a per-child
//! frame saved on entry and merged on exit, and a cutoff test. Exchanging
//! one for the other never changes the score of a position, only how much
//! of the tree gets visited.

use crate::board::{ActiveSide, Side};
use crate::score;

/// The pruning aspect of the search controller.
///
/// `enter::<S>` is called by the node for side `S` just before recursing
/// into a child; it parks the parent's accumulator and re-seeds the score
/// register with the child's untouched marker. `exit::<S>` merges the
/// child's result back with [`score::best`]. `cutoff::<S>` is consulted
/// after each child; `true` short-circuits the node.
pub trait Pruning {
    /// Saved per-child state, restored by `exit`.
    type Frame: Copy;

    fn new(side: Side) -> Self;

    fn score(&self) -> i32;

    fn set_score(&mut self, score: i32);

    fn enter<S: ActiveSide>(&mut self) -> Self::Frame;

    fn exit<S: ActiveSide>(&mut self, frame: Self::Frame);

    fn cutoff<S: ActiveSide>(&self) -> bool;
}

/// Exhaustive search; never cuts.
#[derive(Debug)]
pub struct Minimax {
    pub score: i32,
}

impl Pruning for Minimax {
    type Frame = i32;

    #[inline]
    fn new(side: Side) -> Minimax {
        Minimax {
            score: -score::limit(side),
        }
    }

    #[inline]
    fn score(&self) -> i32 {
        self.score
    }

    #[inline]
    fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    #[inline]
    fn enter<S: ActiveSide>(&mut self) -> i32 {
        let old = self.score;
        self.score = score::no_valid_move(S::SIDE.other());
        old
    }

    #[inline]
    fn exit<S: ActiveSide>(&mut self, old: i32) {
        self.score = score::best::<S>(old, self.score);
    }

    #[inline]
    fn cutoff<S: ActiveSide>(&self) -> bool {
        false
    }
}

/// Alpha-beta pruning. `alpha` is the white threshold, `beta` the black one;
/// a node for side S cuts as soon as its score is no worse (for S) than the
/// opponent's threshold.
#[derive(Debug)]
pub struct AlphaBeta {
    pub alpha: i32,
    pub score: i32,
    pub beta: i32,
}

impl AlphaBeta {
    #[inline]
    fn threshold<S: ActiveSide>(&self) -> i32 {
        match S::SIDE {
            Side::White => self.alpha,
            Side::Black => self.beta,
        }
    }

    #[inline]
    fn threshold_mut<S: ActiveSide>(&mut self) -> &mut i32 {
        match S::SIDE {
            Side::White => &mut self.alpha,
            Side::Black => &mut self.beta,
        }
    }
}

impl Pruning for AlphaBeta {
    /// (own threshold, score, opponent threshold) at entry.
    type Frame = (i32, i32, i32);

    #[inline]
    fn new(side: Side) -> AlphaBeta {
        AlphaBeta {
            alpha: -score::limit(Side::White),
            score: -score::limit(side),
            beta: -score::limit(Side::Black),
        }
    }

    #[inline]
    fn score(&self) -> i32 {
        self.score
    }

    #[inline]
    fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    #[inline]
    fn enter<S: ActiveSide>(&mut self) -> Self::Frame {
        let frame = (
            self.threshold::<S>(),
            self.score,
            self.threshold::<S::Opponent>(),
        );
        self.score = score::no_valid_move(S::SIDE.other());
        frame
    }

    #[inline]
    fn exit<S: ActiveSide>(&mut self, (own, old_score, other): Self::Frame) {
        self.score = score::best::<S>(old_score, self.score);
        let raised = score::best::<S>(own, self.score);
        *self.threshold_mut::<S>() = raised;
        *self.threshold_mut::<S::Opponent>() = other;
    }

    #[inline]
    fn cutoff<S: ActiveSide>(&self) -> bool {
        score::less_equal::<S>(self.threshold::<S::Opponent>(), self.score)
    }
}
