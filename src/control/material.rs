//! The material aspect of the search controller.

use crate::board::Board;
use crate::score;

/// Incrementally-maintained material balance, white positive.
pub trait MaterialPolicy {
    fn new(board: &Board) -> Self;

    /// Apply a signed delta; guards undo with the negated delta.
    fn add(&mut self, delta: i32);

    /// The current balance (0 for the no-op variant).
    fn material(&self) -> i32;
}

/// Tracks captures and promotions as they are made and unmade.
#[derive(Clone, Copy, Debug)]
pub struct IncrementalMaterial {
    pub material: i32,
}

impl MaterialPolicy for IncrementalMaterial {
    #[inline]
    fn new(board: &Board) -> IncrementalMaterial {
        IncrementalMaterial {
            material: score::material(board),
        }
    }

    #[inline]
    fn add(&mut self, delta: i32) {
        self.material += delta;
    }

    #[inline]
    fn material(&self) -> i32 {
        self.material
    }
}

/// Material tracking disabled; leaves score as 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopMaterial;

impl MaterialPolicy for NoopMaterial {
    #[inline]
    fn new(_board: &Board) -> NoopMaterial {
        NoopMaterial
    }

    #[inline]
    fn add(&mut self, _delta: i32) {}

    #[inline]
    fn material(&self) -> i32 {
        0
    }
}
