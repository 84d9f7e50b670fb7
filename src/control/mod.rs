//! Search controller: four orthogonal aspects plugged into one struct.
//!
//! The controller bundles the mutable search state (board, ply bound) with
//! the pruning, hashing, material and caching policies. Every policy has a
//! real and a no-op implementation behind one trait, so a search stack is
//! chosen by naming a type; monomorphization then inlines the chosen
//! behavior and erases the rest.

mod cache;
mod hash;
mod material;
mod prune;

pub use cache::{CachePolicy, NoopCache, Probe, TranspositionTable, DEFAULT_CACHE_BITS};
pub use hash::{
    hhash_board, hhash_castling, hhash_castling_change, hhash_context, hhash_ep, hhash_ep_change0,
    hhash_make_turn, hhash_piece, hhash_position, hhash_side, hhash_turn, HashPolicy,
    IncrementalHash, NoopHash,
};
pub use material::{IncrementalMaterial, MaterialPolicy, NoopMaterial};
pub use prune::{AlphaBeta, Minimax, Pruning};

use crate::board::{Board, Context};

/// Per-search state threaded through the whole recursion.
pub struct Controller<P, H, M, C> {
    pub board: Board,
    /// The halfmove count at which leaf evaluation happens.
    pub max_plies: i32,
    pub pruning: P,
    pub hasher: H,
    pub material: M,
    pub cache: C,
    /// Leaf positions evaluated; with exhaustive minimax this is a perft
    /// count.
    pub nodes: u64,
}

impl<P, H, M, C> Controller<P, H, M, C>
where
    P: Pruning,
    H: HashPolicy,
    M: MaterialPolicy,
    C: CachePolicy,
{
    /// Set up a search of `depth` plies from the position described by
    /// `board` and `ctx`.
    #[must_use]
    pub fn new(board: Board, ctx: &Context, depth: i32) -> Controller<P, H, M, C> {
        debug_assert!(board.is_valid());
        debug_assert!(ctx.is_valid());
        debug_assert!(depth > 0);
        Controller {
            max_plies: ctx.halfmove_count + depth,
            pruning: P::new(ctx.side()),
            hasher: H::new(&board, ctx.side(), ctx),
            material: M::new(&board),
            cache: C::default(),
            board,
            nodes: 0,
        }
    }

    /// True at the ply bound; the node then scores as bare material.
    #[inline]
    pub(crate) fn leaf_check(&mut self, ctx: &Context) -> bool {
        let leaf = ctx.halfmove_count == self.max_plies;
        if leaf {
            self.nodes += 1;
            self.pruning.set_score(self.material.material());
        }
        leaf
    }

    /// Plies this node still has to search.
    #[inline]
    pub(crate) fn remaining_plies(&self, ctx: &Context) -> i32 {
        self.max_plies - ctx.halfmove_count
    }
}

/// Exhaustive search, no bookkeeping: the baseline stack.
pub type MinimaxController = Controller<Minimax, NoopHash, NoopMaterial, NoopCache>;

/// Alpha-beta with no bookkeeping.
pub type AlphaBetaController = Controller<AlphaBeta, NoopHash, NoopMaterial, NoopCache>;

/// Everything on: alpha-beta, incremental hash and material, transposition
/// cache.
pub type FullController =
    Controller<AlphaBeta, IncrementalHash, IncrementalMaterial, TranspositionTable>;

/// Minimax with material, the stack used to score quiet positions exactly.
pub type MaterialController = Controller<Minimax, NoopHash, IncrementalMaterial, NoopCache>;
