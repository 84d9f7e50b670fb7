//! The recursive search: scoped board mutation plus the negamax loop.
//!
//! One board is mutated in place for the whole search. Every mutation is a
//! guard object that XORs a move mask into a piece bitboard on construction
//! and XORs it back on drop, together with the matching hash and material
//! deltas. Guards hand the controller borrow onward, so releases are forced
//! into LIFO order at compile time and unwinding restores the position.
//!
//! `analyze_position` explores one node: enumerate pseudo-legal moves,
//! reject an illegal position (the previous mover left its king en prise),
//! evaluate at the ply bound, consult the cache, then recurse over en
//! passant, castling, pawn and piece moves in that fixed order, letting the
//! pruning policy stop the node early.

use crate::bits::BitIter;
use crate::board::{
    castling_block_mask, castling_specs, ActiveSide, Board, CastlingSpec, Context, Metrics,
    PieceKind, Side, PROMOTION_ORDER,
};
use crate::control::{
    hhash_castling_change, hhash_ep_change0, hhash_make_turn, hhash_piece, CachePolicy, Controller,
    HashPolicy, MaterialPolicy, Probe, Pruning,
};
use crate::movegen::{
    basic_move_generators, en_passant_candidates, en_passant_capture, en_passant_victim,
    promoting_pawns, slide_and_capture_with_pawn,
};
use crate::score;

use std::marker::PhantomData;

/// The XOR delta of one piece bitboard: a complete description of half a
/// move. Short-lived; only meaningful against the board it was built for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveInfo {
    pub side: Side,
    pub piece: PieceKind,
    pub mask: u64,
}

impl MoveInfo {
    /// XOR the mask in; applying twice is a no-op.
    #[inline]
    pub(crate) fn apply(&self, board: &mut Board) {
        *board.piece_mut(self.side, self.piece) ^= self.mask;
    }
}

/// A simple move: one piece leaves `origin` and lands on `destination`.
#[inline]
#[must_use]
pub fn basic_move_info<S: ActiveSide>(piece: PieceKind, origin: u64, destination: u64) -> MoveInfo {
    MoveInfo {
        side: S::SIDE,
        piece,
        mask: origin | destination,
    }
}

/// A capture: the mover plus the removed piece. When nothing stands on the
/// destination the second info carries an empty mask and applies as a no-op.
#[must_use]
pub fn basic_capture_info<S: ActiveSide>(
    board: &Board,
    piece: PieceKind,
    origin: u64,
    destination: u64,
) -> [MoveInfo; 2] {
    let defender = S::SIDE.other();
    let mut captured = PieceKind::Pawn;
    let mut mask = 0;
    for kind in &PieceKind::ALL[..PieceKind::King.index()] {
        let hit = board.piece(defender, *kind) & destination;
        if hit != 0 {
            captured = *kind;
            mask = hit;
            break;
        }
    }
    [
        basic_move_info::<S>(piece, origin, destination),
        MoveInfo {
            side: defender,
            piece: captured,
            mask,
        },
    ]
}

/// King and rook movements of one castle.
#[inline]
#[must_use]
pub fn castle_info<S: ActiveSide>(spec: &CastlingSpec) -> [MoveInfo; 2] {
    [
        MoveInfo {
            side: S::SIDE,
            piece: PieceKind::King,
            mask: spec.king_from | spec.king_to,
        },
        MoveInfo {
            side: S::SIDE,
            piece: PieceKind::Rook,
            mask: spec.rook_from | spec.rook_to,
        },
    ]
}

/// Swap the just-pushed pawn for `promotion` on the promotion square.
#[inline]
#[must_use]
pub fn promotion_info<S: ActiveSide>(promotion: PieceKind, promotion_square: u64) -> [MoveInfo; 2] {
    [
        MoveInfo {
            side: S::SIDE,
            piece: PieceKind::Pawn,
            mask: promotion_square,
        },
        MoveInfo {
            side: S::SIDE,
            piece: promotion,
            mask: promotion_square,
        },
    ]
}

/// The capturing pawn's diagonal step plus the removed pawn, which sits on
/// the origin's rank and the destination's file.
#[inline]
#[must_use]
pub fn en_passant_info<S: ActiveSide>(origin: u64, destination: u64) -> [MoveInfo; 2] {
    [
        basic_move_info::<S>(PieceKind::Pawn, origin, destination),
        MoveInfo {
            side: S::SIDE.other(),
            piece: PieceKind::Pawn,
            mask: en_passant_victim(origin, destination),
        },
    ]
}

/// Hash delta of an already-applied move info.
#[inline]
fn applied_delta<H: HashPolicy>(board: &Board, mi: &MoveInfo) -> u64 {
    if !H::TRACKING {
        return 0;
    }
    let position = board.piece(mi.side, mi.piece);
    hhash_piece(mi.side, mi.piece, position ^ mi.mask) ^ hhash_piece(mi.side, mi.piece, position)
}

macro_rules! controller_access {
    () => {
        /// The controller, re-lent for the guard's lifetime.
        #[inline]
        pub fn ec(&mut self) -> &mut Controller<P, H, M, C> {
            self.ec
        }
    };
}

/// Board + hash scope of a quiet move.
pub struct ScopedMove<'a, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> {
    ec: &'a mut Controller<P, H, M, C>,
    mi: MoveInfo,
    hash_delta: u64,
}

impl<'a, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> ScopedMove<'a, P, H, M, C> {
    #[inline]
    pub fn new(ec: &'a mut Controller<P, H, M, C>, mi: MoveInfo) -> Self {
        mi.apply(&mut ec.board);
        let hash_delta = applied_delta::<H>(&ec.board, &mi);
        ec.hasher.xor(hash_delta);
        ScopedMove { ec, mi, hash_delta }
    }

    controller_access!();
}

impl<P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> Drop
    for ScopedMove<'_, P, H, M, C>
{
    #[inline]
    fn drop(&mut self) {
        self.ec.hasher.xor(self.hash_delta);
        self.mi.apply(&mut self.ec.board);
    }
}

/// Board + hash + material scope of a capture (or of a pawn reaching the
/// promotion rank, where the capture half may be empty).
pub struct ScopedCapture<'a, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> {
    ec: &'a mut Controller<P, H, M, C>,
    infos: [MoveInfo; 2],
    hash_delta: u64,
    material_delta: i32,
}

impl<'a, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy>
    ScopedCapture<'a, P, H, M, C>
{
    #[inline]
    pub fn new(ec: &'a mut Controller<P, H, M, C>, infos: [MoveInfo; 2]) -> Self {
        infos[0].apply(&mut ec.board);
        infos[1].apply(&mut ec.board);
        let hash_delta =
            applied_delta::<H>(&ec.board, &infos[0]) ^ applied_delta::<H>(&ec.board, &infos[1]);
        ec.hasher.xor(hash_delta);
        let material_delta = if infos[1].mask != 0 {
            -score::signed_weight(infos[1].side, infos[1].piece)
        } else {
            0
        };
        ec.material.add(material_delta);
        ScopedCapture {
            ec,
            infos,
            hash_delta,
            material_delta,
        }
    }

    controller_access!();
}

impl<P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> Drop
    for ScopedCapture<'_, P, H, M, C>
{
    #[inline]
    fn drop(&mut self) {
        self.ec.material.add(-self.material_delta);
        self.ec.hasher.xor(self.hash_delta);
        self.infos[1].apply(&mut self.ec.board);
        self.infos[0].apply(&mut self.ec.board);
    }
}

/// Board + hash scope of a castle: king and rook move together, no material
/// changes hands.
pub struct ScopedCastle<'a, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> {
    ec: &'a mut Controller<P, H, M, C>,
    infos: [MoveInfo; 2],
    hash_delta: u64,
}

impl<'a, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy>
    ScopedCastle<'a, P, H, M, C>
{
    #[inline]
    pub fn new(ec: &'a mut Controller<P, H, M, C>, infos: [MoveInfo; 2]) -> Self {
        infos[0].apply(&mut ec.board);
        infos[1].apply(&mut ec.board);
        let hash_delta =
            applied_delta::<H>(&ec.board, &infos[0]) ^ applied_delta::<H>(&ec.board, &infos[1]);
        ec.hasher.xor(hash_delta);
        ScopedCastle {
            ec,
            infos,
            hash_delta,
        }
    }

    controller_access!();
}

impl<P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> Drop
    for ScopedCastle<'_, P, H, M, C>
{
    #[inline]
    fn drop(&mut self) {
        self.ec.hasher.xor(self.hash_delta);
        self.infos[1].apply(&mut self.ec.board);
        self.infos[0].apply(&mut self.ec.board);
    }
}

/// Board + hash + material scope of a promotion swap on the last rank.
pub struct ScopedPromotion<'a, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> {
    ec: &'a mut Controller<P, H, M, C>,
    infos: [MoveInfo; 2],
    hash_delta: u64,
    material_delta: i32,
}

impl<'a, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy>
    ScopedPromotion<'a, P, H, M, C>
{
    #[inline]
    pub fn new(ec: &'a mut Controller<P, H, M, C>, infos: [MoveInfo; 2]) -> Self {
        infos[0].apply(&mut ec.board);
        infos[1].apply(&mut ec.board);
        let hash_delta =
            applied_delta::<H>(&ec.board, &infos[0]) ^ applied_delta::<H>(&ec.board, &infos[1]);
        ec.hasher.xor(hash_delta);
        let material_delta = score::signed_weight(infos[1].side, infos[1].piece)
            - score::signed_weight(infos[0].side, infos[0].piece);
        ec.material.add(material_delta);
        ScopedPromotion {
            ec,
            infos,
            hash_delta,
            material_delta,
        }
    }

    controller_access!();
}

impl<P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> Drop
    for ScopedPromotion<'_, P, H, M, C>
{
    #[inline]
    fn drop(&mut self) {
        self.ec.material.add(-self.material_delta);
        self.ec.hasher.xor(self.hash_delta);
        self.infos[1].apply(&mut self.ec.board);
        self.infos[0].apply(&mut self.ec.board);
    }
}

/// Pure hash scope: context deltas (turn flip, en passant, castling rights).
pub struct ScopedHashDelta<'a, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> {
    ec: &'a mut Controller<P, H, M, C>,
    delta: u64,
}

impl<'a, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy>
    ScopedHashDelta<'a, P, H, M, C>
{
    #[inline]
    pub fn new(ec: &'a mut Controller<P, H, M, C>, delta: u64) -> Self {
        ec.hasher.xor(delta);
        ScopedHashDelta { ec, delta }
    }

    controller_access!();
}

impl<P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> Drop
    for ScopedHashDelta<'_, P, H, M, C>
{
    #[inline]
    fn drop(&mut self) {
        self.ec.hasher.xor(self.delta);
    }
}

/// Writes the node's finished score back to the cache on scope exit.
struct ScopedCacheUpdate<'a, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> {
    ec: &'a mut Controller<P, H, M, C>,
    hash: u64,
    remaining: i32,
}

impl<'a, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy>
    ScopedCacheUpdate<'a, P, H, M, C>
{
    #[inline]
    fn new(ec: &'a mut Controller<P, H, M, C>, hash: u64, remaining: i32) -> Self {
        ScopedCacheUpdate { ec, hash, remaining }
    }

    #[inline]
    fn ec(&mut self) -> &mut Controller<P, H, M, C> {
        self.ec
    }
}

impl<P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> Drop
    for ScopedCacheUpdate<'_, P, H, M, C>
{
    #[inline]
    fn drop(&mut self) {
        let final_score = self.ec.pruning.score();
        self.ec.cache.store(self.hash, self.remaining, final_score);
    }
}

/// Pruning scope around one child; consult `cutoff` after it closes.
struct ScopedScore<'a, S: ActiveSide, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy>
{
    ec: &'a mut Controller<P, H, M, C>,
    frame: P::Frame,
    _side: PhantomData<S>,
}

impl<'a, S: ActiveSide, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy>
    ScopedScore<'a, S, P, H, M, C>
{
    #[inline]
    fn new(ec: &'a mut Controller<P, H, M, C>) -> Self {
        let frame = ec.pruning.enter::<S>();
        ScopedScore {
            ec,
            frame,
            _side: PhantomData,
        }
    }

    #[inline]
    fn ec(&mut self) -> &mut Controller<P, H, M, C> {
        self.ec
    }
}

impl<S: ActiveSide, P: Pruning, H: HashPolicy, M: MaterialPolicy, C: CachePolicy> Drop
    for ScopedScore<'_, S, P, H, M, C>
{
    #[inline]
    fn drop(&mut self) {
        self.ec.pruning.exit::<S>(self.frame);
    }
}

/// One origin's destination set, as yielded by the generators.
#[derive(Clone, Copy, Debug)]
pub struct MoveSet {
    pub piece: PieceKind,
    pub origin: u64,
    pub destinations: u64,
}

const EMPTY_MOVE_SET: MoveSet = MoveSet {
    piece: PieceKind::Pawn,
    origin: 0,
    destinations: 0,
};

/// Visit every pawn's destination set for side `S`.
#[inline]
pub fn on_pawn_moves<S: ActiveSide>(
    board: &Board,
    bm: &Metrics,
    op: &mut impl FnMut(PieceKind, u64, u64),
) {
    let all = bm.all();
    let own = bm.own_of::<S>();
    for origin in BitIter(board.piece(S::SIDE, PieceKind::Pawn)) {
        op(
            PieceKind::Pawn,
            origin,
            slide_and_capture_with_pawn::<S>(origin, all) & !own,
        );
    }
}

/// Visit every non-pawn destination set for side `S`, knight through king.
#[inline]
pub fn on_piece_moves<S: ActiveSide>(
    board: &Board,
    bm: &Metrics,
    op: &mut impl FnMut(PieceKind, u64, u64),
) {
    let all = bm.all();
    let own = bm.own_of::<S>();
    let generators = basic_move_generators::<S>();
    for kind in &PieceKind::ALL[1..] {
        let generate = generators[kind.index()];
        for origin in BitIter(board.piece(S::SIDE, *kind)) {
            op(*kind, origin, generate(origin, all) & !own);
        }
    }
}

/// Visit every basic (non-castling, non-en-passant) destination set.
#[inline]
pub fn on_basic_moves<S: ActiveSide>(
    board: &Board,
    bm: &Metrics,
    op: &mut impl FnMut(PieceKind, u64, u64),
) {
    on_pawn_moves::<S>(board, bm, &mut *op);
    on_piece_moves::<S>(board, bm, op);
}

/// Squares side `S` currently has under enemy fire: the union of the
/// opponent's basic destination sets.
#[must_use]
pub fn own_under_attack<S: ActiveSide>(board: &Board, bm: &Metrics) -> u64 {
    let mut attacked = 0;
    on_basic_moves::<S::Opponent>(board, bm, &mut |_piece, _origin, dests| {
        attacked |= dests;
    });
    attacked
}

/// True iff side `S`'s king stands on an attacked square.
#[inline]
#[must_use]
pub fn is_king_under_attack<S: ActiveSide>(board: &Board, bm: &Metrics) -> bool {
    own_under_attack::<S>(board, bm) & board.piece(S::SIDE, PieceKind::King) != 0
}

/// Open a pruning scope, analyze the child position for `S`'s opponent, and
/// report whether the node should stop.
fn recurse_with_cutoff<S, P, H, M, C>(ec: &mut Controller<P, H, M, C>, ctx: &Context) -> bool
where
    S: ActiveSide,
    P: Pruning,
    H: HashPolicy,
    M: MaterialPolicy,
    C: CachePolicy,
{
    {
        let mut scope = ScopedScore::<S, P, H, M, C>::new(&mut *ec);
        analyze_position::<S::Opponent, P, H, M, C>(scope.ec(), ctx);
    }
    ec.pruning.cutoff::<S>()
}

/// Analyze the position for side `S`, leaving the result in
/// `ec.pruning`. The board is used as a scratch buffer and is bit-for-bit
/// restored before returning.
pub fn analyze_position<S, P, H, M, C>(ec: &mut Controller<P, H, M, C>, old_ctx: &Context)
where
    S: ActiveSide,
    P: Pruning,
    H: HashPolicy,
    M: MaterialPolicy,
    C: CachePolicy,
{
    let bm = Metrics::new(&ec.board);

    let mut move_sets = [EMPTY_MOVE_SET; 16];
    let mut count = 0usize;
    let mut opponent_under_attack = 0u64;
    on_pawn_moves::<S>(&ec.board, &bm, &mut |piece, origin, dests| {
        move_sets[count] = MoveSet {
            piece,
            origin,
            destinations: dests,
        };
        count += 1;
        opponent_under_attack |= dests;
    });
    let pawn_end = count;
    on_piece_moves::<S>(&ec.board, &bm, &mut |piece, origin, dests| {
        move_sets[count] = MoveSet {
            piece,
            origin,
            destinations: dests,
        };
        count += 1;
        opponent_under_attack |= dests;
    });

    // the previous ply left its own king capturable: illegal branch, report
    // a score its parent can never prefer
    if ec.board.piece(S::SIDE.other(), PieceKind::King) & opponent_under_attack != 0 {
        ec.pruning.set_score(-score::no_valid_move(S::SIDE));
        return;
    }

    if ec.leaf_check(old_ctx) {
        return;
    }

    let remaining = ec.remaining_plies(old_ctx);
    let entry_hash = ec.hasher.hash();
    match ec.cache.probe(entry_hash, remaining) {
        Probe::Hit(cached) => {
            ec.pruning.set_score(cached);
            return;
        }
        Probe::HitRepeat => {
            ec.pruning.set_score(score::stalemate(S::SIDE));
            return;
        }
        Probe::Miss => {}
    }

    let own_attacked = own_under_attack::<S>(&ec.board, &bm);

    let mut ctx = *old_ctx;
    ctx.ep_info = 0;
    ctx.halfmove_count += 1;

    let mut cache_scope = ScopedCacheUpdate::new(ec, entry_hash, remaining);
    let mut ep_clear_scope =
        ScopedHashDelta::new(cache_scope.ec(), hhash_ep_change0(old_ctx.ep_info));
    let mut turn_scope = ScopedHashDelta::new(ep_clear_scope.ec(), hhash_make_turn());
    let ec = turn_scope.ec();

    // en-passant captures first
    let own_pawns = ec.board.piece(S::SIDE, PieceKind::Pawn);
    for origin in BitIter(en_passant_candidates(S::SIDE, own_pawns, old_ctx.ep_info)) {
        let capture = en_passant_capture(S::SIDE, origin, old_ctx.ep_info);
        if capture != 0 {
            let infos = en_passant_info::<S>(origin, capture);
            let mut mv = ScopedCapture::new(&mut *ec, infos);
            if recurse_with_cutoff::<S, P, H, M, C>(mv.ec(), &ctx) {
                return;
            }
        }
    }

    // castling; rights decay as soon as rook or king leave home
    ctx.castling_rights |= castling_block_mask(
        S::SIDE,
        ec.board.piece(S::SIDE, PieceKind::Rook),
        ec.board.piece(S::SIDE, PieceKind::King),
    );
    let mut castling_scope = ScopedHashDelta::new(
        &mut *ec,
        hhash_castling_change(old_ctx.castling_rights, ctx.castling_rights),
    );
    let ec = castling_scope.ec();

    for spec in castling_specs(S::SIDE) {
        if spec.castling_allowed(bm.own_of::<S>() | ctx.castling_rights, own_attacked) {
            let infos = castle_info::<S>(&spec);
            let mut mv = ScopedCastle::new(&mut *ec, infos);
            if recurse_with_cutoff::<S, P, H, M, C>(mv.ec(), &ctx) {
                return;
            }
        }
    }

    // pawn moves; a pawn on the seventh only ever moves to the last rank
    for move_set in &move_sets[..pawn_end] {
        if promoting_pawns(S::SIDE, move_set.destinations) != 0 {
            for destination in BitIter(move_set.destinations) {
                let infos = basic_capture_info::<S>(
                    &ec.board,
                    PieceKind::Pawn,
                    move_set.origin,
                    destination,
                );
                let mut to_last_rank = ScopedCapture::new(&mut *ec, infos);
                for promotion in PROMOTION_ORDER {
                    let swap = promotion_info::<S>(promotion, destination);
                    let mut promoted = ScopedPromotion::new(to_last_rank.ec(), swap);
                    if recurse_with_cutoff::<S, P, H, M, C>(promoted.ec(), &ctx) {
                        return;
                    }
                }
            }
        } else {
            for destination in BitIter(move_set.destinations & bm.opposing(S::SIDE)) {
                let infos = basic_capture_info::<S>(
                    &ec.board,
                    PieceKind::Pawn,
                    move_set.origin,
                    destination,
                );
                let mut mv = ScopedCapture::new(&mut *ec, infos);
                if recurse_with_cutoff::<S, P, H, M, C>(mv.ec(), &ctx) {
                    return;
                }
            }
            for destination in BitIter(move_set.destinations & !bm.opposing(S::SIDE)) {
                let old_pawns = ec.board.piece(S::SIDE, PieceKind::Pawn);
                let stop = {
                    let mv_info =
                        basic_move_info::<S>(PieceKind::Pawn, move_set.origin, destination);
                    let mut mv = ScopedMove::new(&mut *ec, mv_info);
                    ctx.ep_info = crate::movegen::en_passant_mask(
                        S::SIDE,
                        old_pawns,
                        mv.ec().board.piece(S::SIDE, PieceKind::Pawn),
                    );
                    let mut push_ep_scope =
                        ScopedHashDelta::new(mv.ec(), hhash_ep_change0(ctx.ep_info));
                    recurse_with_cutoff::<S, P, H, M, C>(push_ep_scope.ec(), &ctx)
                };
                ctx.ep_info = 0;
                if stop {
                    return;
                }
            }
        }
    }

    // knight, bishop, rook, queen, king
    for move_set in &move_sets[pawn_end..count] {
        for destination in BitIter(move_set.destinations & bm.opposing(S::SIDE)) {
            let infos =
                basic_capture_info::<S>(&ec.board, move_set.piece, move_set.origin, destination);
            let mut mv = ScopedCapture::new(&mut *ec, infos);
            if recurse_with_cutoff::<S, P, H, M, C>(mv.ec(), &ctx) {
                return;
            }
        }
        for destination in BitIter(move_set.destinations & !bm.opposing(S::SIDE)) {
            let mv_info = basic_move_info::<S>(move_set.piece, move_set.origin, destination);
            let mut mv = ScopedMove::new(&mut *ec, mv_info);
            if recurse_with_cutoff::<S, P, H, M, C>(mv.ec(), &ctx) {
                return;
            }
        }
    }

    // no child reported: mate or stalemate
    if ec.pruning.score() == score::no_valid_move(S::SIDE) {
        let king_attacked = ec.board.piece(S::SIDE, PieceKind::King) & own_attacked != 0;
        ec.pruning.set_score(if king_attacked {
            score::checkmate(S::SIDE.other())
        } else {
            score::stalemate(S::SIDE.other())
        });
    }
}

/// Analyze for whichever side the context says is to move and return the
/// resulting score.
pub fn score_position<P, H, M, C>(ec: &mut Controller<P, H, M, C>, ctx: &Context) -> i32
where
    P: Pruning,
    H: HashPolicy,
    M: MaterialPolicy,
    C: CachePolicy,
{
    match ctx.side() {
        Side::White => analyze_position::<crate::board::White, P, H, M, C>(ec, ctx),
        Side::Black => analyze_position::<crate::board::Black, P, H, M, C>(ec, ctx),
    }
    log::debug!(
        "searched to ply {}: score {}, {} leaves",
        ec.max_plies,
        ec.pruning.score(),
        ec.nodes
    );
    ec.pruning.score()
}
