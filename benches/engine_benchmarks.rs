//! Benchmarks: raw move-set generation and bounded-ply mate searches.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use plyscope::board::{all_castling_blocked, Board, Context, Metrics, Side, White};
use plyscope::control::{AlphaBetaController, MinimaxController};
use plyscope::io::scan_board;
use plyscope::search::{on_basic_moves, score_position};

// http://www.chess.com/forum/view/more-puzzles/forced-mate-in-52 (flawed
// position, but a dense middlegame for generation workloads)
const WALK_BOARD: &str = "......rk\n\
                          R......p\n\
                          ..pp....\n\
                          .pP..n..\n\
                          .P..B.Q.\n\
                          n......P\n\
                          .......K\n\
                          r...q...\n";

const MATE_BOARD: &str = ".......Q\n\
                          p.pk..pp\n\
                          ...p....\n\
                          ....p...\n\
                          .P.PP..b\n\
                          ...q.P..\n\
                          PP.....P\n\
                          RNB.K..R\n";

fn no_castle_context(side: Side) -> Context {
    let mut ctx = Context {
        castling_rights: all_castling_blocked(),
        ..Context::start()
    };
    ctx.set_fullmove(1, side);
    ctx
}

fn bench_move_set_walk(c: &mut Criterion) {
    let board = scan_board(WALK_BOARD);
    c.bench_function("move_set_walk", |b| {
        b.iter(|| {
            let bm = Metrics::new(&board);
            let mut reach = 0u64;
            on_basic_moves::<White>(&board, &bm, &mut |_piece, _origin, dests| {
                reach |= dests;
            });
            black_box(reach)
        })
    });
}

fn bench_mate_check(c: &mut Criterion) {
    let board = scan_board(MATE_BOARD);
    let ctx = no_castle_context(Side::White);
    c.bench_function("mate_check_one_ply", |b| {
        b.iter(|| {
            let mut ec = MinimaxController::new(black_box(board), &ctx, 1);
            score_position(&mut ec, &ctx)
        })
    });
}

fn bench_search_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("alphabeta_startpos");
    let board = Board::initial();
    let ctx = Context::start();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut ec = AlphaBetaController::new(black_box(board), &ctx, depth);
                score_position(&mut ec, &ctx)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_move_set_walk,
    bench_mate_check,
    bench_search_depth
);
criterion_main!(benches);
