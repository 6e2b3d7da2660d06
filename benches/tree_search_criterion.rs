use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};

use ply_chess::game_state::chess_types::{Color, PositionState};
use ply_chess::search::alpha_beta::search_serial;
use ply_chess::search::board_scoring::StandardScorer;
use ply_chess::search::threading::{ThreadingConfig, ThreadingModel, WorkerPool};
use ply_chess::search::tree_builder::{build_game_tree, build_game_tree_parallel};
use ply_chess::search::young_brothers::search_parallel;
use ply_chess::utils::layout_parser::parse_layout;

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    layout: &'static str,
    /// Tree sizes by depth, starting at depth 1; `None` skips the guard.
    expected_nodes: &'static [Option<usize>],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "opening",
        layout: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        expected_nodes: &[Some(21), Some(421), Some(9_323)],
    },
    BenchCase {
        name: "middlegame",
        layout: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1",
        expected_nodes: &[None, None, None],
    },
];

fn bench_tree_search(c: &mut Criterion) {
    let pool = WorkerPool::start(ThreadingConfig {
        model: ThreadingModel::ForkJoin,
        requested_threads: 0,
    })
    .expect("worker pool should start");

    let mut group = c.benchmark_group("tree_search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let position: PositionState = parse_layout(case.layout)
            .and_then(|board| board.snapshot())
            .expect("benchmark layout should parse");

        for (depth_idx, expected) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before benchmarking.
            let serial = build_game_tree(position, Color::Dark, depth);
            let parallel = build_game_tree_parallel(position, Color::Dark, depth, &pool);
            assert_eq!(serial.len(), parallel.len(), "{} depth {}", case.name, depth);
            if let Some(nodes) = expected {
                assert_eq!(serial.len(), *nodes, "node mismatch for {} depth {}", case.name, depth);
            }
            assert_eq!(
                search_serial(&serial, &StandardScorer).best_move,
                search_parallel(&parallel, &StandardScorer, &pool).best_move
            );

            group.throughput(Throughput::Elements(serial.len() as u64));

            group.bench_with_input(
                BenchmarkId::new(format!("{}_build_serial", case.name), depth),
                &depth,
                |b, depth| b.iter(|| black_box(build_game_tree(position, Color::Dark, *depth).len())),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("{}_build_parallel", case.name), depth),
                &depth,
                |b, depth| {
                    b.iter(|| {
                        black_box(build_game_tree_parallel(position, Color::Dark, *depth, &pool).len())
                    })
                },
            );
            group.bench_with_input(
                BenchmarkId::new(format!("{}_search_serial", case.name), depth),
                &depth,
                |b, depth| {
                    b.iter_batched(
                        || build_game_tree(position, Color::Dark, *depth),
                        |tree| black_box(search_serial(&tree, &StandardScorer).root_value),
                        BatchSize::LargeInput,
                    )
                },
            );
            group.bench_with_input(
                BenchmarkId::new(format!("{}_search_parallel", case.name), depth),
                &depth,
                |b, depth| {
                    b.iter_batched(
                        || build_game_tree(position, Color::Dark, *depth),
                        |tree| black_box(search_parallel(&tree, &StandardScorer, &pool).root_value),
                        BatchSize::LargeInput,
                    )
                },
            );
        }
    }

    group.finish();
}

criterion_group!(tree_search_benches, bench_tree_search);
criterion_main!(tree_search_benches);
