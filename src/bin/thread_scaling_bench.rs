use ply_chess::engines::engine_trait::Engine;
use ply_chess::engines::tree_search_engine::{EngineConfig, TreeSearchEngine};
use ply_chess::game_state::chess_types::{Color, PositionState};
use ply_chess::search::threading::{ThreadingConfig, ThreadingModel};
use ply_chess::utils::layout_parser::parse_layout;
use ply_chess::utils::render_position::render_position;
use std::env;
use tracing_subscriber::EnvFilter;

fn parse_arg<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> T {
    args.get(idx)
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or(default)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let max_threads: usize = parse_arg(&args, 1, 8usize);
    let depth: u8 = parse_arg(&args, 2, 4u8);
    let runs_per_thread: usize = parse_arg(&args, 3, 3usize);

    let positions: Vec<PositionState> = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1",
    ]
    .iter()
    .filter_map(|layout| parse_layout(layout).and_then(|board| board.snapshot()).ok())
    .collect();

    if let Some(sample) = positions.last() {
        println!("{}\n", render_position(sample));
    }
    println!(
        "Thread scaling benchmark: max_threads={} depth={} runs_per_thread={}",
        max_threads, depth, runs_per_thread
    );
    println!("threads,build_ms,search_ms,nodes,leaves_evaluated,searched_runs");

    for threads in 1..=max_threads.max(1) {
        let config = EngineConfig {
            max_depth: depth,
            threading: ThreadingConfig {
                model: if threads == 1 {
                    ThreadingModel::SingleThreaded
                } else {
                    ThreadingModel::ForkJoin
                },
                requested_threads: threads,
            },
        };
        let mut engine = match TreeSearchEngine::new(config) {
            Ok(engine) => engine,
            Err(err) => {
                eprintln!("cannot start engine with {threads} threads: {err}");
                continue;
            }
        };

        let mut build_ms: u128 = 0;
        let mut search_ms: u128 = 0;
        let mut nodes = 0usize;
        let mut evaluated = 0u64;
        let mut searched_runs = 0usize;

        for _ in 0..runs_per_thread.max(1) {
            for position in &positions {
                let Ok(out) = engine.choose_move(position, Color::Dark) else {
                    continue;
                };
                build_ms += out.stats.build_time.as_millis();
                search_ms += out.stats.search_time.as_millis();
                nodes += out.stats.tree_nodes;
                evaluated += out.stats.leaves_evaluated;
                searched_runs += 1;
            }
        }

        println!(
            "{},{},{},{},{},{}",
            threads, build_ms, search_ms, nodes, evaluated, searched_runs
        );
    }
}
