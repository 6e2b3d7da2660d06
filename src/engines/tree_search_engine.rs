//! Fixed-depth engine: materialise the game tree, search it, keep the move.
//!
//! Each call builds a fresh tree rooted at the caller's snapshot, searches it
//! with alpha-beta (serial or young-brothers-wait, per configuration), and
//! drops the whole tree before returning. Nothing but the configuration and
//! the worker pool survives between calls.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::chess_errors::{EngineError, EngineResult};
use crate::engines::engine_trait::{Engine, EngineOutput, SearchStats};
use crate::game_state::chess_types::{Color, Move, PositionState};
use crate::search::alpha_beta::search_serial;
use crate::search::board_scoring::StandardScorer;
use crate::search::threading::{ThreadingConfig, ThreadingModel, WorkerPool};
use crate::search::tree_builder::{build_game_tree, build_game_tree_parallel};
use crate::search::young_brothers::search_parallel;

pub const DEFAULT_SEARCH_DEPTH: u8 = 4;
/// Deepest horizon whose fully built tree still fits in memory.
pub const MAX_SEARCH_DEPTH: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub max_depth: u8,
    pub threading: ThreadingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_SEARCH_DEPTH,
            threading: ThreadingConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_depth(depth: u8) -> EngineResult<Self> {
        check_depth(depth)?;
        Ok(Self {
            max_depth: depth,
            ..Self::default()
        })
    }
}

fn check_depth(depth: u8) -> EngineResult<()> {
    if (1..=MAX_SEARCH_DEPTH).contains(&depth) {
        Ok(())
    } else {
        Err(EngineError::InvalidDepth {
            depth,
            max: MAX_SEARCH_DEPTH,
        })
    }
}

fn invalid_option(name: &str, value: &str) -> EngineError {
    EngineError::InvalidOption {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

pub struct TreeSearchEngine {
    config: EngineConfig,
    pool: WorkerPool,
    scorer: StandardScorer,
}

impl TreeSearchEngine {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        check_depth(config.max_depth)?;
        Ok(Self {
            pool: WorkerPool::start(config.threading)?,
            config,
            scorer: StandardScorer,
        })
    }

    #[inline]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    #[inline]
    pub fn worker_threads(&self) -> usize {
        self.pool.thread_count()
    }
}

impl Engine for TreeSearchEngine {
    fn name(&self) -> &str {
        "Ply Chess Tree Search"
    }

    fn set_option(&mut self, name: &str, value: &str) -> EngineResult<()> {
        let trimmed = value.trim();
        if name.eq_ignore_ascii_case("Depth") {
            let depth = trimmed
                .parse::<u8>()
                .map_err(|_| invalid_option(name, value))?;
            check_depth(depth)?;
            self.config.max_depth = depth;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Threads") {
            let threads = trimmed
                .parse::<usize>()
                .map_err(|_| invalid_option(name, value))?;
            let threading = ThreadingConfig {
                requested_threads: threads,
                ..self.config.threading
            };
            self.pool = WorkerPool::start(threading)?;
            self.config.threading = threading;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("ThreadingModel") {
            self.config.threading.model = trimmed.parse::<ThreadingModel>()?;
            return Ok(());
        }
        Err(invalid_option(name, value))
    }

    fn choose_move(&mut self, position: &PositionState, side: Color) -> EngineResult<EngineOutput> {
        let depth = self.config.max_depth;
        let model = self.config.threading.model;

        let started = Instant::now();
        let tree = match model {
            ThreadingModel::SingleThreaded => build_game_tree(*position, side, depth),
            ThreadingModel::ForkJoin => build_game_tree_parallel(*position, side, depth, &self.pool),
        };
        let build_time = started.elapsed();

        let started = Instant::now();
        let outcome = match model {
            ThreadingModel::SingleThreaded => search_serial(&tree, &self.scorer),
            ThreadingModel::ForkJoin => search_parallel(&tree, &self.scorer, &self.pool),
        };
        let search_time = started.elapsed();

        let stats = SearchStats {
            tree_nodes: tree.len(),
            tree_leaves: tree.leaf_count(),
            leaves_evaluated: outcome.leaves_evaluated,
            build_time,
            search_time,
        };
        drop(tree);

        debug!(
            ?model,
            depth,
            nodes = stats.tree_nodes,
            leaves = stats.tree_leaves,
            evaluated = stats.leaves_evaluated,
            build_ms = stats.build_time.as_millis() as u64,
            search_ms = stats.search_time.as_millis() as u64,
            "search finished"
        );

        match outcome.best_move {
            Some(mv) => {
                info!(?side, piece = mv.piece, to = mv.to, evaluation = outcome.root_value, "chose move");
                Ok(EngineOutput {
                    best_move: Some(mv),
                    evaluation: Some(outcome.root_value),
                    stats,
                })
            }
            None => {
                warn!(?side, "no move available");
                Ok(EngineOutput {
                    best_move: None,
                    evaluation: None,
                    stats,
                })
            }
        }
    }
}

/// One-shot move choice with the default configuration at `depth`.
pub fn choose_move(position: &PositionState, side: Color, depth: u8) -> EngineResult<Option<Move>> {
    let mut engine = TreeSearchEngine::new(EngineConfig::with_depth(depth)?)?;
    Ok(engine.choose_move(position, side)?.best_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::position_state::sparse_position;
    use crate::move_generation::legal_move_checks::king_safe_moves;
    use crate::search::board_scoring::BoardScorer;

    fn engine(depth: u8, model: ThreadingModel) -> TreeSearchEngine {
        let config = EngineConfig {
            max_depth: depth,
            threading: ThreadingConfig {
                model,
                requested_threads: 2,
            },
        };
        TreeSearchEngine::new(config).expect("engine should start")
    }

    #[test]
    fn opening_reply_at_depth_one_is_legal() {
        let position = PositionState::new_game();
        let out = engine(1, ThreadingModel::ForkJoin)
            .choose_move(&position, Color::Dark)
            .unwrap();
        let mv = out.best_move.expect("opening has moves");
        assert!((16..32).contains(&mv.piece));
        assert!(king_safe_moves(&position, Color::Dark).contains(&mv));
        assert!(out.evaluation.is_some());
        assert_eq!(out.stats.tree_nodes, 21);

        let after = position.with_move(mv.piece, mv.to);
        let score = StandardScorer.score(&after, Color::Dark);
        assert!(score.abs() < 1000);
    }

    #[test]
    fn takes_hanging_queen() {
        // Light queen on a4 (32) checks the Dark king along the diagonal;
        // the Dark rook on a8 can take it.
        let position = sparse_position(&[(24, 0), (14, 32)]);
        for model in [ThreadingModel::SingleThreaded, ThreadingModel::ForkJoin] {
            let out = engine(2, model).choose_move(&position, Color::Dark).unwrap();
            assert_eq!(out.best_move, Some(Move::new(24, 32)), "{model:?}");
        }
    }

    #[test]
    fn both_models_agree() {
        let mut position = PositionState::new_game();
        for (piece, to) in [(4, 36), (20, 28), (14, 31), (26, 18), (13, 34)] {
            position = position.with_move(piece, to);
        }
        let serial = engine(3, ThreadingModel::SingleThreaded)
            .choose_move(&position, Color::Dark)
            .unwrap();
        let parallel = engine(3, ThreadingModel::ForkJoin)
            .choose_move(&position, Color::Dark)
            .unwrap();
        assert_eq!(serial.best_move, parallel.best_move);
        assert_eq!(serial.evaluation, parallel.evaluation);
        assert_eq!(serial.stats.tree_nodes, parallel.stats.tree_nodes);
    }

    #[test]
    fn mated_side_gets_no_move() {
        let position = sparse_position(&[(31, 7), (14, 14), (15, 21)]);
        let out = engine(2, ThreadingModel::ForkJoin)
            .choose_move(&position, Color::Dark)
            .unwrap();
        assert_eq!(out.best_move, None);
        assert_eq!(out.evaluation, None);
        assert_eq!(out.stats.tree_nodes, 1);
    }

    #[test]
    fn options_are_validated() {
        let mut engine = engine(2, ThreadingModel::ForkJoin);
        for depth in ["5", "6", "9"] {
            assert!(
                matches!(engine.set_option("Depth", depth), Err(EngineError::InvalidDepth { max: 4, .. })),
                "depth {depth} should be refused"
            );
        }
        assert_eq!(engine.config().max_depth, 2);
        assert!(matches!(
            engine.set_option("Depth", "deep"),
            Err(EngineError::InvalidOption { .. })
        ));
        assert!(matches!(
            engine.set_option("Hash", "64"),
            Err(EngineError::InvalidOption { .. })
        ));

        assert_eq!(engine.name(), "Ply Chess Tree Search");
        engine.set_option("depth", "3").unwrap();
        engine.set_option("Threads", "3").unwrap();
        engine.set_option("ThreadingModel", "SingleThreaded").unwrap();
        assert_eq!(engine.config().max_depth, 3);
        assert_eq!(engine.worker_threads(), 3);
        assert_eq!(engine.config().threading.model, ThreadingModel::SingleThreaded);
    }

    #[test]
    fn one_shot_choice_rejects_bad_depth() {
        assert!(choose_move(&PositionState::new_game(), Color::Dark, 0).is_err());
        assert_eq!(
            choose_move(&PositionState::new_game(), Color::Dark, 5),
            Err(EngineError::InvalidDepth { depth: 5, max: MAX_SEARCH_DEPTH })
        );
        let mv = choose_move(&PositionState::new_game(), Color::Light, 1).unwrap();
        assert!(mv.is_some_and(|mv| mv.piece < 16));
    }
}
