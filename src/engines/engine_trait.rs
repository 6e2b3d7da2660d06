//! Engine abstraction layer.
//!
//! Defines the configuration surface and output payload shared by engine
//! strategies so callers can drive any of them behind a single trait.

use std::time::Duration;

use crate::chess_errors::EngineResult;
use crate::game_state::chess_types::{Color, Move, PositionState};

/// Counters and timings of one `choose_move` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub tree_nodes: usize,
    pub tree_leaves: usize,
    pub leaves_evaluated: u64,
    pub build_time: Duration,
    pub search_time: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// `None` when the side to move has no move left.
    pub best_move: Option<Move>,
    /// Root value from the mover's perspective, present with `best_move`.
    pub evaluation: Option<i32>,
    pub stats: SearchStats,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> EngineResult<()> {
        Ok(())
    }

    /// Picks a move for `side` in `position`, blocking until it is ready.
    fn choose_move(&mut self, position: &PositionState, side: Color) -> EngineResult<EngineOutput>;
}
