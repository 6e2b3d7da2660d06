//! Errors used throughout the engine.
//!
//! `EngineError` is the single error type returned by snapshot validation,
//! interactive move application, engine configuration and worker-pool setup.
//! Search itself never fails once it has a valid position: "no move available"
//! is reported through `EngineOutput::best_move == None`, not as an error.

use thiserror::Error;

use crate::game_state::chess_types::{PieceId, Square};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The snapshot handed to the engine is internally inconsistent.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// A configuration option name or value was not understood.
    #[error("invalid option {name}={value}")]
    InvalidOption { name: String, value: String },

    /// Requested search depth outside the supported horizon.
    #[error("search depth {depth} outside 1..={max}")]
    InvalidDepth { depth: u8, max: u8 },

    /// The interactive board rejected a move.
    #[error("illegal move: piece {piece} to square {to}")]
    IllegalMove { piece: PieceId, to: Square },

    /// The task-execution context could not be started.
    #[error("worker pool: {0}")]
    WorkerPool(String),

    /// A board layout string could not be parsed.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
