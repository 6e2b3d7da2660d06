//! Crate root module declarations for the Ply Chess engine.
//!
//! This file exposes all top-level subsystems (position representation, move
//! generation, check detection, game-tree construction and search, the engine
//! facade, and utility helpers) so binaries, benches, and external callers
//! can import stable module paths.

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod chessboard;
    pub mod position_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_shared;
    pub mod move_generator;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod game_tree;
    pub mod threading;
    pub mod tree_builder;
    pub mod young_brothers;
}

pub mod engines {
    pub mod engine_trait;
    pub mod tree_search_engine;
}

pub mod utils {
    pub mod layout_parser;
    pub mod render_position;
}
