//! DETOUR Core - Sliding-piece puzzle engine and solver
//!
//! This crate provides the core puzzle logic for DETOUR:
//! - Board geometry (square grid with goal and unoccupiable squares)
//! - Piece kinds, movement patterns and promotion
//! - Move generation and the win predicate
//! - Layout loading (text grid and JSON)
//! - Board fingerprinting for duplicate detection
//! - Informed and exhaustive best-first search
//! - Static board analysis

pub mod board;
pub mod pieces;
pub mod rules;
pub mod layout;
pub mod fingerprint;
pub mod heuristic;
pub mod frontier;
pub mod config;
pub mod search;
pub mod analysis;

// Re-exports for convenient access
pub use board::{Board, Position, Square, SquareKind, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE};
pub use pieces::{Movement, Piece, PieceId, PieceKind, PieceSpec, Role, PIECE_SPECS};
pub use rules::{
    apply_move, is_promoted, is_win, legal_destinations, legal_moves, promotes_on, replay, IllegalMove, Move,
    MoveOutcome,
};
pub use layout::{initial_board, Cell, Layout, LayoutError};
pub use fingerprint::{fingerprint, Fingerprint};
pub use heuristic::{estimate, estimate_with, Heuristics, NO_MOVER_ESTIMATE};
pub use config::{SearchConfig, DEFAULT_MAX_STATES, DEFAULT_YIELD_INTERVAL};
pub use search::{
    run_exhaustive_search, run_informed_search, run_search, run_search_with, solve_both, spawn_search,
    SearchHandle, SearchPhase, SearchProgress, SearchResult, Strategy,
};
pub use analysis::{analyze, BoardAnalysis, Distance};
