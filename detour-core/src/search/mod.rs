//! Best-first search over board states
//!
//! - `arena`: node storage and path reconstruction
//! - `engine`: the search loop shared by both strategies
//! - `worker`: background and concurrent runs

pub mod arena;
pub mod engine;
pub mod worker;

pub use arena::{NodeId, SearchArena, SearchNode};
pub use engine::{
    run_exhaustive_search, run_informed_search, run_search, run_search_with, SearchPhase,
    SearchProgress, SearchResult, Strategy,
};
pub use worker::{solve_both, spawn_search, SearchHandle};
