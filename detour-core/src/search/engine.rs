//! Best-first search loop
//!
//! One loop serves both strategies; they differ only in the frontier key:
//! - Informed: `cost + estimate`, fast, may return a non-minimal solution
//! - Exhaustive: `cost` alone, FIFO among equals, so expansion is level
//!   order and the first goal dequeued is a shortest solution
//!
//! ## Architecture
//! - Level 2: run_search_with (coordination, phase transitions)
//! - Level 3: expand (child generation and dedup)
//! - Level 4: priority, progress snapshots

use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::board::Board;
use crate::config::SearchConfig;
use crate::fingerprint::{fingerprint, Fingerprint};
use crate::frontier::Frontier;
use crate::heuristic::estimate_with;
use crate::rules::{is_win, legal_moves, play, Move};
use crate::search::arena::{NodeId, SearchArena, SearchNode};

// ============================================================================
// TYPES
// ============================================================================

/// Which frontier ordering to use
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Strategy {
    /// Best-first on moves-so-far plus heuristic
    Informed,
    /// Level order on moves-so-far
    Exhaustive,
}

/// Lifecycle of one run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SearchPhase {
    Ready,
    Expanding,
    GoalFound,
    Exhausted,
}

/// Snapshot handed to the checkpoint hook
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchProgress {
    pub strategy: Strategy,
    pub phase: SearchPhase,
    pub states_explored: usize,
    pub states_generated: usize,
    pub frontier_len: usize,
    pub best_key: Option<u32>,
}

/// Result of a search run
#[derive(Clone, Debug, Serialize)]
pub struct SearchResult {
    pub strategy: Strategy,
    pub phase: SearchPhase,
    /// Moves from the start board to a winning board
    pub solution: Option<Vec<Move>>,
    /// States dequeued from the frontier
    pub states_explored: usize,
    /// States appended to the arena, root included
    pub states_generated: usize,
    pub elapsed: Duration,
}

impl SearchResult {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Number of moves in the solution
    pub fn solution_len(&self) -> Option<usize> {
        self.solution.as_ref().map(Vec::len)
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Informed search with default configuration
pub fn run_informed_search(start: &Board) -> SearchResult {
    run_search(start, Strategy::Informed, &SearchConfig::default())
}

/// Exhaustive search with default configuration
pub fn run_exhaustive_search(start: &Board) -> SearchResult {
    run_search(start, Strategy::Exhaustive, &SearchConfig::default())
}

/// Run a search, yielding the thread at each checkpoint
pub fn run_search(start: &Board, strategy: Strategy, config: &SearchConfig) -> SearchResult {
    run_search_with(start, strategy, config, &mut |_| std::thread::yield_now())
}

// ============================================================================
// SEARCH LOOP (Level 2 - Main Coordination)
// ============================================================================

/// Run a search, calling `checkpoint` every `config.yield_interval` dequeues.
///
/// The frontier, arena and visited table are local to this call. The
/// checkpoint sees a progress snapshot only and cannot affect ordering.
pub fn run_search_with(
    start: &Board,
    strategy: Strategy,
    config: &SearchConfig,
    checkpoint: &mut dyn FnMut(&SearchProgress),
) -> SearchResult {
    let started = Instant::now();
    tracing::debug!("{:?} search starting (cap {} states)", strategy, config.max_states);

    let root_estimate = node_estimate(start, strategy, config);
    let mut arena = SearchArena::new(SearchNode::root(start.clone(), root_estimate));
    let mut frontier = Frontier::new();
    let mut best_cost: FxHashMap<Fingerprint, u32> = FxHashMap::default();
    best_cost.insert(fingerprint(start), 0);
    frontier.insert(NodeId::ROOT, priority(arena.get(NodeId::ROOT), strategy));

    let mut phase = SearchPhase::Ready;
    let mut explored = 0usize;
    let mut goal = None;

    while let Some(id) = frontier.extract_min() {
        phase = SearchPhase::Expanding;
        explored += 1;

        if config.yield_interval > 0 && explored % config.yield_interval == 0 {
            let progress = SearchProgress {
                strategy,
                phase,
                states_explored: explored,
                states_generated: arena.len(),
                frontier_len: frontier.len(),
                best_key: frontier.peek_key(),
            };
            tracing::debug!(
                "{:?} checkpoint: {} explored, {} queued",
                strategy,
                progress.states_explored,
                progress.frontier_len
            );
            checkpoint(&progress);
        }

        let node = arena.get(id);
        if is_win(&node.board) {
            phase = SearchPhase::GoalFound;
            goal = Some(id);
            break;
        }

        if explored > config.max_states {
            tracing::warn!("{:?} search hit exploration cap of {} states", strategy, config.max_states);
            break;
        }

        // Stale entry: a cheaper path to this board was queued later
        let key = fingerprint(&node.board);
        if best_cost.get(&key).is_some_and(|&best| best < node.cost) {
            continue;
        }

        expand(&mut arena, &mut frontier, &mut best_cost, id, strategy, config);
    }

    if goal.is_none() {
        phase = SearchPhase::Exhausted;
    }
    let solution = goal.map(|id| arena.reconstruct(id));
    let elapsed = started.elapsed();

    tracing::info!(
        "{:?} search {:?}: {} moves, {} explored, {} generated in {:?}",
        strategy,
        phase,
        solution.as_ref().map_or(0, Vec::len),
        explored,
        arena.len(),
        elapsed
    );

    SearchResult {
        strategy,
        phase,
        solution,
        states_explored: explored,
        states_generated: arena.len(),
        elapsed,
    }
}

// ============================================================================
// EXPANSION (Level 3)
// ============================================================================

/// Queue every child of `id` that improves on its board's best known cost
fn expand(
    arena: &mut SearchArena,
    frontier: &mut Frontier,
    best_cost: &mut FxHashMap<Fingerprint, u32>,
    id: NodeId,
    strategy: Strategy,
    config: &SearchConfig,
) {
    let cost = arena.get(id).cost + 1;

    for mv in legal_moves(&arena.get(id).board) {
        let child = play(&arena.get(id).board, &mv.piece, mv.to);
        let key = fingerprint(&child);
        if best_cost.get(&key).is_some_and(|&best| best <= cost) {
            continue;
        }
        best_cost.insert(key, cost);

        let estimate = node_estimate(&child, strategy, config);
        let child_id = arena.push(SearchNode {
            board: child,
            cost,
            estimate,
            via: Some(mv),
            parent: Some(id),
        });
        frontier.insert(child_id, priority(arena.get(child_id), strategy));
    }
}

// ============================================================================
// UTILITIES (Level 4)
// ============================================================================

fn node_estimate(board: &Board, strategy: Strategy, config: &SearchConfig) -> u32 {
    match strategy {
        Strategy::Informed => estimate_with(board, &config.heuristics),
        Strategy::Exhaustive => 0,
    }
}

fn priority(node: &SearchNode, strategy: Strategy) -> u32 {
    match strategy {
        Strategy::Informed => node.total(),
        Strategy::Exhaustive => node.cost,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;
    use crate::layout::{initial_board, Layout};
    use crate::pieces::PieceKind;
    use crate::rules::{apply_move, replay};

    fn small_puzzle() -> Board {
        // Mover must clear the slider ahead of it, promote, then slide home
        Layout::parse("N . .\nR . .\n*P . G").unwrap().build().unwrap()
    }

    #[test]
    fn test_single_step_win() {
        // Stepping onto the promotion row lands on the goal
        let start = Layout::parse("G .\n*P .").unwrap().build().unwrap();
        let result = run_informed_search(&start);
        assert_eq!(result.phase, SearchPhase::GoalFound);
        assert_eq!(result.solution_len(), Some(1));
        assert!(result.solution.as_ref().unwrap()[0].promotes);
        assert_eq!(result.states_explored, 2);
    }

    #[test]
    fn test_small_puzzle_both_strategies() {
        let start = small_puzzle();
        let informed = run_informed_search(&start);
        let exhaustive = run_exhaustive_search(&start);

        for result in [&informed, &exhaustive] {
            assert_eq!(result.phase, SearchPhase::GoalFound);
            let moves = result.solution.as_ref().unwrap();
            let end = replay(&start, moves).unwrap();
            assert!(is_win(&end));
        }
        assert!(exhaustive.solution_len() <= informed.solution_len());
    }

    #[test]
    fn test_unsolvable_exhausts() {
        // Stepper boxed in by an unoccupiable square
        let start = Layout::parse("G . .\n# . .\n*P . .").unwrap().build().unwrap();
        let result = run_exhaustive_search(&start);
        assert_eq!(result.phase, SearchPhase::Exhausted);
        assert!(result.solution.is_none());
        assert_eq!(result.states_explored, 1);
    }

    #[test]
    fn test_cap_stops_search() {
        let config = SearchConfig::default().with_max_states(10);
        let result = run_search(&initial_board(), Strategy::Exhaustive, &config);
        assert_eq!(result.phase, SearchPhase::Exhausted);
        assert!(result.solution.is_none());
        assert_eq!(result.states_explored, 11);
    }

    #[test]
    fn test_checkpoint_does_not_change_result() {
        let start = small_puzzle();
        let config = SearchConfig::default().with_yield_interval(1);
        let mut calls = 0;
        let observed = run_search_with(&start, Strategy::Exhaustive, &config, &mut |p| {
            calls += 1;
            assert_eq!(p.states_explored, calls);
            assert_eq!(p.phase, SearchPhase::Expanding);
        });
        let quiet = run_search(&start, Strategy::Exhaustive, &SearchConfig::default().with_yield_interval(0));

        assert_eq!(calls, observed.states_explored);
        assert_eq!(observed.solution, quiet.solution);
        assert_eq!(observed.states_explored, quiet.states_explored);
    }

    #[test]
    fn test_reference_exhaustive_is_shortest() {
        let start = initial_board();
        let exhaustive = run_exhaustive_search(&start);
        assert_eq!(exhaustive.phase, SearchPhase::GoalFound);
        let moves = exhaustive.solution.as_ref().unwrap();
        assert_eq!(moves.len(), 22);

        let end = replay(&start, moves).unwrap();
        assert!(is_win(&end));
        let mover = end.mover().unwrap();
        assert_eq!(mover.position, Position::new(3, 0));
        assert_eq!(mover.kind, PieceKind::CombinedSlider);

        // The mover promotes exactly once, on reaching row 0
        let mut board = start.clone();
        let mut promotions = 0;
        for mv in moves {
            let outcome = apply_move(&board, mv).unwrap();
            if outcome.promoted {
                promotions += 1;
                assert!(mv.piece.is_mover());
                assert_eq!(mv.to.row, 0);
            }
            board = outcome.board;
        }
        assert_eq!(promotions, 1);
    }

    #[test]
    fn test_saturated_heuristic_still_solves() {
        let start = small_puzzle();
        let heuristics = crate::heuristic::Heuristics { blocker_weight: u32::MAX };
        let config = SearchConfig::default().with_heuristics(heuristics);
        let result = run_search(&start, Strategy::Informed, &config);
        assert_eq!(result.phase, SearchPhase::GoalFound);
        assert!(is_win(&replay(&start, result.solution.as_ref().unwrap()).unwrap()));
    }

    #[test]
    fn test_reference_informed_not_longer_than_needed() {
        let start = initial_board();
        let informed = run_informed_search(&start);
        assert_eq!(informed.phase, SearchPhase::GoalFound);
        let len = informed.solution_len().unwrap();
        assert!(len >= 22, "informed found {len} moves, below the proven minimum");
        assert!(informed.states_explored < 100_000);
    }
}
