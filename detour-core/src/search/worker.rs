//! Running searches off the calling thread

use std::thread::{self, JoinHandle};

use crate::board::Board;
use crate::config::SearchConfig;
use crate::search::engine::{run_search, SearchResult, Strategy};

/// Handle to a search running on its own thread
///
/// Dropping the handle detaches the worker; it still runs until it finds a
/// goal, exhausts the frontier, or hits the cap.
#[derive(Debug)]
pub struct SearchHandle {
    strategy: Strategy,
    handle: JoinHandle<SearchResult>,
}

impl SearchHandle {
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the result. `None` if the worker panicked.
    pub fn join(self) -> Option<SearchResult> {
        match self.handle.join() {
            Ok(result) => Some(result),
            Err(_) => {
                tracing::error!("{:?} search worker panicked", self.strategy);
                None
            }
        }
    }
}

/// Start a search on a new thread. The worker owns its board and config.
pub fn spawn_search(board: Board, strategy: Strategy, config: SearchConfig) -> SearchHandle {
    let handle = thread::spawn(move || run_search(&board, strategy, &config));
    SearchHandle { strategy, handle }
}

/// Run informed and exhaustive search concurrently on the same board.
///
/// Returns `(informed, exhaustive)`.
pub fn solve_both(board: &Board, config: &SearchConfig) -> (SearchResult, SearchResult) {
    rayon::join(
        || run_search(board, Strategy::Informed, config),
        || run_search(board, Strategy::Exhaustive, config),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;
    use crate::rules::{is_win, replay};
    use crate::search::engine::SearchPhase;

    fn small_puzzle() -> Board {
        Layout::parse("N . .\nR . .\n*P . G").unwrap().build().unwrap()
    }

    #[test]
    fn test_spawn_search_joins_result() {
        let board = small_puzzle();
        let handle = spawn_search(board.clone(), Strategy::Exhaustive, SearchConfig::default());
        assert_eq!(handle.strategy(), Strategy::Exhaustive);

        let result = handle.join().unwrap();
        assert_eq!(result.phase, SearchPhase::GoalFound);
        let end = replay(&board, result.solution.as_ref().unwrap()).unwrap();
        assert!(is_win(&end));
    }

    #[test]
    fn test_spawned_runs_are_independent() {
        let board = small_puzzle();
        let handles: Vec<_> = (0..4)
            .map(|_| spawn_search(board.clone(), Strategy::Informed, SearchConfig::default()))
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for result in &results[1..] {
            assert_eq!(result.solution, results[0].solution);
            assert_eq!(result.states_explored, results[0].states_explored);
        }
    }

    #[test]
    fn test_solve_both_matches_sequential() {
        let board = small_puzzle();
        let config = SearchConfig::default();
        let (informed, exhaustive) = solve_both(&board, &config);

        assert_eq!(informed.strategy, Strategy::Informed);
        assert_eq!(exhaustive.strategy, Strategy::Exhaustive);
        assert_eq!(exhaustive.solution, run_search(&board, Strategy::Exhaustive, &config).solution);
        assert!(exhaustive.solution_len() <= informed.solution_len());
    }

    #[test]
    fn test_solve_both_respects_cap() {
        let config = SearchConfig::default().with_max_states(5);
        let (informed, exhaustive) = solve_both(&crate::layout::initial_board(), &config);
        assert!(!informed.is_solved());
        assert!(!exhaustive.is_solved());
        assert_eq!(exhaustive.states_explored, 6);
    }
}
