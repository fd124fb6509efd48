//! Solve command - search for a solution from a layout
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), solve(), report_results()
//! - Level 3: text and JSON printers

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use detour_core::{run_search, solve_both, Board, SearchConfig, SearchResult, DEFAULT_MAX_STATES};

use crate::layout_arg::{format_move, LayoutArg, StrategyArg};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct SolveArgs {
    #[command(flatten)]
    pub layout: LayoutArg,

    /// Search strategy
    #[arg(long, value_enum, default_value = "both")]
    pub strategy: StrategyArg,

    /// Stop after exploring this many states
    #[arg(long, default_value_t = DEFAULT_MAX_STATES)]
    pub max_states: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct SolveReport<'a> {
    layout: &'a str,
    results: &'a [SearchResult],
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run solve command
///
/// 1. Load the layout
/// 2. Run the selected strategies
/// 3. Report results
pub fn run(args: SolveArgs) -> Result<()> {
    let (layout, board) = args.layout.load()?;
    let config = build_config(&args);

    tracing::info!("Solving {} ({:?}, cap {} states)", layout.name, args.strategy, config.max_states);

    let results = solve(&board, args.strategy, &config);
    report_results(&layout.name, &results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &SolveArgs) -> SearchConfig {
    SearchConfig::default().with_max_states(args.max_states)
}

fn solve(board: &Board, strategy: StrategyArg, config: &SearchConfig) -> Vec<SearchResult> {
    match strategy.single() {
        Some(single) => vec![run_search(board, single, config)],
        None => {
            let (informed, exhaustive) = solve_both(board, config);
            vec![informed, exhaustive]
        }
    }
}

fn report_results(name: &str, results: &[SearchResult], json: bool) -> Result<()> {
    if json {
        let report = SolveReport { layout: name, results };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for result in results {
            print_text_result(result);
        }
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - OUTPUT
// ============================================================================

fn print_text_result(result: &SearchResult) {
    println!("=== {:?} search ===", result.strategy);
    println!(
        "{:?}: {} explored, {} generated in {:.3}s",
        result.phase,
        result.states_explored,
        result.states_generated,
        result.elapsed.as_secs_f64()
    );
    match &result.solution {
        Some(moves) => {
            println!("Solution ({} moves):", moves.len());
            for (i, mv) in moves.iter().enumerate() {
                println!("{:>4}. {}", i + 1, format_move(mv));
            }
        }
        None => println!("No solution found"),
    }
    println!();
}
