//! Replay command - solve, then step through the solution board by board

use anyhow::{bail, Context, Result};
use clap::Args;

use detour_core::{apply_move, run_search, SearchConfig, DEFAULT_MAX_STATES};

use crate::layout_arg::{format_move, LayoutArg, StrategyArg};

#[derive(Args)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub layout: LayoutArg,

    /// Search strategy (informed or exhaustive)
    #[arg(long, value_enum)]
    pub strategy: StrategyArg,

    /// Stop after exploring this many states
    #[arg(long, default_value_t = DEFAULT_MAX_STATES)]
    pub max_states: usize,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let Some(strategy) = args.strategy.single() else {
        bail!("replay needs a single strategy, not both");
    };
    let (layout, board) = args.layout.load()?;
    let config = SearchConfig::default().with_max_states(args.max_states);

    let result = run_search(&board, strategy, &config);
    let Some(moves) = result.solution else {
        bail!(
            "{:?} search found no solution for {} ({} states explored)",
            strategy,
            layout.name,
            result.states_explored
        );
    };

    println!("Start:");
    println!("{}", board);
    let mut current = board;
    for (i, mv) in moves.iter().enumerate() {
        let outcome = apply_move(&current, mv).with_context(|| format!("Move {} does not replay", i + 1))?;
        println!("{:>3}. {}{}", i + 1, format_move(mv), if outcome.won { " wins" } else { "" });
        println!("{}", outcome.board);
        current = outcome.board;
    }
    Ok(())
}
