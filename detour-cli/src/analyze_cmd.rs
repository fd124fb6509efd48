//! Analyze command - report the mover's route to the goal

use anyhow::Result;
use clap::Args;

use detour_core::{analyze, BoardAnalysis};

use crate::layout_arg::LayoutArg;

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub layout: LayoutArg,

    /// Output analysis as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let (layout, board) = args.layout.load()?;
    let analysis = analyze(&board);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        println!("Layout: {}", layout.name);
        println!("{}", board);
        print_analysis(&analysis);
    }
    Ok(())
}

fn print_analysis(analysis: &BoardAnalysis) {
    match analysis.mover_position {
        Some(pos) => println!("Mover:              {} ({})", pos, if analysis.promoted { "promoted" } else { "stepper" }),
        None => println!("Mover:              none"),
    }
    println!("Moves to promotion: {}", analysis.moves_to_promotion);
    println!("Pieces above:       {}", analysis.pieces_above);
    println!("Moves to goal:      {}", analysis.moves_to_goal);
    println!("Blocking pieces:    {}", analysis.blocking_count);
}
