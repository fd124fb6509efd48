//! Moves command - list every legal move on the starting board

use anyhow::Result;
use clap::Args;

use detour_core::legal_moves;

use crate::layout_arg::{format_move, LayoutArg};

#[derive(Args)]
pub struct MovesArgs {
    #[command(flatten)]
    pub layout: LayoutArg,
}

pub fn run(args: MovesArgs) -> Result<()> {
    let (layout, board) = args.layout.load()?;
    let moves = legal_moves(&board);

    println!("{}", board);
    println!("{} legal moves in {}:", moves.len(), layout.name);
    for mv in &moves {
        println!("  {}", format_move(mv));
    }
    Ok(())
}
