//! Shared layout selection for every command

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use detour_core::{Board, Layout, Move, Strategy};

#[derive(Args, Debug, Clone)]
pub struct LayoutArg {
    /// Layout file (.json, or a text grid); defaults to the reference puzzle
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,
}

impl LayoutArg {
    pub fn load(&self) -> Result<(Layout, Board)> {
        let layout = match &self.layout {
            Some(path) => load_layout(path)?,
            None => Layout::reference(),
        };
        let board = layout
            .build()
            .with_context(|| format!("Invalid layout: {}", layout.name))?;
        Ok((layout, board))
    }
}

fn load_layout(path: &Path) -> Result<Layout> {
    Layout::load(path).with_context(|| format!("Failed to load layout: {}", path.display()))
}

/// Strategy selection on the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyArg {
    Informed,
    Exhaustive,
    Both,
}

impl StrategyArg {
    /// The single strategy selected, `None` for `both`
    pub fn single(self) -> Option<Strategy> {
        match self {
            StrategyArg::Informed => Some(Strategy::Informed),
            StrategyArg::Exhaustive => Some(Strategy::Exhaustive),
            StrategyArg::Both => None,
        }
    }
}

/// One-line move description, e.g. `P (1,3) -> (0,3) promotes`
pub fn format_move(mv: &Move) -> String {
    let mut line = format!("{} {} -> {}", mv.piece.kind.symbol(), mv.from, mv.to);
    if mv.piece.is_mover() {
        line.insert(0, '*');
    }
    if mv.promotes {
        line.push_str(" promotes");
    }
    line
}
