//! DETOUR CLI - Command-line interface
//!
//! Commands:
//! - solve: Search for a solution
//! - analyze: Report the mover's situation on a board
//! - moves: List legal moves
//! - replay: Solve, then print every intermediate board

mod layout_arg;
mod solve_cmd;
mod analyze_cmd;
mod moves_cmd;
mod replay_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "detour")]
#[command(about = "DETOUR sliding-piece puzzle solver")]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a solution
    Solve(solve_cmd::SolveArgs),
    /// Analyze the mover's route to the goal
    Analyze(analyze_cmd::AnalyzeArgs),
    /// List legal moves
    Moves(moves_cmd::MovesArgs),
    /// Solve and print each board along the solution
    Replay(replay_cmd::ReplayArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Solve(args) => solve_cmd::run(args),
        Commands::Analyze(args) => analyze_cmd::run(args),
        Commands::Moves(args) => moves_cmd::run(args),
        Commands::Replay(args) => replay_cmd::run(args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
