//! Mancala CLI - Command-line interface
//!
//! Commands:
//! - menu: Interactive menu (default when no command is given)
//! - play: Play a single game with chosen controllers
//! - match: Computer vs computer with a result report

mod console;
mod match_cmd;
mod menu;
mod play;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::console::Console;

#[derive(Parser)]
#[command(name = "mancala")]
#[command(about = "Mancala with an exhaustive parallel search AI")]
struct Cli {
    /// Do not wait for ENTER before computer moves and after a game
    #[arg(long, global = true)]
    no_pause: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu
    Menu,
    /// Play a single game
    Play(play::PlayArgs),
    /// Computer vs computer match
    Match(match_cmd::MatchArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let interactive = !cli.no_pause;

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => menu::run(&mut Console::stdio(interactive)),
        Commands::Play(args) => play::run(args, &mut Console::stdio(interactive)),
        Commands::Match(args) => match_cmd::run(args),
    }
}
