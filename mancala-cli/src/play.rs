//! Interactive game screen and the `play` command

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use mancala_core::{Game, GameResult, MancalaError, Player, SearchConfig, Side, Step};

use crate::console::Console;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

/// Who controls a side
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlayerKind {
    Human,
    Computer,
}

#[derive(Args)]
pub struct PlayArgs {
    /// Controller of the LEFT side (moves first)
    #[arg(long, value_enum, default_value = "human")]
    pub left: PlayerKind,

    /// Controller of the RIGHT side
    #[arg(long, value_enum, default_value = "computer")]
    pub right: PlayerKind,

    /// Computer search depth (half-moves after the candidate move)
    #[arg(long, default_value = "4")]
    pub depth: u32,

    /// Search worker threads (default: one per core)
    #[arg(long)]
    pub threads: Option<usize>,
}

/// Run play command
pub fn run<R: BufRead, W: Write>(args: PlayArgs, console: &mut Console<R, W>) -> Result<()> {
    let config = SearchConfig {
        depth: args.depth,
        threads: args.threads,
    };
    let left = build_player(args.left, &config)?;
    let right = build_player(args.right, &config)?;

    tracing::info!("Starting game: LEFT={} vs RIGHT={}", left, right);
    let mut game = Game::new(left, right);
    run_game(&mut game, console)?;
    Ok(())
}

pub fn build_player(kind: PlayerKind, config: &SearchConfig) -> Result<Player> {
    match kind {
        PlayerKind::Human => Ok(Player::human()),
        PlayerKind::Computer => Player::computer_with_config(config)
            .context("failed to set up computer player"),
    }
}

// ============================================================================
// GAME SCREEN
// ============================================================================

/// Drive `game` on the console until it ends or a human quits
pub fn run_game<R: BufRead, W: Write>(
    game: &mut Game,
    console: &mut Console<R, W>,
) -> Result<Option<GameResult>> {
    while !game.is_over() {
        display_board(game, console)?;
        let side = game.state().active_side();
        writeln!(console.out(), "{} player's turn", side)?;
        prompt_for_move(game, side, console)?;

        match game.step(console) {
            Ok(Step::Moved(played)) => {
                if game.player(side).is_computer() {
                    writeln!(console.out(), "Computer performed move: {}", played.slot)?;
                }
            }
            Ok(Step::Quit) => return Ok(None),
            Ok(Step::Finished(_)) => break,
            Err(MancalaError::InputClosed) => {
                tracing::warn!("input closed, abandoning game");
                return Ok(None);
            }
            Err(e) => return Err(e).context("game aborted"),
        }
    }

    let result = game.board().result();
    display_result(game, result, console)?;
    Ok(Some(result))
}

fn prompt_for_move<R: BufRead, W: Write>(
    game: &Game,
    side: Side,
    console: &mut Console<R, W>,
) -> Result<()> {
    let player = game.player(side);
    if player.is_computer() {
        if console.is_interactive() {
            console.pause()?;
        }
    } else {
        writeln!(console.out(), "Enter a slot number or type 'q' to quit")?;
    }
    Ok(())
}

fn display_board<R: BufRead, W: Write>(game: &Game, console: &mut Console<R, W>) -> Result<()> {
    console.clear_screen()?;
    writeln!(console.out(), "{}", game.board())?;
    console.out().flush()?;
    Ok(())
}

fn display_result<R: BufRead, W: Write>(
    game: &Game,
    result: GameResult,
    console: &mut Console<R, W>,
) -> Result<()> {
    display_board(game, console)?;
    writeln!(console.out(), "---------------------")?;
    writeln!(console.out(), "{}", result)?;
    writeln!(console.out(), "---------------------")?;
    if console.is_interactive() {
        console.pause()?;
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
