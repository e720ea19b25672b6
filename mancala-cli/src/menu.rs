//! Main menu: choose a game mode and a difficulty level

use std::io::{BufRead, Write};

use anyhow::Result;

use mancala_core::{Game, Side};

use crate::console::Console;
use crate::play::run_game;

/// Menu entry picked by the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MenuChoice {
    SinglePlayer,
    TwoPlayer,
    ComputerGame,
    Quit,
}

fn parse_choice(line: &str) -> Option<MenuChoice> {
    match line.to_lowercase().as_str() {
        "1" => Some(MenuChoice::SinglePlayer),
        "2" => Some(MenuChoice::TwoPlayer),
        "3" => Some(MenuChoice::ComputerGame),
        "q" | "quit" | "exit" => Some(MenuChoice::Quit),
        _ => None,
    }
}

/// Difficulty levels are positive integers
fn parse_level(line: &str) -> Option<u32> {
    line.parse::<u32>().ok().filter(|&level| level > 0)
}

/// Level 1 searches only the candidate move itself
pub fn depth_for_level(level: u32) -> u32 {
    level.saturating_sub(1)
}

/// Run the menu loop until the user quits or input ends
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    loop {
        display_welcome_message(console)?;
        let Some(line) = console.read_line()? else {
            return Ok(());
        };

        let mut game = match parse_choice(&line) {
            Some(MenuChoice::SinglePlayer) => match read_difficulty_level(console)? {
                Some(level) => Game::single_player(depth_for_level(level)),
                None => return Ok(()),
            },
            Some(MenuChoice::TwoPlayer) => Game::two_player(),
            Some(MenuChoice::ComputerGame) => match read_difficulty_level(console)? {
                Some(level) => Game::computer_game(depth_for_level(level)),
                None => return Ok(()),
            },
            Some(MenuChoice::Quit) => return Ok(()),
            None => {
                writeln!(console.out(), "Invalid command")?;
                continue;
            }
        };

        tracing::info!(
            "Starting game: LEFT={} vs RIGHT={}",
            game.player(Side::Left),
            game.player(Side::Right)
        );
        run_game(&mut game, console)?;
    }
}

/// Prompt until a positive level is entered; None at end of input
fn read_difficulty_level<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<Option<u32>> {
    loop {
        writeln!(console.out(), "Please enter the difficulty level of the computer:")?;
        let Some(line) = console.read_line()? else {
            return Ok(None);
        };
        match parse_level(&line) {
            Some(level) => return Ok(Some(level)),
            None => writeln!(console.out(), "Invalid value. Must be a positive integer.")?,
        }
    }
}

fn display_welcome_message<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    console.clear_screen()?;
    let out = console.out();
    writeln!(out)?;
    writeln!(out, "  Welcome to Mancala!")?;
    writeln!(out, "----------------------------")?;
    writeln!(out, "  Choose an option to begin:")?;
    writeln!(out, "  1: One-Player Game")?;
    writeln!(out, "  2: Two-Player Game")?;
    writeln!(out, "  3: AI Game")?;
    writeln!(out, "  Q: Quit")?;
    writeln!(out, "----------------------------")?;
    out.flush()?;
    Ok(())
}
