//! Match command - one computer-vs-computer game with a report
//!
//! - run(): orchestration
//! - play_match(): drives the game and collects the record
//! - print_text_results() / print_json_results(): reporting

use std::io::{self, Write};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use mancala_core::{
    Game, GameResult, GameState, MancalaError, MoveReader, PlayedMove, Player, PlayerAction,
    SearchConfig, Side, Step,
};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Search depth of the LEFT computer
    #[arg(long, default_value = "4")]
    pub left_depth: u32,

    /// Search depth of the RIGHT computer
    #[arg(long, default_value = "4")]
    pub right_depth: u32,

    /// Search worker threads per computer (default: one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything worth reporting about a finished match
#[derive(Clone, Debug, Serialize)]
pub struct MatchRecord {
    pub left_depth: u32,
    pub right_depth: u32,
    pub result: GameResult,
    pub left_score: u8,
    pub right_score: u8,
    pub elapsed_ms: u64,
    pub moves: Vec<PlayedMove>,
}

impl MatchRecord {
    pub fn extra_turns(&self, side: Side) -> usize {
        self.moves
            .iter()
            .filter(|m| m.side == side && m.extra_turn)
            .count()
    }

    pub fn captured(&self, side: Side) -> u32 {
        self.moves
            .iter()
            .filter(|m| m.side == side)
            .map(|m| m.captured as u32)
            .sum()
    }
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs) -> Result<()> {
    tracing::info!(
        "Starting match: LEFT depth={} vs RIGHT depth={}",
        args.left_depth,
        args.right_depth
    );

    let record = play_match(args.left_depth, args.right_depth, args.threads)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        print_json_results(&record, &mut out)?;
    } else {
        print_text_results(&record, &mut out)?;
    }
    Ok(())
}

/// Play one game between two computers
pub fn play_match(left_depth: u32, right_depth: u32, threads: Option<usize>) -> Result<MatchRecord> {
    let player = |depth: u32| {
        Player::computer_with_config(&SearchConfig { depth, threads })
            .context("failed to set up computer player")
    };
    let mut game = Game::new(player(left_depth)?, player(right_depth)?);

    let start = Instant::now();
    let result = loop {
        match game.step(&mut NoHumans).context("match aborted")? {
            Step::Moved(_) => {}
            Step::Finished(result) => break result,
            Step::Quit => anyhow::bail!("match abandoned"),
        }
    };

    let board = game.board();
    Ok(MatchRecord {
        left_depth,
        right_depth,
        result,
        left_score: board.left_score,
        right_score: board.right_score,
        elapsed_ms: start.elapsed().as_millis() as u64,
        moves: game.history().to_vec(),
    })
}

/// Input source for games without human players
struct NoHumans;

impl MoveReader for NoHumans {
    fn read_move(&mut self, _state: &GameState) -> Result<PlayerAction, MancalaError> {
        Err(MancalaError::InputClosed)
    }
}

// ============================================================================
// REPORTING
// ============================================================================

fn print_json_results(record: &MatchRecord, out: &mut impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    writeln!(out, "{}", json)?;
    Ok(())
}

fn print_text_results(record: &MatchRecord, out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n=== Match Results ===")?;
    writeln!(out, "LEFT  (depth {}): {} stones", record.left_depth, record.left_score)?;
    writeln!(out, "RIGHT (depth {}): {} stones", record.right_depth, record.right_score)?;
    writeln!(out, "Result:      {}", record.result)?;
    writeln!(out, "Moves:       {}", record.moves.len())?;
    writeln!(
        out,
        "Extra turns: LEFT {} / RIGHT {}",
        record.extra_turns(Side::Left),
        record.extra_turns(Side::Right)
    )?;
    writeln!(
        out,
        "Captured:    LEFT {} / RIGHT {}",
        record.captured(Side::Left),
        record.captured(Side::Right)
    )?;
    writeln!(out, "Time:        {} ms", record.elapsed_ms)?;

    writeln!(out, "\nMove list:")?;
    for (i, m) in record.moves.iter().enumerate() {
        let mut notes = Vec::new();
        if m.captured > 0 {
            notes.push(format!("captures {}", m.captured));
        }
        if m.extra_turn {
            notes.push("extra turn".to_string());
        }
        if notes.is_empty() {
            writeln!(out, "  {:>3}. {:<5} {}", i + 1, m.side, m.slot)?;
        } else {
            writeln!(out, "  {:>3}. {:<5} {} ({})", i + 1, m.side, m.slot, notes.join(", "))?;
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
