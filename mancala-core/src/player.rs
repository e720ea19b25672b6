//! Human and computer players

use std::io::{BufRead, Write};

use crate::error::MancalaError;
use crate::rules::is_valid_move;
use crate::search::{SearchConfig, SearchEngine};
use crate::state::{GameState, Slot};

/// What a player decided to do on its turn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    Move(Slot),
    Quit,
}

/// Source of moves for a human player
pub trait MoveReader {
    /// Block until a legal move or a quit request is entered
    fn read_move(&mut self, state: &GameState) -> Result<PlayerAction, MancalaError>;
}

/// Line-based move entry: one slot number per line, `q` to quit.
/// Bad lines are reported on `output` and the prompt repeats.
pub struct LineReader<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineReader<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> MoveReader for LineReader<R, W> {
    fn read_move(&mut self, state: &GameState) -> Result<PlayerAction, MancalaError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Err(MancalaError::InputClosed);
            }
            // Only the line terminator is stripped; padded input is not a number
            let command = line.trim_end_matches(['\r', '\n']);

            match command.parse::<i64>() {
                Ok(n) => match usize::try_from(n) {
                    Ok(slot) if is_valid_move(state, slot) => return Ok(PlayerAction::Move(slot)),
                    _ => writeln!(self.output, "Invalid move")?,
                },
                Err(_) if command.eq_ignore_ascii_case("q") => return Ok(PlayerAction::Quit),
                Err(_) => writeln!(self.output, "Invalid command")?,
            }
        }
    }
}

/// A side's controller
pub enum Player {
    Human,
    Computer(SearchEngine),
}

impl Player {
    pub fn human() -> Self {
        Player::Human
    }

    /// Computer on rayon's global pool
    pub fn computer(depth: u32) -> Self {
        Player::Computer(SearchEngine::with_depth(depth))
    }

    pub fn computer_with_config(config: &SearchConfig) -> Result<Self, MancalaError> {
        Ok(Player::Computer(SearchEngine::new(config)?))
    }

    pub fn is_computer(&self) -> bool {
        matches!(self, Player::Computer(_))
    }

    /// Next move for the side to move in `state`. Humans are asked through
    /// `reader`; computers run the search.
    pub fn choose_next_move(
        &self,
        state: &GameState,
        reader: &mut dyn MoveReader,
    ) -> Result<PlayerAction, MancalaError> {
        match self {
            Player::Human => reader.read_move(state),
            Player::Computer(engine) => engine
                .choose_move(state)
                .map(PlayerAction::Move)
                .ok_or(MancalaError::GameOver),
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Human => write!(f, "Human"),
            Player::Computer(engine) => write!(f, "Computer (depth {})", engine.depth()),
        }
    }
}
