//! Terminal plumbing: line input, screen clearing and ENTER pauses

use std::io::{self, BufRead, Write};

use mancala_core::{GameState, LineReader, MancalaError, MoveReader, PlayerAction};

/// Input and output streams shared by the menu and the game screen
pub struct Console<R, W> {
    input: R,
    output: W,
    /// Wait for ENTER before computer moves and after a game
    interactive: bool,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(interactive: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), interactive)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, interactive: bool) -> Self {
        Self {
            input,
            output,
            interactive,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Next trimmed line, or None at end of input
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        write!(self.output, "\x1b[H\x1b[2J")?;
        self.output.flush()
    }

    /// Block until ENTER; end of input counts as ENTER
    pub fn pause(&mut self) -> io::Result<()> {
        writeln!(self.output, "Press ENTER to continue...")?;
        self.output.flush()?;
        self.read_line().map(|_| ())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> MoveReader for Console<R, W> {
    fn read_move(&mut self, state: &GameState) -> Result<PlayerAction, MancalaError> {
        LineReader::new(&mut self.input, &mut self.output).read_move(state)
    }
}
