//! Game driver: asks the active player for moves and applies them

use serde::{Deserialize, Serialize};

use crate::board::{Board, GameResult};
use crate::error::MancalaError;
use crate::player::{MoveReader, Player, PlayerAction};
use crate::rules::{is_valid_move, perform_move_detailed};
use crate::state::{GameState, Side, Slot};

/// One entry of the move history
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub side: Side,
    pub slot: Slot,
    pub captured: u8,
    pub extra_turn: bool,
}

/// Result of a single [`Game::step`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Moved(PlayedMove),
    Quit,
    Finished(GameResult),
}

/// A game between two players, LEFT moving first
pub struct Game {
    state: GameState,
    left: Player,
    right: Player,
    history: Vec<PlayedMove>,
}

impl Game {
    pub fn new(left: Player, right: Player) -> Self {
        Self::from_state(GameState::initial(), left, right)
    }

    /// Resume from an arbitrary position
    pub fn from_state(state: GameState, left: Player, right: Player) -> Self {
        Self {
            state,
            left,
            right,
            history: Vec::new(),
        }
    }

    /// Human on the left, computer on the right
    pub fn single_player(depth: u32) -> Self {
        Self::new(Player::human(), Player::computer(depth))
    }

    pub fn two_player() -> Self {
        Self::new(Player::human(), Player::human())
    }

    pub fn computer_game(depth: u32) -> Self {
        Self::new(Player::computer(depth), Player::computer(depth))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> Board {
        self.state.board()
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn active_player(&self) -> &Player {
        self.player(self.state.active_side())
    }

    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        self.state.is_complete()
    }

    /// Final result, once the game is over
    pub fn result(&self) -> Option<GameResult> {
        self.is_over().then(|| self.board().result())
    }

    /// Let the active player make one move
    pub fn step(&mut self, reader: &mut dyn MoveReader) -> Result<Step, MancalaError> {
        if let Some(result) = self.result() {
            return Ok(Step::Finished(result));
        }

        let side = self.state.active_side();
        let slot = match self.active_player().choose_next_move(&self.state, reader)? {
            PlayerAction::Quit => {
                tracing::info!(%side, "player quit");
                return Ok(Step::Quit);
            }
            PlayerAction::Move(slot) => slot,
        };
        if !is_valid_move(&self.state, slot) {
            return Err(MancalaError::InvalidMove { slot });
        }

        let outcome = perform_move_detailed(&self.state, slot);
        let played = PlayedMove {
            side,
            slot,
            captured: outcome.captured,
            extra_turn: outcome.extra_turn,
        };
        tracing::debug!(
            %side,
            slot,
            captured = outcome.captured,
            extra_turn = outcome.extra_turn,
            "move played"
        );

        self.state = outcome.state;
        self.history.push(played);
        if outcome.finished {
            tracing::info!(result = %self.board().result(), moves = self.history.len(), "game over");
        }
        Ok(Step::Moved(played))
    }

    /// Play until the game ends or a player quits
    pub fn play_out(&mut self, reader: &mut dyn MoveReader) -> Result<Option<GameResult>, MancalaError> {
        loop {
            match self.step(reader)? {
                Step::Moved(_) => {}
                Step::Quit => return Ok(None),
                Step::Finished(result) => return Ok(Some(result)),
            }
        }
    }
}
