//! Game state, always expressed from the side about to move

use serde::{Deserialize, Serialize};

use crate::error::MancalaError;
use crate::rules;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Pits on each side of the board
pub const SLOTS_PER_SIDE: usize = 6;

/// Stones placed in every pit at the start of a game
pub const INITIAL_STONES_PER_SLOT: u8 = 4;

/// Stones in play for the whole game (conserved by every move)
pub const TOTAL_STONES: u32 = (SLOTS_PER_SIDE as u32) * 2 * (INITIAL_STONES_PER_SLOT as u32);

/// A pit number on the mover's row, `1..=SLOTS_PER_SIDE`
pub type Slot = usize;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Physical side of the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    /// The side that moves first in a new game
    pub const FIRST: Side = Side::Left;

    pub fn opponent(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => f.pad("LEFT"),
            Side::Right => f.pad("RIGHT"),
        }
    }
}

/// Immutable snapshot of a game.
///
/// `own` always belongs to `active`, the side about to move. When the turn
/// passes, a new state is built with the rows and scores trading places.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    own: [u8; SLOTS_PER_SIDE],
    opponent: [u8; SLOTS_PER_SIDE],
    own_score: u8,
    opponent_score: u8,
    active: Side,
}

impl GameState {
    /// Build a position directly.
    ///
    /// Pits and stores together must hold exactly [`TOTAL_STONES`]; the
    /// sowing arithmetic relies on it to stay within `u8`. Checked in debug
    /// builds.
    pub fn new(
        own: [u8; SLOTS_PER_SIDE],
        opponent: [u8; SLOTS_PER_SIDE],
        own_score: u8,
        opponent_score: u8,
        active: Side,
    ) -> Self {
        let state = Self {
            own,
            opponent,
            own_score,
            opponent_score,
            active,
        };
        debug_assert_eq!(
            state.total_stones(),
            TOTAL_STONES,
            "position must hold {} stones",
            TOTAL_STONES
        );
        state
    }

    /// State of a new game: every pit holds four stones, both stores are empty
    pub fn initial() -> Self {
        Self::new(
            [INITIAL_STONES_PER_SLOT; SLOTS_PER_SIDE],
            [INITIAL_STONES_PER_SLOT; SLOTS_PER_SIDE],
            0,
            0,
            Side::FIRST,
        )
    }

    pub fn own_slots(&self) -> &[u8; SLOTS_PER_SIDE] {
        &self.own
    }

    pub fn opponent_slots(&self) -> &[u8; SLOTS_PER_SIDE] {
        &self.opponent
    }

    pub fn own_score(&self) -> u8 {
        self.own_score
    }

    pub fn opponent_score(&self) -> u8 {
        self.opponent_score
    }

    pub fn active_side(&self) -> Side {
        self.active
    }

    /// Stones in one of the mover's pits (`slot` is 1-based)
    pub fn stones_in(&self, slot: Slot) -> Option<u8> {
        slot.checked_sub(1).and_then(|i| self.own.get(i)).copied()
    }

    /// Pits of a physical side, regardless of who is to move
    pub fn slots_of(&self, side: Side) -> &[u8; SLOTS_PER_SIDE] {
        if side == self.active {
            &self.own
        } else {
            &self.opponent
        }
    }

    /// Store of a physical side, regardless of who is to move
    pub fn score_of(&self, side: Side) -> u8 {
        if side == self.active {
            self.own_score
        } else {
            self.opponent_score
        }
    }

    /// Game ends when either row is empty
    pub fn is_complete(&self) -> bool {
        is_empty(&self.own) || is_empty(&self.opponent)
    }

    /// Score differential from the mover's point of view
    pub fn fitness(&self) -> i32 {
        self.own_score as i32 - self.opponent_score as i32
    }

    /// Sum of every stone on the board and in both stores
    pub fn total_stones(&self) -> u32 {
        let pits: u32 = self
            .own
            .iter()
            .chain(self.opponent.iter())
            .map(|&s| s as u32)
            .sum();
        pits + self.own_score as u32 + self.opponent_score as u32
    }

    /// Checked move application
    pub fn apply_move(&self, slot: Slot) -> Result<GameState, MancalaError> {
        if self.is_complete() {
            return Err(MancalaError::GameOver);
        }
        if !rules::is_valid_move(self, slot) {
            return Err(MancalaError::InvalidMove { slot });
        }
        Ok(rules::perform_move(self, slot))
    }

    /// Same position seen from the other side: rows and scores swap, the
    /// active tag flips.
    pub fn swapped(&self) -> Self {
        Self::new(
            self.opponent,
            self.own,
            self.opponent_score,
            self.own_score,
            self.active.opponent(),
        )
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

fn is_empty(row: &[u8; SLOTS_PER_SIDE]) -> bool {
    row.iter().all(|&s| s == 0)
}

// ============================================================================
// TESTS
// ============================================================================
