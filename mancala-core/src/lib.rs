//! Mancala Core - Rules engine and search AI
//!
//! This crate provides the core game logic for Mancala:
//! - Perspective-relative game state (always seen from the side to move)
//! - Sowing, capture, extra-turn and end-of-game rules
//! - Board render model for a left/right text layout
//! - Exhaustive fork-join negamax search on a rayon pool
//! - Human and computer players plus a game driver

pub mod board;
pub mod error;
pub mod game;
pub mod player;
pub mod rules;
pub mod search;
pub mod state;

// Re-exports for convenient access
pub use board::{Board, GameResult};
pub use error::MancalaError;
pub use game::{Game, PlayedMove, Step};
pub use player::{LineReader, MoveReader, Player, PlayerAction};
pub use rules::{is_valid_move, legal_moves, perform_move, perform_move_detailed, MoveOutcome, RingPosition};
pub use search::{SearchConfig, SearchEngine};
pub use state::{GameState, Side, Slot, INITIAL_STONES_PER_SLOT, SLOTS_PER_SIDE, TOTAL_STONES};
