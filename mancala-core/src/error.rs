//! Error types for the Mancala core

/// Errors raised by the checked game API and the player collaborators.
#[derive(Debug, thiserror::Error)]
pub enum MancalaError {
    #[error("invalid move: slot {slot} is not a playable pit")]
    InvalidMove { slot: usize },

    #[error("game is already over")]
    GameOver,

    #[error("input stream closed before a move was entered")]
    InputClosed,

    #[error("failed to build search thread pool: {0}")]
    ThreadPool(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
