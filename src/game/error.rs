use thiserror::Error;

/// Errors raised by the simulation core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Every cell of the board is occupied, so no free cell can be found
    #[error("board exhausted: no free cell left")]
    BoardExhausted,

    /// Board or speed parameters cannot host a game
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type GameResult<T> = Result<T, GameError>;
