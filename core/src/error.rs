use thiserror::Error;

/// Errors surfaced at the construction boundary. In-game operations have
/// no error channel: negative outcomes (digging a mine, flagging with no
/// flags left) are normal game semantics observable through the state
/// queries, and out-of-range coordinates are a caller contract violation.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid coordinates")]
    InvalidCoords,
    #[error("board dimensions must be non-zero")]
    ZeroDimension,
    #[error("at least one mine is required")]
    NoMines,
    #[error("mine count must leave at least one safe plot")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
