use thiserror::Error;

/// Reasons a tile sequence is not a valid 3x3 board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected 9 tiles, found {found}")]
    WrongLength { found: usize },

    #[error("tile {value} is out of range (tiles are 0-8)")]
    OutOfRange { value: u8 },

    #[error("tile {value} appears more than once")]
    Duplicate { value: u8 },

    #[error("'{token}' is not a tile number")]
    InvalidToken { token: String },
}

/// Failures of a solve call. An unsolvable pair of boards is not one of
/// these; see [`crate::solver::Outcome::Unsolvable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),

    /// The frontier ran dry even though the boards share parity. This is a
    /// bug in the solver, never an expected outcome.
    #[error("search exhausted after {expanded} expansions on a solvable instance")]
    SearchExhausted { expanded: usize },

    #[error("search stopped after reaching the limit of {limit} expansions")]
    ExpansionLimit { limit: usize },
}
