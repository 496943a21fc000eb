//! Error types for the turntable solver.

use thiserror::Error;

use crate::puzzle::Move;

/// Everything that can go wrong before or while driving a search.
///
/// An exhausted frontier is not an error; see [`crate::search::SearchOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// Rings need at least one disk besides the blank.
    #[error("ring must hold at least 2 disks, got {0}")]
    RingTooSmall(usize),

    #[error("large ring has {large} disks but small ring has {small}")]
    LengthMismatch { large: usize, small: usize },

    #[error("small ring has no blank (0)")]
    MissingBlank,

    #[error("small ring has {0} blanks, expected exactly one")]
    MultipleBlanks(usize),

    /// The move does not belong to the state it was applied to.
    #[error("move {mv} is not legal when the uncovered large disk shows {uncovered}")]
    IllegalMove { mv: Move, uncovered: u32 },

    #[error("invalid input: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
