//! Error types for the board engine.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A coordinate outside the 15 holes of the triangle
    #[error("invalid hole ({row}, {col}): expected 0 <= col <= row <= 4")]
    InvalidHole { row: i8, col: i8 },

    /// An integer code with bits set above the 15 hole bits
    #[error("invalid board code {code:#x}: only the lowest 15 bits may be set")]
    InvalidCode { code: u32 },

    #[error("invalid board ascii: {reason}")]
    InvalidAscii { reason: String },

    /// The recursion cap of the solver was hit. Cannot happen on a
    /// 15-hole board unless the cap is set below the number of pegs.
    #[error("search exceeded the depth limit of {limit} jumps")]
    SearchDepthExceeded { limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
