//! Wire-level error types

use thiserror::Error;

/// Errors raised while reading or writing wire primitives
#[derive(Error, Debug)]
pub enum Error {
    /// Not enough bytes left in the payload
    #[error("unexpected end of payload: need {needed} more bytes, {remaining} left")]
    UnexpectedEof {
        /// Bytes required by the read
        needed: usize,
        /// Bytes actually remaining
        remaining: usize,
    },

    /// Var-int continuation bits ran past the maximum width
    #[error("var-int exceeds {max_bytes} bytes")]
    VarIntTooLong {
        /// Maximum permitted width
        max_bytes: usize,
    },

    /// Length prefix decoded to a negative value
    #[error("negative length prefix: {length}")]
    NegativeLength {
        /// Decoded length
        length: i32,
    },

    /// String bytes are not valid UTF-8
    #[error("invalid UTF-8 in string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
