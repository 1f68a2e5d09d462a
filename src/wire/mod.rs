//! Wire primitives for the attribute-update format
//!
//! This module provides a sequential reader and a patchable writer for the
//! protocol's primitive types: var-ints, big-endian doubles, raw bytes, and
//! length-prefixed UTF-8 strings.

mod error;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use reader::PacketReader;
pub use writer::{PacketWriter, VarIntSlot};

/// Maximum encoded width of a var-int in bytes
pub const MAX_VAR_INT_BYTES: usize = 5;
