//! Sequential reader over a received payload

use super::{Error, MAX_VAR_INT_BYTES, Result};

/// Cursor over an immutable payload slice.
///
/// Every read advances the cursor; a failed read leaves the cursor wherever
/// the failure was detected, so callers must treat any [`Error`] as fatal for
/// the payload being decoded.
#[derive(Debug)]
pub struct PacketReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> PacketReader<'a> {
    /// Create a reader positioned at the start of `buf`.
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check whether the whole payload has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a LEB128 var-int (at most [`MAX_VAR_INT_BYTES`] bytes).
    pub fn read_var_int(&mut self) -> Result<i32> {
        let mut value: u32 = 0;
        for i in 0..MAX_VAR_INT_BYTES {
            let byte = self.read_u8()?;
            value |= u32::from(byte & 0x7F) << (7 * i);
            if byte & 0x80 == 0 {
                #[allow(clippy::cast_possible_wrap)]
                return Ok(value as i32);
            }
        }
        Err(Error::VarIntTooLong {
            max_bytes: MAX_VAR_INT_BYTES,
        })
    }

    /// Read a big-endian IEEE 754 double.
    pub fn read_f64(&mut self) -> Result<f64> {
        let bytes = self.take(8)?;
        Ok(f64::from_be_bytes(bytes.try_into().expect("8-byte slice")))
    }

    /// Read a var-int length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_var_int()?;
        let Ok(length) = usize::try_from(length) else {
            return Err(Error::NegativeLength { length });
        };
        let bytes = self.take(length)?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }
}
