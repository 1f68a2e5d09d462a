//! Patchable writer for outbound payloads

use bytes::Bytes;

use super::MAX_VAR_INT_BYTES;

/// Handle to a var-int written earlier, used for in-place patching.
///
/// A slot records the byte position and encoded width of the var-int it
/// refers to. Patching through a slot may change the encoded width, which
/// shifts everything written after it; slots obtained later are invalidated
/// by such a patch, so keep at most one slot outstanding per writer.
#[derive(Debug)]
#[must_use]
pub struct VarIntSlot {
    pos: usize,
    width: usize,
}

/// Growable buffer with ordered primitive writes.
#[derive(Debug, Default)]
pub struct PacketWriter {
    buf: Vec<u8>,
}

fn encode_var_int(value: i32, out: &mut [u8; MAX_VAR_INT_BYTES]) -> usize {
    #[allow(clippy::cast_sign_loss)]
    let mut remaining = value as u32;
    let mut width = 0;
    loop {
        let byte = (remaining & 0x7F) as u8;
        remaining >>= 7;
        if remaining == 0 {
            out[width] = byte;
            return width + 1;
        }
        out[width] = byte | 0x80;
        width += 1;
    }
}

impl PacketWriter {
    /// Create an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Create a writer with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Write a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Write a LEB128 var-int.
    pub fn write_var_int(&mut self, value: i32) {
        let mut encoded = [0u8; MAX_VAR_INT_BYTES];
        let width = encode_var_int(value, &mut encoded);
        self.buf.extend_from_slice(&encoded[..width]);
    }

    /// Write a var-int and return a slot for patching it later.
    pub fn mark_var_int(&mut self, value: i32) -> VarIntSlot {
        let pos = self.buf.len();
        self.write_var_int(value);
        VarIntSlot {
            pos,
            width: self.buf.len() - pos,
        }
    }

    /// Replace a previously written var-int with a new value.
    ///
    /// The tail of the buffer is shifted when the encoded width differs from
    /// the original.
    pub fn patch_var_int(&mut self, slot: VarIntSlot, value: i32) {
        let mut encoded = [0u8; MAX_VAR_INT_BYTES];
        let width = encode_var_int(value, &mut encoded);
        self.buf
            .splice(slot.pos..slot.pos + slot.width, encoded[..width].iter().copied());
    }

    /// Write a big-endian IEEE 754 double.
    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Write a var-int length-prefixed UTF-8 string.
    pub fn write_string(&mut self, value: &str) {
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        self.write_var_int(value.len() as i32);
        self.buf.extend_from_slice(value.as_bytes());
    }

    /// Bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// View the written bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer into an immutable payload.
    #[must_use]
    pub fn freeze(self) -> Bytes {
        Bytes::from(self.buf)
    }
}
