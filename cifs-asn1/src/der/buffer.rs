//! DER buffer with a TLV cursor
//!
//! The buffer is the single collaborator every DER object encodes into and
//! decodes from. It owns a byte vector plus a read position: unpack calls
//! advance the read cursor and fail when the buffer is exhausted, pack
//! calls append to the end.

use cifs_core::{CifsError, CifsResult};

/// Cursor-based pack/unpack buffer for DER tag-length-value streams.
///
/// Lengths follow X.690: short form is a single byte 0-127, long form sets
/// the high bit with the low seven bits giving the count of following
/// big-endian length bytes. The indefinite form is rejected.
#[derive(Debug, Default)]
pub struct DerBuffer {
    buf: Vec<u8>,
    rpos: usize,
}

impl DerBuffer {
    /// Create an empty buffer for packing.
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            rpos: 0,
        }
    }

    /// Create an empty buffer with initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            rpos: 0,
        }
    }

    /// Create a buffer for unpacking from existing bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            buf: data.to_vec(),
            rpos: 0,
        }
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.rpos
    }

    /// Number of bytes left to unpack.
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.rpos)
    }

    /// Check if there is more data to unpack.
    pub fn has_remaining(&self) -> bool {
        self.rpos < self.buf.len()
    }

    /// Total buffer length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Get the packed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the buffer, returning the packed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn read_byte(&mut self) -> CifsResult<u8> {
        if self.rpos >= self.buf.len() {
            return Err(CifsError::Bounds(
                "DER buffer exhausted while reading byte".to_string(),
            ));
        }
        let byte = self.buf[self.rpos];
        self.rpos += 1;
        Ok(byte)
    }

    /// Unpack a single byte, advancing the cursor.
    pub fn unpack_byte(&mut self) -> CifsResult<u8> {
        self.read_byte()
    }

    /// Unpack a tag byte, advancing the cursor.
    pub fn unpack_type(&mut self) -> CifsResult<u8> {
        self.read_byte()
    }

    /// Look at the next tag byte without advancing the cursor.
    ///
    /// Used by constructed-type decoding to dispatch the child object
    /// before the child consumes its own tag.
    pub fn peek_type(&self) -> CifsResult<u8> {
        if self.rpos >= self.buf.len() {
            return Err(CifsError::Bounds(
                "DER buffer exhausted while peeking tag".to_string(),
            ));
        }
        Ok(self.buf[self.rpos])
    }

    /// Unpack a DER length, advancing the cursor.
    ///
    /// # Error Handling
    /// Fails with [`CifsError::MalformedLength`] on the indefinite form or
    /// a length-of-length above four bytes, and with a bounds error if the
    /// buffer runs out mid-length.
    pub fn unpack_length(&mut self) -> CifsResult<usize> {
        let first = self.read_byte()?;

        if first & 0x80 == 0 {
            // Short form
            return Ok(first as usize);
        }

        let num_bytes = (first & 0x7F) as usize;
        if num_bytes == 0 {
            return Err(CifsError::MalformedLength(
                "indefinite length encoding not supported".to_string(),
            ));
        }
        if num_bytes > 4 {
            return Err(CifsError::MalformedLength(format!(
                "length encoding too large: {} bytes (max 4)",
                num_bytes
            )));
        }

        let mut length = 0usize;
        for _ in 0..num_bytes {
            length = (length << 8) | self.read_byte()? as usize;
        }
        Ok(length)
    }

    /// Unpack `len` raw value bytes, advancing the cursor.
    pub fn unpack_bytes(&mut self, len: usize) -> CifsResult<Vec<u8>> {
        if self.rpos + len > self.buf.len() {
            return Err(CifsError::Bounds(format!(
                "DER buffer exhausted: need {} bytes, have {}",
                len,
                self.remaining()
            )));
        }
        let start = self.rpos;
        self.rpos += len;
        Ok(self.buf[start..start + len].to_vec())
    }

    /// Pack a single byte.
    pub fn pack_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Pack a DER length, choosing short or long form automatically.
    pub fn pack_length(&mut self, length: usize) {
        if length < 128 {
            self.buf.push(length as u8);
            return;
        }

        // Long form: length-of-length byte then big-endian length bytes
        let mut num_bytes = 0;
        let mut temp = length;
        while temp > 0 {
            num_bytes += 1;
            temp >>= 8;
        }

        self.buf.push(0x80 | num_bytes as u8);
        for i in (0..num_bytes).rev() {
            self.buf.push(((length >> (i * 8)) & 0xFF) as u8);
        }
    }

    /// Pack raw value bytes.
    pub fn pack_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }
}
