//! Sequential little-endian reader over a byte buffer
//!
//! All Aseprite fields are little-endian. The cursor is an explicit
//! value passed into each decode function, so parsers stay free of
//! hidden mutable state and can be tested against bare byte slices.

use thiserror::Error;

/// Error type for reads that run past the end of the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("truncated data: needed {needed} byte(s) at offset {offset}, {available} available")]
pub struct TruncatedData {
    /// Offset the read started at
    pub offset: usize,
    /// Bytes the read required
    pub needed: usize,
    /// Bytes left in the buffer
    pub available: usize,
}

/// A read cursor over an immutable byte buffer.
///
/// Each typed read advances the cursor by the width of the type and
/// returns the decoded value; reads past the end of the buffer fail
/// with [`TruncatedData`] instead of returning garbage.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current absolute offset into the buffer.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Move the cursor to an absolute offset.
    ///
    /// Seeking past the end is allowed; the next read will fail.
    pub fn set_position(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Bytes remaining from the cursor to the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Take the next `count` bytes as a slice.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], TruncatedData> {
        if self.remaining() < count {
            return Err(TruncatedData {
                offset: self.offset,
                needed: count,
                available: self.remaining(),
            });
        }
        let slice = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    /// Advance the cursor by `count` bytes without decoding them.
    pub fn skip(&mut self, count: usize) -> Result<(), TruncatedData> {
        self.read_bytes(count).map(|_| ())
    }

    /// Unsigned byte.
    pub fn read_u8(&mut self) -> Result<u8, TruncatedData> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Unsigned little-endian 16-bit word.
    pub fn read_u16(&mut self) -> Result<u16, TruncatedData> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Signed little-endian 16-bit short.
    pub fn read_i16(&mut self) -> Result<i16, TruncatedData> {
        Ok(self.read_u16()? as i16)
    }

    /// Unsigned little-endian 32-bit dword.
    pub fn read_u32(&mut self) -> Result<u32, TruncatedData> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Signed little-endian 32-bit long.
    pub fn read_i32(&mut self) -> Result<i32, TruncatedData> {
        Ok(self.read_u32()? as i32)
    }

    /// 16.16 fixed-point value (dword divided by 65536).
    pub fn read_fixed(&mut self) -> Result<f64, TruncatedData> {
        Ok(f64::from(self.read_u32()?) / 65536.0)
    }

    /// Length-prefixed string: u16 byte length followed by UTF-8 bytes.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected; a
    /// mangled layer name is not worth failing a conversion over.
    pub fn read_string(&mut self) -> Result<String, TruncatedData> {
        let length = self.read_u16()? as usize;
        let bytes = self.read_bytes(length)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
