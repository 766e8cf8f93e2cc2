//! Wire format utilities.
//!
//! [`WireReader`] and [`WireWriter`] are the only places that touch raw
//! bytes. Every multi-byte access is bounds checked and all integers are
//! big-endian (network byte order).

use crate::error::{Error, Result};
use bytes::{BufMut, Bytes, BytesMut};

/// A cursor for reading DNS wire format data.
///
/// The reader keeps the whole message around so that compression pointers
/// can be resolved against absolute offsets.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    /// The underlying data.
    data: &'a [u8],
    /// Current position.
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Creates a new wire reader positioned at the start of `data`.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a new wire reader positioned at `offset`.
    #[inline]
    pub const fn at(data: &'a [u8], offset: usize) -> Self {
        Self { data, pos: offset }
    }

    /// Returns the underlying data.
    #[inline]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the current position.
    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns true if there are no remaining bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Sets the position.
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    fn check(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(Error::unexpected_eof(self.pos, n));
        }
        Ok(())
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.check(1)?;
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Reads a big-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.check(2)?;
        let value = u16::from_be_bytes([self.data[self.pos], self.data[self.pos + 1]]);
        self.pos += 2;
        Ok(value)
    }

    /// Reads a big-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.check(4)?;
        let b = &self.data[self.pos..self.pos + 4];
        let value = u32::from_be_bytes([b[0], b[1], b[2], b[3]]);
        self.pos += 4;
        Ok(value)
    }

    /// Reads a slice of bytes.
    #[inline]
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.check(len)?;
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}

/// A writer for DNS wire format data.
///
/// Wraps a growable `BytesMut` and refuses any write that would take the
/// buffer past its maximum size.
#[derive(Debug)]
pub struct WireWriter {
    /// The underlying buffer.
    buf: BytesMut,
    /// Maximum size of the finished message.
    max_size: usize,
}

impl WireWriter {
    /// Creates a new wire writer with the given capacity and no size limit
    /// beyond what a 16-bit DNS length field can describe.
    pub fn new(capacity: usize) -> Self {
        Self::with_max_size(capacity, usize::from(u16::MAX))
    }

    /// Creates a wire writer with a maximum size limit.
    pub fn with_max_size(capacity: usize, max_size: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity.min(max_size)),
            max_size,
        }
    }

    /// Returns the current length.
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the remaining space before max size.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.max_size.saturating_sub(self.buf.len())
    }

    fn reserve(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(Error::buffer_overflow(n, self.remaining()));
        }
        Ok(())
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.reserve(1)?;
        self.buf.put_u8(value);
        Ok(())
    }

    /// Writes a big-endian u16.
    #[inline]
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        self.reserve(2)?;
        self.buf.put_u16(value);
        Ok(())
    }

    /// Writes a big-endian u32.
    #[inline]
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.reserve(4)?;
        self.buf.put_u32(value);
        Ok(())
    }

    /// Writes a slice of bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Returns a reference to the written bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the data as frozen bytes.
    #[inline]
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Converts a length to the 16-bit value used by DNS count and length fields.
pub(crate) fn u16_len(what: &'static str, len: usize) -> Result<u16> {
    u16::try_from(len).map_err(|_| Error::FieldOverflow {
        what,
        size: len,
        max_size: usize::from(u16::MAX),
    })
}
