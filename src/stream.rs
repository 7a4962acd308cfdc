use alloc::vec::Vec;

use crate::{Endian, Result, StreamError};

// Continuation flag and value mask for the variable-length encodings.
const MORE: u8 = 0x80;
const MASK: u8 = 0x7f;

/// An in-memory byte stream with an append-only write side and a cursor-based
/// read side.
///
/// The stream is deliberately asymmetric: writes always land at the tail of
/// the owned buffer regardless of the cursor, while reads consume bytes at
/// the cursor and advance it. It is not a general seekable buffer. Typical
/// use is one stream per message: either start empty and issue a sequence of
/// writes, or wrap received bytes with [`Stream::from_bytes`] and issue a
/// sequence of reads.
///
/// All multi-byte fixed-width operations honor the stream's current byte
/// order. The order is per-instance mutable state; changing it mid-sequence
/// affects only the operations issued afterwards, never bytes already
/// written.
///
/// Reads that run out of bytes fail with [`StreamError::EndOfStream`] before
/// consuming anything; a read never returns partial data.
pub struct Stream {
    buffer: Vec<u8>,
    offset: usize,
    endian: Endian,
}

impl Stream {
    /// Creates an empty big-endian stream.
    pub fn new() -> Self {
        Self::from_parts(Vec::new(), 0, Endian::Big)
    }

    /// Creates an empty big-endian stream with the given buffer capacity
    /// pre-reserved.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(Vec::with_capacity(capacity), 0, Endian::Big)
    }

    /// Wraps existing bytes for reading, with the cursor at the start and
    /// big-endian byte order.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_parts(bytes, 0, Endian::Big)
    }

    /// Creates a stream from its parts.
    ///
    /// `offset` is not validated against the buffer length; an out-of-range
    /// cursor is accepted and surfaces as [`StreamError::EndOfStream`] on
    /// the next read.
    pub fn from_parts(buffer: Vec<u8>, offset: usize, endian: Endian) -> Self {
        Self {
            buffer,
            offset,
            endian,
        }
    }

    /// Returns the current byte order.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Sets the byte order used by subsequent multi-byte operations.
    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    /// Toggles between big- and little-endian byte order.
    pub fn swap_endian(&mut self) {
        self.endian = self.endian.swapped();
    }

    /// Returns true if the stream is in big-endian mode.
    pub fn is_big_endian(&self) -> bool {
        self.endian == Endian::Big
    }

    /// Returns true if the stream is in little-endian mode.
    pub fn is_little_endian(&self) -> bool {
        self.endian == Endian::Little
    }

    /// Returns the read cursor.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Returns the length of the owned buffer in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if the owned buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns true if the read cursor has reached or passed the end of the
    /// buffer.
    pub fn is_eos(&self) -> bool {
        self.offset >= self.buffer.len()
    }

    /// Moves the read cursor back to the start of the buffer. The buffer is
    /// untouched.
    pub fn rewind(&mut self) {
        self.offset = 0;
    }

    /// Clears the buffer and rewinds the cursor. A reset stream is at
    /// end-of-stream until something is written.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.offset = 0;
    }

    /// Returns the accumulated bytes as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the stream and returns the owned buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Appends `bytes` to the tail of the buffer. Cannot fail.
    #[inline(always)]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Appends a small, fixed-size array of bytes.
    #[inline(always)]
    pub fn write_cbytes<const N: usize>(&mut self, value: [u8; N]) {
        self.write_bytes(&value)
    }

    /// Appends `len` zero bytes.
    pub fn pad_zeros(&mut self, len: usize) {
        self.buffer.resize(self.buffer.len() + len, 0);
    }

    /// Reads a slice of bytes whose length is `len`, advancing the cursor.
    ///
    /// Fails with [`StreamError::EndOfStream`] unless `len` whole bytes
    /// remain between the cursor and the end of the buffer, in which case
    /// the cursor stays put.
    #[inline(always)]
    pub fn read_bytes(&mut self, len: usize) -> Result<&[u8]> {
        let end = self
            .offset
            .checked_add(len)
            .ok_or(StreamError::EndOfStream)?;
        if end > self.buffer.len() {
            return Err(StreamError::EndOfStream);
        }
        let bytes = &self.buffer[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    /// Reads a small array of bytes, with a constant length.
    #[inline(always)]
    pub fn read_cbytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        // read_bytes returned exactly N bytes, so this unwrap() gets
        // optimized out.
        Ok(*<&[u8; N]>::try_from(bytes).unwrap())
    }

    /// Reads every byte from the cursor to the end of the buffer, leaving
    /// the stream at end-of-stream. The returned slice may be empty.
    pub fn read_remaining(&mut self) -> &[u8] {
        let start = self.offset.min(self.buffer.len());
        self.offset = self.buffer.len();
        &self.buffer[start..]
    }

    /// Writes a single `u8` value.
    #[inline(always)]
    pub fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value])
    }

    /// Writes a single `i8` value.
    #[inline(always)]
    pub fn write_i8(&mut self, value: i8) {
        self.write_u8(value as u8)
    }

    /// Reads a single `u8` value.
    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_cbytes::<1>()?[0])
    }

    /// Reads a single `i8` value.
    #[inline(always)]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Writes a `bool` as one byte. True is encoded as 1, false as 0.
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(value as u8)
    }

    /// Reads a `bool` from one byte.
    ///
    /// Only the exact byte value 1 decodes to true; 0 and every other value
    /// decode to false.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? == 1)
    }

    /// Writes a `u16` in the current byte order.
    #[inline(always)]
    pub fn write_u16(&mut self, value: u16) {
        match self.endian {
            Endian::Big => self.write_cbytes(value.to_be_bytes()),
            Endian::Little => self.write_cbytes(value.to_le_bytes()),
        }
    }

    /// Reads a `u16` in the current byte order.
    #[inline(always)]
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_cbytes()?;
        Ok(match self.endian {
            Endian::Big => u16::from_be_bytes(bytes),
            Endian::Little => u16::from_le_bytes(bytes),
        })
    }

    /// Writes an `i16` in the current byte order.
    #[inline(always)]
    pub fn write_i16(&mut self, value: i16) {
        self.write_u16(value as u16)
    }

    /// Reads an `i16` in the current byte order.
    #[inline(always)]
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(self.read_u16()? as i16)
    }

    /// Writes the low 24 bits of `value` as 3 bytes in the current byte
    /// order. Bits above bit 23 are discarded.
    pub fn write_u24(&mut self, value: u32) {
        let v = value & 0x00ff_ffff;
        match self.endian {
            Endian::Big => self.write_cbytes([(v >> 16) as u8, (v >> 8) as u8, v as u8]),
            Endian::Little => self.write_cbytes([v as u8, (v >> 8) as u8, (v >> 16) as u8]),
        }
    }

    /// Reads a `u32` from 3 bytes in the current byte order. The result is
    /// always in `0..=0x00ff_ffff`.
    pub fn read_u24(&mut self) -> Result<u32> {
        let b = self.read_cbytes::<3>()?;
        Ok(match self.endian {
            Endian::Big => ((b[0] as u32) << 16) | ((b[1] as u32) << 8) | b[2] as u32,
            Endian::Little => ((b[2] as u32) << 16) | ((b[1] as u32) << 8) | b[0] as u32,
        })
    }

    /// Writes the low 24 bits of `value`'s two's-complement pattern as 3
    /// bytes in the current byte order. Values in `-0x80_0000..=0x7f_ffff`
    /// round-trip; anything wider is truncated.
    pub fn write_i24(&mut self, value: i32) {
        self.write_u24(value as u32)
    }

    /// Reads an `i32` from 3 bytes in the current byte order, sign-extending
    /// from bit 23.
    pub fn read_i24(&mut self) -> Result<i32> {
        let v = self.read_u24()?;
        Ok(if v & 0x0080_0000 != 0 {
            (v | 0xff00_0000) as i32
        } else {
            v as i32
        })
    }

    /// Writes a `u32` in the current byte order.
    #[inline(always)]
    pub fn write_u32(&mut self, value: u32) {
        match self.endian {
            Endian::Big => self.write_cbytes(value.to_be_bytes()),
            Endian::Little => self.write_cbytes(value.to_le_bytes()),
        }
    }

    /// Reads a `u32` in the current byte order.
    #[inline(always)]
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_cbytes()?;
        Ok(match self.endian {
            Endian::Big => u32::from_be_bytes(bytes),
            Endian::Little => u32::from_le_bytes(bytes),
        })
    }

    /// Writes an `i32` in the current byte order.
    #[inline(always)]
    pub fn write_i32(&mut self, value: i32) {
        self.write_u32(value as u32)
    }

    /// Reads an `i32` in the current byte order.
    #[inline(always)]
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Writes a `u64` in the current byte order.
    #[inline(always)]
    pub fn write_u64(&mut self, value: u64) {
        match self.endian {
            Endian::Big => self.write_cbytes(value.to_be_bytes()),
            Endian::Little => self.write_cbytes(value.to_le_bytes()),
        }
    }

    /// Reads a `u64` in the current byte order.
    #[inline(always)]
    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.read_cbytes()?;
        Ok(match self.endian {
            Endian::Big => u64::from_be_bytes(bytes),
            Endian::Little => u64::from_le_bytes(bytes),
        })
    }

    /// Writes an `i64` in the current byte order.
    #[inline(always)]
    pub fn write_i64(&mut self, value: i64) {
        self.write_u64(value as u64)
    }

    /// Reads an `i64` in the current byte order.
    #[inline(always)]
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(self.read_u64()? as i64)
    }

    /// Writes an `f32` as its 4-byte IEEE-754 bit pattern in the current
    /// byte order.
    pub fn write_f32(&mut self, value: f32) {
        self.write_u32(value.to_bits())
    }

    /// Reads an `f32` from its 4-byte IEEE-754 bit pattern in the current
    /// byte order.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Writes an `f64` as its 8-byte IEEE-754 bit pattern in the current
    /// byte order.
    pub fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits())
    }

    /// Reads an `f64` from its 8-byte IEEE-754 bit pattern in the current
    /// byte order.
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_bits(self.read_u64()?))
    }

    /// Encodes a `u32` as a variable-length integer, 1 to 5 bytes.
    ///
    /// Each byte carries 7 value bits, least-significant group first; the
    /// high bit of a byte is set when more groups follow. Byte order does
    /// not apply to variable-length values.
    pub fn write_var_u32(&mut self, value: u32) {
        let mut n = value;
        loop {
            if n < MORE as u32 {
                self.write_u8(n as u8);
                break;
            }
            self.write_u8((n as u8 & MASK) | MORE);
            n >>= 7;
        }
    }

    /// Decodes a variable-length `u32`.
    ///
    /// Fails with [`StreamError::VarIntTooBig`] if 5 bytes are consumed
    /// without a terminating (high-bit-clear) byte, and with
    /// [`StreamError::EndOfStream`] if the buffer ends mid-value.
    pub fn read_var_u32(&mut self) -> Result<u32> {
        let mut shift: u32 = 0;
        let mut n: u32 = 0;

        loop {
            let b = self.read_u8()?;
            n |= ((b & MASK) as u32) << shift;

            if (b & MORE) == 0 {
                return Ok(n);
            }

            shift += 7;
            if shift >= 32 {
                return Err(StreamError::VarIntTooBig);
            }
        }
    }

    /// Encodes a `u64` as a variable-length integer, 1 to 10 bytes.
    pub fn write_var_u64(&mut self, value: u64) {
        let mut n = value;
        loop {
            if n < MORE as u64 {
                self.write_u8(n as u8);
                break;
            }
            self.write_u8((n as u8 & MASK) | MORE);
            n >>= 7;
        }
    }

    /// Decodes a variable-length `u64`.
    ///
    /// Fails with [`StreamError::VarLongTooBig`] if 10 bytes are consumed
    /// without a terminating byte, and with [`StreamError::EndOfStream`] if
    /// the buffer ends mid-value.
    pub fn read_var_u64(&mut self) -> Result<u64> {
        let mut shift: u32 = 0;
        let mut n: u64 = 0;

        loop {
            let b = self.read_u8()?;
            n |= ((b & MASK) as u64) << shift;

            if (b & MORE) == 0 {
                return Ok(n);
            }

            shift += 7;
            if shift >= 64 {
                return Err(StreamError::VarLongTooBig);
            }
        }
    }

    /// Encodes an `i32` as a zigzag-mapped variable-length integer.
    ///
    /// Zigzag maps small-magnitude values of either sign to small unsigned
    /// values (`0 -> 0`, `-1 -> 1`, `1 -> 2`, `-2 -> 3`, ...), so small
    /// negatives stay short on the wire. Plain variable-length encoding
    /// would spend 5 bytes on any negative `i32`.
    pub fn write_zigzag_i32(&mut self, value: i32) {
        self.write_var_u32(((value << 1) ^ (value >> 31)) as u32)
    }

    /// Decodes a zigzag-mapped variable-length `i32`.
    pub fn read_zigzag_i32(&mut self) -> Result<i32> {
        let n = self.read_var_u32()?;
        Ok(((n >> 1) as i32) ^ -((n & 1) as i32))
    }

    /// Encodes an `i64` as a zigzag-mapped variable-length integer.
    pub fn write_zigzag_i64(&mut self, value: i64) {
        self.write_var_u64(((value << 1) ^ (value >> 63)) as u64)
    }

    /// Decodes a zigzag-mapped variable-length `i64`.
    pub fn read_zigzag_i64(&mut self) -> Result<i64> {
        let n = self.read_var_u64()?;
        Ok(((n >> 1) as i64) ^ -((n & 1) as i64))
    }
}

impl Default for Stream {
    fn default() -> Self {
        Self::new()
    }
}
