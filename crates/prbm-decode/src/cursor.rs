//! Bounds-checked sequential reader.

use crate::error::{DecodeError, DecodeResult};

/// Sequential little-endian reader over an immutable byte buffer.
///
/// Reads either succeed completely or fail with
/// [`DecodeError::UnexpectedEndOfData`] and leave the offset untouched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current offset from the start of the buffer.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Read exactly `len` bytes.
    pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(DecodeError::UnexpectedEndOfData {
                offset: self.offset,
                requested: len,
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> DecodeResult<i8> {
        Ok(i8::from_le_bytes(self.read_array()?))
    }

    pub fn read_u16_le(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_i16_le(&mut self) -> DecodeResult<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    /// Read a 24-bit little-endian unsigned integer.
    pub fn read_u24_le(&mut self) -> DecodeResult<u32> {
        let [b0, b1, b2] = self.read_array()?;
        Ok(u32::from(b0) | (u32::from(b1) << 8) | (u32::from(b2) << 16))
    }

    pub fn read_u32_le(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i32_le(&mut self) -> DecodeResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32_le(&mut self) -> DecodeResult<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Read a NUL-terminated ASCII string, consuming the terminator.
    pub fn read_cstring(&mut self) -> DecodeResult<String> {
        let rest = &self.data[self.offset..];
        let Some(len) = rest.iter().position(|&b| b == 0) else {
            return Err(DecodeError::UnexpectedEndOfData {
                offset: self.offset,
                requested: rest.len() + 1,
            });
        };
        let text = &rest[..len];
        if !text.is_ascii() {
            return Err(DecodeError::InvalidAttributeName {
                offset: self.offset,
            });
        }
        // ASCII is always valid UTF-8.
        let text = String::from_utf8_lossy(text).into_owned();
        self.offset += len + 1;
        Ok(text)
    }

    /// Skip pad bytes up to the next multiple of `alignment`, measured from
    /// the start of the buffer.
    pub fn align_to(&mut self, alignment: usize) -> DecodeResult<()> {
        let padding = (alignment - self.offset % alignment) % alignment;
        self.read_bytes(padding)?;
        Ok(())
    }
}
