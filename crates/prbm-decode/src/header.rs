//! Fixed 8-byte header.

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};

/// The only format version this crate understands.
pub const SUPPORTED_VERSION: u8 = 1;

/// Size of the header in bytes.
pub const HEADER_LEN: usize = 8;

/// Bit assignment of the format byte at offset 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderLayout {
    /// Bit 0 indexed, bit 1 big-endian, bits 2-7 attribute count.
    #[default]
    Packed,
    /// Bits 0-2 attribute count, bit 3 big-endian, bit 5 indexed.
    ///
    /// This is the layout found in tiles written by the renderer itself.
    Renderer,
}

/// Flags unpacked from the format byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatBits {
    pub indexed: bool,
    pub big_endian: bool,
    pub attribute_count: u8,
}

impl HeaderLayout {
    /// Split a format byte into its flags.
    #[must_use]
    pub fn unpack(self, bits: u8) -> FormatBits {
        match self {
            Self::Packed => FormatBits {
                indexed: bits & 0b01 != 0,
                big_endian: bits & 0b10 != 0,
                attribute_count: bits >> 2,
            },
            Self::Renderer => FormatBits {
                indexed: (bits >> 5) & 1 != 0,
                big_endian: (bits >> 3) & 1 != 0,
                attribute_count: bits & 0b111,
            },
        }
    }
}

/// Decoded PRBM header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u8,
    pub indexed: bool,
    pub little_endian: bool,
    /// Number of attribute entries following the header.
    pub attribute_count: u8,
    /// Number of vertices (values per attribute).
    pub num_values: u32,
    /// Number of indices; always 0 for non-indexed tiles.
    pub num_indices: u32,
}

impl Header {
    /// Size of the index space that material groups address.
    #[must_use]
    pub fn index_domain(&self) -> u32 {
        if self.indexed {
            self.num_indices
        } else {
            self.num_values
        }
    }

    /// Triangle count implied by the header.
    #[must_use]
    pub fn num_triangles(&self) -> u32 {
        self.index_domain() / 3
    }
}

/// Decode the header from the start of `cursor`.
///
/// A version mismatch is reported before any byte past the version is read.
/// Every other check runs on the complete header, so a header cut short with
/// a valid version always fails with [`DecodeError::UnexpectedEndOfData`].
pub fn decode_header(cursor: &mut ByteCursor<'_>, layout: HeaderLayout) -> DecodeResult<Header> {
    let version_offset = cursor.offset();
    let version = cursor.read_u8()?;
    if version != SUPPORTED_VERSION {
        return Err(DecodeError::UnsupportedVersion {
            offset: version_offset,
            version,
        });
    }

    let format_offset = cursor.offset();
    let bits = layout.unpack(cursor.read_u8()?);
    let num_values = cursor.read_u24_le()?;
    let indices_offset = cursor.offset();
    let num_indices = cursor.read_u24_le()?;

    if bits.big_endian {
        return Err(DecodeError::UnsupportedEncoding {
            offset: format_offset,
        });
    }

    if !bits.indexed && num_indices != 0 {
        return Err(DecodeError::MalformedHeader {
            offset: indices_offset,
            reason: format!("non-indexed tile declares {num_indices} indices"),
        });
    }
    if bits.indexed && num_indices % 3 != 0 {
        return Err(DecodeError::MalformedHeader {
            offset: indices_offset,
            reason: format!("index count {num_indices} is not a multiple of 3"),
        });
    }

    let header = Header {
        version,
        indexed: bits.indexed,
        little_endian: true,
        attribute_count: bits.attribute_count,
        num_values,
        num_indices,
    };
    tracing::trace!(
        indexed = header.indexed,
        attribute_count = header.attribute_count,
        num_values,
        num_indices,
        "decoded PRBM header"
    );
    Ok(header)
}
