//! Decode PRBM hi-res map tiles.
//!
//! PRBM is the compact binary mesh format a map renderer writes for its
//! full-detail (LOD 0) tiles. This crate turns one complete tile buffer into
//! a [`ParsedTile`]: header fields, per-vertex attribute arrays and the
//! material groups.
//!
//! # Design principles
//!
//! - **Synchronous**: No async, no threading primitives
//! - **All or nothing**: A decode either yields a whole tile or an error
//! - **Bounds-checked**: Every read goes through [`ByteCursor`]
//!
//! # Key functions
//!
//! - [`decode_tile`]: Decode a buffer with default options
//! - [`decode_tile_with`]: Decode with an explicit [`DecodeOptions`]
//! - [`decode_header`]: Parse only the fixed 8-byte header

mod error;

pub mod attribute;
pub mod cursor;
pub mod header;
pub mod material;
pub mod tile;

#[cfg(test)]
mod testing;

pub use attribute::{
    AttributeArray, AttributeDescriptor, AttributeKind, AttributeValues, ElementType,
    decode_attribute,
};
pub use cursor::ByteCursor;
pub use error::{DecodeError, DecodeResult};
pub use header::{FormatBits, HEADER_LEN, Header, HeaderLayout, SUPPORTED_VERSION, decode_header};
pub use material::{MATERIAL_SENTINEL, MaterialGroup, decode_material_groups};
pub use tile::{ParsedTile, VertexRecord, decode_tile, decode_tile_with};

/// Knobs for [`decode_tile_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Bit assignment of the header's format byte.
    pub header_layout: HeaderLayout,
    /// Accept material groups with `count == 0`.
    pub allow_empty_material_groups: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            header_layout: HeaderLayout::Packed,
            allow_empty_material_groups: true,
        }
    }
}
