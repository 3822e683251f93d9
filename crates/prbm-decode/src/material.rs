//! Material group decoding.

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};

/// Material id that terminates the group list.
pub const MATERIAL_SENTINEL: i32 = -1;

/// A contiguous range of triangle indices rendered with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialGroup {
    pub material_id: i32,
    pub start_index: u32,
    pub count: u32,
}

impl MaterialGroup {
    /// One past the last index covered by this group.
    #[must_use]
    pub fn end_index(&self) -> u64 {
        u64::from(self.start_index) + u64::from(self.count)
    }
}

/// Decode the material section: padding to a 4-byte boundary followed by the
/// sentinel-terminated group list.
///
/// `domain` is the size of the index space the groups address.
pub fn decode_material_groups(
    cursor: &mut ByteCursor<'_>,
    domain: u32,
    allow_empty: bool,
) -> DecodeResult<Vec<MaterialGroup>> {
    cursor.align_to(4)?;
    decode_material_entries(cursor, domain, allow_empty)
}

/// Decode group records up to and including the sentinel. The cursor must
/// already be aligned.
pub fn decode_material_entries(
    cursor: &mut ByteCursor<'_>,
    domain: u32,
    allow_empty: bool,
) -> DecodeResult<Vec<MaterialGroup>> {
    let mut groups = Vec::new();
    loop {
        let offset = cursor.offset();
        let material_id = cursor.read_i32_le()?;
        if material_id == MATERIAL_SENTINEL {
            break;
        }
        if material_id < 0 {
            return Err(DecodeError::MalformedMaterialGroup {
                offset,
                reason: format!("negative material id {material_id}"),
            });
        }

        let group = MaterialGroup {
            material_id,
            start_index: cursor.read_u32_le()?,
            count: cursor.read_u32_le()?,
        };

        if group.count == 0 && !allow_empty {
            return Err(DecodeError::MalformedMaterialGroup {
                offset,
                reason: format!("material {material_id} has an empty range"),
            });
        }
        if group.end_index() > u64::from(domain) {
            return Err(DecodeError::MalformedMaterialGroup {
                offset,
                reason: format!(
                    "range {}..{} exceeds {domain} indices",
                    group.start_index,
                    group.end_index()
                ),
            });
        }

        tracing::trace!(
            material_id,
            start = group.start_index,
            count = group.count,
            "decoded material group"
        );
        groups.push(group);
    }

    if cursor.remaining() > 0 {
        tracing::trace!(
            trailing = cursor.remaining(),
            "ignoring bytes after material sentinel"
        );
    }

    Ok(groups)
}
