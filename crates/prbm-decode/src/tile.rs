//! Whole-tile decoding and per-vertex views.

use glam::{Vec2, Vec3};

use crate::DecodeOptions;
use crate::attribute::{AttributeArray, AttributeKind, decode_attribute};
use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};
use crate::header::{Header, decode_header};
use crate::material::{MaterialGroup, decode_material_entries};

/// A fully decoded tile.
///
/// Every attribute holds exactly `header.num_values` tuples, so views of
/// different attributes line up index by index.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTile {
    header: Header,
    attributes: Vec<AttributeArray>,
    material_groups: Vec<MaterialGroup>,
}

/// All standard attributes of one vertex. Absent attributes are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VertexRecord {
    pub position: Option<Vec3>,
    pub normal: Option<Vec3>,
    pub color: Option<Vec3>,
    pub uv: Option<Vec2>,
    pub ao: Option<f32>,
    pub blocklight: Option<i64>,
    pub sunlight: Option<i64>,
}

impl ParsedTile {
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.header.num_values as usize
    }

    #[must_use]
    pub fn num_triangles(&self) -> u32 {
        self.header.num_triangles()
    }

    /// Attributes in declared order, including unknown ones.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeArray] {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, kind: &AttributeKind) -> Option<&AttributeArray> {
        self.attributes.iter().find(|a| a.kind() == kind)
    }

    #[must_use]
    pub fn material_groups(&self) -> &[MaterialGroup] {
        &self.material_groups
    }

    fn floats(&self, kind: &AttributeKind) -> &[f32] {
        self.attribute(kind)
            .and_then(AttributeArray::floats)
            .unwrap_or_default()
    }

    fn integers(&self, kind: &AttributeKind) -> &[i64] {
        self.attribute(kind)
            .and_then(AttributeArray::integers)
            .unwrap_or_default()
    }

    fn vec3s(&self, kind: &AttributeKind) -> Vec<Vec3> {
        self.floats(kind)
            .chunks_exact(3)
            .map(Vec3::from_slice)
            .collect()
    }

    #[must_use]
    pub fn positions(&self) -> Vec<Vec3> {
        self.vec3s(&AttributeKind::Position)
    }

    #[must_use]
    pub fn normals(&self) -> Vec<Vec3> {
        self.vec3s(&AttributeKind::Normal)
    }

    /// RGB colors in `[0, 1]`.
    #[must_use]
    pub fn colors(&self) -> Vec<Vec3> {
        self.vec3s(&AttributeKind::Color)
    }

    #[must_use]
    pub fn uvs(&self) -> Vec<Vec2> {
        self.floats(&AttributeKind::Uv)
            .chunks_exact(2)
            .map(Vec2::from_slice)
            .collect()
    }

    #[must_use]
    pub fn ao(&self) -> &[f32] {
        self.floats(&AttributeKind::Ao)
    }

    #[must_use]
    pub fn blocklight(&self) -> &[i64] {
        self.integers(&AttributeKind::Blocklight)
    }

    #[must_use]
    pub fn sunlight(&self) -> &[i64] {
        self.integers(&AttributeKind::Sunlight)
    }

    /// Gather every standard attribute of vertex `index`.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<VertexRecord> {
        if index >= self.num_vertices() {
            return None;
        }
        let tuple = |kind: AttributeKind| {
            self.attribute(&kind)
                .and_then(|a| a.float_tuple(index))
        };
        let scalar = |kind: AttributeKind| {
            self.attribute(&kind)
                .and_then(|a| a.integer_tuple(index))
                .map(|v| v[0])
        };
        Some(VertexRecord {
            position: tuple(AttributeKind::Position).map(Vec3::from_slice),
            normal: tuple(AttributeKind::Normal).map(Vec3::from_slice),
            color: tuple(AttributeKind::Color).map(Vec3::from_slice),
            uv: tuple(AttributeKind::Uv).map(Vec2::from_slice),
            ao: tuple(AttributeKind::Ao).map(|v| v[0]),
            blocklight: scalar(AttributeKind::Blocklight),
            sunlight: scalar(AttributeKind::Sunlight),
        })
    }
}

/// Section the decoder is reading; logged when a decode fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeStage {
    ExpectHeader,
    /// Reading attribute entry `index` (zero based).
    ExpectAttributeEntry { index: u8 },
    ExpectMaterialPadding,
    ExpectMaterialEntry,
}

struct TileDecoder<'a> {
    cursor: ByteCursor<'a>,
    options: &'a DecodeOptions,
    stage: DecodeStage,
}

impl<'a> TileDecoder<'a> {
    fn new(bytes: &'a [u8], options: &'a DecodeOptions) -> Self {
        Self {
            cursor: ByteCursor::new(bytes),
            options,
            stage: DecodeStage::ExpectHeader,
        }
    }

    fn run(&mut self) -> DecodeResult<ParsedTile> {
        let header = decode_header(&mut self.cursor, self.options.header_layout)?;

        let mut attributes: Vec<AttributeArray> =
            Vec::with_capacity(usize::from(header.attribute_count));
        for index in 0..header.attribute_count {
            self.stage = DecodeStage::ExpectAttributeEntry { index };
            let offset = self.cursor.offset();
            let attribute = decode_attribute(&mut self.cursor, header.num_values)?;
            if attributes
                .iter()
                .any(|a| a.descriptor.name == attribute.descriptor.name)
            {
                return Err(DecodeError::DuplicateAttribute {
                    offset,
                    name: attribute.descriptor.name,
                });
            }
            attributes.push(attribute);
        }

        self.stage = DecodeStage::ExpectMaterialPadding;
        self.cursor.align_to(4)?;

        self.stage = DecodeStage::ExpectMaterialEntry;
        let material_groups = decode_material_entries(
            &mut self.cursor,
            header.index_domain(),
            self.options.allow_empty_material_groups,
        )?;

        Ok(ParsedTile {
            header,
            attributes,
            material_groups,
        })
    }
}

/// Decode a tile with default options.
pub fn decode_tile(bytes: &[u8]) -> DecodeResult<ParsedTile> {
    decode_tile_with(bytes, &DecodeOptions::default())
}

/// Decode a complete tile buffer.
///
/// Either the whole tile decodes or an error describing the first problem is
/// returned.
pub fn decode_tile_with(bytes: &[u8], options: &DecodeOptions) -> DecodeResult<ParsedTile> {
    let mut decoder = TileDecoder::new(bytes, options);
    let result = decoder.run();
    match &result {
        Ok(tile) => tracing::debug!(
            vertices = tile.num_vertices(),
            triangles = tile.num_triangles(),
            attributes = tile.attributes.len(),
            materials = tile.material_groups.len(),
            "decoded PRBM tile"
        ),
        Err(err) => tracing::debug!(stage = ?decoder.stage, %err, "PRBM decode failed"),
    }
    result
}
