//! Attribute table decoding.
//!
//! Each attribute entry consists of a NUL-terminated name, a type byte, pad
//! bytes up to the next 4-byte boundary and `num_values * cardinality`
//! components of the declared element type.

use std::fmt;

use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};

/// Which vertex attribute an entry carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    Normal,
    Color,
    Uv,
    Ao,
    Blocklight,
    Sunlight,
    /// A name outside the standard set; kept as-is.
    Unknown(String),
}

impl AttributeKind {
    /// Map an attribute name to its kind by exact match.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "position" => Self::Position,
            "normal" => Self::Normal,
            "color" => Self::Color,
            "uv" => Self::Uv,
            "ao" => Self::Ao,
            "blocklight" => Self::Blocklight,
            "sunlight" => Self::Sunlight,
            other => Self::Unknown(other.to_owned()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Position => "position",
            Self::Normal => "normal",
            Self::Color => "color",
            Self::Uv => "uv",
            Self::Ao => "ao",
            Self::Blocklight => "blocklight",
            Self::Sunlight => "sunlight",
            Self::Unknown(name) => name,
        }
    }

    /// Canonical shape for the standard kinds.
    fn expected_shape(&self) -> Option<(u8, ValueClass, &'static str)> {
        match self {
            Self::Position | Self::Normal | Self::Color => {
                Some((3, ValueClass::Float, "3 floating point components"))
            }
            Self::Uv => Some((2, ValueClass::Float, "2 floating point components")),
            Self::Ao => Some((1, ValueClass::Float, "1 floating point component")),
            Self::Blocklight | Self::Sunlight => {
                Some((1, ValueClass::Integer, "1 raw integer component"))
            }
            Self::Unknown(_) => None,
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage type of a single component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Float32,
    Int8,
    Int16,
    Int32,
    UInt8,
    UInt16,
    UInt32,
}

impl ElementType {
    /// Parse the low nibble of a type byte.
    #[must_use]
    pub fn from_encoding(encoding: u8) -> Option<Self> {
        Some(match encoding {
            1 => Self::Float32,
            3 => Self::Int8,
            4 => Self::Int16,
            6 => Self::Int32,
            7 => Self::UInt8,
            8 => Self::UInt16,
            10 => Self::UInt32,
            _ => return None,
        })
    }

    /// Bytes per component.
    #[must_use]
    pub fn byte_width(self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Float32 | Self::Int32 | Self::UInt32 => 4,
        }
    }
}

/// Element types that can be stored without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntegerType {
    Int8,
    Int16,
    Int32,
    UInt8,
    UInt16,
    UInt32,
}

impl ElementType {
    fn integer(self) -> Option<IntegerType> {
        Some(match self {
            Self::Float32 => return None,
            Self::Int8 => IntegerType::Int8,
            Self::Int16 => IntegerType::Int16,
            Self::Int32 => IntegerType::Int32,
            Self::UInt8 => IntegerType::UInt8,
            Self::UInt16 => IntegerType::UInt16,
            Self::UInt32 => IntegerType::UInt32,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueClass {
    Float,
    Integer,
}

/// Header of one attribute entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub name: String,
    pub kind: AttributeKind,
    pub element_type: ElementType,
    pub normalized: bool,
    /// Base-type bit of the type byte (set for integer attributes).
    pub integral: bool,
    /// Components per value, 1 to 4.
    pub cardinality: u8,
}

impl AttributeDescriptor {
    /// Raw integer type when values are stored unconverted.
    fn raw_integer(&self) -> Option<IntegerType> {
        if self.normalized {
            None
        } else {
            self.element_type.integer()
        }
    }

    fn value_class(&self) -> ValueClass {
        if self.raw_integer().is_some() {
            ValueClass::Integer
        } else {
            ValueClass::Float
        }
    }
}

/// Decoded component data.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValues {
    /// Float32 data and normalized integers.
    Float(Vec<f32>),
    /// Non-normalized integers, widened without conversion.
    Integer(Vec<i64>),
}

/// One decoded attribute: its descriptor plus `num_values` tuples stored
/// flat in component order.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeArray {
    pub descriptor: AttributeDescriptor,
    pub values: AttributeValues,
}

impl AttributeArray {
    #[must_use]
    pub fn kind(&self) -> &AttributeKind {
        &self.descriptor.kind
    }

    /// Number of tuples.
    #[must_use]
    pub fn len(&self) -> usize {
        let components = match &self.values {
            AttributeValues::Float(v) => v.len(),
            AttributeValues::Integer(v) => v.len(),
        };
        components / usize::from(self.descriptor.cardinality)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat floating point components, if this attribute decodes to floats.
    #[must_use]
    pub fn floats(&self) -> Option<&[f32]> {
        match &self.values {
            AttributeValues::Float(v) => Some(v),
            AttributeValues::Integer(_) => None,
        }
    }

    /// Flat raw integer components, if this attribute is not normalized.
    #[must_use]
    pub fn integers(&self) -> Option<&[i64]> {
        match &self.values {
            AttributeValues::Integer(v) => Some(v),
            AttributeValues::Float(_) => None,
        }
    }

    /// Components of tuple `index` as floats.
    #[must_use]
    pub fn float_tuple(&self, index: usize) -> Option<&[f32]> {
        let n = usize::from(self.descriptor.cardinality);
        self.floats()?.get(index * n..(index + 1) * n)
    }

    /// Components of tuple `index` as raw integers.
    #[must_use]
    pub fn integer_tuple(&self, index: usize) -> Option<&[i64]> {
        let n = usize::from(self.descriptor.cardinality);
        self.integers()?.get(index * n..(index + 1) * n)
    }
}

/// Split a type byte into its parts.
///
/// Bit 7 is the integral base type, bit 6 the normalized flag, bits 4-5 the
/// cardinality minus one and bits 0-3 the component encoding. Returns the
/// raw encoding on failure.
fn parse_type_byte(byte: u8) -> Result<(bool, bool, u8, ElementType), u8> {
    let integral = byte & 0x80 != 0;
    let normalized = byte & 0x40 != 0;
    let cardinality = ((byte >> 4) & 0x3) + 1;
    let encoding = byte & 0x0F;
    let element_type = ElementType::from_encoding(encoding).ok_or(encoding)?;
    Ok((integral, normalized, cardinality, element_type))
}

/// Decode one attribute entry holding `num_values` tuples.
pub fn decode_attribute(
    cursor: &mut ByteCursor<'_>,
    num_values: u32,
) -> DecodeResult<AttributeArray> {
    let entry_offset = cursor.offset();
    let name = cursor.read_cstring()?;
    let type_offset = cursor.offset();
    let type_byte = cursor.read_u8()?;

    let (integral, normalized, cardinality, element_type) = parse_type_byte(type_byte)
        .map_err(|encoding| DecodeError::UnsupportedComponentType {
            offset: type_offset,
            name: name.clone(),
            encoding,
        })?;

    let descriptor = AttributeDescriptor {
        kind: AttributeKind::from_name(&name),
        name,
        element_type,
        normalized,
        integral,
        cardinality,
    };

    if let Some((want_cardinality, want_class, expected)) = descriptor.kind.expected_shape() {
        if descriptor.cardinality != want_cardinality || descriptor.value_class() != want_class {
            return Err(DecodeError::AttributeShapeMismatch {
                offset: entry_offset,
                name: descriptor.name,
                expected,
            });
        }
    }

    cursor.align_to(4)?;

    let component_count = u64::from(num_values) * u64::from(cardinality);
    let required = component_count * element_type.byte_width() as u64;
    if required > cursor.remaining() as u64 {
        return Err(DecodeError::AttributeSizeMismatch {
            offset: cursor.offset(),
            name: descriptor.name,
            required,
            available: cursor.remaining(),
        });
    }

    // Bounded by the remaining buffer length checked above.
    #[allow(clippy::cast_possible_truncation)]
    let component_count = component_count as usize;

    let values = match descriptor.raw_integer() {
        Some(integer_type) => {
            AttributeValues::Integer(read_integers(cursor, integer_type, component_count)?)
        }
        None => AttributeValues::Float(read_floats(cursor, element_type, component_count)?),
    };

    tracing::trace!(
        name = %descriptor.name,
        ?element_type,
        normalized,
        cardinality,
        "decoded attribute"
    );

    Ok(AttributeArray { descriptor, values })
}

/// Read `count` components, normalizing integer encodings into `[-1, 1]` or
/// `[0, 1]`.
#[allow(clippy::cast_possible_truncation)]
fn read_floats(
    cursor: &mut ByteCursor<'_>,
    element_type: ElementType,
    count: usize,
) -> DecodeResult<Vec<f32>> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let value = match element_type {
            ElementType::Float32 => cursor.read_f32_le()?,
            ElementType::Int8 => (f32::from(cursor.read_i8()?) / 127.0).max(-1.0),
            ElementType::UInt8 => f32::from(cursor.read_u8()?) / 255.0,
            ElementType::Int16 => (f32::from(cursor.read_i16_le()?) / f32::from(i16::MAX)).max(-1.0),
            ElementType::UInt16 => f32::from(cursor.read_u16_le()?) / f32::from(u16::MAX),
            ElementType::Int32 => {
                (f64::from(cursor.read_i32_le()?) / f64::from(i32::MAX)).max(-1.0) as f32
            }
            ElementType::UInt32 => {
                (f64::from(cursor.read_u32_le()?) / f64::from(u32::MAX)) as f32
            }
        };
        out.push(value);
    }
    Ok(out)
}

fn read_integers(
    cursor: &mut ByteCursor<'_>,
    integer_type: IntegerType,
    count: usize,
) -> DecodeResult<Vec<i64>> {
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let value = match integer_type {
            IntegerType::Int8 => i64::from(cursor.read_i8()?),
            IntegerType::UInt8 => i64::from(cursor.read_u8()?),
            IntegerType::Int16 => i64::from(cursor.read_i16_le()?),
            IntegerType::UInt16 => i64::from(cursor.read_u16_le()?),
            IntegerType::Int32 => i64::from(cursor.read_i32_le()?),
            IntegerType::UInt32 => i64::from(cursor.read_u32_le()?),
        };
        out.push(value);
    }
    Ok(out)
}
