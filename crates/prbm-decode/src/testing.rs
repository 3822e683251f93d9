//! Byte fixtures for unit tests.

/// Float32, 3 components.
pub const TYPE_F32X3: u8 = 0x20 | 0x01;
/// Float32, 2 components.
pub const TYPE_F32X2: u8 = 0x10 | 0x01;
/// Normalized signed byte, 3 components.
pub const TYPE_NORM_I8X3: u8 = 0x40 | 0x20 | 0x03;
/// Normalized unsigned byte, 3 components.
pub const TYPE_NORM_U8X3: u8 = 0x40 | 0x20 | 0x07;
/// Normalized unsigned byte, 1 component.
pub const TYPE_NORM_U8: u8 = 0x40 | 0x07;
/// Raw signed byte, 1 component.
pub const TYPE_I8: u8 = 0x03;

/// Assembles tile buffers in the packed header layout.
pub struct TileWriter {
    buf: Vec<u8>,
    in_materials: bool,
}

impl TileWriter {
    pub fn new(format: u8, num_values: u32, num_indices: u32) -> Self {
        let mut buf = vec![1, format];
        buf.extend_from_slice(&num_values.to_le_bytes()[..3]);
        buf.extend_from_slice(&num_indices.to_le_bytes()[..3]);
        Self {
            buf,
            in_materials: false,
        }
    }

    /// Non-indexed tile declaring `attribute_count` attributes.
    pub fn flat(attribute_count: u8, num_values: u32) -> Self {
        Self::new(attribute_count << 2, num_values, 0)
    }

    pub fn attribute(mut self, name: &str, type_byte: u8, data: &[u8]) -> Self {
        self.buf.extend_from_slice(name.as_bytes());
        self.buf.push(0);
        self.buf.push(type_byte);
        self.pad();
        self.buf.extend_from_slice(data);
        self
    }

    pub fn material(mut self, material_id: i32, start_index: u32, count: u32) -> Self {
        self.begin_materials();
        self.buf.extend_from_slice(&material_id.to_le_bytes());
        self.buf.extend_from_slice(&start_index.to_le_bytes());
        self.buf.extend_from_slice(&count.to_le_bytes());
        self
    }

    /// Append the sentinel and return the bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.begin_materials();
        self.buf.extend_from_slice(&(-1i32).to_le_bytes());
        self.buf
    }

    fn begin_materials(&mut self) {
        if !self.in_materials {
            self.pad();
            self.in_materials = true;
        }
    }

    fn pad(&mut self) {
        while self.buf.len() % 4 != 0 {
            self.buf.push(0);
        }
    }
}

pub fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

pub fn i8_bytes(values: &[i8]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}
