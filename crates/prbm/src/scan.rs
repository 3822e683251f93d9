//! Block extraction from tiles.
//!
//! Scanning decodes a tile, places it on the grid and reduces its vertex
//! positions to blocks. Tile bytes are supplied by the caller; fetching them
//! is not this crate's concern.

use glam::{IVec2, Vec3};
use prbm_decode::{DecodeOptions, MaterialGroup, ParsedTile, decode_tile_with};

use crate::blocks::{BlockSet, HeightRange};
use crate::error::{Error, Result};
use crate::grid::{Grid, WorldBounds};

/// Coordinate space of decoded vertex positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PositionSpace {
    /// Positions are already world coordinates.
    #[default]
    World,
    /// Positions are relative to the tile's minimum corner.
    TileLocal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub grid: Grid,
    pub decode: DecodeOptions,
    pub positions: PositionSpace,
    pub height: HeightRange,
}

/// Blocks and summary data extracted from one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileScan {
    pub tile: IVec2,
    pub bounds: WorldBounds,
    pub num_triangles: u32,
    pub num_vertices: usize,
    pub material_groups: Vec<MaterialGroup>,
    /// Vertex positions in world space, in vertex order.
    pub vertex_positions: Vec<Vec3>,
    /// Vertex colors in `[0, 1]`, index-aligned with `vertex_positions`.
    /// Empty when the tile has no color attribute.
    pub colors: Vec<Vec3>,
    pub blocks: BlockSet,
}

impl TileScan {
    /// Each vertex position paired with its color.
    pub fn colored_vertices(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.vertex_positions
            .iter()
            .copied()
            .zip(self.colors.iter().copied())
    }
}

/// Decode `bytes` as tile `tile` and extract its blocks.
pub fn scan_tile(tile: IVec2, bytes: &[u8], options: &ScanOptions) -> Result<TileScan> {
    let parsed = decode_tile_with(bytes, &options.decode)?;
    scan_parsed(tile, &parsed, options)
}

/// Extract blocks from an already decoded tile.
pub fn scan_parsed(tile: IVec2, parsed: &ParsedTile, options: &ScanOptions) -> Result<TileScan> {
    let bounds = options.grid.tile_to_world(tile)?;
    let shift = match options.positions {
        PositionSpace::World => Vec3::ZERO,
        PositionSpace::TileLocal => bounds.origin().as_vec3(),
    };

    let mut vertex_positions = parsed.positions();
    for position in &mut vertex_positions {
        *position += shift;
    }
    let mut blocks = BlockSet::from_positions(vertex_positions.iter().copied(), |p| p);
    blocks.retain_height(options.height);

    tracing::debug!(
        tile_x = tile.x,
        tile_z = tile.y,
        blocks = blocks.len(),
        triangles = parsed.num_triangles(),
        "scanned tile"
    );

    Ok(TileScan {
        tile,
        bounds,
        num_triangles: parsed.num_triangles(),
        num_vertices: parsed.num_vertices(),
        material_groups: parsed.material_groups().to_vec(),
        vertex_positions,
        colors: parsed.colors(),
        blocks,
    })
}

/// A tile that could not be scanned.
#[derive(Debug)]
pub struct SkippedTile {
    pub tile: IVec2,
    pub error: Error,
}

/// Result of scanning many tiles.
#[derive(Debug, Default)]
pub struct AreaScan {
    pub tiles: Vec<TileScan>,
    pub skipped: Vec<SkippedTile>,
}

impl AreaScan {
    /// All blocks of all scanned tiles, deduplicated across tile borders.
    #[must_use]
    pub fn blocks(&self) -> BlockSet {
        self.tiles
            .iter()
            .flat_map(|t| t.blocks.iter().copied())
            .collect()
    }

    #[must_use]
    pub fn num_triangles(&self) -> u64 {
        self.tiles.iter().map(|t| u64::from(t.num_triangles)).sum()
    }
}

/// Scan every `(tile, bytes)` pair. Tiles that fail to decode are recorded
/// in [`AreaScan::skipped`] and do not stop the scan.
pub fn scan_area<I, B>(tiles: I, options: &ScanOptions) -> AreaScan
where
    I: IntoIterator<Item = (IVec2, B)>,
    B: AsRef<[u8]>,
{
    let mut area = AreaScan::default();
    for (tile, bytes) in tiles {
        match scan_tile(tile, bytes.as_ref(), options) {
            Ok(scan) => area.tiles.push(scan),
            Err(error) => {
                tracing::warn!(tile_x = tile.x, tile_z = tile.y, %error, "skipping tile");
                area.skipped.push(SkippedTile { tile, error });
            }
        }
    }
    tracing::debug!(
        scanned = area.tiles.len(),
        skipped = area.skipped.len(),
        "area scan complete"
    );
    area
}
