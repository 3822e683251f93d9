//! Tile and world coordinate mapping.
//!
//! A [`Grid`] partitions the world's X/Z plane into square tiles of
//! `tile_size` blocks, with tile `(0, 0)` starting at `offset`. World
//! coordinates are block coordinates; Y is not part of the grid.

use glam::{IVec2, IVec3};

use crate::error::{Error, Result};

/// Tile edge length used when nothing else is configured.
pub const DEFAULT_TILE_SIZE: i32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    tile_size: i32,
    offset: IVec2,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            offset: IVec2::ZERO,
        }
    }
}

impl Grid {
    pub fn new(tile_size: i32, offset: IVec2) -> Result<Self> {
        if tile_size <= 0 {
            return Err(Error::InvalidGrid {
                reason: format!("tile size must be positive, got {tile_size}"),
            });
        }
        Ok(Self { tile_size, offset })
    }

    #[must_use]
    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    #[must_use]
    pub fn offset(&self) -> IVec2 {
        self.offset
    }

    /// World-space X/Z bounds covered by `tile`.
    ///
    /// Fails with [`Error::OutOfRange`] if any corner of the tile falls
    /// outside `i32` world coordinates.
    pub fn tile_to_world(&self, tile: IVec2) -> Result<WorldBounds> {
        let size = i64::from(self.tile_size);
        let axis = |t: i32, offset: i32| {
            let min = i64::from(t) * size + i64::from(offset);
            Some((i32::try_from(min).ok()?, i32::try_from(min + size - 1).ok()?))
        };
        match (axis(tile.x, self.offset.x), axis(tile.y, self.offset.y)) {
            (Some((min_x, max_x)), Some((min_z, max_z))) => Ok(WorldBounds {
                min: IVec2::new(min_x, min_z),
                max: IVec2::new(max_x, max_z),
            }),
            _ => Err(Error::OutOfRange {
                x: tile.x,
                z: tile.y,
            }),
        }
    }

    /// Tile containing the world X/Z coordinate `world`.
    ///
    /// Uses floor division, so `-1` maps to tile `-1`, not `0`. Fails with
    /// [`Error::OutOfRange`] only when the tile index itself leaves the
    /// `i32` range, which needs a tile size of 1 and a large offset.
    pub fn world_to_tile(&self, world: IVec2) -> Result<IVec2> {
        let size = i64::from(self.tile_size);
        // div_euclid equals floor division for a positive divisor.
        let axis = |w: i32, offset: i32| {
            i32::try_from((i64::from(w) - i64::from(offset)).div_euclid(size)).ok()
        };
        match (axis(world.x, self.offset.x), axis(world.y, self.offset.y)) {
            (Some(x), Some(z)) => Ok(IVec2::new(x, z)),
            _ => Err(Error::OutOfRange {
                x: world.x,
                z: world.y,
            }),
        }
    }

    /// Tile containing a block.
    pub fn tile_of_block(&self, block: IVec3) -> Result<IVec2> {
        self.world_to_tile(IVec2::new(block.x, block.z))
    }
}

/// Inclusive X/Z bounds of a tile. `y` of each vector holds Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldBounds {
    pub min: IVec2,
    pub max: IVec2,
}

impl WorldBounds {
    #[must_use]
    pub fn contains(&self, world: IVec2) -> bool {
        world.cmpge(self.min).all() && world.cmple(self.max).all()
    }

    /// The tile's corner as a 3D offset at height 0.
    #[must_use]
    pub fn origin(&self) -> IVec3 {
        IVec3::new(self.min.x, 0, self.min.y)
    }
}

/// Inclusive rectangle of tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub min: IVec2,
    pub max: IVec2,
}

impl TileRange {
    /// Range spanning two corners given in any order.
    #[must_use]
    pub fn new(a: IVec2, b: IVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// The `(2 * radius + 1)²` square centred on `center`.
    #[must_use]
    pub fn around(center: IVec2, radius: u32) -> Self {
        let r = i32::try_from(radius).unwrap_or(i32::MAX);
        Self {
            min: center.saturating_sub(IVec2::splat(r)),
            max: center.saturating_add(IVec2::splat(r)),
        }
    }

    /// Number of tiles in the range.
    #[must_use]
    pub fn len(&self) -> u64 {
        let span = |lo: i32, hi: i32| u64::try_from(i64::from(hi) - i64::from(lo) + 1).unwrap_or(0);
        span(self.min.x, self.max.x) * span(self.min.y, self.max.y)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, tile: IVec2) -> bool {
        tile.cmpge(self.min).all() && tile.cmple(self.max).all()
    }

    /// Tiles in X-major order: all Z for the lowest X first.
    pub fn iter(&self) -> impl Iterator<Item = IVec2> + use<> {
        let Self { min, max } = *self;
        (min.x..=max.x).flat_map(move |x| (min.y..=max.y).map(move |z| IVec2::new(x, z)))
    }
}
