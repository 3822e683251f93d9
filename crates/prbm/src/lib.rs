//! Block positions from PRBM map tiles.
//!
//! This crate places decoded tiles on the world grid and reduces their
//! geometry to the set of blocks it touches. Decoding itself lives in
//! [`prbm_decode`], re-exported here for convenience.
//!
//! # Design principles
//!
//! - **Bytes in, blocks out**: Callers fetch tile data; this crate never
//!   touches the network or the filesystem
//! - **Partial failure**: [`scan_area`] keeps going when single tiles are
//!   malformed and reports which ones were skipped
//!
//! # Key functions
//!
//! - [`scan_tile`]: Decode one tile and extract its blocks
//! - [`scan_area`]: Scan many tiles and merge their blocks
//! - [`Grid::tile_to_world`] / [`Grid::world_to_tile`]: Coordinate mapping
//! - [`MapSettings::grid`]: Build a grid from a map's `settings.json`

mod error;

pub mod blocks;
pub mod grid;
pub mod scan;
pub mod settings;

pub use blocks::{BlockSet, HeightRange, HeightStats, block_of};
pub use error::{Error, Result};
pub use grid::{DEFAULT_TILE_SIZE, Grid, TileRange, WorldBounds};
pub use scan::{
    AreaScan, PositionSpace, ScanOptions, SkippedTile, TileScan, scan_area, scan_parsed,
    scan_tile,
};
pub use settings::{HiresSettings, MapSettings};

pub use prbm_decode::{
    AttributeKind, DecodeError, DecodeOptions, HeaderLayout, MaterialGroup, ParsedTile,
    decode_tile, decode_tile_with,
};
