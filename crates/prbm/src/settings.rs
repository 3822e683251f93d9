//! Map settings as published next to the tiles.
//!
//! Only the fields that affect coordinate mapping are read; everything else
//! in the document is ignored.

use glam::IVec2;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::grid::{DEFAULT_TILE_SIZE, Grid};

/// Subset of a map's `settings.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSettings {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub hires: Option<HiresSettings>,
}

/// Grid of the full-detail tile layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiresSettings {
    #[serde(default = "default_tile_size")]
    pub tile_size: [i32; 2],
    #[serde(default)]
    pub translate: [i32; 2],
}

fn default_tile_size() -> [i32; 2] {
    [DEFAULT_TILE_SIZE; 2]
}

impl MapSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Grid described by the `hires` section, or the default grid if absent.
    pub fn grid(&self) -> Result<Grid> {
        let Some(hires) = &self.hires else {
            return Ok(Grid::default());
        };
        let [size_x, size_z] = hires.tile_size;
        if size_x != size_z {
            return Err(Error::InvalidGrid {
                reason: format!("tiles must be square, got {size_x}x{size_z}"),
            });
        }
        Grid::new(size_x, IVec2::from_array(hires.translate))
    }
}
