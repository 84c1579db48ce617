//! Tile map model, deserialized from Tiled's JSON map format.
//!
//! Only the parts a side-scroller needs are modelled: map size, tile size,
//! tileset gid ranges and tile layers. Unknown fields are ignored so maps
//! exported straight from Tiled load unchanged.
//!
//! Tiled stores rows top-down; this module hands out grid coordinates with
//! row 0 at the *bottom*, matching the Y-up world.

use glam::Vec2;
use serde::Deserialize;
use thiserror::Error;

/// Tiled reserves the top bits of a gid for flip flags.
const GID_MASK: u32 = 0x1FFF_FFFF;

#[derive(Debug, Error)]
pub enum TileMapError {
    #[error("malformed map JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("map has no tiles ({width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error("map is too large ({width}x{height} tiles)")]
    TooLarge { width: u32, height: u32 },
    #[error("map tile size must be positive ({width}x{height})")]
    ZeroTileSize { width: u32, height: u32 },
    #[error("layer '{layer}' has {actual} tiles, expected {expected}")]
    LayerSizeMismatch {
        layer: String,
        expected: usize,
        actual: usize,
    },
}

/// First gid and column count of a tileset referenced by the map.
#[derive(Debug, Clone, Deserialize)]
pub struct TilesetRef {
    pub firstgid: u32,
    #[serde(default = "default_columns")]
    pub columns: u32,
}

fn default_columns() -> u32 {
    1
}

/// One map layer. Object layers carry no `data` and are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MapLayer {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Row-major gids, top row first. 0 = empty cell.
    #[serde(default)]
    pub data: Vec<u32>,
}

/// A non-empty cell of a tile layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedTile {
    /// Column, left to right.
    pub x: u32,
    /// Row, bottom to top.
    pub y: u32,
    /// Global tile id with flip flags stripped.
    pub gid: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TileMap {
    /// Width of the map in tiles.
    pub width: u32,
    /// Height of the map in tiles.
    pub height: u32,
    /// Source tile width in pixels.
    #[serde(rename = "tilewidth")]
    pub tile_width: u32,
    /// Source tile height in pixels.
    #[serde(rename = "tileheight")]
    pub tile_height: u32,
    #[serde(default)]
    pub tilesets: Vec<TilesetRef>,
    #[serde(default)]
    pub layers: Vec<MapLayer>,
}

impl TileMap {
    /// Parse and validate a map.
    pub fn from_json(json: &str) -> Result<Self, TileMapError> {
        let map: TileMap = serde_json::from_str(json)?;
        map.validate()?;
        Ok(map)
    }

    fn validate(&self) -> Result<(), TileMapError> {
        if self.width == 0 || self.height == 0 {
            return Err(TileMapError::Empty {
                width: self.width,
                height: self.height,
            });
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(TileMapError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(TileMapError::ZeroTileSize {
                width: self.tile_width,
                height: self.tile_height,
            });
        }
        let expected = self.capacity();
        for layer in &self.layers {
            if layer.data.is_empty() {
                continue;
            }
            if layer.data.len() != expected {
                return Err(TileMapError::LayerSizeMismatch {
                    layer: layer.name.clone(),
                    expected,
                    actual: layer.data.len(),
                });
            }
        }
        Ok(())
    }

    /// Total capacity in tiles.
    pub fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Look up a layer by name.
    pub fn layer(&self, name: &str) -> Option<&MapLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Non-empty tiles of a layer, bottom row first.
    pub fn tiles<'a>(&'a self, layer: &'a MapLayer) -> impl Iterator<Item = PlacedTile> + 'a {
        let width = self.width;
        let height = self.height;
        layer
            .data
            .iter()
            .enumerate()
            .filter_map(move |(i, &raw)| {
                let gid = raw & GID_MASK;
                if gid == 0 {
                    return None;
                }
                let col = i as u32 % width;
                let row_from_top = i as u32 / width;
                Some(PlacedTile {
                    x: col,
                    y: height - 1 - row_from_top,
                    gid,
                })
            })
    }

    /// Atlas cell (col, row) for a gid, resolved through the tileset that owns it.
    pub fn atlas_cell(&self, gid: u32) -> (f32, f32) {
        let (first, columns) = self
            .tilesets
            .iter()
            .filter(|t| t.firstgid <= gid)
            .max_by_key(|t| t.firstgid)
            .map(|t| (t.firstgid, t.columns.max(1)))
            .unwrap_or((1, 1));
        let local = gid - first;
        ((local % columns) as f32, (local / columns) as f32)
    }

    /// World-space center of grid cell (x, y) for tiles of `tile_size`.
    pub fn tile_to_world(x: u32, y: u32, tile_size: Vec2) -> Vec2 {
        Vec2::new(x as f32, y as f32) * tile_size + tile_size / 2.0
    }
}
