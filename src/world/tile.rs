//! Tile identifiers
//!
//! The map stores one `TileId` per cell. Anything other than `None` is solid.

use serde::{Deserialize, Serialize};

/// Edge length of a tile in pixels (world space)
pub const TILE_SIZE: f32 = 16.0;

/// What occupies a single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileId {
    /// Empty air
    #[default]
    None = 0,
    /// Terrain, auto-tiled when drawn
    Ground = 1,
    /// Breakable coin block, cleared when struck from below
    Block = 2,
}

impl TileId {
    pub fn is_solid(self) -> bool {
        self != TileId::None
    }

    /// First column of this tile's 3x3 block in the tile sheet
    pub fn sheet_column(self) -> u32 {
        match self {
            TileId::None => 0,
            TileId::Ground => 0,
            TileId::Block => 3,
        }
    }
}
