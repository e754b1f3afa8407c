//! World module - the tile grid, objects placed in it, and level generation
//!
//! Pixel space and grid space are related by `TILE_SIZE`: grid cell (x, y)
//! covers pixels `[x * TILE_SIZE, (x + 1) * TILE_SIZE)` horizontally and the
//! same vertically, with y growing downward.

mod generator;
mod geometry;
mod objects;
mod tile;
mod tilemap;

pub use generator::*;
pub use geometry::*;
pub use objects::*;
pub use tile::*;
pub use tilemap::*;
