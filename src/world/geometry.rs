//! Pixel-space rectangles and their relation to the tile grid

use macroquad::math::Rect;
use super::tile::TILE_SIZE;

/// Strict AABB overlap test: rectangles that only share an edge do not overlap.
///
/// macroquad's `Rect::overlaps` counts touching edges as overlapping, which
/// would make a player standing on a tile collide with it every frame.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// Pixel-space rectangle covered by the tile at grid (x, y)
pub fn tile_rect(x: i32, y: i32) -> Rect {
    Rect::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE, TILE_SIZE, TILE_SIZE)
}

/// Inclusive range of grid cells touched by a rectangle, clamped to the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpan {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TileSpan {
    /// Cells under `rect` in a `width` x `height` map.
    ///
    /// The far edge is included even when it lies exactly on a tile boundary;
    /// the overlap test filters those cells out afterwards.
    pub fn covering(rect: &Rect, width: usize, height: usize) -> Self {
        let top = ((rect.y / TILE_SIZE) as i32).max(0);
        let left = ((rect.x / TILE_SIZE) as i32).max(0);
        let bottom = (((rect.y + rect.h) / TILE_SIZE) as i32).min(height as i32 - 1);
        let right = (((rect.x + rect.w) / TILE_SIZE) as i32).min(width as i32 - 1);

        Self { left, top, right, bottom }
    }

    /// Cells in row-major order
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        (self.top..=self.bottom).flat_map(move |y| (self.left..=self.right).map(move |x| (x, y)))
    }
}
