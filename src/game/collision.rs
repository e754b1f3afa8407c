//! Collision System
//!
//! Axis-separated AABB collision against the tile grid. Callers move and
//! resolve x first, then y; each pass only pushes along its own axis.
//! Fast bodies can tunnel through thin walls or catch on tile corners, which
//! is accepted in exchange for simple, predictable movement.

use macroquad::math::{Rect, Vec2};
use crate::world::{rects_overlap, tile_rect, TileId, TileSpan, Tilemap};

/// Gap left between a body and a wall after a horizontal push, so the body
/// does not stay in contact with the tile it was pushed out of.
const WALL_SKIN: f32 = 0.001;

/// Result of one axis pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Corrected body position
    pub rect: Rect,
    /// Velocity with the blocked component zeroed
    pub velocity: Vec2,
    /// Landed on a tile (vertical pass only)
    pub grounded: bool,
    /// Block tile cleared by a head-on strike from below
    pub broken_block: Option<(i32, i32)>,
}

impl CollisionResult {
    fn new(rect: Rect, velocity: Vec2) -> Self {
        Self {
            rect,
            velocity,
            grounded: false,
            broken_block: None,
        }
    }
}

/// Move `rect` by `velocity.x`, then push it out of every overlapping solid
/// tile in row-major order. The push direction comes from the velocity sign
/// at the start of the pass; when tiles disagree the last push wins.
pub fn move_and_collide_x(rect: Rect, velocity: Vec2, map: &Tilemap) -> CollisionResult {
    let direction = velocity.x;
    let mut result = CollisionResult::new(rect, velocity);
    result.rect.x += velocity.x;

    let span = TileSpan::covering(&result.rect, map.width(), map.height());
    for (x, y) in span.cells() {
        if !map.tile_at(x, y).is_solid() {
            continue;
        }

        let tile = tile_rect(x, y);
        if !rects_overlap(&result.rect, &tile) {
            continue;
        }

        if direction > 0.0 {
            result.rect.x = tile.x - result.rect.w - WALL_SKIN;
        } else if direction < 0.0 {
            result.rect.x = tile.x + tile.w + WALL_SKIN;
        }
        result.velocity.x = 0.0;
    }

    result
}

/// Move `rect` by `velocity.y`, then resolve against solid tiles.
///
/// Falling onto a tile snaps the body onto its top and marks it grounded.
/// Rising into a tile snaps the body under it; if that tile is a Block it is
/// cleared from the map and reported in `broken_block`.
pub fn move_and_collide_y(rect: Rect, velocity: Vec2, map: &mut Tilemap) -> CollisionResult {
    let direction = velocity.y;
    let mut result = CollisionResult::new(rect, velocity);
    result.rect.y += velocity.y;

    let span = TileSpan::covering(&result.rect, map.width(), map.height());
    for (x, y) in span.cells() {
        let id = map.tile_at(x, y);
        if !id.is_solid() {
            continue;
        }

        let tile = tile_rect(x, y);
        if !rects_overlap(&result.rect, &tile) {
            continue;
        }

        if direction > 0.0 {
            result.rect.y = tile.y - result.rect.h;
            result.grounded = true;
        } else if direction < 0.0 {
            result.rect.y = tile.y + tile.h;

            if id == TileId::Block {
                map.set(x, y, TileId::None);
                result.broken_block = Some((x, y));
            }
        }
        result.velocity.y = 0.0;
    }

    result
}

/// True if `rect` overlaps any solid tile
#[cfg(test)]
pub fn overlaps_solid(rect: &Rect, map: &Tilemap) -> bool {
    TileSpan::covering(rect, map.width(), map.height())
        .cells()
        .any(|(x, y)| map.tile_at(x, y).is_solid() && rects_overlap(rect, &tile_rect(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TILE_SIZE;

    /// 10x10 map with a solid floor on row 9
    fn floor_map() -> Tilemap {
        let mut map = Tilemap::new(10, 10);
        for x in 0..10 {
            map.set(x, 9, TileId::Ground);
        }
        map
    }

    #[test]
    fn test_land_on_floor() {
        let mut map = floor_map();
        let body = Rect::new(48.0, 110.0, 15.0, 31.0);
        let result = move_and_collide_y(body, Vec2::new(0.0, 5.0), &mut map);

        assert!(result.grounded);
        assert!((result.rect.y - (9.0 * TILE_SIZE - 31.0)).abs() < 0.001);
        assert!(result.velocity.y.abs() < 0.001);
        assert!(!overlaps_solid(&result.rect, &map));
    }

    #[test]
    fn test_free_fall_is_untouched() {
        let mut map = floor_map();
        let body = Rect::new(48.0, 0.0, 15.0, 31.0);
        let result = move_and_collide_y(body, Vec2::new(0.0, 3.0), &mut map);
        assert!(!result.grounded);
        assert!((result.rect.y - 3.0).abs() < 0.001);
        assert!((result.velocity.y - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_walk_into_wall_right() {
        let mut map = floor_map();
        map.set(5, 8, TileId::Ground);
        map.set(5, 7, TileId::Ground);

        let body = Rect::new(64.0, 113.0, 15.0, 31.0);
        let result = move_and_collide_x(body, Vec2::new(3.0, 0.0), &map);

        assert!(result.velocity.x.abs() < 0.001);
        assert!((result.rect.x - (5.0 * TILE_SIZE - 15.0 - WALL_SKIN)).abs() < 0.001);
        assert!(!overlaps_solid(&result.rect, &map));
    }

    #[test]
    fn test_walk_into_wall_left() {
        let mut map = floor_map();
        map.set(2, 8, TileId::Ground);

        let body = Rect::new(49.0, 113.0, 15.0, 31.0);
        let result = move_and_collide_x(body, Vec2::new(-3.0, 0.0), &map);

        assert!(result.velocity.x.abs() < 0.001);
        assert!((result.rect.x - (3.0 * TILE_SIZE + WALL_SKIN)).abs() < 0.001);
        assert!(!overlaps_solid(&result.rect, &map));
    }

    #[test]
    fn test_standing_on_floor_does_not_block_walking() {
        let map = floor_map();
        let body = Rect::new(48.0, 113.0, 15.0, 31.0);
        let result = move_and_collide_x(body, Vec2::new(2.5, 0.0), &map);
        assert!((result.rect.x - 50.5).abs() < 0.001);
        assert!((result.velocity.x - 2.5).abs() < 0.001);
    }

    #[test]
    fn test_head_hits_ground_ceiling() {
        let mut map = floor_map();
        map.set(3, 4, TileId::Ground);

        let body = Rect::new(48.0, 82.0, 15.0, 31.0);
        let result = move_and_collide_y(body, Vec2::new(0.0, -6.0), &mut map);

        assert!(result.velocity.y.abs() < 0.001);
        assert!(!result.grounded);
        assert!((result.rect.y - 5.0 * TILE_SIZE).abs() < 0.001);
        assert_eq!(result.broken_block, None);
        assert_eq!(map.tile_at(3, 4), TileId::Ground);
    }

    #[test]
    fn test_strike_block_breaks_it_once() {
        let mut map = floor_map();
        map.set(3, 4, TileId::Block);

        let body = Rect::new(48.0, 82.0, 15.0, 31.0);
        let first = move_and_collide_y(body, Vec2::new(0.0, -6.0), &mut map);
        assert_eq!(first.broken_block, Some((3, 4)));
        assert_eq!(map.tile_at(3, 4), TileId::None);

        // Same strike again: the block is gone, nothing to break or hit
        let second = move_and_collide_y(body, Vec2::new(0.0, -6.0), &mut map);
        assert_eq!(second.broken_block, None);
        assert!((second.rect.y - 76.0).abs() < 0.001);
        assert!((second.velocity.y + 6.0).abs() < 0.001);
    }

    #[test]
    fn test_strike_between_two_blocks_breaks_one() {
        let mut map = floor_map();
        map.set(3, 4, TileId::Block);
        map.set(4, 4, TileId::Block);

        // Body straddles columns 3 and 4
        let body = Rect::new(56.0, 82.0, 15.0, 31.0);
        let result = move_and_collide_y(body, Vec2::new(0.0, -6.0), &mut map);

        assert_eq!(result.broken_block, Some((3, 4)));
        assert_eq!(map.tile_at(3, 4), TileId::None);
        assert_eq!(map.tile_at(4, 4), TileId::Block);
    }

    #[test]
    fn test_landing_on_block_keeps_it() {
        let mut map = floor_map();
        map.set(3, 6, TileId::Block);

        let body = Rect::new(48.0, 64.0, 15.0, 31.0);
        let result = move_and_collide_y(body, Vec2::new(0.0, 2.0), &mut map);
        assert!(result.grounded);
        assert_eq!(result.broken_block, None);
        assert_eq!(map.tile_at(3, 6), TileId::Block);
    }

    #[test]
    fn test_body_outside_map_never_collides() {
        let mut map = floor_map();
        let body = Rect::new(48.0, 200.0, 15.0, 31.0);
        let result = move_and_collide_y(body, Vec2::new(0.0, 10.0), &mut map);
        assert!(!result.grounded);
        assert!((result.rect.y - 210.0).abs() < 0.001);
        let result = move_and_collide_x(Rect::new(-40.0, 113.0, 15.0, 31.0), Vec2::new(-3.0, 0.0), &map);
        assert!((result.rect.x + 43.0).abs() < 0.001);
        assert!((result.velocity.x + 3.0).abs() < 0.001);
    }
}
