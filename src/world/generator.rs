//! Procedural level generation
//!
//! Terrain is built one column at a time:
//! 1. A Perlin sample gives the surface height for the column
//! 2. Short holes are carved at random, removing the column's ground
//! 3. Everything from the surface down becomes Ground
//! 4. Occasionally a coin block floats above the surface, leaving three or
//!    four empty rows between it and the ground
//!
//! The spawn column and the exit column always keep their ground, and the
//! exit door is placed on top of the exit column.
//!
//! All randomness comes from the seed passed to `generate`, so the same seed
//! and map size always produce the same level.

use macroquad::math::Rect;
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::objects::{Object, ObjectHandle, ObjectKind, ObjectRegistry};
use super::tile::{TileId, TILE_SIZE};
use super::tilemap::Tilemap;

/// Column the player spawns above
pub const SPAWN_COLUMN: i32 = 3;

/// Distance of the exit column from the right edge of the map
pub const EXIT_MARGIN: i32 = 3;

/// Door sprite size in pixels
pub const DOOR_SIZE: (f32, f32) = (16.0, 32.0);

/// Column holding the exit door for a map of the given width
pub fn exit_column(width: usize) -> i32 {
    (width as i32 - EXIT_MARGIN).max(0)
}

/// Terrain shaping parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Noise frequency along x (horizontal stretch)
    pub frequency: f32,
    /// Surface height variation in tiles
    pub amplitude: f32,
    /// Rows between the bottom of the map and the average surface
    pub baseline_offset: i32,
    /// Per-column chance of a floating coin block
    pub coin_chance: f32,
    /// Per-column chance of starting a hole
    pub hole_chance: f32,
    /// Longest hole in columns
    pub max_hole_len: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            frequency: 0.06,
            amplitude: 8.0,
            baseline_offset: 12,
            coin_chance: 0.05,
            hole_chance: 0.05,
            max_hole_len: 4,
        }
    }
}

/// Summary of a generated level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub seed: u64,
    /// Grid cell the door's top-left corner sits in
    pub door_tile: (i32, i32),
    /// Handle of the spawned door, `None` if the object registry was full
    pub door: Option<ObjectHandle>,
    /// Number of hole columns carved
    pub holes: usize,
    /// Number of coin blocks placed
    pub blocks: usize,
}

/// Builds levels into an existing tilemap and object registry
#[derive(Debug, Clone, Default)]
pub struct LevelGenerator {
    pub config: GeneratorConfig,
}

impl LevelGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Rewrite every tile of `tilemap` and spawn the exit door into `objects`.
    ///
    /// `objects` is expected to be cleared by the caller beforehand.
    pub fn generate(&self, seed: u64, tilemap: &mut Tilemap, objects: &mut ObjectRegistry) -> LevelLayout {
        let cfg = &self.config;
        let mut rng = StdRng::seed_from_u64(seed);
        let perlin = Perlin::new(rng.gen::<u32>());
        let seed_z = rng.gen_range(0..1000) as f64 / 1000.0;

        let width = tilemap.width() as i32;
        let height = tilemap.height() as i32;
        let exit_x = exit_column(tilemap.width());

        let mut hole_run = 0u32;
        let mut holes = 0;
        let mut blocks = 0;

        for x in 0..width {
            let terrain_y = self.surface_height(&perlin, x, seed_z, height);

            if hole_run == 0 && rng.gen::<f32>() < cfg.hole_chance {
                hole_run = rng.gen_range(1..=cfg.max_hole_len.max(1));
            }

            let mut surface_y = terrain_y;
            if hole_run > 0 {
                // No ground at all in this column
                surface_y = height;
                hole_run -= 1;
            }

            // Spawn and exit platforms ignore holes
            if x == SPAWN_COLUMN || x == exit_x {
                surface_y = terrain_y;
            }
            if surface_y >= height {
                holes += 1;
            }

            for y in 0..height {
                let tile = if y >= surface_y { TileId::Ground } else { TileId::None };
                tilemap.set(x, y, tile);
            }

            if surface_y > 3 && rng.gen::<f32>() < cfg.coin_chance {
                // Clear of a player standing on the surface
                let block_y = surface_y - 4 - rng.gen_range(0..=1);
                if tilemap.get(x, block_y) == Some(TileId::None) {
                    tilemap.set(x, block_y, TileId::Block);
                    blocks += 1;
                }
            }
        }

        let door_y = tilemap
            .first_in_column(exit_x, TileId::Ground)
            .map(|ground| ground - 2)
            .unwrap_or(height - 1);

        let door_rect = Rect::new(
            exit_x as f32 * TILE_SIZE,
            door_y as f32 * TILE_SIZE,
            DOOR_SIZE.0,
            DOOR_SIZE.1,
        );
        let door = objects.spawn(Object::new(ObjectKind::Door, door_rect));

        LevelLayout {
            seed,
            door_tile: (exit_x, door_y),
            door,
            holes,
            blocks,
        }
    }

    /// Surface row for column `x` before holes are applied, clamped to
    /// `[1, height - 1]`
    fn surface_height(&self, perlin: &Perlin, x: i32, seed_z: f64, height: i32) -> i32 {
        let cfg = &self.config;
        let n = perlin
            .get([x as f64 * cfg.frequency as f64, 0.0, seed_z])
            .clamp(-1.0, 1.0) as f32;
        let baseline = (height - cfg.baseline_offset) as f32;
        let surface = (baseline + n * cfg.amplitude).round() as i32;

        surface.clamp(1, (height - 1).max(1))
    }
}
