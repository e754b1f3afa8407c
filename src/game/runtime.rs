//! Game Runtime
//!
//! `Game` owns the level (tiles + objects), the player and the camera, and
//! advances them one frame at a time. Drawing lives in `renderer`; input is
//! sampled by the caller and passed in, so the whole simulation can run
//! without a window.

use macroquad::math::Vec2;
use serde::{Deserialize, Serialize};

use super::animation::Animation;
use super::player::{Player, PlayerInput};
use crate::config::GameConfig;
use crate::world::{LevelGenerator, ObjectHandle, ObjectKind, ObjectRegistry, Tilemap};

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    /// 30 FPS
    Fps30,
    /// 60 FPS (what the movement constants are tuned for)
    #[default]
    Fps60,
    /// Unlocked (as fast as possible)
    Unlocked,
}

impl FpsLimit {
    /// Get the target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }
}

/// Visual theme of the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Grass,
    Snow,
}

/// Everything the frame loop needs from input this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub player: PlayerInput,
    /// Interact key went down this frame (enter doors)
    pub interact_pressed: bool,
}

/// Per-level seed derived from the base seed, so a fixed base seed gives a
/// reproducible sequence of levels.
pub fn level_seed(base_seed: u64, level: u32) -> u64 {
    // splitmix64 step
    let mut z = base_seed.wrapping_add((level as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// The whole game session
pub struct Game {
    pub theme: Theme,
    pub score: u32,
    /// Levels generated so far (the current level's number)
    pub level: u32,
    /// World-space point the camera is centered on
    pub camera_target: Vec2,
    pub camera_smoothing: f32,

    pub tilemap: Tilemap,
    pub objects: ObjectRegistry,
    pub player: Player,

    generator: LevelGenerator,
    base_seed: u64,
}

impl Game {
    /// Build a session with an empty map. `player_sheet_size` is the pixel
    /// size of the player sprite sheet. Call `new_level` before the first
    /// frame.
    pub fn new(config: &GameConfig, base_seed: u64, player_sheet_size: Vec2) -> Self {
        let anim = Animation::from_sheet(
            player_sheet_size,
            config.animation.animations,
            config.animation.frames,
            config.animation.frame_delay,
        );
        let player = Player::new(
            Vec2::ZERO,
            Vec2::new(config.player_size.0, config.player_size.1),
            config.movement,
            config.physics,
            anim,
        );
        let camera_target = player.rect.center();

        Self {
            theme: config.theme,
            score: 0,
            level: 0,
            camera_target,
            camera_smoothing: config.camera_smoothing,
            tilemap: Tilemap::new(config.world_width, config.world_height),
            objects: ObjectRegistry::new(config.object_capacity),
            player,
            generator: LevelGenerator::new(config.generator.clone()),
            base_seed,
        }
    }

    /// Regenerate the map in place, bump the level counter and put the
    /// player back at the spawn point. Score carries over.
    pub fn new_level(&mut self) {
        let seed = level_seed(self.base_seed, self.level);
        self.objects.clear();
        let layout = self.generator.generate(seed, &mut self.tilemap, &mut self.objects);

        self.level += 1;
        self.player.reset(&self.tilemap);
        log::info!(
            "Level {} started (seed {}, score {}): door at tile {:?}, {} hole columns, {} blocks",
            self.level, layout.seed, self.score, layout.door_tile, layout.holes, layout.blocks
        );
        if layout.door.is_none() {
            log::warn!("Level {} has no exit door", self.level);
        }
    }

    /// The door the player is standing in front of, if any
    pub fn door_at_player(&self) -> Option<ObjectHandle> {
        match self.objects.query_at(&self.player.rect) {
            Some((handle, obj)) if obj.kind == ObjectKind::Door => Some(handle),
            _ => None,
        }
    }

    /// Advance one frame
    pub fn update(&mut self, input: FrameInput, dt: f32) {
        if input.interact_pressed {
            if let Some(door) = self.door_at_player() {
                log::debug!("Entered door in slot {}", door.index());
                self.new_level();
            }
        }

        let events = self.player.update(input.player, dt, &mut self.tilemap);
        if events.jumped {
            log::trace!("Jump from ({:.1}, {:.1})", self.player.rect.x, self.player.rect.y);
        }
        if events.respawned {
            log::debug!("Player fell out of level {}, respawned", self.level);
        }
        if let Some((x, y)) = events.broken_block {
            self.score += 1;
            log::debug!("Block broken at ({}, {}), score {}", x, y, self.score);
        }

        let rect = self.player.rect;
        let follow = Vec2::new(rect.x + rect.w, rect.y);
        self.camera_target = self.camera_target.lerp(follow, self.camera_smoothing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::collision::overlaps_solid;
    use crate::world::{exit_column, TileId, SPAWN_COLUMN, TILE_SIZE};

    const DT: f32 = 1.0 / 60.0;

    fn game(seed: u64) -> Game {
        let mut game = Game::new(&GameConfig::default(), seed, Vec2::new(64.0, 96.0));
        game.new_level();
        game
    }

    #[test]
    fn test_level_seed_is_stable_and_varies() {
        assert_eq!(level_seed(5, 3), level_seed(5, 3));
        assert_ne!(level_seed(5, 0), level_seed(5, 1));
        assert_ne!(level_seed(5, 0), level_seed(6, 0));
    }

    #[test]
    fn test_fps_limit_frame_time() {
        assert!((FpsLimit::Fps60.frame_time().unwrap() - 1.0 / 60.0).abs() < 1e-9);
        assert!(FpsLimit::Unlocked.frame_time().is_none());
    }

    #[test]
    fn test_new_level_places_player_and_door() {
        let game = game(11);
        assert_eq!(game.level, 1);
        assert_eq!(game.objects.len(), 1);
        assert!((game.player.rect.x - SPAWN_COLUMN as f32 * TILE_SIZE).abs() < 0.001);

        let surface = game.tilemap.first_in_column(SPAWN_COLUMN, TileId::Ground).unwrap();
        assert!((game.player.rect.y - (surface - 3) as f32 * TILE_SIZE).abs() < 0.001);

        let (_, door) = game.objects.iter().next().unwrap();
        assert!((door.rect.x - exit_column(80) as f32 * TILE_SIZE).abs() < 0.001);
    }

    #[test]
    fn test_spawn_is_never_inside_a_tile() {
        for seed in 0..500 {
            let game = game(seed);
            assert!(
                !overlaps_solid(&game.player.rect, &game.tilemap),
                "seed {} spawns the player inside a tile at {:?}",
                seed, game.player.rect
            );
        }
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = game(21);
        let b = game(21);
        assert_eq!(a.tilemap, b.tilemap);
        let doors_a: Vec<_> = a.objects.iter().map(|(_, o)| *o).collect();
        let doors_b: Vec<_> = b.objects.iter().map(|(_, o)| *o).collect();
        assert_eq!(doors_a, doors_b);
    }

    #[test]
    fn test_player_lands_after_spawn() {
        let mut game = game(3);
        for _ in 0..120 {
            game.update(FrameInput::default(), DT);
        }
        assert!(game.player.grounded);
        assert!(!overlaps_solid(&game.player.rect, &game.tilemap));
        assert!((game.player.rect.x - SPAWN_COLUMN as f32 * TILE_SIZE).abs() < 0.001);
        // Resting exactly on a tile boundary
        let feet = game.player.rect.y + game.player.rect.h;
        assert!((feet / TILE_SIZE - (feet / TILE_SIZE).round()).abs() < 0.001);
    }

    #[test]
    fn test_door_interaction_starts_next_level() {
        let mut game = game(8);
        let first = game.tilemap.clone();

        // Interact away from the door does nothing
        game.update(FrameInput { interact_pressed: true, ..Default::default() }, DT);
        assert_eq!(game.level, 1);

        let door = *game.objects.iter().next().unwrap().1;
        game.player.rect.x = door.rect.x;
        game.player.rect.y = door.rect.y;
        assert_eq!(game.door_at_player().map(|h| h.index()), Some(0));

        game.update(FrameInput { interact_pressed: true, ..Default::default() }, DT);
        assert_eq!(game.level, 2);
        assert_eq!(game.objects.len(), 1);
        assert_ne!(game.tilemap, first);
        assert!(game.door_at_player().is_none());
    }

    #[test]
    fn test_many_levels_keep_one_door() {
        let mut game = game(1);
        for _ in 0..40 {
            game.new_level();
            assert_eq!(game.objects.len(), 1);
        }
        assert_eq!(game.level, 41);
    }

    #[test]
    fn test_breaking_block_scores() {
        let mut game = game(4);
        // Flatten the map so the test controls the geometry
        game.tilemap = Tilemap::new(80, 40);
        for x in 0..80 {
            game.tilemap.set(x, 30, TileId::Ground);
        }
        game.tilemap.set(SPAWN_COLUMN, 26, TileId::Block);
        game.player.reset(&game.tilemap);

        for _ in 0..60 {
            game.update(FrameInput::default(), DT);
        }
        assert!(game.player.grounded);

        let jump = FrameInput {
            player: PlayerInput { jump_pressed: true, ..Default::default() },
            ..Default::default()
        };
        game.update(jump, DT);
        for _ in 0..60 {
            game.update(FrameInput::default(), DT);
        }
        assert_eq!(game.score, 1);
        assert_eq!(game.tilemap.tile_at(SPAWN_COLUMN, 26), TileId::None);
    }

    #[test]
    fn test_camera_moves_toward_player() {
        let mut game = game(2);
        let before = game.camera_target;
        game.update(FrameInput::default(), DT);
        let rect = game.player.rect;
        let goal = Vec2::new(rect.x + rect.w, rect.y);
        assert!(game.camera_target.distance(goal) < before.distance(goal));
    }
}
