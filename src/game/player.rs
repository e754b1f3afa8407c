//! Player controller
//!
//! Per-frame update order:
//! 1. Horizontal acceleration / deceleration from input
//! 2. Jump buffering and coyote time
//! 3. Gravity
//! 4. Move + collide on x, then on y
//! 5. Respawn after falling off the bottom of the map
//! 6. Animation selection
//!
//! Velocities are in pixels per frame; the jump timers run on real time.

use macroquad::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::animation::{Animation, Facing, PlayerAnim};
use super::collision::{move_and_collide_x, move_and_collide_y};
use crate::world::{TileId, Tilemap, SPAWN_COLUMN, TILE_SIZE};

/// Horizontal speed below which the player counts as standing still
const MOVING_THRESHOLD: f32 = 0.3;

/// Movement tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementInfo {
    /// Horizontal speed cap (pixels/frame)
    pub max_speed: f32,
    /// Added to horizontal speed each frame a direction is held
    pub acceleration: f32,
    /// Horizontal speed multiplier on frames with no direction held
    pub deceleration: f32,
    /// Upward speed at the start of a jump (pixels/frame)
    pub jump_power: f32,
}

impl Default for MovementInfo {
    fn default() -> Self {
        Self {
            max_speed: 3.0,
            acceleration: 1.0,
            deceleration: 0.85,
            jump_power: 6.0,
        }
    }
}

/// Gravity and jump forgiveness windows
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to vertical speed every frame (pixels/frame²)
    pub gravity: f32,
    /// Vertical speed limit in both directions
    pub max_fall_speed: f32,
    /// Seconds after leaving the ground during which a jump still works
    pub coyote_time: f32,
    /// Seconds a jump press is remembered before landing
    pub jump_buffer_time: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.3,
            max_fall_speed: 10.0,
            coyote_time: 0.12,
            jump_buffer_time: 0.12,
        }
    }
}

/// Input sampled for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    /// Jump key went down this frame
    pub jump_pressed: bool,
}

/// Things that happened during one player update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerUpdate {
    /// Block cleared by hitting it from below
    pub broken_block: Option<(i32, i32)>,
    /// A jump started this frame
    pub jumped: bool,
    /// The player fell off the map and was put back at the spawn point
    pub respawned: bool,
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    /// Body in pixel space
    pub rect: Rect,
    pub velocity: Vec2,
    pub movement: MovementInfo,
    pub physics: PhysicsConfig,
    pub anim: Animation,
    pub grounded: bool,
    pub moving: bool,
    coyote_timer: f32,
    jump_buffer_timer: f32,
}

impl Player {
    pub fn new(position: Vec2, size: Vec2, movement: MovementInfo, physics: PhysicsConfig, anim: Animation) -> Self {
        Self {
            rect: Rect::new(position.x, position.y, size.x, size.y),
            velocity: Vec2::ZERO,
            movement,
            physics,
            anim,
            grounded: false,
            moving: false,
            coyote_timer: 0.0,
            jump_buffer_timer: 0.0,
        }
    }

    #[cfg(test)]
    pub fn coyote_timer(&self) -> f32 {
        self.coyote_timer
    }

    #[cfg(test)]
    pub fn jump_buffer_timer(&self) -> f32 {
        self.jump_buffer_timer
    }

    /// Put the player back above the spawn column's ground.
    /// Position is left alone if the column has no ground at all.
    pub fn reset(&mut self, map: &Tilemap) {
        self.rect.x = SPAWN_COLUMN as f32 * TILE_SIZE;

        if let Some(surface) = map.first_in_column(SPAWN_COLUMN, TileId::Ground) {
            self.rect.y = (surface - 3) as f32 * TILE_SIZE;
            self.velocity = Vec2::ZERO;
            self.grounded = true;
        }
        self.coyote_timer = 0.0;
        self.jump_buffer_timer = 0.0;
    }

    /// Horizontal move and wall resolution
    pub fn move_and_collide_x(&mut self, map: &Tilemap) {
        let result = move_and_collide_x(self.rect, self.velocity, map);
        self.moving = self.velocity.x.abs() > MOVING_THRESHOLD;
        self.rect = result.rect;
        self.velocity = result.velocity;
    }

    /// Vertical move, landing, and ceiling resolution.
    /// Returns the grid cell of a block broken by the player's head.
    pub fn move_and_collide_y(&mut self, map: &mut Tilemap) -> Option<(i32, i32)> {
        let result = move_and_collide_y(self.rect, self.velocity, map);
        self.rect = result.rect;
        self.velocity = result.velocity;
        self.grounded = result.grounded;
        result.broken_block
    }

    fn apply_horizontal_input(&mut self, input: PlayerInput) {
        let m = &self.movement;
        if input.right {
            self.velocity.x += m.acceleration;
        } else if input.left {
            self.velocity.x -= m.acceleration;
        } else {
            self.velocity.x *= m.deceleration;
        }
        self.velocity.x = self.velocity.x.clamp(-m.max_speed, m.max_speed);
    }

    /// Tick both jump timers and start a jump if a buffered press is allowed.
    fn apply_jump(&mut self, input: PlayerInput, dt: f32) -> bool {
        if input.jump_pressed {
            self.jump_buffer_timer = self.physics.jump_buffer_time;
        }

        if self.grounded {
            self.coyote_timer = self.physics.coyote_time;
        } else {
            self.coyote_timer = (self.coyote_timer - dt).max(0.0);
        }

        if self.jump_buffer_timer > 0.0 {
            self.jump_buffer_timer = (self.jump_buffer_timer - dt).max(0.0);
        }

        if self.jump_buffer_timer > 0.0 && (self.grounded || self.coyote_timer > 0.0) {
            self.velocity.y = -self.movement.jump_power;
            // Consume both so one press cannot fire twice
            self.jump_buffer_timer = 0.0;
            self.coyote_timer = 0.0;
            self.grounded = false;
            return true;
        }
        false
    }

    fn select_animation(&mut self, dt: f32) {
        let anim = if !self.grounded {
            PlayerAnim::Jump
        } else if self.moving {
            PlayerAnim::Walk
        } else {
            PlayerAnim::Idle
        };
        self.anim.set_animation(anim as u32);

        if self.velocity.x > 0.0 {
            self.anim.facing = Facing::Right;
        } else if self.velocity.x < 0.0 {
            self.anim.facing = Facing::Left;
        }

        self.anim.update(dt, 1.0);
    }

    /// Run one frame of movement against `map`
    pub fn update(&mut self, input: PlayerInput, dt: f32, map: &mut Tilemap) -> PlayerUpdate {
        let mut events = PlayerUpdate::default();

        self.apply_horizontal_input(input);
        events.jumped = self.apply_jump(input, dt);

        let max_fall = self.physics.max_fall_speed;
        self.velocity.y = (self.velocity.y + self.physics.gravity).clamp(-max_fall, max_fall);

        self.move_and_collide_x(map);
        events.broken_block = self.move_and_collide_y(map);

        if self.rect.y > map.height() as f32 * TILE_SIZE {
            self.reset(map);
            events.respawned = true;
        }

        self.select_animation(dt);
        events
    }
}
