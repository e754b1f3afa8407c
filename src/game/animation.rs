//! Sprite sheet animation
//!
//! A sheet holds one animation per row and one frame per column; every row
//! has the same number of frames:
//! ```text
//! row 0: | idle 0 | idle 1 | idle 2 | idle 3 |
//! row 1: | walk 0 | walk 1 | walk 2 | walk 3 |
//! row 2: | jump 0 | jump 1 | jump 2 | jump 3 |
//! ```

use macroquad::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Which way a sprite is looking. Sheets are drawn facing right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Rows of the player sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAnim {
    Idle = 0,
    Walk = 1,
    Jump = 2,
}

/// Sheet layout and timing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Seconds each frame stays on screen
    pub frame_delay: f32,
    /// Rows in the sheet
    pub animations: u32,
    /// Columns in the sheet
    pub frames: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_delay: 0.1,
            animations: 3,
            frames: 4,
        }
    }
}

/// Timer-driven frame cycling over a sprite sheet
#[derive(Debug, Clone)]
pub struct Animation {
    frame_size: Vec2,
    animation_count: u32,
    frame_count: u32,
    current_animation: u32,
    current_frame: u32,
    time_delay: f32,
    timer: f32,
    pub facing: Facing,
}

impl Animation {
    /// Split a sheet of `sheet_size` pixels into `animation_count` rows of
    /// `frame_count` frames each.
    pub fn from_sheet(sheet_size: Vec2, animation_count: u32, frame_count: u32, time_delay: f32) -> Self {
        let animation_count = animation_count.max(1);
        let frame_count = frame_count.max(1);
        Self {
            frame_size: Vec2::new(
                (sheet_size.x / frame_count as f32).floor(),
                (sheet_size.y / animation_count as f32).floor(),
            ),
            animation_count,
            frame_count,
            current_animation: 0,
            current_frame: 0,
            time_delay,
            timer: 0.0,
            facing: Facing::Right,
        }
    }

    #[cfg(test)]
    pub fn frame_size(&self) -> Vec2 {
        self.frame_size
    }

    #[cfg(test)]
    pub fn current_animation(&self) -> u32 {
        self.current_animation
    }

    #[cfg(test)]
    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    /// Switch rows. The frame column and the timer carry over.
    pub fn set_animation(&mut self, animation: u32) {
        self.current_animation = animation.min(self.animation_count - 1);
    }

    /// Accumulate `frame_delta * speed` and step one frame once the delay is
    /// reached. The timer restarts from zero, dropping any remainder.
    pub fn update(&mut self, frame_delta: f32, speed: f32) {
        self.timer += frame_delta * speed;

        if self.timer >= self.time_delay {
            self.timer = 0.0;
            self.current_frame = (self.current_frame + 1) % self.frame_count;
        }
    }

    /// Region of the sheet for the current frame (always positive width)
    pub fn source_rect(&self) -> Rect {
        Rect::new(
            self.current_frame as f32 * self.frame_size.x,
            self.current_animation as f32 * self.frame_size.y,
            self.frame_size.x,
            self.frame_size.y,
        )
    }

    /// Whether the frame must be mirrored horizontally when drawn
    pub fn flip_x(&self) -> bool {
        self.facing == Facing::Left
    }
}
