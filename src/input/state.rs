//! Input state polling
//!
//! Reads macroquad's keyboard state and folds it into the per-frame snapshot
//! the game consumes.

use macroquad::prelude::*;
use super::Action;
use crate::game::{FrameInput, PlayerInput};

/// Check if any key bound to the action is held
pub fn action_down(action: Action) -> bool {
    action.keys().iter().any(|key| is_key_down(*key))
}

/// Check if any key bound to the action went down this frame
pub fn action_pressed(action: Action) -> bool {
    action.keys().iter().any(|key| is_key_pressed(*key))
}

/// Sample this frame's input. Call once per frame before updating the game.
pub fn sample_frame_input() -> FrameInput {
    FrameInput {
        player: PlayerInput {
            left: action_down(Action::MoveLeft),
            right: action_down(Action::MoveRight),
            jump_pressed: action_pressed(Action::Jump),
        },
        interact_pressed: action_pressed(Action::Interact),
    }
}
