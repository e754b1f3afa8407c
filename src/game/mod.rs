//! Game Module
//!
//! The platformer itself: the player body and its movement, tile collision,
//! sprite animation, the per-frame runtime and the renderer.
//!
//! Everything except `renderer` is pure simulation and runs without a window.

pub mod animation;
pub mod collision;
pub mod player;
pub mod runtime;
pub mod renderer;

// Re-export main types
pub use animation::AnimationConfig;
pub use player::{MovementInfo, PhysicsConfig, PlayerInput};
pub use runtime::{FpsLimit, FrameInput, Game, Theme};
pub use renderer::draw_game;
