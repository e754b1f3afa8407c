//! Input handling
//!
//! Action-based keyboard input. Game code asks about actions, never keys,
//! and reads one `FrameInput` snapshot per frame.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
