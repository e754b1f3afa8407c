//! Game action definitions

use macroquad::prelude::KeyCode;

/// Everything the player can ask the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    /// Enter a door
    Interact,
}

impl Action {
    #[cfg(test)]
    pub const ALL: [Action; 4] = [Action::MoveLeft, Action::MoveRight, Action::Jump, Action::Interact];

    /// Keys bound to this action
    pub fn keys(self) -> &'static [KeyCode] {
        match self {
            Action::MoveLeft => &[KeyCode::A],
            Action::MoveRight => &[KeyCode::D],
            Action::Jump => &[KeyCode::Space],
            Action::Interact => &[KeyCode::W],
        }
    }
}
