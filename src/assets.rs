//! Texture loading
//!
//! All sprite sheets are loaded once at startup and released when `Assets`
//! is dropped at shutdown.

use macroquad::prelude::*;
use thiserror::Error;

pub const TILES_PATH: &str = "assets/tiles.png";
pub const PLAYER_PATH: &str = "assets/nuget.png";
pub const OBJECTS_PATH: &str = "assets/objects.png";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to load texture {path}: {reason}")]
    Load { path: &'static str, reason: String },
}

/// The sprite sheets the game draws from
pub struct Assets {
    /// Tile variants, three columns per tile kind
    pub tiles: Texture2D,
    /// Player frames, one row per animation
    pub player: Texture2D,
    /// One column per object kind
    pub objects: Texture2D,
}

impl Assets {
    /// Load every sheet. Fails on the first missing or undecodable file.
    pub async fn load() -> Result<Self, AssetError> {
        Ok(Self {
            tiles: load_sheet(TILES_PATH).await?,
            player: load_sheet(PLAYER_PATH).await?,
            objects: load_sheet(OBJECTS_PATH).await?,
        })
    }

    /// Pixel size of the player sheet
    pub fn player_sheet_size(&self) -> Vec2 {
        vec2(self.player.width(), self.player.height())
    }
}

impl Drop for Assets {
    fn drop(&mut self) {
        log::info!("Releasing textures");
    }
}

async fn load_sheet(path: &'static str) -> Result<Texture2D, AssetError> {
    let texture = load_texture(path).await.map_err(|e| AssetError::Load {
        path,
        reason: e.to_string(),
    })?;
    // Pixel art: no smoothing between texels
    texture.set_filter(FilterMode::Nearest);
    log::info!("Loaded {} ({}x{})", path, texture.width(), texture.height());
    Ok(texture)
}
