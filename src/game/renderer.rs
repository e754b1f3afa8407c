//! Game Renderer
//!
//! Draws one frame of the game with macroquad: sky, tiles, objects and the
//! player through a camera following the player, then the HUD in screen
//! space. Nothing here mutates game state.

use macroquad::prelude::*;

use super::runtime::{Game, Theme};
use super::player::Player;
use crate::assets::Assets;
use crate::world::{AutotileDir, ObjectRegistry, TileId, TileSpan, Tilemap, TILE_SIZE};

const HUD_FONT_SIZE: f32 = 20.0;

/// Sky color behind the level
pub fn background_color(theme: Theme) -> Color {
    match theme {
        Theme::Grass => SKYBLUE,
        Theme::Snow => Color::from_rgba(200, 220, 235, 255),
    }
}

/// Camera centered on `target` at 1:1 pixel scale, y pointing down
pub fn world_camera(target: Vec2, screen: Vec2) -> Camera2D {
    Camera2D {
        target,
        zoom: vec2(2.0 / screen.x, -2.0 / screen.y),
        ..Default::default()
    }
}

/// Tiles visible through a camera centered on `target`, padded by one tile on
/// every side and clamped to the map. `None` when the view misses the map.
pub fn visible_tiles(target: Vec2, screen: Vec2, map: &Tilemap) -> Option<TileSpan> {
    let top_left = target - screen / 2.0;
    let bottom_right = target + screen / 2.0;

    let start_x = (top_left.x / TILE_SIZE).floor() as i32 - 1;
    let start_y = (top_left.y / TILE_SIZE).floor() as i32 - 1;
    let end_x = (bottom_right.x / TILE_SIZE).floor() as i32 + 1;
    let end_y = (bottom_right.y / TILE_SIZE).floor() as i32 + 1;

    let span = TileSpan {
        left: start_x.max(0),
        top: start_y.max(0),
        right: end_x.min(map.width() as i32) - 1,
        bottom: end_y.min(map.height() as i32) - 1,
    };
    (span.left <= span.right && span.top <= span.bottom).then_some(span)
}

/// Region of the tile sheet for a tile drawn with the given variant
pub fn tile_source_rect(tile: TileId, dir: AutotileDir) -> Rect {
    Rect::new(
        (tile.sheet_column() + dir.column()) as f32 * TILE_SIZE,
        dir.row() as f32 * TILE_SIZE,
        TILE_SIZE,
        TILE_SIZE,
    )
}

fn draw_region(texture: &Texture2D, x: f32, y: f32, source: Rect, flip_x: bool) {
    draw_texture_ex(
        texture,
        x,
        y,
        WHITE,
        DrawTextureParams {
            source: Some(source),
            flip_x,
            ..Default::default()
        },
    );
}

pub fn draw_tilemap(map: &Tilemap, texture: &Texture2D, view: TileSpan) {
    for (x, y) in view.cells() {
        let tile = map.tile_at(x, y);
        if tile == TileId::None {
            continue;
        }

        let source = tile_source_rect(tile, map.autotile_direction(x, y));
        draw_region(texture, x as f32 * TILE_SIZE, y as f32 * TILE_SIZE, source, false);
    }
}

pub fn draw_objects(objects: &ObjectRegistry, texture: &Texture2D) {
    for (_, obj) in objects.iter() {
        let source = Rect::new(obj.kind.sheet_x(), 0.0, obj.rect.w, obj.rect.h);
        draw_region(texture, obj.rect.x, obj.rect.y, source, false);
    }
}

pub fn draw_player(player: &Player, texture: &Texture2D) {
    draw_region(
        texture,
        player.rect.x,
        player.rect.y,
        player.anim.source_rect(),
        player.anim.flip_x(),
    );
}

/// Score, level and FPS in screen space
pub fn draw_hud(score: u32, level: u32) {
    draw_text(&format!("Score: {}", score), 10.0, 10.0 + HUD_FONT_SIZE, HUD_FONT_SIZE, WHITE);
    draw_text(&format!("Level: {}", level), 10.0, 10.0 + HUD_FONT_SIZE * 2.0, HUD_FONT_SIZE, WHITE);
    draw_text(&format!("FPS: {}", get_fps()), screen_width() - 96.0, 16.0 + HUD_FONT_SIZE, HUD_FONT_SIZE, LIME);
}

/// Draw a complete frame
pub fn draw_game(game: &Game, assets: &Assets) {
    clear_background(background_color(game.theme));

    let screen = vec2(screen_width(), screen_height());
    set_camera(&world_camera(game.camera_target, screen));

    if let Some(view) = visible_tiles(game.camera_target, screen, &game.tilemap) {
        draw_tilemap(&game.tilemap, &assets.tiles, view);
    }
    draw_objects(&game.objects, &assets.objects);
    draw_player(&game.player, &assets.player);

    set_default_camera();
    draw_hud(game.score, game.level);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_tiles_pads_and_clamps() {
        let map = Tilemap::new(80, 40);
        let screen = vec2(640.0, 360.0);

        // View centered on (320, 180) covers pixels 0..640 x 0..360
        let span = visible_tiles(vec2(320.0, 180.0), screen, &map).unwrap();
        assert_eq!(span, TileSpan { left: 0, top: 0, right: 40, bottom: 22 });

        // Far right edge clamps to the last column
        let span = visible_tiles(vec2(80.0 * 16.0, 300.0), screen, &map).unwrap();
        assert_eq!(span.right, 79);
        assert_eq!(span.left, 59);
    }

    #[test]
    fn test_visible_tiles_off_map() {
        let map = Tilemap::new(10, 10);
        assert!(visible_tiles(vec2(-2000.0, 0.0), vec2(640.0, 360.0), &map).is_none());
    }

    #[test]
    fn test_tile_source_rect() {
        let rect = tile_source_rect(TileId::Ground, AutotileDir::Center);
        assert!((rect.x - 16.0).abs() < 0.001);
        assert!((rect.y - 16.0).abs() < 0.001);

        let rect = tile_source_rect(TileId::Block, AutotileDir::BottomRight);
        assert!((rect.x - 80.0).abs() < 0.001);
        assert!((rect.y - 32.0).abs() < 0.001);
    }

    #[test]
    fn test_themes_have_distinct_sky() {
        assert_ne!(background_color(Theme::Grass), background_color(Theme::Snow));
    }
}
