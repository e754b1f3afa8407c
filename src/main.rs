//! Jumpy Dumpy: a small side-scrolling platformer
//!
//! Every level is a procedurally generated tile world: Perlin noise terrain
//! with holes, breakable blocks floating above the ground and an exit door at
//! the far end. Run, jump, break blocks for points and take the door to the
//! next level.
//!
//! Controls: A/D to move, Space to jump, W at a door to enter.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod assets;
mod config;
mod game;
mod input;
mod world;

use std::path::Path;

use macroquad::prelude::*;
use assets::Assets;
use config::{GameConfig, CONFIG_FILE};
use game::{FpsLimit, Game};

fn window_conf(config: &GameConfig) -> Conf {
    Conf {
        window_title: format!("{} v{}", config.title, VERSION),
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: false,
        high_dpi: true,
        ..Default::default()
    }
}

fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Panics still show in the browser console on wasm; there is no logger there.

    let config = GameConfig::load_or_default(Path::new(CONFIG_FILE));
    macroquad::Window::from_config(window_conf(&config), run(config));
}

async fn run(config: GameConfig) {
    let assets = match Assets::load().await {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("{}", e);
            #[cfg(not(target_arch = "wasm32"))]
            std::process::exit(1);
            #[cfg(target_arch = "wasm32")]
            panic!("{}", e);
        }
    };

    let base_seed = config.seed.unwrap_or_else(clock_seed);
    log::info!("Base seed {}", base_seed);

    let mut game = Game::new(&config, base_seed, assets.player_sheet_size());
    game.new_level();

    // Handle the close button ourselves so teardown runs in order
    prevent_quit();

    loop {
        let frame_start = get_time();

        if is_quit_requested() {
            break;
        }

        let frame_input = input::sample_frame_input();
        game.update(frame_input, get_frame_time());
        game::draw_game(&game, &assets);

        limit_frame_rate(config.fps_limit, frame_start);
        next_frame().await;
    }

    log::info!("Shutting down at level {} with score {}", game.level, game.score);
    drop(game);
    drop(assets);
}

/// Seed from the wall clock, for runs without a configured seed
fn clock_seed() -> u64 {
    (macroquad::miniquad::date::now() * 1000.0) as u64
}

/// Hold the frame until the target frame time has passed
fn limit_frame_rate(limit: FpsLimit, frame_start: f64) {
    let Some(target_frame_time) = limit.frame_time() else { return };
    if get_time() - frame_start >= target_frame_time {
        return;
    }

    // Native: use sleep for bulk, then spin-wait for precision
    #[cfg(not(target_arch = "wasm32"))]
    {
        let spin_margin = 0.002; // 2ms
        while get_time() - frame_start + spin_margin < target_frame_time {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        while get_time() - frame_start < target_frame_time {
            std::hint::spin_loop();
        }
    }
    // WASM: the browser's animation frame already paces the loop
}
