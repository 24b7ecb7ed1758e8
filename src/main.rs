//! Sky Hopper: a floating-island platformer
//!
//! Hop across four procedurally generated worlds of floating islands,
//! collect coins to open each level's portal, and chase your best times.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod math;
mod settings;
mod world;
mod game;
mod input;
mod asset;

use macroquad::prelude::*;
use ::rand::rngs::StdRng;
use ::rand::SeedableRng;
use asset::AssetRegistry;
use game::{draw_frame, Events, FrameClock, GameState, LevelMeshes, OrbitCamera};
use input::InputState;
use settings::{load_settings_or_default, SETTINGS_PATH};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Sky Hopper v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Print what happened during the last frame's ticks
fn log_events(events: &mut Events) {
    for e in events.coin_collected.drain() {
        println!("Coin: collected #{} on {} ({} total)", e.coin, e.level.name(), e.collected);
    }
    for e in events.portal_locked.drain() {
        println!("Portal: locked on {}, {}/{} coins", e.level.name(), e.collected, e.required);
    }
    for e in events.level_changed.drain() {
        let best = if e.new_best { " (new best)" } else { "" };
        println!(
            "Portal: {} -> {} in {}{}",
            e.from.name(), e.to.name(), game::runtime::format_time(e.time), best
        );
    }
    for e in events.respawn.drain() {
        println!(
            "Player: fell on {} at ({:.1}, {:.1}, {:.1}), respawned",
            e.level.name(), e.fell_from.x, e.fell_from.y, e.fell_from.z
        );
    }
    for e in events.game_completed.drain() {
        println!(
            "Game complete! Score {} | total best time {}",
            e.total_score, game::runtime::format_time(e.total_time)
        );
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let settings = load_settings_or_default(SETTINGS_PATH);

    let seed = settings
        .seed
        .unwrap_or_else(|| (macroquad::miniquad::date::now() * 1000.0) as u64);
    println!("World: seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let levels = world::generate_all(&mut rng, &settings);
    for level in &levels {
        println!(
            "World: {} - {} islands, {} coins",
            level.id.name(), level.islands.len(), level.coins.len()
        );
    }

    let mut assets = AssetRegistry::new();
    assets.load_all().await;

    let mut game = match GameState::new(levels, settings.clone()) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Game: cannot start: {}", e);
            return;
        }
    };
    let mut meshes = LevelMeshes::build(game.level());
    let mut camera = OrbitCamera::new();
    let mut input = InputState::new(settings.mouse_sensitivity);
    if input.has_gamepad() {
        println!("Input: gamepad connected");
    }
    let mut clock = FrameClock::from_settings(&settings.rules);
    let mut show_debug = settings.debug_collision;

    set_cursor_grab(true);
    show_mouse(false);

    println!("=== SKY HOPPER ===");

    loop {
        let frame_time = get_frame_time();
        let frame = input.poll(frame_time);
        if frame.quit {
            break;
        }
        if frame.toggle_debug {
            show_debug = !show_debug;
        }

        camera.rotate(frame.look.0, frame.look.1);
        let (forward, right) = camera.movement_basis();
        let intent = frame.move_intent(forward, right);

        for _ in 0..clock.advance(frame_time) {
            if let Err(e) = game.tick(&intent, clock.step()) {
                eprintln!("Game: fatal level error: {}", e);
                return;
            }
        }
        log_events(&mut game.events);

        if meshes.level != game.current_level() {
            meshes = LevelMeshes::build(game.level());
        }

        draw_frame(&game, &meshes, &camera, &assets, show_debug);

        next_frame().await;
    }

    set_cursor_grab(false);
    show_mouse(true);
}
