//! Game Renderer
//!
//! Draws the current level with macroquad's 3D immediate mode, then the HUD.
//! Island geometry is described once per level (`LevelMeshes`); each frame
//! only reads transforms and visual state from the simulation.

use macroquad::prelude::*;
use crate::asset::AssetRegistry;
use crate::math;
use crate::world::{BlockKind, FloatingIsland, Level, LevelId};
use super::camera::OrbitCamera;
use super::runtime::{format_time, GameState, GameStatus};
use super::transform::Transform;

/// Ground plane height and half-size
const GROUND_Y: f32 = -20.0;
const GROUND_HALF_SIZE: f32 = 50.0;
/// Line segments per portal ring
const RING_SEGMENTS: usize = 32;
const PLAYER_COLOR: Color = Color::new(0.9, 0.25, 0.2, 1.0);
const PORTAL_OPEN: Color = Color::new(0.6, 0.2, 0.9, 1.0);
const PORTAL_LOCKED: Color = Color::new(0.9, 0.15, 0.15, 1.0);

/// One cube of an island, in the island's local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockPart {
    pub center: math::Vec3,
    pub size: math::Vec3,
}

/// Immutable description of one island's geometry
#[derive(Debug, Clone)]
pub struct IslandMesh {
    pub kind: BlockKind,
    pub blocks: Vec<BlockPart>,
    pub stalactites: Vec<BlockPart>,
}

impl IslandMesh {
    pub fn build(island: &FloatingIsland) -> Self {
        let (h, v) = island.block_scale();
        let mut blocks = Vec::with_capacity(island.blocks.len());
        let mut stalactites = Vec::new();

        for block in &island.blocks {
            let center = math::Vec3::new(block.offset.x * h, block.offset.y * v, block.offset.z * h);
            blocks.push(BlockPart { center, size: math::Vec3::new(h, v, h) });

            if let Some(height) = block.stalactite {
                let size = math::Vec3::new(0.3 * h, height * v, 0.3 * h);
                // Hangs from the block's bottom face
                let top = center.y - v * 0.5;
                stalactites.push(BlockPart {
                    center: math::Vec3::new(center.x, top - size.y * 0.5, center.z),
                    size,
                });
            }
        }

        Self { kind: island.block_kind, blocks, stalactites }
    }
}

/// Meshes for every island of one level, index-aligned with `Level::islands`
#[derive(Debug, Clone)]
pub struct LevelMeshes {
    pub level: LevelId,
    pub islands: Vec<IslandMesh>,
}

impl LevelMeshes {
    pub fn build(level: &Level) -> Self {
        Self {
            level: level.id,
            islands: level.islands.iter().map(IslandMesh::build).collect(),
        }
    }
}

/// Points of a vertical ring facing along the transform's yaw.
/// `spin` rotates the starting angle, in degrees.
pub fn ring_points(transform: &Transform, radius: f32, segments: usize, spin: f32) -> Vec<math::Vec3> {
    let segments = segments.max(3);
    let start = spin.to_radians();
    (0..segments)
        .map(|i| {
            let a = start + (i as f32 / segments as f32) * std::f32::consts::TAU;
            transform.transform_point(math::Vec3::new(a.cos() * radius, a.sin() * radius, 0.0))
        })
        .collect()
}

fn color_from(rgba: [f32; 4]) -> Color {
    Color::new(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Draw the 3D scene and the HUD for one frame
pub fn draw_frame(
    game: &GameState,
    meshes: &LevelMeshes,
    camera: &OrbitCamera,
    assets: &AssetRegistry,
    show_debug: bool,
) {
    let level = game.level();
    let theme = level.theme();
    clear_background(color_from(theme.sky_color));

    let target = game.player.position;
    set_camera(&Camera3D {
        position: camera.eye(target).into(),
        target: target.into(),
        up: vec3(0.0, 1.0, 0.0),
        ..Default::default()
    });

    draw_plane(
        vec3(0.0, GROUND_Y, 0.0),
        vec2(GROUND_HALF_SIZE, GROUND_HALF_SIZE),
        None,
        color_from(theme.ground_color),
    );

    for (island, mesh) in level.islands.iter().zip(&meshes.islands) {
        draw_island(island, mesh, assets);
    }

    for coin in level.coins.iter().filter(|c| !c.is_collected()) {
        draw_coin(&coin.transform(), game.settings.rules.coin_radius, assets.texture(coin.kind));
    }

    draw_portal(game);

    draw_sphere(game.player.position.into(), game.player.radius, None, PLAYER_COLOR);

    set_default_camera();
    draw_hud(game, show_debug);
}

fn draw_island(island: &FloatingIsland, mesh: &IslandMesh, assets: &AssetRegistry) {
    let transform = island.transform();
    let texture = assets.texture(mesh.kind);
    for part in mesh.blocks.iter().chain(&mesh.stalactites) {
        draw_cube(transform.transform_point(part.center).into(), part.size.into(), texture, WHITE);
    }
}

/// Coins are thin spinning slabs
fn draw_coin(transform: &Transform, radius: f32, texture: Option<&Texture2D>) {
    let across = transform.transform_point(math::Vec3::new(radius * 2.0, 0.0, 0.0)) - transform.position;
    let depth = transform.transform_point(math::Vec3::new(0.0, 0.0, radius * 0.3)) - transform.position;
    let up = math::Vec3::new(0.0, radius * 2.0, 0.0);
    let corner = transform.position - (across + up + depth) * 0.5;
    draw_affine_parallelepiped(corner.into(), across.into(), up.into(), depth.into(), texture, WHITE);
}

fn draw_portal(game: &GameState) {
    let portal = &game.level().portal;
    let color = if game.portal_open() { PORTAL_OPEN } else { PORTAL_LOCKED };
    let transform = portal.transform();

    for (radius, spin) in [(portal.radius, portal.rotation), (portal.radius * 0.7, -portal.rotation)] {
        let points = ring_points(&transform, radius, RING_SEGMENTS, spin);
        for (i, p) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];
            draw_line_3d((*p).into(), next.into(), color);
        }
        // Spokes make the spin visible
        for p in points.iter().step_by(RING_SEGMENTS / 4) {
            draw_line_3d(transform.position.into(), (*p).into(), color);
        }
    }
}

fn draw_panel(x: f32, y: f32, w: f32, h: f32) {
    draw_rectangle(x, y, w, h, Color::from_rgba(0, 0, 0, 150));
    draw_rectangle_lines(x, y, w, h, 1.0, Color::from_rgba(255, 255, 255, 60));
}

fn draw_hud(game: &GameState, show_debug: bool) {
    let level = game.current_level();
    let threshold = game.settings.rules.portal_coin_threshold;

    // Scoreboard (top right)
    let panel_w = 220.0;
    let panel_x = screen_width() - panel_w - 10.0;
    draw_panel(panel_x, 10.0, panel_w, 110.0);
    let x = panel_x + 10.0;
    draw_text(&format!("Level {} - {}", level.index(), level.name()), x, 34.0, 24.0, WHITE);
    draw_text(&format!("Time: {}", format_time(game.level_time)), x, 58.0, 20.0, WHITE);
    let best = match game.best_times.get(level) {
        Some(t) => format_time(t),
        None => "--:--".to_string(),
    };
    draw_text(&format!("Best: {}", best), x, 80.0, 20.0, LIGHTGRAY);
    let coin_color = if game.portal_open() { GREEN } else { YELLOW };
    draw_text(
        &format!("Coins: {}/{}", game.coins_collected, game.total_coins()),
        x, 104.0, 20.0, coin_color,
    );

    // Total score (top left)
    draw_panel(10.0, 10.0, 180.0, 44.0);
    draw_text(&format!("Score: {}", game.total_score), 20.0, 40.0, 28.0, YELLOW);

    if !game.portal_open() && game.portal_distance() < game.level().portal.radius * 3.0 {
        let hint = format!("Need {} coins for portal!", threshold);
        let dims = measure_text(&hint, None, 24, 1.0);
        draw_text(&hint, (screen_width() - dims.width) / 2.0, screen_height() - 60.0, 24.0, ORANGE);
    }

    if game.status == GameStatus::Completed {
        let title = "All levels complete!";
        let dims = measure_text(title, None, 48, 1.0);
        let cx = (screen_width() - dims.width) / 2.0;
        let cy = screen_height() / 2.0;
        draw_panel(cx - 20.0, cy - 60.0, dims.width + 40.0, 110.0);
        draw_text(title, cx, cy, 48.0, GOLD);
        draw_text(
            &format!("Final score: {}   Total best time: {}", game.total_score, format_time(game.best_times.total())),
            cx, cy + 34.0, 20.0, WHITE,
        );
    }

    if show_debug {
        let p = game.player.position;
        let portal = game.level().portal.position;
        let lines = [
            format!("Portal distance: {:.2}", game.portal_distance()),
            format!("Player: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z),
            format!("Portal: ({:.2}, {:.2}, {:.2})", portal.x, portal.y, portal.z),
            format!("State: {:?}  Speed: {:.1}", game.player.state(), game.player.current_speed),
            format!("FPS: {}", get_fps()),
        ];
        let y0 = 70.0;
        draw_panel(10.0, y0, 300.0, 20.0 * lines.len() as f32 + 10.0);
        for (i, line) in lines.iter().enumerate() {
            draw_text(line, 20.0, y0 + 20.0 + 20.0 * i as f32, 16.0, WHITE);
        }
    }

    let hint = "WASD: Move | Space: Jump | Mouse: Look | F3: Debug | Esc: Quit";
    let dims = measure_text(hint, None, 14, 1.0);
    draw_text(
        hint,
        (screen_width() - dims.width) / 2.0,
        screen_height() - 16.0,
        14.0,
        Color::from_rgba(220, 220, 230, 180),
    );
}
