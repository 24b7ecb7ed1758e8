//! Procedural level generation
//!
//! Each level has its own layout rule:
//! - Earth: a linear chain drifting in Z, climbing towards the end
//! - Nether: a sparse 5x5 grid around spawn plus scattered high islands
//! - End: an expanding spiral plus scattered high islands
//! - Diamond: a full 10x10 grid over sin/cos terrain with authored coins
//!
//! All randomness comes from the caller's RNG, so a seeded RNG reproduces the
//! same levels exactly.

use std::f32::consts::TAU;
use rand::Rng;
use crate::math::Vec3;
use crate::settings::GameSettings;
use super::coin::Coin;
use super::island::{FloatingIsland, MotionPattern};
use super::level::Level;
use super::portal::Portal;
use super::theme::{BlockKind, LevelId, GAME_COMPLETE};

/// Height of a coin above its island's centre
const COIN_HEIGHT: f32 = 2.0;
/// Probability that an eligible island carries a coin
const COIN_CHANCE: f64 = 0.7;

/// Diamond level grid
const DIAMOND_GRID: usize = 10;
const DIAMOND_SPACING: f32 = 3.0;

/// Hand-placed coin cells (x, z) on the diamond grid
const DIAMOND_COIN_CELLS: [(usize, usize); 16] = [
    (3, 3), (3, 4), (3, 5), (3, 6),
    (5, 3), (5, 4), (5, 5), (5, 6),
    (7, 3), (7, 4), (7, 5), (7, 6),
    (8, 4), (8, 5),
    (9, 3), (9, 6),
];

/// Generate every level in play order
pub fn generate_all<R: Rng + ?Sized>(rng: &mut R, settings: &GameSettings) -> Vec<Level> {
    let mut levels = Vec::with_capacity(LevelId::ALL.len());
    for id in LevelId::ALL {
        levels.push(generate_level(id, &mut *rng, settings));
    }
    levels
}

/// Generate one level
pub fn generate_level<R: Rng + ?Sized>(id: LevelId, rng: &mut R, settings: &GameSettings) -> Level {
    let mut level = match id {
        LevelId::Earth => generate_earth_level(rng, settings),
        LevelId::Nether => generate_nether_level(rng, settings),
        LevelId::End => generate_end_level(rng, settings),
        LevelId::Diamond => generate_diamond_level(rng, settings),
    };
    level.portal.required_coins = settings.rules.portal_coin_threshold;
    level.portal.radius = settings.rules.portal_radius;
    level
}

/// Portal leading from `id` to the next level (or ending the game)
fn exit_portal(id: LevelId, position: Vec3, orientation: f32) -> Portal {
    let target = id.next_index();
    let target_spawn = LevelId::from_index(target)
        .map(|next| next.theme().spawn)
        .unwrap_or(Vec3::ZERO);
    Portal::new(position, target, target_spawn, orientation)
}

fn island<R: Rng + ?Sized>(
    rng: &mut R,
    settings: &GameSettings,
    origin: Vec3,
    size: f32,
    motion: MotionPattern,
    kind: BlockKind,
) -> FloatingIsland {
    FloatingIsland::generate(rng, origin, size, motion, kind, &settings.platforms)
}

fn coin_above<R: Rng + ?Sized>(rng: &mut R, island: &FloatingIsland, kind: BlockKind) -> Coin {
    Coin::random(rng, island.origin + Vec3::new(0.0, COIN_HEIGHT, 0.0), kind)
}

/// Scatter coins over the islands between the first and the last.
///
/// Each eligible island gets a coin with 70% probability. `extra` coins count
/// towards the portal threshold. With `top_up`, a short roll is made good by
/// filling the remaining eligible islands in order.
fn place_coins<R: Rng + ?Sized>(
    rng: &mut R,
    islands: &[FloatingIsland],
    kind: BlockKind,
    extra: usize,
    threshold: usize,
    top_up: bool,
) -> Vec<Coin> {
    let eligible = if islands.len() > 2 { &islands[1..islands.len() - 1] } else { islands };

    let mut has_coin = vec![false; eligible.len()];
    let mut coins = Vec::new();
    for (i, isl) in eligible.iter().enumerate() {
        if rng.gen_bool(COIN_CHANCE) {
            coins.push(coin_above(rng, isl, kind));
            has_coin[i] = true;
        }
    }

    if !top_up {
        return coins;
    }
    for (i, isl) in eligible.iter().enumerate() {
        if coins.len() + extra >= threshold {
            break;
        }
        if !has_coin[i] {
            coins.push(coin_above(rng, isl, kind));
            has_coin[i] = true;
        }
    }
    coins
}

/// Linear chain with increasing X. The middle segment drifts horizontally,
/// the final segment climbs with one vertical mover.
pub fn generate_earth_level<R: Rng + ?Sized>(rng: &mut R, settings: &GameSettings) -> Level {
    let id = LevelId::Earth;
    let theme = id.theme();
    let threshold = settings.rules.portal_coin_threshold as usize;

    let mut islands = vec![island(rng, settings, Vec3::ZERO, 1.5, MotionPattern::None, theme.block)];

    let mut x = 0.0f32;
    let mut z = 0.0f32;
    for i in 0..4 {
        x += 4.0;
        z += rng.gen_range(0.5..1.5);
        let motion = if i == 2 { MotionPattern::Horizontal } else { MotionPattern::None };
        islands.push(island(rng, settings, Vec3::new(x, 0.0, z), 1.0, motion, theme.block));
    }
    for i in 0..3 {
        x += 4.0;
        z += rng.gen_range(-1.0..1.0);
        let height = i as f32 * 2.0;
        let motion = if i == 1 { MotionPattern::Vertical } else { MotionPattern::None };
        islands.push(island(rng, settings, Vec3::new(x, height, z), 1.0, motion, theme.block));
    }

    let portal = exit_portal(id, Vec3::new(x + 4.0, 6.0, z), 90.0);

    let mut coins = place_coins(rng, &islands, theme.coin, 2, threshold, settings.rules.guarantee_portal_coins);
    coins.push(Coin::random(rng, Vec3::new(0.0, 4.0, 0.0), theme.coin));
    coins.push(Coin::random(rng, Vec3::new(x / 2.0, 3.0, z / 2.0), theme.coin));

    Level { id, islands, coins, portal }
}

/// Sparse grid around the spawn platform plus five scattered movers
pub fn generate_nether_level<R: Rng + ?Sized>(rng: &mut R, settings: &GameSettings) -> Level {
    let id = LevelId::Nether;
    let theme = id.theme();
    let threshold = settings.rules.portal_coin_threshold as usize;

    let mut islands = vec![island(rng, settings, Vec3::ZERO, 2.0, MotionPattern::None, theme.block)];

    for gx in -2i32..=2 {
        for gz in -2i32..=2 {
            // Origin slot is the spawn platform
            if gx == 0 && gz == 0 {
                continue;
            }
            if !rng.gen_bool(0.7) {
                continue;
            }
            let motion = if rng.gen_bool(0.3) { MotionPattern::Circular } else { MotionPattern::None };
            let y = rng.gen_range(-1.0..1.0);
            let origin = Vec3::new(gx as f32 * 4.0, y, gz as f32 * 4.0);
            islands.push(island(rng, settings, origin, 1.0, motion, theme.block));
        }
    }

    for _ in 0..5 {
        let (x, z) = loop {
            let x: f32 = rng.gen_range(-10.0..10.0);
            let z: f32 = rng.gen_range(-10.0..10.0);
            if !(x.abs() < 3.0 && z.abs() < 3.0) {
                break (x, z);
            }
        };
        let y = rng.gen_range(2.0..4.0);
        let motion = if rng.gen_bool(0.5) { MotionPattern::Horizontal } else { MotionPattern::Vertical };
        islands.push(island(rng, settings, Vec3::new(x, y, z), 1.0, motion, theme.block));
    }

    let portal = exit_portal(id, Vec3::new(8.0, 3.0, 8.0), 90.0);
    let coins = place_coins(rng, &islands, theme.coin, 0, threshold, settings.rules.guarantee_portal_coins);

    Level { id, islands, coins, portal }
}

/// Expanding spiral climbing away from spawn, plus five high islands
pub fn generate_end_level<R: Rng + ?Sized>(rng: &mut R, settings: &GameSettings) -> Level {
    let id = LevelId::End;
    let theme = id.theme();
    let threshold = settings.rules.portal_coin_threshold as usize;
    let radius = 3.0;

    let mut islands = Vec::with_capacity(25);
    let mut last_spiral = Vec3::ZERO;
    for i in 0..20 {
        let angle = i as f32 * 0.5;
        let r = radius * i as f32 * 0.3;
        let origin = Vec3::new(angle.cos() * r, i as f32 * 0.5, angle.sin() * r);
        let motion = if i % 5 == 0 { MotionPattern::Figure8 } else { MotionPattern::None };
        islands.push(island(rng, settings, origin, 1.0, motion, theme.block));
        last_spiral = origin;
    }

    for _ in 0..5 {
        let x = rng.gen_range(-15.0..15.0);
        let z = rng.gen_range(-15.0..15.0);
        let y = rng.gen_range(5.0..10.0);
        islands.push(island(rng, settings, Vec3::new(x, y, z), 1.0, MotionPattern::None, theme.block));
    }

    let portal = exit_portal(id, last_spiral + Vec3::new(0.0, 2.0, 0.0), 270.0);
    let coins = place_coins(rng, &islands, theme.coin, 0, threshold, settings.rules.guarantee_portal_coins);

    Level { id, islands, coins, portal }
}

/// Terrain height of a diamond grid cell
fn diamond_height(x: usize, z: usize) -> f32 {
    (x as f32 * 0.5).sin() * (z as f32 * 0.5).cos() * 2.0
}

/// World position of a diamond grid cell at terrain height
fn diamond_cell(x: usize, z: usize) -> Vec3 {
    let start = -(DIAMOND_GRID as f32 * DIAMOND_SPACING) / 2.0;
    Vec3::new(
        start + x as f32 * DIAMOND_SPACING,
        diamond_height(x, z),
        start + z as f32 * DIAMOND_SPACING,
    )
}

/// Full grid over rolling terrain; every fourth diagonal moves
pub fn generate_diamond_level<R: Rng + ?Sized>(rng: &mut R, settings: &GameSettings) -> Level {
    let id = LevelId::Diamond;
    let theme = id.theme();
    const PATTERNS: [MotionPattern; 3] = [MotionPattern::Circular, MotionPattern::Figure8, MotionPattern::Vertical];

    let mut islands = Vec::with_capacity(DIAMOND_GRID * DIAMOND_GRID);
    for x in 0..DIAMOND_GRID {
        for z in 0..DIAMOND_GRID {
            let motion = if (x + z) % 4 == 0 {
                PATTERNS[rng.gen_range(0..PATTERNS.len())]
            } else {
                MotionPattern::None
            };
            islands.push(island(rng, settings, diamond_cell(x, z), 1.0, motion, theme.block));
        }
    }

    let portal = exit_portal(id, Vec3::new(5.0, 5.0, 5.0), 270.0);

    let coins = DIAMOND_COIN_CELLS
        .iter()
        .map(|&(x, z)| {
            let pos = diamond_cell(x, z) + Vec3::new(0.0, 3.0, 0.0);
            Coin::new(pos, theme.coin, rng.gen_range(0.0..TAU))
        })
        .collect();

    Level { id, islands, coins, portal }
}
