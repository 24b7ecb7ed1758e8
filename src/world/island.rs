//! Floating islands
//!
//! An island is a cluster of up to nine blocks on a 3x3 grid around its
//! centre. The cluster is the unit of motion: every block follows the
//! cluster's motion pattern and hover bob, and the physics core sees each
//! block as one [`CollisionBox`].

use std::f32::consts::TAU;
use rand::Rng;
use serde::{Serialize, Deserialize};
use crate::math::Vec3;
use crate::settings::PlatformSettings;
use crate::game::transform::Transform;
use super::theme::BlockKind;

/// Horizontal spacing factor between blocks of a cluster
pub const BLOCK_SPACING: f32 = 0.9;
/// Extra vertical squash applied to block offsets
pub const BLOCK_VERTICAL_SCALE: f32 = 0.8;

/// Periodic displacement applied to a cluster's centre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionPattern {
    #[default]
    None,
    Circular,
    Horizontal,
    Vertical,
    Figure8,
}

impl MotionPattern {
    /// Displacement from the cluster origin at the given phase
    pub fn displacement(self, phase: f32, speed: f32, amplitude: f32) -> Vec3 {
        let angle = phase * speed;
        match self {
            MotionPattern::None => Vec3::ZERO,
            MotionPattern::Horizontal => Vec3::new(amplitude * angle.sin(), 0.0, 0.0),
            MotionPattern::Vertical => Vec3::new(0.0, amplitude * angle.sin(), 0.0),
            MotionPattern::Circular => Vec3::new(amplitude * angle.cos(), 0.0, amplitude * angle.sin()),
            MotionPattern::Figure8 => Vec3::new(amplitude * (2.0 * angle).sin(), 0.0, amplitude * angle.sin()),
        }
    }

    pub fn is_moving(self) -> bool {
        self != MotionPattern::None
    }
}

/// One block of a cluster, in cluster-local grid units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IslandBlock {
    pub offset: Vec3,
    /// Height of the decorative stalactite under the block (render only)
    pub stalactite: Option<f32>,
}

/// Which cluster/block a collision box came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxOwner {
    pub island: usize,
    pub block: usize,
}

/// A block as seen by the collision system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBox {
    /// Bottom-centre anchor in world space
    pub position: Vec3,
    /// Drift of the owning cluster, for moving clusters only
    pub velocity: Option<Vec3>,
    pub owner: BoxOwner,
}

/// A floating island cluster
#[derive(Debug, Clone)]
pub struct FloatingIsland {
    /// Rest position the motion pattern oscillates around
    pub origin: Vec3,
    /// Current centre (origin + motion displacement)
    pub center: Vec3,
    pub size: f32,
    pub block_kind: BlockKind,
    pub blocks: Vec<IslandBlock>,
    pub motion: MotionPattern,
    /// Motion phase accumulator, starts randomised to desynchronise clusters
    pub phase: f32,
    /// Current hover bob added to the centre's Y
    pub hover_offset: f32,
    velocity: Option<Vec3>,
    motion_speed: f32,
    motion_amplitude: f32,
    hover_amplitude: f32,
    hover_speed: f32,
}

impl FloatingIsland {
    /// Create an island from explicit blocks and phase
    pub fn new(
        origin: Vec3,
        size: f32,
        motion: MotionPattern,
        block_kind: BlockKind,
        blocks: Vec<IslandBlock>,
        phase: f32,
        settings: &PlatformSettings,
    ) -> Self {
        let center = origin + motion.displacement(phase, settings.motion_speed, settings.motion_amplitude);
        Self {
            origin,
            center,
            size,
            block_kind,
            blocks,
            motion,
            phase,
            hover_offset: 0.0,
            velocity: motion.is_moving().then_some(Vec3::ZERO),
            motion_speed: settings.motion_speed,
            motion_amplitude: settings.motion_amplitude,
            hover_amplitude: settings.hover_amplitude,
            hover_speed: settings.hover_speed,
        }
    }

    /// Create an island with a random block layout and motion phase.
    ///
    /// The centre block is always present; each of the eight neighbours is
    /// kept with 80% probability and a small random height offset.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        origin: Vec3,
        size: f32,
        motion: MotionPattern,
        block_kind: BlockKind,
        settings: &PlatformSettings,
    ) -> Self {
        let phase = rng.gen_range(0.0..TAU);
        let mut blocks = Vec::with_capacity(9);
        for x in -1i32..=1 {
            for z in -1i32..=1 {
                let y = if x == 0 && z == 0 {
                    0.0
                } else if rng.gen_bool(0.8) {
                    rng.gen_range(-0.2..0.2)
                } else {
                    continue;
                };
                let stalactite = if rng.gen_bool(0.5) {
                    Some(rng.gen_range(0.3..0.8))
                } else {
                    None
                };
                blocks.push(IslandBlock {
                    offset: Vec3::new(x as f32, y, z as f32),
                    stalactite,
                });
            }
        }
        Self::new(origin, size, motion, block_kind, blocks, phase, settings)
    }

    /// Advance motion by `dt` seconds. `sim_time` drives the hover bob.
    pub fn update(&mut self, dt: f32, sim_time: f32) {
        let before = self.anchor();

        self.hover_offset = self.hover_amplitude * (sim_time * self.hover_speed).sin();
        if self.motion.is_moving() {
            self.phase += dt;
            self.center = self.origin
                + self.motion.displacement(self.phase, self.motion_speed, self.motion_amplitude);
        }

        if self.motion.is_moving() {
            self.velocity = if dt > 0.0 {
                Some((self.anchor() - before) * (1.0 / dt))
            } else {
                Some(Vec3::ZERO)
            };
        }
    }

    /// Centre including the hover bob, as rendered
    pub fn anchor(&self) -> Vec3 {
        Vec3::new(self.center.x, self.center.y + self.hover_offset, self.center.z)
    }

    /// Velocity estimate over the last update (None for static clusters)
    pub fn velocity(&self) -> Option<Vec3> {
        self.velocity
    }

    /// (horizontal, vertical) scale from grid units to world units
    pub fn block_scale(&self) -> (f32, f32) {
        let h = self.size * BLOCK_SPACING;
        (h, h * BLOCK_VERTICAL_SCALE)
    }

    /// World-space anchor of one block
    pub fn block_position(&self, block: &IslandBlock) -> Vec3 {
        let (h, v) = self.block_scale();
        self.anchor() + Vec3::new(block.offset.x * h, block.offset.y * v, block.offset.z * h)
    }

    /// Append this island's collision boxes to `out`
    pub fn collision_boxes(&self, island: usize, out: &mut Vec<CollisionBox>) {
        for (i, block) in self.blocks.iter().enumerate() {
            out.push(CollisionBox {
                position: self.block_position(block),
                velocity: self.velocity,
                owner: BoxOwner { island, block: i },
            });
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position(self.anchor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn single_block() -> Vec<IslandBlock> {
        vec![IslandBlock { offset: Vec3::ZERO, stalactite: None }]
    }

    fn island(motion: MotionPattern, phase: f32) -> FloatingIsland {
        FloatingIsland::new(
            Vec3::new(4.0, 1.0, -2.0),
            1.0,
            motion,
            BlockKind::Grass,
            single_block(),
            phase,
            &PlatformSettings::default(),
        )
    }

    #[test]
    fn test_circular_returns_after_full_period() {
        let settings = PlatformSettings::default();
        let mut isl = island(MotionPattern::Circular, 1.3);
        let start = isl.center;

        let period = TAU / settings.motion_speed;
        let steps = 1000;
        for _ in 0..steps {
            isl.update(period / steps as f32, 0.0);
        }

        assert!((isl.center.x - start.x).abs() < 0.01);
        assert!((isl.center.z - start.z).abs() < 0.01);
    }

    #[test]
    fn test_horizontal_only_moves_x() {
        let mut isl = island(MotionPattern::Horizontal, 0.0);
        isl.update(1.0, 0.0);
        assert!((isl.center.x - (4.0 + 2.0 * 0.5f32.sin())).abs() < 0.0001);
        assert_eq!(isl.center.y, 1.0);
        assert_eq!(isl.center.z, -2.0);
    }

    #[test]
    fn test_vertical_only_moves_y() {
        let mut isl = island(MotionPattern::Vertical, 0.0);
        isl.update(1.0, 0.0);
        assert!((isl.center.y - (1.0 + 2.0 * 0.5f32.sin())).abs() < 0.0001);
        assert_eq!(isl.center.x, 4.0);
    }

    #[test]
    fn test_figure8_uses_double_frequency_on_x() {
        let d = MotionPattern::Figure8.displacement(1.0, 0.5, 2.0);
        assert!((d.x - 2.0 * 1.0f32.sin()).abs() < 0.0001);
        assert!((d.z - 2.0 * 0.5f32.sin()).abs() < 0.0001);
    }

    #[test]
    fn test_static_island_has_no_velocity() {
        let mut isl = island(MotionPattern::None, 0.0);
        isl.update(0.016, 1.0);
        assert_eq!(isl.velocity(), None);
        assert_eq!(isl.center, isl.origin);

        let mut boxes = Vec::new();
        isl.collision_boxes(3, &mut boxes);
        assert_eq!(boxes[0].velocity, None);
        assert_eq!(boxes[0].owner, BoxOwner { island: 3, block: 0 });
    }

    #[test]
    fn test_moving_island_reports_velocity() {
        let mut isl = island(MotionPattern::Horizontal, 0.0);
        isl.update(0.016, 0.0);
        let v = isl.velocity().unwrap();
        // d/dt of 2*sin(0.5t) near t=0 is about 1.0
        assert!((v.x - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_collision_boxes_follow_hover() {
        let mut isl = island(MotionPattern::None, 0.0);
        let sim_time = std::f32::consts::PI; // sin(pi * 0.5) = 1
        isl.update(0.016, sim_time);

        let mut boxes = Vec::new();
        isl.collision_boxes(0, &mut boxes);
        assert!((boxes[0].position.y - 1.1).abs() < 0.0001);
    }

    #[test]
    fn test_block_offsets_are_scaled() {
        let blocks = vec![IslandBlock { offset: Vec3::new(1.0, 0.2, -1.0), stalactite: None }];
        let isl = FloatingIsland::new(
            Vec3::ZERO, 2.0, MotionPattern::None, BlockKind::Grass, blocks, 0.0,
            &PlatformSettings::default(),
        );
        let p = isl.block_position(&isl.blocks[0]);
        assert!((p.x - 1.8).abs() < 0.0001);
        assert!((p.y - 0.2 * 1.8 * 0.8).abs() < 0.0001);
        assert!((p.z + 1.8).abs() < 0.0001);
    }

    #[test]
    fn test_generated_layout_always_has_centre_block() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let isl = FloatingIsland::generate(
                &mut rng, Vec3::ZERO, 1.0, MotionPattern::None, BlockKind::Grass,
                &PlatformSettings::default(),
            );
            assert!(isl.blocks.iter().any(|b| b.offset == Vec3::ZERO));
            assert!(isl.blocks.len() <= 9);
            assert!((0.0..TAU).contains(&isl.phase));
            for b in &isl.blocks {
                assert!(b.offset.y.abs() <= 0.2);
            }
        }
    }
}
