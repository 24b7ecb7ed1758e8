//! Collectible coins

use std::f32::consts::TAU;
use rand::Rng;
use crate::math::Vec3;
use crate::game::transform::Transform;
use super::theme::BlockKind;

/// Spin rate in degrees per second
const SPIN_SPEED: f32 = 180.0;
/// Angular speed of the hover bob
const HOVER_SPEED: f32 = 3.0;

#[derive(Debug, Clone)]
pub struct Coin {
    pub position: Vec3,
    pub kind: BlockKind,
    collected: bool,
    /// Randomised phase so coins don't bob in lockstep
    pub hover_phase: f32,
    pub hover_offset: f32,
    /// Spin angle in degrees
    pub rotation: f32,
}

impl Coin {
    pub fn new(position: Vec3, kind: BlockKind, hover_phase: f32) -> Self {
        let mut coin = Self {
            position,
            kind,
            collected: false,
            hover_phase,
            hover_offset: 0.0,
            rotation: 0.0,
        };
        coin.hover_offset = coin.hover_at(0.0);
        coin
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R, position: Vec3, kind: BlockKind) -> Self {
        Self::new(position, kind, rng.gen_range(0.0..TAU))
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    fn hover_at(&self, sim_time: f32) -> f32 {
        let t = sim_time + self.hover_phase;
        (t * HOVER_SPEED).sin() * 0.2 + (t * HOVER_SPEED * 2.0).sin() * 0.05
    }

    /// Advance spin and hover. Collected coins are frozen.
    pub fn update(&mut self, dt: f32, sim_time: f32) {
        if self.collected {
            return;
        }
        self.rotation = (self.rotation + SPIN_SPEED * dt) % 360.0;
        self.hover_offset = self.hover_at(sim_time);
    }

    /// Position including the hover bob
    pub fn effective_position(&self) -> Vec3 {
        Vec3::new(self.position.x, self.position.y + self.hover_offset, self.position.z)
    }

    /// Collect the coin if `player_pos` is within `reach`.
    /// Returns true only on the frame the coin becomes collected.
    pub fn try_collect(&mut self, player_pos: Vec3, reach: f32) -> bool {
        if self.collected {
            return false;
        }
        if self.effective_position().distance(player_pos) < reach {
            self.collected = true;
            return true;
        }
        false
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.effective_position(), self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_within_reach() {
        let mut coin = Coin::new(Vec3::new(0.0, 2.0, 0.0), BlockKind::Gold, 0.0);
        let pos = coin.effective_position();
        assert!(!coin.try_collect(pos + Vec3::new(2.0, 0.0, 0.0), 0.8));
        assert!(!coin.is_collected());
        assert!(coin.try_collect(pos + Vec3::new(0.5, 0.0, 0.0), 0.8));
        assert!(coin.is_collected());
    }

    #[test]
    fn test_collected_is_monotonic() {
        let mut coin = Coin::new(Vec3::ZERO, BlockKind::Gold, 1.0);
        assert!(coin.try_collect(coin.effective_position(), 0.8));

        // Further checks never report a second collection or reset the flag
        for i in 0..10 {
            coin.update(0.016, i as f32);
            assert!(!coin.try_collect(Vec3::new(100.0, 0.0, 0.0), 0.8));
            assert!(!coin.try_collect(coin.effective_position(), 0.8));
            assert!(coin.is_collected());
        }
    }

    #[test]
    fn test_hover_shifts_collection_point() {
        let mut coin = Coin::new(Vec3::ZERO, BlockKind::Gold, 0.0);
        // sin(0.5 * 3) dominates: hover is close to +0.2
        coin.update(0.0, 0.5);
        assert!(coin.hover_offset > 0.15);
        let shifted = coin.effective_position();
        assert!((shifted.y - coin.hover_offset).abs() < 0.0001);
    }

    #[test]
    fn test_spin_wraps() {
        let mut coin = Coin::new(Vec3::ZERO, BlockKind::Gold, 0.0);
        coin.update(2.5, 0.0);
        assert!((coin.rotation - 90.0).abs() < 0.001);
    }
}
