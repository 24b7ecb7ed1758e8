//! Level exit portal

use crate::math::Vec3;
use crate::game::transform::Transform;

/// Spin rate of the portal rings in degrees per second
const SPIN_SPEED: f32 = 180.0;

#[derive(Debug, Clone)]
pub struct Portal {
    pub position: Vec3,
    /// 1-based index of the level this portal leads to, or `GAME_COMPLETE`
    pub target_level: u32,
    /// Where the player appears in the target level
    pub target_spawn: Vec3,
    /// Coins required before the portal opens
    pub required_coins: u32,
    /// Facing around the Y axis, in degrees
    pub orientation: f32,
    pub radius: f32,
    /// Cosmetic ring spin, in degrees
    pub rotation: f32,
}

impl Portal {
    pub fn new(position: Vec3, target_level: u32, target_spawn: Vec3, orientation: f32) -> Self {
        Self {
            position,
            target_level,
            target_spawn,
            required_coins: 5,
            orientation,
            radius: 2.0,
            rotation: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.rotation = (self.rotation + SPIN_SPEED * dt) % 360.0;
    }

    pub fn is_open(&self, coins_collected: u32) -> bool {
        coins_collected >= self.required_coins
    }

    /// Is a sphere of `radius` at `pos` inside the trigger volume?
    pub fn in_reach(&self, pos: Vec3, radius: f32) -> bool {
        self.position.distance(pos) < self.radius + radius
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reach_uses_both_radii() {
        let portal = Portal::new(Vec3::ZERO, 2, Vec3::ZERO, 90.0);
        assert!(portal.in_reach(Vec3::new(2.4, 0.0, 0.0), 0.5));
        assert!(!portal.in_reach(Vec3::new(2.6, 0.0, 0.0), 0.5));
    }

    #[test]
    fn test_opens_at_threshold() {
        let portal = Portal::new(Vec3::ZERO, 2, Vec3::ZERO, 90.0);
        assert!(!portal.is_open(4));
        assert!(portal.is_open(5));
        assert!(portal.is_open(9));
    }

    #[test]
    fn test_rotation_stays_in_range() {
        let mut portal = Portal::new(Vec3::ZERO, 2, Vec3::ZERO, 0.0);
        for _ in 0..1000 {
            portal.update(0.016);
            assert!((0.0..360.0).contains(&portal.rotation));
        }
    }
}
