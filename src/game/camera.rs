//! Third-person orbit camera
//!
//! Orbits the player at a fixed distance. Yaw is unbounded, pitch is clamped
//! short of the poles so the look-at basis never degenerates.

use crate::math::Vec3;

pub const DEFAULT_DISTANCE: f32 = 5.0;
pub const DEFAULT_PITCH: f32 = 30.0;
pub const MIN_PITCH: f32 = -89.0;
pub const MAX_PITCH: f32 = 89.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub distance: f32,
    /// Degrees around Y
    pub yaw: f32,
    /// Degrees above the horizon
    pub pitch: f32,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            yaw: 0.0,
            pitch: DEFAULT_PITCH,
        }
    }

    /// Apply a look delta in degrees. Moving the mouse right or down
    /// swings the camera the same way.
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw -= d_yaw;
        self.pitch = (self.pitch - d_pitch).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Unit vector from the target towards the camera
    pub fn offset_dir(&self) -> Vec3 {
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        Vec3::new(cp * sy, sp, cp * cy).normalize()
    }

    /// Camera position when looking at `target`
    pub fn eye(&self, target: Vec3) -> Vec3 {
        target + self.offset_dir() * self.distance
    }

    /// Horizontal (forward, right) directions for movement input.
    /// Forward points away from the camera.
    pub fn movement_basis(&self) -> (Vec3, Vec3) {
        let away = (-self.offset_dir()).horizontal();
        let forward = if away.len() > 0.0 {
            away.normalize()
        } else {
            // Looking straight down: fall back to yaw alone
            let (sy, cy) = self.yaw.to_radians().sin_cos();
            Vec3::new(-sy, 0.0, -cy)
        };
        let right = forward.cross(Vec3::UP).normalize();
        (forward, right)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_eye_behind_and_above() {
        let cam = OrbitCamera::new();
        let eye = cam.eye(Vec3::ZERO);
        assert!((eye.len() - 5.0).abs() < 0.001);
        assert!((eye.y - 5.0 * 0.5).abs() < 0.001);
        assert!(eye.z > 0.0);
        assert!(eye.x.abs() < 0.001);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut cam = OrbitCamera::new();
        cam.rotate(0.0, -1000.0);
        assert_eq!(cam.pitch, MAX_PITCH);
        cam.rotate(0.0, 1000.0);
        assert_eq!(cam.pitch, MIN_PITCH);
    }

    #[test]
    fn test_movement_basis_default() {
        let cam = OrbitCamera::new();
        let (forward, right) = cam.movement_basis();
        assert!((forward.z + 1.0).abs() < 0.001);
        assert!((right.x - 1.0).abs() < 0.001);
        assert_eq!(forward.y, 0.0);
    }

    #[test]
    fn test_movement_basis_follows_yaw() {
        let mut cam = OrbitCamera::new();
        cam.rotate(-90.0, 0.0);
        let (forward, right) = cam.movement_basis();
        // Camera now sits on +X looking towards -X
        assert!((forward.x + 1.0).abs() < 0.001);
        assert!((right.z + 1.0).abs() < 0.001);
    }
}
