//! Render-facing transforms
//!
//! Simulation objects expose where they are and how they are turned; the
//! renderer reads these and never writes back.

use serde::{Serialize, Deserialize};
use crate::math::Vec3;

/// World-space position plus rotation around the Y axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation around Y in degrees
    pub yaw: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        yaw: 0.0,
    };

    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self { position, yaw: 0.0 }
    }

    /// Rotate a local-space offset by this transform's yaw and move it into world space
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        let (s, c) = self.yaw.to_radians().sin_cos();
        let rotated = Vec3::new(local.x * c + local.z * s, local.y, -local.x * s + local.z * c);
        self.position + rotated
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
