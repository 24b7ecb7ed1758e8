//! Player state and input response

use crate::math::Vec3;
use crate::settings::PlayerSettings;
use crate::world::BoxOwner;

/// Per-frame movement request, already resolved against the camera.
///
/// `forward_dir` and `right_dir` are horizontal unit vectors: the direction
/// the player travels when holding forward or strafe-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub forward_dir: Vec3,
    pub right_dir: Vec3,
}

impl MoveIntent {
    /// No keys held
    pub fn idle() -> Self {
        Self {
            forward: false,
            back: false,
            left: false,
            right: false,
            jump: false,
            forward_dir: Vec3::new(0.0, 0.0, -1.0),
            right_dir: Vec3::new(1.0, 0.0, 0.0),
        }
    }

    pub fn any_movement(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }

    /// Summed key direction on the XZ plane, not normalized
    pub fn direction(&self) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if self.forward { dir += self.forward_dir; }
        if self.back { dir += -self.forward_dir; }
        if self.right { dir += self.right_dir; }
        if self.left { dir += -self.right_dir; }
        dir.horizontal()
    }
}

impl Default for MoveIntent {
    fn default() -> Self {
        Self::idle()
    }
}

/// Airborne/grounded state of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Airborne,
    Grounded,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Accumulated for one step, cleared after integration
    pub acceleration: Vec3,
    pub radius: f32,
    pub mass: f32,
    pub jump_force: f32,
    /// Ramped horizontal speed, within [0, max_move_speed]
    pub current_speed: f32,
    pub grounded: bool,
    /// Block the player is standing on
    pub support: Option<BoxOwner>,
    /// Velocity of the supporting platform
    pub platform_velocity: Vec3,
    /// Horizontal platform drift folded into `velocity` on the last grounded step
    pub carried_velocity: Vec3,
    pub start_position: Vec3,
}

impl Player {
    pub fn new(start: Vec3, settings: &PlayerSettings) -> Self {
        Self {
            position: start,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            radius: settings.radius,
            mass: settings.mass,
            jump_force: settings.jump_force,
            current_speed: 0.0,
            grounded: false,
            support: None,
            platform_velocity: Vec3::ZERO,
            carried_velocity: Vec3::ZERO,
            start_position: start,
        }
    }

    /// Back to the start position, at rest and airborne
    pub fn reset_position(&mut self) {
        self.position = self.start_position;
        self.velocity = Vec3::ZERO;
        self.acceleration = Vec3::ZERO;
        self.grounded = false;
        self.support = None;
        self.platform_velocity = Vec3::ZERO;
        self.carried_velocity = Vec3::ZERO;
    }

    /// Jump if grounded. Returns whether the jump happened.
    ///
    /// Horizontal velocity, including any platform drift, is kept.
    pub fn jump(&mut self) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity.y = self.jump_force;
        self.grounded = false;
        self.support = None;
        self.platform_velocity = Vec3::ZERO;
        true
    }

    /// Ramp the horizontal speed and set this step's horizontal acceleration
    pub fn apply_input(&mut self, intent: &MoveIntent, settings: &PlayerSettings, dt: f32) {
        if intent.any_movement() {
            self.current_speed = (self.current_speed + settings.acceleration_rate * dt)
                .min(settings.max_move_speed);
        } else {
            self.current_speed = (self.current_speed - settings.deceleration_rate * dt).max(0.0);
        }

        let dir = intent.direction();
        if dir.len() > 0.0 {
            let mut accel = dir.normalize() * self.current_speed;
            if !self.grounded {
                accel = accel * settings.air_control;
            }
            self.acceleration.x = accel.x;
            self.acceleration.z = accel.z;
        } else {
            self.acceleration.x = 0.0;
            self.acceleration.z = 0.0;
        }
    }

    pub fn state(&self) -> MotionState {
        if self.grounded { MotionState::Grounded } else { MotionState::Airborne }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_intent() -> MoveIntent {
        MoveIntent { forward: true, ..MoveIntent::idle() }
    }

    #[test]
    fn test_jump_requires_ground() {
        let settings = PlayerSettings::default();
        let mut player = Player::new(Vec3::new(0.0, 2.0, 0.0), &settings);
        player.velocity.y = -3.0;

        assert!(!player.jump());
        assert_eq!(player.velocity.y, -3.0);
        assert_eq!(player.state(), MotionState::Airborne);
    }

    #[test]
    fn test_jump_clears_ground_immediately() {
        let settings = PlayerSettings::default();
        let mut player = Player::new(Vec3::ZERO, &settings);
        player.grounded = true;
        player.support = Some(BoxOwner { island: 0, block: 0 });

        assert!(player.jump());
        assert_eq!(player.velocity.y, settings.jump_force);
        assert!(!player.grounded);
        assert_eq!(player.support, None);
    }

    #[test]
    fn test_speed_ramps_and_clamps() {
        let settings = PlayerSettings::default();
        let mut player = Player::new(Vec3::ZERO, &settings);
        player.grounded = true;

        player.apply_input(&forward_intent(), &settings, 1.0);
        assert!((player.current_speed - 25.0).abs() < 0.0001);
        player.apply_input(&forward_intent(), &settings, 1.0);
        assert!((player.current_speed - 35.0).abs() < 0.0001);

        player.apply_input(&MoveIntent::idle(), &settings, 1.0);
        assert!((player.current_speed - 20.0).abs() < 0.0001);
        player.apply_input(&MoveIntent::idle(), &settings, 10.0);
        assert_eq!(player.current_speed, 0.0);
        assert_eq!(player.acceleration, Vec3::ZERO);
    }

    #[test]
    fn test_air_control_damps_acceleration() {
        let settings = PlayerSettings::default();
        let mut grounded = Player::new(Vec3::ZERO, &settings);
        grounded.grounded = true;
        let mut airborne = Player::new(Vec3::ZERO, &settings);

        grounded.apply_input(&forward_intent(), &settings, 0.1);
        airborne.apply_input(&forward_intent(), &settings, 0.1);

        let g = grounded.acceleration.len();
        let a = airborne.acceleration.len();
        assert!((a - g * 0.3).abs() < 0.0001);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let intent = MoveIntent { forward: true, back: true, ..MoveIntent::idle() };
        assert_eq!(intent.direction().len(), 0.0);
    }
}
