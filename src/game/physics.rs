//! Player physics step
//!
//! One fixed step of the character controller: death plane, forces,
//! friction, platform carry, integration, then a single collision pass.

use crate::math::Vec3;
use crate::settings::PlayerSettings;
use crate::world::CollisionBox;
use super::collision::{resolve_collision, Contact};
use super::player::{MoveIntent, Player};

/// What happened to the player this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// Fell below the death plane and was put back at the start
    Respawned,
}

/// Advance the player by `dt` against `boxes`, steering with `intent`.
///
/// While grounded the supporting platform's velocity is added to
/// `player.velocity`, so the player leaves a platform with its drift. Last
/// step's horizontal carry is taken out before friction, which keeps the
/// drift from compounding.
pub fn step_player(
    player: &mut Player,
    intent: &MoveIntent,
    settings: &PlayerSettings,
    boxes: &[CollisionBox],
    dt: f32,
    debug_log: bool,
) -> StepOutcome {
    if player.position.y < settings.death_plane_y {
        if debug_log {
            println!(
                "PHYS|RESPAWN|y:{:.2}|start:({:.2},{:.2},{:.2})",
                player.position.y, player.start_position.x, player.start_position.y, player.start_position.z
            );
        }
        player.reset_position();
        return StepOutcome::Respawned;
    }

    player.apply_input(intent, settings, dt);
    let mut accel = player.acceleration;
    accel.y -= settings.gravity;
    player.velocity += accel * dt;

    if player.grounded {
        player.velocity = player.velocity - player.carried_velocity;
        player.velocity.x *= settings.friction;
        player.velocity.z *= settings.friction;
        player.velocity += player.platform_velocity;
        // Landing zeroes the vertical part, only the horizontal part persists
        player.carried_velocity = player.platform_velocity.horizontal();
    } else {
        player.carried_velocity = Vec3::ZERO;
    }

    player.position += player.velocity * dt;

    let result = resolve_collision(player.position, player.velocity, player.radius, boxes, dt, debug_log);
    player.position = result.position;
    player.velocity = result.velocity;
    match result.contact {
        Some(Contact::Landed { owner, velocity }) => {
            player.grounded = true;
            player.support = Some(owner);
            player.platform_velocity = velocity.unwrap_or(Vec3::ZERO);
        }
        _ => {
            player.grounded = false;
            player.support = None;
            player.platform_velocity = Vec3::ZERO;
        }
    }

    player.acceleration = Vec3::ZERO;
    StepOutcome::Moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::BoxOwner;

    const DT: f32 = 0.016;

    fn floor_at(x: f32, z: f32, velocity: Option<Vec3>) -> CollisionBox {
        CollisionBox {
            position: Vec3::new(x, 0.0, z),
            velocity,
            owner: BoxOwner { island: 0, block: 0 },
        }
    }

    fn standing_player(settings: &PlayerSettings) -> Player {
        let mut player = Player::new(Vec3::new(0.0, 1.5, 0.0), settings);
        player.grounded = true;
        player
    }

    #[test]
    fn test_friction_decays_horizontal_speed() {
        let settings = PlayerSettings::default();
        let boxes = [floor_at(0.0, 0.0, None)];
        let mut player = standing_player(&settings);
        player.velocity = Vec3::new(4.0, 0.0, 0.0);

        let mut last = player.velocity.x;
        for _ in 0..20 {
            step_player(&mut player, &MoveIntent::idle(), &settings, &boxes, DT, false);
            assert!(player.velocity.x < last);
            last = player.velocity.x;
        }
        assert!(player.grounded);
        assert!((player.position.y - 1.5).abs() < 0.0001);
    }

    #[test]
    fn test_landing_is_stable() {
        let settings = PlayerSettings::default();
        let boxes = [floor_at(0.0, 0.0, None)];
        let mut player = standing_player(&settings);

        for _ in 0..30 {
            step_player(&mut player, &MoveIntent::idle(), &settings, &boxes, DT, false);
            assert!(player.grounded);
            assert!((player.position.y - 1.5).abs() < 0.0001);
            assert_eq!(player.velocity.y, 0.0);
        }
    }

    #[test]
    fn test_falls_without_support() {
        let settings = PlayerSettings::default();
        let mut player = Player::new(Vec3::new(0.0, 10.0, 0.0), &settings);

        step_player(&mut player, &MoveIntent::idle(), &settings, &[], DT, false);
        assert!(!player.grounded);
        assert!(player.velocity.y < 0.0);
        assert!(player.position.y < 10.0);
    }

    #[test]
    fn test_death_plane_respawns() {
        let settings = PlayerSettings::default();
        let start = Vec3::new(0.0, 2.0, 0.0);
        let mut player = Player::new(start, &settings);
        player.position = Vec3::new(3.0, -6.0, 1.0);
        player.velocity = Vec3::new(1.0, -20.0, 0.0);

        let outcome = step_player(&mut player, &MoveIntent::idle(), &settings, &[], DT, false);
        assert_eq!(outcome, StepOutcome::Respawned);
        assert_eq!(player.position, start);
        assert_eq!(player.velocity, Vec3::ZERO);
        assert!(!player.grounded);
    }

    #[test]
    fn test_platform_carries_player() {
        let settings = PlayerSettings::default();
        let drift = Vec3::new(1.0, 0.0, 0.0);
        let boxes = [floor_at(0.0, 0.0, Some(drift))];
        let mut player = standing_player(&settings);
        player.platform_velocity = drift;

        for _ in 0..10 {
            step_player(&mut player, &MoveIntent::idle(), &settings, &boxes, DT, false);
            // Rides at platform speed without compounding
            assert!((player.velocity.x - 1.0).abs() < 0.0001);
        }
        assert!((player.position.x - 10.0 * DT).abs() < 0.0001);
        assert!(player.grounded);
        assert_eq!(player.platform_velocity, drift);
    }

    #[test]
    fn test_jump_keeps_platform_drift() {
        let settings = PlayerSettings::default();
        let boxes = [floor_at(0.0, 0.0, Some(Vec3::new(1.0, 0.0, 0.0)))];
        let mut player = standing_player(&settings);

        step_player(&mut player, &MoveIntent::idle(), &settings, &boxes, DT, false);
        assert!(player.jump());
        let x0 = player.position.x;

        for _ in 0..30 {
            step_player(&mut player, &MoveIntent::idle(), &settings, &boxes, DT, false);
            assert!(!player.grounded);
        }
        assert!((player.velocity.x - 1.0).abs() < 0.0001);
        assert!((player.position.x - x0 - 30.0 * DT).abs() < 0.001);
    }

    #[test]
    fn test_drift_decays_after_leaving_platform() {
        let settings = PlayerSettings::default();
        let mut player = standing_player(&settings);
        player.velocity = Vec3::new(1.0, 0.0, 0.0);
        player.carried_velocity = Vec3::new(1.0, 0.0, 0.0);
        // Now on a static floor
        let boxes = [floor_at(0.0, 0.0, None)];

        step_player(&mut player, &MoveIntent::idle(), &settings, &boxes, DT, false);
        assert!(player.velocity.x.abs() < 0.0001);
        assert_eq!(player.carried_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_input_accelerates_then_clears() {
        let settings = PlayerSettings::default();
        let boxes = [floor_at(0.0, 0.0, None)];
        let mut player = standing_player(&settings);
        let intent = MoveIntent { forward: true, ..MoveIntent::idle() };

        step_player(&mut player, &intent, &settings, &boxes, DT, false);
        assert_eq!(player.acceleration, Vec3::ZERO);
        assert!(player.velocity.z < 0.0);
        assert!(player.current_speed > 0.0);
    }
}
