//! Collision System
//!
//! Sphere-vs-block collision against the boxes emitted by the islands.
//! This is a single-pass resolver: the first box that produces a contact
//! wins and the rest are ignored for the frame. Level layouts and tuning
//! are balanced against this behaviour.
//!
//! Each block box is anchored at its bottom centre, spans `BLOCK_HALF_EXTENT`
//! either side horizontally and `BLOCK_HEIGHT` upwards.

use crate::math::Vec3;
use crate::world::{BoxOwner, CollisionBox};

/// Horizontal half-width of a block box
pub const BLOCK_HALF_EXTENT: f32 = 1.0;
/// Vertical extent of a block box above its anchor
pub const BLOCK_HEIGHT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Z,
}

/// What the resolving box did to the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Came down onto the top face
    Landed { owner: BoxOwner, velocity: Option<Vec3> },
    /// Hit the bottom face while rising
    Ceiling { owner: BoxOwner },
    /// Pushed out of the box sideways
    Wall { owner: BoxOwner, axis: Axis },
}

/// Result of a collision pass
#[derive(Debug, Clone, Copy)]
pub struct CollisionResult {
    /// Corrected position
    pub position: Vec3,
    /// Corrected velocity
    pub velocity: Vec3,
    /// The contact that resolved the frame, if any
    pub contact: Option<Contact>,
}

impl CollisionResult {
    pub fn grounded(&self) -> bool {
        matches!(self.contact, Some(Contact::Landed { .. }))
    }
}

/// Resolve a sphere of `radius` at `position` against `boxes`.
///
/// `dt` is the look-ahead used to decide whether the sphere crosses a top or
/// bottom face this step. Candidate boxes are those whose footprint, grown
/// by the radius, contains the sphere centre. For each candidate, in order:
/// 1. landing on the top face while falling
/// 2. hitting the bottom face while rising
/// 3. sideways push-out along the axis of least penetration
pub fn resolve_collision(
    position: Vec3,
    velocity: Vec3,
    radius: f32,
    boxes: &[CollisionBox],
    dt: f32,
    debug_log: bool,
) -> CollisionResult {
    let mut pos = position;
    let mut vel = velocity;
    let next = position + velocity * dt;
    let reach = BLOCK_HALF_EXTENT + radius;

    for b in boxes {
        let dx = pos.x - b.position.x;
        let dz = pos.z - b.position.z;
        if dx.abs() >= reach || dz.abs() >= reach {
            continue;
        }

        let top = b.position.y + BLOCK_HEIGHT;
        let bottom = b.position.y;

        if vel.y <= 0.0 && pos.y >= top && next.y - radius <= top {
            pos.y = top + radius;
            vel.y = 0.0;
            if debug_log {
                println!(
                    "COL|LAND|box:({},{})|top:{:.2}|in:({:.2},{:.2},{:.2})",
                    b.owner.island, b.owner.block, top, position.x, position.y, position.z
                );
            }
            return CollisionResult {
                position: pos,
                velocity: vel,
                contact: Some(Contact::Landed { owner: b.owner, velocity: b.velocity }),
            };
        }

        if vel.y > 0.0 && pos.y <= bottom && next.y + radius >= bottom {
            pos.y = bottom - radius;
            vel.y = 0.0;
            if debug_log {
                println!(
                    "COL|CEIL|box:({},{})|bottom:{:.2}|in:({:.2},{:.2},{:.2})",
                    b.owner.island, b.owner.block, bottom, position.x, position.y, position.z
                );
            }
            return CollisionResult {
                position: pos,
                velocity: vel,
                contact: Some(Contact::Ceiling { owner: b.owner }),
            };
        }

        if pos.y > bottom && pos.y < top {
            let depth_x = reach - dx.abs();
            let depth_z = reach - dz.abs();
            let axis = if depth_x < depth_z {
                vel.x = 0.0;
                pos.x = if dx > 0.0 { b.position.x + reach } else { b.position.x - reach };
                Axis::X
            } else {
                vel.z = 0.0;
                pos.z = if dz > 0.0 { b.position.z + reach } else { b.position.z - reach };
                Axis::Z
            };
            if debug_log {
                println!(
                    "COL|WALL|box:({},{})|axis:{:?}|in:({:.2},{:.2},{:.2})|out:({:.2},{:.2},{:.2})",
                    b.owner.island, b.owner.block, axis,
                    position.x, position.y, position.z, pos.x, pos.y, pos.z
                );
            }
            return CollisionResult {
                position: pos,
                velocity: vel,
                contact: Some(Contact::Wall { owner: b.owner, axis }),
            };
        }
    }

    CollisionResult { position: pos, velocity: vel, contact: None }
}
