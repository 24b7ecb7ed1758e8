//! Game Module
//!
//! The player controller, collision, orbit camera and the runtime that
//! ties them to the generated levels. Everything here except `renderer`
//! is plain simulation code driven by an injected `dt`.

pub mod transform;
pub mod player;
pub mod collision;
pub mod physics;
pub mod camera;
pub mod event;
pub mod runtime;
pub mod renderer;

// Re-export main types
pub use player::MoveIntent;
pub use camera::OrbitCamera;
pub use event::Events;
pub use runtime::{FrameClock, GameState};
pub use renderer::{draw_frame, LevelMeshes};
