//! Input handling
//!
//! Action-based input over keyboard/mouse and gamepad. The rest of the game
//! only ever sees an `InputFrame`.
//!
//! Native: gilrs for gamepads. WASM: keyboard and mouse only.

mod actions;
mod gamepad;
mod state;

pub use actions::*;
pub use state::InputState;
