//! Gamepad support
//!
//! Native: gilrs. WASM builds have no gamepad backend and report no pad.

use macroquad::prelude::Vec2;

// Standard gamepad button indices (Web Gamepad API standard mapping)
pub mod button {
    pub const A: u32 = 0;           // South
    pub const SELECT: u32 = 8;      // Back/Select
    pub const START: u32 = 9;       // Start/Options
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_DOWN: u32 = 13;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn is_button_down(&self, _button: u32) -> bool {
            false
        }

        pub fn is_button_pressed(&self, _button: u32) -> bool {
            false
        }

        pub fn left_stick(&self) -> Vec2 {
            Vec2::ZERO
        }

        pub fn right_stick(&self) -> Vec2 {
            Vec2::ZERO
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Gilrs, Button as GilrsButton, Axis};

    pub struct Gamepad {
        /// None when no gamepad backend is available on this machine
        gilrs: Option<Gilrs>,
        deadzone: f32,
        buttons: u32,
        last_buttons: u32,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(g) => Some(g),
                Err(e) => {
                    eprintln!("Input: gamepad support unavailable: {}", e);
                    None
                }
            };
            Self {
                gilrs,
                deadzone: 0.15,
                buttons: 0,
                last_buttons: 0,
            }
        }

        /// Process pending events and latch button state for this frame
        pub fn poll(&mut self) {
            if let Some(gilrs) = self.gilrs.as_mut() {
                while gilrs.next_event().is_some() {}
            }
            self.last_buttons = self.buttons;
            self.buttons = self.button_mask();
        }

        pub fn has_gamepad(&self) -> bool {
            self.active().is_some()
        }

        fn active(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        fn button_mask(&self) -> u32 {
            let Some(gp) = self.active() else { return 0 };
            let mut mask = 0u32;

            if gp.is_pressed(GilrsButton::South) { mask |= 1 << super::button::A; }
            if gp.is_pressed(GilrsButton::Select) { mask |= 1 << super::button::SELECT; }
            if gp.is_pressed(GilrsButton::Start) { mask |= 1 << super::button::START; }
            if gp.is_pressed(GilrsButton::DPadUp) { mask |= 1 << super::button::DPAD_UP; }
            if gp.is_pressed(GilrsButton::DPadDown) { mask |= 1 << super::button::DPAD_DOWN; }
            if gp.is_pressed(GilrsButton::DPadLeft) { mask |= 1 << super::button::DPAD_LEFT; }
            if gp.is_pressed(GilrsButton::DPadRight) { mask |= 1 << super::button::DPAD_RIGHT; }

            mask
        }

        pub fn is_button_down(&self, button: u32) -> bool {
            (self.buttons & (1 << button)) != 0
        }

        /// Down this frame but not the previous one
        pub fn is_button_pressed(&self, button: u32) -> bool {
            let bit = 1 << button;
            (self.buttons & bit) != 0 && (self.last_buttons & bit) == 0
        }

        pub fn left_stick(&self) -> Vec2 {
            let Some(gp) = self.active() else { return Vec2::ZERO };
            let x = gp.value(Axis::LeftStickX);
            let y = gp.value(Axis::LeftStickY);
            super::apply_deadzone(x, y, self.deadzone)
        }

        pub fn right_stick(&self) -> Vec2 {
            let Some(gp) = self.active() else { return Vec2::ZERO };
            let x = gp.value(Axis::RightStickX);
            let y = -gp.value(Axis::RightStickY); // Down is positive, like mouse Y
            super::apply_deadzone(x, y, self.deadzone)
        }
    }
}

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply radial deadzone with linear rescaling
pub fn apply_deadzone(x: f32, y: f32, deadzone: f32) -> Vec2 {
    let len = (x * x + y * y).sqrt();
    if len < deadzone {
        return Vec2::ZERO;
    }
    // Rescale from deadzone..1.0 to 0.0..1.0
    let scale = (len - deadzone) / (1.0 - deadzone) / len;
    Vec2::new(x * scale, y * scale)
}

pub use platform::Gamepad;
