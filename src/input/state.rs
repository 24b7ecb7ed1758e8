//! Input state management
//!
//! Polls keyboard, mouse and gamepad once per frame and folds them into a
//! plain `InputFrame` the game can consume without touching macroquad.

use macroquad::prelude::*;
use crate::game::MoveIntent;
use crate::math::Vec3;
use super::gamepad::{button, Gamepad};
use super::Action;

/// Right stick look speed in degrees per second at full deflection
const STICK_LOOK_SPEED: f32 = 120.0;
/// Stick deflection that counts as a held direction
const STICK_THRESHOLD: f32 = 0.3;

/// Everything the game needs from one frame of input
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputFrame {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Held, not edge-triggered: holding jump re-jumps on landing
    pub jump: bool,
    /// Camera yaw/pitch change in degrees
    pub look: (f32, f32),
    pub toggle_debug: bool,
    pub quit: bool,
}

impl InputFrame {
    /// Resolve movement against the camera's horizontal basis
    pub fn move_intent(&self, forward_dir: Vec3, right_dir: Vec3) -> MoveIntent {
        MoveIntent {
            forward: self.forward,
            back: self.back,
            left: self.left,
            right: self.right,
            jump: self.jump,
            forward_dir,
            right_dir,
        }
    }
}

/// Convert macroquad's mouse delta to pixels moved this frame.
///
/// `mouse_delta_position` reports last minus current position in the -1..1
/// local range, so the sign flips and each axis spans half the screen.
pub fn mouse_delta_pixels(delta: Vec2, screen: Vec2) -> Vec2 {
    vec2(-delta.x * screen.x * 0.5, -delta.y * screen.y * 0.5)
}

/// Unified input state for keyboard/mouse and gamepad
pub struct InputState {
    gamepad: Gamepad,
    /// Degrees per pixel of mouse movement
    pub mouse_sensitivity: f32,
}

impl InputState {
    pub fn new(mouse_sensitivity: f32) -> Self {
        Self {
            gamepad: Gamepad::new(),
            mouse_sensitivity,
        }
    }

    /// Call once per frame. `dt` scales stick look speed.
    pub fn poll(&mut self, dt: f32) -> InputFrame {
        self.gamepad.poll();

        // Grab-safe: keeps reporting motion once the cursor is confined
        let mouse = mouse_delta_pixels(mouse_delta_position(), vec2(screen_width(), screen_height()));

        let stick = self.gamepad.right_stick();
        let look = (
            mouse.x * self.mouse_sensitivity + stick.x * STICK_LOOK_SPEED * dt,
            mouse.y * self.mouse_sensitivity + stick.y * STICK_LOOK_SPEED * dt,
        );

        InputFrame {
            forward: self.action_down(Action::MoveForward),
            back: self.action_down(Action::MoveBackward),
            left: self.action_down(Action::MoveLeft),
            right: self.action_down(Action::MoveRight),
            jump: self.action_down(Action::Jump),
            look,
            toggle_debug: self.action_pressed(Action::ToggleDebug),
            quit: self.action_pressed(Action::Quit),
        }
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        self.keyboard_down(action) || self.gamepad_down(action)
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        self.keyboard_pressed(action) || self.gamepad_pressed(action)
    }

    fn keyboard_down(&self, action: Action) -> bool {
        match action {
            Action::MoveForward => is_key_down(KeyCode::W),
            Action::MoveBackward => is_key_down(KeyCode::S),
            Action::MoveLeft => is_key_down(KeyCode::A),
            Action::MoveRight => is_key_down(KeyCode::D),
            Action::Jump => is_key_down(KeyCode::Space),
            Action::ToggleDebug => is_key_down(KeyCode::F3),
            Action::Quit => is_key_down(KeyCode::Escape),
        }
    }

    fn gamepad_down(&self, action: Action) -> bool {
        let stick = self.gamepad.left_stick();
        match action {
            Action::MoveForward => stick.y > STICK_THRESHOLD || self.gamepad.is_button_down(button::DPAD_UP),
            Action::MoveBackward => stick.y < -STICK_THRESHOLD || self.gamepad.is_button_down(button::DPAD_DOWN),
            Action::MoveLeft => stick.x < -STICK_THRESHOLD || self.gamepad.is_button_down(button::DPAD_LEFT),
            Action::MoveRight => stick.x > STICK_THRESHOLD || self.gamepad.is_button_down(button::DPAD_RIGHT),
            Action::Jump => self.gamepad.is_button_down(button::A),
            Action::ToggleDebug => self.gamepad.is_button_down(button::SELECT),
            Action::Quit => self.gamepad.is_button_down(button::START),
        }
    }

    fn keyboard_pressed(&self, action: Action) -> bool {
        match action {
            Action::Jump => is_key_pressed(KeyCode::Space),
            Action::ToggleDebug => is_key_pressed(KeyCode::F3),
            Action::Quit => is_key_pressed(KeyCode::Escape),
            _ => false,
        }
    }

    fn gamepad_pressed(&self, action: Action) -> bool {
        match action {
            Action::Jump => self.gamepad.is_button_pressed(button::A),
            Action::ToggleDebug => self.gamepad.is_button_pressed(button::SELECT),
            Action::Quit => self.gamepad.is_button_pressed(button::START),
            _ => false,
        }
    }

    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }
}
