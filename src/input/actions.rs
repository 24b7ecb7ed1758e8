//! Game action definitions

/// All actions the game reacts to
///
/// Keyboard: WASD move, Space jump, F3 debug overlay, Escape quit.
/// Gamepad: left stick move, right stick look, A jump, Select debug, Start quit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (WASD / left stick)
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,

    Jump,

    // System
    ToggleDebug,
    Quit,
}
