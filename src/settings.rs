//! Game settings
//!
//! Tuning constants for the player controller, moving platforms and level
//! rules. Every field defaults to the tuned value, so `assets/settings.ron`
//! only needs to name the values it overrides:
//!
//! ```ron
//! (
//!     seed: Some(42),
//!     player: (jump_force: 12.0),
//! )
//! ```

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};

/// Default location of the optional settings file
pub const SETTINGS_PATH: &str = "assets/settings.ron";

/// Player controller parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Collision sphere radius
    pub radius: f32,
    /// Carried for tuning; does not enter the integration
    pub mass: f32,
    /// Upward velocity applied on jump
    pub jump_force: f32,
    /// Upper bound of the ramped horizontal speed
    pub max_move_speed: f32,
    /// Speed gained per second while a movement key is held
    pub acceleration_rate: f32,
    /// Speed lost per second with no movement key held
    pub deceleration_rate: f32,
    /// Fraction of horizontal acceleration available while airborne
    pub air_control: f32,
    /// Horizontal velocity multiplier per grounded frame
    pub friction: f32,
    /// Downward acceleration (positive number)
    pub gravity: f32,
    /// Altitude below which the player is reset to the level start
    pub death_plane_y: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            radius: 0.5,
            mass: 1.0,
            jump_force: 10.0,
            max_move_speed: 35.0,
            acceleration_rate: 25.0,
            deceleration_rate: 15.0,
            air_control: 0.3,
            friction: 0.9,
            gravity: 20.0,
            death_plane_y: -5.0,
        }
    }
}

/// Floating island motion parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSettings {
    /// Angular speed of motion patterns (radians per second of phase)
    pub motion_speed: f32,
    /// Displacement amplitude of motion patterns
    pub motion_amplitude: f32,
    /// Cosmetic hover bob amplitude
    pub hover_amplitude: f32,
    /// Cosmetic hover bob angular speed
    pub hover_speed: f32,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            motion_speed: 0.5,
            motion_amplitude: 2.0,
            hover_amplitude: 0.1,
            hover_speed: 0.5,
        }
    }
}

/// Level rules and simulation stepping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    /// Coins needed before a portal accepts the player
    pub portal_coin_threshold: u32,
    /// Portal trigger radius
    pub portal_radius: f32,
    /// Coin pickup radius
    pub coin_radius: f32,
    /// Simulation step in seconds
    pub fixed_timestep: f32,
    /// Steps run at most per rendered frame (avoids spiral of death)
    pub max_steps_per_frame: u32,
    /// Give coinless islands a coin, in order, until the portal threshold
    /// is reachable. Off: only the 70% rolls place coins.
    pub guarantee_portal_coins: bool,
}

impl Default for RuleSettings {
    fn default() -> Self {
        Self {
            portal_coin_threshold: 5,
            portal_radius: 2.0,
            coin_radius: 0.3,
            fixed_timestep: 0.016,
            max_steps_per_frame: 5,
            guarantee_portal_coins: true,
        }
    }
}

/// All runtime-tunable settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Level generation seed. None = seeded from the clock
    pub seed: Option<u64>,
    /// Print per-frame collision traces
    pub debug_collision: bool,
    /// Camera degrees per unit of mouse movement
    pub mouse_sensitivity: f32,
    pub player: PlayerSettings,
    pub platforms: PlatformSettings,
    pub rules: RuleSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            seed: None,
            debug_collision: false,
            mouse_sensitivity: 0.04,
            player: PlayerSettings::default(),
            platforms: PlatformSettings::default(),
            rules: RuleSettings::default(),
        }
    }
}

/// Error type for settings loading
#[derive(Debug)]
pub enum SettingsError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SettingsError {
    fn from(e: ron::error::SpannedError) -> Self {
        SettingsError::ParseError(e)
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::IoError(e) => write!(f, "IO error: {}", e),
            SettingsError::ParseError(e) => write!(f, "Parse error: {}", e),
            SettingsError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

fn require_positive(name: &str, value: f32) -> Result<(), SettingsError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SettingsError::ValidationError(format!(
            "{} must be a positive number, got {}", name, value
        )));
    }
    Ok(())
}

fn require_unit_range(name: &str, value: f32) -> Result<(), SettingsError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(SettingsError::ValidationError(format!(
            "{} must be within 0..=1, got {}", name, value
        )));
    }
    Ok(())
}

/// Reject settings the simulation cannot run with
pub fn validate_settings(settings: &GameSettings) -> Result<(), SettingsError> {
    let p = &settings.player;
    require_positive("player.radius", p.radius)?;
    require_positive("player.jump_force", p.jump_force)?;
    require_positive("player.max_move_speed", p.max_move_speed)?;
    require_positive("player.acceleration_rate", p.acceleration_rate)?;
    require_positive("player.deceleration_rate", p.deceleration_rate)?;
    require_positive("player.gravity", p.gravity)?;
    require_unit_range("player.air_control", p.air_control)?;
    require_unit_range("player.friction", p.friction)?;
    if !p.death_plane_y.is_finite() {
        return Err(SettingsError::ValidationError("player.death_plane_y must be finite".into()));
    }

    let m = &settings.platforms;
    require_positive("platforms.motion_speed", m.motion_speed)?;
    if !m.motion_amplitude.is_finite() || !m.hover_amplitude.is_finite() || !m.hover_speed.is_finite() {
        return Err(SettingsError::ValidationError("platform motion values must be finite".into()));
    }

    let r = &settings.rules;
    require_positive("rules.portal_radius", r.portal_radius)?;
    require_positive("rules.coin_radius", r.coin_radius)?;
    require_positive("rules.fixed_timestep", r.fixed_timestep)?;
    if r.max_steps_per_frame == 0 {
        return Err(SettingsError::ValidationError("rules.max_steps_per_frame must be at least 1".into()));
    }
    require_positive("mouse_sensitivity", settings.mouse_sensitivity)?;
    Ok(())
}

/// Parse settings from a RON string
pub fn load_settings_from_str(s: &str) -> Result<GameSettings, SettingsError> {
    let settings: GameSettings = ron::from_str(s)?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Load settings from a RON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<GameSettings, SettingsError> {
    let contents = fs::read_to_string(path)?;
    load_settings_from_str(&contents)
}

/// Load settings from `path`, falling back to defaults when the file is
/// missing or invalid
pub fn load_settings_or_default<P: AsRef<Path>>(path: P) -> GameSettings {
    let path = path.as_ref();
    if !path.exists() {
        println!("Settings: {} not found, using defaults", path.display());
        return GameSettings::default();
    }
    match load_settings(path) {
        Ok(settings) => {
            println!("Settings: loaded {}", path.display());
            settings
        }
        Err(e) => {
            eprintln!("Settings: failed to load {}: {}, using defaults", path.display(), e);
            GameSettings::default()
        }
    }
}
