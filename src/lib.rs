//! Flappy Arcade - a side-scrolling gap-threading arcade game
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (physics, obstacles, collisions, round state)
//! - `game`: Composition of a round with its capability-selected collaborators
//! - `fx`: Presentation-side subscribers (particles, day/night backdrop)
//! - `persistence`: Score records and the sinks that store them
//! - `settings`: Player preferences read from a JSON file
//! - `autopilot`: Demo-mode input driver

pub mod autopilot;
pub mod fx;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use game::{Capabilities, Flow, Game};
pub use highscores::HighScores;
pub use settings::{Difficulty, Settings, Skin};

/// Game configuration constants
pub mod consts {
    /// Default viewport (original window size)
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Player column (x never changes during a round)
    pub const PLAYER_X: f32 = 250.0;

    /// Gravity in velocity units per tick, per difficulty
    pub const GRAVITY_EASY: f32 = 0.3;
    pub const GRAVITY_MEDIUM: f32 = 0.4;
    pub const GRAVITY_HARD: f32 = 0.5;

    /// Jump sets vertical velocity to this value (absolute, not additive)
    pub const JUMP_IMPULSE: f32 = 9.0;
    /// Horizontal scroll in pixels per tick
    pub const SCROLL_SPEED: f32 = 3.8;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 90.0;
    /// New pairs appear this far past the right edge (centre x)
    pub const SPAWN_OFFSET_X: f32 = 200.0;
    /// Gap centres never come closer than this to the top/bottom edge band
    pub const GAP_MARGIN: f32 = 140.0;

    /// Tilt easing (degrees)
    pub const TILT_ASCEND: f32 = -35.0;
    pub const TILT_DESCEND_MAX: f32 = 70.0;
    /// Fall speed at which the descending tilt saturates
    pub const TILT_FULL_FALL_SPEED: f32 = 12.0;
    pub const TILT_RATE: f32 = 8.0;
    pub const TILT_MIN: f32 = -90.0;
    pub const TILT_MAX: f32 = 45.0;
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
