//! Per-round tuning resolved from the difficulty selection
//!
//! A `Config` is built once at round setup and never changes while the round
//! runs.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Difficulty;

/// Physics and spawn parameters for one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub difficulty: Difficulty,
    /// Velocity lost per tick
    pub gravity: f32,
    /// Velocity set by a jump
    pub jump_impulse: f32,
    /// Obstacle travel per tick (pixels)
    pub scroll_speed: f32,
    /// Seconds between obstacle pairs
    pub spawn_interval: f32,
    /// Vertical size of the passable gap (pixels)
    pub gap_size: f32,
    pub obstacle_width: f32,
}

impl Config {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (gravity, spawn_interval, gap_size) = match difficulty {
            Difficulty::Easy => (GRAVITY_EASY, 2.5, 240.0),
            Difficulty::Medium => (GRAVITY_MEDIUM, 1.9, 220.0),
            Difficulty::Hard => (GRAVITY_HARD, 1.5, 180.0),
        };
        Self {
            difficulty,
            gravity,
            jump_impulse: JUMP_IMPULSE,
            scroll_speed: SCROLL_SPEED,
            spawn_interval,
            gap_size,
            obstacle_width: OBSTACLE_WIDTH,
        }
    }

    /// Resolve from a persisted difficulty name (unknown names mean medium)
    pub fn from_name(name: &str) -> Self {
        Self::for_difficulty(Difficulty::resolve(name))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}

/// Playfield size in pixels (y-up, origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}
