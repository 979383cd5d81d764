//! Player body and its per-tick integration
//!
//! Semi-implicit Euler with one step per tick: velocity first, then position
//! from the updated velocity. Tilt is cosmetic and eased with frame time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// The player-controlled body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Centre position; x is fixed for the whole round
    pub pos: Vec2,
    /// Vertical velocity (positive is up)
    pub vel_y: f32,
    /// Orientation in degrees (negative noses up)
    pub angle: f32,
    /// Hitbox size
    pub size: Vec2,
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel_y: 0.0,
            angle: 0.0,
            size,
        }
    }

    /// Advance one tick under gravity
    pub fn integrate(&mut self, gravity: f32) {
        self.vel_y -= gravity;
        self.pos.y += self.vel_y;
    }

    /// Absolute set: repeated jumps never compound
    pub fn jump(&mut self, impulse: f32) {
        self.vel_y = impulse;
    }

    /// Ease the orientation toward the velocity-derived target
    pub fn update_tilt(&mut self, dt: f32) {
        let target = tilt_target(self.vel_y);
        let blend = (TILT_RATE * dt).clamp(0.0, 1.0);
        self.angle += (target - self.angle) * blend;
        self.angle = self.angle.clamp(TILT_MIN, TILT_MAX);
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    /// Back to the starting height, at rest and level
    pub fn reset(&mut self, y: f32) {
        self.pos.y = y;
        self.vel_y = 0.0;
        self.angle = 0.0;
    }
}

/// Target tilt for a given vertical velocity
pub fn tilt_target(vel_y: f32) -> f32 {
    if vel_y > 0.0 {
        TILT_ASCEND
    } else {
        TILT_DESCEND_MAX * (vel_y.abs() / TILT_FULL_FALL_SPEED).min(1.0)
    }
}
