//! Demo-mode driver that plays the game from frame snapshots
//!
//! Targets the gap of the next pair still ahead of the player and flaps
//! whenever it falls below a line under the gap centre. The line sits half a
//! jump's rise below the centre, so the flap arc is centred on the gap.

use crate::game::Frame;
use crate::sim::{RoundInput, RoundPhase};

#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot {
    /// Extra offset added to the trigger line (positive flaps earlier)
    pub bias: f32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Height a jump from rest climbs before gravity stops it
    pub fn jump_rise(jump_impulse: f32, gravity: f32) -> f32 {
        if gravity <= 0.0 {
            return f32::INFINITY;
        }
        let rise = jump_impulse * jump_impulse / (2.0 * gravity) - jump_impulse / 2.0;
        rise.max(0.0)
    }

    /// Gap centre the player should be heading for
    pub fn target_y(frame: &Frame<'_>) -> f32 {
        let left = frame.player.bounds().left();
        frame
            .pairs
            .iter()
            .find(|pair| pair.right() >= left)
            .map(|pair| pair.gap.center_y)
            .unwrap_or(frame.viewport.half_height())
    }

    /// Input to send this frame, if any
    pub fn decide(&self, frame: &Frame<'_>) -> Option<RoundInput> {
        match frame.phase {
            RoundPhase::Ready => Some(RoundInput::Start),
            RoundPhase::GameOver => None,
            RoundPhase::Playing => {
                let rise = Self::jump_rise(frame.config.jump_impulse, frame.config.gravity);
                let trigger = Self::target_y(frame) - rise / 2.0 + self.bias;
                let falling = frame.player.vel_y <= 0.0;
                (falling && frame.player.pos.y < trigger).then_some(RoundInput::Jump)
            }
        }
    }
}
