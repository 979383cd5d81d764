//! Cosmetic presentation state driven by game events
//!
//! Nothing here feeds back into the simulation. Both subscribers react to
//! `PairCleared`/`Restarted` and are stepped with the frame time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::game::{Frame, Presenter};
use crate::lerp;
use crate::sim::GameEvent;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Palette index for the renderer
    pub color: u32,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;
/// Particles per cleared pair
pub const BURST_COUNT: u32 = 16;
/// Downward pull on particles (pixels/s²)
const PARTICLE_GRAVITY: f32 = 300.0;

/// Score-burst particles
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spray a ring of particles from `origin`, spread derived from `seed`
    pub fn burst(&mut self, origin: Vec2, seed: u32) {
        // Oldest make room
        let overflow =
            (self.particles.len() + BURST_COUNT as usize).saturating_sub(MAX_PARTICLES);
        self.particles.drain(..overflow.min(self.particles.len()));

        for i in 0..BURST_COUNT {
            let hash = seed.wrapping_mul(2654435761).wrapping_add(i * 7919);
            let jitter = (hash % 1000) as f32 / 1000.0 - 0.5;
            let speed_roll = ((hash >> 10) % 1000) as f32 / 1000.0;
            let size_roll = ((hash >> 20) % 1000) as f32 / 1000.0;

            let angle = (i as f32 / BURST_COUNT as f32 + jitter * 0.1) * std::f32::consts::TAU;
            let speed = 80.0 + speed_roll * 160.0;
            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                color: (hash >> 8) % 4,
                life: 1.0,
                size: 2.0 + size_roll * 4.0,
            });
        }
    }

    pub fn step(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.pos += particle.vel * dt;
            particle.vel.y -= PARTICLE_GRAVITY * dt;
            particle.vel *= 0.98;
            particle.life -= dt * 1.5;
            particle.size *= 0.995;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl Presenter for ParticleField {
    fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::PairCleared { pair_id, at, .. } => self.burst(at, pair_id),
            GameEvent::Restarted { .. } => self.clear(),
            _ => {}
        }
    }

    fn present(&mut self, frame: &Frame<'_>) {
        self.step(frame.dt);
    }
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let channel = |x: u8, y: u8| lerp(x as f32, y as f32, t).round() as u8;
        Rgb(channel(a.0, b.0), channel(a.1, b.1), channel(a.2, b.2))
    }
}

pub const DAY_SKY: Rgb = Rgb(135, 206, 235);
pub const NIGHT_SKY: Rgb = Rgb(20, 24, 60);
/// Points for one full day/night cycle
pub const CYCLE_POINTS: u32 = 20;
/// How fast the sky catches up with the score (per second)
const CYCLE_EASE: f32 = 2.0;

/// Day/night cycle keyed off the score
#[derive(Debug, Clone, Default)]
pub struct Backdrop {
    /// Cycles completed, eased (fraction is time of day, 0 = noon)
    progress: f32,
    target: f32,
}

impl Backdrop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_score(&mut self, score: u32) {
        self.target = score as f32 / CYCLE_POINTS as f32;
    }

    pub fn step(&mut self, dt: f32) {
        let blend = (CYCLE_EASE * dt).clamp(0.0, 1.0);
        self.progress += (self.target - self.progress) * blend;
    }

    /// 1.0 at noon, 0.0 at midnight
    pub fn daylight(&self) -> f32 {
        let time_of_day = self.progress.fract();
        0.5 + 0.5 * (time_of_day * std::f32::consts::TAU).cos()
    }

    pub fn sky_color(&self) -> Rgb {
        Rgb::lerp(NIGHT_SKY, DAY_SKY, self.daylight())
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.target = 0.0;
    }
}

impl Presenter for Backdrop {
    fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::PairCleared { score, .. } => self.set_score(score),
            GameEvent::Restarted { .. } => self.reset(),
            _ => {}
        }
    }

    fn present(&mut self, frame: &Frame<'_>) {
        self.step(frame.dt);
    }
}
