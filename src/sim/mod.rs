//! Deterministic round simulation
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One integration step per tick, no sub-stepping
//! - Seeded RNG only
//! - Obstacles stored and iterated oldest pair first
//! - No rendering, audio or file dependencies

pub mod collision;
pub mod config;
pub mod physics;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Edge, Termination};
pub use config::{Config, Viewport};
pub use physics::Player;
pub use rect::Rect;
pub use spawner::{GapPlacement, Obstacle, ObstaclePair, Side, Spawner, gap_range};
pub use state::{GameEvent, Round, RoundPhase};
pub use tick::{RoundInput, advance, apply_input};
