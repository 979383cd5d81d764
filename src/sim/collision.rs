//! Termination checks: leaving the screen and touching an obstacle
//!
//! Both run every Playing tick. Bounds are checked first, and the first hit
//! ends the round without evaluating the rest.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawner::{Obstacle, Side, Spawner};

/// Screen edge the player left through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    /// Dropped below y = 0
    Floor,
    /// Rose above the viewport height
    Ceiling,
}

/// Why a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    OutOfBounds(Edge),
    Obstacle { pair_id: u32, side: Side },
}

/// Fully outside the vertical extent of the screen
pub fn out_of_bounds(player: &Rect, viewport_height: f32) -> Option<Edge> {
    if player.top() < 0.0 {
        Some(Edge::Floor)
    } else if player.bottom() > viewport_height {
        Some(Edge::Ceiling)
    } else {
        None
    }
}

/// First obstacle the player overlaps, in iteration order
pub fn first_overlap<I>(player: &Rect, obstacles: I) -> Option<Obstacle>
where
    I: IntoIterator<Item = Obstacle>,
{
    obstacles
        .into_iter()
        .find(|obstacle| player.intersects(&obstacle.rect))
}

/// Full per-tick check, bounds before obstacles
pub fn check(player: &Rect, viewport_height: f32, spawner: &Spawner) -> Option<Termination> {
    if let Some(edge) = out_of_bounds(player, viewport_height) {
        return Some(Termination::OutOfBounds(edge));
    }
    first_overlap(player, spawner.obstacles()).map(|hit| Termination::Obstacle {
        pair_id: hit.pair_id,
        side: hit.side,
    })
}
