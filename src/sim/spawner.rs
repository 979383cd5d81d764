//! Obstacle pairs: timed spawning, gap placement, scrolling and retirement
//!
//! Pairs are the unit of storage. A top and bottom member are only ever
//! created, moved and removed together, so the member count is always even.

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::{Config, Viewport};
use super::rect::Rect;
use crate::consts::*;
use crate::settings::Difficulty;

/// Vertical placement of the passable region of a pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapPlacement {
    pub center_y: f32,
    pub size: f32,
}

impl GapPlacement {
    /// Lower edge of the gap (top of the bottom member)
    pub fn low(&self) -> f32 {
        self.center_y - self.size / 2.0
    }

    /// Upper edge of the gap (bottom of the top member)
    pub fn high(&self) -> f32 {
        self.center_y + self.size / 2.0
    }
}

/// Which member of a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
}

/// One member of a pair, as seen by collision and rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pair_id: u32,
    pub side: Side,
    pub rect: Rect,
}

/// A top and bottom obstacle sharing a gap and spawn time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: u32,
    /// Horizontal centre
    pub x: f32,
    pub width: f32,
    /// Length of each member
    pub length: f32,
    pub gap: GapPlacement,
}

impl ObstaclePair {
    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    /// Trailing edge while scrolling left
    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> Obstacle {
        let bottom = self.gap.high();
        Obstacle {
            pair_id: self.id,
            side: Side::Top,
            rect: Rect::new(
                Vec2::new(self.left(), bottom),
                Vec2::new(self.right(), bottom + self.length),
            ),
        }
    }

    pub fn bottom(&self) -> Obstacle {
        let top = self.gap.low();
        Obstacle {
            pair_id: self.id,
            side: Side::Bottom,
            rect: Rect::new(
                Vec2::new(self.left(), top - self.length),
                Vec2::new(self.right(), top),
            ),
        }
    }

    pub fn members(&self) -> [Obstacle; 2] {
        [self.top(), self.bottom()]
    }

    /// Fully past the left screen edge
    pub fn is_off_screen(&self) -> bool {
        self.right() < 0.0
    }
}

/// Inclusive range for the next gap centre.
///
/// The default band keeps `GAP_MARGIN` clear of both edges. On Hard, once a
/// previous gap exists, the band is restricted to the half of the screen
/// opposite that gap; if that leaves nothing to choose from, the default band
/// is used instead.
pub fn gap_range(
    difficulty: Difficulty,
    viewport_height: f32,
    gap_size: f32,
    previous: Option<f32>,
) -> (f32, f32) {
    let default = (GAP_MARGIN, viewport_height - GAP_MARGIN - gap_size);

    let Some(prev) = previous else {
        return default;
    };
    if difficulty != Difficulty::Hard {
        return default;
    }

    let half = viewport_height / 2.0;
    let constrained = if prev < half {
        (half + gap_size / 2.0, viewport_height - GAP_MARGIN - gap_size)
    } else {
        (GAP_MARGIN, half - gap_size / 2.0)
    };

    if constrained.0 >= constrained.1 {
        default
    } else {
        constrained
    }
}

/// Uniform draw from an inclusive range; an inverted range collapses to its minimum
pub fn draw_in_range<R: Rng>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    if max > min {
        rng.random_range(min..=max)
    } else {
        min
    }
}

/// Slack when comparing accumulated frame time against the spawn interval
const CLOCK_EPSILON: f64 = 1e-6;

/// Owns the active pairs and the spawn clock
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    /// Oldest pair first
    pub pairs: VecDeque<ObstaclePair>,
    /// Seconds since the last spawn reference time
    since_spawn: f64,
    /// Centre of the most recent gap, if any pair has spawned this round
    previous_gap: Option<f32>,
    next_id: u32,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous_gap(&self) -> Option<f32> {
        self.previous_gap
    }

    pub fn since_spawn(&self) -> f64 {
        self.since_spawn
    }

    /// Number of obstacle members (always even)
    pub fn obstacle_count(&self) -> usize {
        self.pairs.len() * 2
    }

    /// Every active member, oldest pair first
    pub fn obstacles(&self) -> impl Iterator<Item = Obstacle> + '_ {
        self.pairs.iter().flat_map(|pair| pair.members())
    }

    /// Add frame time and report how many spawns are due.
    ///
    /// The remainder past each interval is kept, so spawns stay on a fixed
    /// schedule regardless of frame timing. Time is summed in `f64` and
    /// compared with a small tolerance, so 114 frames of 1/60 s reach 1.9 s.
    pub fn tick_clock(&mut self, dt: f32, interval: f32) -> u32 {
        self.since_spawn += f64::from(dt);
        if interval <= 0.0 {
            return 0;
        }
        let interval = f64::from(interval);
        let mut due = 0;
        while self.since_spawn >= interval - CLOCK_EPSILON {
            self.since_spawn -= interval;
            due += 1;
        }
        due
    }

    /// Create one pair just past the right edge
    pub fn spawn<R: Rng>(
        &mut self,
        config: &Config,
        viewport: &Viewport,
        rng: &mut R,
    ) -> &ObstaclePair {
        let range = gap_range(
            config.difficulty,
            viewport.height,
            config.gap_size,
            self.previous_gap,
        );
        let center_y = draw_in_range(rng, range);
        self.previous_gap = Some(center_y);

        let id = self.next_id;
        self.next_id += 1;

        log::debug!("Spawn pair {} gap centre {:.1} range {:?}", id, center_y, range);
        self.pairs.push_back(ObstaclePair {
            id,
            x: viewport.width + SPAWN_OFFSET_X,
            width: config.obstacle_width,
            length: viewport.height,
            gap: GapPlacement {
                center_y,
                size: config.gap_size,
            },
        });
        &self.pairs[self.pairs.len() - 1]
    }

    /// Move every pair left
    pub fn scroll(&mut self, speed: f32) {
        for pair in &mut self.pairs {
            pair.x -= speed;
        }
    }

    /// Remove the oldest pairs that have fully left the screen
    pub fn retire(&mut self) -> Vec<ObstaclePair> {
        let mut retired = Vec::new();
        while self.pairs.front().is_some_and(ObstaclePair::is_off_screen) {
            if let Some(pair) = self.pairs.pop_front() {
                log::debug!("Retire pair {}", pair.id);
                retired.push(pair);
            }
        }
        retired
    }

    /// Clear everything for a new round, keeping allocations
    pub fn reset(&mut self) {
        self.pairs.clear();
        self.since_spawn = 0.0;
        self.previous_gap = None;
    }
}
