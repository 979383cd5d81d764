//! Round state and core simulation types
//!
//! A `Round` exclusively owns the player, the obstacle pairs, the score and
//! the RNG for one play session. Restarting resets it in place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Termination;
use super::config::{Config, Viewport};
use super::physics::Player;
use super::spawner::{GapPlacement, Spawner};
use crate::consts::*;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Frozen, waiting for the first input
    Ready,
    /// Full simulation active
    Playing,
    /// Frozen, waiting for restart or navigate-away
    GameOver,
}

/// Discrete things that happened during a tick or input, for subscribers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round: u32 },
    Jumped { y: f32 },
    PairSpawned { pair_id: u32, gap: GapPlacement },
    /// A pair left the screen and scored; `at` is the player position
    PairCleared { pair_id: u32, score: u32, at: Vec2 },
    RoundEnded { round: u32, score: u32, cause: Termination },
    Restarted { round: u32 },
    /// Player left for the menu; the round is finished with
    Exited { round: u32 },
}

/// Complete state of one round (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct Round {
    /// Seed the RNG was created from
    pub seed: u64,
    pub config: Config,
    pub viewport: Viewport,
    pub phase: RoundPhase,
    pub player: Player,
    pub spawner: Spawner,
    /// Pairs cleared this round
    pub score: u32,
    /// 1-based, increments on every restart
    pub round_number: u32,
    /// Playing ticks this round
    pub time_ticks: u64,
    /// Playing seconds this round
    pub elapsed: f32,
    /// Ease the cosmetic tilt each tick
    pub tilt_enabled: bool,
    /// Set on the Playing -> GameOver transition
    pub termination: Option<Termination>,
    /// Navigated away; no further input or ticks are accepted
    pub exited: bool,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl Round {
    /// Create a round in the Ready phase with a seeded RNG
    pub fn new(config: Config, viewport: Viewport, player_size: Vec2, seed: u64) -> Self {
        let mut round = Self::with_rng(config, viewport, player_size, Pcg32::seed_from_u64(seed));
        round.seed = seed;
        round
    }

    /// Create a round drawing gap positions from the given generator
    pub fn with_rng(config: Config, viewport: Viewport, player_size: Vec2, rng: Pcg32) -> Self {
        Self {
            seed: 0,
            config,
            viewport,
            phase: RoundPhase::Ready,
            player: Player::new(
                Vec2::new(PLAYER_X, viewport.half_height()),
                player_size,
            ),
            spawner: Spawner::new(),
            score: 0,
            round_number: 1,
            time_ticks: 0,
            elapsed: 0.0,
            tilt_enabled: true,
            termination: None,
            exited: false,
            rng,
            events: Vec::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == RoundPhase::Playing && !self.exited
    }

    /// Number of active obstacle members (always even)
    pub fn obstacle_count(&self) -> usize {
        self.spawner.obstacle_count()
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events queued since the last drain, oldest first
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Playing -> GameOver
    pub(crate) fn end(&mut self, cause: Termination) {
        self.phase = RoundPhase::GameOver;
        self.termination = Some(cause);
        log::info!(
            "Round {} over: score {} ({:?})",
            self.round_number,
            self.score,
            cause
        );
        self.emit(GameEvent::RoundEnded {
            round: self.round_number,
            score: self.score,
            cause,
        });
    }

    /// Reset everything in place and return to Ready
    pub(crate) fn restart(&mut self) {
        self.player.reset(self.viewport.half_height());
        self.spawner.reset();
        self.score = 0;
        self.time_ticks = 0;
        self.elapsed = 0.0;
        self.termination = None;
        self.phase = RoundPhase::Ready;
        self.round_number += 1;
        log::info!("Round {} ready", self.round_number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Edge;

    fn round() -> Round {
        Round::new(Config::default(), Viewport::default(), Vec2::new(50.0, 50.0), 42)
    }

    #[test]
    fn test_new_round_is_ready() {
        let round = round();
        assert_eq!(round.phase, RoundPhase::Ready);
        assert_eq!(round.seed, 42);
        assert_eq!(round.score, 0);
        assert_eq!(round.round_number, 1);
        assert_eq!(round.obstacle_count(), 0);
        assert_eq!(round.player.pos, Vec2::new(250.0, 360.0));
        assert_eq!(round.player.vel_y, 0.0);
    }

    #[test]
    fn test_end_emits_once_and_records_cause() {
        let mut round = round();
        round.phase = RoundPhase::Playing;
        round.score = 2;
        round.end(Termination::OutOfBounds(Edge::Floor));

        assert_eq!(round.phase, RoundPhase::GameOver);
        let events: Vec<_> = round.drain_events().collect();
        assert_eq!(
            events,
            vec![GameEvent::RoundEnded {
                round: 1,
                score: 2,
                cause: Termination::OutOfBounds(Edge::Floor)
            }]
        );
        assert_eq!(round.drain_events().count(), 0);
    }

    #[test]
    fn test_restart_resets_in_place() {
        let mut round = round();
        round.phase = RoundPhase::GameOver;
        round.score = 9;
        round.player.pos.y = -40.0;
        round.player.vel_y = -12.0;
        round.time_ticks = 500;
        round.termination = Some(Termination::OutOfBounds(Edge::Floor));
        let config = round.config;
        let viewport = round.viewport;
        round.spawner.spawn(&config, &viewport, &mut round.rng);

        round.restart();
        assert_eq!(round.phase, RoundPhase::Ready);
        assert_eq!(round.score, 0);
        assert_eq!(round.obstacle_count(), 0);
        assert_eq!(round.player.pos.y, 360.0);
        assert_eq!(round.player.vel_y, 0.0);
        assert_eq!(round.time_ticks, 0);
        assert_eq!(round.termination, None);
        assert_eq!(round.round_number, 2);
    }
}
