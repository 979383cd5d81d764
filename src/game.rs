//! One round plus the collaborators its capabilities select
//!
//! Every game variant runs the same `sim` state machine. What differs is
//! composed around it: tilt animation, the score bridge, particle bursts.
//! The presentation loop calls `advance` once per rendered frame and
//! forwards named inputs to `input`.

use std::collections::VecDeque;

use glam::Vec2;

use crate::fx::{Backdrop, ParticleField};
use crate::persistence::{RecordSink, ScoreBridge};
use crate::settings::{Settings, Skin};
use crate::sim::{
    Config, GameEvent, Obstacle, ObstaclePair, Player, Round, RoundInput, RoundPhase, Viewport,
    advance, apply_input,
};

/// Optional features of a game variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Ease the player's tilt every tick
    pub animation: bool,
    /// Report finished rounds to the record sink
    pub persistence: bool,
    /// Particle bursts on cleared pairs
    pub particles: bool,
}

impl Capabilities {
    pub const ALL: Self = Self {
        animation: true,
        persistence: true,
        particles: true,
    };

    /// Bare variant: no animation, nothing stored, no particles
    pub const BASE: Self = Self {
        animation: false,
        persistence: false,
        particles: false,
    };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::ALL
    }
}

/// Read-only snapshot handed to presenters once per tick
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub dt: f32,
    pub phase: RoundPhase,
    pub score: u32,
    pub round_number: u32,
    pub config: Config,
    pub player: &'a Player,
    pub pairs: &'a VecDeque<ObstaclePair>,
    pub viewport: Viewport,
}

impl<'a> Frame<'a> {
    fn of(round: &'a Round, dt: f32) -> Self {
        Self {
            dt,
            phase: round.phase,
            score: round.score,
            round_number: round.round_number,
            config: round.config,
            player: &round.player,
            pairs: &round.spawner.pairs,
            viewport: round.viewport,
        }
    }

    /// Every obstacle member, oldest pair first
    pub fn obstacles(&self) -> impl Iterator<Item = Obstacle> + 'a {
        self.pairs.iter().flat_map(|pair| pair.members())
    }
}

/// Presentation collaborator: renderer, audio cues, effects.
///
/// The core never depends on what a presenter does with what it receives.
pub trait Presenter {
    /// Discrete cue (jump, pair cleared, round ended, ...)
    fn on_event(&mut self, _event: &GameEvent) {}

    /// Called once per tick after the simulation step
    fn present(&mut self, _frame: &Frame<'_>) {}
}

/// What the caller should do after an input or tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Player navigated away; hand control back to the menu
    ExitToMenu,
}

/// A playable game: the round state machine plus composed collaborators
pub struct Game {
    round: Round,
    capabilities: Capabilities,
    bridge: ScoreBridge,
    particles: Option<ParticleField>,
    backdrop: Backdrop,
    presenters: Vec<Box<dyn Presenter>>,
}

impl Game {
    pub fn new(
        config: Config,
        viewport: Viewport,
        player_size: Vec2,
        player_name: &str,
        capabilities: Capabilities,
        sink: Option<Box<dyn RecordSink>>,
        seed: u64,
    ) -> Self {
        let mut round = Round::new(config, viewport, player_size, seed);
        round.tilt_enabled = capabilities.animation;

        let bridge = match sink {
            Some(sink) if capabilities.persistence => {
                ScoreBridge::new(player_name, config.difficulty, sink)
            }
            _ => ScoreBridge::disabled(player_name, config.difficulty),
        };

        Self {
            round,
            capabilities,
            bridge,
            particles: capabilities.particles.then(ParticleField::new),
            backdrop: Backdrop::new(),
            presenters: Vec::new(),
        }
    }

    /// Resolve config, hitbox and identity from the settings record
    pub fn from_settings(
        settings: &Settings,
        capabilities: Capabilities,
        sink: Option<Box<dyn RecordSink>>,
        seed: u64,
    ) -> Self {
        Self::with_skin(
            Config::for_difficulty(settings.difficulty),
            Viewport::default(),
            settings.skin,
            &settings.player_name,
            capabilities,
            sink,
            seed,
        )
    }

    fn with_skin(
        config: Config,
        viewport: Viewport,
        skin: Skin,
        player_name: &str,
        capabilities: Capabilities,
        sink: Option<Box<dyn RecordSink>>,
        seed: u64,
    ) -> Self {
        log::info!(
            "New game: {} as {} on {}",
            player_name,
            skin.as_str(),
            config.difficulty.as_str()
        );
        Self::new(
            config,
            viewport,
            skin.hitbox(),
            player_name,
            capabilities,
            sink,
            seed,
        )
    }

    /// Add a presentation subscriber
    pub fn attach(&mut self, presenter: Box<dyn Presenter>) {
        self.presenters.push(presenter);
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Direct access for tools and tests
    pub fn round_mut(&mut self) -> &mut Round {
        &mut self.round
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn particles(&self) -> Option<&ParticleField> {
        self.particles.as_ref()
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn frame(&self, dt: f32) -> Frame<'_> {
        Frame::of(&self.round, dt)
    }

    /// Deliver a named input to the round
    pub fn input(&mut self, input: RoundInput) -> Flow {
        apply_input(&mut self.round, input);
        self.dispatch();
        self.flow()
    }

    /// One simulation tick, then events and the frame snapshot go out
    pub fn advance(&mut self, dt: f32) -> Flow {
        advance(&mut self.round, dt);
        self.dispatch();

        let frame = Frame::of(&self.round, dt);
        if let Some(particles) = self.particles.as_mut() {
            particles.present(&frame);
        }
        self.backdrop.present(&frame);
        for presenter in &mut self.presenters {
            presenter.present(&frame);
        }
        self.flow()
    }

    fn flow(&self) -> Flow {
        if self.round.exited {
            Flow::ExitToMenu
        } else {
            Flow::Continue
        }
    }

    fn dispatch(&mut self) {
        let events: Vec<GameEvent> = self.round.drain_events().collect();
        for event in &events {
            if let GameEvent::RoundEnded { round, score, .. } = *event {
                self.bridge.round_ended(round, score);
            }
            if let Some(particles) = self.particles.as_mut() {
                particles.on_event(event);
            }
            self.backdrop.on_event(event);
            for presenter in &mut self.presenters {
                presenter.on_event(event);
            }
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("round", &self.round)
            .field("capabilities", &self.capabilities)
            .field("bridge", &self.bridge)
            .field("presenters", &self.presenters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::ScoreRecord;
    use crate::settings::Difficulty;
    use std::cell::RefCell;
    use std::rc::Rc;

    const DT: f32 = 1.0 / 60.0;

    /// Records everything it is sent
    #[derive(Default)]
    struct Recorder {
        events: Vec<GameEvent>,
        frames: usize,
        last_obstacles: usize,
    }

    impl Presenter for Rc<RefCell<Recorder>> {
        fn on_event(&mut self, event: &GameEvent) {
            self.borrow_mut().events.push(*event);
        }

        fn present(&mut self, frame: &Frame<'_>) {
            let mut rec = self.borrow_mut();
            rec.frames += 1;
            rec.last_obstacles = frame.obstacles().count();
        }
    }

    fn settings(difficulty: Difficulty) -> Settings {
        Settings {
            difficulty,
            player_name: "Ann".to_string(),
            ..Settings::default()
        }
    }

    fn crash(game: &mut Game) {
        game.round_mut().player.pos.y = -1000.0;
        game.advance(DT);
        assert_eq!(game.round().phase, RoundPhase::GameOver);
    }

    #[test]
    fn test_from_settings() {
        let game = Game::from_settings(
            &Settings {
                skin: Skin::Bird,
                ..settings(Difficulty::Hard)
            },
            Capabilities::ALL,
            None,
            1,
        );
        let round = game.round();
        assert_eq!(round.config, Config::for_difficulty(Difficulty::Hard));
        assert_eq!(round.player.size, Skin::Bird.hitbox());
        assert_eq!(round.phase, RoundPhase::Ready);
        assert!(game.particles().is_some());
    }

    #[test]
    fn test_one_record_per_round() {
        let records = Rc::new(RefCell::new(Vec::<ScoreRecord>::new()));
        let mut game = Game::from_settings(
            &settings(Difficulty::Easy),
            Capabilities::ALL,
            Some(Box::new(records.clone())),
            5,
        );

        game.input(RoundInput::Start);
        crash(&mut game);
        // Frozen ticks after the end do not report again
        game.advance(DT);
        game.advance(DT);
        assert_eq!(records.borrow().len(), 1);
        assert_eq!(records.borrow()[0].player_name, "Ann");
        assert_eq!(records.borrow()[0].difficulty, Difficulty::Easy);
        assert_eq!(records.borrow()[0].score, 0);

        assert_eq!(game.input(RoundInput::Restart), Flow::Continue);
        game.input(RoundInput::Jump);
        crash(&mut game);
        assert_eq!(records.borrow().len(), 2);
    }

    #[test]
    fn test_base_capabilities() {
        let records = Rc::new(RefCell::new(Vec::<ScoreRecord>::new()));
        let mut game = Game::from_settings(
            &settings(Difficulty::Medium),
            Capabilities::BASE,
            Some(Box::new(records.clone())),
            5,
        );
        assert!(game.particles().is_none());

        game.input(RoundInput::Start);
        game.advance(DT);
        assert_eq!(game.round().player.angle, 0.0);
        crash(&mut game);
        assert!(records.borrow().is_empty());
    }

    #[test]
    fn test_presenters_receive_events_and_frames() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut game = Game::from_settings(&settings(Difficulty::Medium), Capabilities::ALL, None, 9);
        game.attach(Box::new(recorder.clone()));

        game.advance(DT);
        game.input(RoundInput::Start);
        game.input(RoundInput::Jump);
        game.advance(1.9);

        let rec = recorder.borrow();
        assert_eq!(rec.frames, 2);
        assert_eq!(rec.last_obstacles, 2);
        assert!(matches!(rec.events[0], GameEvent::RoundStarted { round: 1 }));
        assert!(matches!(rec.events[1], GameEvent::Jumped { .. }));
        assert!(matches!(rec.events[2], GameEvent::PairSpawned { pair_id: 0, .. }));
    }

    #[test]
    fn test_pair_cleared_reaches_effects() {
        let mut game = Game::from_settings(&settings(Difficulty::Medium), Capabilities::ALL, None, 2);
        game.input(RoundInput::Start);
        game.advance(1.9);
        // Push the pair just past the left edge on the next scroll
        let round = game.round_mut();
        round.spawner.pairs[0].x = -45.0 + round.config.scroll_speed - 0.1;
        round.player.vel_y = round.config.gravity;
        game.advance(DT);

        assert_eq!(game.round().score, 1);
        assert_eq!(game.round().obstacle_count(), 0);
        let particles = game.particles().map(|p| p.particles.len());
        assert_eq!(particles, Some(crate::fx::BURST_COUNT as usize));
    }

    #[test]
    fn test_navigate_away_exits() {
        let mut game = Game::from_settings(&settings(Difficulty::Medium), Capabilities::ALL, None, 3);
        assert_eq!(game.input(RoundInput::NavigateAway), Flow::Continue);
        game.input(RoundInput::Start);
        crash(&mut game);
        assert_eq!(game.input(RoundInput::NavigateAway), Flow::ExitToMenu);
        assert_eq!(game.advance(DT), Flow::ExitToMenu);
    }
}
