//! Flappy Arcade entry point
//!
//! Runs a headless demo: the autopilot plays a number of rounds at a fixed
//! 60 Hz step, finished rounds go to the score log, and the leaderboard is
//! printed at the end.

use std::path::PathBuf;

use clap::Parser;

use flappy_arcade::autopilot::Autopilot;
use flappy_arcade::game::{Frame, Presenter};
use flappy_arcade::highscores::{HighScores, format_age};
use flappy_arcade::persistence::{RecordSink, ScoreLog, ScoreRecord};
use flappy_arcade::sim::{GameEvent, RoundInput, RoundPhase, Termination};
use flappy_arcade::{Capabilities, Difficulty, Flow, Game, Settings};

/// Fixed simulation step
const DT: f32 = 1.0 / 60.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Flappy Arcade demo", long_about = None)]
struct Args {
    /// Settings JSON (written with defaults if missing)
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,
    /// JSON-lines score log
    #[arg(long, default_value = "scores.jsonl")]
    scores: PathBuf,
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Rounds to play before navigating away
    #[arg(long, default_value_t = 3)]
    rounds: u32,
    /// Hands off the controls after this many seconds in a round
    #[arg(long, default_value_t = 60.0)]
    max_seconds: f32,
    #[arg(long)]
    no_particles: bool,
    #[arg(long)]
    no_persistence: bool,
    #[arg(long)]
    no_animation: bool,
}

impl Args {
    fn capabilities(&self) -> Capabilities {
        Capabilities {
            animation: !self.no_animation,
            persistence: !self.no_persistence,
            particles: !self.no_particles,
        }
    }
}

/// Logs round milestones as they happen, ranking finished rounds
/// against the leaderboard loaded at startup
struct EventLog {
    pairs_on_screen: usize,
    board: HighScores,
    player_name: String,
    difficulty: Difficulty,
}

impl EventLog {
    fn new(board: HighScores, settings: &Settings) -> Self {
        Self {
            pairs_on_screen: 0,
            board,
            player_name: settings.player_name.clone(),
            difficulty: settings.difficulty,
        }
    }

    fn rank_round(&mut self, score: u32) {
        match self.board.potential_rank(score) {
            Some(rank) => log::info!("{} points ranks #{} on the leaderboard", score, rank),
            None => log::info!("{} points does not make the leaderboard", score),
        }
        self.board.add_score(ScoreRecord {
            player_name: self.player_name.clone(),
            score,
            difficulty: self.difficulty,
            timestamp: chrono::Utc::now().timestamp(),
        });
    }
}

impl Presenter for EventLog {
    fn on_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::PairCleared { score, .. } => log::debug!("Score {}", score),
            GameEvent::RoundEnded {
                round,
                score,
                cause,
            } => {
                let why = match cause {
                    Termination::OutOfBounds(edge) => format!("left the screen ({:?})", edge),
                    Termination::Obstacle { pair_id, side } => {
                        format!("hit pair {} ({:?})", pair_id, side)
                    }
                };
                log::info!(
                    "Round {} over with {} points: {} ({} pairs on screen)",
                    round,
                    score,
                    why,
                    self.pairs_on_screen
                );
                self.rank_round(score);
            }
            _ => {}
        }
    }

    fn present(&mut self, frame: &Frame<'_>) {
        self.pairs_on_screen = frame.pairs.len();
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Flappy Arcade (headless) starting...");

    let settings = Settings::load(&args.settings);
    if !args.settings.exists() {
        if let Err(e) = settings.save(&args.settings) {
            log::warn!("Could not write default settings: {}", e);
        }
    }

    let seed = args
        .seed
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis().unsigned_abs());
    log::info!("Seed: {}", seed);

    let score_log = ScoreLog::new(&args.scores);
    let sink: Box<dyn RecordSink> = Box::new(score_log.clone());
    let mut game = Game::from_settings(&settings, args.capabilities(), Some(sink), seed);
    let board = HighScores::from_records(score_log.read_all());
    game.attach(Box::new(EventLog::new(board, &settings)));

    let pilot = Autopilot::new();
    let mut played = 0u32;
    loop {
        let input = match game.round().phase {
            RoundPhase::GameOver => {
                played += 1;
                if played >= args.rounds {
                    Some(RoundInput::NavigateAway)
                } else {
                    Some(RoundInput::Restart)
                }
            }
            // Let the player fall once the round has run long enough
            RoundPhase::Playing if game.round().elapsed >= args.max_seconds => None,
            _ => pilot.decide(&game.frame(DT)),
        };
        if let Some(input) = input {
            if game.input(input) == Flow::ExitToMenu {
                break;
            }
        }
        if game.advance(DT) == Flow::ExitToMenu {
            break;
        }
    }
    log::info!("Back to menu after {} rounds", played);

    match score_log.best_for(&settings.player_name) {
        Some(best) => println!("Best score for {}: {}", settings.player_name, best),
        None => println!("No scores recorded for {}", settings.player_name),
    }

    let board = HighScores::from_records(score_log.read_all());
    if !board.is_empty() {
        let now = chrono::Utc::now();
        println!("High scores:");
        for (rank, entry) in board.entries.iter().enumerate() {
            println!(
                "{:>2}. {:<12} {:>4}  {:<6}  {}",
                rank + 1,
                entry.player_name,
                entry.score,
                entry.difficulty.as_str(),
                format_age(entry.timestamp, now)
            );
        }
    }
}
