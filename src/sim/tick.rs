//! Round state machine: input handling and the per-frame tick
//!
//! Ready -> Playing -> GameOver -> (restart) Ready. Anything not listed in
//! `apply_input` is ignored.

use super::collision::{self, Termination};
use super::state::{GameEvent, Round, RoundPhase};

/// Named inputs delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundInput {
    /// Generic "begin" (any key / click on the ready screen)
    Start,
    /// Flap (space, up, primary click)
    Jump,
    /// Play again from the game-over screen
    Restart,
    /// Leave for the menu from the game-over screen
    NavigateAway,
}

/// Apply one input. Returns false when the input has no effect in the current phase.
pub fn apply_input(round: &mut Round, input: RoundInput) -> bool {
    if round.exited {
        return false;
    }

    match (round.phase, input) {
        // The first input only starts the round; it does not flap
        (RoundPhase::Ready, RoundInput::Start | RoundInput::Jump) => {
            round.phase = RoundPhase::Playing;
            log::info!("Round {} started", round.round_number);
            round.emit(GameEvent::RoundStarted {
                round: round.round_number,
            });
        }
        (RoundPhase::Playing, RoundInput::Jump) => {
            round.player.jump(round.config.jump_impulse);
            round.emit(GameEvent::Jumped {
                y: round.player.pos.y,
            });
        }
        (RoundPhase::GameOver, RoundInput::Restart) => {
            round.restart();
            round.emit(GameEvent::Restarted {
                round: round.round_number,
            });
        }
        (RoundPhase::GameOver, RoundInput::NavigateAway) => {
            round.exited = true;
            log::info!("Leaving round {} for the menu", round.round_number);
            round.emit(GameEvent::Exited {
                round: round.round_number,
            });
        }
        _ => return false,
    }
    true
}

/// Advance the round by one tick of `dt` seconds.
///
/// Motion is per tick (gravity and scroll are per-tick quantities); `dt`
/// drives the spawn clock and tilt easing only. Nothing moves outside Playing.
pub fn advance(round: &mut Round, dt: f32) {
    if !round.is_playing() {
        return;
    }

    round.time_ticks += 1;
    round.elapsed += dt;

    round.player.integrate(round.config.gravity);
    if round.tilt_enabled {
        round.player.update_tilt(dt);
    }

    // Leaving the screen ends the tick before anything else moves
    if let Some(edge) = collision::out_of_bounds(&round.player.bounds(), round.viewport.height) {
        round.end(Termination::OutOfBounds(edge));
        return;
    }

    round.spawner.scroll(round.config.scroll_speed);
    for pair in round.spawner.retire() {
        round.score += 1;
        let at = round.player.pos;
        round.emit(GameEvent::PairCleared {
            pair_id: pair.id,
            score: round.score,
            at,
        });
    }

    let due = round
        .spawner
        .tick_clock(dt, round.config.spawn_interval);
    for _ in 0..due {
        let pair = round
            .spawner
            .spawn(&round.config, &round.viewport, &mut round.rng);
        let event = GameEvent::PairSpawned {
            pair_id: pair.id,
            gap: pair.gap,
        };
        round.emit(event);
    }

    if let Some(cause) = collision::check(
        &round.player.bounds(),
        round.viewport.height,
        &round.spawner,
    ) {
        round.end(cause);
    }
}
