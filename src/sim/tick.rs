//! Per-frame simulation tick
//!
//! One tick per rendered frame: take at most one command, advance the roll,
//! then evaluate the floor under the block.

use super::state::{GameEvent, GamePhase, GameState};
use super::support::{Outcome, evaluate};
use super::roll::Command;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Roll request, if a key was pressed this frame
    pub command: Option<Command>,
    /// Rebuild the level from scratch
    pub restart: bool,
}

impl TickInput {
    pub fn command(command: Command) -> Self {
        Self {
            command: Some(command),
            restart: false,
        }
    }
}

/// Advance the session by one frame
///
/// Once the session is won or lost this does nothing but return the final
/// outcome; the host decides whether to restart.
pub fn tick(state: &mut GameState, input: &TickInput) -> Outcome {
    if input.restart {
        state.restart();
    }

    if state.is_over() {
        return state.outcome();
    }

    state.time_ticks += 1;

    if let Some(command) = input.command {
        if state.roll.command(&state.block, command) {
            state.events.push(GameEvent::RollStarted(command));
        } else {
            state.events.push(GameEvent::CommandDropped(command));
        }
    }

    if let Some(finished) = state.roll.advance(&mut state.block) {
        state.moves += 1;
        state.events.push(GameEvent::RollFinished {
            command: finished.command,
            posture: finished.posture,
        });
    }

    let resting = !state.roll.is_rolling();
    let tolerance = state.settings().tolerance_milli();
    let goal = state.goal();
    let eval = evaluate(&state.block, &mut state.registry, goal, tolerance, resting);

    for (switch, bridge) in eval.activated {
        state.events.push(GameEvent::BridgeActivated { switch, bridge });
    }

    match eval.outcome {
        Outcome::Continue => {}
        Outcome::Win => {
            state.phase = GamePhase::Won;
            state.events.push(GameEvent::Won);
            log::info!("Goal reached in {} moves ({} ticks)", state.moves, state.time_ticks);
        }
        Outcome::Loss(cause) => {
            state.phase = GamePhase::Lost(cause);
            state.events.push(GameEvent::Lost(cause));
            log::info!("Lost ({:?}) at {:?} after {} moves", cause, state.block.center(), state.moves);
        }
    }

    eval.outcome
}
