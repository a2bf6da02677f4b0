//! Roll Block entry point
//!
//! Headless driver: loads a level, plays a string of key presses through the
//! simulation and reports how the session ended.
//!
//! Usage: `roll-block [LEVEL.json|-] [MOVES] [SETTINGS.json]`
//!
//! `-` (or no level) selects the bundled demo. Moves use the configured key
//! bindings (default `a`/`d`/`w`/`s`); `q` stops early.

use std::path::Path;
use std::process::ExitCode;

use roll_block::sim::{GameEvent, GameState, Outcome, TickInput, tick};
use roll_block::{ConfigError, Level, Settings};

fn load_level(arg: Option<&str>) -> Result<Level, ConfigError> {
    match arg {
        None | Some("-") => Level::demo(),
        Some(path) => Level::load(Path::new(path)),
    }
}

/// Feed one command and tick until the roll lands or the session ends
fn play(state: &mut GameState, input: TickInput) -> Outcome {
    let mut outcome = tick(state, &input);
    while state.roll.is_rolling() && !outcome.is_terminal() {
        outcome = tick(state, &TickInput::default());
    }
    for event in state.drain_events() {
        match event {
            GameEvent::RollFinished { command, posture } => {
                log::debug!("{:?} -> {:?} at {:?}", command, posture, state.block.position());
            }
            GameEvent::BridgeActivated { bridge, .. } => println!("A bridge rises ({:?})", bridge),
            _ => {}
        }
    }
    outcome
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let settings = match args.get(2) {
        Some(path) => match Settings::load(Path::new(path)) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Invalid settings: {e}");
                return ExitCode::from(2);
            }
        },
        None => Settings::load_or_default(None),
    };

    let level = match load_level(args.first().map(String::as_str)) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Could not load level: {e}");
            return ExitCode::from(2);
        }
    };
    log::info!("Roll Block starting level {:?}", level.name);

    let keys = settings.keys;
    let mut state = GameState::new(level, settings);
    let mut outcome = Outcome::Continue;

    for key in args.get(1).map(String::as_str).unwrap_or("").chars() {
        if key.eq_ignore_ascii_case(&'q') {
            break;
        }
        let Some(command) = keys.command_for(key) else {
            log::warn!("Ignoring key {:?}", key);
            continue;
        };
        outcome = play(&mut state, TickInput::command(command));
        if outcome.is_terminal() {
            break;
        }
    }

    match outcome {
        Outcome::Win => {
            println!("You've won ({} moves)", state.moves);
            ExitCode::SUCCESS
        }
        Outcome::Loss(cause) => {
            println!("GAME OVER ({:?})", cause);
            ExitCode::from(1)
        }
        Outcome::Continue => {
            let p = state.block.position();
            println!("Still playing at ({}, {}) after {} moves", p.x, p.z, state.moves);
            ExitCode::from(1)
        }
    }
}
