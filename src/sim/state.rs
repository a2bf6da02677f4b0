//! Session state
//!
//! Everything a running puzzle needs lives here: the floor, the block, the
//! roll engine and the phase. A restart rebuilds all of it from the level.

use glam::IVec2;

use super::block::{Block, Posture};
use super::roll::{Command, RollEngine};
use super::support::{LossCause, Outcome};
use super::tile::{TileId, TileRegistry};
use crate::level::Level;
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Won,
    Lost(LossCause),
}

impl GamePhase {
    pub fn outcome(self) -> Outcome {
        match self {
            GamePhase::Playing => Outcome::Continue,
            GamePhase::Won => Outcome::Win,
            GamePhase::Lost(cause) => Outcome::Loss(cause),
        }
    }
}

/// Things that happened during a tick, for the host to present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RollStarted(Command),
    /// A command arrived mid-roll and was discarded
    CommandDropped(Command),
    RollFinished { command: Command, posture: Posture },
    BridgeActivated { switch: TileId, bridge: TileId },
    Won,
    Lost(LossCause),
    Restarted,
}

#[derive(Debug, Clone)]
pub struct GameState {
    level: Level,
    settings: Settings,
    pub registry: TileRegistry,
    pub block: Block,
    pub roll: RollEngine,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Completed rolls
    pub moves: u32,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session. `settings` is expected to have passed `validate()`.
    pub fn new(level: Level, settings: Settings) -> Self {
        let registry = level.registry();
        let block = level.spawn_block();
        let roll = RollEngine::new(settings.degrees_per_tick);
        Self {
            level,
            settings,
            registry,
            block,
            roll,
            phase: GamePhase::Playing,
            time_ticks: 0,
            moves: 0,
            events: Vec::new(),
        }
    }

    /// Put the level back to its initial layout
    pub fn restart(&mut self) {
        self.registry = self.level.registry();
        self.block = self.level.spawn_block();
        self.roll = RollEngine::new(self.settings.degrees_per_tick);
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.moves = 0;
        self.events.clear();
        self.events.push(GameEvent::Restarted);
        log::info!("Level {:?} restarted", self.level.name);
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn goal(&self) -> IVec2 {
        self.level.goal
    }

    pub fn outcome(&self) -> Outcome {
        self.phase.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_playing() {
        let state = GameState::new(Level::demo().unwrap(), Settings::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.outcome(), Outcome::Continue);
        assert!(!state.roll.is_rolling());
        assert_eq!(state.block.ground_point(), IVec2::ZERO);
        assert_eq!(state.goal(), IVec2::new(3000, 0));
    }

    #[test]
    fn test_restart_lowers_bridges() {
        let mut state = GameState::new(Level::demo().unwrap(), Settings::default());
        let (switch, _) = state
            .registry
            .iter()
            .find(|(_, t)| matches!(t.kind, crate::sim::TileKind::Switch { .. }))
            .unwrap();
        let bridge = state.registry.activate_bridge(switch).unwrap();
        state.phase = GamePhase::Lost(LossCause::Unsupported);

        state.restart();
        assert!(!state.registry.get(bridge).unwrap().active);
        assert_eq!(state.registry.get(switch).unwrap().y_offset, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted]);
        assert!(state.events.is_empty());
    }
}
