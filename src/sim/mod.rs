//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Integer positions and angles only
//! - Stable iteration order (by tile index)
//! - No rendering or platform dependencies

pub mod block;
pub mod roll;
pub mod state;
pub mod support;
pub mod tick;
pub mod tile;

pub use block::{Axis, Block, Orientation, Posture};
pub use roll::{Command, RollEngine, RollFinished, RollState, next_posture, roll_distance};
pub use state::{GameEvent, GamePhase, GameState};
pub use support::{Evaluation, LossCause, Outcome, evaluate};
pub use tick::{TickInput, tick};
pub use tile::{Tile, TileId, TileKind, TileRegistry};
