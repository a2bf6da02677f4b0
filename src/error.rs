//! Configuration errors
//!
//! Gameplay results (win/loss) are never errors; they come back from the
//! simulation as `Outcome` values. Everything here means the level or
//! settings document itself is unusable.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{what} has a non-finite coordinate")]
    NonFiniteCoordinate { what: String },
    #[error("{what} lies outside the playing field (|x|, |z| <= {limit})")]
    CoordinateOutOfRange { what: String, limit: f32 },
    #[error("two {kind} tiles share position ({x}, {z})")]
    DuplicateTile { kind: &'static str, x: f32, z: f32 },
    #[error("tile name {name:?} is used more than once")]
    DuplicateName { name: String },
    #[error("bridge at ({x}, {z}) does not name a switch")]
    MissingSwitchLink { x: f32, z: f32 },
    #[error("bridge refers to unknown switch {name:?}")]
    UnknownSwitch { name: String },
    #[error("bridge refers to {name:?}, which is not a switch")]
    NotASwitch { name: String },
    #[error("switch {name:?} is not linked to any bridge")]
    SwitchWithoutBridge { name: String },
    #[error("switch {name:?} is linked to more than one bridge")]
    SwitchLinkedTwice { name: String },
    #[error("roll increment of {degrees} degrees must be positive and divide 90")]
    InvalidRollIncrement { degrees: i32 },
    #[error("support tolerance {tolerance} must be finite and positive")]
    InvalidTolerance { tolerance: f32 },
}
