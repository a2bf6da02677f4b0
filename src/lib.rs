//! Roll Block - a rectangular block rolled across a floor of tiles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (roll kinematics, tile registry, hazards)
//! - `level`: Level documents and load-time validation
//! - `snapshot`: Read-only per-frame views for a renderer
//! - `settings`: Tuning and key bindings
//! - `error`: Configuration errors

pub mod error;
pub mod level;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use error::ConfigError;
pub use level::{Level, LevelConfig};
pub use settings::{KeyBindings, Settings};

/// Game configuration constants
///
/// Lengths are in milli-units (1 world unit = 1000), angles in whole degrees.
pub mod consts {
    /// Fixed-point scale for world coordinates
    pub const MILLI: i32 = 1000;

    /// Distance between neighbouring cell centres
    pub const GRID_STEP: i32 = 500;

    /// Travel per roll when the block passes through upright (standing <-> lying)
    pub const UPRIGHT_ROLL_STEP: i32 = GRID_STEP;
    /// Travel per roll when a lying block rolls sideways and stays flat
    pub const FLAT_ROLL_STEP: i32 = GRID_STEP * 3 / 2;

    /// Largest accepted level coordinate, in milli-units (100000 world units)
    pub const MAX_COORDINATE: i32 = 100_000 * MILLI;

    /// Floor tile dimensions
    pub const TILE_WIDTH: i32 = 500;
    pub const TILE_THICKNESS: i32 = 100;
    pub const TILE_DEPTH: i32 = 500;
    /// Tile centre height; top surface sits at -650
    pub const TILE_Y: i32 = -700;

    /// Block dimensions (standing: height is the long axis)
    pub const BLOCK_WIDTH: i32 = 500;
    pub const BLOCK_HEIGHT: i32 = 1000;
    pub const BLOCK_DEPTH: i32 = 500;

    /// Resting centre heights for the two postures
    pub const STANDING_Y: i32 = TILE_Y + TILE_THICKNESS / 2 + BLOCK_HEIGHT / 2;
    pub const LYING_Y: i32 = TILE_Y + TILE_THICKNESS / 2 + BLOCK_WIDTH / 2;

    /// Angular advance per frame while rolling
    pub const DEGREES_PER_TICK: i32 = 9;
    pub const QUARTER_TURN: i32 = 90;
    pub const FULL_TURN: i32 = 360;

    /// Per-axis proximity window for support and hazard checks (world units)
    pub const SUPPORT_TOLERANCE: f32 = 0.26;

    /// How far a switch sinks once it has fired
    pub const SWITCH_PRESS_DEPTH: i32 = 100;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: i32) -> i32 {
    angle.rem_euclid(consts::FULL_TURN)
}

/// Convert world units to milli-units, rounding to the nearest
///
/// Returns `None` for NaN, infinities and values outside the `i32` range.
#[inline]
pub fn units_to_milli(value: f32) -> Option<i32> {
    let scaled = (value as f64 * consts::MILLI as f64).round();
    if scaled.is_finite() && scaled >= i32::MIN as f64 && scaled <= i32::MAX as f64 {
        Some(scaled as i32)
    } else {
        None
    }
}

/// Convert milli-units back to world units
#[inline]
pub fn milli_to_units(value: i32) -> f32 {
    value as f32 / consts::MILLI as f32
}
