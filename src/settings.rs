//! Simulation tuning and key bindings
//!
//! Stored as a small JSON document next to the levels. Missing fields fall
//! back to the defaults, so a settings file only needs what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEGREES_PER_TICK, QUARTER_TURN, SUPPORT_TOLERANCE};
use crate::error::ConfigError;
use crate::sim::Command;
use crate::units_to_milli;

/// Characters that issue roll commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: char,
    pub right: char,
    pub forward: char,
    pub backward: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left: 'a',
            right: 'd',
            forward: 'w',
            backward: 's',
        }
    }
}

impl KeyBindings {
    /// Map a typed character to a roll command (case-insensitive)
    pub fn command_for(&self, key: char) -> Option<Command> {
        let key = key.to_ascii_lowercase();
        if key == self.left.to_ascii_lowercase() {
            Some(Command::Left)
        } else if key == self.right.to_ascii_lowercase() {
            Some(Command::Right)
        } else if key == self.forward.to_ascii_lowercase() {
            Some(Command::Forward)
        } else if key == self.backward.to_ascii_lowercase() {
            Some(Command::Backward)
        } else {
            None
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Degrees turned per tick while rolling; must divide 90
    pub degrees_per_tick: i32,
    /// Per-axis proximity window for tile contact (world units, exclusive)
    pub support_tolerance: f32,
    pub keys: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            degrees_per_tick: DEGREES_PER_TICK,
            support_tolerance: SUPPORT_TOLERANCE,
            keys: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `path` if given, falling back to defaults on any problem
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let degrees = self.degrees_per_tick;
        if degrees <= 0 || QUARTER_TURN % degrees != 0 {
            return Err(ConfigError::InvalidRollIncrement { degrees });
        }
        // Must survive the conversion to a non-zero milli-unit window
        if units_to_milli(self.support_tolerance).is_none_or(|milli| milli <= 0) {
            return Err(ConfigError::InvalidTolerance {
                tolerance: self.support_tolerance,
            });
        }
        Ok(())
    }

    /// Number of ticks a single roll takes
    pub fn ticks_per_roll(&self) -> i32 {
        QUARTER_TURN / self.degrees_per_tick
    }

    /// Support tolerance in milli-units; zero unless `validate()` passed
    pub fn tolerance_milli(&self) -> i32 {
        units_to_milli(self.support_tolerance).unwrap_or(0)
    }
}
