//! Level documents
//!
//! Levels are JSON. Bridges name the switch that raises them; names are
//! resolved to tile indices once here, so the simulation never compares
//! strings.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sim::{Block, Posture, Tile, TileId, TileKind, TileRegistry};
use crate::consts::MAX_COORDINATE;
use crate::{milli_to_units, units_to_milli};

const DEMO_LEVEL: &str = include_str!("../levels/demo.json");

/// Tile kind as written in a level file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKindSpec {
    Solid,
    Fragile,
    Switch,
    Bridge,
}

impl TileKindSpec {
    fn as_str(self) -> &'static str {
        match self {
            TileKindSpec::Solid => "solid",
            TileKindSpec::Fragile => "fragile",
            TileKindSpec::Switch => "switch",
            TileKindSpec::Bridge => "bridge",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSpec {
    pub x: f32,
    pub z: f32,
    pub kind: TileKindSpec,
    /// Identifier other tiles can refer to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// For bridges: the name of the switch that raises it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartSpec {
    pub x: f32,
    pub z: f32,
    #[serde(default)]
    pub posture: Posture,
}

/// Level as read from disk, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    #[serde(default)]
    pub name: String,
    pub goal: [f32; 2],
    pub start: StartSpec,
    pub tiles: Vec<TileSpec>,
}

/// A validated level, ready to start sessions from
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub name: String,
    pub goal: IVec2,
    pub start: IVec2,
    pub start_posture: Posture,
    tiles: Vec<Tile>,
}

fn point(what: impl FnOnce() -> String, x: f32, z: f32) -> Result<IVec2, ConfigError> {
    if !x.is_finite() || !z.is_finite() {
        return Err(ConfigError::NonFiniteCoordinate { what: what() });
    }
    match (units_to_milli(x), units_to_milli(z)) {
        (Some(x), Some(z)) if x.abs() <= MAX_COORDINATE && z.abs() <= MAX_COORDINATE => {
            Ok(IVec2::new(x, z))
        }
        _ => Err(ConfigError::CoordinateOutOfRange {
            what: what(),
            limit: milli_to_units(MAX_COORDINATE),
        }),
    }
}

impl LevelConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The level bundled with the crate
    pub fn demo() -> Result<Self, ConfigError> {
        Self::from_json(DEMO_LEVEL)
    }

    /// Check the document and resolve switch/bridge links
    pub fn validate(&self) -> Result<Level, ConfigError> {
        let goal = point(|| "goal".to_string(), self.goal[0], self.goal[1])?;
        let start = point(|| "start".to_string(), self.start.x, self.start.z)?;

        let mut positions = Vec::with_capacity(self.tiles.len());
        let mut seen = HashSet::new();
        let mut names = HashMap::new();
        for (i, spec) in self.tiles.iter().enumerate() {
            let pos = point(|| format!("tile {i}"), spec.x, spec.z)?;
            if !seen.insert((spec.kind, pos)) {
                return Err(ConfigError::DuplicateTile {
                    kind: spec.kind.as_str(),
                    x: spec.x,
                    z: spec.z,
                });
            }
            if let Some(name) = &spec.name {
                if names.insert(name.as_str(), i).is_some() {
                    return Err(ConfigError::DuplicateName { name: name.clone() });
                }
            }
            if spec.switch.is_some() && spec.kind != TileKindSpec::Bridge {
                log::warn!("Tile {} is a {} and ignores its switch link", i, spec.kind.as_str());
            }
            positions.push(pos);
        }

        // switch index -> bridge index, and back
        let mut links: HashMap<usize, usize> = HashMap::new();
        let mut owners: HashMap<usize, usize> = HashMap::new();
        for (i, spec) in self.tiles.iter().enumerate() {
            if spec.kind != TileKindSpec::Bridge {
                continue;
            }
            let name = spec.switch.as_ref().ok_or(ConfigError::MissingSwitchLink {
                x: spec.x,
                z: spec.z,
            })?;
            let &switch = names
                .get(name.as_str())
                .ok_or_else(|| ConfigError::UnknownSwitch { name: name.clone() })?;
            if self.tiles[switch].kind != TileKindSpec::Switch {
                return Err(ConfigError::NotASwitch { name: name.clone() });
            }
            if links.insert(switch, i).is_some() {
                return Err(ConfigError::SwitchLinkedTwice { name: name.clone() });
            }
            owners.insert(i, switch);
        }

        let mut tiles = Vec::with_capacity(self.tiles.len());
        for (i, spec) in self.tiles.iter().enumerate() {
            let kind = match spec.kind {
                TileKindSpec::Solid => TileKind::Solid,
                TileKindSpec::Fragile => TileKind::Fragile,
                TileKindSpec::Switch => {
                    let bridge = links.get(&i).ok_or_else(|| ConfigError::SwitchWithoutBridge {
                        name: spec.name.clone().unwrap_or_else(|| format!("tile {i}")),
                    })?;
                    TileKind::Switch {
                        bridge: TileId(*bridge as u32),
                    }
                }
                TileKindSpec::Bridge => {
                    let switch = owners
                        .get(&i)
                        .ok_or(ConfigError::MissingSwitchLink { x: spec.x, z: spec.z })?;
                    TileKind::Bridge {
                        switch: TileId(*switch as u32),
                    }
                }
            };
            tiles.push(Tile::new(positions[i], kind));
        }

        log::info!("Level {:?}: {} tiles, goal {:?}", self.name, tiles.len(), goal);

        Ok(Level {
            name: self.name.clone(),
            goal,
            start,
            start_posture: self.start.posture,
            tiles,
        })
    }
}

impl Level {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        LevelConfig::from_json(json)?.validate()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        LevelConfig::load(path)?.validate()
    }

    pub fn demo() -> Result<Self, ConfigError> {
        LevelConfig::demo()?.validate()
    }

    /// Fresh registry with every bridge lowered
    pub fn registry(&self) -> TileRegistry {
        TileRegistry::new(self.tiles.clone())
    }

    /// Block at the start position
    pub fn spawn_block(&self) -> Block {
        Block::new(self.start.x, self.start.y, self.start_posture)
    }
}
