//! Floor tiles and the registry that owns them
//!
//! Tiles are laid out once at level load. After that only two things ever
//! change: a bridge's `active` flag and a switch's press depth.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::SWITCH_PRESS_DEPTH;

/// Index of a tile inside its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tile behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Solid,
    /// Contact ends the session
    Fragile,
    /// Fires its bridge the first time the block touches it
    Switch { bridge: TileId },
    /// Supports the block only once its switch has fired
    Bridge { switch: TileId },
}

impl TileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Solid => "solid",
            TileKind::Fragile => "fragile",
            TileKind::Switch { .. } => "switch",
            TileKind::Bridge { .. } => "bridge",
        }
    }
}

/// One floor cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Cell centre (x, z) in milli-units
    pub position: IVec2,
    pub kind: TileKind,
    pub active: bool,
    /// Visual press depth (milli-units, <= 0)
    pub y_offset: i32,
}

impl Tile {
    pub fn new(position: IVec2, kind: TileKind) -> Self {
        Self {
            position,
            kind,
            active: !matches!(kind, TileKind::Bridge { .. }),
            y_offset: 0,
        }
    }

    /// Strict per-axis proximity: both |dx| and |dz| below `radius`
    #[inline]
    pub fn is_near(&self, point: IVec2, radius: i32) -> bool {
        let Ok(radius) = u32::try_from(radius) else {
            return false;
        };
        self.position.x.abs_diff(point.x) < radius && self.position.y.abs_diff(point.y) < radius
    }
}

/// Owned catalogue of every tile in the level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TileRegistry {
    tiles: Vec<Tile>,
}

impl TileRegistry {
    /// Build a registry from tiles whose switch/bridge links are already
    /// resolved to indices. Links are validated by the level loader.
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// All tiles in load order
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| (TileId(i as u32), tile))
    }

    /// Every tile, of any kind, within `radius` of `point` on both axes
    pub fn lookup_tiles_near(
        &self,
        point: IVec2,
        radius: i32,
    ) -> impl Iterator<Item = (TileId, &Tile)> {
        self.iter().filter(move |(_, tile)| tile.is_near(point, radius))
    }

    /// Activate the bridge linked to `switch`
    ///
    /// One-way: the bridge stays active and the switch sinks exactly once.
    /// Returns the bridge id if this call changed anything.
    pub fn activate_bridge(&mut self, switch: TileId) -> Option<TileId> {
        let TileKind::Switch { bridge } = self.get(switch)?.kind else {
            return None;
        };

        let bridge_tile = self.tiles.get_mut(bridge.index())?;
        if bridge_tile.active {
            return None;
        }
        bridge_tile.active = true;

        if let Some(switch_tile) = self.tiles.get_mut(switch.index()) {
            switch_tile.y_offset -= SWITCH_PRESS_DEPTH;
        }
        Some(bridge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linked_pair() -> TileRegistry {
        TileRegistry::new(vec![
            Tile::new(IVec2::new(0, 0), TileKind::Solid),
            Tile::new(IVec2::new(500, 0), TileKind::Switch { bridge: TileId(2) }),
            Tile::new(IVec2::new(1000, 0), TileKind::Bridge { switch: TileId(1) }),
        ])
    }

    #[test]
    fn test_initial_flags() {
        let registry = linked_pair();
        assert!(registry.get(TileId(0)).unwrap().active);
        assert!(registry.get(TileId(1)).unwrap().active);
        assert!(!registry.get(TileId(2)).unwrap().active);
    }

    #[test]
    fn test_lookup_boundary_is_exclusive() {
        let registry = linked_pair();
        let near: Vec<_> = registry
            .lookup_tiles_near(IVec2::new(259, 0), 260)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(near, vec![TileId(0), TileId(1)]);

        let near: Vec<_> = registry
            .lookup_tiles_near(IVec2::new(260, 0), 260)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(near, vec![TileId(1)]);

        // z must also be inside the window
        assert_eq!(registry.lookup_tiles_near(IVec2::new(0, 260), 260).count(), 0);
    }

    #[test]
    fn test_proximity_at_coordinate_extremes() {
        let far = Tile::new(IVec2::new(i32::MAX, i32::MIN), TileKind::Solid);
        assert!(!far.is_near(IVec2::new(i32::MIN, i32::MAX), 260));
        assert!(far.is_near(IVec2::new(i32::MAX - 259, i32::MIN + 259), 260));

        let origin = Tile::new(IVec2::ZERO, TileKind::Solid);
        assert!(!origin.is_near(IVec2::ZERO, -1));
    }

    #[test]
    fn test_activate_bridge_is_idempotent() {
        let mut registry = linked_pair();

        assert_eq!(registry.activate_bridge(TileId(1)), Some(TileId(2)));
        assert!(registry.get(TileId(2)).unwrap().active);
        assert_eq!(registry.get(TileId(1)).unwrap().y_offset, -SWITCH_PRESS_DEPTH);

        assert_eq!(registry.activate_bridge(TileId(1)), None);
        assert!(registry.get(TileId(2)).unwrap().active);
        assert_eq!(registry.get(TileId(1)).unwrap().y_offset, -SWITCH_PRESS_DEPTH);
    }

    #[test]
    fn test_activate_ignores_non_switch() {
        let mut registry = linked_pair();
        assert_eq!(registry.activate_bridge(TileId(0)), None);
        assert_eq!(registry.activate_bridge(TileId(2)), None);
        assert_eq!(registry.activate_bridge(TileId(99)), None);
        assert!(!registry.get(TileId(2)).unwrap().active);
    }
}
