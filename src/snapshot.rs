//! Read-only frame views for a renderer
//!
//! The simulation never draws. A host takes a snapshot after each tick and
//! either walks the views or uploads `instances()` straight to a GPU buffer
//! (one unit cube per instance).

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::consts::{TILE_DEPTH, TILE_THICKNESS, TILE_WIDTH, TILE_Y};
use crate::milli_to_units;
use crate::sim::{GamePhase, GameState, Orientation, Posture, TileId, TileKind};

/// Per-instance data for a cube mesh
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Instance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl Instance {
    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BLOCK: [f32; 4] = [0.13, 0.75, 0.33, 1.0];
    pub const SOLID: [f32; 4] = [0.2, 0.2, 0.22, 1.0];
    pub const FRAGILE: [f32; 4] = [0.88, 0.33, 0.33, 1.0];
    pub const SWITCH: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const BRIDGE: [f32; 4] = [0.77, 0.91, 0.98, 1.0];
    pub const GOAL: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileView {
    pub id: TileId,
    /// Tile centre in world units, including switch press depth
    pub position: Vec3,
    pub kind: TileKind,
    pub active: bool,
    pub is_goal: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockView {
    pub position: Vec3,
    pub orientation: Orientation,
    pub posture: Posture,
    pub rotation: Quat,
    pub model: Mat4,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub tiles: Vec<TileView>,
    pub block: BlockView,
    pub phase: GamePhase,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let goal = state.goal();
        let tiles = state
            .registry
            .iter()
            .map(|(id, tile)| TileView {
                id,
                position: Vec3::new(
                    milli_to_units(tile.position.x),
                    milli_to_units(TILE_Y + tile.y_offset),
                    milli_to_units(tile.position.y),
                ),
                kind: tile.kind,
                active: tile.active,
                is_goal: tile.position == goal,
            })
            .collect();

        let block = &state.block;
        Self {
            tiles,
            block: BlockView {
                position: block.position(),
                orientation: block.orientation(),
                posture: block.posture(),
                rotation: block.rotation(),
                model: block.model_matrix(),
            },
            phase: state.phase,
        }
    }

    /// Cube instances for every visible tile, then the block
    ///
    /// Bridges are hidden until their switch fires.
    pub fn instances(&self) -> Vec<Instance> {
        let tile_scale = Vec3::new(
            milli_to_units(TILE_WIDTH),
            milli_to_units(TILE_THICKNESS),
            milli_to_units(TILE_DEPTH),
        );

        let mut instances: Vec<Instance> = self
            .tiles
            .iter()
            .filter(|tile| tile.active)
            .map(|tile| {
                let color = if tile.is_goal {
                    colors::GOAL
                } else {
                    match tile.kind {
                        TileKind::Solid => colors::SOLID,
                        TileKind::Fragile => colors::FRAGILE,
                        TileKind::Switch { .. } => colors::SWITCH,
                        TileKind::Bridge { .. } => colors::BRIDGE,
                    }
                };
                let model = Mat4::from_scale_rotation_translation(
                    tile_scale,
                    Quat::IDENTITY,
                    tile.position,
                );
                Instance::new(model, color)
            })
            .collect();

        instances.push(Instance::new(self.block.model, colors::BLOCK));
        instances
    }
}

impl GameState {
    /// Read-only view of this frame
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self)
    }
}
