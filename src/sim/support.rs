//! Support, hazard and goal evaluation
//!
//! Only the block's centre point is inspected, never its rotated footprint.
//! After a sideways roll a lying block's centre sits on the boundary between
//! two cells, which is within the tolerance of both cell centres.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::block::Block;
use super::tile::{TileId, TileKind, TileRegistry};
use crate::consts::{BLOCK_DEPTH, BLOCK_WIDTH};

/// Why a session was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Nothing underneath the block
    Unsupported,
    /// Touched a fragile tile
    FragileTile,
}

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Continue,
    Win,
    Loss(LossCause),
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::Continue
    }
}

/// Everything the evaluator found this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub outcome: Outcome,
    pub supported: bool,
    /// (switch, bridge) pairs fired this frame
    pub activated: Vec<(TileId, TileId)>,
}

/// Points of an active bridge that count as support
fn bridge_anchors(center: IVec2) -> [IVec2; 5] {
    let hw = BLOCK_WIDTH / 2;
    let hd = BLOCK_DEPTH / 2;
    [
        center,
        center + IVec2::new(-hw, 0),
        center + IVec2::new(hw, 0),
        center + IVec2::new(0, -hd),
        center + IVec2::new(0, hd),
    ]
}

/// Evaluate the block against the floor
///
/// `resting` is false while a roll is in flight; an unsupported block is
/// only lost once it has landed. A block rolling off an edge therefore loses
/// on its landing frame, not on the first frame its centre is over the gap.
/// Fragile contact, switch presses and the goal are checked on every frame.
pub fn evaluate(
    block: &Block,
    registry: &mut TileRegistry,
    goal: IVec2,
    tolerance: i32,
    resting: bool,
) -> Evaluation {
    let point = block.ground_point();
    let mut supported = false;
    let mut switches = Vec::new();

    for (id, tile) in registry.lookup_tiles_near(point, tolerance) {
        match tile.kind {
            TileKind::Solid => supported = true,
            TileKind::Fragile => {
                return Evaluation {
                    outcome: Outcome::Loss(LossCause::FragileTile),
                    supported,
                    activated: Vec::new(),
                };
            }
            TileKind::Switch { .. } => {
                supported = true;
                switches.push(id);
            }
            TileKind::Bridge { .. } => {}
        }
    }

    let activated: Vec<_> = switches
        .into_iter()
        .filter_map(|switch| {
            let bridge = registry.activate_bridge(switch)?;
            log::info!("Switch {:?} raised bridge {:?}", switch, bridge);
            Some((switch, bridge))
        })
        .collect();

    if !supported {
        supported = registry.iter().any(|(_, tile)| {
            matches!(tile.kind, TileKind::Bridge { .. })
                && tile.active
                && bridge_anchors(tile.position).contains(&point)
        });
    }

    let outcome = if point == goal {
        Outcome::Win
    } else if !supported && resting {
        Outcome::Loss(LossCause::Unsupported)
    } else {
        Outcome::Continue
    };

    Evaluation {
        outcome,
        supported,
        activated,
    }
}
