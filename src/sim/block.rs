//! The rolling block
//!
//! Position is fixed-point (milli-units) and angles are whole degrees so that
//! a finished roll lands exactly on the grid and goal checks can use equality.

use glam::{IVec2, IVec3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{milli_to_units, normalize_degrees};

/// Resting posture of the block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Posture {
    /// Long axis vertical, occupies one cell
    #[default]
    Standing,
    /// Long axis along world X, spans two cells
    LyingX,
    /// Long axis along world Z, spans two cells
    LyingZ,
}

impl Posture {
    /// Centre height when resting on the floor
    pub fn resting_y(self) -> i32 {
        match self {
            Posture::Standing => STANDING_Y,
            Posture::LyingX | Posture::LyingZ => LYING_Y,
        }
    }

    /// Canonical (roll, pitch) at rest
    fn canonical_angles(self) -> (i32, i32) {
        match self {
            Posture::Standing => (0, 0),
            Posture::LyingX => (QUARTER_TURN, 0),
            Posture::LyingZ => (0, QUARTER_TURN),
        }
    }
}

/// Rotation channel a roll drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// About world Z; moves the block along X
    Roll,
    /// About world X; moves the block along Z
    Pitch,
}

/// Euler angles in whole degrees, each in [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub roll: i32,
    pub pitch: i32,
    pub yaw: i32,
}

impl Orientation {
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::Roll => self.roll,
            Axis::Pitch => self.pitch,
        }
    }

    fn normalize(&mut self) {
        self.roll = normalize_degrees(self.roll);
        self.pitch = normalize_degrees(self.pitch);
        self.yaw = normalize_degrees(self.yaw);
    }
}

/// The single controllable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Centre in milli-units
    position: IVec3,
    orientation: Orientation,
    posture: Posture,
}

impl Block {
    /// Place a block resting at cell (x, z)
    pub fn new(x: i32, z: i32, posture: Posture) -> Self {
        let mut block = Self {
            position: IVec3::new(x, posture.resting_y(), z),
            orientation: Orientation::default(),
            posture,
        };
        block.set_posture(posture);
        block
    }

    /// Advance one animation frame. Only the roll engine calls this.
    pub fn apply_frame_delta(&mut self, axis: Axis, degrees: i32, delta: IVec3) {
        match axis {
            Axis::Roll => self.orientation.roll += degrees,
            Axis::Pitch => self.orientation.pitch += degrees,
        }
        self.orientation.normalize();
        self.position += delta;
    }

    /// Snap to a resting posture with canonical angles
    pub fn set_posture(&mut self, posture: Posture) {
        let (roll, pitch) = posture.canonical_angles();
        self.posture = posture;
        self.orientation.roll = roll;
        self.orientation.pitch = pitch;
        self.orientation.normalize();
    }

    /// Centre in milli-units
    pub fn center(&self) -> IVec3 {
        self.position
    }

    /// Horizontal centre (x, z) in milli-units
    pub fn ground_point(&self) -> IVec2 {
        IVec2::new(self.position.x, self.position.z)
    }

    /// Centre in world units
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            milli_to_units(self.position.x),
            milli_to_units(self.position.y),
            milli_to_units(self.position.z),
        )
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn posture(&self) -> Posture {
        self.posture
    }

    /// Rotation for drawing
    ///
    /// While the roll angle is an odd quarter turn the block lies along X, so
    /// pitch has to be applied in world space after roll; otherwise roll goes
    /// on top of pitch.
    pub fn rotation(&self) -> Quat {
        let Orientation { roll, pitch, yaw } = self.orientation;
        let rz = Quat::from_rotation_z((roll as f32).to_radians());
        let rx = Quat::from_rotation_x((pitch as f32).to_radians());
        let ry = Quat::from_rotation_y((yaw as f32).to_radians());

        let tumble = if roll % (2 * QUARTER_TURN) == QUARTER_TURN {
            rx * rz
        } else {
            rz * rx
        };
        ry * tumble
    }

    /// Model matrix for a unit cube scaled to the block's standing dimensions
    pub fn model_matrix(&self) -> Mat4 {
        let scale = Vec3::new(
            milli_to_units(BLOCK_WIDTH),
            milli_to_units(BLOCK_HEIGHT),
            milli_to_units(BLOCK_DEPTH),
        );
        Mat4::from_scale_rotation_translation(scale, self.rotation(), self.position())
    }
}
