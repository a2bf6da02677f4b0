//! Roll transition engine
//!
//! A roll tips the block 90 degrees over one of its bottom edges. It is
//! spread across several ticks; while it runs, further commands are dropped.
//!
//! Horizontal travel per roll depends on whether the block tips through
//! upright or stays flat:
//! - standing <-> lying: half a step, 0.5 (0.05 per frame at 9 degrees)
//! - lying, rolled sideways: three quarters, 0.75 (0.075 per frame)

use glam::IVec3;
use serde::{Deserialize, Serialize};

use super::block::{Axis, Block, Posture};
use crate::consts::{DEGREES_PER_TICK, FLAT_ROLL_STEP, QUARTER_TURN, UPRIGHT_ROLL_STEP};

/// Directional roll request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Towards -X
    Left,
    /// Towards +X
    Right,
    /// Towards -Z
    Forward,
    /// Towards +Z
    Backward,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::Left,
        Command::Right,
        Command::Forward,
        Command::Backward,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Command::Left | Command::Right => Axis::Roll,
            Command::Forward | Command::Backward => Axis::Pitch,
        }
    }

    /// Sign of travel along the axis' ground direction
    fn travel_sign(self) -> i32 {
        match self {
            Command::Right | Command::Backward => 1,
            Command::Left | Command::Forward => -1,
        }
    }

    /// Sign of the angle change. Tipping toward +X turns negatively about Z;
    /// tipping toward +Z turns positively about X.
    fn angle_sign(self) -> i32 {
        match self {
            Command::Left | Command::Backward => 1,
            Command::Right | Command::Forward => -1,
        }
    }
}

/// Posture after rolling along `axis`
pub fn next_posture(posture: Posture, axis: Axis) -> Posture {
    match (posture, axis) {
        (Posture::Standing, Axis::Roll) => Posture::LyingX,
        (Posture::LyingX, Axis::Roll) => Posture::Standing,
        (Posture::Standing, Axis::Pitch) => Posture::LyingZ,
        (Posture::LyingZ, Axis::Pitch) => Posture::Standing,
        (across, _) => across,
    }
}

/// Horizontal distance covered by one full roll
pub fn roll_distance(posture: Posture, axis: Axis) -> i32 {
    if next_posture(posture, axis) == posture {
        FLAT_ROLL_STEP
    } else {
        UPRIGHT_ROLL_STEP
    }
}

/// Engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RollState {
    #[default]
    Idle,
    Rolling {
        command: Command,
        /// Degrees turned so far, in [0, 90)
        progress: i32,
        origin: IVec3,
        target: IVec3,
        to: Posture,
    },
}

/// Reported on the tick a roll lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollFinished {
    pub command: Command,
    pub posture: Posture,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollEngine {
    state: RollState,
    degrees_per_tick: i32,
}

impl Default for RollEngine {
    fn default() -> Self {
        Self::new(DEGREES_PER_TICK)
    }
}

impl RollEngine {
    /// `degrees_per_tick` must divide 90 (checked by `Settings::validate`)
    pub fn new(degrees_per_tick: i32) -> Self {
        Self {
            state: RollState::Idle,
            degrees_per_tick,
        }
    }

    pub fn state(&self) -> RollState {
        self.state
    }

    pub fn is_rolling(&self) -> bool {
        matches!(self.state, RollState::Rolling { .. })
    }

    /// Offer a command. Returns false if a roll is already running.
    pub fn command(&mut self, block: &Block, command: Command) -> bool {
        if self.is_rolling() {
            return false;
        }

        let axis = command.axis();
        let posture = block.posture();
        let to = next_posture(posture, axis);
        let distance = roll_distance(posture, axis) * command.travel_sign();

        let origin = block.center();
        let mut target = origin;
        match axis {
            Axis::Roll => target.x += distance,
            Axis::Pitch => target.z += distance,
        }
        target.y = to.resting_y();

        log::debug!("Roll {:?}: {:?} -> {:?}, {:?} -> {:?}", command, posture, to, origin, target);

        self.state = RollState::Rolling {
            command,
            progress: 0,
            origin,
            target,
            to,
        };
        true
    }

    /// Advance the current roll by one frame
    pub fn advance(&mut self, block: &mut Block) -> Option<RollFinished> {
        let RollState::Rolling {
            command,
            progress,
            origin,
            target,
            to,
        } = self.state
        else {
            return None;
        };

        let axis = command.axis();
        let next = (progress + self.degrees_per_tick).min(QUARTER_TURN);
        let span = target - origin;
        // Difference of integer interpolants: the deltas sum to exactly `span`
        let delta = span * next / QUARTER_TURN - span * progress / QUARTER_TURN;
        block.apply_frame_delta(axis, (next - progress) * command.angle_sign(), delta);

        if block.orientation().get(axis) % QUARTER_TURN == 0 {
            debug_assert_eq!(next, QUARTER_TURN);
            debug_assert_eq!(block.center(), target);
            block.set_posture(to);
            self.state = RollState::Idle;
            log::debug!("Roll {:?} landed at {:?} ({:?})", command, block.center(), to);
            return Some(RollFinished {
                command,
                posture: to,
            });
        }

        self.state = RollState::Rolling {
            command,
            progress: next,
            origin,
            target,
            to,
        };
        None
    }
}
