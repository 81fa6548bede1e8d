//! Game state and core simulation types
//!
//! Everything a session needs lives in [`GameState`]; handlers receive it by
//! mutable reference, there is no global state.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Tuning;
use crate::{barrier_home, block_home};

/// Current phase of the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Marble parked at the origin, player aiming
    Ready,
    /// Marble in flight
    Firing,
    /// One-shot evaluation after a collision
    Contact,
    /// Every block destroyed
    Over,
}

/// Damage state of a block. Only ever advances `Normal -> HitOnce -> Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockState {
    #[default]
    Normal,
    HitOnce,
    Dead,
}

impl BlockState {
    /// State after one more hit. `Dead` is frozen.
    pub fn damaged(self) -> Self {
        match self {
            BlockState::Normal => BlockState::HitOnce,
            BlockState::HitOnce | BlockState::Dead => BlockState::Dead,
        }
    }
}

/// The marble
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marble {
    pub pos: Vec3,
    /// Per-frame step in the horizontal plane (x, z); height never changes
    pub vel: Vec2,
    pub radius: f32,
    /// Orientation about the vertical axis (degrees)
    pub yaw: f32,
    /// Set once the grid is cleared (presentation switches skin)
    pub won: bool,
}

impl Marble {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: MARBLE_ORIGIN,
            vel: Vec2::ZERO,
            radius,
            yaw: 0.0,
            won: false,
        }
    }

    /// Park at the firing origin facing the current aim, at rest
    pub fn reset(&mut self, aim_angle: f32) {
        self.pos = MARBLE_ORIGIN;
        self.yaw = aim_angle;
        self.vel = Vec2::ZERO;
    }

    /// Launch along `aim_angle` (degrees, 0 = straight down +z)
    pub fn fire(&mut self, aim_angle: f32, speed: f32) {
        self.yaw = aim_angle;
        let rad = aim_angle.to_radians();
        self.vel = Vec2::new(rad.sin(), rad.cos()) * speed;
    }

    /// Move by one frame's worth of velocity
    pub fn advance(&mut self) {
        self.pos.x += self.vel.x;
        self.pos.z += self.vel.y;
    }

    /// Position projected onto the collision plane
    #[inline]
    pub fn ground_pos(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.z)
    }
}

/// One cell of the block grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub row: usize,
    pub column: usize,
    pub state: BlockState,
    pub pos: Vec3,
    /// Resting height the wobble oscillates around
    pub base_y: f32,
}

impl Block {
    pub fn new(row: usize, column: usize) -> Self {
        let pos = block_home(row, column);
        Self {
            row,
            column,
            state: BlockState::Normal,
            pos,
            base_y: pos.y,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state != BlockState::Dead
    }

    /// Apply one hit; a block that dies is parked in the graveyard
    pub fn damage(&mut self) -> BlockState {
        self.state = self.state.damaged();
        if self.state == BlockState::Dead {
            self.pos = GRAVEYARD;
        }
        self.state
    }

    #[inline]
    pub fn ground_pos(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.z)
    }
}

/// Which arena edge a barrier stands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Static side-wall segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barrier {
    pub side: Side,
    pub index: usize,
    pub pos: Vec3,
}

impl Barrier {
    pub fn new(side: Side, index: usize) -> Self {
        Self {
            side,
            index,
            pos: barrier_home(side.sign(), index),
        }
    }

    /// Far sections use the striped skin
    pub fn striped(&self) -> bool {
        self.index >= BARRIER_STRIPE_FROM
    }

    #[inline]
    pub fn ground_pos(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.z)
    }
}

/// Aim accumulator shared by the indicator and the fire vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aim {
    /// Degrees, always within `[-max, max]`
    pub angle: f32,
}

impl Aim {
    /// Turn by `delta` degrees, clamped to `±max`. Returns the change actually applied.
    pub fn turn(&mut self, delta: f32, max: f32) -> f32 {
        let before = self.angle;
        self.angle = (self.angle + delta).clamp(-max, max);
        self.angle - before
    }
}

/// Why a shot ended without contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissCause {
    /// Sailed past the block rows
    Overshot,
    /// Came back behind the firing line
    Returned,
}

/// Notable things that happened during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Aim accumulator moved by `delta` degrees
    AimTurned { delta: f32 },
    Fired { angle: f32, vel: Vec2 },
    Missed { cause: MissCause },
    BlockHit { row: usize, column: usize, state: BlockState },
    BarrierHit { side: Side, index: usize },
    PhaseChanged { from: GamePhase, to: GamePhase },
    Won,
    /// Quit was pressed; the frame was not dispatched
    Quit,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub marble: Marble,
    /// Row-major block grid
    pub blocks: [[Block; NUM_COLUMNS]; NUM_ROWS],
    pub left_barriers: [Barrier; NUM_BARRIERS],
    pub right_barriers: [Barrier; NUM_BARRIERS],
    pub aim: Aim,
    /// Total distance the blocks have drifted
    pub block_drift: f32,
    /// Accumulated time driving the wobble
    pub wobble_time: f32,
    /// Frames dispatched so far
    pub frame: u64,
    pub tuning: Tuning,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl GameState {
    /// Fresh session: marble at the origin, full grid, phase `Ready`
    pub fn new(tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::Ready,
            marble: Marble::new(tuning.marble_radius),
            blocks: std::array::from_fn(|row| std::array::from_fn(|column| Block::new(row, column))),
            left_barriers: std::array::from_fn(|i| Barrier::new(Side::Left, i)),
            right_barriers: std::array::from_fn(|i| Barrier::new(Side::Right, i)),
            aim: Aim::default(),
            block_drift: 0.0,
            wobble_time: 0.0,
            frame: 0,
            tuning,
        }
    }

    /// Number of destroyed blocks, counted from scratch
    pub fn destroyed_count(&self) -> usize {
        self.blocks
            .iter()
            .flatten()
            .filter(|b| b.state == BlockState::Dead)
            .count()
    }

    /// True once every block is destroyed
    pub fn is_cleared(&self) -> bool {
        self.destroyed_count() == TOTAL_BLOCKS
    }

    pub fn block(&self, row: usize, column: usize) -> &Block {
        &self.blocks[row][column]
    }

    pub fn block_mut(&mut self, row: usize, column: usize) -> &mut Block {
        &mut self.blocks[row][column]
    }

    /// Depth beyond which an uncontested shot is abandoned
    pub fn overshoot_depth(&self) -> f32 {
        BLOCK_Z + self.tuning.overshoot_margin
    }

    /// Put the marble back at the origin, at rest, facing the current aim
    pub fn reset_marble(&mut self) {
        self.marble.reset(self.aim.angle);
    }
}
