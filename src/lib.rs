//! Killer Quebes - fire a marble at two rows of drifting blocks
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (state machine, collisions, block motion)
//! - `engine`: Capability trait for the rendering/input engine, plus a headless backend
//! - `renderer`: Mirrors simulation state onto engine models and draws the HUD
//! - `session`: Frame loop tying the simulation to an engine
//! - `autopilot`: Seeded demo player
//! - `settings`: Data-driven gameplay tuning

pub mod autopilot;
pub mod engine;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Per-frame step scale shared by aiming and marble movement
    pub const SPEED_SCALE: f32 = 0.01;

    /// Marble travel per frame (not scaled by frame time)
    pub const MARBLE_SPEED: f32 = 60.0 * SPEED_SCALE;
    pub const MARBLE_RADIUS: f32 = 2.0;
    pub const MARBLE_ORIGIN: Vec3 = Vec3::new(0.0, 2.0, 0.0);

    /// Aim rotation per frame in degrees
    pub const AIM_RATE: f32 = 2.0 * SPEED_SCALE;
    pub const MAX_AIM_ANGLE: f32 = 60.0;

    /// Block grid
    pub const NUM_ROWS: usize = 2;
    pub const NUM_COLUMNS: usize = 10;
    pub const TOTAL_BLOCKS: usize = NUM_ROWS * NUM_COLUMNS;
    pub const BLOCK_WIDTH: f32 = 10.0;
    pub const BLOCK_GAP: f32 = 3.0;
    pub const BLOCK_Z: f32 = 120.0;
    pub const BLOCK_Y: f32 = 0.0;
    pub const ROW_SPACING: f32 = 15.0;

    /// Side walls
    pub const NUM_BARRIERS: usize = 8;
    pub const BARRIER_X: f32 = 60.0;
    pub const BARRIER_SPACING: f32 = 25.0;
    /// Barriers from this index on use the striped skin
    pub const BARRIER_STRIPE_FROM: usize = 4;

    /// How far past the front row the marble may travel before the shot counts as missed
    pub const OVERSHOOT_MARGIN: f32 = 20.0;

    /// Block drift toward the player, units per second
    pub const BLOCK_DRIFT_SPEED: f32 = 3.0;
    pub const WOBBLE_SPEED: f32 = 1.5;
    pub const WOBBLE_AMPLITUDE: f32 = 1.0;

    /// Destroyed blocks are parked here, well outside the arena
    pub const GRAVEYARD: Vec3 = Vec3::new(9999.0, 9999.0, 9999.0);
}

/// Centre of the block at (row, column) in its resting layout
#[inline]
pub fn block_home(row: usize, column: usize) -> Vec3 {
    use consts::*;
    let total_width = NUM_COLUMNS as f32 * BLOCK_WIDTH + (NUM_COLUMNS - 1) as f32 * BLOCK_GAP;
    let start_x = -(total_width / 2.0) + BLOCK_WIDTH / 2.0;
    Vec3::new(
        start_x + column as f32 * (BLOCK_WIDTH + BLOCK_GAP),
        BLOCK_Y,
        BLOCK_Z + row as f32 * ROW_SPACING,
    )
}

/// Centre of a barrier on the given side (`-1.0` left, `1.0` right)
#[inline]
pub fn barrier_home(side_sign: f32, index: usize) -> Vec3 {
    use consts::*;
    Vec3::new(side_sign * BARRIER_X, 0.0, index as f32 * BARRIER_SPACING)
}
