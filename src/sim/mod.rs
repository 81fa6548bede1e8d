//! Simulation module
//!
//! All gameplay logic lives here:
//! - One frame per `tick`, one phase handler per frame
//! - Fixed-step marble and aim movement, frame-time-scaled block drift
//! - Stable scan order (row-major blocks, left-then-right barriers)
//! - No rendering or engine dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{
    BOX_HALF_EXTENT, BarrierHit, BlockHit, check_barrier_collisions, check_block_collisions,
    reflect_off_box, sphere_box_collision,
};
pub use state::{
    Aim, Barrier, Block, BlockState, GameEvent, GamePhase, GameState, Marble, MissCause, Side,
};
pub use tick::{FrameInput, tick, update_aiming, update_blocks};
