//! Scene binding
//!
//! Creates one engine model per game object and mirrors simulation state
//! onto them after every frame.

use glam::Vec3;

use crate::consts::*;
use crate::engine::{Engine, MeshKind, ModelId, Skin};
use crate::sim::{BlockState, GameEvent, GameState};

/// Arrow offset from the aim pivot
pub const ARROW_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -30.0);
pub const ARROW_SCALE: f32 = 1.5;
pub const FLOOR_POS: Vec3 = Vec3::new(0.0, -100.0, 0.0);
pub const SKYBOX_POS: Vec3 = Vec3::new(0.0, -1000.0, 0.0);

/// Engine handles for every game object
#[derive(Debug, Clone)]
pub struct Scene {
    pub floor: ModelId,
    pub skybox: ModelId,
    /// Aim pivot; the arrow hangs off it
    pub dummy: ModelId,
    pub arrow: ModelId,
    pub marble: ModelId,
    pub blocks: [[ModelId; NUM_COLUMNS]; NUM_ROWS],
    pub left_barriers: [ModelId; NUM_BARRIERS],
    pub right_barriers: [ModelId; NUM_BARRIERS],
}

impl Scene {
    /// Populate the engine from the current state
    pub fn build<E: Engine + ?Sized>(engine: &mut E, state: &GameState) -> Self {
        let floor = engine.create_model(MeshKind::Floor, FLOOR_POS);
        engine.set_skin(floor, Skin::Mud);
        let skybox = engine.create_model(MeshKind::Skybox, SKYBOX_POS);

        let dummy = engine.create_model(MeshKind::Dummy, Vec3::ZERO);
        engine.rotate_y(dummy, state.aim.angle);

        let marble = engine.create_model(MeshKind::Marble, state.marble.pos);
        engine.rotate_y(marble, state.marble.yaw);

        let arrow = engine.create_model(MeshKind::Arrow, ARROW_OFFSET);
        engine.attach_to_parent(arrow, dummy);
        engine.set_scale(arrow, ARROW_SCALE);

        let blocks = state.blocks.each_ref().map(|row| {
            row.each_ref().map(|block| {
                let id = engine.create_model(MeshKind::Block, block.pos);
                if block.state == BlockState::HitOnce {
                    engine.set_skin(id, Skin::Cracked);
                }
                id
            })
        });

        let mut barrier_models = |barriers: &[crate::sim::Barrier; NUM_BARRIERS]| {
            barriers.each_ref().map(|barrier| {
                let id = engine.create_model(MeshKind::Barrier, barrier.pos);
                if barrier.striped() {
                    engine.set_skin(id, Skin::Striped);
                }
                id
            })
        };
        let left_barriers = barrier_models(&state.left_barriers);
        let right_barriers = barrier_models(&state.right_barriers);

        log::debug!(
            "Scene built: {} blocks, {} barriers",
            TOTAL_BLOCKS,
            NUM_BARRIERS * 2
        );

        Self {
            floor,
            skybox,
            dummy,
            arrow,
            marble,
            blocks,
            left_barriers,
            right_barriers,
        }
    }

    /// Mirror one frame's changes onto the engine
    pub fn sync<E: Engine + ?Sized>(&self, engine: &mut E, state: &GameState, events: &[GameEvent]) {
        for event in events {
            match *event {
                // Pivot turns by exactly what the aim accumulator moved
                GameEvent::AimTurned { delta } => engine.rotate_y(self.dummy, delta),
                GameEvent::Fired { .. } | GameEvent::Missed { .. } => {
                    engine.reset_orientation(self.marble);
                    engine.rotate_y(self.marble, state.marble.yaw);
                }
                GameEvent::BlockHit { row, column, state: hit } => {
                    let id = self.blocks[row][column];
                    match hit {
                        BlockState::HitOnce => engine.set_skin(id, Skin::Cracked),
                        BlockState::Dead => engine.set_position(id, GRAVEYARD),
                        BlockState::Normal => {}
                    }
                }
                GameEvent::Won => engine.set_skin(self.marble, Skin::Victory),
                _ => {}
            }
        }

        engine.set_position(self.marble, state.marble.pos);

        for (row, models) in state.blocks.iter().zip(self.blocks.iter()) {
            for (block, &id) in row.iter().zip(models.iter()) {
                if block.is_alive() {
                    engine.set_position(id, block.pos);
                }
            }
        }
    }
}
