//! Per-frame simulation step
//!
//! One call to [`tick`] is one frame: the quit check, then exactly one phase
//! handler. Marble and aim move by fixed per-frame steps; only block drift and
//! wobble are scaled by the frame time.

use std::f32::consts::PI;

use glam::Vec2;

use super::collision::{check_barrier_collisions, check_block_collisions};
use super::state::{GameEvent, GamePhase, GameState, MissCause};

/// Input sampled for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Turn aim left (held). Takes precedence over `turn_right`.
    pub turn_left: bool,
    /// Turn aim right (held)
    pub turn_right: bool,
    /// Fire (pressed this frame)
    pub fire: bool,
    /// Quit (pressed this frame)
    pub quit: bool,
}

/// Advance the game by one frame. `dt` is the elapsed time in seconds.
pub fn tick(state: &mut GameState, input: &FrameInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Quit wins over everything and nothing else runs this frame
    if input.quit {
        log::info!("Quit requested in {:?}", state.phase);
        events.push(GameEvent::Quit);
        return events;
    }

    state.frame += 1;

    match state.phase {
        GamePhase::Ready => handle_ready(state, input, dt, &mut events),
        GamePhase::Firing => handle_firing(state, input, dt, &mut events),
        GamePhase::Contact => handle_contact(state, &mut events),
        GamePhase::Over => {}
    }

    events
}

fn handle_ready(state: &mut GameState, input: &FrameInput, dt: f32, events: &mut Vec<GameEvent>) {
    update_aiming(state, input, events);
    update_blocks(state, dt);

    if input.fire {
        let angle = state.aim.angle;
        state.marble.fire(angle, state.tuning.marble_speed);
        log::info!("Fired at {:.2} degrees", angle);
        events.push(GameEvent::Fired {
            angle,
            vel: state.marble.vel,
        });
        set_phase(state, GamePhase::Firing, events);
    }
}

fn handle_firing(state: &mut GameState, input: &FrameInput, dt: f32, events: &mut Vec<GameEvent>) {
    // Re-aiming here only affects the next shot
    update_aiming(state, input, events);
    update_blocks(state, dt);

    state.marble.advance();

    let depth = state.marble.pos.z;
    let miss = if depth > state.overshoot_depth() {
        Some(MissCause::Overshot)
    } else if depth < 0.0 {
        Some(MissCause::Returned)
    } else {
        None
    };
    if let Some(cause) = miss {
        log::debug!("Shot missed ({:?}) at z={:.2}", cause, depth);
        state.reset_marble();
        events.push(GameEvent::Missed { cause });
        set_phase(state, GamePhase::Ready, events);
        return;
    }

    if let Some(hit) = check_block_collisions(state) {
        log::debug!("Block ({}, {}) hit -> {:?}", hit.row, hit.column, hit.state);
        events.push(GameEvent::BlockHit {
            row: hit.row,
            column: hit.column,
            state: hit.state,
        });
        set_phase(state, GamePhase::Contact, events);
    } else if let Some(hit) = check_barrier_collisions(state) {
        log::debug!("Bounced off {:?} barrier {}", hit.side, hit.index);
        events.push(GameEvent::BarrierHit {
            side: hit.side,
            index: hit.index,
        });
        set_phase(state, GamePhase::Contact, events);
    }
}

/// Decide between victory and carrying on. The marble keeps its reflected
/// velocity when play resumes and stops dead on victory.
fn handle_contact(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.is_cleared() {
        state.marble.won = true;
        state.marble.vel = Vec2::ZERO;
        log::info!("All blocks destroyed after {} frames", state.frame);
        events.push(GameEvent::Won);
        set_phase(state, GamePhase::Over, events);
    } else {
        set_phase(state, GamePhase::Firing, events);
    }
}

fn set_phase(state: &mut GameState, to: GamePhase, events: &mut Vec<GameEvent>) {
    let from = state.phase;
    state.phase = to;
    log::info!("Phase {:?} -> {:?}", from, to);
    events.push(GameEvent::PhaseChanged { from, to });
}

/// Rotate the aim by one fixed step if a turn key is held
pub fn update_aiming(state: &mut GameState, input: &FrameInput, events: &mut Vec<GameEvent>) {
    let step = state.tuning.aim_rate;
    let delta = if input.turn_left {
        -step
    } else if input.turn_right {
        step
    } else {
        return;
    };

    let applied = state.aim.turn(delta, state.tuning.max_aim_angle);
    if applied != 0.0 {
        events.push(GameEvent::AimTurned { delta: applied });
    }
}

/// Drift live blocks toward the player and bob them, rows out of phase
pub fn update_blocks(state: &mut GameState, dt: f32) {
    let movement = state.tuning.block_drift_speed * dt;
    state.block_drift += movement;
    state.wobble_time += dt;

    let wobble_speed = state.tuning.wobble_speed;
    let amplitude = state.tuning.wobble_amplitude;
    let wobble_time = state.wobble_time;

    for block in state.blocks.iter_mut().flatten().filter(|b| b.is_alive()) {
        let phase_offset = block.row as f32 * PI;
        block.pos.z -= movement;
        block.pos.y = block.base_y + (wobble_time * wobble_speed + phase_offset).sin() * amplitude;
    }
}
