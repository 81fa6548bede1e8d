//! Demo player
//!
//! Picks a random live block, swings the aim toward it and fires once lined
//! up. Seeded, so a given seed always plays the same game.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::MARBLE_ORIGIN;
use crate::sim::{FrameInput, GamePhase, GameState};

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    /// Aim angle (degrees) being steered toward
    target: Option<f32>,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            target: None,
        }
    }

    pub fn target(&self) -> Option<f32> {
        self.target
    }

    /// Choose this frame's input
    pub fn decide(&mut self, state: &GameState) -> FrameInput {
        if matches!(state.phase, GamePhase::Over | GamePhase::Contact) {
            return FrameInput::default();
        }

        let target = match self.target {
            Some(target) => target,
            None => match self.pick_target(state) {
                Some(target) => {
                    log::debug!("Autopilot targeting {:.2} degrees", target);
                    self.target = Some(target);
                    target
                }
                None => return FrameInput::default(),
            },
        };

        let error = target - state.aim.angle;
        if error.abs() <= state.tuning.aim_rate {
            // Lined up: wait for the marble if it is still in flight
            if state.phase == GamePhase::Ready {
                self.target = None;
                return FrameInput {
                    fire: true,
                    ..Default::default()
                };
            }
            return FrameInput::default();
        }

        FrameInput {
            turn_left: error < 0.0,
            turn_right: error > 0.0,
            ..Default::default()
        }
    }

    /// Aim angle toward a random live block, as seen from the firing origin
    fn pick_target(&mut self, state: &GameState) -> Option<f32> {
        let alive: Vec<_> = state.blocks.iter().flatten().filter(|b| b.is_alive()).collect();
        if alive.is_empty() {
            return None;
        }
        let block = alive[self.rng.random_range(0..alive.len())];
        let to_block = block.ground_pos() - Vec2::new(MARBLE_ORIGIN.x, MARBLE_ORIGIN.z);
        let max = state.tuning.max_aim_angle;
        Some(to_block.x.atan2(to_block.y).to_degrees().clamp(-max, max))
    }
}
