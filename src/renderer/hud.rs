//! Phase-dependent on-screen text

use crate::engine::{Color, Engine};
use crate::sim::GamePhase;

pub const READY_TEXT: &str = "Press SPACE to fire!\nUse Z/X to aim.";
pub const FIRING_TEXT: &str = "Firing! Use Z/X to aim next shot.";
pub const OVER_TEXT: &str = "GAME OVER! All blocks destroyed!";
pub const QUIT_HINT_TEXT: &str = "Press ESC to quit.";

/// Draw the HUD for the current phase. Contact frames draw nothing.
pub fn draw_hud<E: Engine + ?Sized>(engine: &mut E, phase: GamePhase) {
    match phase {
        GamePhase::Ready => engine.draw_text(READY_TEXT, 200, 30, Color::WHITE),
        GamePhase::Firing => engine.draw_text(FIRING_TEXT, 200, 30, Color::WHITE),
        GamePhase::Contact => {}
        GamePhase::Over => {
            engine.draw_text(OVER_TEXT, 200, 300, Color::GREEN);
            engine.draw_text(QUIT_HINT_TEXT, 300, 350, Color::WHITE);
        }
    }
}
