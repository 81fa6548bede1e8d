//! Presentation layer
//!
//! Turns simulation state into engine calls. Nothing here feeds back into
//! gameplay.

pub mod hud;
pub mod scene;

pub use hud::draw_hud;
pub use scene::Scene;
