//! Engine capability
//!
//! The game never owns a window, meshes or fonts. It talks to whatever
//! real-time engine hosts it through [`Engine`], which only exposes model
//! transforms, key polling, frame timing and text drawing.

pub mod headless;

pub use headless::{HeadlessEngine, ModelRecord, TextDraw};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::FrameInput;

/// Opaque handle to a model owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId(pub u32);

/// Mesh a model is created from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeshKind {
    Floor,
    Skybox,
    /// Invisible pivot the aim arrow hangs from
    Dummy,
    Arrow,
    Marble,
    Block,
    Barrier,
}

/// Texture applied to a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Skin {
    /// Whatever the mesh ships with
    #[default]
    Default,
    /// Floor ground texture
    Mud,
    /// Block that has taken one hit
    Cracked,
    /// Far barrier sections
    Striped,
    /// Marble after the grid is cleared
    Victory,
}

/// Logical keys the game polls. Hosts map them to physical keys
/// (Z, X, Space and Escape on a keyboard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    AimLeft,
    AimRight,
    Fire,
    Quit,
}

/// RGB text colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
}

/// Operations the game needs from its host engine
pub trait Engine {
    /// Create a model at `pos` (world space)
    fn create_model(&mut self, mesh: MeshKind, pos: Vec3) -> ModelId;

    /// Local position of a model
    fn position(&self, model: ModelId) -> Vec3;
    fn set_position(&mut self, model: ModelId, pos: Vec3);
    /// Move relative to the current position
    fn move_by(&mut self, model: ModelId, delta: Vec3);

    /// Rotation about the vertical axis (degrees)
    fn yaw(&self, model: ModelId) -> f32;
    fn reset_orientation(&mut self, model: ModelId);
    /// Rotate about the vertical axis by `degrees`
    fn rotate_y(&mut self, model: ModelId, degrees: f32);
    fn set_scale(&mut self, model: ModelId, scale: f32);
    /// Make `child` follow `parent`; the child's position becomes local to it
    fn attach_to_parent(&mut self, child: ModelId, parent: ModelId);
    fn set_skin(&mut self, model: ModelId, skin: Skin);

    /// Is `key` currently held down
    fn key_held(&self, key: Key) -> bool;
    /// Was `key` pressed since the last query. Consumes the press.
    fn key_hit(&mut self, key: Key) -> bool;

    /// Seconds since the previous call (never negative)
    fn frame_time(&mut self) -> f32;

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color);
    /// Present the current frame
    fn draw_scene(&mut self);

    fn is_running(&self) -> bool;
    fn stop(&mut self);
}

/// Sample this frame's input from the engine
pub fn poll_input<E: Engine + ?Sized>(engine: &mut E) -> FrameInput {
    FrameInput {
        turn_left: engine.key_held(Key::AimLeft),
        turn_right: engine.key_held(Key::AimRight),
        fire: engine.key_hit(Key::Fire),
        quit: engine.key_hit(Key::Quit),
    }
}
