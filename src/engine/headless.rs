//! In-memory engine backend
//!
//! Keeps a transform table instead of drawing anything. Input is scripted by
//! the caller and frame time is fixed, so sessions replay exactly.

use std::collections::HashSet;

use glam::{Quat, Vec3};

use super::{Color, Engine, Key, MeshKind, ModelId, Skin};
use crate::sim::FrameInput;

/// Transform and appearance of one model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRecord {
    pub mesh: MeshKind,
    pub pos: Vec3,
    pub yaw: f32,
    pub scale: f32,
    pub parent: Option<ModelId>,
    pub skin: Skin,
}

/// A text draw issued since the last `draw_scene`
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

/// Engine with no window
#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    models: Vec<ModelRecord>,
    held: HashSet<Key>,
    hits: HashSet<Key>,
    frame_time: f32,
    frames_drawn: u64,
    max_frames: Option<u64>,
    running: bool,
    texts: Vec<TextDraw>,
}

impl HeadlessEngine {
    /// New engine reporting `frame_time` seconds per frame
    pub fn new(frame_time: f32) -> Self {
        Self {
            models: Vec::new(),
            held: HashSet::new(),
            hits: HashSet::new(),
            frame_time: frame_time.max(0.0),
            frames_drawn: 0,
            max_frames: None,
            running: true,
            texts: Vec::new(),
        }
    }

    /// Stop by itself after `frames` calls to `draw_scene`
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    pub fn hold(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Queue a single press, reported once by `key_hit`
    pub fn press(&mut self, key: Key) {
        self.hits.insert(key);
    }

    /// Script the keys that produce `input` on the next poll. Held keys
    /// from the previous frame are released first.
    pub fn apply_input(&mut self, input: &FrameInput) {
        self.release_all();
        if input.turn_left {
            self.hold(Key::AimLeft);
        }
        if input.turn_right {
            self.hold(Key::AimRight);
        }
        if input.fire {
            self.press(Key::Fire);
        }
        if input.quit {
            self.press(Key::Quit);
        }
    }

    pub fn model(&self, id: ModelId) -> Option<&ModelRecord> {
        self.models.get(id.0 as usize)
    }

    pub fn models(&self) -> impl Iterator<Item = (ModelId, &ModelRecord)> {
        self.models
            .iter()
            .enumerate()
            .map(|(i, m)| (ModelId(i as u32), m))
    }

    /// Text drawn since the last `draw_scene`
    pub fn texts(&self) -> &[TextDraw] {
        &self.texts
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Position and yaw after applying every parent transform
    pub fn world_transform(&self, id: ModelId) -> (Vec3, f32) {
        let record = &self.models[id.0 as usize];
        match record.parent {
            Some(parent) => {
                let (parent_pos, parent_yaw) = self.world_transform(parent);
                let rotation = Quat::from_rotation_y(parent_yaw.to_radians());
                (parent_pos + rotation * record.pos, parent_yaw + record.yaw)
            }
            None => (record.pos, record.yaw),
        }
    }

    fn record_mut(&mut self, id: ModelId) -> &mut ModelRecord {
        &mut self.models[id.0 as usize]
    }
}

impl Engine for HeadlessEngine {
    fn create_model(&mut self, mesh: MeshKind, pos: Vec3) -> ModelId {
        let id = ModelId(self.models.len() as u32);
        self.models.push(ModelRecord {
            mesh,
            pos,
            yaw: 0.0,
            scale: 1.0,
            parent: None,
            skin: Skin::Default,
        });
        id
    }

    fn position(&self, model: ModelId) -> Vec3 {
        self.models[model.0 as usize].pos
    }

    fn set_position(&mut self, model: ModelId, pos: Vec3) {
        self.record_mut(model).pos = pos;
    }

    fn move_by(&mut self, model: ModelId, delta: Vec3) {
        self.record_mut(model).pos += delta;
    }

    fn yaw(&self, model: ModelId) -> f32 {
        self.models[model.0 as usize].yaw
    }

    fn reset_orientation(&mut self, model: ModelId) {
        self.record_mut(model).yaw = 0.0;
    }

    fn rotate_y(&mut self, model: ModelId, degrees: f32) {
        self.record_mut(model).yaw += degrees;
    }

    fn set_scale(&mut self, model: ModelId, scale: f32) {
        self.record_mut(model).scale = scale;
    }

    fn attach_to_parent(&mut self, child: ModelId, parent: ModelId) {
        self.record_mut(child).parent = Some(parent);
    }

    fn set_skin(&mut self, model: ModelId, skin: Skin) {
        self.record_mut(model).skin = skin;
    }

    fn key_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn key_hit(&mut self, key: Key) -> bool {
        self.hits.remove(&key)
    }

    fn frame_time(&mut self) -> f32 {
        self.frame_time
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        self.texts.push(TextDraw {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn draw_scene(&mut self) {
        self.texts.clear();
        self.frames_drawn += 1;
        if self.max_frames.is_some_and(|max| self.frames_drawn >= max) {
            self.running = false;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn stop(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::poll_input;

    #[test]
    fn test_applied_input_polls_back() {
        let mut engine = HeadlessEngine::new(0.016);
        engine.hold(Key::AimLeft);

        let input = FrameInput {
            turn_right: true,
            fire: true,
            ..Default::default()
        };
        engine.apply_input(&input);
        assert_eq!(poll_input(&mut engine), input);

        engine.apply_input(&FrameInput::default());
        assert_eq!(poll_input(&mut engine), FrameInput::default());
    }

    #[test]
    fn test_key_hit_is_consumed() {
        let mut engine = HeadlessEngine::new(0.016);
        engine.press(Key::Fire);
        engine.hold(Key::AimLeft);

        let input = poll_input(&mut engine);
        assert!(input.fire);
        assert!(input.turn_left);
        assert!(!input.quit);

        let input = poll_input(&mut engine);
        assert!(!input.fire);
        assert!(input.turn_left);
    }

    #[test]
    fn test_child_follows_parent_rotation() {
        let mut engine = HeadlessEngine::new(0.016);
        let pivot = engine.create_model(MeshKind::Dummy, Vec3::ZERO);
        let arrow = engine.create_model(MeshKind::Arrow, Vec3::new(0.0, 0.0, 10.0));
        engine.attach_to_parent(arrow, pivot);

        engine.rotate_y(pivot, 90.0);
        let (pos, yaw) = engine.world_transform(arrow);
        assert!((pos - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
        assert_eq!(yaw, 90.0);
    }

    #[test]
    fn test_frame_limit_stops_engine() {
        let mut engine = HeadlessEngine::new(0.016).with_frame_limit(3);
        let mut frames = 0;
        while engine.is_running() {
            engine.draw_scene();
            frames += 1;
        }
        assert_eq!(frames, 3);
    }

    #[test]
    fn test_texts_cleared_each_frame() {
        let mut engine = HeadlessEngine::new(0.016);
        engine.draw_text("hello", 1, 2, Color::WHITE);
        assert_eq!(engine.texts().len(), 1);
        engine.draw_scene();
        assert!(engine.texts().is_empty());
    }

    #[test]
    fn test_relative_moves() {
        let mut engine = HeadlessEngine::new(0.016);
        let m = engine.create_model(MeshKind::Block, Vec3::new(1.0, 2.0, 3.0));
        engine.move_by(m, Vec3::new(0.0, 0.0, -1.0));
        engine.rotate_y(m, 10.0);
        engine.rotate_y(m, 5.0);
        assert_eq!(engine.position(m), Vec3::new(1.0, 2.0, 2.0));
        assert_eq!(engine.yaw(m), 15.0);
        engine.reset_orientation(m);
        assert_eq!(engine.yaw(m), 0.0);
    }
}
