//! Game loop glue
//!
//! One [`Session::run_frame`] is one loop iteration: present, read the frame
//! time, poll input, dispatch the simulation, mirror the result.

use crate::engine::{Engine, poll_input};
use crate::renderer::{Scene, draw_hud};
use crate::settings::Tuning;
use crate::sim::{GameEvent, GameState, tick};

/// A running game bound to an engine
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    pub scene: Scene,
}

impl Session {
    /// Build the scene for a fresh game
    pub fn new<E: Engine + ?Sized>(engine: &mut E, tuning: Tuning) -> Self {
        let state = GameState::new(tuning);
        let scene = Scene::build(engine, &state);
        log::info!("Session started in {:?}", state.phase);
        Self { state, scene }
    }

    /// Run one frame. Returns `false` once the engine has stopped.
    pub fn run_frame<E: Engine + ?Sized>(&mut self, engine: &mut E) -> bool {
        if !engine.is_running() {
            return false;
        }

        engine.draw_scene();
        let dt = engine.frame_time();
        let input = poll_input(engine);

        let events = tick(&mut self.state, &input, dt);
        if events.contains(&GameEvent::Quit) {
            engine.stop();
            return false;
        }

        self.scene.sync(engine, &self.state, &events);
        draw_hud(engine, self.state.phase);
        true
    }

    /// Run until the engine stops
    pub fn run<E: Engine + ?Sized>(&mut self, engine: &mut E) {
        while self.run_frame(engine) {}
        log::info!(
            "Session ended after {} frames in {:?} ({} destroyed)",
            self.state.frame,
            self.state.phase,
            self.state.destroyed_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{HeadlessEngine, Key};
    use crate::renderer::hud::{FIRING_TEXT, READY_TEXT};
    use crate::sim::GamePhase;

    #[test]
    fn test_fire_through_engine() {
        let mut engine = HeadlessEngine::new(1.0 / 60.0);
        let mut session = Session::new(&mut engine, Tuning::default());

        assert!(session.run_frame(&mut engine));
        assert_eq!(engine.texts()[0].text, READY_TEXT);

        engine.press(Key::Fire);
        assert!(session.run_frame(&mut engine));
        assert_eq!(session.state.phase, GamePhase::Firing);
        assert_eq!(engine.texts()[0].text, FIRING_TEXT);

        assert!(session.run_frame(&mut engine));
        assert!(engine.position(session.scene.marble).z > 0.0);
    }

    #[test]
    fn test_quit_stops_engine_in_any_phase() {
        let mut engine = HeadlessEngine::new(1.0 / 60.0);
        let mut session = Session::new(&mut engine, Tuning::default());
        engine.press(Key::Fire);
        session.run_frame(&mut engine);

        engine.press(Key::Quit);
        assert!(!session.run_frame(&mut engine));
        assert!(!engine.is_running());
        assert!(!session.run_frame(&mut engine));
    }

    #[test]
    fn test_negative_frame_time_freezes_blocks() {
        let mut engine = HeadlessEngine::new(-1.0);
        let mut session = Session::new(&mut engine, Tuning::default());
        let before = session.state.block(0, 0).pos;

        assert!(session.run_frame(&mut engine));
        assert_eq!(session.state.block(0, 0).pos.z, before.z);
        assert_eq!(session.state.block_drift, 0.0);
    }

    #[test]
    fn test_run_honours_frame_limit() {
        let mut engine = HeadlessEngine::new(1.0 / 60.0).with_frame_limit(50);
        let mut session = Session::new(&mut engine, Tuning::default());
        session.run(&mut engine);
        assert_eq!(engine.frames_drawn(), 50);
    }
}
