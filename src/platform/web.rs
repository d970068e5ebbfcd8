//! JS bindings for the browser host
//!
//! The page owns rendering, input and audio. It drives a `WebSession` each
//! animation frame and exchanges JSON-encoded `HostEvent`s / `GameEvent`s.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::persistence::LocalStorage;
use crate::settings::{Difficulty, SessionConfig};
use crate::sim::{HostEvent, SessionState, TickInput, tick};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    super::init_logging();
    log::info!("Candelarium core loaded");
}

/// One playthrough, owned by the page
#[wasm_bindgen]
pub struct WebSession {
    state: SessionState,
    input: TickInput,
}

#[wasm_bindgen]
impl WebSession {
    /// Create a session from an optional JSON config. Invalid config falls
    /// back to defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> WebSession {
        let config = match config_json {
            Some(json) => SessionConfig::from_json_or_default(&json),
            None => SessionConfig::default(),
        };
        WebSession {
            state: SessionState::new(config, Box::new(LocalStorage)),
            input: TickInput::default(),
        }
    }

    /// Advance by `dt` seconds with the given movement direction
    pub fn tick(&mut self, dt: f32, move_x: f32, move_y: f32) {
        self.input.move_dir = Vec2::new(move_x, move_y);
        tick(&mut self.state, &self.input, dt);
    }

    /// Apply a JSON-encoded `HostEvent`. Returns false if it did not parse.
    pub fn handle_event(&mut self, json: &str) -> bool {
        match serde_json::from_str::<HostEvent>(json) {
            Ok(event) => {
                self.state.handle(event);
                true
            }
            Err(e) => {
                log::warn!("Rejected host event: {}", e);
                false
            }
        }
    }

    /// Pending outbound events as a JSON array
    pub fn drain_events(&mut self) -> String {
        if self.state.events.is_empty() {
            return "[]".to_string();
        }
        let events = self.state.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::error!("Failed to encode events: {}", e);
            "[]".to_string()
        })
    }

    /// Current session snapshot as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|e| {
            log::error!("Failed to encode snapshot: {}", e);
            "null".to_string()
        })
    }

    /// Persist a difficulty by label ("Easy", "Normal", "Hard"); takes
    /// effect on the next reset. Returns false for unknown labels.
    pub fn set_difficulty(&mut self, label: &str) -> bool {
        match Difficulty::from_label(label) {
            Some(difficulty) => {
                self.state.set_difficulty(difficulty);
                true
            }
            None => {
                log::warn!("Unknown difficulty {:?}", label);
                false
            }
        }
    }
}
