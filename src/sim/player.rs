//! The player agent
//!
//! The host decides where the player wants to go (keyboard, touch, script);
//! the core only applies that direction, clamps and tracks facing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::motion::Bounds;
use super::presentation::SpriteFacing;
use crate::normalize;
use crate::settings::SessionConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    /// Last nonzero input direction; starts facing the camera
    pub facing: Vec2,
    pub half_extent: Vec2,
    pub speed: f32,
}

impl Player {
    pub fn new(position: Vec2, config: &SessionConfig) -> Self {
        Self {
            position: config.bounds.clamp(position),
            facing: Vec2::NEG_Y,
            half_extent: config.player_half_extent,
            speed: config.player_speed,
        }
    }

    /// Move along `input` (any length; zero means stand still)
    pub fn step(&mut self, input: Vec2, dt: f32, bounds: &Bounds) {
        let dir = normalize(input);
        if dir != Vec2::ZERO {
            self.facing = dir;
            self.position += dir * self.speed * dt;
        }
        self.position = bounds.clamp(self.position);
    }

    pub fn view(&self) -> PlayerView {
        PlayerView {
            position: self.position,
            facing: self.facing,
            sprite: SpriteFacing::from_direction(self.facing),
        }
    }
}

impl Agent for Player {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn facing(&self) -> Vec2 {
        self.facing
    }

    fn half_extent(&self) -> Vec2 {
        self.half_extent
    }
}

/// What the host needs to draw the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub facing: Vec2,
    pub sprite: SpriteFacing,
}
