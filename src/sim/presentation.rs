//! Presentation hints derived from agent state
//!
//! The host renders sprites and the vision cone; the core only decides which
//! way they face and what colour the cone is.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::perception::DEFAULT_FACING;

/// Four-way sprite orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteFacing {
    /// Facing away from the camera (moving up)
    Back,
    /// Facing the camera (moving down)
    Front,
    /// Profile view; `flipped` mirrors it to face left
    Side { flipped: bool },
}

impl SpriteFacing {
    /// Horizontal wins only when strictly dominant
    pub fn from_direction(dir: Vec2) -> Self {
        let dir = if dir == Vec2::ZERO { DEFAULT_FACING } else { dir };
        if dir.x.abs() > dir.y.abs() {
            SpriteFacing::Side { flipped: dir.x < 0.0 }
        } else if dir.y > 0.0 {
            SpriteFacing::Back
        } else {
            SpriteFacing::Front
        }
    }

    /// Unit vector of the cardinal direction this sprite faces
    pub fn cardinal(&self) -> Vec2 {
        match self {
            SpriteFacing::Back => Vec2::Y,
            SpriteFacing::Front => Vec2::NEG_Y,
            SpriteFacing::Side { flipped: false } => Vec2::X,
            SpriteFacing::Side { flipped: true } => Vec2::NEG_X,
        }
    }

    /// Rotation for a cone sprite authored pointing up
    pub fn cone_rotation_degrees(&self) -> f32 {
        match self {
            SpriteFacing::Back => 0.0,
            SpriteFacing::Front => 180.0,
            SpriteFacing::Side { flipped: false } => -90.0,
            SpriteFacing::Side { flipped: true } => 90.0,
        }
    }
}

/// Vision cone placement and tint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisionCone {
    pub rotation_degrees: f32,
    /// Offset of the cone centre from the enemy, in local space
    pub offset: Vec2,
    /// RGB emissive tint
    pub color: [f32; 3],
    pub opacity: f32,
}

const CONE_OFFSET_FACTOR: f32 = 0.4;
const WANDER_TINT: [f32; 3] = [1.0, 1.0, 0.0];
const CHASE_TINT: [f32; 3] = [1.0, 0.0, 0.0];

impl VisionCone {
    pub fn new(facing: SpriteFacing, sight_distance: f32, chasing: bool) -> Self {
        let (color, opacity) = if chasing {
            (CHASE_TINT, 0.6)
        } else {
            (WANDER_TINT, 0.45)
        };
        Self {
            rotation_degrees: facing.cone_rotation_degrees(),
            offset: facing.cardinal() * sight_distance * CONE_OFFSET_FACTOR,
            color,
            opacity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_facing_from_direction() {
        assert_eq!(SpriteFacing::from_direction(Vec2::X), SpriteFacing::Side { flipped: false });
        assert_eq!(SpriteFacing::from_direction(Vec2::NEG_X), SpriteFacing::Side { flipped: true });
        assert_eq!(SpriteFacing::from_direction(Vec2::Y), SpriteFacing::Back);
        assert_eq!(SpriteFacing::from_direction(Vec2::NEG_Y), SpriteFacing::Front);
        // Diagonal ties go vertical
        assert_eq!(SpriteFacing::from_direction(Vec2::new(1.0, 1.0)), SpriteFacing::Back);
        assert_eq!(SpriteFacing::from_direction(Vec2::ZERO), SpriteFacing::Side { flipped: false });
    }

    #[test]
    fn test_cone_tint_by_state() {
        let wander = VisionCone::new(SpriteFacing::Front, 8.0, false);
        assert_eq!(wander.color, WANDER_TINT);
        assert_eq!(wander.opacity, 0.45);
        assert_eq!(wander.rotation_degrees, 180.0);
        assert!((wander.offset - Vec2::new(0.0, -3.2)).length() < 1e-5);

        let chase = VisionCone::new(SpriteFacing::Side { flipped: true }, 10.0, true);
        assert_eq!(chase.color, CHASE_TINT);
        assert_eq!(chase.opacity, 0.6);
        assert_eq!(chase.rotation_degrees, 90.0);
        assert!((chase.offset - Vec2::new(-4.0, 0.0)).length() < 1e-5);
    }
}
