//! Seek-point steering with world-bounds clamping

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DIRECTION_EPSILON, WORLD_MAX, WORLD_MIN};
use crate::{clamp_point, normalize};

/// Axis-aligned world rectangle agents are confined to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Vec2::splat(WORLD_MIN),
            max: Vec2::splat(WORLD_MAX),
        }
    }
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// `min <= max` on both axes and all components finite
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x <= self.max.x
            && self.min.y <= self.max.y
    }

    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        clamp_point(p, self.min, self.max)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Result of one steering step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub position: Vec2,
    pub facing: Vec2,
}

/// Move `current` toward `target` at `speed` for `dt` seconds.
///
/// Within `DIRECTION_EPSILON` of the target nothing moves and `facing` is
/// returned unchanged. The step is not capped at the target distance, so a
/// fast agent may overshoot and come back on the next tick.
pub fn seek_toward(
    current: Vec2,
    facing: Vec2,
    target: Vec2,
    speed: f32,
    dt: f32,
    bounds: &Bounds,
) -> Step {
    let delta = target - current;
    if delta.length() < DIRECTION_EPSILON {
        return Step {
            position: current,
            facing,
        };
    }

    let dir = normalize(delta);
    Step {
        position: bounds.clamp(current + dir * speed * dt),
        facing: dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_moves_toward_target() {
        let step = seek_toward(Vec2::ZERO, Vec2::X, Vec2::new(0.0, 10.0), 2.0, 0.5, &Bounds::default());
        assert!((step.position - Vec2::new(0.0, 1.0)).length() < 1e-6);
        assert!((step.facing - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_seek_at_target_keeps_facing() {
        let facing = Vec2::new(0.0, -1.0);
        let here = Vec2::new(3.0, 3.0);
        let step = seek_toward(here, facing, here + Vec2::splat(0.0002), 5.0, 0.1, &Bounds::default());
        assert_eq!(step.position, here);
        assert_eq!(step.facing, facing);
    }

    #[test]
    fn test_seek_clamps_to_bounds() {
        let bounds = Bounds::new(Vec2::splat(-1.0), Vec2::splat(1.0));
        let step = seek_toward(Vec2::new(0.9, 0.0), Vec2::X, Vec2::new(50.0, 0.0), 10.0, 1.0, &bounds);
        assert_eq!(step.position, Vec2::new(1.0, 0.0));
        // Facing still follows the intended direction even when clamped
        assert!((step.facing - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_bounds_validity() {
        assert!(Bounds::default().is_valid());
        assert!(!Bounds::new(Vec2::splat(1.0), Vec2::splat(-1.0)).is_valid());
        assert!(Bounds::new(Vec2::ZERO, Vec2::ZERO).is_valid());
        assert!(Bounds::default().contains(Vec2::new(11.0, -11.0)));
        assert!(!Bounds::default().contains(Vec2::new(11.5, 0.0)));
    }
}
