//! Candelarium - a top-down stealth/chase game about keeping torches lit
//!
//! Core modules:
//! - `sim`: Deterministic simulation (perception, movement, hit detection, session)
//! - `settings`: Difficulty presets and session tuning
//! - `persistence`: Key/value preference storage
//! - `platform`: Browser bindings for the host page

pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{AltarConfig, ConfigError, Difficulty, DifficultyProfile, SessionConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame timestep used by the native runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// World bounds (square arena centred on the origin)
    pub const WORLD_MIN: f32 = -11.0;
    pub const WORLD_MAX: f32 = 11.0;

    /// Enemy hitbox (full width, height)
    pub const ENEMY_HITBOX_W: f32 = 1.0;
    pub const ENEMY_HITBOX_H: f32 = 1.2;
    /// Player hitbox half extents
    pub const PLAYER_HALF_W: f32 = 0.4;
    pub const PLAYER_HALF_H: f32 = 0.5;
    /// Player movement speed (units/s)
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Seconds between hits from the same enemy
    pub const HIT_COOLDOWN: f32 = 0.8;
    /// Hits the player can take; reaching this ends the run
    pub const MAX_PLAYER_HITS: u32 = 4;
    /// Grace period before a chasing enemy gives up after losing sight
    pub const CHASE_LOSE_TIME: f32 = 0.8;
    /// Base interval between wander target re-rolls
    pub const WANDER_CHANGE_INTERVAL: f32 = 2.5;
    /// Full vision cone angle
    pub const SIGHT_ANGLE_DEG: f32 = 120.0;

    /// Seconds all torches must stay lit before victory
    pub const VICTORY_HOLD_SECONDS: f32 = 5.0;
    /// Collision radius announced for newly spawned enemies
    pub const ENEMY_COLLISION_RADIUS: f32 = 0.6;
    /// Torch hitbox half extent (square)
    pub const TORCH_HALF_EXTENT: f32 = 0.5;
    /// Number of altar sprite frames (0..=4 lit candles)
    pub const ALTAR_FRAMES: u32 = 5;
    /// Player must stay within this distance of the altar to ignite a candle
    pub const ALTAR_RADIUS: f32 = 2.5;
    /// Seconds of uninterrupted presence needed to ignite a candle
    pub const ALTAR_IGNITE_SECONDS: f32 = 1.5;
    /// Player is sent to one of the corners at this offset after each candle
    pub const ALTAR_TELEPORT_OFFSET: f32 = 9.0;

    /// Below this length a vector is treated as zero
    pub const DIRECTION_EPSILON: f32 = 1e-3;
}

/// Unit vector in the direction of `v`, or zero when `v` is too short to
/// have a stable direction.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let len = v.length();
    if len < consts::DIRECTION_EPSILON {
        Vec2::ZERO
    } else {
        v / len
    }
}

/// Clamp a point component-wise into `[min, max]`
#[inline]
pub fn clamp_point(p: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(p.x.clamp(min.x, max.x), p.y.clamp(min.y, max.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_unit_length() {
        let n = normalize(Vec2::new(3.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_tiny_vector_is_zero() {
        assert_eq!(normalize(Vec2::new(0.0005, 0.0)), Vec2::ZERO);
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_clamp_point() {
        let p = clamp_point(Vec2::new(20.0, -20.0), Vec2::splat(-11.0), Vec2::splat(11.0));
        assert_eq!(p, Vec2::new(11.0, -11.0));
    }
}
