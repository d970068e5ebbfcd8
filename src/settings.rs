//! Difficulty presets and session tuning
//!
//! The selected difficulty is persisted separately from the session as a
//! plain label; everything else is a `SessionConfig` loaded from JSON or
//! taken from defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::persistence::PreferenceStore;
use crate::sim::Bounds;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Preference key the menu writes the selected difficulty under
    pub const STORAGE_KEY: &'static str = "ash:difficulty";

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Tuning table for this preset
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                enemy_speed_wander: 1.0,
                enemy_speed_chase: 1.6,
                sight_distance: 6.0,
                sight_angle_degrees: SIGHT_ANGLE_DEG,
                spawn_interval_seconds: 10.0,
                max_enemies: 4,
                extinguish_time_seconds: 3.0,
            },
            Difficulty::Normal => DifficultyProfile {
                enemy_speed_wander: 1.0,
                enemy_speed_chase: 2.1,
                sight_distance: 8.0,
                sight_angle_degrees: SIGHT_ANGLE_DEG,
                spawn_interval_seconds: 7.0,
                max_enemies: 6,
                extinguish_time_seconds: 2.2,
            },
            Difficulty::Hard => DifficultyProfile {
                enemy_speed_wander: 1.0,
                enemy_speed_chase: 2.7,
                sight_distance: 10.0,
                sight_angle_degrees: SIGHT_ANGLE_DEG,
                spawn_interval_seconds: 5.0,
                max_enemies: 8,
                extinguish_time_seconds: 1.6,
            },
        }
    }

    /// Read the persisted difficulty. Missing or unrecognised labels fall
    /// back to `Normal`.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Some(label) => Self::from_label(&label).unwrap_or_else(|| {
                log::debug!("Unknown difficulty label {:?}, using Normal", label);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Persist this difficulty as the selected preference
    pub fn save(&self, store: &mut dyn PreferenceStore) {
        store.set(Self::STORAGE_KEY, self.as_str());
        log::info!("Difficulty set to {}", self.as_str());
    }
}

/// Per-difficulty enemy and spawner tuning. Immutable once selected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub enemy_speed_wander: f32,
    pub enemy_speed_chase: f32,
    pub sight_distance: f32,
    /// Full cone angle, symmetric about the facing direction
    pub sight_angle_degrees: f32,
    pub spawn_interval_seconds: f32,
    pub max_enemies: usize,
    /// Seconds of enemy contact before a lit torch goes out
    pub extinguish_time_seconds: f32,
}

/// Errors from loading a `SessionConfig`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse session config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid session config: {0}")]
    Invalid(String),
}

/// Altar placement and candle-ignition tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AltarConfig {
    pub position: Vec2,
    pub radius: f32,
    pub ignite_seconds: f32,
    /// Where the player may be sent after lighting a candle (empty: stay put)
    pub teleport_points: Vec<Vec2>,
}

impl Default for AltarConfig {
    fn default() -> Self {
        let c = ALTAR_TELEPORT_OFFSET;
        Self {
            position: Vec2::ZERO,
            radius: ALTAR_RADIUS,
            ignite_seconds: ALTAR_IGNITE_SECONDS,
            teleport_points: vec![
                Vec2::new(-c, -c),
                Vec2::new(c, -c),
                Vec2::new(-c, c),
                Vec2::new(c, c),
            ],
        }
    }
}

/// Session tuning shared by every difficulty
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Playable area; agents are clamped into it
    pub bounds: Bounds,

    // === Agents ===
    /// Enemy hitbox (full width, height)
    pub enemy_hitbox: Vec2,
    pub player_half_extent: Vec2,
    pub player_speed: f32,

    // === Enemy behaviour ===
    pub hit_cooldown: f32,
    pub chase_lose_time: f32,
    pub wander_change_interval: f32,
    pub max_player_hits: u32,

    // === Win condition ===
    pub require_all_lit_for_win: bool,
    pub victory_hold_seconds: f32,
    pub torch_half_extent: f32,
    pub altar_frames: u32,
    /// Candle-ignition altar; `None` disables it
    pub altar: Option<AltarConfig>,

    // === Spawning ===
    pub spawn_points: Vec<Vec2>,
    /// Used when no spawn points are configured
    pub fallback_spawn: Vec2,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            bounds: Bounds::default(),

            enemy_hitbox: Vec2::new(ENEMY_HITBOX_W, ENEMY_HITBOX_H),
            player_half_extent: Vec2::new(PLAYER_HALF_W, PLAYER_HALF_H),
            player_speed: PLAYER_SPEED,

            hit_cooldown: HIT_COOLDOWN,
            chase_lose_time: CHASE_LOSE_TIME,
            wander_change_interval: WANDER_CHANGE_INTERVAL,
            max_player_hits: MAX_PLAYER_HITS,

            require_all_lit_for_win: true,
            victory_hold_seconds: VICTORY_HOLD_SECONDS,
            torch_half_extent: TORCH_HALF_EXTENT,
            altar_frames: ALTAR_FRAMES,
            altar: Some(AltarConfig::default()),

            spawn_points: Vec::new(),
            fallback_spawn: Vec2::ZERO,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Like `from_json`, but logs and falls back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{}; using default session config", err);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bounds.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "bounds min {:?} exceeds max {:?}",
                self.bounds.min, self.bounds.max
            )));
        }
        let extents = [
            self.enemy_hitbox.x,
            self.enemy_hitbox.y,
            self.player_half_extent.x,
            self.player_half_extent.y,
            self.torch_half_extent,
        ];
        if extents.iter().any(|e| !e.is_finite() || *e <= 0.0) {
            return Err(ConfigError::Invalid("hitbox sizes must be positive".into()));
        }
        if self.max_player_hits == 0 {
            return Err(ConfigError::Invalid("max_player_hits must be at least 1".into()));
        }
        if self.altar_frames == 0 {
            return Err(ConfigError::Invalid("altar_frames must be at least 1".into()));
        }
        if let Some(altar) = &self.altar {
            if !altar.position.is_finite() || !altar.radius.is_finite() || altar.radius <= 0.0 {
                return Err(ConfigError::Invalid("altar radius must be positive".into()));
            }
            if !altar.ignite_seconds.is_finite() || altar.ignite_seconds < 0.0 {
                return Err(ConfigError::Invalid("altar ignite time must be non-negative".into()));
            }
        }
        let timers = [
            self.hit_cooldown,
            self.chase_lose_time,
            self.wander_change_interval,
            self.victory_hold_seconds,
        ];
        if timers.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(ConfigError::Invalid("timers must be non-negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_difficulty_from_label_case_insensitive() {
        assert_eq!(Difficulty::from_label("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_label("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_label("Normal"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_label("nightmare"), None);
    }

    #[test]
    fn test_difficulty_load_falls_back_to_normal() {
        let mut store = MemoryStore::new();
        assert_eq!(Difficulty::load(&store), Difficulty::Normal);

        store.set(Difficulty::STORAGE_KEY, "impossible");
        assert_eq!(Difficulty::load(&store), Difficulty::Normal);

        Difficulty::Hard.save(&mut store);
        assert_eq!(Difficulty::load(&store), Difficulty::Hard);
    }

    #[test]
    fn test_profiles_scale_with_difficulty() {
        let easy = Difficulty::Easy.profile();
        let normal = Difficulty::Normal.profile();
        let hard = Difficulty::Hard.profile();

        assert!(easy.enemy_speed_chase < normal.enemy_speed_chase);
        assert!(normal.enemy_speed_chase < hard.enemy_speed_chase);
        assert!(easy.spawn_interval_seconds > hard.spawn_interval_seconds);
        assert!(easy.max_enemies < hard.max_enemies);
        assert!(easy.extinguish_time_seconds > hard.extinguish_time_seconds);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config = SessionConfig::from_json(r#"{ "seed": 7, "victory_hold_seconds": 0.0 }"#)
            .expect("valid config");
        assert_eq!(config.seed, 7);
        assert_eq!(config.victory_hold_seconds, 0.0);
        assert_eq!(config.max_player_hits, MAX_PLAYER_HITS);
    }

    #[test]
    fn test_config_rejects_inverted_bounds() {
        let json = r#"{ "bounds": { "min": [5.0, 5.0], "max": [-5.0, -5.0] } }"#;
        assert!(matches!(
            SessionConfig::from_json(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_config_altar_can_be_disabled_or_tuned() {
        let config = SessionConfig::from_json(r#"{ "altar": null }"#).expect("valid config");
        assert_eq!(config.altar, None);

        let config = SessionConfig::from_json(r#"{ "altar": { "position": [3.0, -2.0] } }"#)
            .expect("valid config");
        let altar = config.altar.expect("altar");
        assert_eq!(altar.position, Vec2::new(3.0, -2.0));
        assert_eq!(altar.radius, ALTAR_RADIUS);
        assert_eq!(altar.teleport_points.len(), 4);

        let json = r#"{ "altar": { "radius": 0.0 } }"#;
        assert!(matches!(
            SessionConfig::from_json(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_config_malformed_json_falls_back() {
        assert!(matches!(
            SessionConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        let config = SessionConfig::from_json_or_default("{ not json");
        assert_eq!(config.seed, SessionConfig::default().seed);
    }
}
