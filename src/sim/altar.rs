//! Altar candle ignition
//!
//! Standing next to the altar long enough lights a candle. Walking away
//! before it catches throws the progress away.

use glam::Vec2;
use rand::Rng;

use crate::settings::AltarConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Altar {
    pub config: AltarConfig,
    /// Seconds spent igniting; `None` while the player is away
    progress: Option<f32>,
}

impl Altar {
    pub fn new(config: AltarConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    pub fn progress(&self) -> Option<f32> {
        self.progress
    }

    pub fn reset(&mut self) {
        self.progress = None;
    }

    /// Advance ignition for a player standing at `player_pos`. Returns true
    /// on the tick a candle catches.
    pub fn update(&mut self, player_pos: Vec2, dt: f32) -> bool {
        if player_pos.distance(self.config.position) >= self.config.radius {
            if self.progress.take().is_some() {
                log::debug!("Altar ignition interrupted");
            }
            return false;
        }

        let progress = self.progress.get_or_insert(0.0);
        *progress += dt;
        if *progress < self.config.ignite_seconds {
            return false;
        }
        self.progress = None;
        true
    }

    /// Pick where to send the player after a candle lights
    pub fn teleport_point(&self, rng: &mut impl Rng) -> Option<Vec2> {
        let points = &self.config.teleport_points;
        if points.is_empty() {
            return None;
        }
        Some(points[rng.random_range(0..points.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_ignites_after_dwell_time() {
        let mut altar = Altar::new(AltarConfig::default());
        let near = Vec2::new(1.0, 1.0);

        for _ in 0..14 {
            assert!(!altar.update(near, 0.1));
        }
        assert!(altar.progress().is_some());
        assert!(altar.update(near, 0.2));
        assert_eq!(altar.progress(), None);
    }

    #[test]
    fn test_leaving_discards_progress() {
        let mut altar = Altar::new(AltarConfig::default());
        let near = Vec2::new(0.0, 2.0);
        let far = Vec2::new(0.0, 2.5);

        for _ in 0..10 {
            altar.update(near, 0.1);
        }
        assert!(!altar.update(far, 0.1));
        assert_eq!(altar.progress(), None);

        // Starting over needs the full dwell time again
        for _ in 0..10 {
            assert!(!altar.update(near, 0.1));
        }
    }

    #[test]
    fn test_teleport_points() {
        let mut rng = Pcg32::seed_from_u64(7);
        let altar = Altar::new(AltarConfig::default());
        for _ in 0..20 {
            let p = altar.teleport_point(&mut rng).expect("corner");
            assert_eq!(p.abs(), Vec2::splat(9.0));
        }

        let stay = Altar::new(AltarConfig {
            teleport_points: Vec::new(),
            ..Default::default()
        });
        assert_eq!(stay.teleport_point(&mut rng), None);
    }
}
