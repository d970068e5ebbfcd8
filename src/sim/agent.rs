//! Shared agent contract and per-tick context
//!
//! Enemies never reach into the session directly: everything they read or
//! write during a tick goes through `TickContext`.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::events::EventQueue;
use super::motion::Bounds;
use super::player::Player;
use super::torch::{TorchId, TorchLedger};

/// Anything with a position, facing and hitbox taking part in perception,
/// motion and hit detection.
pub trait Agent {
    fn position(&self) -> Vec2;
    /// Last nonzero movement direction (unit length, or zero if never moved)
    fn facing(&self) -> Vec2;
    fn half_extent(&self) -> Vec2;

    /// Hitbox at the agent's current position
    fn hitbox(&self) -> Aabb {
        Aabb::from_center(self.position(), self.half_extent())
    }
}

/// Enemy identifier, allocated by the session at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyId(pub u32);

/// Result of recording a hit on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Hit counted; the player survives
    Counted { hits: u32 },
    /// Hit counted and it was the fatal one. Returned exactly once.
    Fatal { hits: u32 },
    /// Defeat already latched; nothing changes
    Ignored,
}

/// Cumulative player hits across all enemies plus the one-shot defeat latch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitTracker {
    hits: u32,
    limit: u32,
    defeat_latched: bool,
}

impl HitTracker {
    pub fn new(limit: u32) -> Self {
        Self {
            hits: 0,
            limit: limit.max(1),
            defeat_latched: false,
        }
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn defeat_latched(&self) -> bool {
        self.defeat_latched
    }

    /// Count a hit. The counter is bumped before the threshold check and the
    /// latch is set the first time the limit is reached.
    pub fn record_hit(&mut self) -> HitOutcome {
        if self.defeat_latched {
            return HitOutcome::Ignored;
        }
        self.hits += 1;
        if self.hits >= self.limit {
            self.defeat_latched = true;
            HitOutcome::Fatal { hits: self.hits }
        } else {
            HitOutcome::Counted { hits: self.hits }
        }
    }

    pub fn reset(&mut self) {
        self.hits = 0;
        self.defeat_latched = false;
    }
}

/// An enemy asking for a torch to go out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtinguishRequest {
    pub torch: TorchId,
    pub enemy: EnemyId,
}

/// Everything an enemy may read or write during its update
pub struct TickContext<'a> {
    /// Session clock (seconds of unpaused simulation)
    pub now: f64,
    pub bounds: &'a Bounds,
    /// `None` until the host spawns the player
    pub player: Option<&'a Player>,
    pub torches: &'a TorchLedger,
    pub torch_half_extent: f32,
    pub hits: &'a mut HitTracker,
    pub events: &'a mut EventQueue,
    pub rng: &'a mut Pcg32,
    pub extinguish: &'a mut Vec<ExtinguishRequest>,
}
