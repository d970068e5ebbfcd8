//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (enemies and torches by ID)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod agent;
pub mod altar;
pub mod collision;
pub mod enemy;
pub mod events;
pub mod motion;
pub mod perception;
pub mod player;
pub mod presentation;
pub mod state;
pub mod tick;
pub mod torch;

pub use aabb::Aabb;
pub use agent::{Agent, EnemyId, HitOutcome, HitTracker};
pub use altar::Altar;
pub use collision::{aabb_overlap, agent_touches_box, agents_touch};
pub use enemy::{Enemy, EnemyParams, EnemyState, EnemyView};
pub use events::{EventQueue, GameEvent, HostEvent, HudSnapshot};
pub use motion::{Bounds, Step, seek_toward};
pub use perception::is_target_in_sight;
pub use player::{Player, PlayerView};
pub use presentation::{SpriteFacing, VisionCone};
pub use state::{DefeatCause, GamePhase, SessionSnapshot, SessionState};
pub use tick::{TickInput, tick};
pub use torch::{Torch, TorchId, TorchLedger};
