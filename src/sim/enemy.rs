//! Enemy AI: wander/chase state machine with a vision cone
//!
//! Each update runs, in order: wander re-roll, perception, chase hysteresis,
//! movement, player hit check and torch contact. An enemy finishes its whole
//! update before the next one starts.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, EnemyId, ExtinguishRequest, HitOutcome, TickContext};
use super::collision::{agent_touches_box, agents_touch};
use super::events::GameEvent;
use super::motion::{Bounds, seek_toward};
use super::perception::{DEFAULT_FACING, is_target_in_sight};
use super::player::Player;
use super::presentation::{SpriteFacing, VisionCone};
use super::torch::TorchId;
use crate::settings::{DifficultyProfile, SessionConfig};

/// Slack when comparing elapsed clock time against the hit cooldown, so a
/// cooldown that is a whole number of ticks is not pushed one tick late by
/// float accumulation
const COOLDOWN_EPSILON: f64 = 1e-6;

/// Behaviour tuning injected at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyParams {
    pub speed_wander: f32,
    pub speed_chase: f32,
    pub sight_distance: f32,
    pub sight_angle_degrees: f32,
    /// Base wander re-roll interval; actual interval is in `[base, 2*base]`
    pub wander_change_interval: f32,
    pub hit_cooldown: f32,
    pub chase_lose_time: f32,
    /// Seconds of contact before a lit torch goes out (0 disables)
    pub extinguish_time: f32,
}

impl EnemyParams {
    pub fn from_profile(profile: &DifficultyProfile, config: &SessionConfig) -> Self {
        Self {
            speed_wander: profile.enemy_speed_wander,
            speed_chase: profile.enemy_speed_chase,
            sight_distance: profile.sight_distance,
            sight_angle_degrees: profile.sight_angle_degrees,
            wander_change_interval: config.wander_change_interval,
            hit_cooldown: config.hit_cooldown,
            chase_lose_time: config.chase_lose_time,
            extinguish_time: profile.extinguish_time_seconds,
        }
    }
}

/// Enemy behaviour state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyState {
    Wander,
    /// `lose_timer` counts down only while the player is out of sight
    Chase { lose_timer: Option<f32> },
}

impl EnemyState {
    pub fn is_chasing(&self) -> bool {
        matches!(self, EnemyState::Chase { .. })
    }
}

/// Continuous contact with a lit torch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct TorchContact {
    torch: TorchId,
    elapsed: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub position: Vec2,
    /// Last nonzero movement direction
    pub facing: Vec2,
    pub state: EnemyState,
    /// Where the enemy is heading: a wander point, or the player while chasing
    pub target: Vec2,
    pub wander_timer: f32,
    /// Session clock time of this enemy's last hit on the player
    pub last_hit_at: Option<f64>,
    pub half_extent: Vec2,
    pub params: EnemyParams,
    torch_contact: Option<TorchContact>,
}

impl Enemy {
    pub fn new(
        id: EnemyId,
        position: Vec2,
        params: EnemyParams,
        half_extent: Vec2,
        bounds: &Bounds,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            id,
            position,
            facing: DEFAULT_FACING,
            state: EnemyState::Wander,
            target: random_point(bounds, rng),
            wander_timer: 0.0,
            last_hit_at: None,
            half_extent,
            params,
            torch_contact: None,
        }
    }

    /// Whether `target` is inside this enemy's vision cone right now
    pub fn can_see(&self, target: Vec2) -> bool {
        is_target_in_sight(
            self.position,
            self.facing,
            target,
            self.params.sight_distance,
            self.params.sight_angle_degrees,
        )
    }

    /// Advance this enemy by `dt` seconds
    pub fn update(&mut self, dt: f32, ctx: &mut TickContext<'_>) {
        self.update_wander_target(dt, ctx);

        if let Some(player) = ctx.player {
            self.update_perception(dt, player);
        }

        let speed = if self.state.is_chasing() {
            self.params.speed_chase
        } else {
            self.params.speed_wander
        };
        let step = seek_toward(self.position, self.facing, self.target, speed, dt, ctx.bounds);
        self.position = step.position;
        self.facing = step.facing;

        if let Some(player) = ctx.player {
            self.check_player_contact(player, ctx);
        }
        self.update_torch_contact(dt, ctx);
    }

    fn update_wander_target(&mut self, dt: f32, ctx: &mut TickContext<'_>) {
        self.wander_timer -= dt;
        if self.wander_timer <= 0.0 && self.state == EnemyState::Wander {
            self.target = random_point(ctx.bounds, ctx.rng);
            let base = self.params.wander_change_interval;
            self.wander_timer = base + ctx.rng.random::<f32>() * base;
        }
    }

    fn update_perception(&mut self, dt: f32, player: &Player) {
        if self.can_see(player.position) {
            if !self.state.is_chasing() {
                log::debug!("Enemy {} spotted the player", self.id.0);
                self.state = EnemyState::Chase { lose_timer: None };
            }
            self.target = player.position;
        } else if let EnemyState::Chase { lose_timer } = &mut self.state {
            let remaining = lose_timer.get_or_insert(self.params.chase_lose_time);
            *remaining -= dt;
            if *remaining <= 0.0 {
                log::debug!("Enemy {} lost the player", self.id.0);
                self.state = EnemyState::Wander;
            }
        }
    }

    fn check_player_contact(&mut self, player: &Player, ctx: &mut TickContext<'_>) {
        if !agents_touch(self, player) {
            return;
        }
        let off_cooldown = match self.last_hit_at {
            None => true,
            Some(at) => ctx.now - at + COOLDOWN_EPSILON >= f64::from(self.params.hit_cooldown),
        };
        if !off_cooldown {
            return;
        }

        let hits = match ctx.hits.record_hit() {
            HitOutcome::Ignored => return,
            HitOutcome::Counted { hits } => {
                log::info!("Player hit by enemy {} ({}/{})", self.id.0, hits, ctx.hits.limit());
                hits
            }
            HitOutcome::Fatal { hits } => {
                log::info!("Player defeated by enemy {} ({}/{})", self.id.0, hits, ctx.hits.limit());
                hits
            }
        };
        self.last_hit_at = Some(ctx.now);
        ctx.events.emit(GameEvent::PlayerHit {
            enemy: self.id,
            hits,
            max_hits: ctx.hits.limit(),
        });
    }

    fn update_torch_contact(&mut self, dt: f32, ctx: &mut TickContext<'_>) {
        if self.params.extinguish_time <= 0.0 {
            return;
        }
        let touching = ctx
            .torches
            .iter()
            .find(|t| t.lit && agent_touches_box(self, t.position, ctx.torch_half_extent))
            .map(|t| t.id);

        self.torch_contact = match (touching, self.torch_contact) {
            (Some(torch), Some(contact)) if contact.torch == torch => Some(TorchContact {
                torch,
                elapsed: contact.elapsed + dt,
            }),
            (Some(torch), _) => Some(TorchContact { torch, elapsed: dt }),
            (None, _) => None,
        };

        if let Some(contact) = self.torch_contact {
            if contact.elapsed >= self.params.extinguish_time {
                ctx.extinguish.push(ExtinguishRequest {
                    torch: contact.torch,
                    enemy: self.id,
                });
                self.torch_contact = None;
            }
        }
    }

    pub fn view(&self) -> EnemyView {
        let sprite = SpriteFacing::from_direction(self.facing);
        EnemyView {
            id: self.id,
            position: self.position,
            facing: self.facing,
            chasing: self.state.is_chasing(),
            sprite,
            cone: VisionCone::new(sprite, self.params.sight_distance, self.state.is_chasing()),
        }
    }
}

impl Agent for Enemy {
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

/// What the host needs to draw an enemy and its vision cone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub position: Vec2,
    pub facing: Vec2,
    pub chasing: bool,
    pub sprite: SpriteFacing,
    pub cone: VisionCone,
}

/// Uniform random point inside `bounds`
pub fn random_point(bounds: &Bounds, rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.random_range(bounds.min.x..=bounds.max.x),
        rng.random_range(bounds.min.y..=bounds.max.y),
    )
}
