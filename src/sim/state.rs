//! Session state and the win/lose state machine
//!
//! One `SessionState` is one playthrough from start (or restart) to a
//! terminal Victory/Defeat. It owns the player, the enemies, the torch
//! ledger and the hit tracker; nothing here is process-global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::{EnemyId, ExtinguishRequest, HitTracker, TickContext};
use super::altar::Altar;
use super::enemy::{Enemy, EnemyParams, EnemyView};
use super::events::{EventQueue, GameEvent, HostEvent, HudSnapshot};
use super::player::{Player, PlayerView};
use super::torch::{LitChange, Torch, TorchId, TorchLedger};
use crate::consts::ENEMY_COLLISION_RADIUS;
use crate::persistence::PreferenceStore;
use crate::settings::{Difficulty, DifficultyProfile, SessionConfig};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Playing,
    Paused,
    /// Terminal until restart
    Victory,
    /// Terminal until restart
    Defeat,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }
}

/// Why the run was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatCause {
    /// The player took too many hits
    HitLimit,
    /// Every torch went out
    TorchesOut,
}

/// Comparable view of the session for the host and for tests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub lit: u32,
    pub total: u32,
    pub victory_hold: Option<f32>,
    pub spawn_timer: f32,
    pub hits: u32,
    /// Seconds of candle ignition so far, while the player is at the altar
    pub altar_progress: Option<f32>,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
}

pub struct SessionState {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub profile: DifficultyProfile,
    pub config: SessionConfig,
    /// Seconds of simulated (unpaused) time
    pub clock: f64,
    /// Remaining victory hold; `Some` while a victory is pending
    pub victory_hold: Option<f32>,
    pub spawn_timer: f32,
    pub player: Option<Player>,
    /// Live enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    pub torches: TorchLedger,
    pub altar: Option<Altar>,
    pub hits: HitTracker,
    pub events: EventQueue,
    rng: Pcg32,
    next_enemy_id: u32,
    prefs: Box<dyn PreferenceStore>,
}

impl SessionState {
    /// Create a session, reading the difficulty from `prefs`
    ///
    /// An invalid `config` is replaced by the defaults.
    pub fn new(config: SessionConfig, prefs: Box<dyn PreferenceStore>) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("{}; using default session config", err);
                SessionConfig::default()
            }
        };
        let difficulty = Difficulty::load(prefs.as_ref());
        let altar = config.altar.clone().map(Altar::new);
        log::info!(
            "Session starting on {} (seed {:#x})",
            difficulty.as_str(),
            config.seed
        );
        Self {
            phase: GamePhase::Playing,
            difficulty,
            profile: difficulty.profile(),
            rng: Pcg32::seed_from_u64(config.seed),
            hits: HitTracker::new(config.max_player_hits),
            config,
            clock: 0.0,
            victory_hold: None,
            spawn_timer: 0.0,
            player: None,
            enemies: Vec::new(),
            torches: TorchLedger::new(),
            altar,
            events: EventQueue::new(),
            next_enemy_id: 1,
            prefs,
        }
    }

    pub fn lit_count(&self) -> u32 {
        self.torches.lit_count()
    }

    pub fn total_torches(&self) -> u32 {
        self.torches.total()
    }

    /// Take every pending outbound event
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Persist a new difficulty; it takes effect on the next reset
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        difficulty.save(self.prefs.as_mut());
    }

    /// Apply an inbound host notification
    pub fn handle(&mut self, event: HostEvent) {
        match event {
            HostEvent::TorchRegistered {
                torch,
                position,
                start_lit,
                lit,
            } => self.register_torch(Torch {
                id: torch,
                position,
                start_lit,
                lit,
            }),
            HostEvent::TorchLit { torch } => self.torch_lit(torch),
            HostEvent::TorchUnlit { torch } => self.torch_unlit(torch),
            HostEvent::Pause => self.pause(),
            HostEvent::Resume => self.resume(),
            HostEvent::Restart => self.restart(),
            HostEvent::Reset => self.reset(),
            HostEvent::PlayerSpawned { position } => {
                log::info!("Player spawned at ({:.1}, {:.1})", position.x, position.y);
                self.player = Some(Player::new(position, &self.config));
            }
            HostEvent::PlayerDespawned => {
                log::info!("Player despawned");
                self.player = None;
            }
            HostEvent::PlayerMoved { position } => {
                if !self.config.bounds.contains(position) {
                    log::debug!("Player move to ({:.1}, {:.1}) clamped", position.x, position.y);
                }
                match self.player.as_mut() {
                    Some(player) => player.position = self.config.bounds.clamp(position),
                    None => log::debug!("Ignoring move for missing player"),
                }
            }
        }
    }

    pub fn register_torch(&mut self, torch: Torch) {
        log::debug!("Torch {} registered (lit: {})", torch.id.0, torch.lit);
        self.torches.register(torch);
        self.broadcast_hud();
        self.broadcast_altar();
    }

    pub fn torch_lit(&mut self, torch: TorchId) {
        if self.phase.is_terminal() {
            return;
        }
        match self.torches.set_lit(torch, true) {
            LitChange::Changed => {}
            LitChange::Unchanged => {
                log::debug!("Torch {} already lit", torch.0);
                return;
            }
            LitChange::Unknown => {
                log::warn!("Lit event for unknown torch {}", torch.0);
                return;
            }
        }
        log::info!("Torch {} lit ({}/{})", torch.0, self.lit_count(), self.total_torches());
        self.broadcast_hud();
        self.broadcast_altar();

        if self.config.require_all_lit_for_win && self.torches.all_lit() {
            log::info!(
                "All torches lit, holding for {:.1}s",
                self.config.victory_hold_seconds
            );
            self.victory_hold = Some(self.config.victory_hold_seconds);
        }
    }

    pub fn torch_unlit(&mut self, torch: TorchId) {
        if self.phase.is_terminal() {
            return;
        }
        match self.torches.set_lit(torch, false) {
            LitChange::Changed => {}
            LitChange::Unchanged => {
                log::debug!("Torch {} already out", torch.0);
                return;
            }
            LitChange::Unknown => {
                log::warn!("Unlit event for unknown torch {}", torch.0);
                return;
            }
        }
        if self.victory_hold.take().is_some() {
            log::info!("Victory hold cancelled");
        }
        log::info!("Torch {} out ({}/{})", torch.0, self.lit_count(), self.total_torches());
        self.broadcast_hud();
        self.broadcast_altar();

        if self.lit_count() == 0 && self.total_torches() > 0 {
            self.enter_defeat(DefeatCause::TorchesOut);
        }
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.set_phase(GamePhase::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.set_phase(GamePhase::Playing);
        }
    }

    /// World reset: re-read difficulty, drop enemies, restore torches and
    /// timers. Leaves the phase and hit counter alone. Safe to repeat.
    pub fn reset(&mut self) {
        self.difficulty = Difficulty::load(self.prefs.as_ref());
        self.profile = self.difficulty.profile();

        if !self.enemies.is_empty() {
            log::info!("Removing {} enemies", self.enemies.len());
        }
        self.enemies.clear();
        self.spawn_timer = 0.0;
        self.torches.reset_to_start();
        if let Some(altar) = self.altar.as_mut() {
            altar.reset();
        }
        self.victory_hold = None;

        self.events.emit(GameEvent::SessionReset);
        self.broadcast_hud();
        self.broadcast_altar();
    }

    /// Reset plus a fresh hit counter, back to Playing
    pub fn restart(&mut self) {
        log::info!("Restarting session");
        self.reset();
        self.hits.reset();
        self.set_phase(GamePhase::Playing);
    }

    pub fn enter_victory(&mut self) {
        if self.phase.is_terminal() {
            return;
        }
        log::info!("Victory!");
        self.victory_hold = None;
        self.set_phase(GamePhase::Victory);
        self.events.emit(GameEvent::Victory);
    }

    pub fn enter_defeat(&mut self, cause: DefeatCause) {
        if self.phase.is_terminal() {
            return;
        }
        log::info!("Defeat ({:?})", cause);
        self.victory_hold = None;
        self.set_phase(GamePhase::Defeat);
        self.events.emit(GameEvent::Defeat { cause });
    }

    fn set_phase(&mut self, phase: GamePhase) {
        log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.events.emit(GameEvent::StateChanged { phase });
    }

    /// Count down a pending victory; commit only if every torch is still lit
    pub(crate) fn update_victory_hold(&mut self, dt: f32) {
        let Some(remaining) = self.victory_hold.as_mut() else {
            return;
        };
        *remaining -= dt;
        if *remaining > 0.0 {
            return;
        }
        self.victory_hold = None;
        if self.torches.all_lit() {
            self.enter_victory();
        } else {
            log::info!("Victory hold expired but a torch is out");
        }
    }

    /// Let the player ignite candles at the altar. Each candle lights the
    /// lowest-id unlit torch, then the player is sent to a teleport point.
    pub(crate) fn update_altar(&mut self, dt: f32) {
        let Some(altar) = self.altar.as_mut() else {
            return;
        };
        let player_pos = match &self.player {
            Some(player) if self.torches.lit_count() < self.torches.total() => player.position,
            _ => {
                altar.reset();
                return;
            }
        };
        if !altar.update(player_pos, dt) {
            return;
        }
        let teleport = altar.teleport_point(&mut self.rng);

        let Some(torch) = self.torches.iter().find(|t| !t.lit).map(|t| t.id) else {
            return;
        };
        self.torch_lit(torch);
        log::info!("Candle lit at the altar ({}/{})", self.lit_count(), self.total_torches());
        self.events.emit(GameEvent::CandleLit {
            torch,
            lit: self.lit_count(),
            total: self.total_torches(),
        });

        if let (Some(point), Some(player)) = (teleport, self.player.as_mut()) {
            player.position = self.config.bounds.clamp(point);
            self.events.emit(GameEvent::PlayerTeleported {
                position: player.position,
            });
        }
    }

    pub(crate) fn update_spawner(&mut self, dt: f32) {
        self.spawn_timer -= dt;
        if self.spawn_timer > 0.0 {
            return;
        }
        self.spawn_timer = self.profile.spawn_interval_seconds;
        if self.enemies.len() < self.profile.max_enemies {
            self.spawn_enemy();
            self.broadcast_hud();
        }
    }

    /// Spawn one enemy at a random spawn point (or the fallback origin)
    pub fn spawn_enemy(&mut self) -> EnemyId {
        let position = if self.config.spawn_points.is_empty() {
            self.config.fallback_spawn
        } else {
            let index = self.rng.random_range(0..self.config.spawn_points.len());
            self.config.spawn_points[index]
        };
        let position = self.config.bounds.clamp(position);

        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        let params = EnemyParams::from_profile(&self.profile, &self.config);
        let enemy = Enemy::new(
            id,
            position,
            params,
            self.config.enemy_hitbox * 0.5,
            &self.config.bounds,
            &mut self.rng,
        );
        self.enemies.push(enemy);

        log::info!(
            "Enemy {} spawned at ({:.1}, {:.1}) [{}/{}]",
            id.0,
            position.x,
            position.y,
            self.enemies.len(),
            self.profile.max_enemies
        );
        self.events.emit(GameEvent::EnemySpawned {
            enemy: id,
            position,
            collision_radius: ENEMY_COLLISION_RADIUS,
        });
        id
    }

    /// Update every enemy in id order. Stops early once the hit tracker
    /// latches defeat.
    pub(crate) fn update_enemies(&mut self, dt: f32) -> Vec<ExtinguishRequest> {
        let mut requests = Vec::new();
        let mut ctx = TickContext {
            now: self.clock,
            bounds: &self.config.bounds,
            player: self.player.as_ref(),
            torches: &self.torches,
            torch_half_extent: self.config.torch_half_extent,
            hits: &mut self.hits,
            events: &mut self.events,
            rng: &mut self.rng,
            extinguish: &mut requests,
        };
        for enemy in self.enemies.iter_mut() {
            enemy.update(dt, &mut ctx);
            if ctx.hits.defeat_latched() {
                break;
            }
        }
        requests
    }

    pub(crate) fn apply_extinguish(&mut self, requests: Vec<ExtinguishRequest>) {
        for request in requests {
            let lit = self.torches.get(request.torch).is_some_and(|t| t.lit);
            if !lit || self.phase.is_terminal() {
                continue;
            }
            log::info!(
                "Enemy {} extinguished torch {}",
                request.enemy.0,
                request.torch.0
            );
            self.events.emit(GameEvent::TorchExtinguished {
                torch: request.torch,
                enemy: request.enemy,
            });
            self.torch_unlit(request.torch);
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            lit: self.lit_count(),
            total: self.total_torches(),
            difficulty: self.difficulty,
            enemies: self.enemies.len(),
        }
    }

    fn broadcast_hud(&mut self) {
        let hud = self.hud();
        self.events.emit(GameEvent::Hud(hud));
    }

    fn broadcast_altar(&mut self) {
        let lit = self.lit_count();
        let frame = lit.min(self.config.altar_frames.saturating_sub(1));
        self.events.emit(GameEvent::Altar {
            lit,
            total: self.total_torches(),
            frame,
        });
    }

    pub fn player_view(&self) -> Option<PlayerView> {
        self.player.as_ref().map(Player::view)
    }

    pub fn enemy_views(&self) -> Vec<EnemyView> {
        self.enemies.iter().map(Enemy::view).collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            difficulty: self.difficulty,
            lit: self.lit_count(),
            total: self.total_torches(),
            victory_hold: self.victory_hold,
            spawn_timer: self.spawn_timer,
            hits: self.hits.hits(),
            altar_progress: self.altar.as_ref().and_then(Altar::progress),
            player: self.player_view(),
            enemies: self.enemy_views(),
        }
    }

    /// Player position, if one is spawned
    pub fn player_position(&self) -> Option<Vec2> {
        self.player.as_ref().map(|p| p.position)
    }
}
