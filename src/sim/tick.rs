//! Fixed timestep simulation tick
//!
//! Advances one session by `dt`. Order within a tick is fixed: player,
//! altar, victory hold, spawner, enemies (by id), then torch extinguishing.

use glam::Vec2;

use super::state::{DefeatCause, GamePhase, SessionState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Desired player direction; any length, zero means stand still
    pub move_dir: Vec2,
}

/// Advance the session by one timestep
pub fn tick(state: &mut SessionState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    if !dt.is_finite() || dt <= 0.0 {
        log::warn!("Ignoring tick with dt = {}", dt);
        return;
    }

    state.clock += f64::from(dt);

    let bounds = state.config.bounds;
    if let Some(player) = state.player.as_mut() {
        player.step(input.move_dir, dt, &bounds);
    }
    state.update_altar(dt);

    state.update_victory_hold(dt);
    if state.phase != GamePhase::Playing {
        return;
    }

    state.update_spawner(dt);

    let requests = state.update_enemies(dt);
    if state.hits.defeat_latched() {
        state.enter_defeat(DefeatCause::HitLimit);
        return;
    }

    state.apply_extinguish(requests);
}
