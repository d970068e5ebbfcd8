//! Typed messages at the session boundary
//!
//! `HostEvent`s flow in from the host (torch changes, pause/resume, player
//! lifecycle). `GameEvent`s flow out and are drained by the host once per
//! frame; the session never calls into host objects directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::EnemyId;
use super::state::{DefeatCause, GamePhase};
use super::torch::TorchId;
use crate::settings::Difficulty;

/// Notifications the host sends to the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    /// A torch exists in the level (sent once per torch at level load)
    TorchRegistered {
        torch: TorchId,
        position: Vec2,
        #[serde(default)]
        start_lit: bool,
        #[serde(default)]
        lit: bool,
    },
    TorchLit {
        torch: TorchId,
    },
    TorchUnlit {
        torch: TorchId,
    },
    Pause,
    Resume,
    /// Full reset back to Playing with a fresh hit counter
    Restart,
    /// World reset (enemies, torches, timers) without changing the phase
    Reset,
    /// Player (re)spawned; replaces any previous player
    PlayerSpawned {
        position: Vec2,
    },
    PlayerDespawned,
    /// Host-driven teleport of the player
    PlayerMoved {
        position: Vec2,
    },
}

/// Aggregate HUD state, re-broadcast on every change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub lit: u32,
    pub total: u32,
    pub difficulty: Difficulty,
    pub enemies: usize,
}

/// Notifications the session emits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    StateChanged {
        phase: GamePhase,
    },
    /// Terminal; emitted once per session
    Victory,
    /// Terminal; emitted once per session
    Defeat {
        cause: DefeatCause,
    },
    Hud(HudSnapshot),
    /// Altar candle display (`frame` is the sprite frame to show)
    Altar {
        lit: u32,
        total: u32,
        frame: u32,
    },
    EnemySpawned {
        enemy: EnemyId,
        position: Vec2,
        collision_radius: f32,
    },
    PlayerHit {
        enemy: EnemyId,
        hits: u32,
        max_hits: u32,
    },
    TorchExtinguished {
        torch: TorchId,
        enemy: EnemyId,
    },
    /// The player lit a candle at the altar, lighting `torch`
    CandleLit {
        torch: TorchId,
        lit: u32,
        total: u32,
    },
    /// The session moved the player
    PlayerTeleported {
        position: Vec2,
    },
    SessionReset,
}

/// Outbound events collected during ticks and event handling
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every pending event, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drain_empties() {
        let mut queue = EventQueue::new();
        queue.emit(GameEvent::Victory);
        queue.emit(GameEvent::SessionReset);
        assert!(!queue.is_empty());

        let drained = queue.drain();
        assert_eq!(drained, vec![GameEvent::Victory, GameEvent::SessionReset]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_host_event_json() {
        let event: HostEvent =
            serde_json::from_str(r#"{ "type": "torch_lit", "torch": 3 }"#).expect("parse");
        assert_eq!(event, HostEvent::TorchLit { torch: TorchId(3) });

        let event: HostEvent = serde_json::from_str(
            r#"{ "type": "torch_registered", "torch": 1, "position": [8.0, -8.0] }"#,
        )
        .expect("parse");
        assert_eq!(
            event,
            HostEvent::TorchRegistered {
                torch: TorchId(1),
                position: Vec2::new(8.0, -8.0),
                start_lit: false,
                lit: false,
            }
        );

        let event: HostEvent = serde_json::from_str(r#"{ "type": "pause" }"#).expect("parse");
        assert_eq!(event, HostEvent::Pause);
    }

    #[test]
    fn test_game_event_json_is_tagged() {
        let json = serde_json::to_string(&GameEvent::Hud(HudSnapshot {
            lit: 2,
            total: 4,
            difficulty: Difficulty::Hard,
            enemies: 1,
        }))
        .expect("serialize");
        assert!(json.contains(r#""type":"hud""#));
        assert!(json.contains(r#""lit":2"#));
    }
}
