//! Candelarium entry point
//!
//! The browser build is driven from JS through `platform::web`. Natively this
//! runs a headless scripted playthrough and logs what happens.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use candelarium::SessionConfig;
    use candelarium::platform::init_logging;

    init_logging();
    log::info!("Candelarium (native) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => SessionConfig::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read {}: {}, using defaults", path, e);
                SessionConfig::default()
            }
        },
        None => SessionConfig::default(),
    };

    headless::run(config);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use candelarium::SessionConfig;
    use candelarium::consts::SIM_DT;
    use candelarium::persistence::MemoryStore;
    use candelarium::sim::{GameEvent, GamePhase, HostEvent, SessionState, TickInput, TorchId, tick};

    const TORCHES: [Vec2; 4] = [
        Vec2::new(-8.0, -8.0),
        Vec2::new(8.0, -8.0),
        Vec2::new(8.0, 8.0),
        Vec2::new(-8.0, 8.0),
    ];
    const LIGHT_RANGE: f32 = 1.0;
    const TIME_LIMIT: f32 = 120.0;

    /// Walk the player from torch to torch, lighting each on arrival
    pub fn run(config: SessionConfig) {
        let mut session = SessionState::new(config, Box::new(MemoryStore::new()));
        for (id, position) in TORCHES.iter().enumerate() {
            session.handle(HostEvent::TorchRegistered {
                torch: TorchId(id as u32),
                position: *position,
                start_lit: false,
                lit: false,
            });
        }
        session.handle(HostEvent::PlayerSpawned {
            position: Vec2::new(0.0, -9.0),
        });

        let mut input = TickInput::default();
        let ticks = (TIME_LIMIT / SIM_DT) as usize;
        for _ in 0..ticks {
            let Some(player) = session.player_position() else {
                break;
            };

            let next = session
                .torches
                .iter()
                .filter(|t| !t.lit)
                .min_by(|a, b| {
                    a.position
                        .distance_squared(player)
                        .total_cmp(&b.position.distance_squared(player))
                })
                .map(|t| (t.id, t.position));

            input.move_dir = match next {
                Some((id, position)) if position.distance(player) <= LIGHT_RANGE => {
                    session.handle(HostEvent::TorchLit { torch: id });
                    Vec2::ZERO
                }
                Some((_, position)) => position - player,
                None => Vec2::ZERO,
            };

            tick(&mut session, &input, SIM_DT);
            report(session.drain_events());

            if matches!(session.phase, GamePhase::Victory | GamePhase::Defeat) {
                break;
            }
        }

        let snapshot = session.snapshot();
        log::info!(
            "Finished in {:?} after {:.1}s: {}/{} torches lit, {} hits, {} enemies",
            snapshot.phase,
            session.clock,
            snapshot.lit,
            snapshot.total,
            snapshot.hits,
            snapshot.enemies.len()
        );
    }

    fn report(events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::Hud(_) | GameEvent::Altar { .. } => log::debug!("{:?}", event),
                _ => log::info!("{:?}", event),
            }
        }
    }
}
