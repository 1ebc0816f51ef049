//! Cube Hopper headless driver
//!
//! Runs the simulation for a configured number of frames (the autopilot
//! plays by default), logs gameplay events and prints the final frame as
//! JSON on stdout.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cube_hopper::Settings;
    use cube_hopper::hud::{FrameSnapshot, Hud};
    use cube_hopper::sim::{GameEvent, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Cube Hopper (headless) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });

    let mut state = GameState::new(seed);
    state.speed = settings.speed;
    log::info!("Game initialized with seed: {}", seed);

    let input = TickInput {
        autopilot: settings.autopilot,
        ..Default::default()
    };

    for frame in 0..settings.demo_frames {
        tick(&mut state, &input, settings.frame_dt);
        for event in &state.events {
            match event {
                GameEvent::CoinCollected(_) | GameEvent::FellOff => {
                    log::debug!("frame {}: {:?}", frame, event)
                }
                _ => log::info!("frame {}: {:?}", frame, event),
            }
        }
        if state.quit_requested {
            break;
        }
    }

    let hud = Hud::from_state(&state);
    log::info!(
        "{} | level {} | lives {} | points {} | {}",
        hud.status_text(),
        hud.level,
        hud.lives,
        hud.points,
        hud.clock
    );

    match serde_json::to_string_pretty(&FrameSnapshot::capture(&state)) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // A web frontend drives `sim::tick` itself
}
