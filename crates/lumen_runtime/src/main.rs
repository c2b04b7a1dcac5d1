//! Lumen Runtime
//!
//! Headless entry point. Generates one maze from the boot configuration,
//! places the player, key, exit and enemy, then steps the level for the
//! configured number of ticks. The player stands at spawn, slowly turning
//! and holding interact on whatever it looks at.
//!
//! Run with: cargo run -p lumen_runtime
//!       or: LUMEN_SEED=42 cargo run --bin lumen

mod boot_config;
mod session;

use boot_config::BootConfig;
use glam::Vec2;
use lumen_maze::EntityKind;
use lumen_player::PlayerMotor;
use session::{PlayerFrame, Session, SessionEvent};

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match BootConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    config.log_summary();

    let mut session = match Session::new(&config) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Maze generation failed: {}", e);
            std::process::exit(1);
        }
    };

    log::debug!("Maze:\n{}", session.grid());
    log::info!(
        "Layout: {} blocks, key mesh {} triangles",
        session.layout().blocks.len(),
        session.key_mesh().triangle_count()
    );
    for kind in EntityKind::ORDER {
        match session.placements().get(kind) {
            Some(pos) => log::info!("{} at {}", kind, pos),
            None => log::warn!("{} was not placed", kind),
        }
    }

    run(&mut session, &config);
}

/// Mouse delta applied each tick while looking around
const TURN_PER_TICK: Vec2 = Vec2::new(0.5, 0.0);

/// Step the level with a stationary player
fn run(session: &mut Session, config: &BootConfig) {
    let Some(spawn) = session.player_spawn() else {
        log::warn!("No player spawn, nothing to simulate");
        return;
    };

    let mut motor = PlayerMotor::new(config.motor.clone());
    let dt = config.session.delta_time();
    let mut chases = 0;

    for tick in 0..config.session.ticks {
        motor.look(TURN_PER_TICK);
        let frame = PlayerFrame {
            position: spawn,
            gaze: session.gaze(spawn, motor.forward()),
            hold: true,
        };
        for event in session.tick(&frame, dt) {
            match event {
                SessionEvent::Pursuit(change) => {
                    log::debug!("Tick {}: enemy {} -> {}", tick, change.from, change.to);
                    if change.to == lumen_ai::PursuitState::Chasing {
                        chases += 1;
                    }
                }
                SessionEvent::Interaction(event) => log::debug!("Tick {}: {:?}", tick, event),
                SessionEvent::Exit(event) => log::debug!("Tick {}: {:?}", tick, event),
            }
        }
    }

    log::info!(
        "Simulated {:.1}s: enemy {} (chases: {}), escaped: {}",
        session.elapsed(),
        session
            .enemy_state()
            .map_or_else(|| "absent".to_string(), |s| s.to_string()),
        chases,
        session.has_won()
    );
    if let Some(position) = session.enemy_position() {
        log::info!(
            "Enemy finished at ({:.1}, {:.1}), player holds key: {}",
            position.x,
            position.z,
            session.interactor().has_key()
        );
    }
}
