use std::io::BufRead;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use approach_app::console::{parse_line, ConsoleInput};
use approach_app::state::{AppError, AppState};
use approach_sim::SimConfig;

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    let state = AppState::new();
    state.start_simulation(config)?;
    state.send_command(approach_core::commands::PlayerCommand::StartGame)?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Ok(ConsoleInput::Command(command)) => state.send_command(command)?,
            Ok(ConsoleInput::Status) => print_status(&state)?,
            Ok(ConsoleInput::Quit) => break,
            Err(e) => warn!(input = %line, error = %e, "could not parse command"),
        }
    }

    state.shutdown()
}

/// Seed from `APPROACH_SEED`, level table from the optional first argument.
fn load_config() -> Result<SimConfig, AppError> {
    let mut config = SimConfig::default();
    if let Ok(raw) = std::env::var("APPROACH_SEED") {
        match raw.parse() {
            Ok(seed) => config.seed = seed,
            Err(_) => warn!(value = %raw, "ignoring invalid APPROACH_SEED"),
        }
    }
    if let Some(path) = std::env::args().nth(1) {
        config = SimConfig::with_levels_file(config.seed, &path)?;
        info!(%path, levels = config.levels.max_level(), "level table loaded");
    }
    Ok(config)
}

fn print_status(state: &AppState) -> Result<(), AppError> {
    let Some(snap) = state.snapshot()? else {
        info!("no tick has run yet");
        return Ok(());
    };

    info!(
        level = snap.level.current,
        spawned = snap.level.spawned,
        total = snap.level.total,
        score = snap.score.score,
        required = snap.level.score_min,
        next_spawn_secs = snap.level.next_spawn_secs,
        "status"
    );
    for ac in &snap.aircraft {
        info!(
            callsign = %ac.callsign,
            state = %ac.state,
            x = ac.position.x.round(),
            y = ac.position.y.round(),
            altitude = ac.altitude.round(),
            heading = ac.heading.round(),
            speed = ac.speed.round(),
            fuel = ac.fuel.round(),
            emergency = ?ac.emergency,
            cleared = ac.landing_refusals.is_empty(),
            "aircraft"
        );
    }
    Ok(())
}
