//! Game loop thread: runs the airspace every 30 ms and publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses a thread
//! boundary. Commands arrive via `mpsc` channel. Snapshots are stored in
//! shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use approach_core::constants::{DT, TICK_INTERVAL_MS};
use approach_core::events::SimEvent;
use approach_core::state::GameStateSnapshot;
use approach_sim::{Airspace, SimConfig};

use crate::state::LoopCommand;

/// Wall-clock duration of one tick.
const TICK_DURATION: Duration = Duration::from_millis(TICK_INTERVAL_MS);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> (mpsc::Sender<LoopCommand>, JoinHandle<()>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("approach-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })
        .expect("Failed to spawn game loop thread");

    (cmd_tx, handle)
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    info!(seed = config.seed, levels = config.levels.max_level(), "game loop started");
    let mut airspace = Airspace::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Player(cmd)) => {
                    debug!(?cmd, "command received");
                    airspace.queue_command(cmd);
                }
                Ok(LoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (the airspace ignores ticks while halted)
        let snapshot = airspace.tick(DT);
        report_outcomes(&snapshot);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Surface level outcomes to the console player.
fn report_outcomes(snapshot: &GameStateSnapshot) {
    for event in &snapshot.events {
        match event {
            SimEvent::LevelComplete { level, score } => {
                info!(level, score, "level cleared, type `next` to continue");
            }
            SimEvent::GameOver { level, score } => {
                info!(level, score, "game over, type `restart` to try again");
            }
            SimEvent::CampaignComplete { score } => {
                info!(score, "every level cleared");
            }
            _ => {}
        }
    }
}
