//! Application state shared between the console and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;
use tracing::info;

use approach_core::commands::PlayerCommand;
use approach_core::config::ConfigError;
use approach_core::state::GameStateSnapshot;
use approach_sim::SimConfig;

use crate::game_loop;

/// Commands sent from the console to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the airspace.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop has stopped")]
    LoopStopped,
    #[error("shared state poisoned")]
    Poisoned,
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state.
///
/// `mpsc::Sender` is wrapped in a `Mutex` so the state stays `Sync`.
pub struct AppState {
    /// `None` before `start_simulation` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop thread unless it is already running.
    pub fn start_simulation(&self, config: SimConfig) -> Result<(), AppError> {
        let mut tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        if tx_lock.is_some() {
            return Err(AppError::AlreadyRunning);
        }

        let (cmd_tx, handle) = game_loop::spawn_game_loop(config, self.latest_snapshot.clone());
        *tx_lock = Some(cmd_tx);
        *self.loop_handle.lock().map_err(|_| AppError::Poisoned)? = Some(handle);
        Ok(())
    }

    /// Forward a player command to the game loop.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), AppError> {
        let tx_lock = self.command_tx.lock().map_err(|_| AppError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(LoopCommand::Player(command))
                .map_err(|_| AppError::LoopStopped),
            None => Err(AppError::NotStarted),
        }
    }

    /// Latest published snapshot, if any tick has run.
    pub fn snapshot(&self) -> Result<Option<GameStateSnapshot>, AppError> {
        let lock = self.latest_snapshot.lock().map_err(|_| AppError::Poisoned)?;
        Ok(lock.clone())
    }

    /// Stop the game loop and wait for its thread to exit.
    pub fn shutdown(&self) -> Result<(), AppError> {
        if let Some(tx) = self.command_tx.lock().map_err(|_| AppError::Poisoned)?.take() {
            // The loop may already be gone.
            let _ = tx.send(LoopCommand::Shutdown);
        }
        if let Some(handle) = self.loop_handle.lock().map_err(|_| AppError::Poisoned)?.take() {
            if handle.join().is_err() {
                return Err(AppError::LoopStopped);
            }
            info!("game loop stopped");
        }
        Ok(())
    }
}
