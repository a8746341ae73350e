//! Simulation engine: the Airspace.
//!
//! `Airspace` owns the hecs ECS world, processes player commands, runs all
//! systems, and produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;
use std::path::Path;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use tracing::{debug, info, trace, warn};

use approach_core::commands::{AircraftCommand, PlayerCommand};
use approach_core::components::Aircraft;
use approach_core::config::{AirspaceGeometry, ConfigError, LevelConfig, LevelTable};
use approach_core::enums::LandingRefusal;
use approach_core::events::SimEvent;
use approach_core::state::GameStateSnapshot;
use approach_core::types::SimTime;
use approach_flight::clearance::landing_clearance_errors;
use approach_flight::control::apply_command;

use crate::session::{ScoreState, SessionState};
use crate::systems;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub geometry: AirspaceGeometry,
    pub levels: LevelTable,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            geometry: AirspaceGeometry::default(),
            levels: LevelTable::standard(),
        }
    }
}

impl SimConfig {
    /// Parse a full configuration. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Default configuration with the level table read from a JSON file.
    pub fn with_levels_file(seed: u64, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self {
            seed,
            levels: LevelTable::from_path(path)?,
            ..Default::default()
        })
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct Airspace {
    world: World,
    geometry: AirspaceGeometry,
    levels: LevelTable,
    time: SimTime,
    rng: ChaCha8Rng,
    /// Id handed to the next spawned aircraft. Never reused within a session.
    next_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,
    score: ScoreState,
    session: SessionState,
}

impl Airspace {
    /// Create a new, idle airspace at level 1.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            geometry: config.geometry,
            levels: config.levels,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_id: 1,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            score: ScoreState::default(),
            session: SessionState::new(false),
        }
    }

    /// Queue a player command for processing at the next `update`.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Queue an instruction for one aircraft. Unknown callsigns are ignored
    /// when the command is processed.
    pub fn issue_command(&mut self, callsign: impl Into<String>, command: AircraftCommand) {
        self.queue_command(PlayerCommand::Aircraft {
            callsign: callsign.into(),
            command,
        });
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        self.update(dt);

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Apply queued commands, then run one simulation step.
    ///
    /// Commands are applied even while halted so session commands can start
    /// or restart play. The step itself is a no-op unless the session is
    /// running and the current level is still open.
    pub fn update(&mut self, dt: f64) {
        self.process_commands();

        if !self.session.running || self.session.is_resolved() {
            return;
        }

        let level = *self.levels.get(self.session.level);

        // 1. Spawn scheduling
        systems::spawner::run(
            &mut self.world,
            &mut self.rng,
            &self.geometry,
            &level,
            &mut self.session,
            &mut self.next_id,
            &mut self.events,
            dt,
        );
        // 2. Emergency injection
        systems::incidents::run(
            &mut self.world,
            &mut self.rng,
            self.session.level,
            &mut self.events,
        );
        // 3. Terminal scoring, then retention
        systems::scoring::run(&mut self.world, &mut self.score, &mut self.events);
        systems::cleanup::expire(&mut self.world, dt, &mut self.despawn_buffer);
        // 4. Fuel exhaustion
        systems::fuel::run(&mut self.world, &mut self.events);
        // 5. Flight physics and touchdown
        systems::flight::run(&mut self.world, &self.geometry, dt, &mut self.events);
        // 6. Far out-of-bounds filter
        systems::cleanup::drop_far_out_of_bounds(
            &mut self.world,
            &self.geometry,
            &mut self.despawn_buffer,
        );
        // 7. Mid-air collisions
        systems::collision::run(&mut self.world, &mut self.events);
        // 8. Level progression
        systems::progression::run(
            &self.world,
            &level,
            &self.score,
            &mut self.session,
            &mut self.events,
        );

        self.time.advance(dt);
        trace!(
            tick = self.time.tick,
            aircraft = self.world.len(),
            score = self.score.score,
            "tick"
        );
    }

    /// Read-only view of the current state. Pending events stay queued for
    /// the next tick's snapshot.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.build_snapshot(Vec::new())
    }

    /// Start a fresh session at level 1. Score, statistics, pending events
    /// and queued commands are cleared.
    pub fn reset(&mut self) {
        self.command_queue.clear();
        self.reset_session();
    }

    fn reset_session(&mut self) {
        self.world.clear();
        self.session = SessionState::new(true);
        self.score = ScoreState::default();
        self.next_id = 1;
        self.time = SimTime::default();
        self.events.clear();
        info!("session reset");
    }

    /// Move to the next level, keeping score and statistics.
    ///
    /// Past the last configured level the campaign ends: `game_over` is set
    /// and `level_complete` cleared.
    pub fn advance_level(&mut self) {
        if self.session.level < self.levels.max_level() {
            self.world.clear();
            self.session.level += 1;
            self.session.planes_spawned = 0;
            self.session.spawn_clock = 0.0;
            self.session.level_complete = false;
            self.session.game_over = false;
            self.session.running = true;
            info!(level = self.session.level, score = self.score.score, "level started");
        } else {
            self.session.level_complete = false;
            self.session.game_over = true;
            info!(score = self.score.score, "campaign complete");
            self.events.push(SimEvent::CampaignComplete {
                score: self.score.score,
            });
        }
    }

    /// Let the simulation run.
    pub fn start(&mut self) {
        self.session.running = true;
    }

    /// Abandon the session: back to level 1, halted.
    pub fn surrender(&mut self) {
        self.reset();
        self.session.running = false;
    }

    /// Seconds until the next aircraft appears, 0 once the quota is issued.
    pub fn time_before_next_spawn(&self) -> f64 {
        systems::progression::time_before_next_spawn(self.level_config(), &self.session)
    }

    /// Reasons a landing clearance would be refused, or `None` for an unknown callsign.
    pub fn landing_clearance(&self, callsign: &str) -> Option<Vec<LandingRefusal>> {
        self.world
            .query::<&Aircraft>()
            .iter()
            .find(|(_, ac)| ac.callsign == callsign)
            .map(|(_, ac)| landing_clearance_errors(ac, &self.geometry))
    }

    /// Get the session flags and level progress.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Get the running score.
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn geometry(&self) -> &AirspaceGeometry {
        &self.geometry
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    /// Parameters of the level being played.
    pub fn level_config(&self) -> &LevelConfig {
        self.levels.get(self.session.level)
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn one aircraft immediately, bypassing the spawn clock (for testing).
    #[cfg(test)]
    pub fn spawn_test_aircraft(&mut self) -> Option<hecs::Entity> {
        let level = *self.levels.get(self.session.level);
        systems::spawner::spawn_next(
            &mut self.world,
            &mut self.rng,
            &self.geometry,
            &level,
            &mut self.session,
            &mut self.next_id,
            &mut self.events,
        )
    }

    /// Insert a fully specified aircraft, counted against the level quota (for testing).
    #[cfg(test)]
    pub fn insert_test_aircraft(&mut self, aircraft: Aircraft) -> hecs::Entity {
        self.next_id = self.next_id.max(aircraft.id + 1);
        self.session.planes_spawned += 1;
        self.world.spawn((aircraft,))
    }

    #[cfg(test)]
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    fn build_snapshot(&self, events: Vec<SimEvent>) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.geometry,
            &self.time,
            &self.session,
            self.level_config(),
            &self.score,
            events,
        )
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => self.start(),
            PlayerCommand::NextLevel => {
                if self.session.level_complete {
                    self.advance_level();
                } else {
                    debug!(level = self.session.level, "next level requested before completion");
                }
            }
            // Commands queued behind a restart still apply to the new session.
            PlayerCommand::Restart => self.reset_session(),
            PlayerCommand::Surrender => {
                self.reset_session();
                self.session.running = false;
            }
            PlayerCommand::Aircraft { callsign, command } => {
                self.command_aircraft(&callsign, command);
            }
        }
    }

    fn command_aircraft(&mut self, callsign: &str, command: AircraftCommand) {
        let target = self
            .world
            .query_mut::<&mut Aircraft>()
            .into_iter()
            .find(|(_, ac)| ac.callsign == callsign);

        let Some((_, aircraft)) = target else {
            debug!(callsign, %command, "command for unknown aircraft ignored");
            return;
        };

        match apply_command(aircraft, command) {
            Ok(()) => debug!(callsign, %command, state = %aircraft.state, "command applied"),
            Err(rejection) => {
                warn!(callsign, %command, %rejection, "command rejected");
                self.events.push(SimEvent::CommandRejected {
                    callsign: callsign.to_string(),
                    command,
                    reason: rejection.to_string(),
                });
            }
        }
    }
}
