//! Spawn scheduling system: issues the level's aircraft one interval at a time.

use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use approach_core::components::Aircraft;
use approach_core::config::{AirspaceGeometry, LevelConfig};
use approach_core::events::SimEvent;

use crate::factory;
use crate::session::SessionState;

/// Advance the spawn clock and spawn an arrival when the interval has elapsed.
/// The clock restarts whenever the interval elapses, even once the quota is issued.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    geometry: &AirspaceGeometry,
    level: &LevelConfig,
    session: &mut SessionState,
    next_id: &mut u32,
    events: &mut Vec<SimEvent>,
    dt: f64,
) {
    session.spawn_clock += dt;
    if session.spawn_clock > level.spawn_interval_secs {
        spawn_next(world, rng, geometry, level, session, next_id, events);
        session.spawn_clock = 0.0;
    }
}

/// Spawn one aircraft unless the level quota is exhausted.
pub fn spawn_next(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    geometry: &AirspaceGeometry,
    level: &LevelConfig,
    session: &mut SessionState,
    next_id: &mut u32,
    events: &mut Vec<SimEvent>,
) -> Option<hecs::Entity> {
    if session.planes_spawned >= level.total {
        return None;
    }

    let entity = factory::spawn_aircraft(world, rng, geometry, *next_id);
    *next_id += 1;
    session.planes_spawned += 1;

    if let Ok(aircraft) = world.get::<&Aircraft>(entity) {
        info!(
            callsign = %aircraft.callsign,
            category = ?aircraft.category,
            speed = aircraft.speed,
            altitude = aircraft.altitude,
            spawned = session.planes_spawned,
            total = level.total,
            "aircraft entered the airspace"
        );
        events.push(SimEvent::AircraftSpawned {
            callsign: aircraft.callsign.clone(),
            category: aircraft.category,
        });
    }

    Some(entity)
}
