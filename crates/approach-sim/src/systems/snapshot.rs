//! Snapshot builder: reads the ECS world and produces a GameStateSnapshot.

use hecs::World;

use approach_core::components::Aircraft;
use approach_core::config::{AirspaceGeometry, LevelConfig};
use approach_core::events::SimEvent;
use approach_core::state::{AircraftView, GameStateSnapshot, LevelView};
use approach_core::types::SimTime;
use approach_flight::clearance::landing_clearance_errors;

use crate::session::{ScoreState, SessionState};

use super::progression::time_before_next_spawn;

/// Project the aircraft into their view form, in spawn order.
pub fn aircraft_views(world: &World, geometry: &AirspaceGeometry) -> Vec<AircraftView> {
    let mut aircraft: Vec<(u32, AircraftView)> = world
        .query::<&Aircraft>()
        .iter()
        .map(|(_, ac)| {
            (
                ac.id,
                AircraftView {
                    callsign: ac.callsign.clone(),
                    category: ac.category,
                    position: ac.position,
                    altitude: ac.altitude,
                    heading: ac.heading,
                    target_heading: ac.target_heading,
                    speed: ac.speed,
                    fuel: ac.fuel,
                    state: ac.state,
                    emergency: ac.emergency,
                    landing_refusals: landing_clearance_errors(ac, geometry),
                },
            )
        })
        .collect();
    aircraft.sort_by_key(|(id, _)| *id);
    aircraft.into_iter().map(|(_, view)| view).collect()
}

/// Build a complete snapshot. `events` are moved into it.
pub fn build_snapshot(
    world: &World,
    geometry: &AirspaceGeometry,
    time: &SimTime,
    session: &SessionState,
    level: &LevelConfig,
    score: &ScoreState,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        running: session.running,
        level_complete: session.level_complete,
        game_over: session.game_over,
        aircraft: aircraft_views(world, geometry),
        landing_zone: geometry.landing_zone,
        score: score.view(),
        level: LevelView {
            current: session.level,
            spawned: session.planes_spawned,
            total: level.total,
            score_min: level.score_min,
            next_spawn_secs: time_before_next_spawn(level, session),
        },
        events,
    }
}
