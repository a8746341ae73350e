//! Mid-air collision detection.

use hecs::{Entity, World};
use tracing::info;

use approach_core::components::Aircraft;
use approach_core::constants::{COLLISION_HORIZONTAL, COLLISION_VERTICAL};
use approach_core::enums::{CrashCause, FlightState};
use approach_core::events::SimEvent;
use approach_core::types::Position;

/// Crash every pair of airborne aircraft closer than the separation minima.
///
/// Candidates are collected before any state changes, so the check is
/// simultaneous: one aircraft can collide with several others in the same pass.
pub fn run(world: &mut World, events: &mut Vec<SimEvent>) {
    let candidates: Vec<(Entity, String, Position, f64)> = world
        .query::<&Aircraft>()
        .iter()
        .filter(|(_, aircraft)| aircraft.state.is_collidable())
        .map(|(entity, aircraft)| {
            (
                entity,
                aircraft.callsign.clone(),
                aircraft.position,
                aircraft.altitude,
            )
        })
        .collect();

    let mut hit: Vec<Entity> = Vec::new();
    for i in 0..candidates.len() {
        for j in (i + 1)..candidates.len() {
            let (a, a_call, a_pos, a_alt) = &candidates[i];
            let (b, b_call, b_pos, b_alt) = &candidates[j];

            if a_pos.distance_to(b_pos) < COLLISION_HORIZONTAL
                && (a_alt - b_alt).abs() < COLLISION_VERTICAL
            {
                info!(first = %a_call, second = %b_call, "mid-air collision");
                events.push(SimEvent::MidAirCollision {
                    first: a_call.clone(),
                    second: b_call.clone(),
                });
                for entity in [*a, *b] {
                    if !hit.contains(&entity) {
                        hit.push(entity);
                    }
                }
            }
        }
    }

    for entity in hit {
        if let Ok(mut aircraft) = world.get::<&mut Aircraft>(entity) {
            aircraft.state = FlightState::Crashed;
            events.push(SimEvent::AircraftCrashed {
                callsign: aircraft.callsign.clone(),
                cause: CrashCause::MidAirCollision,
            });
        }
    }
}
