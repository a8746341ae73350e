//! Flight system: steps every live aircraft through its state machine.

use hecs::World;
use tracing::{debug, info};

use approach_core::components::Aircraft;
use approach_core::config::AirspaceGeometry;
use approach_core::enums::{CrashCause, FlightState};
use approach_core::events::SimEvent;
use approach_flight::fsm;

/// Move aircraft, then resolve ground contact.
pub fn run(world: &mut World, geometry: &AirspaceGeometry, dt: f64, events: &mut Vec<SimEvent>) {
    for (_entity, aircraft) in world.query_mut::<&mut Aircraft>() {
        if aircraft.state.is_terminal() {
            continue;
        }

        if fsm::step(aircraft, geometry, dt) == Some(FlightState::OutOfBounds) {
            info!(callsign = %aircraft.callsign, "aircraft left the airspace");
            events.push(SimEvent::AircraftOutOfBounds {
                callsign: aircraft.callsign.clone(),
            });
        }

        // Out of bounds at ground level still counts as a crash.
        match fsm::touchdown(aircraft, geometry) {
            Some(FlightState::Crashed) => {
                info!(
                    callsign = %aircraft.callsign,
                    x = aircraft.position.x,
                    y = aircraft.position.y,
                    "aircraft hit the ground"
                );
                events.push(SimEvent::AircraftCrashed {
                    callsign: aircraft.callsign.clone(),
                    cause: CrashCause::Terrain,
                });
            }
            Some(FlightState::Landed) => {
                debug!(callsign = %aircraft.callsign, "rollout complete");
            }
            _ => {}
        }
    }
}
