//! Fuel system: aircraft still under control crash when the tanks run dry.

use hecs::World;
use tracing::info;

use approach_core::components::Aircraft;
use approach_core::enums::{CrashCause, FlightState};
use approach_core::events::SimEvent;

/// Crash every flying or holding aircraft with no fuel left.
/// An aircraft already on approach is allowed to finish it.
pub fn run(world: &mut World, events: &mut Vec<SimEvent>) {
    for (_entity, aircraft) in world.query_mut::<&mut Aircraft>() {
        if aircraft.state.is_en_route() && aircraft.fuel <= 0.0 {
            aircraft.state = FlightState::Crashed;
            info!(callsign = %aircraft.callsign, "fuel exhausted");
            events.push(SimEvent::AircraftCrashed {
                callsign: aircraft.callsign.clone(),
                cause: CrashCause::FuelExhausted,
            });
        }
    }
}
