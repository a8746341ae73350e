//! Landing clearance checks.

use approach_core::components::Aircraft;
use approach_core::config::AirspaceGeometry;
use approach_core::constants::*;
use approach_core::enums::{FlightState, LandingRefusal};

use crate::fsm::heading_difference;

/// Every reason the aircraft cannot be cleared to land right now.
/// An empty list means the clearance may be given.
pub fn landing_clearance_errors(
    aircraft: &Aircraft,
    geometry: &AirspaceGeometry,
) -> Vec<LandingRefusal> {
    let mut refusals = Vec::new();

    if !matches!(aircraft.state, FlightState::Flying | FlightState::Holding) {
        refusals.push(LandingRefusal::InvalidState);
    }

    let aim = aircraft.position.heading_to(&geometry.runway_threshold);
    if heading_difference(aircraft.heading, aim).abs() >= CLEARANCE_MAX_HEADING_ERROR {
        refusals.push(LandingRefusal::WrongHeading);
    }

    if aircraft.altitude >= CLEARANCE_MAX_ALTITUDE {
        refusals.push(LandingRefusal::TooHigh);
    }

    if aircraft.speed >= CLEARANCE_MAX_SPEED {
        refusals.push(LandingRefusal::TooFast);
    }

    refusals
}
