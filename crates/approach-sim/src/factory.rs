//! Aircraft factory: builds and spawns new arrivals.
//!
//! Each arrival appears on the spawn ring around the airspace center, pointed
//! roughly back at the center, with category-specific speed and fuel.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use approach_core::components::Aircraft;
use approach_core::config::AirspaceGeometry;
use approach_core::constants::*;
use approach_core::enums::{AircraftCategory, FlightState};
use approach_flight::fsm::normalize_heading;
use approach_flight::profiles::{callsign, get_profile};

/// Weighted category draw: mostly airliners, a few fighters.
pub fn roll_category(rng: &mut ChaCha8Rng) -> AircraftCategory {
    let roll: f64 = rng.gen();
    if roll < COMMERCIAL_SPAWN_WEIGHT {
        AircraftCategory::Commercial
    } else if roll < COMMERCIAL_SPAWN_WEIGHT + PRIVATE_SPAWN_WEIGHT {
        AircraftCategory::Private
    } else {
        AircraftCategory::Fighter
    }
}

/// Build a new inbound aircraft of the given category.
pub fn build_aircraft(
    rng: &mut ChaCha8Rng,
    geometry: &AirspaceGeometry,
    category: AircraftCategory,
    id: u32,
) -> Aircraft {
    let profile = get_profile(category);

    // Bearing from the center, in whole degrees; the ring point lies along it.
    let bearing = rng.gen_range(0..360) as f64;
    let mut position = geometry.center;
    position.advance(bearing, geometry.spawn_radius);

    let jitter = rng.gen_range(-SPAWN_HEADING_JITTER..=SPAWN_HEADING_JITTER) as f64;
    let heading = normalize_heading(bearing + 180.0 + jitter);
    let altitude = rng.gen_range(SPAWN_ALTITUDE_MIN..=SPAWN_ALTITUDE_MAX) as f64;
    let speed = rng.gen_range(profile.min_speed..=profile.max_speed) as f64;

    Aircraft {
        id,
        callsign: callsign(category, id),
        category,
        position,
        altitude,
        heading,
        target_heading: heading,
        speed,
        fuel: profile.fuel,
        consumption: profile.consumption,
        base_score: profile.base_score,
        state: FlightState::Flying,
        emergency: None,
        score_counted: false,
        despawn_timer: 0.0,
    }
}

/// Roll a category, build the aircraft and add it to the world.
pub fn spawn_aircraft(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    geometry: &AirspaceGeometry,
    id: u32,
) -> hecs::Entity {
    let category = roll_category(rng);
    let aircraft = build_aircraft(rng, geometry, category, id);
    world.spawn((aircraft,))
}
