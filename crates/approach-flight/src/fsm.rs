//! Aircraft flight state machine.
//!
//! Pure functions that integrate one aircraft for one step: emergency penalties,
//! per-state motion rules, translation, the boundary check and touchdown.

use approach_core::components::Aircraft;
use approach_core::config::AirspaceGeometry;
use approach_core::constants::*;
use approach_core::enums::{Emergency, FlightState};

/// Wrap a heading into [0, 360).
pub fn normalize_heading(heading: f64) -> f64 {
    let wrapped = heading.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Signed shortest turn from `from` to `to`, in (-180, 180].
pub fn heading_difference(from: f64, to: f64) -> f64 {
    let diff = (to - from).rem_euclid(360.0);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// Turn from `heading` toward `target` by at most `max_turn` degrees,
/// landing exactly on the target when it is within reach.
pub fn turn_toward(heading: f64, target: f64, max_turn: f64) -> f64 {
    let diff = heading_difference(heading, target);
    if diff.abs() <= max_turn {
        normalize_heading(target)
    } else {
        normalize_heading(heading + max_turn.copysign(diff))
    }
}

/// Advance one aircraft by `dt` seconds.
///
/// Returns the new state when the step changed it.
/// Crashed, landed and out-of-bounds aircraft are left untouched.
pub fn step(
    aircraft: &mut Aircraft,
    geometry: &AirspaceGeometry,
    dt: f64,
) -> Option<FlightState> {
    if matches!(
        aircraft.state,
        FlightState::Crashed | FlightState::Landed | FlightState::OutOfBounds
    ) {
        return None;
    }
    let before = aircraft.state;

    if aircraft.emergency == Some(Emergency::Mayday) && aircraft.state != FlightState::Landing {
        apply_mayday(aircraft, dt);
    }

    match aircraft.state {
        FlightState::Landing => fly_approach(aircraft, geometry, dt),
        FlightState::Holding => fly_holding(aircraft, dt),
        _ => fly_en_route(aircraft, dt),
    }

    if aircraft.speed > 0.0 {
        aircraft
            .position
            .advance(aircraft.heading, aircraft.speed * SPEED_TO_DISTANCE * dt);
    }

    if aircraft.state != FlightState::Landing
        && aircraft.position.distance_to(&geometry.center) > geometry.operational_radius
    {
        aircraft.state = FlightState::OutOfBounds;
    }

    (aircraft.state != before).then_some(aircraft.state)
}

/// Disabled aircraft sink, bleed speed and cannot keep a holding pattern.
fn apply_mayday(aircraft: &mut Aircraft, dt: f64) {
    aircraft.altitude -= MAYDAY_SINK_RATE * dt;
    if aircraft.speed > MAYDAY_SPEED_FLOOR {
        aircraft.speed -= MAYDAY_SPEED_BLEED * dt;
    }
    if aircraft.state == FlightState::Holding {
        aircraft.state = FlightState::Flying;
    }
}

/// Approach to the runway threshold: initial, final, then rollout.
fn fly_approach(aircraft: &mut Aircraft, geometry: &AirspaceGeometry, dt: f64) {
    let threshold = geometry.runway_threshold;
    let distance = aircraft.position.distance_to(&threshold);

    if distance > FINAL_APPROACH_DISTANCE {
        aircraft.heading = aircraft.position.heading_to(&threshold);
        // A MAYDAY aircraft is already losing height on its own.
        if aircraft.emergency != Some(Emergency::Mayday)
            && aircraft.altitude > APPROACH_ALTITUDE
        {
            aircraft.altitude -= APPROACH_SINK_RATE * dt;
        }
        if aircraft.speed > APPROACH_SPEED {
            aircraft.speed -= APPROACH_DECEL * dt;
        }
    } else if distance > TOUCHDOWN_DISTANCE {
        aircraft.heading = aircraft.position.heading_to(&threshold);
        let glide_floor = distance * FINAL_GLIDE_RATIO;
        let candidate = aircraft.altitude - FINAL_SINK_RATE * dt;
        aircraft.altitude = if candidate > glide_floor {
            candidate
        } else {
            aircraft.altitude.max(glide_floor)
        };
        if aircraft.speed > FINAL_SPEED {
            aircraft.speed -= FINAL_DECEL * dt;
        }
    } else {
        aircraft.altitude = 0.0;
        aircraft.speed = (aircraft.speed - ROLLOUT_DECEL * dt).max(0.0);
    }
}

/// Standard holding turn. The rate is per step, not per second.
fn fly_holding(aircraft: &mut Aircraft, dt: f64) {
    aircraft.heading = normalize_heading(aircraft.heading + HOLDING_TURN_PER_TICK);
    aircraft.fuel -= aircraft.consumption * dt;
}

fn fly_en_route(aircraft: &mut Aircraft, dt: f64) {
    aircraft.heading = turn_toward(aircraft.heading, aircraft.target_heading, MAX_TURN_PER_TICK);
    aircraft.fuel -= aircraft.consumption * dt;
}

/// Resolve ground contact after a step.
///
/// Clamps altitude to zero and returns the new state: landed for a slow landing
/// aircraft on the runway, crashed for any other contact. A landing aircraft
/// still rolling faster than the landed threshold keeps its state.
pub fn touchdown(aircraft: &mut Aircraft, geometry: &AirspaceGeometry) -> Option<FlightState> {
    if aircraft.altitude > 0.0 {
        return None;
    }
    aircraft.altitude = 0.0;

    let on_runway = geometry.on_runway(&aircraft.position);
    let next = if !on_runway || aircraft.state != FlightState::Landing {
        FlightState::Crashed
    } else if aircraft.speed <= LANDED_MAX_SPEED {
        FlightState::Landed
    } else {
        return None;
    };

    if next == aircraft.state {
        return None;
    }
    aircraft.state = next;
    Some(next)
}
