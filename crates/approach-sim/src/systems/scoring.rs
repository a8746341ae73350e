//! Scoring system: books every terminal outcome exactly once.

use hecs::World;
use tracing::info;

use approach_core::components::Aircraft;
use approach_core::constants::*;
use approach_core::enums::{Emergency, FlightState};
use approach_core::events::SimEvent;

use crate::session::ScoreState;

/// Points for a successful landing: base score plus the emergency bonus.
pub fn landing_points(aircraft: &Aircraft) -> i64 {
    let bonus = match aircraft.emergency {
        Some(Emergency::Mayday) => MAYDAY_LANDING_BONUS,
        Some(Emergency::Urgency) => URGENCY_LANDING_BONUS,
        None => 0,
    };
    aircraft.base_score + bonus
}

/// Score landed, crashed and out-of-bounds aircraft not yet counted.
pub fn run(world: &mut World, score: &mut ScoreState, events: &mut Vec<SimEvent>) {
    for (_entity, aircraft) in world.query_mut::<&mut Aircraft>() {
        if aircraft.score_counted {
            continue;
        }

        match aircraft.state {
            FlightState::Landed => {
                let points = landing_points(aircraft);
                score.score += points;
                score.landed += 1;
                info!(callsign = %aircraft.callsign, points, total = score.score, "aircraft landed");
                events.push(SimEvent::AircraftLanded {
                    callsign: aircraft.callsign.clone(),
                    points,
                });
            }
            FlightState::Crashed => {
                score.score += CRASH_PENALTY;
                score.crashed += 1;
            }
            FlightState::OutOfBounds => {
                score.score += OUT_OF_BOUNDS_PENALTY;
                score.out_of_bounds += 1;
            }
            _ => continue,
        }

        aircraft.score_counted = true;
    }
}
