//! Emergency injection system: randomly declares MAYDAY / URGENCY on aircraft en route.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use approach_core::components::Aircraft;
use approach_core::constants::{EMERGENCY_CHANCE_PER_LEVEL, MAYDAY_ONE_IN};
use approach_core::enums::Emergency;
use approach_core::events::SimEvent;

/// Roll for an emergency on every flying or holding aircraft that has none yet.
/// The per-tick chance grows linearly with the level number.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, level: u32, events: &mut Vec<SimEvent>) {
    let chance = EMERGENCY_CHANCE_PER_LEVEL * level as f64;

    for (_entity, aircraft) in world.query_mut::<&mut Aircraft>() {
        if !aircraft.state.is_en_route() || aircraft.emergency.is_some() {
            continue;
        }
        if rng.gen::<f64>() >= chance {
            continue;
        }

        let emergency = if rng.gen_range(1..=MAYDAY_ONE_IN) == 1 {
            Emergency::Mayday
        } else {
            Emergency::Urgency
        };
        aircraft.emergency = Some(emergency);

        info!(callsign = %aircraft.callsign, %emergency, "emergency declared");
        events.push(SimEvent::EmergencyDeclared {
            callsign: aircraft.callsign.clone(),
            emergency,
        });
    }
}
