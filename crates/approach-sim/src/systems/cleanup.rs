//! Cleanup system: removes resolved aircraft from the world.

use hecs::{Entity, World};

use approach_core::components::Aircraft;
use approach_core::config::AirspaceGeometry;
use approach_core::constants::DESPAWN_DELAY_SECS;
use approach_core::enums::FlightState;

/// Drop landed aircraft immediately and let crashed or out-of-bounds ones
/// linger on the scope for a short grace period.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn expire(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, aircraft) in world.query_mut::<&mut Aircraft>() {
        match aircraft.state {
            FlightState::Landed => despawn_buffer.push(entity),
            FlightState::Crashed | FlightState::OutOfBounds => {
                aircraft.despawn_timer += dt;
                if aircraft.despawn_timer >= DESPAWN_DELAY_SECS {
                    despawn_buffer.push(entity);
                }
            }
            _ => {}
        }
    }

    despawn(world, despawn_buffer);
}

/// Remove out-of-bounds aircraft that have drifted past the removal radius.
pub fn drop_far_out_of_bounds(
    world: &mut World,
    geometry: &AirspaceGeometry,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, aircraft) in world.query_mut::<&Aircraft>() {
        if aircraft.state == FlightState::OutOfBounds
            && aircraft.position.distance_to(&geometry.center) > geometry.removal_radius
        {
            despawn_buffer.push(entity);
        }
    }

    despawn(world, despawn_buffer);
}

fn despawn(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
