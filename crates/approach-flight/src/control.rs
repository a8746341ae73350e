//! Controller instructions applied to a single aircraft.

use thiserror::Error;

use approach_core::commands::AircraftCommand;
use approach_core::components::Aircraft;
use approach_core::constants::{MAX_COMMAND_SPEED, MIN_COMMAND_SPEED};
use approach_core::enums::{Emergency, FlightState};

use crate::fsm::normalize_heading;

/// Why an instruction was not applied. The aircraft is left unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandRejection {
    #[error("aircraft under MAYDAY only accepts a landing clearance")]
    Disabled,
    #[error("aircraft is {0} and no longer under control")]
    Terminal(FlightState),
    #[error("cannot toggle holding while {0}")]
    CannotHold(FlightState),
    #[error("non-finite command value {0}")]
    InvalidValue(f64),
}

/// Apply `command` to `aircraft`, or explain why it was refused.
pub fn apply_command(
    aircraft: &mut Aircraft,
    command: AircraftCommand,
) -> Result<(), CommandRejection> {
    if aircraft.state.is_terminal() {
        return Err(CommandRejection::Terminal(aircraft.state));
    }
    if aircraft.emergency == Some(Emergency::Mayday) && command != AircraftCommand::Land {
        return Err(CommandRejection::Disabled);
    }

    match command {
        AircraftCommand::Heading(value) => {
            let value = finite(value)?;
            aircraft.target_heading = normalize_heading(value);
            if aircraft.state == FlightState::Holding {
                aircraft.state = FlightState::Flying;
            }
        }
        AircraftCommand::Altitude(delta) => {
            let delta = finite(delta)?;
            aircraft.altitude = (aircraft.altitude + delta).max(0.0);
        }
        AircraftCommand::Speed(delta) => {
            let delta = finite(delta)?;
            aircraft.speed = (aircraft.speed + delta).clamp(MIN_COMMAND_SPEED, MAX_COMMAND_SPEED);
        }
        AircraftCommand::Hold => {
            aircraft.state = match aircraft.state {
                FlightState::Flying => FlightState::Holding,
                FlightState::Holding => FlightState::Flying,
                other => return Err(CommandRejection::CannotHold(other)),
            };
        }
        AircraftCommand::Land => aircraft.state = FlightState::Landing,
    }

    Ok(())
}

fn finite(value: f64) -> Result<f64, CommandRejection> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CommandRejection::InvalidValue(value))
    }
}
