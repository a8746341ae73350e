//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A controller instruction addressed to one aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AircraftCommand {
    /// Assign a heading in degrees. Any value is accepted and normalized.
    Heading(f64),
    /// Climb (positive) or descend (negative) by this many meters.
    Altitude(f64),
    /// Accelerate (positive) or slow (negative) by this many speed units.
    Speed(f64),
    /// Enter or leave the holding pattern.
    Hold,
    /// Clear the aircraft to land.
    Land,
}

impl fmt::Display for AircraftCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AircraftCommand::Heading(v) => write!(f, "HEADING {v:.0}"),
            AircraftCommand::Altitude(v) => write!(f, "ALTITUDE {v:+.0}"),
            AircraftCommand::Speed(v) => write!(f, "SPEED {v:+.0}"),
            AircraftCommand::Hold => f.write_str("HOLD"),
            AircraftCommand::Land => f.write_str("LAND"),
        }
    }
}

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Instruct one aircraft. Unknown callsigns are ignored.
    Aircraft {
        callsign: String,
        command: AircraftCommand,
    },
    /// Start (or resume) stepping the current session.
    StartGame,
    /// Move on to the next level, keeping score and stats.
    NextLevel,
    /// Start over from level 1 and keep running.
    Restart,
    /// Abandon the session: back to level 1, stopped.
    Surrender,
}
