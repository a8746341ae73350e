//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::commands::AircraftCommand;
use crate::enums::*;

/// Something noteworthy that happened during a tick. Drained into the next snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    AircraftSpawned {
        callsign: String,
        category: AircraftCategory,
    },
    EmergencyDeclared {
        callsign: String,
        emergency: Emergency,
    },
    AircraftLanded {
        callsign: String,
        points: i64,
    },
    AircraftCrashed {
        callsign: String,
        cause: CrashCause,
    },
    AircraftOutOfBounds {
        callsign: String,
    },
    MidAirCollision {
        first: String,
        second: String,
    },
    /// A command was refused, e.g. a MAYDAY aircraft asked to change speed.
    CommandRejected {
        callsign: String,
        command: AircraftCommand,
        reason: String,
    },
    LevelComplete {
        level: u32,
        score: i64,
    },
    GameOver {
        level: u32,
        score: i64,
    },
    /// Advanced past the last configured level.
    CampaignComplete {
        score: i64,
    },
}
