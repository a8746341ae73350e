//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Aircraft category. Fixes kinematic and scoring constants, nothing else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AircraftCategory {
    #[default]
    Commercial,
    Private,
    Fighter,
}

/// Flight state of a single aircraft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightState {
    /// En route, turning toward the assigned heading.
    #[default]
    Flying,
    /// Circling in a holding pattern.
    Holding,
    /// Cleared to land, flying the approach to the runway threshold.
    Landing,
    /// On the ground. Terminal, success.
    Landed,
    /// Destroyed. Terminal, failure.
    Crashed,
    /// Left the controlled airspace. Terminal, failure.
    OutOfBounds,
}

impl FlightState {
    /// Landed, crashed or out of bounds.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            FlightState::Landed | FlightState::Crashed | FlightState::OutOfBounds
        )
    }

    /// States that take part in mid-air collision checks.
    pub fn is_collidable(self) -> bool {
        matches!(
            self,
            FlightState::Flying | FlightState::Landing | FlightState::Holding
        )
    }

    /// States eligible for random emergency injection.
    pub fn is_en_route(self) -> bool {
        matches!(self, FlightState::Flying | FlightState::Holding)
    }
}

impl fmt::Display for FlightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FlightState::Flying => "FLYING",
            FlightState::Holding => "HOLDING",
            FlightState::Landing => "LANDING",
            FlightState::Landed => "LANDED",
            FlightState::Crashed => "CRASHED",
            FlightState::OutOfBounds => "OUT_OF_BOUNDS",
        };
        f.write_str(label)
    }
}

/// In-flight emergency. Once declared it is never cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Emergency {
    /// Equipment failure: the aircraft sinks, slows and only accepts a landing clearance.
    Mayday,
    /// Medical or minor technical issue: worth a bonus if landed.
    Urgency,
}

impl fmt::Display for Emergency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emergency::Mayday => f.write_str("MAYDAY"),
            Emergency::Urgency => f.write_str("URGENCY"),
        }
    }
}

/// Why an aircraft was destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    FuelExhausted,
    /// Touched the ground away from the runway, or too fast.
    Terrain,
    MidAirCollision,
}

/// Reason a landing clearance would be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LandingRefusal {
    /// Only flying or holding aircraft can be cleared.
    InvalidState,
    /// Not pointed at the runway threshold.
    WrongHeading,
    TooHigh,
    TooFast,
}

impl fmt::Display for LandingRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LandingRefusal::InvalidState => "invalid state",
            LandingRefusal::WrongHeading => "wrong heading",
            LandingRefusal::TooHigh => "too high",
            LandingRefusal::TooFast => "too fast",
        };
        f.write_str(label)
    }
}
