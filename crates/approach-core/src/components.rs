//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Flight behavior lives in `approach-flight`, session logic in the engine systems.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// One tracked flight. Category only parameterizes the initial values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    /// Spawn sequence number, unique within a session.
    pub id: u32,
    /// Display identifier, category prefix plus the sequence number (`AF001`).
    pub callsign: String,
    pub category: AircraftCategory,
    pub position: Position,
    /// Meters above ground.
    pub altitude: f64,
    /// Degrees in [0, 360), 0 = up-scope, clockwise.
    pub heading: f64,
    /// Heading assigned by the controller.
    pub target_heading: f64,
    pub speed: f64,
    pub fuel: f64,
    /// Fuel burned per second en route.
    pub consumption: f64,
    /// Points awarded on a successful landing, before emergency bonus.
    pub base_score: i64,
    pub state: FlightState,
    pub emergency: Option<Emergency>,
    /// Set once the outcome has been scored, never cleared.
    pub score_counted: bool,
    /// Seconds spent in a crashed or out-of-bounds state.
    pub despawn_timer: f64,
}
