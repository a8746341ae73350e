//! Game state snapshot: the complete visible state handed to the frontend after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Position, Rect, SimTime};

/// Complete game state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub running: bool,
    pub level_complete: bool,
    pub game_over: bool,
    /// Live aircraft, in spawn order.
    pub aircraft: Vec<AircraftView>,
    pub landing_zone: Rect,
    pub score: ScoreView,
    pub level: LevelView,
    pub events: Vec<SimEvent>,
}

/// One aircraft as shown on the scope and in the strip board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftView {
    pub callsign: String,
    pub category: AircraftCategory,
    pub position: Position,
    pub altitude: f64,
    pub heading: f64,
    pub target_heading: f64,
    pub speed: f64,
    pub fuel: f64,
    pub state: FlightState,
    pub emergency: Option<Emergency>,
    /// Why a landing clearance would be refused right now. Empty means cleared.
    pub landing_refusals: Vec<LandingRefusal>,
}

/// Running score and outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: i64,
    pub landed: u32,
    pub crashed: u32,
    pub out_of_bounds: u32,
}

/// Progress through the current level.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LevelView {
    pub current: u32,
    pub spawned: u32,
    pub total: u32,
    pub score_min: i64,
    /// Seconds until the next aircraft appears, 0 once the quota is issued.
    pub next_spawn_secs: f64,
}
