//! Category-specific constants.
//!
//! The category fixes initial speed, fuel and scoring; behavior is shared.

use approach_core::enums::AircraftCategory;

/// Constant profile for an aircraft category.
pub struct CategoryProfile {
    /// Callsign prefix.
    pub prefix: &'static str,
    /// Initial speed range (inclusive).
    pub min_speed: u32,
    pub max_speed: u32,
    /// Points for a landing without emergency.
    pub base_score: i64,
    /// Initial fuel.
    pub fuel: f64,
    /// Fuel burned per second en route.
    pub consumption: f64,
}

/// Get the profile for a given category.
pub fn get_profile(category: AircraftCategory) -> CategoryProfile {
    match category {
        AircraftCategory::Commercial => CategoryProfile {
            prefix: "AF",
            min_speed: 240,
            max_speed: 360,
            base_score: 100,
            fuel: 100.0,
            consumption: 0.4,
        },
        AircraftCategory::Private => CategoryProfile {
            prefix: "PJ",
            min_speed: 400,
            max_speed: 550,
            base_score: 150,
            fuel: 80.0,
            consumption: 0.6,
        },
        AircraftCategory::Fighter => CategoryProfile {
            prefix: "MIL",
            min_speed: 600,
            max_speed: 850,
            base_score: 300,
            fuel: 60.0,
            consumption: 0.8,
        },
    }
}

/// Callsign for the `id`-th aircraft of a session.
pub fn callsign(category: AircraftCategory, id: u32) -> String {
    format!("{}{:03}", get_profile(category).prefix, id)
}
