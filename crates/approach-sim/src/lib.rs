//! Simulation engine for the approach-control game.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the frontend.

pub mod engine;
pub mod factory;
pub mod session;
pub mod systems;

pub use approach_core as core;
pub use engine::{Airspace, SimConfig};

#[cfg(test)]
mod tests;
