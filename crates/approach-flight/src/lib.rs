//! Aircraft behavior for APPROACH.
//!
//! Implements the per-tick flight state machine, category profiles,
//! landing clearance and controller instructions.
//! Operates on plain `Aircraft` data, with no ECS dependency.

pub mod clearance;
pub mod control;
pub mod fsm;
pub mod profiles;

pub use approach_core as core;
