//! ECS systems that operate on the airspace world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state: aircraft state lives in components, session state
//! is passed in by the engine.

pub mod cleanup;
pub mod collision;
pub mod flight;
pub mod fuel;
pub mod incidents;
pub mod progression;
pub mod scoring;
pub mod snapshot;
pub mod spawner;
