//! Headless approach-control application.
//!
//! Runs the airspace engine on its own thread and feeds it player
//! commands typed on the console.

pub mod console;
pub mod game_loop;
pub mod state;

pub use approach_core as core;
