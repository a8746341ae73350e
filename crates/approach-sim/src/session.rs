//! Session data model: level progress, session flags and the running score.
//!
//! Stored in the `Airspace` engine, NOT as ECS entities.

use approach_core::state::ScoreView;

/// Where the session stands within the level table.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// 1-based level number.
    pub level: u32,
    /// Aircraft issued so far this level.
    pub planes_spawned: u32,
    /// Seconds accumulated toward the next spawn.
    pub spawn_clock: f64,
    pub running: bool,
    pub level_complete: bool,
    pub game_over: bool,
}

impl SessionState {
    /// Fresh level 1 state.
    pub fn new(running: bool) -> Self {
        Self {
            level: 1,
            planes_spawned: 0,
            spawn_clock: 0.0,
            running,
            level_complete: false,
            game_over: false,
        }
    }

    /// The current level has been won or lost.
    pub fn is_resolved(&self) -> bool {
        self.level_complete || self.game_over
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Running score state tracked by the engine. Survives level changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreState {
    /// Signed, no floor.
    pub score: i64,
    pub landed: u32,
    pub crashed: u32,
    pub out_of_bounds: u32,
}

impl ScoreState {
    pub fn view(&self) -> ScoreView {
        ScoreView {
            score: self.score,
            landed: self.landed,
            crashed: self.crashed,
            out_of_bounds: self.out_of_bounds,
        }
    }
}
