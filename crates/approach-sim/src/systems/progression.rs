//! Level progression: decides when a level is won or lost.

use hecs::World;
use tracing::info;

use approach_core::config::LevelConfig;
use approach_core::events::SimEvent;

use crate::session::{ScoreState, SessionState};

/// Resolve the level once the whole quota has spawned and the airspace is empty.
pub fn run(
    world: &World,
    level: &LevelConfig,
    score: &ScoreState,
    session: &mut SessionState,
    events: &mut Vec<SimEvent>,
) {
    if session.is_resolved() {
        return;
    }
    if session.planes_spawned < level.total || !world.is_empty() {
        return;
    }

    if score.score >= level.score_min {
        session.level_complete = true;
        info!(level = session.level, score = score.score, "level complete");
        events.push(SimEvent::LevelComplete {
            level: session.level,
            score: score.score,
        });
    } else {
        session.game_over = true;
        info!(
            level = session.level,
            score = score.score,
            required = level.score_min,
            "game over"
        );
        events.push(SimEvent::GameOver {
            level: session.level,
            score: score.score,
        });
    }
}

/// Seconds until the next spawn, or 0 once the quota is issued.
pub fn time_before_next_spawn(level: &LevelConfig, session: &SessionState) -> f64 {
    if session.planes_spawned >= level.total {
        0.0
    } else {
        (level.spawn_interval_secs - session.spawn_clock).max(0.0)
    }
}
