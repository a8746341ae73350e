//! Static session configuration: airspace geometry and the level table.
//!
//! Both are built once when a session starts and never mutated afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::types::{Position, Rect};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read level file: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Failed to parse level table: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid level configuration: {0}")]
    ValidationError(String),
}

/// Fixed world geometry shared by the engine and the flight model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirspaceGeometry {
    pub width: f64,
    pub height: f64,
    pub center: Position,
    /// Point every landing approach aims at.
    pub runway_threshold: Position,
    /// Touchdown area (the runway) drawn on the scope.
    pub landing_zone: Rect,
    /// Slack around `landing_zone` still accepted on touchdown.
    pub runway_margin: f64,
    pub operational_radius: f64,
    pub removal_radius: f64,
    pub spawn_radius: f64,
}

impl AirspaceGeometry {
    /// Derive every landmark from the airspace size.
    pub fn new(width: f64, height: f64) -> Self {
        let landing_zone = Rect::new(
            width / 2.0 - LANDING_ZONE_SIZE / 2.0,
            height - LANDING_ZONE_BOTTOM_OFFSET,
            LANDING_ZONE_SIZE,
            LANDING_ZONE_SIZE,
        );
        Self {
            width,
            height,
            center: Position::new(width / 2.0, height / 2.0),
            runway_threshold: landing_zone.center(),
            landing_zone,
            runway_margin: RUNWAY_MARGIN,
            operational_radius: OPERATIONAL_RADIUS,
            removal_radius: REMOVAL_RADIUS,
            spawn_radius: SPAWN_RADIUS,
        }
    }

    /// Whether `pos` counts as runway for a touchdown.
    pub fn on_runway(&self, pos: &Position) -> bool {
        self.landing_zone.contains_with_margin(pos, self.runway_margin)
    }
}

impl Default for AirspaceGeometry {
    fn default() -> Self {
        Self::new(AIRSPACE_SIZE, AIRSPACE_SIZE)
    }
}

/// Spawn quota, pacing and pass mark for one level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Aircraft to spawn over the level.
    pub total: u32,
    /// Seconds between two spawns.
    pub spawn_interval_secs: f64,
    /// Score needed once every aircraft is resolved.
    pub score_min: i64,
}

impl LevelConfig {
    pub const fn new(total: u32, spawn_interval_secs: f64, score_min: i64) -> Self {
        Self {
            total,
            spawn_interval_secs,
            score_min,
        }
    }
}

/// Ordered level definitions, level 1 first. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LevelTable {
    levels: Vec<LevelConfig>,
}

impl LevelTable {
    /// Validate and wrap a list of levels.
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one level is required".into(),
            ));
        }
        for (idx, level) in levels.iter().enumerate() {
            let number = idx + 1;
            if level.total == 0 {
                return Err(ConfigError::ValidationError(format!(
                    "level {number} spawns no aircraft"
                )));
            }
            if !level.spawn_interval_secs.is_finite() || level.spawn_interval_secs <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "level {number} has spawn interval {}",
                    level.spawn_interval_secs
                )));
            }
        }
        Ok(Self { levels })
    }

    /// The five-level campaign.
    pub fn standard() -> Self {
        Self {
            levels: vec![
                LevelConfig::new(5, 8.0, 300),
                LevelConfig::new(8, 7.0, 1000),
                LevelConfig::new(12, 6.0, 2000),
                LevelConfig::new(15, 5.0, 3500),
                LevelConfig::new(20, 4.0, 6000),
            ],
        }
    }

    /// Parse a JSON array of levels.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let levels: Vec<LevelConfig> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Configuration for a 1-based level. Levels past the end use the last one.
    pub fn get(&self, level: u32) -> &LevelConfig {
        let idx = (level.max(1) as usize - 1).min(self.levels.len() - 1);
        &self.levels[idx]
    }

    /// Number of the last (hardest) level.
    pub fn max_level(&self) -> u32 {
        self.levels.len() as u32
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'de> Deserialize<'de> for LevelTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let levels = Vec::<LevelConfig>::deserialize(deserializer)?;
        LevelTable::new(levels).map_err(serde::de::Error::custom)
    }
}
