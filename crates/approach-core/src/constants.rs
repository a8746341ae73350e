//! Simulation constants and tuning parameters.

/// Nominal wall-clock interval between two steps (milliseconds).
pub const TICK_INTERVAL_MS: u64 = 30;

/// Seconds simulated per nominal step.
pub const DT: f64 = TICK_INTERVAL_MS as f64 / 1000.0;

// --- Airspace ---

/// Default airspace width and height (units).
pub const AIRSPACE_SIZE: f64 = 1000.0;

/// Distance from the center beyond which a non-landing aircraft leaves the airspace.
pub const OPERATIONAL_RADIUS: f64 = 510.0;

/// Distance from the center beyond which an out-of-bounds aircraft is dropped at once.
pub const REMOVAL_RADIUS: f64 = 700.0;

/// Radius of the ring on which new aircraft appear.
pub const SPAWN_RADIUS: f64 = 450.0;

/// Side length of the square landing zone.
pub const LANDING_ZONE_SIZE: f64 = 100.0;

/// Offset of the landing zone's top edge from the bottom of the airspace.
pub const LANDING_ZONE_BOTTOM_OFFSET: f64 = 150.0;

/// Slack around the landing zone still counted as runway on touchdown.
pub const RUNWAY_MARGIN: f64 = 20.0;

// --- Kinematics ---

/// Multiplier from speed units to airspace units per second.
pub const SPEED_TO_DISTANCE: f64 = 0.1;

/// Maximum heading change per step while flying (degrees).
pub const MAX_TURN_PER_TICK: f64 = 3.0;

/// Heading change per step in a holding pattern (degrees).
pub const HOLDING_TURN_PER_TICK: f64 = 3.0;

/// Speed bounds enforced by speed commands.
pub const MIN_COMMAND_SPEED: f64 = 150.0;
pub const MAX_COMMAND_SPEED: f64 = 800.0;

// --- Spawning ---

/// Spawn altitude band (meters, inclusive).
pub const SPAWN_ALTITUDE_MIN: i32 = 2000;
pub const SPAWN_ALTITUDE_MAX: i32 = 4000;

/// Maximum deviation of the initial heading from the inbound course (degrees).
pub const SPAWN_HEADING_JITTER: i32 = 45;

/// Category draw thresholds: below the first is commercial, below the second private.
pub const COMMERCIAL_SPAWN_WEIGHT: f64 = 0.6;
pub const PRIVATE_SPAWN_WEIGHT: f64 = 0.3;

// --- Emergencies ---

/// Per-step chance of an emergency, multiplied by the current level.
pub const EMERGENCY_CHANCE_PER_LEVEL: f64 = 0.0002;

/// One emergency in this many is a MAYDAY, the rest are URGENCY.
pub const MAYDAY_ONE_IN: u32 = 3;

/// MAYDAY descent rate (m/s).
pub const MAYDAY_SINK_RATE: f64 = 120.0;

/// MAYDAY speed bleed (units/s) and the speed it stops at.
pub const MAYDAY_SPEED_BLEED: f64 = 15.0;
pub const MAYDAY_SPEED_FLOOR: f64 = 220.0;

// --- Approach ---

/// Distance at which an approach switches from initial to final.
pub const FINAL_APPROACH_DISTANCE: f64 = 300.0;

/// Distance at which the aircraft is considered over the threshold.
pub const TOUCHDOWN_DISTANCE: f64 = 10.0;

/// Initial approach: descend toward this altitude at this rate.
pub const APPROACH_ALTITUDE: f64 = 1500.0;
pub const APPROACH_SINK_RATE: f64 = 30.0;

/// Initial approach: slow toward this speed at this rate.
pub const APPROACH_SPEED: f64 = 300.0;
pub const APPROACH_DECEL: f64 = 20.0;

/// Final approach descent rate and the minimum height per unit of remaining distance.
pub const FINAL_SINK_RATE: f64 = 400.0;
pub const FINAL_GLIDE_RATIO: f64 = 2.0;

/// Final approach: slow toward this speed at this rate.
pub const FINAL_SPEED: f64 = 160.0;
pub const FINAL_DECEL: f64 = 100.0;

/// Rollout deceleration after touchdown (units/s).
pub const ROLLOUT_DECEL: f64 = 150.0;

/// A landing aircraft at or below this speed on the runway has landed.
pub const LANDED_MAX_SPEED: f64 = 1.0;

// --- Landing clearance ---

pub const CLEARANCE_MAX_HEADING_ERROR: f64 = 20.0;
pub const CLEARANCE_MAX_ALTITUDE: f64 = 1000.0;
pub const CLEARANCE_MAX_SPEED: f64 = 300.0;

// --- Collisions ---

/// Horizontal separation below which two aircraft collide.
pub const COLLISION_HORIZONTAL: f64 = 30.0;

/// Vertical separation below which two aircraft collide.
pub const COLLISION_VERTICAL: f64 = 100.0;

// --- Scoring ---

pub const MAYDAY_LANDING_BONUS: i64 = 300;
pub const URGENCY_LANDING_BONUS: i64 = 150;
pub const CRASH_PENALTY: i64 = -50;
pub const OUT_OF_BOUNDS_PENALTY: i64 = -20;

/// Seconds a crashed or out-of-bounds aircraft stays visible before removal.
pub const DESPAWN_DELAY_SECS: f64 = 2.0;
