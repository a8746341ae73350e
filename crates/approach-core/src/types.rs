//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in airspace units.
/// x grows to the right of the scope, y grows downward (screen convention).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned rectangle (top-left corner plus size).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of steps run since the session (re)started.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Planar distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    /// Heading (degrees, 0 = up-scope, clockwise) that points from here to `other`.
    pub fn heading_to(&self, other: &Position) -> f64 {
        let delta = other.as_dvec2() - self.as_dvec2();
        (delta.y.atan2(delta.x).to_degrees() + 90.0).rem_euclid(360.0)
    }

    /// Move along `heading` (degrees) by `distance` units.
    pub fn advance(&mut self, heading: f64, distance: f64) {
        let step = heading_vector(heading) * distance;
        self.x += step.x;
        self.y += step.y;
    }
}

/// Unit vector for a heading in degrees. 0° points up-scope, 90° to the right.
pub fn heading_vector(heading: f64) -> DVec2 {
    let rad = (heading - 90.0).to_radians();
    DVec2::new(rad.cos(), rad.sin())
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether `pos` lies inside the rectangle grown by `margin` on every side (edges inclusive).
    pub fn contains_with_margin(&self, pos: &Position, margin: f64) -> bool {
        pos.x >= self.x - margin
            && pos.x <= self.x + self.width + margin
            && pos.y >= self.y - margin
            && pos.y <= self.y + self.height + margin
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

impl SimTime {
    /// Advance by one step of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}
