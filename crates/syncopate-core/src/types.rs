//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Position in playfield space (arena units).
/// x = longitudinal (enemies fly toward -x), y = lateral, z = depth (always 0 in play).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Velocity in playfield space (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of `step` calls that advanced the clock.
    pub tick: u64,
    /// Elapsed simulated seconds.
    pub elapsed_secs: f64,
}

/// One point of the intensity curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntensitySample {
    pub time: f64,
    pub intensity: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self::planar(v.x, v.y)
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Planar distance (depth is ignored; it is fixed in play).
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    pub fn distance_sq_to(&self, other: &Position) -> f64 {
        self.to_vec().distance_squared(other.to_vec())
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y, z: 0.0 }
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn speed(&self) -> f64 {
        self.to_vec().length()
    }

    /// Heading in radians, 0 = +x, counter-clockwise.
    pub fn heading(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl SimTime {
    /// Advance the clock by a caller-supplied delta.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Unit vector from `from` toward `to`; falls back to +x when the points coincide.
pub fn direction(from: DVec2, to: DVec2) -> DVec2 {
    (to - from).try_normalize().unwrap_or(DVec2::X)
}
