//! Basic 2D types and tolerances used by the planar predicates.
//!
//! - `Sensor`: position plus sensing radius, read-only for one instant.
//! - `GeomCfg`: centralizes epsilons for orientation, in-circle and duplicate checks.
//!
//! Code cross-refs: `predicates::{orient, incircle}`, `delaunay::triangulate`.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Geometry configuration (tolerances).
///
/// Values are absolute; they assume coordinates of order one (unit-square domains).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeomCfg {
    pub eps_orient: f64,
    pub eps_incircle: f64,
    /// Two points closer than this are treated as coincident.
    pub eps_dup: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_orient: 1e-12,
            eps_incircle: 1e-12,
            eps_dup: 1e-12,
        }
    }
}

/// One sensor at one instant. Its id is its index in the sensor slice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sensor {
    pub pos: Vector2<f64>,
    pub radius: f64,
}

impl Sensor {
    #[inline]
    pub fn new(x: f64, y: f64, radius: f64) -> Self {
        Self {
            pos: Vector2::new(x, y),
            radius,
        }
    }

    #[inline]
    pub fn at(pos: Vector2<f64>, radius: f64) -> Self {
        Self { pos, radius }
    }

    /// Linear blend `self·(1-s) + other·s` of position and radius.
    #[inline]
    pub fn lerp(&self, other: &Sensor, s: f64) -> Sensor {
        Sensor {
            pos: self.pos * (1.0 - s) + other.pos * s,
            radius: self.radius * (1.0 - s) + other.radius * s,
        }
    }
}

/// Positions of `sensors` at parameter `s ∈ [0,1]` between `start` and `end`.
///
/// `s == 0` and `s == 1` return the endpoints unchanged so committed snapshots
/// are bitwise identical to the ones the caller supplied.
pub fn interpolate(start: &[Sensor], end: &[Sensor], s: f64) -> Vec<Sensor> {
    debug_assert_eq!(start.len(), end.len());
    if s <= 0.0 {
        return start.to_vec();
    }
    if s >= 1.0 {
        return end.to_vec();
    }
    start
        .iter()
        .zip(end.iter())
        .map(|(a, b)| a.lerp(b, s))
        .collect()
}
