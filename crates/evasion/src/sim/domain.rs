//! Rectangular sensing domain with a fixed fence on a virtual boundary.
//!
//! The fence sits half a spacing outside the domain. A mobile sensor inside
//! the domain is then never strictly inside the diametral disk of a fence
//! edge, so fence edges stay in the complex whatever the interior does.

use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{EvasionError, Result};
use crate::geom2::Sensor;

/// Region mobile sensors live in, plus the fence that encloses it.
pub trait Domain {
    /// Fence positions, counter-clockwise, starting anywhere on the ring.
    fn fence_points(&self) -> Vec<Vector2<f64>>;

    /// Strict interior test.
    fn in_domain(&self, p: Vector2<f64>) -> bool;

    /// Map a position that left the domain back inside by mirroring.
    fn reflect(&self, p: Vector2<f64>) -> Vector2<f64>;

    /// Uniform interior sample.
    fn sample_interior(&self, rng: &mut dyn rand::RngCore) -> Vector2<f64>;
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectangularDomain {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Upper bound on fence spacing; must not exceed twice the sensing radius.
    pub spacing: f64,
}

impl RectangularDomain {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64, spacing: f64) -> Result<Self> {
        let finite = [x_min, x_max, y_min, y_max, spacing]
            .iter()
            .all(|v| v.is_finite());
        if !finite || x_max <= x_min || y_max <= y_min || spacing <= 0.0 {
            return Err(EvasionError::invalid(format!(
                "bad rectangle [{x_min},{x_max}]x[{y_min},{y_max}] with spacing {spacing}"
            )));
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
            spacing,
        })
    }

    pub fn unit_square(spacing: f64) -> Result<Self> {
        Self::new(0.0, 1.0, 0.0, 1.0, spacing)
    }

    /// Offset of the virtual boundary.
    #[inline]
    pub fn margin(&self) -> f64 {
        0.5 * self.spacing
    }

    /// Fence sensors with uniform `radius`, in fence order.
    pub fn fence_sensors(&self, radius: f64) -> Vec<Sensor> {
        self.fence_points()
            .into_iter()
            .map(|p| Sensor::at(p, radius))
            .collect()
    }
}

fn mirror(v: f64, lo: f64, hi: f64) -> f64 {
    let mut x = v;
    // Steps are small compared to the domain; a couple of bounces at most.
    for _ in 0..8 {
        if x < lo {
            x = 2.0 * lo - x;
        } else if x > hi {
            x = 2.0 * hi - x;
        } else {
            return x;
        }
    }
    x.clamp(lo, hi)
}

impl Domain for RectangularDomain {
    fn fence_points(&self) -> Vec<Vector2<f64>> {
        let m = self.margin();
        let (x0, x1) = (self.x_min - m, self.x_max + m);
        let (y0, y1) = (self.y_min - m, self.y_max + m);
        let corners = [
            Vector2::new(x0, y0),
            Vector2::new(x1, y0),
            Vector2::new(x1, y1),
            Vector2::new(x0, y1),
        ];
        let mut pts = Vec::new();
        for k in 0..4 {
            let a = corners[k];
            let b = corners[(k + 1) % 4];
            let n = ((b - a).norm() / self.spacing).ceil().max(1.0) as usize;
            for j in 0..n {
                pts.push(a + (b - a) * (j as f64 / n as f64));
            }
        }
        pts
    }

    fn in_domain(&self, p: Vector2<f64>) -> bool {
        self.x_min < p.x && p.x < self.x_max && self.y_min < p.y && p.y < self.y_max
    }

    fn reflect(&self, p: Vector2<f64>) -> Vector2<f64> {
        Vector2::new(
            mirror(p.x, self.x_min, self.x_max),
            mirror(p.y, self.y_min, self.y_max),
        )
    }

    fn sample_interior(&self, rng: &mut dyn rand::RngCore) -> Vector2<f64> {
        Vector2::new(
            rng.gen_range(self.x_min..self.x_max),
            rng.gen_range(self.y_min..self.y_max),
        )
    }
}
