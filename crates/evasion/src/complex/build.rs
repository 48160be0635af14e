use std::collections::BTreeSet;

use nalgebra::Vector2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::simplex::Simplex;
use crate::error::{EvasionError, Result};
use crate::geom2::{circumradius_sq, triangulate, GeomCfg, Sensor};

/// How sensing radii translate into covered simplices.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageCfg {
    /// Multiplier on sensing radii. `1.0` yields the alpha complex at `α = r`.
    pub radius_scale: f64,
}

impl Default for CoverageCfg {
    fn default() -> Self {
        Self { radius_scale: 1.0 }
    }
}

/// Filtered Delaunay complex of one sensor snapshot.
///
/// Immutable once built. Holds the points it was built from so the map can
/// sort neighbours by angle without a second lookup.
#[derive(Clone, Debug)]
pub struct Complex {
    points: Vec<Vector2<f64>>,
    edges: BTreeSet<Simplex>,
    triangles: BTreeSet<Simplex>,
    /// Every Delaunay triangle, covered or not.
    delaunay: BTreeSet<Simplex>,
}

impl Complex {
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn points(&self) -> &[Vector2<f64>] {
        &self.points
    }

    #[inline]
    pub fn point(&self, v: usize) -> Vector2<f64> {
        self.points[v]
    }

    pub fn edges(&self) -> &BTreeSet<Simplex> {
        &self.edges
    }

    pub fn triangles(&self) -> &BTreeSet<Simplex> {
        &self.triangles
    }

    /// All Delaunay triangles of the snapshot, including uncovered ones.
    pub fn delaunay_triangles(&self) -> &BTreeSet<Simplex> {
        &self.delaunay
    }

    /// Simplices of dimension `dim` (0, 1 or 2), in sorted order.
    pub fn simplices(&self, dim: usize) -> Vec<Simplex> {
        match dim {
            0 => (0..self.points.len()).map(Simplex::vertex).collect(),
            1 => self.edges.iter().copied().collect(),
            2 => self.triangles.iter().copied().collect(),
            _ => Vec::new(),
        }
    }

    pub fn contains(&self, s: &Simplex) -> bool {
        match s.dim() {
            0 => s.vertices()[0] < self.points.len(),
            1 => self.edges.contains(s),
            2 => self.triangles.contains(s),
            _ => false,
        }
    }

    /// Same vertex count and the same edges and triangles.
    pub fn same_simplices(&self, other: &Complex) -> bool {
        self.points.len() == other.points.len()
            && self.edges == other.edges
            && self.triangles == other.triangles
    }
}

fn validate(sensors: &[Sensor], cfg: &GeomCfg) -> Result<()> {
    if sensors.len() < 3 {
        return Err(EvasionError::invalid(format!(
            "need at least 3 sensors, got {}",
            sensors.len()
        )));
    }
    for (i, s) in sensors.iter().enumerate() {
        if !s.pos.x.is_finite() || !s.pos.y.is_finite() {
            return Err(EvasionError::invalid(format!(
                "sensor {i} has non-finite position"
            )));
        }
        if !(s.radius.is_finite() && s.radius > 0.0) {
            return Err(EvasionError::invalid(format!(
                "sensor {i} has non-positive radius {}",
                s.radius
            )));
        }
    }
    for i in 0..sensors.len() {
        for j in (i + 1)..sensors.len() {
            if (sensors[i].pos - sensors[j].pos).norm() <= cfg.eps_dup {
                return Err(EvasionError::invalid(format!(
                    "sensors {i} and {j} coincide"
                )));
            }
        }
    }
    Ok(())
}

/// Build the coverage complex of one snapshot.
///
/// A Delaunay triangle is kept iff its circumradius is at most
/// `radius_scale · min(r_i)` over its vertices. A Delaunay edge is kept iff it
/// borders a kept triangle, or no Delaunay-opposite vertex lies strictly inside
/// its diametral disk and `|uv| ≤ radius_scale · (r_u + r_v)`.
pub fn build_complex(sensors: &[Sensor], geom: &GeomCfg, cov: &CoverageCfg) -> Result<Complex> {
    validate(sensors, geom)?;
    let points: Vec<Vector2<f64>> = sensors.iter().map(|s| s.pos).collect();
    let tri = triangulate(&points, geom)?;

    let mut delaunay = BTreeSet::new();
    let mut triangles = BTreeSet::new();
    // Undirected edge -> opposite vertices in its (one or two) Delaunay triangles.
    let mut opposite: FxHashMap<Simplex, Vec<usize>> = FxHashMap::default();
    let mut bordered: BTreeSet<Simplex> = BTreeSet::new();

    for t in &tri.triangles {
        let s = Simplex::triangle(t[0], t[1], t[2]);
        delaunay.insert(s);
        let r_min = t
            .iter()
            .map(|&v| sensors[v].radius)
            .fold(f64::INFINITY, f64::min);
        let limit = cov.radius_scale * r_min;
        let covered = circumradius_sq(points[t[0]], points[t[1]], points[t[2]])
            .is_some_and(|r2| r2 <= limit * limit);
        if covered {
            triangles.insert(s);
        }
        for k in 0..3 {
            let (a, b, c) = (t[k], t[(k + 1) % 3], t[(k + 2) % 3]);
            let e = Simplex::edge(a, b);
            opposite.entry(e).or_default().push(c);
            if covered {
                bordered.insert(e);
            }
        }
    }

    let mut edges = BTreeSet::new();
    for (e, opp) in &opposite {
        if bordered.contains(e) {
            edges.insert(*e);
            continue;
        }
        let (u, v) = (e.vertices()[0], e.vertices()[1]);
        let mid = 0.5 * (points[u] + points[v]);
        let half_sq = 0.25 * (points[u] - points[v]).norm_squared();
        let attached = opp
            .iter()
            .any(|&w| (points[w] - mid).norm_squared() < half_sq);
        let reach = cov.radius_scale * (sensors[u].radius + sensors[v].radius);
        if !attached && (points[u] - points[v]).norm_squared() <= reach * reach {
            edges.insert(*e);
        }
    }

    trace!(
        n = points.len(),
        edges = edges.len(),
        triangles = triangles.len(),
        "built complex"
    );
    Ok(Complex {
        points,
        edges,
        triangles,
        delaunay,
    })
}
