//! Incremental Delaunay triangulation (Bowyer–Watson with ghost triangles).
//!
//! Each hull edge `u→v` carries a ghost triangle `(u, v, ∞)` so points outside
//! the current hull are inserted by the same cavity rule as interior points.
//! A ghost is in conflict with `p` when `p` lies strictly outside its hull edge,
//! or on the edge's line strictly between its endpoints.
//!
//! The arena keeps dead triangles around; insertion scans every live triangle.
//! That is quadratic overall, which is fine for the few hundred sensors a run uses.

use nalgebra::Vector2;
use rustc_hash::FxHashSet;

use super::predicates::{incircle, orient, strictly_between};
use super::types::GeomCfg;
use crate::error::{EvasionError, Result};

/// Sentinel index for the vertex at infinity.
const GHOST: usize = usize::MAX;

/// Finite Delaunay triangles of a point set, each counter-clockwise.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Triangulation {
    pub triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

struct Builder<'a> {
    pts: &'a [Vector2<f64>],
    cfg: &'a GeomCfg,
    tris: Vec<[usize; 3]>,
    alive: Vec<bool>,
}

impl<'a> Builder<'a> {
    fn push(&mut self, t: [usize; 3]) {
        self.tris.push(t);
        self.alive.push(true);
    }

    fn in_conflict(&self, t: [usize; 3], p: Vector2<f64>) -> bool {
        if let Some(k) = t.iter().position(|&v| v == GHOST) {
            let a = self.pts[t[(k + 1) % 3]];
            let b = self.pts[t[(k + 2) % 3]];
            let o = orient(a, b, p);
            if o > self.cfg.eps_orient {
                return true;
            }
            if o < -self.cfg.eps_orient {
                return false;
            }
            return strictly_between(p, a, b);
        }
        incircle(self.pts[t[0]], self.pts[t[1]], self.pts[t[2]], p) > self.cfg.eps_incircle
    }

    fn insert(&mut self, idx: usize) -> Result<()> {
        let p = self.pts[idx];
        let bad: Vec<usize> = (0..self.tris.len())
            .filter(|&k| self.alive[k] && self.in_conflict(self.tris[k], p))
            .collect();
        if bad.is_empty() {
            return Err(EvasionError::invalid(format!(
                "point {idx} could not be located in the triangulation"
            )));
        }

        let mut directed: FxHashSet<(usize, usize)> = FxHashSet::default();
        for &k in &bad {
            let t = self.tris[k];
            for e in 0..3 {
                directed.insert((t[e], t[(e + 1) % 3]));
            }
        }
        let mut boundary: Vec<(usize, usize)> = directed
            .iter()
            .copied()
            .filter(|&(u, v)| !directed.contains(&(v, u)))
            .collect();
        // Hash order is not stable across runs; keep the arena deterministic.
        boundary.sort_unstable();

        for &k in &bad {
            self.alive[k] = false;
        }
        for (u, v) in boundary {
            self.push([u, v, idx]);
        }
        Ok(())
    }
}

/// First index `c` such that `(a, b, c)` is not collinear.
fn first_non_collinear(pts: &[Vector2<f64>], cfg: &GeomCfg) -> Option<usize> {
    (2..pts.len()).find(|&c| orient(pts[0], pts[1], pts[c]).abs() > cfg.eps_orient)
}

/// Delaunay triangulation of distinct points.
///
/// Fails with `InvalidConfiguration` for fewer than three points or when every
/// point is collinear. Duplicate detection is the caller's job.
pub fn triangulate(pts: &[Vector2<f64>], cfg: &GeomCfg) -> Result<Triangulation> {
    if pts.len() < 3 {
        return Err(EvasionError::invalid(format!(
            "need at least 3 points, got {}",
            pts.len()
        )));
    }
    let c = first_non_collinear(pts, cfg)
        .ok_or_else(|| EvasionError::invalid("all points are collinear"))?;
    let (a, mut b, mut c) = (0usize, 1usize, c);
    if orient(pts[a], pts[b], pts[c]) < 0.0 {
        std::mem::swap(&mut b, &mut c);
    }

    let mut builder = Builder {
        pts,
        cfg,
        tris: Vec::with_capacity(6 * pts.len()),
        alive: Vec::with_capacity(6 * pts.len()),
    };
    builder.push([a, b, c]);
    builder.push([b, a, GHOST]);
    builder.push([c, b, GHOST]);
    builder.push([a, c, GHOST]);

    for idx in 0..pts.len() {
        if idx == a || idx == b || idx == c {
            continue;
        }
        builder.insert(idx)?;
    }

    let triangles = builder
        .tris
        .iter()
        .zip(builder.alive.iter())
        .filter(|(t, &alive)| alive && !t.contains(&GHOST))
        .map(|(t, _)| *t)
        .collect();
    Ok(Triangulation { triangles })
}
