use nalgebra::Vector2;
use rustc_hash::FxHashMap;

use super::types::{BoundaryCycle, CycleKey, Dart, DartId, Orientation};
use crate::complex::Complex;
use crate::error::{EvasionError, Result};
use crate::geom2::predicates::angle_of;
use crate::geom2::signed_area;

/// Combinatorial map of the 1-skeleton of a complex.
///
/// Immutable after construction; `next` is a permutation of the dart arena.
#[derive(Clone, Debug)]
pub struct CMap {
    darts: Vec<Dart>,
    next: Vec<DartId>,
    lookup: FxHashMap<(usize, usize), DartId>,
    points: Vec<Vector2<f64>>,
}

impl CMap {
    /// Build darts, the rotation at every vertex and the successor table.
    ///
    /// The successor of `u→v` is `v→w` where `w` is the neighbour of `v`
    /// immediately clockwise from `u`.
    pub fn new(complex: &Complex) -> Self {
        let points = complex.points().to_vec();
        let mut darts = Vec::with_capacity(2 * complex.edges().len());
        for e in complex.edges() {
            let (u, v) = (e.vertices()[0], e.vertices()[1]);
            darts.push(Dart { origin: u, dest: v });
            darts.push(Dart { origin: v, dest: u });
        }
        let lookup: FxHashMap<(usize, usize), DartId> = darts
            .iter()
            .enumerate()
            .map(|(k, d)| ((d.origin, d.dest), DartId(k)))
            .collect();

        // Outgoing darts per vertex, counter-clockwise by angle.
        let mut rotation: Vec<Vec<DartId>> = vec![Vec::new(); points.len()];
        for (k, d) in darts.iter().enumerate() {
            rotation[d.origin].push(DartId(k));
        }
        let mut slot = vec![0usize; darts.len()];
        for fan in rotation.iter_mut() {
            fan.sort_by(|&a, &b| {
                let (da, db) = (darts[a.0], darts[b.0]);
                let ta = angle_of(points[da.dest] - points[da.origin]);
                let tb = angle_of(points[db.dest] - points[db.origin]);
                ta.partial_cmp(&tb)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(da.dest.cmp(&db.dest))
            });
            for (k, id) in fan.iter().enumerate() {
                slot[id.0] = k;
            }
        }

        let next = (0..darts.len())
            .map(|k| {
                let back = DartId(k).twin();
                let fan = &rotation[darts[back.0].origin];
                fan[(slot[back.0] + fan.len() - 1) % fan.len()]
            })
            .collect();

        Self {
            darts,
            next,
            lookup,
            points,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(darts: Vec<Dart>, next: Vec<DartId>, points: Vec<Vector2<f64>>) -> Self {
        let lookup = darts
            .iter()
            .enumerate()
            .map(|(k, d)| ((d.origin, d.dest), DartId(k)))
            .collect();
        Self {
            darts,
            next,
            lookup,
            points,
        }
    }

    #[inline]
    pub fn num_darts(&self) -> usize {
        self.darts.len()
    }

    #[inline]
    pub fn dart(&self, id: DartId) -> Dart {
        self.darts[id.0]
    }

    #[inline]
    pub fn next(&self, id: DartId) -> DartId {
        self.next[id.0]
    }

    pub fn find(&self, origin: usize, dest: usize) -> Option<DartId> {
        self.lookup.get(&(origin, dest)).copied()
    }

    /// Partition the darts into boundary cycles.
    ///
    /// Cycles come out ordered by their smallest dart id; callers should not
    /// rely on that.
    pub fn boundary_cycles(&self) -> Result<Vec<BoundaryCycle>> {
        let n = self.darts.len();
        let mut visited = vec![false; n];
        let mut cycles = Vec::new();
        for start in 0..n {
            if visited[start] {
                continue;
            }
            let mut walk = Vec::new();
            let mut cur = DartId(start);
            loop {
                if visited[cur.0] {
                    return Err(EvasionError::malformed(format!(
                        "successor chain from dart {start} re-enters dart {} before closing",
                        cur.0
                    )));
                }
                visited[cur.0] = true;
                walk.push(cur);
                cur = self.next[cur.0];
                if cur.0 == start {
                    break;
                }
            }
            cycles.push(self.make_cycle(walk));
        }
        Ok(cycles)
    }

    fn make_cycle(&self, darts: Vec<DartId>) -> BoundaryCycle {
        let vertices: Vec<usize> = darts.iter().map(|d| self.darts[d.0].origin).collect();
        let area = signed_area(vertices.iter().map(|&v| self.points[v]));
        // Tree walks cancel to zero up to rounding.
        let orientation = if darts.len() < 3 || area.abs() <= 1e-12 {
            Orientation::Degenerate
        } else if area > 0.0 {
            Orientation::Ccw
        } else {
            Orientation::Cw
        };
        let key = CycleKey::from_darts(darts.iter().map(|d| self.darts[d.0]));
        BoundaryCycle {
            darts,
            vertices,
            orientation,
            key,
        }
    }
}
