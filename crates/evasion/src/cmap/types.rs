use std::fmt;

use serde::{Deserialize, Serialize};

/// Arena index of a dart. Edge `k` owns darts `2k` and `2k+1`; twin is `id ^ 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DartId(pub usize);

impl DartId {
    #[inline]
    pub fn twin(self) -> DartId {
        DartId(self.0 ^ 1)
    }
}

/// Oriented half-edge `origin → dest`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dart {
    pub origin: usize,
    pub dest: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Bounded face on the left.
    Ccw,
    /// Outer walk of a component.
    Cw,
    /// Zero enclosed area (a bare edge or a tree).
    Degenerate,
}

/// Identity of a boundary cycle across snapshots: its sorted dart set.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CycleKey(Vec<(usize, usize)>);

impl CycleKey {
    pub fn from_darts(darts: impl IntoIterator<Item = Dart>) -> Self {
        let mut v: Vec<(usize, usize)> = darts.into_iter().map(|d| (d.origin, d.dest)).collect();
        v.sort_unstable();
        Self(v)
    }

    pub fn darts(&self) -> &[(usize, usize)] {
        &self.0
    }

    pub fn contains(&self, origin: usize, dest: usize) -> bool {
        self.0.binary_search(&(origin, dest)).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for CycleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (k, (a, b)) in self.0.iter().enumerate() {
            if k > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{a}>{b}")?;
        }
        f.write_str("]")
    }
}

/// One orbit of the successor permutation.
#[derive(Clone, Debug)]
pub struct BoundaryCycle {
    pub darts: Vec<DartId>,
    /// Origin of each dart, in walk order.
    pub vertices: Vec<usize>,
    pub orientation: Orientation,
    pub key: CycleKey,
}

impl BoundaryCycle {
    #[inline]
    pub fn len(&self) -> usize {
        self.darts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.darts.is_empty()
    }

    /// True unless the cycle bounds a face counter-clockwise.
    #[inline]
    pub fn is_outer(&self) -> bool {
        self.orientation != Orientation::Ccw
    }

    pub fn min_vertex(&self) -> Option<usize> {
        self.vertices.iter().copied().min()
    }

    pub fn contains_dart(&self, origin: usize, dest: usize) -> bool {
        self.key.contains(origin, dest)
    }
}
