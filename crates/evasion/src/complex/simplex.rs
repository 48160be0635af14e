use std::fmt;

use serde::{Deserialize, Serialize};

const UNUSED: usize = usize::MAX;

/// A vertex, edge or triangle identified by its vertex set.
///
/// Vertices are stored sorted, so `{3,7}` and `{7,3}` compare equal.
/// Unused slots hold `usize::MAX`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Simplex {
    verts: [usize; 3],
    len: u8,
}

impl Simplex {
    pub fn vertex(v: usize) -> Self {
        Self {
            verts: [v, UNUSED, UNUSED],
            len: 1,
        }
    }

    pub fn edge(a: usize, b: usize) -> Self {
        debug_assert_ne!(a, b);
        Self {
            verts: [a.min(b), a.max(b), UNUSED],
            len: 2,
        }
    }

    pub fn triangle(a: usize, b: usize, c: usize) -> Self {
        let mut v = [a, b, c];
        v.sort_unstable();
        debug_assert!(v[0] != v[1] && v[1] != v[2]);
        Self { verts: v, len: 3 }
    }

    /// `None` unless `vs` has one to three distinct entries.
    pub fn from_vertices(vs: &[usize]) -> Option<Self> {
        match *vs {
            [a] => Some(Self::vertex(a)),
            [a, b] if a != b => Some(Self::edge(a, b)),
            [a, b, c] if a != b && b != c && a != c => Some(Self::triangle(a, b, c)),
            _ => None,
        }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.len as usize - 1
    }

    #[inline]
    pub fn vertices(&self) -> &[usize] {
        &self.verts[..self.len as usize]
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.vertices().contains(&v)
    }

    /// True if every vertex of `self` is a vertex of `other`.
    pub fn is_face_of(&self, other: &Simplex) -> bool {
        self.vertices().iter().all(|&v| other.contains(v))
    }

    /// Codimension-one faces (edges of a triangle, endpoints of an edge).
    pub fn facets(&self) -> Vec<Simplex> {
        match *self.vertices() {
            [a, b, c] => vec![Self::edge(a, b), Self::edge(a, c), Self::edge(b, c)],
            [a, b] => vec![Self::vertex(a), Self::vertex(b)],
            _ => Vec::new(),
        }
    }
}

impl fmt::Debug for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (k, v) in self.vertices().iter().enumerate() {
            if k > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("}")
    }
}
