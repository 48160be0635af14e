//! Coverage complex (filtered Delaunay) of a sensor snapshot.
//!
//! Purpose
//! - Turn sensor positions and radii into the simplicial complex whose holes
//!   are the uncovered regions an evader could hide in.
//! - Rebuild from scratch each snapshot; nothing is updated in place.
//!
//! Model
//! - Triangle retained iff its circumscribed disk is covered (circumradius at
//!   most the smallest vertex radius, scaled).
//! - Edge retained iff it bounds a retained triangle, or it is unattached and
//!   its endpoints' disks overlap.
//! - With uniform radius and unit scale this is the alpha complex at `α = r`.
//!
//! Code cross-refs: `geom2::triangulate`, `cmap::CMap::new`.

mod build;
mod simplex;

pub use build::{build_complex, Complex, CoverageCfg};
pub use simplex::Simplex;
