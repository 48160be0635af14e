//! Planar geometry for sensor networks.
//!
//! Purpose
//! - Provide the few exact-ish predicates the topology needs (orientation,
//!   in-circle, circumradius) plus an incremental Delaunay triangulation.
//! - Keep tolerances explicit through `GeomCfg` rather than scattering literals.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>`, identified by their index in the input slice.
//! - Triangles are returned counter-clockwise.
//!
//! Code cross-refs: `complex::build_complex`, `cmap::CMap`.

pub mod delaunay;
pub mod predicates;
mod types;

pub use delaunay::{triangulate, Triangulation};
pub use predicates::{circumradius_sq, incircle, orient, signed_area, strictly_between};
pub use types::{interpolate, GeomCfg, Sensor};
