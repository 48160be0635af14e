//! Combinatorial map over the edges of a coverage complex.
//!
//! Every edge `{u,v}` becomes two darts `u→v` and `v→u` living side by side in
//! one arena, so the twin of a dart is its id with the low bit flipped. The
//! successor table walks each face with the face on the left; its orbits are
//! the boundary cycles. Bounded faces come out counter-clockwise, outer walks
//! of components clockwise.
//!
//! Code cross-refs: `complex::Complex`, `state::Topology`.

mod build;
mod types;

pub use build::CMap;
pub use types::{BoundaryCycle, CycleKey, Dart, DartId, Orientation};

#[cfg(test)]
mod tests;
