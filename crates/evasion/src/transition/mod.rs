//! Transition detection between two consecutive topologies.
//!
//! Purpose
//! - Decide whether the change from one snapshot to the next is a single
//!   interpretable move, and if so what it does to the labelled cycles.
//!
//! Model
//! - Simplicial level: symmetric difference of edges and triangles, matched
//!   against the atomic moves in `SimplexMove` (including `EdgeFlip`, checked
//!   against both Delaunay triangulations).
//! - Cycle level: tracked cycles are compared by dart set. Exactly one of
//!   unchanged / birth / death / merge / split must explain the difference.
//! - Anything else is `AmbiguousTransition`, which the stepper answers by
//!   halving the step.
//!
//! Code cross-refs: `state::TopologicalState::apply`, `stepper::advance`.

mod detect;
mod types;

pub use detect::{classify_move, detect, diff_complexes};
pub use types::{ChangeSummary, Changeset, CycleEvent, SimplexMove, StructuralEvent};
