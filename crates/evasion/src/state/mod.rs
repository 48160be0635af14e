//! Topological state: which label each tracked cycle carries, and the history
//! of every label ever allocated.
//!
//! Purpose
//! - Give holes persistent names that survive reshaping, so the question
//!   "has this uncovered region existed since the start?" has an answer.
//! - Keep the snapshot-derived data (`Topology`) separate from the only
//!   mutable thing in the engine (`TopologicalState`).
//!
//! Rules
//! - The fence exterior is `CycleLabel::FENCE` forever.
//! - Labels are allocated monotonically and never reused.
//! - Merges keep the fence label if involved, otherwise the lower label.
//! - Splits keep the label on the longer child (fence child for the fence).
//! - Births start with `intruder = false`; everything present at the start,
//!   and everything descending from it, starts with `intruder = true`.
//!
//! Code cross-refs: `transition::detect`, `stepper::advance`.

mod labels;
mod topology;
mod tracking;

pub use labels::{CycleLabel, LabelRecord, RetireCause};
pub use topology::{Fence, Topology};
pub use tracking::TopologicalState;

#[cfg(test)]
mod tests;
