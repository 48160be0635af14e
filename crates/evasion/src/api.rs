//! Curated internal API (UNSTABLE).
//!
//! One import line for experiments and the CLI. Not a compatibility promise.

// Geometry
pub use crate::geom2::{interpolate, triangulate, GeomCfg, Sensor, Triangulation};
// Per-snapshot structures
pub use crate::cmap::{BoundaryCycle, CMap, CycleKey, DartId, Orientation};
pub use crate::complex::{build_complex, Complex, CoverageCfg, Simplex};
// Labels and transitions
pub use crate::state::{CycleLabel, Fence, LabelRecord, RetireCause, TopologicalState, Topology};
pub use crate::stepper::{StepCfg, StepOutcome, Stepper};
pub use crate::transition::{
    detect, ChangeSummary, Changeset, CycleEvent, SimplexMove, StructuralEvent,
};
// Driver
pub use crate::sim::{
    BilliardMotion, BrownianMotion, Domain, Horizon, MotionModel, RectangularDomain, RunFailure,
    RunOutcome, RunToken, ScriptedMotion, SimCfg, Simulation, StepReport, Summary, Survivor,
    Tracker,
};
