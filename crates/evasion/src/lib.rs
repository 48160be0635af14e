//! Evasion-path tracking for mobile sensor networks.
//!
//! A fixed fence of sensors encloses a domain in which mobile sensors move.
//! Each snapshot is turned into a coverage complex (filtered Delaunay), its
//! 1-skeleton into a combinatorial map, and the map's boundary cycles into
//! tracked holes. Between snapshots the engine classifies what changed,
//! bisecting the step until every change is atomic, and keeps persistent
//! labels on holes. A hole whose label survives the whole run may hide an
//! evader.
//!
//! Layout
//! - `geom2`: predicates and Delaunay triangulation.
//! - `complex`, `cmap`: per-snapshot structures, rebuilt from scratch.
//! - `state`: topology snapshot plus the mutable label state.
//! - `transition`, `stepper`: change classification and bisection.
//! - `sim`: tracker, motion models, domain, driver, reports.
//!
//! API Policy
//! - Internal crate; the curated surface is `api` and `prelude`. Breaking
//!   changes are fine when they simplify things.

pub mod api;
pub mod cmap;
pub mod complex;
pub mod error;
pub mod geom2;
pub mod sim;
pub mod state;
pub mod stepper;
pub mod transition;

#[cfg(test)]
pub(crate) mod test_fixtures;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{ErrorKind, EvasionError, Result};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for drivers and experiments.
pub mod prelude {
    pub use crate::error::{ErrorKind, EvasionError, Result};
    pub use crate::geom2::{GeomCfg, Sensor};
    pub use crate::sim::{
        BilliardMotion, BrownianMotion, Domain, Horizon, MotionModel, RectangularDomain,
        RunOutcome, RunToken, ScriptedMotion, SimCfg, Simulation, Summary, Tracker,
    };
    pub use crate::state::{CycleLabel, Fence, LabelRecord, RetireCause};
    pub use crate::transition::StructuralEvent;
    pub use nalgebra::Vector2 as Vec2;
}
