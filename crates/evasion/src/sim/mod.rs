//! Simulation driver around the tracking engine.
//!
//! Purpose
//! - `Tracker`: the engine proper. Owns the current topology and labels and
//!   advances them one snapshot at a time through the adaptive stepper.
//! - `Simulation`: a fixed fence plus mobile sensors moved by a `MotionModel`
//!   inside a `Domain`, run to a `Horizon`.
//! - Reporting: `Summary` and `RunOutcome`, serializable for the CLI.
//!
//! Reproducibility
//! - All randomness flows from a `RunToken { seed, index }`, split into
//!   independent streams for placement and motion.

mod config;
mod domain;
mod driver;
mod motion;
mod report;
mod seed;
mod tracker;

pub use config::{Horizon, SimCfg};
pub use domain::{Domain, RectangularDomain};
pub use driver::Simulation;
pub use motion::{BilliardMotion, BrownianMotion, MotionModel, ScriptedMotion};
pub use report::{RunFailure, RunOutcome, Summary, Survivor};
pub use seed::RunToken;
pub use tracker::{StepReport, Tracker};

#[cfg(test)]
mod tests;
