use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::SimCfg;
use super::report::Summary;
use crate::error::{EvasionError, Result};
use crate::geom2::Sensor;
use crate::state::{Fence, TopologicalState, Topology};
use crate::stepper::Stepper;
use crate::transition::{SimplexMove, StructuralEvent};

/// What one committed step did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub step: usize,
    pub t_start: f64,
    pub t_end: f64,
    /// Non-trivial simplicial moves, in time order.
    pub moves: Vec<SimplexMove>,
    pub events: Vec<StructuralEvent>,
    pub bisections: usize,
}

/// The engine: current topology and labels, advanced one snapshot at a time.
///
/// A failed `advance` leaves every field as it was.
#[derive(Clone, Debug)]
pub struct Tracker {
    stepper: Stepper,
    topology: Topology,
    state: TopologicalState,
    time: f64,
    steps: usize,
    bisections: usize,
}

impl Tracker {
    /// Build the initial topology and label every hole. Sensors `0..fence.len()`
    /// form the fence.
    pub fn new(sensors: &[Sensor], fence: Fence, cfg: &SimCfg, t0: f64) -> Result<Self> {
        let topology = Topology::build(sensors, fence, &cfg.geom, &cfg.coverage)?;
        let state = TopologicalState::initialize(&topology, t0);
        Ok(Self {
            stepper: Stepper::new(fence, cfg.geom, cfg.coverage, cfg.step),
            topology,
            state,
            time: t0,
            steps: 0,
            bisections: 0,
        })
    }

    /// Move every sensor to `next` over `dt`.
    pub fn advance(&mut self, next: &[Sensor], dt: f64) -> Result<StepReport> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(EvasionError::invalid(format!("time step must be positive, got {dt}")));
        }
        let out = self
            .stepper
            .advance(&self.topology, &self.state, next, self.time, dt)?;

        let report = StepReport {
            step: self.steps + 1,
            t_start: self.time,
            t_end: self.time + dt,
            moves: out
                .changesets
                .iter()
                .map(|cs| cs.simplex_move)
                .filter(|m| *m != SimplexMove::Trivial)
                .collect(),
            events: out.changesets.iter().flat_map(|cs| cs.events()).collect(),
            bisections: out.bisections,
        };
        if !report.events.is_empty() {
            debug!(step = report.step, t = report.t_end, events = report.events.len(), "step committed");
        }
        self.topology = out.topology;
        self.state = out.state;
        self.time += dt;
        self.steps += 1;
        self.bisections += out.bisections;
        Ok(report)
    }

    pub fn state(&self) -> &TopologicalState {
        &self.state
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn sensors(&self) -> &[Sensor] {
        self.topology.sensors()
    }

    pub fn fence(&self) -> Fence {
        self.stepper.fence
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn bisections(&self) -> usize {
        self.bisections
    }

    pub fn summary(&self) -> Summary {
        Summary::from_state(&self.state, self.time, self.steps, self.bisections)
    }
}
