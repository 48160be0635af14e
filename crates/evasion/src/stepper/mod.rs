//! Adaptive stepping by bisection.
//!
//! Purpose
//! - Turn one motion step, which may contain several topological changes,
//!   into a sequence of atomic transitions the detector can classify.
//!
//! Model
//! - Positions inside a step are the linear blend of its start and end.
//! - A worklist of `(s_start, s_end, depth)` ranges is processed in time
//!   order. A range whose transition is ambiguous is replaced by its two
//!   halves; a classified range is committed and becomes the new "before".
//! - Commits go to a scratch copy of the state. The caller only sees it if the
//!   whole step resolves, so an unresolved step leaves the tracker untouched.
//!
//! Code cross-refs: `transition::detect`, `sim::Tracker::advance`.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::complex::CoverageCfg;
use crate::error::{EvasionError, Result};
use crate::geom2::{interpolate, GeomCfg, Sensor};
use crate::state::{Fence, TopologicalState, Topology};
use crate::transition::{detect, Changeset};

/// Bisection limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepCfg {
    /// Deepest allowed halving; depth `d` ranges span `dt / 2^d`.
    pub max_depth: u32,
}

impl Default for StepCfg {
    fn default() -> Self {
        Self { max_depth: 20 }
    }
}

/// Result of a fully resolved step.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    pub topology: Topology,
    pub state: TopologicalState,
    /// Every committed sub-step, in time order, trivial ones included.
    pub changesets: Vec<Changeset>,
    pub bisections: usize,
    pub max_depth_used: u32,
}

#[derive(Clone, Copy, Debug)]
struct Span {
    s0: f64,
    s1: f64,
    depth: u32,
}

/// Everything needed to rebuild a topology at an intermediate instant.
#[derive(Clone, Copy, Debug)]
pub struct Stepper {
    pub fence: Fence,
    pub geom: GeomCfg,
    pub coverage: CoverageCfg,
    pub cfg: StepCfg,
}

impl Stepper {
    pub fn new(fence: Fence, geom: GeomCfg, coverage: CoverageCfg, cfg: StepCfg) -> Self {
        Self {
            fence,
            geom,
            coverage,
            cfg,
        }
    }

    /// Advance from `current` (at `t_start`) to `end` positions at `t_start + dt`.
    ///
    /// Errors
    /// - `UnresolvedTransition` when a range at `max_depth` is still ambiguous.
    /// - Any builder or map error at an intermediate instant, unchanged.
    pub fn advance(
        &self,
        current: &Topology,
        state: &TopologicalState,
        end: &[Sensor],
        t_start: f64,
        dt: f64,
    ) -> Result<StepOutcome> {
        let start = current.sensors();
        if start.len() != end.len() {
            return Err(EvasionError::invalid(format!(
                "step changes sensor count from {} to {}",
                start.len(),
                end.len()
            )));
        }
        let mut working = state.clone();
        let mut before = current.clone();
        let mut changesets = Vec::new();
        let mut bisections = 0usize;
        let mut max_depth_used = 0u32;
        let mut stack = vec![Span {
            s0: 0.0,
            s1: 1.0,
            depth: 0,
        }];

        while let Some(span) = stack.pop() {
            let t1 = t_start + span.s1 * dt;
            let sensors = interpolate(start, end, span.s1);
            let after = Topology::build(&sensors, self.fence, &self.geom, &self.coverage)?;
            match detect(&before, &after, &working, t1) {
                Ok(cs) => {
                    working.apply(&cs)?;
                    changesets.push(cs);
                    before = after;
                    max_depth_used = max_depth_used.max(span.depth);
                }
                Err(EvasionError::AmbiguousTransition { change }) => {
                    let t0 = t_start + span.s0 * dt;
                    if span.depth >= self.cfg.max_depth {
                        warn!(depth = span.depth, t0, t1, "transition left unresolved: {change}");
                        return Err(EvasionError::UnresolvedTransition {
                            depth: span.depth,
                            t_start: t0,
                            t_end: t1,
                            change,
                        });
                    }
                    let mid = 0.5 * (span.s0 + span.s1);
                    trace!(depth = span.depth + 1, t0, t1, "bisecting: {change}");
                    bisections += 1;
                    stack.push(Span {
                        s0: mid,
                        s1: span.s1,
                        depth: span.depth + 1,
                    });
                    stack.push(Span {
                        s0: span.s0,
                        s1: mid,
                        depth: span.depth + 1,
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(StepOutcome {
            topology: before,
            state: working,
            changesets,
            bisections,
            max_depth_used,
        })
    }
}
