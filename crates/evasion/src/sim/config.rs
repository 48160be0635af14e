use serde::{Deserialize, Serialize};

use crate::complex::CoverageCfg;
use crate::geom2::GeomCfg;
use crate::stepper::StepCfg;

/// When a run stops.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Horizon {
    pub max_time: f64,
    pub max_steps: Option<usize>,
}

impl Default for Horizon {
    fn default() -> Self {
        Self {
            max_time: 1.0,
            max_steps: None,
        }
    }
}

/// Everything a simulation needs besides the sensors and the motion model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimCfg {
    pub geom: GeomCfg,
    pub coverage: CoverageCfg,
    pub step: StepCfg,
    pub horizon: Horizon,
    pub dt: f64,
    /// Stop as soon as no live hole can contain an intruder.
    pub stop_when_cleared: bool,
}

impl Default for SimCfg {
    fn default() -> Self {
        Self {
            geom: GeomCfg::default(),
            coverage: CoverageCfg::default(),
            step: StepCfg::default(),
            horizon: Horizon::default(),
            dt: 0.01,
            stop_when_cleared: false,
        }
    }
}
