use nalgebra::Vector2;
use rand::RngCore;
use tracing::{info, warn};

use super::config::SimCfg;
use super::domain::Domain;
use super::motion::MotionModel;
use super::report::{RunFailure, RunOutcome};
use super::tracker::{StepReport, Tracker};
use crate::error::{EvasionError, Result};
use crate::geom2::Sensor;
use crate::state::Fence;

/// Fixed fence plus mobile sensors driven by a motion model.
pub struct Simulation {
    tracker: Tracker,
    motion: Box<dyn MotionModel>,
    fence: Vec<Sensor>,
    mobile: Vec<Sensor>,
    cfg: SimCfg,
}

impl Simulation {
    /// `fence` must be counter-clockwise; it is prepended to `mobile`.
    pub fn new(
        fence: Vec<Sensor>,
        mobile: Vec<Sensor>,
        motion: Box<dyn MotionModel>,
        cfg: SimCfg,
    ) -> Result<Self> {
        if !(cfg.dt.is_finite() && cfg.dt > 0.0) {
            return Err(EvasionError::invalid(format!(
                "dt must be positive, got {}",
                cfg.dt
            )));
        }
        let ring = Fence::new(fence.len())?;
        let all: Vec<Sensor> = fence.iter().chain(mobile.iter()).copied().collect();
        let tracker = Tracker::new(&all, ring, &cfg, 0.0)?;
        Ok(Self {
            tracker,
            motion,
            fence,
            mobile,
            cfg,
        })
    }

    /// Fence from `domain`, `n_mobile` sensors placed uniformly inside it.
    pub fn in_domain<D: Domain>(
        domain: &D,
        n_mobile: usize,
        radius: f64,
        motion: Box<dyn MotionModel>,
        cfg: SimCfg,
        rng: &mut dyn RngCore,
    ) -> Result<Self> {
        let fence = domain
            .fence_points()
            .into_iter()
            .map(|p| Sensor::at(p, radius))
            .collect();
        let mobile = (0..n_mobile)
            .map(|_| Sensor::at(domain.sample_interior(rng), radius))
            .collect();
        Self::new(fence, mobile, motion, cfg)
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn cfg(&self) -> &SimCfg {
        &self.cfg
    }

    pub fn motion_name(&self) -> &'static str {
        self.motion.name()
    }

    pub fn num_sensors(&self) -> usize {
        self.fence.len() + self.mobile.len()
    }

    /// Horizon reached, or nothing left to look for.
    pub fn is_finished(&self) -> bool {
        let h = &self.cfg.horizon;
        let t = self.tracker.time();
        // Half a step of slack absorbs accumulated rounding in `t`.
        t >= h.max_time - 0.5 * self.cfg.dt
            || h.max_steps.is_some_and(|n| self.tracker.steps() >= n)
            || (self.cfg.stop_when_cleared && !self.tracker.state().has_intruder())
    }

    /// Move the mobile sensors once and track the change.
    pub fn step(&mut self) -> std::result::Result<StepReport, RunFailure> {
        let dt = self.cfg.dt;
        let current: Vec<Vector2<f64>> = self.mobile.iter().map(|s| s.pos).collect();
        let moved = self.motion.step(&current, dt);
        let mobile: Vec<Sensor> = self
            .mobile
            .iter()
            .zip(moved)
            .map(|(s, p)| Sensor::at(p, s.radius))
            .collect();
        let all: Vec<Sensor> = self.fence.iter().chain(mobile.iter()).copied().collect();
        match self.tracker.advance(&all, dt) {
            Ok(report) => {
                self.mobile = mobile;
                Ok(report)
            }
            Err(error) => Err(RunFailure {
                step: self.tracker.steps() + 1,
                time: self.tracker.time(),
                error,
                partial: self.tracker.summary(),
            }),
        }
    }

    pub fn run(&mut self) -> RunOutcome {
        self.run_while(|_| true)
    }

    /// Step until the horizon, or until `keep_going` says stop.
    pub fn run_while(&mut self, mut keep_going: impl FnMut(&Tracker) -> bool) -> RunOutcome {
        info!(
            sensors = self.num_sensors(),
            holes = self.tracker.topology().num_holes(),
            motion = self.motion.name(),
            "run start"
        );
        while !self.is_finished() && keep_going(&self.tracker) {
            if let Err(failure) = self.step() {
                warn!(step = failure.step, t = failure.time, kind = %failure.kind(), "run failed");
                return RunOutcome::Failed(failure);
            }
        }
        let summary = self.tracker.summary();
        info!(
            t = summary.end_time,
            steps = summary.steps,
            survivors = summary.survivors.len(),
            evasion = summary.evasion_exists,
            "run end"
        );
        RunOutcome::Completed(summary)
    }
}
