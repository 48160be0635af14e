//! Motion models for mobile sensors.
//!
//! The engine never looks inside a model: it hands over current positions and
//! a time step and gets new positions back. Fence sensors are not passed in.

use std::collections::VecDeque;

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::StandardNormal;

use super::domain::{Domain, RectangularDomain};

/// Source of new positions for the mobile sensors.
pub trait MotionModel: Send {
    fn name(&self) -> &'static str;

    /// Positions after `dt`, one per input position, in the same order.
    fn step(&mut self, mobile: &[Vector2<f64>], dt: f64) -> Vec<Vector2<f64>>;
}

/// Independent Gaussian increments with standard deviation `sigma·√dt`,
/// mirrored back into the domain.
#[derive(Clone, Debug)]
pub struct BrownianMotion {
    domain: RectangularDomain,
    sigma: f64,
    rng: StdRng,
}

impl BrownianMotion {
    pub fn new(domain: RectangularDomain, sigma: f64, rng: StdRng) -> Self {
        Self { domain, sigma, rng }
    }
}

impl MotionModel for BrownianMotion {
    fn name(&self) -> &'static str {
        "brownian"
    }

    fn step(&mut self, mobile: &[Vector2<f64>], dt: f64) -> Vec<Vector2<f64>> {
        let scale = self.sigma * dt.max(0.0).sqrt();
        mobile
            .iter()
            .map(|p| {
                let dx: f64 = self.rng.sample(StandardNormal);
                let dy: f64 = self.rng.sample(StandardNormal);
                let q = p + Vector2::new(dx, dy) * scale;
                if self.domain.in_domain(q) {
                    q
                } else {
                    self.domain.reflect(q)
                }
            })
            .collect()
    }
}

/// Constant speed along a heading; headings flip on wall contact.
#[derive(Clone, Debug)]
pub struct BilliardMotion {
    domain: RectangularDomain,
    speed: f64,
    headings: Vec<f64>,
    rng: StdRng,
}

impl BilliardMotion {
    pub fn new(domain: RectangularDomain, speed: f64, rng: StdRng) -> Self {
        Self {
            domain,
            speed,
            headings: Vec::new(),
            rng,
        }
    }

    pub fn headings(&self) -> &[f64] {
        &self.headings
    }
}

impl MotionModel for BilliardMotion {
    fn name(&self) -> &'static str {
        "billiard"
    }

    fn step(&mut self, mobile: &[Vector2<f64>], dt: f64) -> Vec<Vector2<f64>> {
        if self.headings.len() != mobile.len() {
            let tau = std::f64::consts::TAU;
            self.headings = (0..mobile.len())
                .map(|_| self.rng.gen_range(0.0..tau))
                .collect();
        }
        let d = &self.domain;
        mobile
            .iter()
            .zip(self.headings.iter_mut())
            .map(|(p, th)| {
                let q = p + Vector2::new(th.cos(), th.sin()) * (self.speed * dt);
                if q.x <= d.x_min || q.x >= d.x_max {
                    *th = std::f64::consts::PI - *th;
                }
                if q.y <= d.y_min || q.y >= d.y_max {
                    *th = -*th;
                }
                if d.in_domain(q) {
                    q
                } else {
                    d.reflect(q)
                }
            })
            .collect()
    }
}

/// Replays recorded frames; holds still once they run out.
#[derive(Clone, Debug, Default)]
pub struct ScriptedMotion {
    frames: VecDeque<Vec<Vector2<f64>>>,
}

impl ScriptedMotion {
    pub fn new(frames: impl IntoIterator<Item = Vec<Vector2<f64>>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl MotionModel for ScriptedMotion {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn step(&mut self, mobile: &[Vector2<f64>], _dt: f64) -> Vec<Vector2<f64>> {
        match self.frames.pop_front() {
            Some(frame) if frame.len() == mobile.len() => frame,
            _ => mobile.to_vec(),
        }
    }
}
