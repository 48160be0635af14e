//! Small hand-checked sensor layouts shared by unit tests.
//!
//! All use radius 1 and unit coverage scale.
//! - Equilateral triangle of side `s`: edges present for `s ≤ 2`, face covered
//!   once the circumradius `s/√3` drops to 1 (between s = 1.75 and 1.7).
//! - Rhombus `(±1.3, 0), (0, ±h)`: vertical diagonal present iff `h ≤ 1`; both
//!   triangles stay uncovered while `h > 0.954`.

use crate::geom2::Sensor;
use crate::sim::{SimCfg, Tracker};
use crate::state::Fence;
use crate::stepper::StepCfg;

pub(crate) const R: f64 = 1.0;
pub(crate) const HALF_WIDTH: f64 = 1.3;
pub(crate) const B_CENTER: (f64, f64) = (10.0, 0.37);

pub(crate) fn equilateral(side: f64) -> Vec<Sensor> {
    let rc = side / 3f64.sqrt();
    [90.0f64, 210.0, 330.0]
        .iter()
        .map(|deg| {
            let th = deg.to_radians();
            Sensor::new(rc * th.cos(), rc * th.sin(), R)
        })
        .collect()
}

/// Counter-clockwise from the right tip.
pub(crate) fn rhombus(cx: f64, cy: f64, w: f64, h: f64) -> Vec<Sensor> {
    vec![
        Sensor::new(cx + w, cy, R),
        Sensor::new(cx, cy + h, R),
        Sensor::new(cx - w, cy, R),
        Sensor::new(cx, cy - h, R),
    ]
}

/// Rhombus A (the fence) at the origin, rhombus B far to the right.
pub(crate) fn two_rhombi(h_a: f64, h_b: f64) -> Vec<Sensor> {
    let mut v = rhombus(0.0, 0.0, HALF_WIDTH, h_a);
    v.extend(rhombus(B_CENTER.0, B_CENTER.1, HALF_WIDTH, h_b));
    v
}

pub(crate) fn cfg_with_depth(max_depth: u32) -> SimCfg {
    SimCfg {
        step: StepCfg { max_depth },
        ..SimCfg::default()
    }
}

pub(crate) fn tracker(sensors: &[Sensor], fence_len: usize, max_depth: u32) -> Tracker {
    let fence = Fence::new(fence_len).unwrap();
    Tracker::new(sensors, fence, &cfg_with_depth(max_depth), 0.0).unwrap()
}
