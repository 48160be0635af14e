use super::*;
use crate::geom2::{signed_area, Sensor};
use crate::state::{CycleLabel, LabelRecord};
use crate::stepper::StepCfg;
use crate::test_fixtures::{equilateral, rhombus, HALF_WIDTH, R};
use nalgebra::{vector, Vector2};
use rand::Rng;

fn unit_square() -> RectangularDomain {
    RectangularDomain::unit_square(0.3).unwrap()
}

#[test]
fn fence_wraps_the_domain_counter_clockwise() {
    let d = unit_square();
    let pts = d.fence_points();
    assert_eq!(pts.len(), 20);
    assert!(signed_area(pts.iter().copied()) > 0.0);
    for k in 0..pts.len() {
        let gap = (pts[(k + 1) % pts.len()] - pts[k]).norm();
        assert!(gap <= d.spacing + 1e-12, "gap {gap} at {k}");
        assert!(!d.in_domain(pts[k]));
    }
    assert_eq!(pts[0], vector![-0.15, -0.15]);
}

#[test]
fn bad_rectangles_are_rejected() {
    assert!(RectangularDomain::new(1.0, 0.0, 0.0, 1.0, 0.1).is_err());
    assert!(RectangularDomain::new(0.0, 1.0, 0.0, 1.0, 0.0).is_err());
    assert!(RectangularDomain::new(0.0, f64::NAN, 0.0, 1.0, 0.1).is_err());
}

#[test]
fn reflection_mirrors_into_the_domain() {
    let d = unit_square();
    let p = d.reflect(vector![-0.1, 0.5]);
    assert!((p - vector![0.1, 0.5]).norm() < 1e-12);
    let q = d.reflect(vector![1.2, 1.3]);
    assert!((q - vector![0.8, 0.7]).norm() < 1e-12);
    let inside = vector![0.4, 0.6];
    assert_eq!(d.reflect(inside), inside);
}

#[test]
fn run_tokens_are_reproducible_and_distinct() {
    let a: u64 = RunToken::new(7, 0).rng(1).gen();
    let b: u64 = RunToken::new(7, 0).rng(1).gen();
    let c: u64 = RunToken::new(7, 1).rng(1).gen();
    let d: u64 = RunToken::new(7, 0).rng(2).gen();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);
}

#[test]
fn motion_models_stay_inside() {
    let d = unit_square();
    let tok = RunToken::new(3, 0);
    let mut rng = tok.rng(0);
    let start: Vec<Vector2<f64>> = (0..30).map(|_| d.sample_interior(&mut rng)).collect();

    let mut brownian = BrownianMotion::new(d, 0.5, tok.rng(1));
    let mut billiard = BilliardMotion::new(d, 2.0, tok.rng(2));
    let mut pb = start.clone();
    let mut pl = start.clone();
    for _ in 0..50 {
        pb = brownian.step(&pb, 0.05);
        pl = billiard.step(&pl, 0.05);
        assert!(pb.iter().all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)));
        assert!(pl.iter().all(|p| (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y)));
    }
    assert_eq!(billiard.headings().len(), 30);
    assert_eq!(brownian.name(), "brownian");
}

#[test]
fn billiard_moves_at_constant_speed_away_from_walls() {
    let d = unit_square();
    let mut m = BilliardMotion::new(d, 0.1, RunToken::new(1, 1).rng(0));
    let p = vec![vector![0.5, 0.5]];
    let q = m.step(&p, 0.5);
    assert!(((q[0] - p[0]).norm() - 0.05).abs() < 1e-12);
}

#[test]
fn scripted_motion_replays_then_holds() {
    let mut m = ScriptedMotion::new(vec![vec![vector![1.0, 2.0]], vec![vector![3.0, 4.0]]]);
    let p0 = vec![vector![0.0, 0.0]];
    let p1 = m.step(&p0, 1.0);
    let p2 = m.step(&p1, 1.0);
    let p3 = m.step(&p2, 1.0);
    assert_eq!(p1, vec![vector![1.0, 2.0]]);
    assert_eq!(p2, vec![vector![3.0, 4.0]]);
    assert_eq!(p3, p2);
    assert_eq!(m.remaining(), 0);
}

#[test]
fn scripted_split_runs_to_horizon() {
    // Fixed rhombus fence; a second rhombus closes its diagonal.
    let fence = rhombus(0.0, 0.0, HALF_WIDTH, 1.02);
    let mobile = rhombus(10.0, 0.37, HALF_WIDTH, 1.06);
    let frames = [1.03, 0.99].map(|h| {
        rhombus(10.0, 0.37, HALF_WIDTH, h)
            .into_iter()
            .map(|s| s.pos)
            .collect::<Vec<_>>()
    });
    let cfg = SimCfg {
        dt: 1.0,
        horizon: Horizon {
            max_time: 2.0,
            max_steps: None,
        },
        ..SimCfg::default()
    };
    let mut sim = Simulation::new(fence, mobile, Box::new(ScriptedMotion::new(frames)), cfg).unwrap();
    assert_eq!(sim.num_sensors(), 8);
    let out = sim.run();
    assert!(out.is_completed());
    let s = out.summary();
    assert_eq!(s.steps, 2);
    assert_eq!(s.end_time, 2.0);
    assert_eq!(s.labels.len(), 5);
    assert_eq!(s.survivors.len(), 4);
    assert!(s.evasion_exists);
    let fresh = s.survivors.iter().find(|v| v.label == CycleLabel(4)).unwrap();
    assert_eq!(fresh.created_at, 2.0);
    assert_eq!(fresh.duration, 0.0);
    assert!(fresh.intruder && !fresh.initial);
    assert_eq!(s.longest_intruder_survival(), Some(2.0));
}

#[test]
fn covered_start_stops_when_cleared() {
    let fence = equilateral(1.7);
    let mobile = vec![Sensor::new(10.0, 10.0, R)];
    let cfg = SimCfg {
        stop_when_cleared: true,
        ..SimCfg::default()
    };
    let mut sim =
        Simulation::new(fence, mobile, Box::new(ScriptedMotion::default()), cfg).unwrap();
    assert!(sim.is_finished());
    let out = sim.run();
    let s = out.summary();
    assert_eq!(s.steps, 0);
    assert!(!s.evasion_exists);
    assert!(s.survivors.is_empty());
}

#[test]
fn failure_carries_step_and_partial_summary() {
    let start = rhombus(10.0, 0.37, HALF_WIDTH, 1.02);
    // Both diagonals close near t = 1/3, closer than any depth-3 range.
    let frames = vec![rhombus(10.0, 0.37, HALF_WIDTH, 0.96)
        .into_iter()
        .chain(rhombus(20.0, 0.0, HALF_WIDTH, 0.96))
        .map(|s| s.pos)
        .collect::<Vec<_>>()];
    let fence = rhombus(0.0, 0.0, HALF_WIDTH, 1.5);
    let mut mobile = start;
    mobile.extend(rhombus(20.0, 0.0, HALF_WIDTH, 1.02));
    let cfg = SimCfg {
        dt: 1.0,
        step: StepCfg { max_depth: 3 },
        ..SimCfg::default()
    };
    let mut sim = Simulation::new(fence, mobile, Box::new(ScriptedMotion::new(frames)), cfg).unwrap();
    match sim.run() {
        RunOutcome::Failed(f) => {
            assert_eq!(f.step, 1);
            assert_eq!(f.time, 0.0);
            assert_eq!(f.kind(), crate::error::ErrorKind::UnresolvedTransition);
            assert_eq!(f.partial.steps, 0);
            assert!(f.to_string().contains("step 1"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[test]
fn brownian_runs_keep_label_history_monotone() {
    let d = unit_square();
    for index in 0..4 {
        let tok = RunToken::new(2024, index);
        let cfg = SimCfg {
            dt: 0.005,
            horizon: Horizon {
                max_time: 1.0,
                max_steps: Some(40),
            },
            ..SimCfg::default()
        };
        let motion = BrownianMotion::new(d, 0.2, tok.rng(1));
        let mut sim =
            Simulation::in_domain(&d, 12, 0.15, Box::new(motion), cfg, &mut tok.rng(0)).unwrap();
        let mut seen: Vec<LabelRecord> = Vec::new();
        let out = sim.run_while(|tr| {
            let now: Vec<LabelRecord> = tr.state().records().cloned().collect();
            assert!(now.len() >= seen.len());
            for (old, new) in seen.iter().zip(now.iter()) {
                assert_eq!(old.label, new.label);
                assert_eq!(old.created_at, new.created_at);
                if !old.is_alive() {
                    assert_eq!(old, new);
                }
            }
            for label in tr.state().assignment().values() {
                assert!(tr.state().is_alive(*label));
            }
            seen = now;
            true
        });
        // Unresolved steps are a legitimate outcome; the history up to them must hold.
        let s = out.summary();
        assert!(s.steps <= 40);
        assert!(s.labels.windows(2).all(|w| w[0].label < w[1].label));
        assert_eq!(s.labels[0].label, CycleLabel::FENCE);
    }
}

#[test]
fn same_token_same_outcome() {
    let d = unit_square();
    let run = || {
        let tok = RunToken::new(99, 5);
        let cfg = SimCfg {
            dt: 0.005,
            horizon: Horizon {
                max_time: 1.0,
                max_steps: Some(20),
            },
            ..SimCfg::default()
        };
        let motion = BilliardMotion::new(d, 0.5, tok.rng(1));
        let mut sim =
            Simulation::in_domain(&d, 10, 0.15, Box::new(motion), cfg, &mut tok.rng(0)).unwrap();
        sim.run()
    };
    assert_eq!(run(), run());
}

#[test]
fn trajectories_can_move_across_threads() {
    fn is_send<T: Send>() {}
    is_send::<Simulation>();
    is_send::<Tracker>();
    is_send::<RunOutcome>();
}

#[test]
fn default_config_resolves_ordinary_brownian_runs() {
    // Same set-up as `cli run` with its defaults.
    let d = unit_square();
    for index in 0..3 {
        let tok = RunToken::new(0, index);
        let motion = BrownianMotion::new(d, 0.1, tok.rng(1));
        let mut sim = Simulation::in_domain(
            &d,
            20,
            0.15,
            Box::new(motion),
            SimCfg::default(),
            &mut tok.rng(0),
        )
        .unwrap();
        let out = sim.run();
        assert!(out.is_completed(), "run {index}: {:?}", out.failure());
        assert_eq!(out.summary().steps, 100);
    }
}
