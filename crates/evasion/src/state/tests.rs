use super::*;
use crate::cmap::{CycleKey, Dart};
use crate::complex::CoverageCfg;
use crate::error::ErrorKind;
use crate::geom2::GeomCfg;
use crate::test_fixtures::{equilateral, rhombus, two_rhombi, HALF_WIDTH};
use crate::transition::{Changeset, CycleEvent, SimplexMove};

fn topo(sensors: &[crate::geom2::Sensor], fence_len: usize) -> Topology {
    Topology::build(
        sensors,
        Fence::new(fence_len).unwrap(),
        &GeomCfg::default(),
        &CoverageCfg::default(),
    )
    .unwrap()
}

fn key(pairs: &[(usize, usize)]) -> CycleKey {
    CycleKey::from_darts(pairs.iter().map(|&(origin, dest)| Dart { origin, dest }))
}

#[test]
fn open_triangle_has_fence_and_one_hole() {
    let t = topo(&equilateral(1.9), 3);
    assert!(t.fence_cycle().contains_dart(1, 0));
    assert!(t.fence_cycle().is_outer());
    assert_eq!(t.num_holes(), 1);
    let hole = t.holes().next().unwrap();
    assert!(!hole.is_outer());
    assert!(!t.is_fence(hole));
    assert_eq!(t.tracked().count(), 2);
}

#[test]
fn covered_triangle_has_no_hole() {
    let t = topo(&equilateral(1.7), 3);
    assert_eq!(t.num_holes(), 0);
    assert_eq!(t.cycles().len(), 2);
}

#[test]
fn fence_must_be_ccw_and_connected() {
    let geom = GeomCfg::default();
    let cov = CoverageCfg::default();
    let mut cw = equilateral(1.9);
    cw.swap(1, 2);
    let e = Topology::build(&cw, Fence::new(3).unwrap(), &geom, &cov).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::InvalidConfiguration);

    let apart = equilateral(2.1);
    let e = Topology::build(&apart, Fence::new(3).unwrap(), &geom, &cov).unwrap_err();
    assert!(e.to_string().contains("fence edge"));

    assert!(Fence::new(2).is_err());
}

#[test]
fn initial_labels_follow_key_order() {
    let t = topo(&two_rhombi(1.02, 1.06), 4);
    let s = TopologicalState::initialize(&t, 0.0);
    let a_inner = key(&[(0, 1), (1, 2), (2, 3), (3, 0)]);
    let b_inner = key(&[(4, 5), (5, 6), (6, 7), (7, 4)]);
    let b_outer = key(&[(4, 7), (5, 4), (6, 5), (7, 6)]);
    assert_eq!(s.label_of(&t.fence_cycle().key), Some(CycleLabel::FENCE));
    assert_eq!(s.label_of(&a_inner), Some(CycleLabel(1)));
    assert_eq!(s.label_of(&b_inner), Some(CycleLabel(2)));
    assert_eq!(s.label_of(&b_outer), Some(CycleLabel(3)));
    assert_eq!(s.next_label(), CycleLabel(4));
    assert!(s.records().all(|r| r.initial && r.intruder && r.is_alive()));
    assert!(s.has_intruder());
}

#[test]
fn death_retires_and_records_survival() {
    let t = topo(&equilateral(1.9), 3);
    let mut s = TopologicalState::initialize(&t, 0.0);
    let hole = t.holes().next().unwrap().key.clone();
    let cs = Changeset {
        time: 2.5,
        simplex_move: SimplexMove::Trivial,
        cycle_event: CycleEvent::Death {
            label: CycleLabel(1),
        },
        retired_keys: vec![hole],
        assigned: vec![],
    };
    s.apply(&cs).unwrap();
    assert!(!s.is_alive(CycleLabel(1)));
    assert_eq!(s.survival(CycleLabel(1), 10.0), Some(2.5));
    assert_eq!(s.record(CycleLabel(1)).unwrap().cause, Some(RetireCause::Death));
    assert!(!s.has_intruder());
    assert_eq!(s.version(), 1);
    assert_eq!(s.time(), 2.5);
}

#[test]
fn merge_into_fence_is_fence_absorbed() {
    let t = topo(&equilateral(1.9), 3);
    let mut s = TopologicalState::initialize(&t, 0.0);
    let fence = t.fence_cycle().key.clone();
    let hole = t.holes().next().unwrap().key.clone();
    let merged = key(&[(1, 0), (2, 1)]);
    let cs = Changeset {
        time: 1.0,
        simplex_move: SimplexMove::EdgeRemoved(crate::complex::Simplex::edge(0, 2)),
        cycle_event: CycleEvent::Merge {
            from: (CycleLabel::FENCE, CycleLabel(1)),
            into: CycleLabel::FENCE,
        },
        retired_keys: vec![fence, hole],
        assigned: vec![(merged.clone(), CycleLabel::FENCE)],
    };
    s.apply(&cs).unwrap();
    assert_eq!(s.label_of(&merged), Some(CycleLabel::FENCE));
    let r = s.record(CycleLabel(1)).unwrap();
    assert_eq!(r.cause, Some(RetireCause::FenceAbsorbed));
    assert_eq!(r.retired_at, Some(1.0));
    assert_eq!(s.alive().count(), 1);
}

#[test]
fn inconsistent_changeset_leaves_state_untouched() {
    let t = topo(&rhombus(0.0, 0.0, HALF_WIDTH, 1.02), 4);
    let mut s = TopologicalState::initialize(&t, 0.0);
    let before = s.clone();

    let unknown_key = Changeset {
        time: 1.0,
        simplex_move: SimplexMove::Trivial,
        cycle_event: CycleEvent::Death {
            label: CycleLabel(1),
        },
        retired_keys: vec![key(&[(7, 8), (8, 9), (9, 7)])],
        assigned: vec![],
    };
    assert!(s.apply(&unknown_key).is_err());

    let stale_birth = Changeset {
        time: 1.0,
        simplex_move: SimplexMove::Trivial,
        cycle_event: CycleEvent::Birth {
            label: CycleLabel(1),
        },
        retired_keys: vec![],
        assigned: vec![(key(&[(0, 2), (2, 3), (3, 0)]), CycleLabel(1))],
    };
    assert!(s.apply(&stale_birth).is_err());

    let fence_death = Changeset {
        time: 1.0,
        simplex_move: SimplexMove::Trivial,
        cycle_event: CycleEvent::Death {
            label: CycleLabel::FENCE,
        },
        retired_keys: vec![t.fence_cycle().key.clone()],
        assigned: vec![],
    };
    assert!(s.apply(&fence_death).is_err());

    let backwards = Changeset {
        time: -1.0,
        simplex_move: SimplexMove::Trivial,
        cycle_event: CycleEvent::Unchanged,
        retired_keys: vec![],
        assigned: vec![],
    };
    assert!(s.apply(&backwards).is_err());
    assert_eq!(s, before);
}
