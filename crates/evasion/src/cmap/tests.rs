use super::*;
use crate::complex::{build_complex, CoverageCfg};
use crate::error::ErrorKind;
use crate::geom2::{GeomCfg, Sensor};
use nalgebra::vector;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn map_of(sensors: &[Sensor]) -> CMap {
    let c = build_complex(sensors, &GeomCfg::default(), &CoverageCfg::default()).unwrap();
    CMap::new(&c)
}

#[test]
fn triangle_has_inner_and_outer_cycle() {
    let sensors = vec![
        Sensor::new(0.0, 0.0, 1.0),
        Sensor::new(1.8, 0.0, 1.0),
        Sensor::new(0.9, 1.5, 1.0),
    ];
    let m = map_of(&sensors);
    assert_eq!(m.num_darts(), 6);
    let cycles = m.boundary_cycles().unwrap();
    assert_eq!(cycles.len(), 2);
    let inner = cycles.iter().find(|c| !c.is_outer()).unwrap();
    let outer = cycles.iter().find(|c| c.is_outer()).unwrap();
    assert_eq!(inner.orientation, Orientation::Ccw);
    assert_eq!(outer.orientation, Orientation::Cw);
    assert!(inner.contains_dart(0, 1) && inner.contains_dart(1, 2) && inner.contains_dart(2, 0));
    assert!(outer.contains_dart(1, 0));
    assert_eq!(inner.min_vertex(), Some(0));
}

#[test]
fn successor_turns_clockwise_at_destination() {
    let sensors = vec![
        Sensor::new(0.0, 0.0, 1.0),
        Sensor::new(1.0, 0.0, 1.0),
        Sensor::new(0.0, 1.0, 1.0),
    ];
    let m = map_of(&sensors);
    let ab = m.find(0, 1).unwrap();
    let nxt = m.dart(m.next(ab));
    assert_eq!((nxt.origin, nxt.dest), (1, 2));
    assert_eq!(ab.twin().twin(), ab);
    assert_eq!(m.dart(ab.twin()), Dart { origin: 1, dest: 0 });
}

#[test]
fn square_with_diagonal_has_two_faces() {
    let sensors = vec![
        Sensor::new(0.0, 0.0, 1.0),
        Sensor::new(1.2, 0.0, 1.0),
        Sensor::new(1.2, 1.1, 1.0),
        Sensor::new(0.0, 1.1, 1.0),
    ];
    let m = map_of(&sensors);
    let cycles = m.boundary_cycles().unwrap();
    assert_eq!(m.num_darts(), 10);
    let faces: Vec<_> = cycles.iter().filter(|c| !c.is_outer()).collect();
    assert_eq!(faces.len(), 2);
    assert!(faces.iter().all(|c| c.len() == 3));
    let outer: Vec<_> = cycles.iter().filter(|c| c.is_outer()).collect();
    assert_eq!(outer.len(), 1);
    assert_eq!(outer[0].len(), 4);
}

#[test]
fn path_is_a_single_degenerate_walk() {
    let sensors = vec![
        Sensor::new(0.0, 0.0, 1.0),
        Sensor::new(1.5, 0.0, 1.0),
        Sensor::new(3.0, 0.2, 1.0),
    ];
    let m = map_of(&sensors);
    let cycles = m.boundary_cycles().unwrap();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].len(), 4);
    assert_eq!(cycles[0].orientation, Orientation::Degenerate);
}

#[test]
fn broken_successor_table_is_malformed() {
    let darts = vec![Dart { origin: 0, dest: 1 }, Dart { origin: 1, dest: 0 }];
    let points = vec![vector![0.0, 0.0], vector![1.0, 0.0]];
    let m = CMap::from_parts(darts, vec![DartId(1), DartId(1)], points);
    let err = m.boundary_cycles().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedBoundary);
}

#[test]
fn cycle_key_ignores_walk_start() {
    let a = CycleKey::from_darts([
        Dart { origin: 2, dest: 0 },
        Dart { origin: 0, dest: 1 },
        Dart { origin: 1, dest: 2 },
    ]);
    let b = CycleKey::from_darts([
        Dart { origin: 0, dest: 1 },
        Dart { origin: 1, dest: 2 },
        Dart { origin: 2, dest: 0 },
    ]);
    assert_eq!(a, b);
    assert!(a.contains(2, 0));
    assert!(!a.contains(0, 2));
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 48, .. ProptestConfig::default() })]

    #[test]
    fn every_dart_in_exactly_one_cycle(seed in any::<u64>(), n in 3usize..50, r in 0.05f64..0.35) {
        let mut rng = StdRng::seed_from_u64(seed);
        let sensors: Vec<Sensor> = (0..n)
            .map(|_| Sensor::new(rng.gen::<f64>(), rng.gen::<f64>(), r))
            .collect();
        let Ok(c) = build_complex(&sensors, &GeomCfg::default(), &CoverageCfg::default()) else {
            return Ok(());
        };
        let m = CMap::new(&c);
        let cycles = m.boundary_cycles().unwrap();
        let mut seen = vec![0usize; m.num_darts()];
        for cyc in &cycles {
            for d in &cyc.darts {
                seen[d.0] += 1;
            }
            for w in cyc.darts.windows(2) {
                prop_assert_eq!(m.dart(w[0]).dest, m.dart(w[1]).origin);
            }
        }
        prop_assert!(seen.iter().all(|&k| k == 1));
        prop_assert_eq!(m.num_darts(), 2 * c.edges().len());
        // Every covered triangle shows up as a ccw cycle of length three.
        for t in c.triangles() {
            let v = t.vertices();
            prop_assert!(cycles.iter().any(|cyc| cyc.len() == 3
                && cyc.orientation == Orientation::Ccw
                && v.iter().all(|x| cyc.vertices.contains(x))));
        }
    }
}
