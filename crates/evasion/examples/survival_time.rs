//! Hole survival times on the unit square under Brownian motion.
//!
//! Purpose
//! - Give a quick, reproducible feel for how long holes survive as the number
//!   of mobile sensors grows, without going through the CLI.
//! - Print one line per (n, run) with the outcome and the longest intruder
//!   survival; unresolved runs are reported, not hidden.
//!
//! References
//! - Code: crates/evasion/src/sim/driver.rs::Simulation::run
//! - Code: crates/evasion/src/sim/report.rs::Summary

use std::time::Instant;

use evasion::prelude::*;

fn main() {
    let domain = RectangularDomain::unit_square(0.3).expect("unit square");
    let cfg = SimCfg {
        dt: 0.01,
        horizon: Horizon {
            max_time: 1.0,
            max_steps: None,
        },
        stop_when_cleared: true,
        ..SimCfg::default()
    };

    println!("n,run,status,end_time,steps,bisections,survivors,longest");
    for n in [10usize, 20, 40] {
        for index in 0..3u64 {
            let tok = RunToken::new(2024, index);
            let motion = BrownianMotion::new(domain, 0.1, tok.rng(1));
            let started = Instant::now();
            let mut sim =
                Simulation::in_domain(&domain, n, 0.15, Box::new(motion), cfg, &mut tok.rng(0))
                    .expect("initial network");
            let outcome = sim.run();
            let s = outcome.summary();
            let status = match outcome.failure() {
                None => "completed".to_string(),
                Some(f) => f.kind().to_string(),
            };
            println!(
                "{n},{index},{status},{:.3},{},{},{},{}",
                s.end_time,
                s.steps,
                s.bisections,
                s.survivors.len(),
                s.longest_intruder_survival()
                    .map_or("-".to_string(), |d| format!("{d:.3}")),
            );
            eprintln!("  n={n} run={index} took {:.1} ms", started.elapsed().as_secs_f64() * 1e3);
        }
    }
}
