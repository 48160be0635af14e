use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use evasion::prelude::*;
use polars::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Evasion-path experiment runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run seeded trajectories on the unit square; write runs.csv, summary.json and provenance
    Run(RunArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Motion {
    Brownian,
    Billiard,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Mobile sensors inside the domain (the fence comes on top)
    #[arg(long, default_value_t = 20)]
    n_sensors: usize,
    #[arg(long, default_value_t = 0.15)]
    radius: f64,
    /// Fence spacing; defaults to twice the radius
    #[arg(long)]
    spacing: Option<f64>,
    #[arg(long, value_enum, default_value_t = Motion::Brownian)]
    motion: Motion,
    /// Brownian step scale per unit time
    #[arg(long, default_value_t = 0.1)]
    sigma: f64,
    /// Billiard speed
    #[arg(long, default_value_t = 0.5)]
    speed: f64,
    /// JSON `SimCfg`; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    dt: Option<f64>,
    #[arg(long)]
    max_time: Option<f64>,
    #[arg(long)]
    max_depth: Option<u32>,
    #[arg(long)]
    stop_when_cleared: bool,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 1)]
    runs: u64,
    /// Output directory
    #[arg(long, default_value = "data/runs")]
    out: PathBuf,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run(args) => run(&args),
        Action::Report => report(),
    }
}

fn sim_cfg(args: &RunArgs) -> Result<SimCfg> {
    let mut cfg = match &args.config {
        Some(path) => {
            let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimCfg::default(),
    };
    if let Some(dt) = args.dt {
        cfg.dt = dt;
    }
    if let Some(t) = args.max_time {
        cfg.horizon.max_time = t;
    }
    if let Some(d) = args.max_depth {
        cfg.step.max_depth = d;
    }
    cfg.stop_when_cleared |= args.stop_when_cleared;
    Ok(cfg)
}

fn run(args: &RunArgs) -> Result<()> {
    let cfg = sim_cfg(args)?;
    let spacing = args.spacing.unwrap_or(2.0 * args.radius);
    let domain = RectangularDomain::unit_square(spacing)?;
    tracing::info!(
        n_sensors = args.n_sensors,
        runs = args.runs,
        seed = args.seed,
        motion = ?args.motion,
        out = %args.out.display(),
        "run"
    );

    let mut outcomes = Vec::with_capacity(args.runs as usize);
    for index in 0..args.runs {
        let tok = RunToken::new(args.seed, index);
        let motion: Box<dyn MotionModel> = match args.motion {
            Motion::Brownian => Box::new(BrownianMotion::new(domain, args.sigma, tok.rng(1))),
            Motion::Billiard => Box::new(BilliardMotion::new(domain, args.speed, tok.rng(1))),
        };
        let mut sim = Simulation::in_domain(
            &domain,
            args.n_sensors,
            args.radius,
            motion,
            cfg,
            &mut tok.rng(0),
        )
        .with_context(|| format!("initial network of run {index}"))?;
        let outcome = sim.run();
        if let Some(f) = outcome.failure() {
            tracing::warn!(run = index, error = %f, "trajectory stopped early");
        }
        outcomes.push((tok, outcome));
    }

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output dir {}", args.out.display()))?;
    let csv_path = args.out.join("runs.csv");
    let mut df = outcome_table(&outcomes)?;
    let mut file =
        File::create(&csv_path).with_context(|| format!("creating {}", csv_path.display()))?;
    CsvWriter::new(&mut file).finish(&mut df)?;

    let json_path = args.out.join("summary.json");
    let per_run: Vec<_> = outcomes
        .iter()
        .map(|(tok, outcome)| serde_json::json!({ "token": tok, "outcome": outcome }))
        .collect();
    fs::write(&json_path, serde_json::to_vec_pretty(&per_run)?)
        .with_context(|| format!("writing {}", json_path.display()))?;

    let params = serde_json::json!({
        "n_sensors": args.n_sensors,
        "radius": args.radius,
        "spacing": spacing,
        "motion": args.motion,
        "sigma": args.sigma,
        "speed": args.speed,
        "seed": args.seed,
        "runs": args.runs,
        "config": args.config,
        "sim": cfg,
    });
    let prov = provenance::write_sidecar(
        &csv_path,
        provenance::Payload::new(params).with_sibling(&json_path),
    )?;
    let completed = outcomes.iter().filter(|(_, o)| o.is_completed()).count();
    tracing::info!(
        completed,
        failed = outcomes.len() - completed,
        provenance = %prov.display(),
        "done"
    );
    Ok(())
}

/// One row per trajectory.
fn outcome_table(outcomes: &[(RunToken, RunOutcome)]) -> PolarsResult<DataFrame> {
    let summaries: Vec<&Summary> = outcomes.iter().map(|(_, o)| o.summary()).collect();
    let run: Vec<u64> = outcomes.iter().map(|(tok, _)| tok.index).collect();
    let status: Vec<String> = outcomes
        .iter()
        .map(|(_, o)| match o.failure() {
            None => "completed".to_string(),
            Some(f) => f.kind().to_string(),
        })
        .collect();
    let end_time: Vec<f64> = summaries.iter().map(|s| s.end_time).collect();
    let steps: Vec<u64> = summaries.iter().map(|s| s.steps as u64).collect();
    let bisections: Vec<u64> = summaries.iter().map(|s| s.bisections as u64).collect();
    let labels: Vec<u64> = summaries.iter().map(|s| s.labels.len() as u64).collect();
    let survivors: Vec<u64> = summaries.iter().map(|s| s.survivors.len() as u64).collect();
    let evasion: Vec<bool> = summaries.iter().map(|s| s.evasion_exists).collect();
    let longest: Vec<Option<f64>> = summaries
        .iter()
        .map(|s| s.longest_intruder_survival())
        .collect();
    df!(
        "run" => run,
        "status" => status,
        "end_time" => end_time,
        "steps" => steps,
        "bisections" => bisections,
        "labels" => labels,
        "survivors" => survivors,
        "evasion" => evasion,
        "longest_survival" => longest
    )
}

fn report() -> Result<()> {
    let mut obj = provenance::header();
    obj["params"] = serde_json::json!({});
    obj["outputs"] = serde_json::json!([]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
