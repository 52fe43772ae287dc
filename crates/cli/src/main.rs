mod provenance;
mod samples;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use territory::api::{
    claim_and_commit, detect_polygon, draw_walk, ClaimCfg, ClaimError, ClaimOutcome, ClaimSession,
    ClaimState, Claimant, CommitError, GeoPoint, InMemoryStore, SampleDisposition, WalkCfg,
    WalkReplay, WalkShape,
};
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::provenance::{ensure_parent, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "territory")]
#[command(about = "Detect and claim territories from recorded walks")]
struct Cmd {
    /// JSON file with claim thresholds; missing fields keep their defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Run detection on a recorded walk and print the outcome as JSON
    Detect {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replay a walk through a claiming session and carve it into a territory set
    Claim {
        #[arg(long)]
        input: PathBuf,
        /// Territory set (InMemoryStore JSON); created when missing
        #[arg(long)]
        territories: PathBuf,
        #[arg(long)]
        owner_id: String,
        #[arg(long)]
        owner_name: String,
        /// Where to write the updated set; defaults to `--territories`
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write a synthetic walk as CSV
    Simulate {
        #[arg(long, value_enum, default_value_t = Shape::Square)]
        shape: Shape,
        /// Side length (square) or radius (circle, figure-eight) in metres
        #[arg(long, default_value_t = 50.0)]
        size: f64,
        #[arg(long, default_value_t = 5.0)]
        spacing: f64,
        #[arg(long, default_value_t = 0.0)]
        jitter: f64,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 47.3769)]
        lat: f64,
        #[arg(long, default_value_t = 8.5417)]
        lon: f64,
        /// Unix seconds of the first sample
        #[arg(long, default_value_t = 1_700_000_000)]
        start: i64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shape {
    Square,
    Circle,
    FigureEight,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let cfg = load_cfg(cmd.config.as_deref())?;
    match cmd.action {
        Action::Detect { input, out } => detect(&input, out.as_deref(), &cfg),
        Action::Claim {
            input,
            territories,
            owner_id,
            owner_name,
            out,
        } => claim(
            &input,
            &territories,
            Claimant::new(owner_id, owner_name),
            out.as_deref(),
            &cfg,
        ),
        Action::Simulate {
            shape,
            size,
            spacing,
            jitter,
            seed,
            lat,
            lon,
            start,
            out,
        } => {
            let shape = match shape {
                Shape::Square => WalkShape::Square { side_m: size },
                Shape::Circle => WalkShape::Circle { radius_m: size },
                Shape::FigureEight => WalkShape::FigureEight { radius_m: size },
            };
            let walk = WalkCfg {
                shape,
                spacing_m: spacing,
                jitter_m: jitter,
                ..WalkCfg::default()
            };
            simulate(walk, GeoPoint::new(lat, lon), start, seed, &out)
        }
        Action::Report => report(&cfg),
    }
}

fn load_cfg(path: Option<&Path>) -> Result<ClaimCfg> {
    let Some(path) = path else {
        return Ok(ClaimCfg::default());
    };
    let bytes = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    let cfg = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::info!(config = %path.display(), "claim config loaded");
    Ok(cfg)
}

fn error_json(e: &ClaimError) -> Value {
    json!({ "kind": e.kind(), "message": e.to_string() })
}

fn detect(input: &Path, out: Option<&Path>, cfg: &ClaimCfg) -> Result<()> {
    let samples = samples::read_samples(input)?;
    tracing::info!(input = %input.display(), samples = samples.len(), "detect");
    let doc = match detect_polygon(&samples, cfg) {
        ClaimOutcome::Valid { polygon, area_m2 } => json!({
            "valid": true,
            "area_m2": area_m2,
            "vertices": polygon.vertex_count(),
            "polygon": polygon,
        }),
        ClaimOutcome::Invalid(e) => json!({ "valid": false, "error": error_json(&e) }),
    };
    println!("{}", serde_json::to_string_pretty(&doc)?);

    if let Some(out) = out {
        write_json(out, &doc)?;
        write_sidecar(
            out,
            Payload::new("detect", json!({ "input": input, "config": cfg })),
        )?;
    }
    Ok(())
}

fn load_store(path: &Path) -> Result<InMemoryStore> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no territory set yet, starting empty");
        return Ok(InMemoryStore::default());
    }
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

fn claim(
    input: &Path,
    territories: &Path,
    claimant: Claimant,
    out: Option<&Path>,
    cfg: &ClaimCfg,
) -> Result<()> {
    let samples = samples::read_samples(input)?;
    let mut store = load_store(territories)?;
    tracing::info!(
        input = %input.display(),
        samples = samples.len(),
        existing = store.territories.len(),
        owner_id = %claimant.owner_id,
        "claim"
    );

    let params = json!({ "input": input, "claimant": claimant, "config": cfg });
    let mut session = ClaimSession::new(claimant, *cfg);
    session.start();
    let mut filtered = 0usize;
    for sample in samples {
        if session.push_sample(sample) == SampleDisposition::Filtered {
            filtered += 1;
        }
    }
    if matches!(session.state(), ClaimState::Tracking) {
        // walk ended without returning to the start
        if let Err(e) = session.force_claim() {
            tracing::info!(reason = %e, "claim not attempted");
        }
    }

    let doc = match session.state() {
        ClaimState::Accepted(territory) => {
            match claim_and_commit(&mut store, territory.clone(), cfg) {
                Ok(result) => {
                    let dest = out.unwrap_or(territories);
                    write_json(dest, &store)?;
                    write_sidecar(dest, Payload::new("claim", params))?;
                    let updated: Vec<&str> = result
                        .updated_territories
                        .iter()
                        .map(|t| t.id.as_str())
                        .collect();
                    json!({
                        "accepted": true,
                        "territory": result.new_territory,
                        "area_m2": result.new_territory.area(),
                        "updated_ids": updated,
                        "deleted_ids": result.deleted_territory_ids,
                        "filtered_samples": filtered,
                    })
                }
                Err(CommitError::Rejected(e)) => json!({
                    "accepted": false,
                    "error": error_json(&e),
                    "filtered_samples": filtered,
                }),
                Err(CommitError::Store(never)) => match never {},
            }
        }
        ClaimState::Rejected(e) => json!({
            "accepted": false,
            "error": error_json(e),
            "filtered_samples": filtered,
        }),
        _ => json!({
            "accepted": false,
            "status": session.status_message(),
            "progress": session.progress(),
            "filtered_samples": filtered,
        }),
    };
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn simulate(walk: WalkCfg, origin: GeoPoint, start: i64, seed: u64, out: &Path) -> Result<()> {
    let start = DateTime::from_timestamp(start, 0).context("start time out of range")?;
    let samples = draw_walk(walk, origin, start, WalkReplay { seed, index: 0 });
    tracing::info!(samples = samples.len(), seed, "simulate");
    samples::write_csv(out, &samples)?;
    write_sidecar(
        out,
        Payload::new(
            "simulate",
            json!({ "walk": walk, "origin": origin, "start": start, "seed": seed }),
        ),
    )?;
    Ok(())
}

fn report(cfg: &ClaimCfg) -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "territory_version": territory::VERSION,
        "config": cfg,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}
