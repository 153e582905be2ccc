use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use starmap::stats::DiskStats;
use starmap::{DiskGenerator, DiskParams, GaussianSampler, Strategy};
use std::path::PathBuf;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod summary;

use summary::{current_git_rev, write_summary, Summary};

/// Above this many stars the closest-pair scan is skipped unless forced.
const PAIR_SCAN_DEFAULT_MAX: u32 = 20_000;

#[derive(Parser)]
#[command(name = "starmap")]
#[command(about = "Generate Gaussian star disks and summarize their shape")]
struct Cmd {
    /// Log library debug events (rejection counts)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate one disk and print a JSON summary to stdout
    Generate {
        /// unconstrained | small | large
        #[arg(long, default_value = "large")]
        strategy: Strategy,
        #[arg(long, default_value_t = 1000)]
        count: u32,
        #[arg(long, default_value_t = 0.5)]
        min_distance: f32,
        #[arg(long, default_value_t = 1.0)]
        min_center_distance: f32,
        /// Standard deviation of the x/y distribution
        #[arg(long, default_value_t = 20.0)]
        size: f32,
        /// z compression factor
        #[arg(long, default_value_t = 0.25)]
        thickness: f32,
        /// Fixed seed; omitted means OS entropy
        #[arg(long)]
        seed: Option<u64>,
        /// Per-star candidate cap; omitted means no cap
        #[arg(long)]
        max_attempts: Option<u64>,
        /// Force the O(n²) closest-pair scan for large disks
        #[arg(long)]
        pair_scan: bool,
        /// Also write the summary JSON to this path
        #[arg(long)]
        summary_out: Option<PathBuf>,
    },
    /// Print version and code revision as JSON
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match cmd.action {
        Action::Generate {
            strategy,
            count,
            min_distance,
            min_center_distance,
            size,
            thickness,
            seed,
            max_attempts,
            pair_scan,
            summary_out,
        } => {
            let params = DiskParams {
                count,
                min_distance,
                min_center_distance,
                size,
                thickness,
                max_attempts,
            };
            generate(params, strategy, seed, pair_scan, summary_out)
        }
        Action::Report => report(),
    }
}

fn generate(
    params: DiskParams,
    strategy: Strategy,
    seed: Option<u64>,
    pair_scan: bool,
    summary_out: Option<PathBuf>,
) -> Result<()> {
    tracing::info!(
        %strategy,
        count = params.count,
        min_distance = params.min_distance,
        min_center_distance = params.min_center_distance,
        size = params.size,
        thickness = params.thickness,
        seed = ?seed,
        max_attempts = ?params.max_attempts,
        "generate"
    );
    let sampler = match seed {
        Some(s) => GaussianSampler::seeded(s),
        None => GaussianSampler::from_entropy(),
    };
    let mut gen = DiskGenerator::new(params.clone(), sampler)?;
    let started = Instant::now();
    let points = gen
        .generate(strategy)
        .with_context(|| format!("{strategy} generation failed"))?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1e3;
    tracing::info!(stars = points.len(), elapsed_ms, "generated");

    let scan_pairs = pair_scan || params.count <= PAIR_SCAN_DEFAULT_MAX;
    let stats = DiskStats::of(&points).map(|s| {
        if scan_pairs {
            s.with_pair_scan(&points)
        } else {
            s
        }
    });
    let summary = Summary::new(strategy, seed, params, stats, elapsed_ms);
    if let Some(path) = summary_out {
        let written = write_summary(&path, &summary)?;
        tracing::info!(path = %written.display(), "summary written");
    }
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "version": starmap::VERSION,
        "code_rev": current_git_rev(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
