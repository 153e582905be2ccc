//! Print a quick summary of a few seeded disks, one per strategy.
//!
//! Usage:
//!   cargo run -p starmap --example disk_preview -- [count]
//!
//! Prints count, radial extent, per-axis spread, and closest pair.

use starmap::prelude::*;

fn main() {
    let count = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(2_000);
    let params = DiskParams {
        count,
        ..DiskParams::default()
    };
    for strategy in [Strategy::Unconstrained, Strategy::Small, Strategy::Large] {
        let mut gen = DiskGenerator::seeded(params.clone(), 2025).unwrap();
        let pts = gen.generate(strategy).unwrap();
        let Some(stats) = DiskStats::of(&pts) else {
            println!("{strategy}: empty");
            continue;
        };
        let stats = stats.with_pair_scan(&pts);
        println!(
            "{strategy}: n={} r=[{:.2}, {:.2}] std=({:.2}, {:.2}, {:.2}) closest={:?}",
            stats.count,
            stats.min_norm,
            stats.max_norm,
            stats.std_dev.x,
            stats.std_dev.y,
            stats.std_dev.z,
            stats.min_pair_distance
        );
    }
}
