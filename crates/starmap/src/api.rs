//! Curated surface for downstream renderers and simulation drivers.
//!
//! Important
//! - Prefer these re-exports over reaching into submodules; the submodule
//!   layout (`disk::bins`, `disk::scan`, `disk::budget`) may move.

// Sampling
pub use crate::gauss::{BoxMuller, GaussianSampler};
// Generation
pub use crate::disk::{
    generate_large, generate_small, generate_unconstrained, DiskGenerator, DiskParams,
    GeneratorError, Strategy,
};
// Binning helpers (used by callers that want to reproduce the large-strategy buckets)
pub use crate::disk::bins::{bin_index, layer_count, RadialBins};
// Diagnostics
pub use crate::stats::{adjacent_bin_violations, min_pair_distance, DiskStats};

use crate::Point3;

/// Number of stars in `points` closer to the origin than `radius`.
///
/// Handy as a post-condition check: a disk generated with
/// `min_center_distance = r` must report zero here.
pub fn count_inside(points: &[Point3], radius: f32) -> usize {
    points.iter().filter(|p| p.norm() < radius).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_inside_strict_radius() {
        let pts = vec![
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 4.0),
        ];
        assert_eq!(count_inside(&pts, 1.0), 1);
        assert_eq!(count_inside(&pts, 5.0), 2);
        assert_eq!(count_inside(&pts, 0.0), 0);
    }

    #[test]
    fn seeded_small_disk_respects_center_hole() {
        let params = DiskParams {
            count: 200,
            min_distance: 0.2,
            min_center_distance: 1.5,
            size: 4.0,
            thickness: 0.3,
            max_attempts: None,
        };
        let pts = DiskGenerator::seeded(params, 99).unwrap().small().unwrap();
        assert_eq!(pts.len(), 200);
        assert_eq!(count_inside(&pts, 1.5), 0);
    }
}
