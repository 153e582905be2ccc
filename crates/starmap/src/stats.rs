//! Post-hoc diagnostics for generated disks.
//!
//! Used by tests to check the separation guarantees and by the CLI summary.
//! Everything here is O(n) except the pair scans, which are O(n²) (rayon over
//! the outer index).

use nalgebra::Vector3;
use rayon::prelude::*;
use serde::Serialize;

use crate::disk::bins::{bin_index, layer_count};
use crate::Point3;

/// Summary of a point set.
#[derive(Clone, Debug, Serialize)]
pub struct DiskStats {
    pub count: usize,
    pub min_norm: f32,
    pub max_norm: f32,
    pub mean: Vector3<f32>,
    /// Per-axis sample standard deviation (zero for a single point).
    pub std_dev: Vector3<f32>,
    /// Filled by `with_pair_scan`.
    pub min_pair_distance: Option<f32>,
}

impl DiskStats {
    /// Moments and radial extent; `None` for an empty set.
    pub fn of(points: &[Point3]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let mut sum = Vector3::<f64>::zeros();
        let mut min_norm = f32::INFINITY;
        let mut max_norm = 0.0f32;
        for p in points {
            sum += p.cast::<f64>();
            let r = p.norm();
            min_norm = min_norm.min(r);
            max_norm = max_norm.max(r);
        }
        let mean = sum / n;
        let std_dev = if points.len() > 1 {
            let ss = points.iter().fold(Vector3::<f64>::zeros(), |acc, p| {
                let d = p.cast::<f64>() - mean;
                acc + d.component_mul(&d)
            });
            (ss / (n - 1.0)).map(f64::sqrt)
        } else {
            Vector3::zeros()
        };
        Some(Self {
            count: points.len(),
            min_norm,
            max_norm,
            mean: mean.cast::<f32>(),
            std_dev: std_dev.cast::<f32>(),
            min_pair_distance: None,
        })
    }

    /// Add the closest-pair distance (quadratic in `points.len()`).
    pub fn with_pair_scan(mut self, points: &[Point3]) -> Self {
        self.min_pair_distance = min_pair_distance(points);
        self
    }
}

/// Smallest distance between two distinct entries; `None` for fewer than two points.
pub fn min_pair_distance(points: &[Point3]) -> Option<f32> {
    if points.len() < 2 {
        return None;
    }
    let d = (0..points.len() - 1)
        .into_par_iter()
        .map(|i| {
            let p = points[i];
            points[i + 1..]
                .iter()
                .map(|q| (q - p).norm())
                .fold(f32::INFINITY, f32::min)
        })
        .reduce(|| f32::INFINITY, f32::min);
    Some(d)
}

/// Pairs closer than `min_distance` whose radial bins (as the large strategy
/// assigns them) are equal or adjacent. Zero for any large-strategy output.
pub fn adjacent_bin_violations(
    points: &[Point3],
    size: f32,
    min_distance: f32,
    min_center_distance: f32,
) -> usize {
    let layers = layer_count(size, min_distance, min_center_distance);
    let mut bins: Vec<Vec<Point3>> = vec![Vec::new(); layers];
    for p in points {
        bins[bin_index(p.norm(), min_distance, min_center_distance, layers)].push(*p);
    }
    let close = |a: &Point3, b: &Point3| (a - b).norm() < min_distance;
    (0..layers)
        .into_par_iter()
        .map(|k| {
            let here = &bins[k];
            let mut n = 0;
            for (i, a) in here.iter().enumerate() {
                n += here[i + 1..].iter().filter(|b| close(a, *b)).count();
                if let Some(next) = bins.get(k + 1) {
                    n += next.iter().filter(|b| close(a, *b)).count();
                }
            }
            n
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_singleton() {
        assert!(DiskStats::of(&[]).is_none());
        let one = [Point3::new(3.0, 4.0, 0.0)];
        let s = DiskStats::of(&one).unwrap().with_pair_scan(&one);
        assert_eq!(s.count, 1);
        assert_eq!(s.min_norm, 5.0);
        assert_eq!(s.max_norm, 5.0);
        assert_eq!(s.std_dev, Vector3::zeros());
        assert_eq!(s.min_pair_distance, None);
    }

    #[test]
    fn moments_of_symmetric_set() {
        let pts = [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, -2.0, 0.0),
        ];
        let s = DiskStats::of(&pts).unwrap().with_pair_scan(&pts);
        assert!(s.mean.norm() < 1e-6);
        assert_eq!(s.min_norm, 1.0);
        assert_eq!(s.max_norm, 2.0);
        // x: values 1,-1,0,0 -> var = 2/3
        assert!((s.std_dev.x - (2.0f32 / 3.0).sqrt()).abs() < 1e-6);
        assert!((s.std_dev.y - (8.0f32 / 3.0).sqrt()).abs() < 1e-6);
        assert_eq!(s.std_dev.z, 0.0);
        // (1,0,0) and (-1,0,0) are closer than any x/y pair.
        assert_eq!(s.min_pair_distance, Some(2.0));
    }

    #[test]
    fn adjacent_bins_only() {
        // min_distance 1, layers = floor(10/1) = 10.
        let pts = [
            Point3::new(0.2, 0.0, 0.0), // bin 0
            Point3::new(0.9, 0.0, 0.0), // bin 0, 0.7 from the first
            Point3::new(1.5, 0.0, 0.0), // bin 1, 0.6 from the second
        ];
        assert_eq!(adjacent_bin_violations(&pts, 2.0, 1.0, 0.0), 2);
        let spread = [Point3::new(0.5, 0.0, 0.0), Point3::new(2.5, 0.0, 0.0)];
        assert_eq!(adjacent_bin_violations(&spread, 2.0, 1.0, 0.0), 0);
    }
}
