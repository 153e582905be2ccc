//! Nearest-distance scans over accepted stars.
//!
//! Map-then-min over a slice. Large slices go through rayon; min is
//! associative and commutative, so the result does not depend on the split.

use rayon::prelude::*;

use crate::Point3;

/// Slices shorter than this are scanned sequentially.
pub(crate) const PAR_SCAN_MIN: usize = 4096;

/// Distance from `p` to the closest point in `points`; `None` if empty.
pub(crate) fn min_distance(points: &[Point3], p: &Point3) -> Option<f32> {
    if points.is_empty() {
        return None;
    }
    let d = if points.len() >= PAR_SCAN_MIN {
        points
            .par_iter()
            .map(|q| (q - p).norm())
            .reduce(|| f32::INFINITY, f32::min)
    } else {
        points
            .iter()
            .map(|q| (q - p).norm())
            .fold(f32::INFINITY, f32::min)
    };
    Some(d)
}

/// Min over several slices; `None` if all are empty.
pub(crate) fn min_distance_over<'a>(
    groups: impl IntoIterator<Item = &'a [Point3]>,
    p: &Point3,
) -> Option<f32> {
    groups
        .into_iter()
        .filter_map(|g| min_distance(g, p))
        .reduce(f32::min)
}
