//! Radial bins for the large-scale strategy.
//!
//! Bin `k` holds stars with `|p|` in
//! `[min_center_distance + k·min_distance, min_center_distance + (k+1)·min_distance)`.
//! The bin count covers `EXTENT_SIGMAS` standard deviations; anything further
//! out lands in the last bin.

use crate::Point3;

use super::scan;

/// Radial extent covered by the bins, in units of `size`.
pub(crate) const EXTENT_SIGMAS: f32 = 5.0;
/// Upper bound on the bin count; a tiny `min_distance` would otherwise allocate
/// billions of empty bins. Excess radius folds into the last bin.
pub(crate) const MAX_LAYERS: usize = 1 << 20;

/// `floor((size·5 − min_center_distance) / min_distance)`, clamped to `[1, MAX_LAYERS]`.
pub fn layer_count(size: f32, min_distance: f32, min_center_distance: f32) -> usize {
    if !(min_distance > 0.0) {
        return 1;
    }
    let raw = ((size * EXTENT_SIGMAS - min_center_distance) / min_distance).floor();
    if !(raw >= 1.0) {
        1
    } else {
        (raw as usize).min(MAX_LAYERS)
    }
}

/// `clamp(floor((norm − min_center_distance) / min_distance), 0, layers−1)`.
pub fn bin_index(norm: f32, min_distance: f32, min_center_distance: f32, layers: usize) -> usize {
    let last = layers.saturating_sub(1);
    if !(min_distance > 0.0) {
        return 0;
    }
    let k = ((norm - min_center_distance) / min_distance).floor();
    if !(k > 0.0) {
        0
    } else {
        (k as usize).min(last)
    }
}

/// Accepted stars bucketed by radius.
#[derive(Clone, Debug)]
pub struct RadialBins {
    bins: Vec<Vec<Point3>>,
    min_distance: f32,
    min_center_distance: f32,
    len: usize,
}

impl RadialBins {
    pub fn new(size: f32, min_distance: f32, min_center_distance: f32) -> Self {
        let layers = layer_count(size, min_distance, min_center_distance);
        Self {
            bins: vec![Vec::new(); layers],
            min_distance,
            min_center_distance,
            len: 0,
        }
    }

    #[inline]
    pub fn layers(&self) -> usize {
        self.bins.len()
    }

    /// Total number of stars across all bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn index_of(&self, p: &Point3) -> usize {
        bin_index(
            p.norm(),
            self.min_distance,
            self.min_center_distance,
            self.layers(),
        )
    }

    pub fn bin(&self, k: usize) -> &[Point3] {
        self.bins.get(k).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Distance to the closest star in `p`'s bin or its two neighbours.
    pub fn nearest(&self, p: &Point3) -> Option<f32> {
        let k = self.index_of(p);
        let lo = k.saturating_sub(1);
        let hi = (k + 1).min(self.layers() - 1);
        scan::min_distance_over(self.bins[lo..=hi].iter().map(Vec::as_slice), p)
    }

    pub fn insert(&mut self, p: Point3) {
        let k = self.index_of(&p);
        self.bins[k].push(p);
        self.len += 1;
    }

    /// All stars, innermost bin first.
    pub fn into_points(self) -> Vec<Point3> {
        let mut out = Vec::with_capacity(self.len);
        for bin in self.bins {
            out.extend(bin);
        }
        out
    }
}
