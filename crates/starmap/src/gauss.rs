//! Standard-normal scalar source (Box–Muller over a private `StdRng`).
//!
//! Purpose
//! - Feed the disk generator with independent N(0,1) draws.
//! - Keep the RNG an explicit object: seed in, sequence out, no global state.
//!
//! Model
//! - `u1 = 1 - U`, `u2 = 1 - U` with `U ∈ [0,1)`, so `u ∈ (0,1]` and `ln(u1)` is finite.
//! - `z = sqrt(-2 ln u1) · sin(2π u2)`; the cosine partner is dropped unless
//!   `BoxMuller::Cache` is selected.
//!
//! References
//! - Code cross-refs: `disk::DiskGenerator`, `stats::DiskStats`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// What to do with the second (cosine) Box–Muller variate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoxMuller {
    /// One normal per two uniforms; the cosine variate is thrown away.
    #[default]
    Discard,
    /// Keep the cosine variate and hand it out on the next call.
    Cache,
}

/// Seedable generator of standard-normal `f32` values.
#[derive(Clone, Debug)]
pub struct GaussianSampler {
    rng: StdRng,
    mode: BoxMuller,
    spare: Option<f32>,
}

impl GaussianSampler {
    /// Sampler seeded from OS entropy (non-reproducible).
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Sampler with a fixed seed; same seed and call order give the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            mode: BoxMuller::Discard,
            spare: None,
        }
    }

    /// Switch the Box–Muller mode. Drops any cached variate.
    pub fn with_mode(mut self, mode: BoxMuller) -> Self {
        self.mode = mode;
        self.spare = None;
        self
    }

    #[inline]
    pub fn mode(&self) -> BoxMuller {
        self.mode
    }

    /// One standard-normal draw.
    pub fn sample(&mut self) -> f32 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        let u1 = 1.0 - self.rng.gen::<f64>();
        let u2 = 1.0 - self.rng.gen::<f64>();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * std::f64::consts::PI * u2;
        if self.mode == BoxMuller::Cache {
            self.spare = Some((r * theta.cos()) as f32);
        }
        (r * theta.sin()) as f32
    }

    /// `k` consecutive draws.
    pub fn sample_n(&mut self, k: usize) -> Vec<f32> {
        (0..k).map(|_| self.sample()).collect()
    }

    /// Three consecutive draws, in call order.
    #[inline]
    pub fn sample3(&mut self) -> [f32; 3] {
        [self.sample(), self.sample(), self.sample()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean_std(xs: &[f32]) -> (f64, f64) {
        let n = xs.len() as f64;
        let mean = xs.iter().map(|&x| x as f64).sum::<f64>() / n;
        let var = xs
            .iter()
            .map(|&x| {
                let d = x as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / (n - 1.0);
        (mean, var.sqrt())
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = GaussianSampler::seeded(42);
        let mut b = GaussianSampler::seeded(42);
        assert_eq!(a.sample_n(64), b.sample_n(64));
        let mut c = GaussianSampler::seeded(43);
        assert_ne!(GaussianSampler::seeded(42).sample_n(8), c.sample_n(8));
    }

    #[test]
    fn sample3_matches_sequential_draws() {
        let mut a = GaussianSampler::seeded(7);
        let mut b = GaussianSampler::seeded(7);
        let triple = a.sample3();
        assert_eq!(triple.to_vec(), b.sample_n(3));
    }

    #[test]
    fn moments_discard_mode() {
        let mut s = GaussianSampler::seeded(2025);
        let xs = s.sample_n(100_000);
        let (mean, std) = mean_std(&xs);
        assert!(mean.abs() < 0.02, "mean {mean}");
        assert!((std - 1.0).abs() < 0.02, "std {std}");
        assert!(xs.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn moments_cache_mode() {
        let mut s = GaussianSampler::seeded(2025).with_mode(BoxMuller::Cache);
        assert_eq!(s.mode(), BoxMuller::Cache);
        let xs = s.sample_n(100_000);
        let (mean, std) = mean_std(&xs);
        assert!(mean.abs() < 0.02, "mean {mean}");
        assert!((std - 1.0).abs() < 0.02, "std {std}");
    }

    #[test]
    fn cache_mode_reuses_uniform_pair() {
        // The first draw is identical in both modes: sin-variate of the first pair.
        let mut d = GaussianSampler::seeded(11);
        let mut c = GaussianSampler::seeded(11).with_mode(BoxMuller::Cache);
        assert_eq!(d.sample(), c.sample());
        // Cache serves the cosine partner, so the streams diverge after that.
        let second_cached = c.sample();
        let third_cached = c.sample();
        let second_discard = d.sample();
        assert_eq!(third_cached, second_discard);
        assert_ne!(second_cached, second_discard);
    }

    #[test]
    fn sample_n_zero_is_empty() {
        let mut s = GaussianSampler::from_entropy();
        assert!(s.sample_n(0).is_empty());
    }
}
