//! Star-disk point generator (rejection sampling with distance constraints).
//!
//! Purpose
//! - Draw `count` stars from `N(0, size²)` on x/y and `N(0, (size·thickness)²)` on z.
//! - Reject stars closer than `min_center_distance` to the origin, or closer
//!   than `min_distance` to an already accepted star.
//!
//! Strategies
//! - `Unconstrained`: every candidate is kept, no checks at all.
//! - `Small`: compare against every accepted star. Exact pairwise guarantee, O(n²).
//! - `Large`: bucket accepted stars by radius (`bins::RadialBins`) and compare
//!   only against the candidate's bin and its two radial neighbours. Pairs in
//!   the same or adjacent bins are always checked; pairs further apart are not.
//!   Their radial gap is at least `min_distance` up to rounding of the bin
//!   index at bin edges, so the pairwise guarantee is only approximate there.
//!
//! Termination
//! - By default the rejection loop is unbounded; a config that cannot fit
//!   `count` stars spins forever. `DiskParams::max_attempts` opts into a
//!   per-star cap that fails with `GeneratorError::ConstraintsUnsatisfiable`.
//!
//! References
//! - Code cross-refs: `GaussianSampler`, `bins`, `scan`, `budget`

pub mod bins;
pub mod budget;
pub(crate) mod scan;

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;
use serde::Serialize;

use crate::gauss::GaussianSampler;
use crate::Point3;
use bins::RadialBins;
use budget::{AttemptBudget, PerStarCap, Unbounded};

/// Error type for configured generation.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorError {
    InvalidParams { reason: String },
    /// The per-star attempt cap ran out before a candidate was accepted.
    ConstraintsUnsatisfiable { accepted: usize, attempts: u64 },
}

impl GeneratorError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid disk params: {reason}"),
            Self::ConstraintsUnsatisfiable { accepted, attempts } => write!(
                f,
                "constraints unsatisfiable: {attempts} candidates rejected after {accepted} stars accepted"
            ),
        }
    }
}

impl std::error::Error for GeneratorError {}

/// Generation strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Unconstrained,
    Small,
    Large,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Unconstrained => "unconstrained",
            Strategy::Small => "small",
            Strategy::Large => "large",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unconstrained" => Ok(Strategy::Unconstrained),
            "small" => Ok(Strategy::Small),
            "large" => Ok(Strategy::Large),
            other => Err(GeneratorError::invalid(format!(
                "unknown strategy `{other}` (expected unconstrained|small|large)"
            ))),
        }
    }
}

/// Disk configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiskParams {
    /// Number of stars to return.
    pub count: u32,
    /// Minimum pairwise separation (constrained strategies only).
    pub min_distance: f32,
    /// Stars with `|p| < min_center_distance` are rejected.
    pub min_center_distance: f32,
    /// Standard deviation of the x/y distribution.
    pub size: f32,
    /// z-axis compression; z stddev is `size * thickness`.
    pub thickness: f32,
    /// Per-star cap on candidate draws. `None` loops until a candidate fits.
    pub max_attempts: Option<u64>,
}

impl Default for DiskParams {
    fn default() -> Self {
        Self {
            count: 1000,
            min_distance: 0.5,
            min_center_distance: 1.0,
            size: 20.0,
            thickness: 0.25,
            max_attempts: None,
        }
    }
}

impl DiskParams {
    /// Checks shared by every strategy.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(GeneratorError::invalid("size must be finite and > 0"));
        }
        if !self.thickness.is_finite() {
            return Err(GeneratorError::invalid("thickness must be finite"));
        }
        if !self.min_center_distance.is_finite() || self.min_center_distance < 0.0 {
            return Err(GeneratorError::invalid(
                "min_center_distance must be finite and >= 0",
            ));
        }
        if self.max_attempts == Some(0) {
            return Err(GeneratorError::invalid(
                "max_attempts must be > 0 when specified",
            ));
        }
        Ok(())
    }

    /// `validate` plus the separation constraint used by `Small`/`Large`.
    pub fn validate_constrained(&self) -> Result<(), GeneratorError> {
        self.validate()?;
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(GeneratorError::invalid(
                "min_distance must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Configured generator: validated params plus an owned sampler.
pub struct DiskGenerator {
    params: DiskParams,
    sampler: GaussianSampler,
}

impl DiskGenerator {
    pub fn new(params: DiskParams, sampler: GaussianSampler) -> Result<Self, GeneratorError> {
        params.validate()?;
        Ok(Self { params, sampler })
    }

    pub fn seeded(params: DiskParams, seed: u64) -> Result<Self, GeneratorError> {
        Self::new(params, GaussianSampler::seeded(seed))
    }

    pub fn params(&self) -> &DiskParams {
        &self.params
    }

    pub fn unconstrained(&mut self) -> Vec<Point3> {
        unconstrained_with(&self.params, &mut self.sampler)
    }

    pub fn small(&mut self) -> Result<Vec<Point3>, GeneratorError> {
        self.params.validate_constrained()?;
        match self.params.max_attempts {
            None => Ok(infallible(small_with(
                &self.params,
                &mut self.sampler,
                Unbounded,
            ))),
            Some(cap) => small_with(&self.params, &mut self.sampler, PerStarCap::new(cap)),
        }
    }

    pub fn large(&mut self) -> Result<Vec<Point3>, GeneratorError> {
        self.params.validate_constrained()?;
        match self.params.max_attempts {
            None => Ok(infallible(large_with(
                &self.params,
                &mut self.sampler,
                Unbounded,
            ))),
            Some(cap) => large_with(&self.params, &mut self.sampler, PerStarCap::new(cap)),
        }
    }

    pub fn generate(&mut self, strategy: Strategy) -> Result<Vec<Point3>, GeneratorError> {
        match strategy {
            Strategy::Unconstrained => Ok(self.unconstrained()),
            Strategy::Small => self.small(),
            Strategy::Large => self.large(),
        }
    }
}

/// `count` stars with no constraints. Fresh entropy-seeded sampler per call.
pub fn generate_unconstrained(count: u32, size: f32, thickness: f32) -> Vec<Point3> {
    let params = DiskParams {
        count,
        min_distance: 0.0,
        min_center_distance: 0.0,
        size,
        thickness,
        max_attempts: None,
    };
    unconstrained_with(&params, &mut GaussianSampler::from_entropy())
}

/// `count` stars, each at least `min_distance` from every other star and at
/// least `min_center_distance` from the origin. Inputs are taken as given;
/// an unsatisfiable config never returns.
pub fn generate_small(
    count: u32,
    min_distance: f32,
    min_center_distance: f32,
    size: f32,
    thickness: f32,
) -> Vec<Point3> {
    let params = DiskParams {
        count,
        min_distance,
        min_center_distance,
        size,
        thickness,
        max_attempts: None,
    };
    infallible(small_with(
        &params,
        &mut GaussianSampler::from_entropy(),
        Unbounded,
    ))
}

/// Like `generate_small`, but only stars in the same or adjacent radial bins
/// are compared. Output is ordered by bin (innermost first).
pub fn generate_large(
    count: u32,
    min_distance: f32,
    min_center_distance: f32,
    size: f32,
    thickness: f32,
) -> Vec<Point3> {
    let params = DiskParams {
        count,
        min_distance,
        min_center_distance,
        size,
        thickness,
        max_attempts: None,
    };
    infallible(large_with(
        &params,
        &mut GaussianSampler::from_entropy(),
        Unbounded,
    ))
}

fn infallible<T>(res: Result<T, Infallible>) -> T {
    match res {
        Ok(v) => v,
        Err(never) => match never {},
    }
}

#[inline]
fn candidate(params: &DiskParams, sampler: &mut GaussianSampler) -> Point3 {
    let [gx, gy, gz] = sampler.sample3();
    let mut p = Vector3::new(gx, gy, gz) * params.size;
    p.z *= params.thickness;
    p
}

/// Rejection counters, reported once per generation call.
#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    draws: u64,
    center_rejects: u64,
    neighbour_rejects: u64,
}

impl Tally {
    fn report(&self, strategy: Strategy, accepted: usize) {
        tracing::debug!(
            strategy = strategy.as_str(),
            accepted,
            draws = self.draws,
            center_rejects = self.center_rejects,
            neighbour_rejects = self.neighbour_rejects,
            "disk generated"
        );
    }
}

/// Draw candidates until one clears both constraints.
///
/// `nearest` returns the distance to the closest relevant accepted star, or
/// `None` when there is nothing to compare against.
fn next_star<B: AttemptBudget>(
    params: &DiskParams,
    sampler: &mut GaussianSampler,
    budget: &mut B,
    tally: &mut Tally,
    accepted: usize,
    nearest: impl Fn(&Point3) -> Option<f32>,
) -> Result<Point3, B::Error> {
    budget.start_star();
    loop {
        budget.spend(accepted)?;
        let p = candidate(params, sampler);
        tally.draws += 1;
        if p.norm() < params.min_center_distance {
            tally.center_rejects += 1;
            continue;
        }
        match nearest(&p) {
            Some(d) if d < params.min_distance => tally.neighbour_rejects += 1,
            _ => return Ok(p),
        }
    }
}

pub(crate) fn unconstrained_with(params: &DiskParams, sampler: &mut GaussianSampler) -> Vec<Point3> {
    (0..params.count).map(|_| candidate(params, sampler)).collect()
}

pub(crate) fn small_with<B: AttemptBudget>(
    params: &DiskParams,
    sampler: &mut GaussianSampler,
    mut budget: B,
) -> Result<Vec<Point3>, B::Error> {
    let target = params.count as usize;
    let mut stars: Vec<Point3> = Vec::with_capacity(target);
    let mut tally = Tally::default();
    while stars.len() < target {
        let p = next_star(params, sampler, &mut budget, &mut tally, stars.len(), |p| {
            scan::min_distance(&stars, p)
        })?;
        stars.push(p);
    }
    tally.report(Strategy::Small, stars.len());
    Ok(stars)
}

pub(crate) fn large_with<B: AttemptBudget>(
    params: &DiskParams,
    sampler: &mut GaussianSampler,
    mut budget: B,
) -> Result<Vec<Point3>, B::Error> {
    let target = params.count as usize;
    let mut bins = RadialBins::new(params.size, params.min_distance, params.min_center_distance);
    let mut tally = Tally::default();
    while bins.len() < target {
        let p = next_star(params, sampler, &mut budget, &mut tally, bins.len(), |p| {
            bins.nearest(p)
        })?;
        bins.insert(p);
    }
    tally.report(Strategy::Large, bins.len());
    Ok(bins.into_points())
}
