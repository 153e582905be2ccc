//! Gaussian star-disk point clouds.
//!
//! Stars are drawn from an axially compressed 3D normal distribution and kept
//! or rejected against two distance constraints: a minimum distance from the
//! origin and a minimum pairwise separation.
//!
//! API Policy
//! - The free functions in `disk` keep the plain positional signatures
//!   (`generate_small(count, min_distance, min_center_distance, size, thickness)`).
//! - `DiskGenerator` is the configured path: validated params, explicit seed,
//!   optional attempt cap.

pub mod api;
pub mod disk;
pub mod gauss;
pub mod stats;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use disk::{DiskGenerator, DiskParams, GeneratorError, Strategy};
pub use gauss::{BoxMuller, GaussianSampler};

/// A star position. Only the coordinates carry meaning.
pub type Point3 = nalgebra::Vector3<f32>;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::disk::{
        generate_large, generate_small, generate_unconstrained, DiskGenerator, DiskParams,
        GeneratorError, Strategy,
    };
    pub use crate::gauss::{BoxMuller, GaussianSampler};
    pub use crate::stats::{min_pair_distance, DiskStats};
    pub use crate::Point3;
}
