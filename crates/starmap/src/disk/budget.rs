//! Per-star attempt budgets for the rejection loop.
//!
//! `Unbounded` never fails (its error type is `Infallible`), which keeps the
//! positional `generate_*` functions infallible. `PerStarCap` fails once a
//! single star needed more than `max` candidate draws.

use std::convert::Infallible;

use super::GeneratorError;

/// Budget consulted before every candidate draw.
pub trait AttemptBudget {
    type Error;

    /// Reset at the start of each star.
    fn start_star(&mut self);

    /// Charge one draw. `accepted` is the number of stars committed so far.
    fn spend(&mut self, accepted: usize) -> Result<(), Self::Error>;
}

/// No cap; the loop runs until a candidate fits.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbounded;

impl AttemptBudget for Unbounded {
    type Error = Infallible;

    #[inline]
    fn start_star(&mut self) {}

    #[inline]
    fn spend(&mut self, _accepted: usize) -> Result<(), Infallible> {
        Ok(())
    }
}

/// At most `max` draws per star.
#[derive(Clone, Copy, Debug)]
pub struct PerStarCap {
    max: u64,
    used: u64,
}

impl PerStarCap {
    pub fn new(max: u64) -> Self {
        Self { max, used: 0 }
    }
}

impl AttemptBudget for PerStarCap {
    type Error = GeneratorError;

    #[inline]
    fn start_star(&mut self) {
        self.used = 0;
    }

    fn spend(&mut self, accepted: usize) -> Result<(), GeneratorError> {
        if self.used >= self.max {
            return Err(GeneratorError::ConstraintsUnsatisfiable {
                accepted,
                attempts: self.used,
            });
        }
        self.used += 1;
        Ok(())
    }
}
