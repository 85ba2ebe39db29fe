//! Adapter from `rand` generators to the solver's tie-break oracle.

use mdp_core::RngOracle;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Wraps any [`RngCore`] as an [`RngOracle`].
#[derive(Clone, Debug)]
pub struct RandOracle<R> {
    inner: R,
}

impl<R: RngCore> RandOracle<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl RandOracle<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible generator for replays and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RngOracle for RandOracle<R> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }
}
