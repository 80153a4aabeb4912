//! Parameters of the (k, n) sharing scheme.

use crate::{Error, Result};
use std::sync::Arc;

/// Seed used when none is given.
pub const DEFAULT_SEED: u16 = 691;

/// Largest number of shadows: shadow indexes are interpolation points, and
/// must stay distinct and non-zero modulo 251.
pub const MAX_SHADOWS: usize = 250;

/// Parameters of the sharing scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharingParameters {
    threshold: usize,
    shadow_count: usize,
    seed: u16,
    permutation: bool,
}

impl SharingParameters {
    /// The reconstruction threshold k.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The number of shadows n.
    pub fn shadow_count(&self) -> usize {
        self.shadow_count
    }

    /// The seed written to every shadow.
    pub fn seed(&self) -> u16 {
        self.seed
    }

    /// Whether the secret pixels are permuted before sharing.
    pub fn permutation(&self) -> bool {
        self.permutation
    }
}

/// Builder for [`SharingParameters`].
#[derive(Debug, Clone)]
pub struct SharingParametersBuilder {
    threshold: usize,
    shadow_count: usize,
    seed: u16,
    permutation: bool,
}

impl SharingParametersBuilder {
    /// Creates a new instance of the builder, with the default seed and
    /// permutation disabled.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            threshold: 0,
            shadow_count: 0,
            seed: DEFAULT_SEED,
            permutation: false,
        }
    }

    /// Sets the reconstruction threshold k.
    pub fn set_threshold(&mut self, threshold: usize) -> &mut Self {
        self.threshold = threshold;
        self
    }

    /// Sets the number of shadows n.
    pub fn set_shadow_count(&mut self, shadow_count: usize) -> &mut Self {
        self.shadow_count = shadow_count;
        self
    }

    /// Sets the seed.
    pub fn set_seed(&mut self, seed: u16) -> &mut Self {
        self.seed = seed;
        self
    }

    /// Enables or disables the seeded pixel permutation.
    pub fn set_permutation(&mut self, permutation: bool) -> &mut Self {
        self.permutation = permutation;
        self
    }

    /// Build a new `SharingParameters` inside an `Arc`.
    pub fn build_arc(&self) -> Result<Arc<SharingParameters>> {
        self.build().map(Arc::new)
    }

    /// Build a new `SharingParameters`.
    ///
    /// Returns an error unless `2 <= k <= n <= 250`.
    pub fn build(&self) -> Result<SharingParameters> {
        if self.threshold < 2 {
            return Err(Error::invalid_parameters(format!(
                "threshold k = {} must be at least 2",
                self.threshold
            )));
        }
        if self.shadow_count < self.threshold {
            return Err(Error::invalid_parameters(format!(
                "shadow count n = {} is below the threshold k = {}",
                self.shadow_count, self.threshold
            )));
        }
        if self.shadow_count > MAX_SHADOWS {
            return Err(Error::invalid_parameters(format!(
                "shadow count n = {} exceeds {MAX_SHADOWS}",
                self.shadow_count
            )));
        }

        Ok(SharingParameters {
            threshold: self.threshold,
            shadow_count: self.shadow_count,
            seed: self.seed,
            permutation: self.permutation,
        })
    }
}
