//! Shamir-style threshold sharing of 8-bit images over GF(251).
//!
//! Every `k` consecutive secret bytes are the coefficients of a polynomial of
//! degree `k - 1`; shadow `i` stores its evaluation at `x = i`.

use super::{Shadow, SharingParameters};
use crate::sharing::traits::SecretSharer;
use crate::{Error, Result};
use itertools::Itertools;
use rayon::prelude::*;
use sis_math::linalg::VandermondeSolver;
use sis_math::zp::{evaluate_polynomial, PRIME};
use sis_util::find_closest_pair;
use std::sync::Arc;

/// Largest value a secret byte may take.
pub const MAX_PIXEL_VALUE: u8 = (PRIME - 1) as u8;

/// Clamps every byte above 250 down to 250, so that the pixels are elements
/// of GF(251).
pub fn truncate_grayscale(pixels: &mut [u8]) {
    for p in pixels.iter_mut() {
        if *p > MAX_PIXEL_VALUE {
            *p = MAX_PIXEL_VALUE;
        }
    }
}

/// Dimensions of the shadows of a `secret_size`-byte secret shared with
/// threshold `k`, as square as possible.
pub fn shadow_dimensions(secret_size: usize, k: usize) -> Result<(u32, u32)> {
    if k == 0 || secret_size % k != 0 {
        return Err(Error::IndivisibleSize {
            size: secret_size,
            threshold: k,
        });
    }
    let (width, height) = find_closest_pair(secret_size / k);
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(Error::invalid_parameters(format!(
            "shadow of {} bytes is too large",
            secret_size / k
        ))),
    }
}

/// Threshold image sharing with the parameters of a [`SharingParameters`].
#[derive(Debug, Clone)]
pub struct ShamirImageSharing {
    params: Arc<SharingParameters>,
}

impl ShamirImageSharing {
    /// Create a new sharing instance.
    pub fn new(params: Arc<SharingParameters>) -> Self {
        Self { params }
    }

    /// The sharing parameters.
    pub fn params(&self) -> &Arc<SharingParameters> {
        &self.params
    }

    /// Checks that `shadows` can be interpolated, before any arithmetic runs.
    fn check_shadow_set(&self, shadows: &[Shadow]) -> Result<()> {
        if let Some(s) = shadows.iter().find(|s| s.index() % PRIME == 0) {
            return Err(Error::malformed_shadow_set(format!(
                "shadow index {} is 0 modulo {PRIME}",
                s.index()
            )));
        }
        if !shadows.iter().map(|s| s.index() % PRIME).all_unique() {
            let indexes = shadows.iter().map(Shadow::index).collect_vec();
            return Err(Error::malformed_shadow_set(format!(
                "duplicate shadow indexes in {indexes:?}"
            )));
        }
        let len = shadows[0].len();
        if len == 0 {
            return Err(Error::malformed_shadow_set("empty shadows"));
        }
        if let Some(s) = shadows.iter().find(|s| s.len() != len) {
            return Err(Error::malformed_shadow_set(format!(
                "shadow {} holds {} bytes, shadow {} holds {len}",
                s.index(),
                s.len(),
                shadows[0].index()
            )));
        }
        Ok(())
    }
}

impl SecretSharer for ShamirImageSharing {
    /// Split the secret into `n` shadows, indexed 1 to `n`.
    ///
    /// The secret length must be a non-zero multiple of `k`, and every byte
    /// must be at most 250 (see [`truncate_grayscale`]).
    fn form_shadows(&self, secret: &[u8]) -> Result<Vec<Shadow>> {
        let k = self.params.threshold();
        if secret.is_empty() {
            return Err(Error::invalid_parameters("empty secret"));
        }
        let (width, height) = shadow_dimensions(secret.len(), k)?;
        if let Some((position, &value)) = secret
            .iter()
            .find_position(|&&v| v > MAX_PIXEL_VALUE)
        {
            return Err(Error::OutOfField { position, value });
        }

        let seed = self.params.seed();
        (1..=self.params.shadow_count() as u16)
            .into_par_iter()
            .map(|x| {
                let pixels = secret
                    .chunks_exact(k)
                    .map(|coeffs| evaluate_polynomial(coeffs, x))
                    .collect();
                Shadow::new(x, seed, width, height, pixels)
            })
            .collect()
    }

    /// Reconstruct the secret from the first `k` shadows.
    ///
    /// Fewer than `k` shadows are refused. Zero or duplicate indexes and
    /// shadows of different lengths are rejected before interpolation.
    fn reveal_secret(&self, shadows: &[Shadow]) -> Result<Vec<u8>> {
        let k = self.params.threshold();
        if shadows.len() < k {
            return Err(Error::insufficient_shadows(shadows.len(), k));
        }
        let shadows = &shadows[..k];
        self.check_shadow_set(shadows)?;

        let points = shadows.iter().map(Shadow::index).collect_vec();
        let solver = VandermondeSolver::new(&points)?;

        let mut secret = vec![0u8; shadows[0].len() * k];
        secret.par_chunks_mut(k).enumerate().try_for_each_init(
            || (solver.scratch(), vec![0u8; k]),
            |(scratch, values), (p, out)| -> Result<()> {
                for (v, s) in values.iter_mut().zip(shadows) {
                    *v = s.pixels()[p];
                }
                solver.solve_into(scratch, values, out)?;
                Ok(())
            },
        )?;
        Ok(secret)
    }
}
