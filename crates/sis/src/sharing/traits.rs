/// Traits for secret sharing operations.
///
/// This module defines the core trait for threshold image sharing.
use super::Shadow;
use crate::Result;

/// Trait for splitting a secret pixel array into shadows and recombining them.
pub trait SecretSharer {
    /// Split the secret pixel array into one shadow per shadow index.
    fn form_shadows(&self, secret: &[u8]) -> Result<Vec<Shadow>>;

    /// Reconstruct the secret pixel array from at least `k` shadows.
    fn reveal_secret(&self, shadows: &[Shadow]) -> Result<Vec<u8>>;
}
