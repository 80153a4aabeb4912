//! Threshold sharing of a secret pixel array into shadows.

mod params;
mod shadow;
mod shamir;
mod traits;

pub use params::{SharingParameters, SharingParametersBuilder, DEFAULT_SEED, MAX_SHADOWS};
pub use shadow::Shadow;
pub use shamir::{shadow_dimensions, truncate_grayscale, ShamirImageSharing, MAX_PIXEL_VALUE};
pub use traits::SecretSharer;
