//! Least significant bit embedding of shadows into cover bitmaps.
//!
//! Every shadow byte takes 8 consecutive cover bytes, most significant bit
//! first. Only bit 0 of each used cover byte changes.

use crate::bmp::Bitmap;
use crate::sharing::{shadow_dimensions, Shadow};
use crate::{Error, Result};

/// Number of cover bytes needed per shadow byte.
pub const BITS_PER_BYTE: usize = 8;

/// Number of shadow bytes `cover` can hold.
pub fn capacity(cover: &Bitmap) -> usize {
    cover.pixels().len() / BITS_PER_BYTE
}

/// Hides `shadow` in the least significant bits of `cover`, and copies the
/// shadow's seed and index into the cover's header.
pub fn hide_shadow(mut cover: Bitmap, shadow: &Shadow) -> Result<Bitmap> {
    let required = shadow.len() * BITS_PER_BYTE;
    let available = cover.pixels().len();
    if available < required {
        return Err(Error::cover_too_small(available, required));
    }

    for (&byte, chunk) in shadow
        .pixels()
        .iter()
        .zip(cover.pixels_mut().chunks_exact_mut(BITS_PER_BYTE))
    {
        for (b, p) in chunk.iter_mut().enumerate() {
            let bit = (byte >> (7 - b)) & 1;
            *p = (*p & 0xFE) | bit;
        }
    }

    cover.set_seed(shadow.seed());
    cover.set_shadow_index(shadow.index());
    Ok(cover)
}

/// Extracts the shadow hidden in `stego`.
///
/// The shadow dimensions are not stored: they are derived from the size of
/// the secret pixel array, `secret_size`, and the threshold `k`, the same way
/// they were when the shadows were formed.
pub fn extract_shadow(stego: &Bitmap, secret_size: usize, k: usize) -> Result<Shadow> {
    let (width, height) = shadow_dimensions(secret_size, k)?;
    let len = width as usize * height as usize;
    let available = stego.pixels().len();
    if available < len * BITS_PER_BYTE {
        return Err(Error::cover_too_small(available, len * BITS_PER_BYTE));
    }

    let pixels = stego
        .pixels()
        .chunks_exact(BITS_PER_BYTE)
        .take(len)
        .map(|chunk| chunk.iter().fold(0u8, |byte, p| (byte << 1) | (p & 1)))
        .collect();
    Shadow::new(stego.shadow_index(), stego.seed(), width, height, pixels)
}
