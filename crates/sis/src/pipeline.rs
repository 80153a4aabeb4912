//! The two end-to-end operations: distributing a secret bitmap into stego
//! shadows, and recovering it from `k` of them.

use crate::bmp::Bitmap;
use crate::scan::{scan_directory, Candidate};
use crate::sharing::{
    truncate_grayscale, SecretSharer, ShamirImageSharing, Shadow, SharingParameters,
};
use crate::stego::{extract_shadow, hide_shadow};
use crate::{Error, Result};
use log::{info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use zeroize::Zeroizing;

/// File name of the stego bitmap holding shadow `index`.
pub fn shadow_file_name(index: u16) -> String {
    format!("shadow{index}.bmp")
}

/// Splits the bitmap at `secret` into `n` shadows, hides each in a cover
/// selected from `cover_dir`, and writes them to `output_dir` as
/// `shadow<i>.bmp`. Returns the paths written, by shadow index.
pub fn distribute(
    secret: &Path,
    params: Arc<SharingParameters>,
    cover_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let k = params.threshold();
    let n = params.shadow_count();

    let bmp = Bitmap::from_file(secret)?;
    let size = bmp.pixels().len();
    info!(
        "loaded secret {} ({}x{}, {size} pixel bytes)",
        secret.display(),
        bmp.width(),
        bmp.height()
    );
    if size % k != 0 {
        return Err(Error::IndivisibleSize { size, threshold: k }.in_file(secret));
    }

    let covers = scan_directory(
        cover_dir,
        Candidate::Cover {
            threshold: k,
            shadow_len: size / k,
        },
        n,
    )?;
    info!("selected {n} covers from {}", cover_dir.display());

    let mut pixels = Zeroizing::new(bmp.into_pixels());
    truncate_grayscale(&mut pixels);
    if params.permutation() {
        sis_util::permute(pixels.as_mut_slice(), params.seed());
    }

    let sharer = ShamirImageSharing::new(params);
    let shadows = sharer.form_shadows(&pixels)?;
    info!("formed {n} shadows with k = {k}");

    std::fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    let written = shadows
        .into_par_iter()
        .zip(covers)
        .map(|(shadow, (cover_path, cover))| -> Result<PathBuf> {
            let stego = hide_shadow(cover, &shadow).map_err(|e| e.in_file(&cover_path))?;
            let path = output_dir.join(shadow_file_name(shadow.index()));
            stego.to_file(&path)?;
            info!(
                "hid shadow {} in {}, wrote {}",
                shadow.index(),
                cover_path.display(),
                path.display()
            );
            Ok(path)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(written)
}

/// Recovers a `width` x `height` secret from `k` stego shadows found in
/// `shadow_dir` and writes it to `output`.
///
/// The recovered bitmap carries the seed stored in the shadows.
pub fn recover(
    output: &Path,
    width: u32,
    height: u32,
    params: Arc<SharingParameters>,
    shadow_dir: &Path,
) -> Result<Bitmap> {
    let k = params.threshold();
    let mut secret = Bitmap::new(width, height, params.seed())?;
    let size = secret.pixels().len();

    let stegos = scan_directory(
        shadow_dir,
        Candidate::Shadow {
            threshold: k,
            secret_size: size,
        },
        k,
    )?;
    info!("selected {k} shadows from {}", shadow_dir.display());

    let shadows = stegos
        .par_iter()
        .map(|(path, stego)| extract_shadow(stego, size, k).map_err(|e| e.in_file(path)))
        .collect::<Result<Vec<Shadow>>>()?;

    let seed = shadows[0].seed();
    if shadows.iter().any(|s| s.seed() != seed) {
        warn!("shadows carry different seeds, using {seed}");
    }
    if seed != params.seed() {
        warn!(
            "shadows were distributed with seed {seed}, not {}",
            params.seed()
        );
    }

    let sharer = ShamirImageSharing::new(params.clone());
    let mut pixels = Zeroizing::new(sharer.reveal_secret(&shadows)?);
    if params.permutation() {
        sis_util::unpermute(pixels.as_mut_slice(), seed);
    }
    info!("revealed {} pixel bytes", pixels.len());

    secret.set_seed(seed);
    secret.pixels_mut().copy_from_slice(&pixels);
    secret.to_file(output)?;
    info!("wrote {}", output.display());
    Ok(secret)
}

#[cfg(test)]
mod tests {
    use super::shadow_file_name;

    #[test]
    fn shadow_names() {
        assert_eq!(shadow_file_name(1), "shadow1.bmp");
        assert_eq!(shadow_file_name(250), "shadow250.bmp");
    }
}
