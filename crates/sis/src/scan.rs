//! Selection of cover and shadow bitmaps from a directory.

use crate::bmp::Bitmap;
use crate::stego::capacity;
use crate::{Error, Result};
use log::debug;
use sis_math::zp::PRIME;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// What a file must be to be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// A cover able to hold a shadow of `shadow_len` bytes, whose pixel count
    /// is divisible by `threshold`.
    Cover {
        /// The reconstruction threshold k.
        threshold: usize,
        /// Number of bytes of each shadow.
        shadow_len: usize,
    },
    /// A stego bitmap holding a shadow of a `secret_size`-byte secret.
    Shadow {
        /// The reconstruction threshold k.
        threshold: usize,
        /// Size of the secret pixel array.
        secret_size: usize,
    },
}

impl Candidate {
    fn describe(&self) -> &'static str {
        match self {
            Candidate::Cover { .. } => "covers",
            Candidate::Shadow { .. } => "shadows",
        }
    }

    /// Returns why `bmp` does not qualify, or `None` if it does.
    fn reject(&self, bmp: &Bitmap) -> Option<String> {
        match *self {
            Candidate::Cover {
                threshold,
                shadow_len,
            } => {
                if threshold == 0 || bmp.pixel_count() % threshold != 0 {
                    Some(format!(
                        "{} pixels are not divisible by k = {threshold}",
                        bmp.pixel_count()
                    ))
                } else if capacity(bmp) < shadow_len {
                    Some(format!(
                        "room for {} bytes, cannot hold a {shadow_len}-byte shadow",
                        capacity(bmp)
                    ))
                } else {
                    None
                }
            }
            Candidate::Shadow {
                threshold,
                secret_size,
            } => {
                let shadow_len = secret_size / threshold.max(1);
                if bmp.shadow_index() == 0 {
                    Some("no shadow index".to_string())
                } else if bmp.shadow_index() % PRIME == 0 {
                    Some(format!(
                        "shadow index {} is 0 modulo {PRIME}",
                        bmp.shadow_index()
                    ))
                } else if capacity(bmp) < shadow_len {
                    Some(format!(
                        "room for {} bytes, cannot hold a {shadow_len}-byte shadow",
                        capacity(bmp)
                    ))
                } else {
                    None
                }
            }
        }
    }
}

/// Regular files of `dir`, sorted by path.
fn regular_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))? {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
        if file_type.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Number of regular files in `dir`.
pub fn count_files<P: AsRef<Path>>(dir: P) -> Result<usize> {
    regular_files(dir.as_ref()).map(|files| files.len())
}

/// Selects `count` files of `dir` that qualify as `candidate`, in path order,
/// and returns them with their decoded bitmaps.
///
/// Files that are not supported bitmaps, or do not qualify, are skipped. So
/// are shadows whose index is congruent modulo 251 to one already selected.
pub fn scan_directory<P: AsRef<Path>>(
    dir: P,
    candidate: Candidate,
    count: usize,
) -> Result<Vec<(PathBuf, Bitmap)>> {
    let dir = dir.as_ref();
    let mut selected = Vec::with_capacity(count);
    let mut indexes = HashSet::new();

    for path in regular_files(dir)? {
        if selected.len() == count {
            break;
        }
        let bmp = match Bitmap::from_file(&path) {
            Ok(bmp) => bmp,
            Err(e @ Error::Io { .. }) => return Err(e),
            Err(e) => {
                debug!("skipping {e}");
                continue;
            }
        };
        if let Some(reason) = candidate.reject(&bmp) {
            debug!("skipping {}: {reason}", path.display());
            continue;
        }
        if matches!(candidate, Candidate::Shadow { .. })
            && !indexes.insert(bmp.shadow_index() % PRIME)
        {
            debug!(
                "skipping {}: shadow {} already selected modulo {PRIME}",
                path.display(),
                bmp.shadow_index()
            );
            continue;
        }
        debug!("selected {}", path.display());
        selected.push((path, bmp));
    }

    if selected.len() < count {
        return Err(Error::not_enough_files(
            selected.len(),
            count,
            candidate.describe(),
            dir,
        ));
    }
    Ok(selected)
}
