#![warn(missing_docs, unused_imports)]

//! (k, n) threshold secret image sharing.
//!
//! A secret 8-bit grayscale bitmap is split into `n` shadows such that any `k`
//! of them reconstruct it exactly. Sharing is done per pixel group over
//! GF(251): every `k` consecutive secret bytes are the coefficients of a
//! polynomial, and shadow `i` stores its value at `x = i`. Shadows are hidden
//! bit by bit in the least significant bits of cover bitmaps.

mod errors;

pub mod bmp;
pub mod pipeline;
pub mod scan;
pub mod sharing;
pub mod stego;

pub use errors::{Error, Result};
