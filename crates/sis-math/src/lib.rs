#![warn(missing_docs, unused_imports)]

//! Mathematical utilities for the sis library: arithmetic in the prime field
//! GF(251) and the linear-system solver used to interpolate shadows back into
//! secret pixels.

mod errors;

pub mod linalg;
pub mod zp;

pub use errors::{Error, Result};
