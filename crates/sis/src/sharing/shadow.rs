use crate::{Error, Result};

/// One share of a secret image.
///
/// `pixels` holds one GF(251) element per secret pixel group, row by row
/// without padding, so `pixels.len() == width * height` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shadow {
    index: u16,
    seed: u16,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Shadow {
    /// Creates a shadow.
    ///
    /// Returns an error if `index` is 0 or if `pixels` does not hold exactly
    /// `width * height` bytes.
    pub fn new(index: u16, seed: u16, width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if index == 0 {
            return Err(Error::malformed_shadow_set("shadow index 0"));
        }
        if pixels.len() != width as usize * height as usize {
            return Err(Error::malformed_shadow_set(format!(
                "shadow {index} holds {} bytes, expected {width}x{height}",
                pixels.len()
            )));
        }
        Ok(Self {
            index,
            seed,
            width,
            height,
            pixels,
        })
    }

    /// The shadow index, i.e. the interpolation point.
    pub fn index(&self) -> u16 {
        self.index
    }

    /// The seed used at distribution time.
    pub fn seed(&self) -> u16 {
        self.seed
    }

    /// Width of the shadow image.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the shadow image.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The shadow bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of shadow bytes.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// True if the shadow holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Consumes the shadow and returns its bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}
