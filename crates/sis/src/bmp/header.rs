//! Wire layout of the 14-byte file header and the 40-byte BITMAPINFOHEADER.
//!
//! All multi-byte fields are little-endian on disk. Headers are decoded and
//! encoded field by field, independently of the host byte order and of the
//! in-memory layout of the structs.

use crate::{Error, Result};

/// The magic number `BM`, read as a big-endian 16-bit value.
pub const BMP_MAGIC: u16 = 0x424D;
/// Size of the file header.
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of a BITMAPINFOHEADER, the only DIB header variant supported.
pub const DIB_HEADER_SIZE: usize = 40;
/// Size of the 256-entry BGRA palette of an 8-bit bitmap.
pub const PALETTE_SIZE: usize = 1024;
/// Offset of the pixel array in every bitmap this codec writes.
pub const PIXEL_ARRAY_OFFSET: usize = FILE_HEADER_SIZE + DIB_HEADER_SIZE + PALETTE_SIZE;
/// The only supported bit depth.
pub const BITS_PER_PIXEL: u16 = 8;

/// Little-endian cursor over a header buffer.
struct WireReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn u16(&mut self) -> u16 {
        u16::from_le_bytes(self.take())
    }

    fn u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }
}

/// The bitmap file header.
///
/// The two reserved fields carry the sharing parameters: `seed` (bytes 6-7)
/// and `shadow_index` (bytes 8-9, 0 for a bitmap that is not a shadow).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Magic number, `BMP_MAGIC` for a bitmap.
    pub magic: u16,
    /// Total file size in bytes.
    pub file_size: u32,
    /// Seed used at distribution time.
    pub seed: u16,
    /// Index of the shadow, 1..=n, or 0.
    pub shadow_index: u16,
    /// Offset of the pixel array from the start of the file.
    pub pixel_offset: u32,
}

impl FileHeader {
    /// Decodes a file header. The magic number is not checked here.
    pub fn from_wire(bytes: &[u8; FILE_HEADER_SIZE]) -> Self {
        let mut r = WireReader::new(bytes);
        Self {
            magic: u16::from_be_bytes(r.take()),
            file_size: r.u32(),
            seed: r.u16(),
            shadow_index: r.u16(),
            pixel_offset: r.u32(),
        }
    }

    /// Encodes the file header.
    pub fn to_wire(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut out = [0u8; FILE_HEADER_SIZE];
        out[0..2].copy_from_slice(&self.magic.to_be_bytes());
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..8].copy_from_slice(&self.seed.to_le_bytes());
        out[8..10].copy_from_slice(&self.shadow_index.to_le_bytes());
        out[10..14].copy_from_slice(&self.pixel_offset.to_le_bytes());
        out
    }
}

/// The BITMAPINFOHEADER.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DibHeader {
    /// Size of this header, 40.
    pub header_size: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels; negative for top-down row order.
    pub height: i32,
    /// Number of color planes, 1.
    pub planes: u16,
    /// Bits per pixel.
    pub bit_depth: u16,
    /// Compression method, 0 for none.
    pub compression: u32,
    /// Size of the pixel array including row padding.
    pub pixel_array_size: u32,
    /// Horizontal resolution in pixels per meter.
    pub h_res: u32,
    /// Vertical resolution in pixels per meter.
    pub v_res: u32,
    /// Number of palette colors, 0 meaning 2^bit_depth.
    pub colors: u32,
    /// Number of important colors, usually ignored.
    pub important_colors: u32,
}

impl DibHeader {
    /// Decodes a BITMAPINFOHEADER without validating it.
    pub fn from_wire(bytes: &[u8; DIB_HEADER_SIZE]) -> Self {
        let mut r = WireReader::new(bytes);
        Self {
            header_size: r.u32(),
            width: r.u32(),
            height: r.i32(),
            planes: r.u16(),
            bit_depth: r.u16(),
            compression: r.u32(),
            pixel_array_size: r.u32(),
            h_res: r.u32(),
            v_res: r.u32(),
            colors: r.u32(),
            important_colors: r.u32(),
        }
    }

    /// Encodes the header.
    pub fn to_wire(&self) -> [u8; DIB_HEADER_SIZE] {
        let mut out = [0u8; DIB_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.header_size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bit_depth.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.pixel_array_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.h_res.to_le_bytes());
        out[28..32].copy_from_slice(&self.v_res.to_le_bytes());
        out[32..36].copy_from_slice(&self.colors.to_le_bytes());
        out[36..40].copy_from_slice(&self.important_colors.to_le_bytes());
        out
    }

    /// Checks that the header describes an uncompressed 8-bit bitmap with
    /// non-zero dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.header_size as usize != DIB_HEADER_SIZE {
            return Err(Error::UnsupportedFormat(format!(
                "DIB header of {} bytes, only the {DIB_HEADER_SIZE}-byte BITMAPINFOHEADER is supported",
                self.header_size
            )));
        }
        if self.bit_depth != BITS_PER_PIXEL {
            return Err(Error::UnsupportedFormat(format!(
                "{} bits per pixel, only {BITS_PER_PIXEL} is supported",
                self.bit_depth
            )));
        }
        if self.compression != 0 {
            return Err(Error::UnsupportedFormat(format!(
                "compression method {}, only uncompressed bitmaps are supported",
                self.compression
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::UnsupportedFormat(format!(
                "empty bitmap of {}x{} pixels",
                self.width, self.height
            )));
        }
        if self.height == i32::MIN {
            return Err(Error::UnsupportedFormat(format!(
                "height {} out of range",
                self.height
            )));
        }
        Ok(())
    }
}
