//! Codec for uncompressed 8-bit bitmaps.
//!
//! A file is a 14-byte file header, a 40-byte BITMAPINFOHEADER, a 1024-byte
//! palette and the pixel array, whose rows are padded to 4-byte boundaries.

mod bitmap;
mod header;

pub use bitmap::{grayscale_palette, pixel_array_size, row_stride, Bitmap};
pub use header::{
    DibHeader, FileHeader, BITS_PER_PIXEL, BMP_MAGIC, DIB_HEADER_SIZE, FILE_HEADER_SIZE,
    PALETTE_SIZE, PIXEL_ARRAY_OFFSET,
};
