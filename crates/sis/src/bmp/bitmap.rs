use super::header::{
    DibHeader, FileHeader, BITS_PER_PIXEL, BMP_MAGIC, DIB_HEADER_SIZE, FILE_HEADER_SIZE,
    PALETTE_SIZE, PIXEL_ARRAY_OFFSET,
};
use crate::{Error, Result};
use log::warn;
use sis_traits::{Deserialize, Serialize};
use std::path::Path;

/// Number of bytes in a row of `width` 8-bit pixels, padded to a multiple of 4.
pub fn row_stride(width: u32) -> usize {
    (BITS_PER_PIXEL as usize * width as usize).div_ceil(32) * 4
}

/// Size of the padded pixel array of a `width` x `height` 8-bit bitmap.
pub fn pixel_array_size(width: u32, height: u32) -> usize {
    row_stride(width) * height as usize
}

/// The default palette, a linear grayscale ramp: entry `i` is `(i, i, i, 0)`.
pub fn grayscale_palette() -> Box<[u8; PALETTE_SIZE]> {
    let mut palette = Box::new([0u8; PALETTE_SIZE]);
    for (i, entry) in palette.chunks_exact_mut(4).enumerate() {
        entry[0] = i as u8;
        entry[1] = i as u8;
        entry[2] = i as u8;
    }
    palette
}

/// An 8-bit bitmap: headers, palette and pixel array.
///
/// The pixel array is stored bottom-up and always holds exactly
/// `pixel_array_size(width, height)` bytes, in agreement with the headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    file_header: FileHeader,
    dib_header: DibHeader,
    palette: Box<[u8; PALETTE_SIZE]>,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Creates a zeroed `width` x `height` bitmap with a grayscale palette.
    ///
    /// Returns an error if a dimension is zero or the pixel array would not
    /// fit the 32-bit size fields of the headers.
    pub fn new(width: u32, height: u32, seed: u16) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_parameters(format!(
                "bitmap dimensions must be positive, got {width}x{height}"
            )));
        }
        let size = pixel_array_size(width, height);
        if height > i32::MAX as u32 || PIXEL_ARRAY_OFFSET + size > u32::MAX as usize {
            return Err(Error::invalid_parameters(format!(
                "bitmap of {width}x{height} pixels is too large"
            )));
        }

        Ok(Self {
            file_header: FileHeader {
                magic: BMP_MAGIC,
                file_size: (PIXEL_ARRAY_OFFSET + size) as u32,
                seed,
                shadow_index: 0,
                pixel_offset: PIXEL_ARRAY_OFFSET as u32,
            },
            dib_header: DibHeader {
                header_size: DIB_HEADER_SIZE as u32,
                width,
                height: height as i32,
                planes: 1,
                bit_depth: BITS_PER_PIXEL,
                compression: 0,
                pixel_array_size: size as u32,
                h_res: 0,
                v_res: 0,
                colors: 0,
                important_colors: 0,
            },
            palette: grayscale_palette(),
            pixels: vec![0u8; size],
        })
    }

    /// Reads and decodes the bitmap stored at `path`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
        Self::try_deserialize(&bytes).map_err(|e| e.in_file(path))
    }

    /// Encodes the bitmap and writes it to `path`.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_bytes()).map_err(|e| Error::io(path, e))
    }

    /// The file header.
    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    /// The DIB header.
    pub fn dib_header(&self) -> &DibHeader {
        &self.dib_header
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.dib_header.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.dib_header.height.unsigned_abs()
    }

    /// Number of pixels, `width * height`, not counting row padding.
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// The seed stored in the file header.
    pub fn seed(&self) -> u16 {
        self.file_header.seed
    }

    /// Sets the seed stored in the file header.
    pub fn set_seed(&mut self, seed: u16) {
        self.file_header.seed = seed;
    }

    /// The shadow index stored in the file header, 0 if this is not a shadow.
    pub fn shadow_index(&self) -> u16 {
        self.file_header.shadow_index
    }

    /// Sets the shadow index stored in the file header.
    pub fn set_shadow_index(&mut self, index: u16) {
        self.file_header.shadow_index = index;
    }

    /// The BGRA palette.
    pub fn palette(&self) -> &[u8; PALETTE_SIZE] {
        &self.palette
    }

    /// The padded pixel array, bottom row first.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to the pixel array. Its length cannot change.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Replaces the pixel array.
    ///
    /// Returns an error if `pixels` does not have the length the headers
    /// declare.
    pub fn set_pixels(&mut self, pixels: Vec<u8>) -> Result<()> {
        if pixels.len() != self.pixels.len() {
            return Err(Error::invalid_parameters(format!(
                "pixel array of {} bytes for a {}x{} bitmap, expected {}",
                pixels.len(),
                self.width(),
                self.height(),
                self.pixels.len()
            )));
        }
        self.pixels = pixels;
        Ok(())
    }

    /// Consumes the bitmap and returns its pixel array.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

impl Serialize for Bitmap {
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(PIXEL_ARRAY_OFFSET + self.pixels.len());
        bytes.extend_from_slice(&self.file_header.to_wire());
        bytes.extend_from_slice(&self.dib_header.to_wire());
        bytes.extend_from_slice(self.palette.as_ref());
        bytes.extend_from_slice(&self.pixels);
        bytes
    }
}

/// Returns `bytes[start..start + N]` or a truncation error.
fn wire_slice<const N: usize>(bytes: &[u8], start: usize) -> Result<&[u8; N]> {
    bytes
        .get(start..start + N)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::TruncatedFile {
            expected: start + N,
            found: bytes.len(),
        })
}

impl Deserialize for Bitmap {
    type Error = Error;

    /// Decodes a bitmap.
    ///
    /// The pixel array is read from the header's pixel offset; its declared
    /// size is `file_size - pixel_offset`, or the DIB header's pixel array
    /// size when the file size field is zero. Top-down bitmaps are flipped to
    /// bottom-up, and the headers are normalized to the layout [`Bitmap::new`]
    /// produces.
    fn try_deserialize(bytes: &[u8]) -> Result<Self> {
        let mut file_header = FileHeader::from_wire(wire_slice(bytes, 0)?);
        if file_header.magic != BMP_MAGIC {
            return Err(Error::NotABitmap(file_header.magic));
        }

        let dib_size = u32::from_le_bytes(*wire_slice(bytes, FILE_HEADER_SIZE)?);
        if dib_size as usize != DIB_HEADER_SIZE {
            return Err(Error::UnsupportedFormat(format!(
                "DIB header of {dib_size} bytes, only the {DIB_HEADER_SIZE}-byte BITMAPINFOHEADER is supported"
            )));
        }
        let mut dib_header = DibHeader::from_wire(wire_slice(bytes, FILE_HEADER_SIZE)?);
        dib_header.validate()?;

        let palette = Box::new(*wire_slice::<PALETTE_SIZE>(
            bytes,
            FILE_HEADER_SIZE + DIB_HEADER_SIZE,
        )?);

        let offset = file_header.pixel_offset as usize;
        if offset < PIXEL_ARRAY_OFFSET {
            return Err(Error::UnsupportedFormat(format!(
                "pixel array offset {offset} overlaps the {PALETTE_SIZE}-byte palette"
            )));
        }
        let declared = if file_header.file_size == 0 {
            dib_header.pixel_array_size as usize
        } else {
            (file_header.file_size as usize)
                .checked_sub(offset)
                .ok_or_else(|| {
                    Error::UnsupportedFormat(format!(
                        "file size {} is smaller than the pixel array offset {offset}",
                        file_header.file_size
                    ))
                })?
        };

        let width = dib_header.width;
        let height = dib_header.height.unsigned_abs();
        let size = pixel_array_size(width, height);
        let needed = offset + declared.max(size);
        if bytes.len() < needed {
            return Err(Error::TruncatedFile {
                expected: needed,
                found: bytes.len(),
            });
        }
        if declared != size {
            warn!("header declares {declared} pixel bytes, a {width}x{height} bitmap has {size}");
        }

        let mut pixels = bytes[offset..offset + size].to_vec();
        if dib_header.height < 0 {
            warn!("top-down bitmap normalized to bottom-up row order");
            let stride = row_stride(width);
            pixels = pixels
                .chunks_exact(stride)
                .rev()
                .flatten()
                .copied()
                .collect();
        }

        if PIXEL_ARRAY_OFFSET + size > u32::MAX as usize {
            return Err(Error::UnsupportedFormat(format!(
                "bitmap of {width}x{height} pixels is too large"
            )));
        }
        file_header.file_size = (PIXEL_ARRAY_OFFSET + size) as u32;
        file_header.pixel_offset = PIXEL_ARRAY_OFFSET as u32;
        dib_header.height = height as i32;
        dib_header.pixel_array_size = size as u32;

        Ok(Self {
            file_header,
            dib_header,
            palette,
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(width: u32, height: u32) -> Bitmap {
        let mut bmp = Bitmap::new(width, height, 691).unwrap();
        for (i, p) in bmp.pixels_mut().iter_mut().enumerate() {
            *p = (i * 7 % 256) as u8;
        }
        bmp
    }

    #[test]
    fn stride() {
        assert_eq!(row_stride(1), 4);
        assert_eq!(row_stride(4), 4);
        assert_eq!(row_stride(5), 8);
        assert_eq!(row_stride(8), 8);
        assert_eq!(row_stride(9), 12);
        assert_eq!(pixel_array_size(9, 3), 36);
    }

    #[test]
    fn palette_is_grayscale() {
        let palette = grayscale_palette();
        assert_eq!(&palette[0..4], &[0, 0, 0, 0]);
        assert_eq!(&palette[4..8], &[1, 1, 1, 0]);
        assert_eq!(&palette[1020..1024], &[255, 255, 255, 0]);
    }

    #[test]
    fn new_bitmap_headers() {
        let bmp = Bitmap::new(9, 3, 42).unwrap();
        assert_eq!(bmp.pixels().len(), 36);
        assert!(bmp.pixels().iter().all(|&p| p == 0));
        assert_eq!(bmp.file_header().file_size, 1078 + 36);
        assert_eq!(bmp.file_header().pixel_offset, 1078);
        assert_eq!(bmp.dib_header().pixel_array_size, 36);
        assert_eq!(bmp.seed(), 42);
        assert_eq!(bmp.shadow_index(), 0);
        assert_eq!(bmp.pixel_count(), 27);
        assert_eq!(bmp.to_bytes().len(), 1078 + 36);
    }

    #[test]
    fn new_bitmap_rejects_empty() {
        assert!(matches!(
            Bitmap::new(0, 3, 0),
            Err(Error::InvalidParameters(_))
        ));
        assert!(matches!(
            Bitmap::new(3, 0, 0),
            Err(Error::InvalidParameters(_))
        ));
    }

    #[test]
    fn serialization_roundtrip() {
        for (w, h) in [(1, 1), (8, 8), (9, 5), (33, 2)] {
            let mut bmp = sample(w, h);
            bmp.set_shadow_index(4);
            let bytes = bmp.to_bytes();
            let decoded = Bitmap::try_deserialize(&bytes).unwrap();
            assert_eq!(decoded, bmp);
            assert_eq!(decoded.to_bytes(), bytes);
        }
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = sample(4, 4).to_bytes();
        bytes[0] = b'X';
        bytes[1] = b'X';
        assert!(matches!(
            Bitmap::try_deserialize(&bytes),
            Err(Error::NotABitmap(0x5858))
        ));
    }

    #[test]
    fn rejects_other_dib_headers() {
        let mut bytes = sample(4, 4).to_bytes();
        bytes[14] = 124;
        assert!(matches!(
            Bitmap::try_deserialize(&bytes),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn rejects_other_depths() {
        let mut bytes = sample(4, 4).to_bytes();
        bytes[28] = 24;
        assert!(matches!(
            Bitmap::try_deserialize(&bytes),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn rejects_truncated() {
        let bytes = sample(4, 4).to_bytes();
        assert!(matches!(
            Bitmap::try_deserialize(&bytes[..10]),
            Err(Error::TruncatedFile { .. })
        ));
        assert!(matches!(
            Bitmap::try_deserialize(&bytes[..500]),
            Err(Error::TruncatedFile { .. })
        ));
        assert!(matches!(
            Bitmap::try_deserialize(&bytes[..bytes.len() - 1]),
            Err(Error::TruncatedFile {
                expected: 1094,
                found: 1093
            })
        ));
    }

    #[test]
    fn zero_file_size_falls_back_to_dib_size() {
        let bmp = sample(5, 3);
        let mut bytes = bmp.to_bytes();
        bytes[2..6].copy_from_slice(&[0, 0, 0, 0]);
        assert_eq!(Bitmap::try_deserialize(&bytes).unwrap(), bmp);
    }

    #[test]
    fn larger_pixel_offset() {
        let bmp = sample(4, 2);
        let mut bytes = bmp.to_bytes();
        // Insert a 4-byte gap between the palette and the pixels.
        let pixels = bytes.split_off(PIXEL_ARRAY_OFFSET);
        bytes.extend_from_slice(&[0xaa; 4]);
        bytes.extend_from_slice(&pixels);
        let len = bytes.len() as u32;
        bytes[2..6].copy_from_slice(&len.to_le_bytes());
        bytes[10..14].copy_from_slice(&(PIXEL_ARRAY_OFFSET as u32 + 4).to_le_bytes());
        assert_eq!(Bitmap::try_deserialize(&bytes).unwrap(), bmp);
    }

    #[test]
    fn top_down_is_flipped() {
        let bmp = sample(3, 2);
        let mut bytes = bmp.to_bytes();
        bytes[22..26].copy_from_slice(&(-2i32).to_le_bytes());
        let decoded = Bitmap::try_deserialize(&bytes).unwrap();
        assert_eq!(decoded.height(), 2);
        assert_eq!(decoded.dib_header().height, 2);
        assert_eq!(&decoded.pixels()[0..4], &bmp.pixels()[4..8]);
        assert_eq!(&decoded.pixels()[4..8], &bmp.pixels()[0..4]);
    }

    #[test]
    fn set_pixels_checks_length() {
        let mut bmp = Bitmap::new(4, 4, 0).unwrap();
        assert!(bmp.set_pixels(vec![1; 15]).is_err());
        assert!(bmp.set_pixels(vec![1; 16]).is_ok());
        assert_eq!(bmp.into_pixels(), vec![1; 16]);
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.bmp");
        let bmp = sample(7, 7);
        bmp.to_file(&path).unwrap();
        assert_eq!(Bitmap::from_file(&path).unwrap(), bmp);

        let missing = dir.path().join("missing.bmp");
        assert!(matches!(
            Bitmap::from_file(missing),
            Err(Error::Io { .. })
        ));
    }
}
