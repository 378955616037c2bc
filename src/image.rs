//! In-memory IBMT image.

use alloc::vec::Vec;

use crate::error::FormatError;
use crate::header::{Header, STANDARD_BIT_DEPTH, STANDARD_PLANES};
use crate::pixel::{CHANNELS, Rgb, payload_len};

/// Header fields plus an owned, row-major RGB24 pixel buffer.
///
/// The buffer always holds exactly `3 * width * height` bytes and both
/// dimensions are non-zero; every constructor enforces this.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageContainer {
    width: u32,
    height: u32,
    plane_count: u32,
    bit_depth: u32,
    pixels: Vec<u8>,
}

impl ImageContainer {
    /// Standard RGB24 image (plane count 3, bit depth 8) from raw bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, FormatError> {
        Self::builder(width, height).pixels(pixels).build()
    }

    /// Standard RGB24 image from triplets.
    pub fn from_triplets(width: u32, height: u32, pixels: &[Rgb]) -> Result<Self, FormatError> {
        Self::builder(width, height).triplets(pixels).build()
    }

    /// Builder for non-default metadata or a solid fill.
    pub fn builder(width: u32, height: u32) -> ImageBuilder {
        ImageBuilder::new(width, height)
    }

    /// Assemble from a decoded header and a payload that has already been sized.
    pub(crate) fn from_parts(header: Header, pixels: Vec<u8>) -> Self {
        Self {
            width: header.width,
            height: header.height,
            plane_count: header.plane_count,
            bit_depth: header.bit_depth,
            pixels,
        }
    }

    /// Width in pixels, never zero.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels, never zero.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Plane count from the header; the buffer is RGB24 regardless.
    pub fn plane_count(&self) -> u32 {
        self.plane_count
    }

    /// Bit depth from the header; the buffer is 8 bits per channel regardless.
    pub fn bit_depth(&self) -> u32 {
        self.bit_depth
    }

    /// Header fields as they will be written.
    pub fn header(&self) -> Header {
        Header {
            plane_count: self.plane_count,
            width: self.width,
            height: self.height,
            bit_depth: self.bit_depth,
        }
    }

    /// Raw RGB24 bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable pixel bytes. The slice length is fixed, so the size invariant holds.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Give up the container, keeping the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// One row of `3 * width` bytes.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.stride();
        let start = y as usize * stride;
        self.pixels.get(start..start + stride)
    }

    /// The pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        let off = self.offset(x, y)?;
        let p = self.pixels.get(off..off + CHANNELS)?;
        Some([p[0], p[1], p[2]])
    }

    /// Overwrite one pixel. Returns `false` if `(x, y)` is out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: Rgb) -> bool {
        let Some(off) = self.offset(x, y) else {
            return false;
        };
        match self.pixels.get_mut(off..off + CHANNELS) {
            Some(dst) => {
                dst.copy_from_slice(&rgb);
                true
            }
            None => false,
        }
    }

    /// Pixels as triplets in row-major order.
    pub fn triplets(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|c| [c[0], c[1], c[2]])
    }

    /// Re-check the container invariants.
    pub(crate) fn validate(&self) -> Result<(), FormatError> {
        validate_parts(self.width, self.height, self.pixels.len())
    }

    fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.stride() + x as usize * CHANNELS)
    }
}

fn validate_parts(width: u32, height: u32, len: usize) -> Result<(), FormatError> {
    if width == 0 || height == 0 {
        return Err(FormatError::InvalidDimensions { width, height });
    }
    let expected = payload_len(width, height)?;
    if len != expected {
        return Err(FormatError::SizeMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Builder for [`ImageContainer`].
///
/// Defaults to plane count 3 and bit depth 8. Without pixel data the image
/// is filled with black.
#[derive(Clone, Debug)]
pub struct ImageBuilder {
    width: u32,
    height: u32,
    plane_count: u32,
    bit_depth: u32,
    source: PixelSource,
}

#[derive(Clone, Debug)]
enum PixelSource {
    Fill(Rgb),
    Bytes(Vec<u8>),
}

impl ImageBuilder {
    /// Standard RGB24 builder, black until pixels are supplied.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            plane_count: STANDARD_PLANES,
            bit_depth: STANDARD_BIT_DEPTH,
            source: PixelSource::Fill([0, 0, 0]),
        }
    }

    /// Plane count to record in the header. Does not change the payload layout.
    pub fn plane_count(mut self, plane_count: u32) -> Self {
        self.plane_count = plane_count;
        self
    }

    /// Bit depth to record in the header. Does not change the payload layout.
    pub fn bit_depth(mut self, bit_depth: u32) -> Self {
        self.bit_depth = bit_depth;
        self
    }

    /// Raw RGB24 bytes; must be exactly `3 * width * height` long.
    pub fn pixels(mut self, pixels: Vec<u8>) -> Self {
        self.source = PixelSource::Bytes(pixels);
        self
    }

    /// Pixel triplets; must be exactly `width * height` of them.
    pub fn triplets(mut self, pixels: &[Rgb]) -> Self {
        self.source = PixelSource::Bytes(pixels.iter().flatten().copied().collect());
        self
    }

    /// Fill every pixel with one color.
    pub fn fill(mut self, rgb: Rgb) -> Self {
        self.source = PixelSource::Fill(rgb);
        self
    }

    /// Validate and assemble the container.
    ///
    /// Fails with `SizeMismatch` if supplied pixels are the wrong length, and
    /// with `DimensionsTooLarge` if a fill buffer cannot be allocated.
    pub fn build(self) -> Result<ImageContainer, FormatError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(FormatError::InvalidDimensions { width, height });
        }
        let len = payload_len(width, height)?;
        let pixels = match self.source {
            PixelSource::Fill(rgb) => {
                let mut buf = Vec::new();
                buf.try_reserve_exact(len)
                    .map_err(|_| FormatError::DimensionsTooLarge { width, height })?;
                if rgb == [0, 0, 0] {
                    buf.resize(len, 0);
                } else {
                    for _ in 0..len / CHANNELS {
                        buf.extend_from_slice(&rgb);
                    }
                }
                buf
            }
            PixelSource::Bytes(bytes) => bytes,
        };
        validate_parts(width, height, pixels.len())?;
        Ok(ImageContainer {
            width,
            height,
            plane_count: self.plane_count,
            bit_depth: self.bit_depth,
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn builder_defaults_are_standard() {
        let img = ImageContainer::builder(4, 2).build().unwrap();
        assert_eq!(img.plane_count(), 3);
        assert_eq!(img.bit_depth(), 8);
        assert_eq!(img.pixels().len(), 24);
        assert!(img.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn builder_fill_and_access() {
        let mut img = ImageContainer::builder(3, 2).fill([1, 2, 3]).build().unwrap();
        assert_eq!(img.pixel(2, 1), Some([1, 2, 3]));
        assert!(img.set_pixel(0, 1, [9, 8, 7]));
        assert_eq!(img.row(1).unwrap(), &[9, 8, 7, 1, 2, 3, 1, 2, 3]);
        assert_eq!(img.pixel(3, 0), None);
        assert!(!img.set_pixel(0, 2, [0, 0, 0]));
        assert_eq!(img.row(2), None);
    }

    #[test]
    fn new_rejects_wrong_length() {
        match ImageContainer::new(2, 2, vec![0; 11]) {
            Err(FormatError::SizeMismatch {
                expected: 12,
                actual: 11,
            }) => {}
            other => panic!("expected SizeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn new_rejects_zero_height() {
        assert!(matches!(
            ImageContainer::new(2, 0, Vec::new()),
            Err(FormatError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn huge_fill_is_an_error() {
        assert!(matches!(
            ImageContainer::builder(u32::MAX, 1 << 30).build(),
            Err(FormatError::DimensionsTooLarge { .. })
        ));
        assert!(matches!(
            ImageContainer::builder(u32::MAX, 1 << 30).fill([1, 2, 3]).build(),
            Err(FormatError::DimensionsTooLarge { .. })
        ));
    }

    #[test]
    fn triplets_with_wrong_count() {
        match ImageContainer::from_triplets(2, 2, &[[0, 0, 0]; 3]) {
            Err(FormatError::SizeMismatch {
                expected: 12,
                actual: 9,
            }) => {}
            other => panic!("expected SizeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn triplets_roundtrip() {
        let px = [[1, 2, 3], [4, 5, 6]];
        let img = ImageContainer::from_triplets(2, 1, &px).unwrap();
        assert_eq!(img.triplets().collect::<Vec<_>>(), px.to_vec());
    }
}
