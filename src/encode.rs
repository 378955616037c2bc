use alloc::vec::Vec;

use enough::Stop;

use crate::error::FormatError;
use crate::header::{HEADER_LEN, Header};
use crate::image::ImageContainer;
use crate::limits::{self, Limits};
use crate::pixel::{self, Rgb};

/// Encode request producing IBMT bytes.
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> EncodeRequest<'a> {
    /// Request with no limits.
    pub fn new() -> Self {
        Self { limits: None }
    }

    /// Refuse images over `limits` before any output is produced.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Encode a container: header, then payload. Output is exactly
    /// `24 + 3 * width * height` bytes.
    pub fn encode(&self, image: &ImageContainer, stop: impl Stop) -> Result<Vec<u8>, FormatError> {
        let mut out = Vec::new();
        self.encode_into(image, &mut out, stop)?;
        Ok(out)
    }

    /// Append the encoded file to `out`.
    ///
    /// On error `out` may hold a partial file; the image is never touched.
    pub fn encode_into(
        &self,
        image: &ImageContainer,
        out: &mut Vec<u8>,
        stop: impl Stop,
    ) -> Result<(), FormatError> {
        image.validate()?;
        let header = image.header();
        let len = limits::admit(self.limits, &header)?;
        log::trace!(
            "encoding IBMT {}x{} planes={} depth={}",
            header.width,
            header.height,
            header.plane_count,
            header.bit_depth
        );
        out.reserve(HEADER_LEN + len);
        out.extend_from_slice(&header.encode());
        pixel::copy_rows(image.pixels(), header.width, out, &stop)
    }

    /// Encode raw RGB24 bytes with the standard plane count and bit depth.
    ///
    /// `pixels` must be exactly `3 * width * height` bytes; it is never
    /// truncated or padded.
    pub fn encode_rgb(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<u8>, FormatError> {
        if width == 0 || height == 0 {
            return Err(FormatError::InvalidDimensions { width, height });
        }
        let header = Header::new(width, height);
        let expected = limits::admit(self.limits, &header)?;
        if pixels.len() != expected {
            return Err(FormatError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        let mut out = Vec::with_capacity(HEADER_LEN + expected);
        out.extend_from_slice(&header.encode());
        pixel::copy_rows(pixels, width, &mut out, &stop)?;
        Ok(out)
    }

    /// Encode triplets with the standard plane count and bit depth.
    ///
    /// Limits are checked before the payload is built.
    pub fn encode_triplets(
        &self,
        pixels: &[Rgb],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<u8>, FormatError> {
        let header = Header::new(width, height);
        limits::admit(self.limits, &header)?;
        let payload = pixel::encode_pixels(pixels, width, height, &stop)?;

        let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
        out.extend_from_slice(&header.encode());
        out.extend_from_slice(&payload);
        Ok(out)
    }
}
