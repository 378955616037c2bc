//! IBMT header codec.
//!
//! The header is a fixed 24 bytes: the `IBMT` signature followed by five
//! little-endian u32 fields (plane count, width, height, bit depth,
//! checksum). The checksum is the byte sum, modulo 2^32, of the 20 bytes
//! that precede it. It never covers the payload.

use crate::error::FormatError;
use crate::pixel::payload_len;

/// Magic bytes at offset 0.
pub const SIGNATURE: [u8; 4] = *b"IBMT";

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 24;

/// Plane count written by default (R, G, B).
pub const STANDARD_PLANES: u32 = 3;

/// Bit depth written by default.
pub const STANDARD_BIT_DEPTH: u32 = 8;

const CHECKSUM_OFFSET: usize = 20;

/// Additive checksum: sum of all bytes, wrapping at 2^32.
pub fn checksum(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(0u32, |acc, &b| acc.wrapping_add(u32::from(b)))
}

/// The four semantic header fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    /// Informational; the payload is always RGB triplets.
    pub plane_count: u32,
    pub width: u32,
    pub height: u32,
    /// Informational; the payload is always 8 bits per channel.
    pub bit_depth: u32,
}

impl Header {
    /// Header for a standard RGB24 image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            plane_count: STANDARD_PLANES,
            width,
            height,
            bit_depth: STANDARD_BIT_DEPTH,
        }
    }

    /// Whether plane count and bit depth match the RGB24 layout of the payload.
    pub fn is_standard(&self) -> bool {
        self.plane_count == STANDARD_PLANES && self.bit_depth == STANDARD_BIT_DEPTH
    }

    /// Payload size in bytes (`3 * width * height`).
    pub fn payload_len(&self) -> Result<usize, FormatError> {
        payload_len(self.width, self.height)
    }

    /// Total file size in bytes (header plus payload).
    pub fn file_len(&self) -> Result<usize, FormatError> {
        self.payload_len()?
            .checked_add(HEADER_LEN)
            .ok_or(FormatError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }

    /// Serialize to the 24-byte on-disk form, checksum included.
    ///
    /// Fields are written verbatim; no validation happens here.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&SIGNATURE);
        out[4..8].copy_from_slice(&self.plane_count.to_le_bytes());
        out[8..12].copy_from_slice(&self.width.to_le_bytes());
        out[12..16].copy_from_slice(&self.height.to_le_bytes());
        out[16..20].copy_from_slice(&self.bit_depth.to_le_bytes());
        let sum = checksum(&out[..CHECKSUM_OFFSET]);
        out[CHECKSUM_OFFSET..HEADER_LEN].copy_from_slice(&sum.to_le_bytes());
        out
    }

    /// Parse and validate the header at the start of `data`.
    ///
    /// Checks run in order: signature, length, checksum, dimensions.
    /// Bytes past the first 24 are not looked at.
    pub fn decode(data: &[u8]) -> Result<Self, FormatError> {
        if data.get(0..4) != Some(&SIGNATURE[..]) {
            return Err(FormatError::BadSignature);
        }
        let bytes = data
            .get(..HEADER_LEN)
            .ok_or(FormatError::TruncatedHeader { actual: data.len() })?;

        let stored = read_u32_le(bytes, CHECKSUM_OFFSET);
        let computed = checksum(&bytes[..CHECKSUM_OFFSET]);
        if stored != computed {
            return Err(FormatError::ChecksumMismatch { stored, computed });
        }

        let header = Self {
            plane_count: read_u32_le(bytes, 4),
            width: read_u32_le(bytes, 8),
            height: read_u32_le(bytes, 12),
            bit_depth: read_u32_le(bytes, 16),
        };
        if header.width == 0 || header.height == 0 {
            return Err(FormatError::InvalidDimensions {
                width: header.width,
                height: header.height,
            });
        }
        Ok(header)
    }
}

fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
