//! # ibmt
//!
//! Decoder and encoder for the Interleaved Bitmap (IBMT) raster format.
//!
//! ## Format
//!
//! ```text
//! 0x00  "IBMT"
//! 0x04  plane_count  u32 LE   (informational, normally 3)
//! 0x08  width        u32 LE   (> 0)
//! 0x0C  height       u32 LE   (> 0)
//! 0x10  bit_depth    u32 LE   (informational, normally 8)
//! 0x14  checksum     u32 LE   sum of bytes 0x00..0x14, wrapping
//! 0x18  width * height RGB triplets, row-major, no row padding
//! ```
//!
//! A file is exactly `24 + 3 * width * height` bytes. The payload is always
//! RGB24; plane count and bit depth are carried verbatim but never change
//! the layout. See [`MetadataPolicy`] for how non-standard values are
//! treated on decode.
//!
//! ## Non-Goals
//!
//! - Compression or any pixel transform
//! - Color spaces other than raw RGB triplets
//! - Incremental parsing; buffer the whole file first (or use [`read_image`])
//!
//! ## Usage
//!
//! ```no_run
//! use ibmt::{DecodeRequest, EncodeRequest, ImageContainer, ImageInfo, Unstoppable};
//!
//! let image = ImageContainer::from_triplets(2, 1, &[[255, 0, 0], [0, 255, 0]])?;
//! let bytes = ibmt::encode_image(&image)?;
//! assert_eq!(bytes.len(), 24 + 6);
//!
//! // Probe without decoding
//! let info = ImageInfo::from_bytes(&bytes)?;
//! println!("{}x{}", info.width, info.height);
//!
//! // Decode with limits and cancellation
//! let limits = ibmt::Limits { max_pixels: Some(1 << 24), ..Default::default() };
//! let decoded = DecodeRequest::new(&bytes)
//!     .with_limits(&limits)
//!     .decode(Unstoppable)?;
//! assert_eq!(decoded, image);
//!
//! let again = EncodeRequest::new().encode(&decoded, Unstoppable)?;
//! assert_eq!(again, bytes);
//! # Ok::<(), ibmt::FormatError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod encode;
mod error;
mod header;
mod image;
mod info;
mod limits;
mod pixel;

#[cfg(feature = "std")]
mod io;

#[cfg(feature = "rgb")]
mod typed;

use alloc::vec::Vec;

// Re-exports
pub use decode::{DecodeRequest, MetadataPolicy};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::FormatError;
pub use header::{HEADER_LEN, Header, SIGNATURE, STANDARD_BIT_DEPTH, STANDARD_PLANES, checksum};
pub use image::{ImageBuilder, ImageContainer};
pub use info::ImageInfo;
pub use limits::Limits;
pub use pixel::{CHANNELS, Rgb, decode_pixels, encode_pixels, payload_len};

#[cfg(feature = "std")]
pub use io::{read_image, read_image_with, write_image};

/// Encode an image to IBMT bytes.
pub fn encode_image(image: &ImageContainer) -> Result<Vec<u8>, FormatError> {
    EncodeRequest::new().encode(image, Unstoppable)
}

/// Decode IBMT bytes with default settings (no limits, lenient metadata).
pub fn decode_image(data: &[u8]) -> Result<ImageContainer, FormatError> {
    DecodeRequest::new(data).decode(Unstoppable)
}
