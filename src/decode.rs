use alloc::format;
use alloc::vec::Vec;

use enough::Stop;

use crate::error::FormatError;
use crate::header::{HEADER_LEN, Header};
use crate::image::ImageContainer;
use crate::info::ImageInfo;
use crate::limits::{self, Limits};
use crate::pixel::{self, Rgb};

/// How to treat plane count / bit depth values other than 3 / 8.
///
/// The payload is RGB24 whatever the header says, so these fields never
/// change how many bytes are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataPolicy {
    /// Keep the values verbatim and log a warning.
    #[default]
    Lenient,
    /// Reject with [`FormatError::UnsupportedMetadata`].
    Strict,
}

impl MetadataPolicy {
    pub(crate) fn apply(self, header: &Header) -> Result<(), FormatError> {
        if header.is_standard() {
            return Ok(());
        }
        match self {
            MetadataPolicy::Lenient => {
                log::warn!(
                    "non-standard IBMT metadata (planes={}, depth={}); reading payload as RGB24",
                    header.plane_count,
                    header.bit_depth
                );
                Ok(())
            }
            MetadataPolicy::Strict => Err(FormatError::UnsupportedMetadata(format!(
                "planes={} depth={} (expected planes=3 depth=8)",
                header.plane_count, header.bit_depth
            ))),
        }
    }
}

/// Decode request for an in-memory IBMT file.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    policy: MetadataPolicy,
}

impl<'a> DecodeRequest<'a> {
    /// Request over a complete IBMT file held in memory.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            policy: MetadataPolicy::default(),
        }
    }

    /// Refuse images over `limits` before the payload is copied.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// How to treat plane count / bit depth other than 3 / 8. Default: lenient.
    pub fn with_metadata_policy(mut self, policy: MetadataPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Parse the header only; the payload is not checked.
    pub fn probe(&self) -> Result<ImageInfo, FormatError> {
        ImageInfo::from_bytes(self.data)
    }

    /// Decode into an owned [`ImageContainer`].
    pub fn decode(self, stop: impl Stop) -> Result<ImageContainer, FormatError> {
        let (header, payload) = self.prepare()?;
        stop.check()?;
        let mut pixels = Vec::new();
        pixel::copy_rows(payload, header.width, &mut pixels, &stop)?;
        Ok(ImageContainer::from_parts(header, pixels))
    }

    /// Decode straight to triplets, returning the header alongside.
    pub fn decode_triplets(self, stop: impl Stop) -> Result<(Header, Vec<Rgb>), FormatError> {
        let (header, payload) = self.prepare()?;
        stop.check()?;
        let pixels = pixel::decode_pixels(payload, header.width, header.height, &stop)?;
        Ok((header, pixels))
    }

    /// Header decode, policy, limits, and payload bounds.
    fn prepare(&self) -> Result<(Header, &'a [u8]), FormatError> {
        let header = Header::decode(self.data)?;
        log::trace!(
            "IBMT header: {}x{} planes={} depth={}",
            header.width,
            header.height,
            header.plane_count,
            header.bit_depth
        );
        self.policy.apply(&header)?;

        let needed = limits::admit(self.limits, &header)?;

        let rest = &self.data[HEADER_LEN..];
        let payload = pixel::payload_slice(rest, header.width, header.height)?;
        if rest.len() > needed {
            log::debug!("ignoring {} trailing bytes after payload", rest.len() - needed);
        }
        Ok((header, payload))
    }
}
