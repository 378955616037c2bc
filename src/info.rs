use crate::error::FormatError;
use crate::header::Header;

/// Image metadata read from the header alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub plane_count: u32,
    pub bit_depth: u32,
    /// Payload bytes the header calls for (`3 * width * height`).
    pub payload_len: usize,
}

impl ImageInfo {
    /// Probe a buffer without touching the payload.
    ///
    /// The header is fully validated (signature, checksum, dimensions).
    pub fn from_bytes(data: &[u8]) -> Result<Self, FormatError> {
        let header = Header::decode(data)?;
        Ok(Self {
            width: header.width,
            height: header.height,
            plane_count: header.plane_count,
            bit_depth: header.bit_depth,
            payload_len: header.payload_len()?,
        })
    }

    /// Whether plane count and bit depth are the standard 3 / 8.
    pub fn is_standard(&self) -> bool {
        self.header().is_standard()
    }

    pub fn header(&self) -> Header {
        Header {
            plane_count: self.plane_count,
            width: self.width,
            height: self.height,
            bit_depth: self.bit_depth,
        }
    }
}
