use crate::error::FormatError;
use crate::header::Header;

/// Caps on the image a decode or encode will accept.
///
/// All fields default to `None` (no limit). Decoders apply them right after
/// the header is parsed, so a hostile header is refused before any pixel
/// buffer exists.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum payload size in bytes (`3 * width * height`).
    pub max_payload_bytes: Option<u64>,
}

impl Limits {
    /// Check `header` against every cap and return its payload length.
    pub(crate) fn admit(&self, header: &Header) -> Result<usize, FormatError> {
        let payload = header.payload_len()?;
        let pixels = u64::from(header.width) * u64::from(header.height);
        let checks = [
            ("width", u64::from(header.width), self.max_width),
            ("height", u64::from(header.height), self.max_height),
            ("pixel count", pixels, self.max_pixels),
            ("payload bytes", payload as u64, self.max_payload_bytes),
        ];
        for (what, value, cap) in checks {
            if let Some(cap) = cap.filter(|&cap| value > cap) {
                return Err(FormatError::LimitExceeded(alloc::format!(
                    "{}x{} image: {what} {value} exceeds limit {cap}",
                    header.width,
                    header.height
                )));
            }
        }
        Ok(payload)
    }
}

/// Payload length for `header`, checked against `limits` when present.
pub(crate) fn admit(limits: Option<&Limits>, header: &Header) -> Result<usize, FormatError> {
    match limits {
        Some(limits) => limits.admit(header),
        None => header.payload_len(),
    }
}
