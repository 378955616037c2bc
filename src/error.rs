use alloc::string::String;
use enough::StopReason;

/// Errors from IBMT decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("bad signature: expected \"IBMT\"")]
    BadSignature,

    #[error("header checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("truncated payload: need {needed} bytes, got {actual}")]
    TruncatedPayload { needed: usize, actual: usize },

    #[error("truncated header: need 24 bytes, got {actual}")]
    TruncatedHeader { actual: usize },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("unsupported metadata: {0}")]
    UnsupportedMetadata(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for FormatError {
    fn from(r: StopReason) -> Self {
        FormatError::Cancelled(r)
    }
}
