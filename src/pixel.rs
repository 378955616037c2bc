//! Interleaved RGB payload codec.
//!
//! The payload is `width * height` triplets of (R, G, B), row-major, top to
//! bottom. Row stride is exactly `3 * width` bytes; rows are never padded.

use alloc::vec::Vec;
use enough::Stop;

use crate::error::FormatError;

/// One pixel: `[r, g, b]`.
pub type Rgb = [u8; 3];

/// Bytes per pixel in the payload.
pub const CHANNELS: usize = 3;

/// Rows processed between cancellation checks.
pub(crate) const ROWS_PER_CHECK: usize = 16;

/// Payload size in bytes for a `width` x `height` image.
///
/// Sizes no allocation could hold (over `isize::MAX`) are `DimensionsTooLarge`.
pub fn payload_len(width: u32, height: u32) -> Result<usize, FormatError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(CHANNELS))
        .filter(|&len| len <= isize::MAX as usize)
        .ok_or(FormatError::DimensionsTooLarge { width, height })
}

fn check_dimensions(width: u32, height: u32) -> Result<(), FormatError> {
    if width == 0 || height == 0 {
        return Err(FormatError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Serialize triplets to the payload byte stream.
///
/// `pixels` must hold exactly `width * height` triplets.
pub fn encode_pixels(
    pixels: &[Rgb],
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, FormatError> {
    check_dimensions(width, height)?;
    let expected = payload_len(width, height)?;
    let actual = pixels.len().saturating_mul(CHANNELS);
    if actual != expected {
        return Err(FormatError::SizeMismatch { expected, actual });
    }

    let mut out = Vec::with_capacity(expected);
    for (row_idx, row) in pixels.chunks_exact(width as usize).enumerate() {
        if row_idx % ROWS_PER_CHECK == 0 {
            stop.check()?;
        }
        for px in row {
            out.extend_from_slice(px);
        }
    }
    Ok(out)
}

/// Parse the payload into triplets.
///
/// `data` starts at the first payload byte. Bytes beyond
/// `3 * width * height` are ignored.
pub fn decode_pixels(
    data: &[u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<Vec<Rgb>, FormatError> {
    let payload = payload_slice(data, width, height)?;

    let mut out = Vec::with_capacity(width as usize * height as usize);
    for (row_idx, row) in payload.chunks_exact(width as usize * CHANNELS).enumerate() {
        if row_idx % ROWS_PER_CHECK == 0 {
            stop.check()?;
        }
        out.extend(row.chunks_exact(CHANNELS).map(|c| [c[0], c[1], c[2]]));
    }
    Ok(out)
}

/// The exact payload region of `data`, or `TruncatedPayload`.
pub(crate) fn payload_slice(data: &[u8], width: u32, height: u32) -> Result<&[u8], FormatError> {
    check_dimensions(width, height)?;
    let needed = payload_len(width, height)?;
    data.get(..needed).ok_or(FormatError::TruncatedPayload {
        needed,
        actual: data.len(),
    })
}

/// Copy an already-flat RGB24 payload, checking `stop` between row batches.
pub(crate) fn copy_rows(
    payload: &[u8],
    width: u32,
    out: &mut Vec<u8>,
    stop: &dyn Stop,
) -> Result<(), FormatError> {
    let stride = width as usize * CHANNELS;
    let batch = stride.saturating_mul(ROWS_PER_CHECK).max(1);
    out.reserve(payload.len());
    for chunk in payload.chunks(batch) {
        stop.check()?;
        out.extend_from_slice(chunk);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use enough::Unstoppable;

    #[test]
    fn payload_len_rejects_unaddressable_sizes() {
        assert_eq!(payload_len(3, 2).unwrap(), 18);
        assert!(matches!(
            payload_len(u32::MAX, 1 << 30),
            Err(FormatError::DimensionsTooLarge { .. })
        ));
        assert!(matches!(
            payload_len(u32::MAX, u32::MAX),
            Err(FormatError::DimensionsTooLarge { .. })
        ));
    }

    #[test]
    fn encode_two_pixels() {
        let out = encode_pixels(&[[255, 0, 0], [0, 255, 0]], 2, 1, &Unstoppable).unwrap();
        assert_eq!(out, vec![0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00]);
    }

    #[test]
    fn rows_are_not_padded() {
        // width 1 -> stride 3, a padded format would use 4
        let pixels = [[1, 2, 3], [4, 5, 6], [7, 8, 9]];
        let out = encode_pixels(&pixels, 1, 3, &Unstoppable).unwrap();
        assert_eq!(out, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn encode_rejects_wrong_count() {
        match encode_pixels(&[[0, 0, 0]; 5], 3, 2, &Unstoppable) {
            Err(FormatError::SizeMismatch {
                expected: 18,
                actual: 15,
            }) => {}
            other => panic!("expected SizeMismatch, got {other:?}"),
        }
        assert!(matches!(
            encode_pixels(&[[0, 0, 0]; 7], 3, 2, &Unstoppable),
            Err(FormatError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn encode_rejects_zero_width() {
        assert!(matches!(
            encode_pixels(&[], 0, 4, &Unstoppable),
            Err(FormatError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn decode_ignores_trailing() {
        let data = [10, 20, 30, 40, 50, 60, 0xEE, 0xEE];
        let px = decode_pixels(&data, 1, 2, &Unstoppable).unwrap();
        assert_eq!(px, vec![[10, 20, 30], [40, 50, 60]]);
    }

    #[test]
    fn decode_detects_truncation() {
        match decode_pixels(&[0u8; 17], 3, 2, &Unstoppable) {
            Err(FormatError::TruncatedPayload {
                needed: 18,
                actual: 17,
            }) => {}
            other => panic!("expected TruncatedPayload, got {other:?}"),
        }
    }

    #[test]
    fn copy_rows_copies_everything() {
        let payload: Vec<u8> = (0..=255u8).cycle().take(3 * 5 * 40).collect();
        let mut out = Vec::new();
        copy_rows(&payload, 5, &mut out, &Unstoppable).unwrap();
        assert_eq!(out, payload);
    }
}
