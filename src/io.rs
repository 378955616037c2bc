//! `std::io` entry points.
//!
//! The reader consumes exactly the header and the payload the header calls
//! for; nothing past the payload is read from the source.

use std::io::{ErrorKind, Read, Write};

use enough::{Stop, Unstoppable};

use crate::decode::MetadataPolicy;
use crate::error::FormatError;
use crate::header::{HEADER_LEN, Header};
use crate::image::ImageContainer;
use crate::limits::Limits;
use crate::pixel::{CHANNELS, ROWS_PER_CHECK};

/// Write header then payload to `sink`.
///
/// A failing sink may be left holding a partial file; discarding it is up
/// to the caller. The image itself is never modified.
pub fn write_image<W: Write>(image: &ImageContainer, mut sink: W) -> Result<(), FormatError> {
    image.validate()?;
    let header = image.header();
    sink.write_all(&header.encode())?;
    let stride = header.width as usize * CHANNELS;
    for rows in image.pixels().chunks(stride.saturating_mul(ROWS_PER_CHECK).max(1)) {
        sink.write_all(rows)?;
    }
    sink.flush()?;
    Ok(())
}

/// Read one image from `source` with no limits and the lenient metadata policy.
pub fn read_image<R: Read>(source: R) -> Result<ImageContainer, FormatError> {
    read_image_with(
        source,
        &Limits::default(),
        MetadataPolicy::default(),
        Unstoppable,
    )
}

/// Read one image, applying `limits` before any payload is read.
pub fn read_image_with<R: Read>(
    mut source: R,
    limits: &Limits,
    policy: MetadataPolicy,
    stop: impl Stop,
) -> Result<ImageContainer, FormatError> {
    let mut head = [0u8; HEADER_LEN];
    let got = fill(&mut source, &mut head)?;
    let header = Header::decode(&head[..got])?;
    log::trace!(
        "IBMT header: {}x{} planes={} depth={}",
        header.width,
        header.height,
        header.plane_count,
        header.bit_depth
    );
    policy.apply(&header)?;

    let needed = limits.admit(&header)?;
    stop.check()?;

    // Sized by bytes actually read, never by the header's claim.
    let mut pixels = Vec::new();
    source.take(needed as u64).read_to_end(&mut pixels)?;
    if pixels.len() < needed {
        return Err(FormatError::TruncatedPayload {
            needed,
            actual: pixels.len(),
        });
    }
    Ok(ImageContainer::from_parts(header, pixels))
}

/// Read until `buf` is full or the source hits EOF. Returns bytes read.
fn fill<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize, FormatError> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
