//! Typed pixel views via the `rgb` and `imgref` crates.

use alloc::vec::Vec;

use rgb::AsPixels as _;
use rgb::RGB8;

use crate::error::FormatError;
use crate::image::ImageContainer;

impl ImageContainer {
    /// Zero-copy view of the payload as [`RGB8`] pixels.
    pub fn as_rgb(&self) -> &[RGB8] {
        self.pixels().as_pixels()
    }

    /// Standard RGB24 image from typed pixels.
    pub fn from_rgb(width: u32, height: u32, pixels: &[RGB8]) -> Result<Self, FormatError> {
        let bytes: Vec<u8> = pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect();
        Self::new(width, height, bytes)
    }

    /// Zero-copy 2D view.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, RGB8> {
        imgref::ImgRef::new(self.as_rgb(), self.width() as usize, self.height() as usize)
    }

    /// Owned 2D copy.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<RGB8> {
        imgref::ImgVec::new(
            self.as_rgb().to_vec(),
            self.width() as usize,
            self.height() as usize,
        )
    }

    /// Copy from a 2D view. Any stride padding in `img` is dropped.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, RGB8>) -> Result<Self, FormatError> {
        let (Ok(width), Ok(height)) = (u32::try_from(img.width()), u32::try_from(img.height()))
        else {
            return Err(FormatError::DimensionsTooLarge {
                width: img.width().min(u32::MAX as usize) as u32,
                height: img.height().min(u32::MAX as usize) as u32,
            });
        };
        let bytes: Vec<u8> = img
            .rows()
            .flat_map(|row| row.iter().flat_map(|p| [p.r, p.g, p.b]))
            .collect();
        Self::new(width, height, bytes)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn rgb_view_matches_bytes() {
        let img = ImageContainer::new(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(img.as_rgb(), &[RGB8::new(1, 2, 3), RGB8::new(4, 5, 6)]);
        let back = ImageContainer::from_rgb(2, 1, img.as_rgb()).unwrap();
        assert_eq!(back, img);
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn imgref_roundtrip() {
        let pixels = vec![
            RGB8::new(255, 0, 0),
            RGB8::new(0, 255, 0),
            RGB8::new(0, 0, 255),
            RGB8::new(128, 128, 128),
        ];
        let img = imgref::ImgVec::new(pixels.clone(), 2, 2);
        let container = ImageContainer::from_imgref(img.as_ref()).unwrap();
        assert_eq!(container.width(), 2);
        assert_eq!(container.to_imgvec().buf().as_slice(), &pixels[..]);
        assert_eq!(container.as_imgref().width(), 2);
    }
}
