/// Pixel memory layout.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 channels, 8-bit RGB.
    Rgb8,
    /// 3 channels, 8-bit BGR (the on-disk order of 24-bit BMP).
    Bgr8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Rgb8 | Self::Bgr8 => 3,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Rgb8 | Self::Bgr8 => 3,
        }
    }

    /// Whether this layout has the same memory representation as `other`.
    pub fn is_memory_compatible(&self, other: PixelLayout) -> bool {
        *self == other
    }
}

/// Typed pixel that maps onto a [`PixelLayout`].
///
/// Implemented for [`rgb::RGB8`] and [`rgb::alt::BGR8`]. Used by
/// [`DecodeOutput::as_pixels`](crate::DecodeOutput::as_pixels) and the
/// `imgref` helpers to check that a typed view matches the decoded bytes.
#[cfg(feature = "rgb")]
pub trait BmpPixel: Copy {
    /// The layout this pixel type occupies in memory.
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl BmpPixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}

#[cfg(feature = "rgb")]
impl BmpPixel for rgb::alt::BGR8 {
    fn layout() -> PixelLayout {
        PixelLayout::Bgr8
    }
}
