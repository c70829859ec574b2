//! BMP decoding: validate headers, then walk the bottom-up rows into a
//! packed top-down buffer.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use crate::error::BmpError;
use crate::header;
use crate::limits::Limits;
use crate::pixel::PixelLayout;

// ── Decoded output ──────────────────────────────────────────────────

/// Decoded image: packed rows, top row first, no padding.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
}

impl DecodeOutput {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_vec(self) -> Vec<u8> {
        self.pixels
    }

    /// Reinterpret pixel data as a typed pixel slice.
    ///
    /// Returns [`BmpError::LayoutMismatch`] if the pixel layout doesn't
    /// match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::BmpPixel>(&self) -> Result<&[P], BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if !self.layout.is_memory_compatible(P::layout()) {
            return Err(BmpError::LayoutMismatch {
                expected: P::layout(),
                actual: self.layout,
            });
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Returns [`BmpError::LayoutMismatch`] if the pixel layout doesn't
    /// match `P`.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::BmpPixel>(&self) -> Result<imgref::ImgRef<'_, P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        let width = self.width as usize;
        // imgref insists on a nonzero stride, even for an empty image
        Ok(imgref::Img::new_stride(
            pixels,
            width,
            self.height as usize,
            width.max(1),
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    ///
    /// Returns [`BmpError::LayoutMismatch`] if the pixel layout doesn't
    /// match `P`.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::BmpPixel>(&self) -> Result<imgref::ImgVec<P>, BmpError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        let width = self.width as usize;
        Ok(imgref::Img::new_stride(
            pixels.to_vec(),
            width,
            self.height as usize,
            width.max(1),
        ))
    }
}

// ── Decode request ──────────────────────────────────────────────────

/// Configurable decode: resource limits, native byte order.
///
/// The plain [`decode_bmp`] function covers the common case.
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    native_order: bool,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            native_order: false,
        }
    }

    /// Enforce resource limits while decoding.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Keep pixels in the file's BGR byte order instead of converting
    /// to RGB. Skips the per-pixel swizzle.
    pub fn with_native_order(mut self, native: bool) -> Self {
        self.native_order = native;
        self
    }

    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput, BmpError> {
        decode_inner(self.data, self.limits, self.native_order, &stop)
    }
}

// ── Entry points ────────────────────────────────────────────────────

/// Decode an uncompressed 24-bit BMP into packed top-down RGB rows.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, BmpError> {
    decode_inner(data, None, false, &stop)
}

/// Like [`decode_bmp`], but keeps the file's BGR byte order.
pub fn decode_bmp_native(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, BmpError> {
    decode_inner(data, None, true, &stop)
}

fn decode_inner(
    data: &[u8],
    limits: Option<&Limits>,
    native_order: bool,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BmpError> {
    let parsed = header::parse_header(data)?;
    let width = parsed.width;
    let height = parsed.height;

    if let Some(limits) = limits {
        limits.check(width, height)?;
    }

    let layout = if native_order {
        PixelLayout::Bgr8
    } else {
        PixelLayout::Rgb8
    };

    // Everything the file must contain: headers, any gap before the pixel
    // array, and height full rows (each padded, the last one included).
    let stride = header::row_stride(width);
    let needed = stride
        .checked_mul(u64::from(height))
        .and_then(|px| px.checked_add(u64::from(parsed.pixel_data_offset)))
        .ok_or(BmpError::DimensionsTooLarge {
            width: u64::from(width),
            height: u64::from(height),
        })?;
    if needed > data.len() as u64 {
        return Err(BmpError::UnexpectedEof);
    }

    let w = width as usize;
    let h = height as usize;
    let out_size = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(3))
        .ok_or(BmpError::DimensionsTooLarge {
            width: u64::from(width),
            height: u64::from(height),
        })?;
    if let Some(limits) = limits {
        limits.check_memory(out_size)?;
    }

    // A valid header with an empty pixel array.
    if w == 0 || h == 0 {
        return Ok(DecodeOutput {
            pixels: Vec::new(),
            width,
            height,
            layout,
        });
    }

    stop.check()?;

    let mut pixels = vec![0u8; out_size];
    let row_bytes = w * 3;
    // Fits: needed <= data.len() and h >= 1, so stride <= needed.
    let stride = stride as usize;

    // File rows run bottom-up, output rows top-down: the first row read
    // lands at the bottom of the output.
    let mut pos = parsed.pixel_data_offset as usize;
    for (row_idx, out_row) in pixels.rchunks_exact_mut(row_bytes).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        out_row.copy_from_slice(&data[pos..pos + row_bytes]);
        if !native_order {
            for pix in out_row.chunks_exact_mut(3) {
                pix.swap(0, 2);
            }
        }
        pos += stride;
    }

    Ok(DecodeOutput {
        pixels,
        width,
        height,
        layout,
    })
}

// ── Stream adapter ──────────────────────────────────────────────────

/// Decode from a reader without slurping the file into memory first.
///
/// Reads the 54 header bytes, then one padded row at a time, so input
/// buffering beyond the output image is a single row. The output buffer
/// is sized from the header dimensions alone; for untrusted input use
/// [`read_bmp_with_limits`] (or [`DecodeRequest`] over a slice) to cap it.
#[cfg(feature = "std")]
pub fn read_bmp<R: std::io::Read>(
    reader: &mut R,
    stop: impl Stop,
) -> Result<DecodeOutput, BmpError> {
    read_inner(reader, None, &stop)
}

/// Like [`read_bmp`], with resource limits checked before the output
/// buffer is allocated.
#[cfg(feature = "std")]
pub fn read_bmp_with_limits<R: std::io::Read>(
    reader: &mut R,
    limits: &Limits,
    stop: impl Stop,
) -> Result<DecodeOutput, BmpError> {
    read_inner(reader, Some(limits), &stop)
}

#[cfg(feature = "std")]
fn read_inner<R: std::io::Read>(
    reader: &mut R,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput, BmpError> {
    let mut head = [0u8; header::PIXEL_DATA_OFFSET];
    read_exact_or_eof(reader, &mut head)?;
    let parsed = header::parse_header(&head)?;
    let width = parsed.width;
    let height = parsed.height;

    if let Some(limits) = limits {
        limits.check(width, height)?;
    }

    let w = width as usize;
    let h = height as usize;
    let out_size = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(3))
        .ok_or(BmpError::DimensionsTooLarge {
            width: u64::from(width),
            height: u64::from(height),
        })?;
    if let Some(limits) = limits {
        limits.check_memory(out_size)?;
    }

    if w == 0 || h == 0 {
        return Ok(DecodeOutput {
            pixels: Vec::new(),
            width,
            height,
            layout: PixelLayout::Rgb8,
        });
    }

    stop.check()?;

    // Skip any gap between the headers we read and the pixel array.
    let mut gap = u64::from(parsed.pixel_data_offset) - header::PIXEL_DATA_OFFSET as u64;
    let mut scratch = [0u8; 512];
    while gap > 0 {
        let n = gap.min(scratch.len() as u64) as usize;
        read_exact_or_eof(reader, &mut scratch[..n])?;
        gap -= n as u64;
    }

    let stride = usize::try_from(header::row_stride(width)).map_err(|_| {
        BmpError::DimensionsTooLarge {
            width: u64::from(width),
            height: u64::from(height),
        }
    })?;
    let row_bytes = w * 3;
    let mut pixels = vec![0u8; out_size];
    let mut row_buf = vec![0u8; stride];

    for (row_idx, out_row) in pixels.rchunks_exact_mut(row_bytes).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        read_exact_or_eof(reader, &mut row_buf)?;
        out_row.copy_from_slice(&row_buf[..row_bytes]);
        for pix in out_row.chunks_exact_mut(3) {
            pix.swap(0, 2);
        }
    }

    Ok(DecodeOutput {
        pixels,
        width,
        height,
        layout: PixelLayout::Rgb8,
    })
}

/// Like `Read::read_exact`, but reports a short read as
/// [`BmpError::UnexpectedEof`] so slice and stream decoding fail alike.
#[cfg(feature = "std")]
fn read_exact_or_eof<R: std::io::Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), BmpError> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            BmpError::UnexpectedEof
        } else {
            BmpError::Io(e)
        }
    })
}
