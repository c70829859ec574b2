//! BMP encoding: packed RGB or BGR rows in, a complete file out.

use alloc::vec::Vec;

use enough::Stop;

use crate::error::BmpError;
use crate::header;
use crate::pixel::PixelLayout;

/// Encode packed 8-bit pixel rows as an uncompressed 24-bit BMP.
///
/// `pixels` holds `width * height` pixels, top row first, no padding,
/// in the byte order named by `layout`. The output is a complete file:
/// 54 header bytes followed by bottom-up BGR rows padded to 4-byte
/// boundaries.
pub fn encode_bmp(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: impl Stop,
) -> Result<Vec<u8>, BmpError> {
    encode_inner(pixels, width, height, layout, &stop)
}

/// Sizes derived from the dimensions, all range-checked.
struct Geometry {
    stride: usize,
    pixel_data_size: usize,
    file_size: usize,
}

fn geometry(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<Geometry, BmpError> {
    let too_large = || BmpError::DimensionsTooLarge {
        width: u64::from(width),
        height: u64::from(height),
    };

    // The info header stores dimensions as i32.
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(too_large());
    }

    let w = width as usize;
    let h = height as usize;
    let expected = w
        .checked_mul(h)
        .and_then(|wh| wh.checked_mul(layout.bytes_per_pixel()))
        .ok_or_else(too_large)?;
    if pixels.len() < expected {
        return Err(BmpError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }

    let stride = usize::try_from(header::row_stride(width)).map_err(|_| too_large())?;
    let pixel_data_size = stride.checked_mul(h).ok_or_else(too_large)?;
    let file_size = pixel_data_size
        .checked_add(header::PIXEL_DATA_OFFSET)
        .ok_or_else(too_large)?;
    // Both sizes land in u32 header fields.
    if file_size > u32::MAX as usize {
        return Err(too_large());
    }

    Ok(Geometry {
        stride,
        pixel_data_size,
        file_size,
    })
}

pub(crate) fn encode_inner(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    let geom = geometry(pixels, width, height, layout)?;

    stop.check()?;

    let mut out = Vec::with_capacity(geom.file_size);
    header::write_headers(&mut out, width, height, geom.pixel_data_size as u32);

    let w = width as usize;
    let pad = geom.stride - w * 3;
    let is_bgr_native = matches!(layout, PixelLayout::Bgr8);
    for row in (0..height as usize).rev() {
        if row % 16 == 0 {
            stop.check()?;
        }
        let row_start = row * w * 3;
        let src = &pixels[row_start..row_start + w * 3];
        if is_bgr_native {
            // Already in file byte order, direct copy
            out.extend_from_slice(src);
        } else {
            for pix in src.chunks_exact(3) {
                out.push(pix[2]);
                out.push(pix[1]);
                out.push(pix[0]);
            }
        }
        out.extend(core::iter::repeat_n(0u8, pad));
    }

    Ok(out)
}

// ── Typed buffer adapter ────────────────────────────────────────────

/// Encode an [`imgref::ImgRef`] of typed pixels as a 24-bit BMP.
///
/// Buffers whose stride exceeds their width are flattened into a packed
/// copy first; packed buffers encode without copying.
#[cfg(feature = "imgref")]
pub fn encode_bmp_imgref<P>(
    img: imgref::ImgRef<'_, P>,
    stop: impl Stop,
) -> Result<Vec<u8>, BmpError>
where
    P: crate::BmpPixel,
    [P]: rgb::ComponentBytes<u8>,
{
    use rgb::ComponentBytes as _;

    let too_large = || BmpError::DimensionsTooLarge {
        width: img.width() as u64,
        height: img.height() as u64,
    };
    let width = u32::try_from(img.width()).map_err(|_| too_large())?;
    let height = u32::try_from(img.height()).map_err(|_| too_large())?;
    let layout = P::layout();

    if img.stride() == img.width() {
        return encode_inner(img.buf().as_bytes(), width, height, layout, &stop);
    }

    let mut packed: Vec<P> = Vec::with_capacity(img.width() * img.height());
    for row in img.rows() {
        packed.extend_from_slice(row);
    }
    encode_inner(packed.as_bytes(), width, height, layout, &stop)
}

// ── Stream adapter ──────────────────────────────────────────────────

/// Encode straight to a writer, one row at a time.
///
/// Buffers a single padded row, so peak extra memory is the row stride
/// regardless of image size.
#[cfg(feature = "std")]
pub fn write_bmp<W: std::io::Write>(
    writer: &mut W,
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: impl Stop,
) -> Result<(), BmpError> {
    let stop: &dyn Stop = &stop;
    let geom = geometry(pixels, width, height, layout)?;

    stop.check()?;

    let mut head = Vec::with_capacity(header::PIXEL_DATA_OFFSET);
    header::write_headers(&mut head, width, height, geom.pixel_data_size as u32);
    writer.write_all(&head)?;

    // One reused row buffer; the trailing pad bytes stay zero.
    let w = width as usize;
    let mut row_buf = alloc::vec![0u8; geom.stride];
    let is_bgr_native = matches!(layout, PixelLayout::Bgr8);
    for row in (0..height as usize).rev() {
        if row % 16 == 0 {
            stop.check()?;
        }
        let row_start = row * w * 3;
        let src = &pixels[row_start..row_start + w * 3];
        if is_bgr_native {
            row_buf[..w * 3].copy_from_slice(src);
        } else {
            for (dst, pix) in row_buf.chunks_exact_mut(3).zip(src.chunks_exact(3)) {
                dst[0] = pix[2];
                dst[1] = pix[1];
                dst[2] = pix[0];
            }
        }
        writer.write_all(&row_buf)?;
    }

    Ok(())
}
