//! BMP wire format: the 14-byte file header and the 40-byte
//! BITMAPINFOHEADER, as written by this crate.
//!
//! All multi-byte fields are little-endian. Files produced by the encoder
//! always look like this:
//!
//! | offset | size | field                                     |
//! |--------|------|-------------------------------------------|
//! | 0      | 2    | magic `"BM"`                              |
//! | 2      | 4    | file size (54 + stride * height)          |
//! | 6      | 4    | reserved, 0                               |
//! | 10     | 4    | pixel data offset, 54                     |
//! | 14     | 4    | info header size, 40                      |
//! | 18     | 4    | width (i32)                               |
//! | 22     | 4    | height (i32, positive = bottom-up)        |
//! | 26     | 2    | planes, 1                                 |
//! | 28     | 2    | bits per pixel, 24                        |
//! | 30     | 4    | compression, 0 (BI_RGB)                   |
//! | 34     | 4    | pixel data size (stride * height)         |
//! | 38     | 4    | horizontal resolution, 11811 ppm          |
//! | 42     | 4    | vertical resolution, 11811 ppm            |
//! | 46     | 4    | colors used, 0                            |
//! | 50     | 4    | important colors, 0x0100_0000             |
//!
//! The decoder is laxer than the encoder: it accepts any info header of 40
//! bytes or more, honors the pixel data offset field, and ignores the file
//! size, resolution and color count fields entirely.

use alloc::vec::Vec;

use crate::error::BmpError;

pub(crate) const MAGIC: [u8; 2] = *b"BM";
/// BITMAPFILEHEADER length.
pub(crate) const FILE_HEADER_LEN: usize = 14;
/// BITMAPINFOHEADER length. Decoding accepts larger (V4/V5) headers too.
pub(crate) const INFO_HEADER_LEN: usize = 40;
/// Where pixel rows start in files we write: both headers, back to back.
pub(crate) const PIXEL_DATA_OFFSET: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

/// 300 DPI expressed in pixels per meter.
const RESOLUTION_PPM: i32 = 11_811;
/// "All 2^24 colors matter" marker for the important-colors field.
const COLORS_IMPORTANT: u32 = 0x0100_0000;

/// Bytes per pixel row on disk: 3 bytes per pixel, rounded up to a
/// multiple of 4.
///
/// ```
/// use truebmp::row_stride;
///
/// assert_eq!(row_stride(0), 0);
/// assert_eq!(row_stride(1), 4);
/// assert_eq!(row_stride(4), 12);
/// assert_eq!(row_stride(5), 16);
/// ```
pub const fn row_stride(width: u32) -> u64 {
    (3 * width as u64 + 3) & !3
}

/// Write both headers. `file_size` and `pixel_data_size` must already be
/// range-checked by the caller.
pub(crate) fn write_headers(out: &mut Vec<u8>, width: u32, height: u32, pixel_data_size: u32) {
    let file_size = PIXEL_DATA_OFFSET as u32 + pixel_data_size;

    // File header (14 bytes)
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(PIXEL_DATA_OFFSET as u32).to_le_bytes());

    // Info header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0u32.to_le_bytes()); // compression (BI_RGB)
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&RESOLUTION_PPM.to_le_bytes()); // h resolution
    out.extend_from_slice(&RESOLUTION_PPM.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&COLORS_IMPORTANT.to_le_bytes());
}

/// Header fields the decoder acts on.
pub(crate) struct ParsedHeader {
    pub width: u32,
    pub height: u32,
    /// Where pixel rows start, from the file header. 54 in files we write,
    /// but larger offsets (V4/V5 headers, color tables) are honored.
    pub pixel_data_offset: u32,
}

/// Parse and validate both headers.
///
/// Only reads the first 34 bytes, so a prefix of a longer stream works.
/// Rejects anything this crate cannot decode: wrong magic, pre-BITMAPINFO
/// header sizes, bit depths other than 24, compressed pixel data, and
/// negative (top-down or nonsense) dimensions.
pub(crate) fn parse_header(data: &[u8]) -> Result<ParsedHeader, BmpError> {
    if data.len() < 2 {
        return Err(BmpError::UnexpectedEof);
    }
    if data[0] != MAGIC[0] || data[1] != MAGIC[1] {
        return Err(BmpError::UnrecognizedFormat);
    }
    // Fields through the compression word.
    if data.len() < 34 {
        return Err(BmpError::UnexpectedEof);
    }

    // File size (offset 2) and reserved (offset 6) are ignored.
    let pixel_data_offset = u32_le(data, 10);

    let ihsize = u32_le(data, 14);
    if ihsize < INFO_HEADER_LEN as u32 {
        return Err(BmpError::UnsupportedVariant(alloc::format!(
            "info header size {ihsize}, need BITMAPINFOHEADER (40) or later"
        )));
    }

    let width = u32_le(data, 18) as i32;
    let height = u32_le(data, 22) as i32;
    if width < 0 || height < 0 {
        return Err(BmpError::InvalidHeader(alloc::format!(
            "negative dimensions {width}x{height}"
        )));
    }

    let bpp = u16_le(data, 28);
    if bpp != 24 {
        return Err(BmpError::UnsupportedVariant(alloc::format!(
            "{bpp} bits per pixel, only 24 supported"
        )));
    }

    let compression = u32_le(data, 30);
    if compression != 0 {
        return Err(BmpError::UnsupportedVariant(alloc::format!(
            "compression type {compression}, only uncompressed (BI_RGB) supported"
        )));
    }

    if u64::from(pixel_data_offset) < FILE_HEADER_LEN as u64 + u64::from(ihsize) {
        return Err(BmpError::InvalidHeader(alloc::format!(
            "pixel data offset {pixel_data_offset} overlaps the headers"
        )));
    }

    Ok(ParsedHeader {
        width: width as u32,
        height: height as u32,
        pixel_data_offset,
    })
}

fn u16_le(data: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([data[off], data[off + 1]])
}

fn u32_le(data: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]])
}
