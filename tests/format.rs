//! On-disk layout: every header field at its exact offset, row order,
//! padding, and rejection of headers this crate does not speak.

use enough::Unstoppable;
use truebmp::*;

fn u16_at(data: &[u8], off: usize) -> u16 {
    u16::from_le_bytes([data[off], data[off + 1]])
}

fn u32_at(data: &[u8], off: usize) -> u32 {
    u32::from_le_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]])
}

/// 2x2 sample: red, green / blue, white.
fn sample_2x2() -> Vec<u8> {
    let pixels = [
        255, 0, 0, 0, 255, 0, // red, green
        0, 0, 255, 255, 255, 255, // blue, white
    ];
    encode_bmp(&pixels, 2, 2, PixelLayout::Rgb8, Unstoppable).unwrap()
}

fn decode_err(data: &[u8]) -> BmpError {
    decode_bmp(data, Unstoppable).unwrap_err()
}

// ── Encoded bytes, field by field ───────────────────────────────────

#[test]
fn header_fields_byte_exact() {
    let bmp = sample_2x2();
    // stride(2) = 8, so 54 + 8*2
    assert_eq!(bmp.len(), 70);

    // File header
    assert_eq!(&bmp[0..2], b"BM");
    assert_eq!(u32_at(&bmp, 2), 70); // file size
    assert_eq!(u32_at(&bmp, 6), 0); // reserved
    assert_eq!(u32_at(&bmp, 10), 54); // pixel data offset

    // Info header
    assert_eq!(u32_at(&bmp, 14), 40); // info header size
    assert_eq!(u32_at(&bmp, 18) as i32, 2); // width
    assert_eq!(u32_at(&bmp, 22) as i32, 2); // height
    assert_eq!(u16_at(&bmp, 26), 1); // planes
    assert_eq!(u16_at(&bmp, 28), 24); // bits per pixel
    assert_eq!(u32_at(&bmp, 30), 0); // compression (BI_RGB)
    assert_eq!(u32_at(&bmp, 34), 16); // pixel data size
    assert_eq!(u32_at(&bmp, 38) as i32, 11_811); // h resolution, 300 DPI
    assert_eq!(u32_at(&bmp, 42) as i32, 11_811); // v resolution
    assert_eq!(u32_at(&bmp, 46), 0); // colors used
    assert_eq!(u32_at(&bmp, 50), 0x0100_0000); // important colors
}

#[test]
fn rows_are_bottom_up_bgr_padded() {
    let bmp = sample_2x2();

    // First row on disk is the bottom image row: blue, white
    assert_eq!(&bmp[54..60], &[255, 0, 0, 255, 255, 255]);
    assert_eq!(&bmp[60..62], &[0, 0]); // pad to stride 8

    // Then the top image row: red, green
    assert_eq!(&bmp[62..68], &[0, 0, 255, 0, 255, 0]);
    assert_eq!(&bmp[68..70], &[0, 0]);
}

#[test]
fn file_size_field_always_matches_output_length() {
    for (w, h) in [(1u32, 1u32), (2, 2), (3, 3), (5, 1), (1, 5), (0, 0), (8, 4)] {
        let pixels = vec![7u8; (w * h * 3) as usize];
        let bmp = encode_bmp(&pixels, w, h, PixelLayout::Rgb8, Unstoppable).unwrap();
        assert_eq!(u32_at(&bmp, 2) as usize, bmp.len(), "for {w}x{h}");
        assert_eq!(
            u32_at(&bmp, 34) as u64,
            row_stride(w) * u64::from(h),
            "pixel data size for {w}x{h}"
        );
    }
}

// ── Stride arithmetic ───────────────────────────────────────────────

#[test]
fn row_stride_known_values() {
    assert_eq!(row_stride(0), 0);
    assert_eq!(row_stride(1), 4);
    assert_eq!(row_stride(2), 8);
    assert_eq!(row_stride(3), 12);
    assert_eq!(row_stride(4), 12);
    assert_eq!(row_stride(5), 16);
    assert_eq!(row_stride(6), 20);
    assert_eq!(row_stride(1000), 3000);
    assert_eq!(row_stride(u32::MAX), 12_884_901_888);
}

#[test]
fn row_stride_properties() {
    for w in 0u32..2000 {
        let stride = row_stride(w);
        assert_eq!(stride % 4, 0, "stride of {w} must be 4-aligned");
        assert!(stride >= 3 * u64::from(w), "stride of {w} must fit the row");
        assert!(
            stride < 3 * u64::from(w) + 4,
            "stride of {w} must not overshoot a full word"
        );
    }
}

// ── Decoder leniency ────────────────────────────────────────────────

#[test]
fn pixel_data_offset_is_honored() {
    // Same image, but with an 8-byte gap between headers and pixels.
    let bmp = sample_2x2();
    let mut gapped = bmp[..54].to_vec();
    gapped[10..14].copy_from_slice(&62u32.to_le_bytes());
    gapped.extend_from_slice(&[0xEE; 8]); // gap the decoder must skip
    gapped.extend_from_slice(&bmp[54..]);

    let expected = decode_bmp(&bmp, Unstoppable).unwrap();
    let decoded = decode_bmp(&gapped, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), expected.pixels());
}

#[test]
fn larger_info_headers_accepted() {
    // BITMAPV4HEADER-sized info block (108 bytes), extra fields zeroed.
    let bmp = sample_2x2();
    let mut v4 = bmp[..54].to_vec();
    v4[10..14].copy_from_slice(&(14 + 108u32).to_le_bytes());
    v4[14..18].copy_from_slice(&108u32.to_le_bytes());
    v4.resize(14 + 108, 0);
    v4.extend_from_slice(&bmp[54..]);

    let decoded = decode_bmp(&v4, Unstoppable).unwrap();
    assert_eq!(decoded.width, 2);
    assert_eq!(decoded.height, 2);
    assert_eq!(decoded.pixels(), decode_bmp(&bmp, Unstoppable).unwrap().pixels());
}

#[test]
fn garbage_file_size_field_ignored() {
    let mut bmp = sample_2x2();
    bmp[2..6].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
    assert!(decode_bmp(&bmp, Unstoppable).is_ok());
}

// ── Decoder rejection ───────────────────────────────────────────────

#[test]
fn wrong_magic_rejected() {
    let mut bmp = sample_2x2();
    bmp[0] = b'P';
    assert!(matches!(decode_err(&bmp), BmpError::UnrecognizedFormat));

    assert!(matches!(decode_err(b"XX"), BmpError::UnrecognizedFormat));
}

#[test]
fn short_input_rejected() {
    assert!(matches!(decode_err(&[]), BmpError::UnexpectedEof));
    assert!(matches!(decode_err(b"B"), BmpError::UnexpectedEof));
    assert!(matches!(decode_err(b"BM"), BmpError::UnexpectedEof));
}

#[test]
fn pre_bitmapinfo_headers_rejected() {
    // OS/2 BITMAPCOREHEADER (size 12) predates the fields we need.
    let mut bmp = sample_2x2();
    bmp[14..18].copy_from_slice(&12u32.to_le_bytes());
    assert!(matches!(decode_err(&bmp), BmpError::UnsupportedVariant(_)));
}

#[test]
fn other_bit_depths_rejected() {
    for bpp in [0u16, 1, 4, 8, 16, 32] {
        let mut bmp = sample_2x2();
        bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
        assert!(
            matches!(decode_err(&bmp), BmpError::UnsupportedVariant(_)),
            "bpp {bpp} must be rejected"
        );
    }
}

#[test]
fn compressed_variants_rejected() {
    // 1 = RLE8, 2 = RLE4, 3 = bitfields
    for comp in [1u32, 2, 3] {
        let mut bmp = sample_2x2();
        bmp[30..34].copy_from_slice(&comp.to_le_bytes());
        assert!(
            matches!(decode_err(&bmp), BmpError::UnsupportedVariant(_)),
            "compression {comp} must be rejected"
        );
    }
}

#[test]
fn negative_dimensions_rejected() {
    let mut bmp = sample_2x2();
    bmp[18..22].copy_from_slice(&(-2i32).to_le_bytes());
    assert!(matches!(decode_err(&bmp), BmpError::InvalidHeader(_)));

    // Top-down (negative height) files are out of scope too
    let mut bmp = sample_2x2();
    bmp[22..26].copy_from_slice(&(-2i32).to_le_bytes());
    assert!(matches!(decode_err(&bmp), BmpError::InvalidHeader(_)));
}

#[test]
fn offset_inside_headers_rejected() {
    let mut bmp = sample_2x2();
    bmp[10..14].copy_from_slice(&10u32.to_le_bytes());
    assert!(matches!(decode_err(&bmp), BmpError::InvalidHeader(_)));
}

#[test]
fn missing_trailing_padding_rejected() {
    // 1x2: each disk row is 3 pixel bytes + 1 pad. Dropping the very
    // last pad byte truncates the file.
    let bmp = encode_bmp(&[1, 2, 3, 4, 5, 6], 1, 2, PixelLayout::Rgb8, Unstoppable).unwrap();
    assert_eq!(bmp.len(), 62);
    assert!(matches!(
        decode_err(&bmp[..61]),
        BmpError::UnexpectedEof
    ));
}

#[test]
fn probe_rejects_what_decode_rejects() {
    let mut bmp = sample_2x2();
    bmp[28..30].copy_from_slice(&32u16.to_le_bytes());
    assert!(matches!(
        ImageInfo::from_bytes(&bmp).unwrap_err(),
        BmpError::UnsupportedVariant(_)
    ));
}
