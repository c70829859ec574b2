#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Minimal 1x1 24-bit BMP: 54 header bytes + 3 pixel + 1 padding
    let mut bmp = vec![0u8; 58];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&58u32.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    bmp[18..22].copy_from_slice(&1i32.to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&1i32.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[54] = 0xff; // blue pixel (BGR on disk)
    fs::write(format!("{dir}/bmp_1x1.bmp"), &bmp).unwrap();

    // 3x2: odd width exercises row padding (stride 12, not 9)
    let mut wide = vec![0u8; 54 + 12 * 2];
    wide[..54].copy_from_slice(&bmp[..54]);
    wide[2..6].copy_from_slice(&78u32.to_le_bytes());
    wide[18..22].copy_from_slice(&3i32.to_le_bytes());
    wide[22..26].copy_from_slice(&2i32.to_le_bytes());
    wide[34..38].copy_from_slice(&24u32.to_le_bytes());
    for (i, b) in wide[54..].iter_mut().enumerate() {
        *b = i as u8;
    }
    fs::write(format!("{dir}/bmp_3x2.bmp"), &wide).unwrap();

    // Zero dimensions: a valid file that is nothing but headers
    let mut empty_img = bmp[..54].to_vec();
    empty_img[2..6].copy_from_slice(&54u32.to_le_bytes());
    empty_img[18..22].copy_from_slice(&0i32.to_le_bytes());
    empty_img[22..26].copy_from_slice(&0i32.to_le_bytes());
    fs::write(format!("{dir}/bmp_0x0.bmp"), &empty_img).unwrap();

    // V4-size info header (108 bytes) with the pixel array pushed out
    let mut v4 = vec![0u8; 14 + 108 + 4];
    v4[..54].copy_from_slice(&bmp[..54]);
    v4[2..6].copy_from_slice(&126u32.to_le_bytes());
    v4[10..14].copy_from_slice(&122u32.to_le_bytes());
    v4[14..18].copy_from_slice(&108u32.to_le_bytes());
    v4[122] = 0xff; // blue pixel again
    fs::write(format!("{dir}/bmp_v4_1x1.bmp"), &v4).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();

    let mut bad_bpp = bmp.clone();
    bad_bpp[28..30].copy_from_slice(&32u16.to_le_bytes());
    fs::write(format!("{dir}/bmp_32bpp.bin"), &bad_bpp).unwrap();

    let mut rle = bmp.clone();
    rle[30..34].copy_from_slice(&1u32.to_le_bytes());
    fs::write(format!("{dir}/bmp_rle8.bin"), &rle).unwrap();

    let mut topdown = bmp.clone();
    topdown[22..26].copy_from_slice(&(-1i32).to_le_bytes());
    fs::write(format!("{dir}/bmp_topdown.bin"), &topdown).unwrap();

    println!("Generated seed corpus in {dir}/");
}
