#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Whatever the bytes, decoding must never panic
    let _ = truebmp::decode_bmp(data, enough::Unstoppable);
    let _ = truebmp::decode_bmp_native(data, enough::Unstoppable);
    let _ = truebmp::ImageInfo::from_bytes(data);
});
