#![no_main]
use libfuzzer_sys::fuzz_target;
use truebmp::*;

fuzz_target!(|data: &[u8]| {
    // Anything that decodes must re-encode, and decode again to
    // identical pixels
    let Ok(decoded) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };

    let reencoded = encode_bmp(
        decoded.pixels(),
        decoded.width,
        decoded.height,
        decoded.layout,
        enough::Unstoppable,
    )
    .expect("decoded image failed to re-encode");

    let decoded2 =
        decode_bmp(&reencoded, enough::Unstoppable).expect("re-encoded data failed to decode");

    assert_eq!(decoded.pixels(), decoded2.pixels(), "roundtrip pixel mismatch");
    assert_eq!(decoded.width, decoded2.width);
    assert_eq!(decoded.height, decoded2.height);
});
