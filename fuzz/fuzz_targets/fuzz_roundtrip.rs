#![no_main]
use libfuzzer_sys::fuzz_target;
use ibmt::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding must reproduce the consumed bytes exactly
    let Ok(decoded) = decode_image(data) else {
        return;
    };

    let reencoded = encode_image(&decoded).expect("decoded image failed to encode");
    assert_eq!(&data[..reencoded.len()], &reencoded[..], "roundtrip byte mismatch");

    let decoded2 = decode_image(&reencoded).expect("re-encoded data failed to decode");
    assert_eq!(decoded, decoded2);
});
