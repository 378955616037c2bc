#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Every entry point must reject or accept without panicking
    let _ = ibmt::decode_image(data);
    let _ = ibmt::ImageInfo::from_bytes(data);
    let _ = ibmt::read_image(data);

    let limits = ibmt::Limits {
        max_payload_bytes: Some(1 << 24),
        ..Default::default()
    };
    let _ = ibmt::DecodeRequest::new(data)
        .with_limits(&limits)
        .with_metadata_policy(ibmt::MetadataPolicy::Strict)
        .decode_triplets(enough::Unstoppable);
});
