#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(planes: u32, width: u32, height: u32, depth: u32) -> Vec<u8> {
    let mut h = b"IBMT".to_vec();
    for v in [planes, width, height, depth] {
        h.extend_from_slice(&v.to_le_bytes());
    }
    let sum = h.iter().fold(0u32, |a, &b| a.wrapping_add(b as u32));
    h.extend_from_slice(&sum.to_le_bytes());
    h
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 2x1 red, green
    let mut two = header(3, 2, 1, 8);
    two.extend_from_slice(b"\xff\x00\x00\x00\xff\x00");
    fs::write(format!("{dir}/rgb_2x1.ibmt"), &two).unwrap();

    // 3x2 gradient
    let mut grad = header(3, 3, 2, 8);
    grad.extend((0..18u8).map(|i| i * 14));
    fs::write(format!("{dir}/rgb_3x2.ibmt"), &grad).unwrap();

    // Non-standard metadata, RGB24 payload
    let mut odd = header(4, 1, 1, 16);
    odd.extend_from_slice(b"\x10\x20\x30");
    fs::write(format!("{dir}/planes4_depth16.ibmt"), &odd).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_magic.bin"), b"IBMT").unwrap();
    fs::write(format!("{dir}/header_only.bin"), header(3, 4, 4, 8)).unwrap();
    fs::write(format!("{dir}/zero_width.bin"), header(3, 0, 4, 8)).unwrap();
    let mut bad_sum = header(3, 1, 1, 8);
    bad_sum[20] ^= 0xff;
    bad_sum.extend_from_slice(b"\x00\x00\x00");
    fs::write(format!("{dir}/bad_checksum.bin"), bad_sum).unwrap();

    println!("Generated seed corpus in {dir}/");
}
