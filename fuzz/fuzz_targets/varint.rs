#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: read_varint LEB128 codec.
//
// Catches bugs in:
// - VarintTooLong (>5 continuation bytes)
// - Zero-length input
// - Maximum value edge cases (u32::MAX)
// - Malformed continuation bits
fuzz_target!(|data: &[u8]| {
    let mut slice = data;
    let _ = packlog_wire::varint::read_varint(&mut slice);
});
