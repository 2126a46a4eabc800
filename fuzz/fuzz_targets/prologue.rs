#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: prologue and format-version decoding.
//
// Catches bugs in:
// - Magic byte validation
// - Compressed flag handling
// - Format version checking
// - Truncated prologue handling
fuzz_target!(|data: &[u8]| {
    let mut slice = data;
    if packlog_wire::prologue::decode_prologue(&mut slice).is_ok() {
        let _ = packlog_wire::prologue::decode_format_version(&mut slice);
    }
});
