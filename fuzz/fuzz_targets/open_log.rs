#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: full packet log reader over arbitrary input bytes.
//
// Catches bugs in:
// - Prologue validation (magic, compressed flag)
// - Deflate filter installation over garbage streams
// - Header field validation (format version, region, client version)
// - Server table decoding (count, names, address widths, duplicates)
// - Entry stream decoding and truncation handling
fuzz_target!(|data: &[u8]| {
    if let Ok(mut reader) = packlog_decoder::PacketLogReader::open(data) {
        for entry in reader.entries() {
            if entry.is_err() {
                break;
            }
        }
    }
});
