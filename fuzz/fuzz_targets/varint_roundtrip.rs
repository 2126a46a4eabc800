#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: varint encode→decode roundtrip.
//
// For any u32, encoding then decoding must return the original value
// and consume exactly the encoded bytes.
fuzz_target!(|value: u32| {
    let mut buf = [0u8; 5];
    let len = packlog_wire::varint::encode_varint(value, &mut buf);

    let mut slice = &buf[..len];
    let decoded = packlog_wire::varint::read_varint(&mut slice).expect("encoded varint decodes");
    assert_eq!(decoded, value);
    assert!(slice.is_empty());
});
