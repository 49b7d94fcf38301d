#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;

use gzseq_wire::varint::{decode_varint, decode_zigzag, encode_varint, encode_zigzag};

// Fuzz target: varint and zigzag encode → decode roundtrip, plus
// decoding of raw bytes. Decoding arbitrary input may fail but must
// never panic; encoding then decoding must reproduce the value.
fuzz_target!(|data: &[u8]| {
    let _ = decode_varint(data, 0);
    let _ = decode_zigzag(data, 0);

    let mut u = Unstructured::new(data);
    if let Ok(value) = u64::arbitrary(&mut u) {
        let mut buf = Vec::new();
        encode_varint(&mut buf, value);
        let (decoded, consumed) = decode_varint(&buf, 0).expect("own encoding must decode");
        assert_eq!(decoded, value);
        assert_eq!(consumed, buf.len());
    }

    if let Ok(value) = i64::arbitrary(&mut u) {
        let mut buf = Vec::new();
        encode_zigzag(&mut buf, value);
        let (decoded, consumed) = decode_zigzag(&buf, 0).expect("own encoding must decode");
        assert_eq!(decoded, value);
        assert_eq!(consumed, buf.len());
    }
});
