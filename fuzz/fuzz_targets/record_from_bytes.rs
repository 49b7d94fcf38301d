#![no_main]

use libfuzzer_sys::fuzz_target;

use gzseq_logmap::LogRecord;

// Fuzz target: record deserialization from arbitrary bytes.
//
// Parsing may reject the input, but it must never panic and must never
// overallocate based on attacker-controlled counts. Anything that does
// parse must re-encode and re-parse to the same record (the encoding is
// canonical at the record level).
fuzz_target!(|data: &[u8]| {
    if let Ok(record) = LogRecord::from_bytes(data) {
        let bytes = record.to_bytes();
        let reparsed = LogRecord::from_bytes(&bytes).expect("own encoding must parse");
        assert_eq!(reparsed, record);
    }
});
