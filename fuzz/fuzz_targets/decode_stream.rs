#![no_main]

use libfuzzer_sys::fuzz_target;

use gzseq_decoder::BlobDecoder;

// Fuzz target: full decoder over arbitrary bytes.
//
// Catches bugs in:
// - Member header detection at boundaries
// - Size-capped body reads and overflow draining
// - End-of-stream vs error disambiguation
// - Fused termination after a failure
//
// The decoder may yield blobs and then an error, but it must never
// panic and must always terminate (every member consumes input).
fuzz_target!(|data: &[u8]| {
    for item in BlobDecoder::new(data).with_max_blob_size(1 << 16) {
        let _ = item;
    }
});
