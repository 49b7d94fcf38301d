#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;

use gzseq_decoder::BlobDecoder;
use gzseq_encoder::BlobEncoder;
use gzseq_types::Blob;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    blobs: Vec<Vec<u8>>,
    level: u8,
}

// Fuzz target: BlobEncoder → BlobDecoder roundtrip.
//
// Generates arbitrary blob sequences, encodes them at an arbitrary
// level, and decodes the stream back. The decoder must reproduce the
// sequence exactly — same count, same bytes, same order — for anything
// the encoder can produce.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(input) = FuzzInput::arbitrary(&mut u) else {
        return;
    };

    let blob_count = input.blobs.len().min(32);
    let blobs: Vec<Blob> = input.blobs[..blob_count]
        .iter()
        .map(|b| Blob::copy_from_slice(b))
        .collect();

    let level = flate2::Compression::new(u32::from(input.level) % 10);
    let stream = BlobEncoder::new(Vec::new())
        .with_level(level)
        .encode(blobs.iter().cloned().map(Ok))
        .expect("in-memory encode cannot fail");

    let decoded: Vec<Blob> = BlobDecoder::new(&stream[..])
        .collect::<Result<_, _>>()
        .expect("decoder failed on valid encoder output");

    assert_eq!(decoded, blobs);
});
