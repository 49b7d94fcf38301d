//! Roundtrip integration tests for the encode → decode pipeline.
//!
//! Each test drives a blob sequence through [`BlobEncoder`] into an
//! in-memory stream, decodes it back with [`BlobDecoder`], and asserts
//! the original sequence is reproduced element-for-element, in order,
//! ending with clean stream completion. The stream carries no framing
//! besides the members themselves, so these tests are also the proof
//! that member boundaries alone are enough to reconstruct the sequence.

use gzseq_decoder::BlobDecoder;
use gzseq_encoder::BlobEncoder;
use gzseq_tests::{encode, ok_blobs};
use gzseq_types::Blob;

fn decode(stream: &[u8]) -> Vec<Blob> {
    BlobDecoder::new(stream)
        .collect::<Result<Vec<_>, _>>()
        .expect("stream should decode cleanly")
}

// ── The empty stream ─────────────────────────────────────────────────────────

#[test]
fn empty_sequence_encodes_to_empty_stream() {
    assert!(encode(&[]).is_empty());
}

#[test]
fn empty_stream_decodes_to_empty_sequence() {
    let mut decoder = BlobDecoder::new(&[][..]);
    assert!(decoder.next().is_none());
}

// ── Content roundtrips ───────────────────────────────────────────────────────

#[test]
fn single_blob_roundtrip() {
    let stream = encode(&[b"helo"]);
    assert_eq!(decode(&stream), vec![Blob::from_static(b"helo")]);
}

#[test]
fn thousand_blobs_roundtrip() {
    let items: Vec<&[u8]> = vec![b"helo"; 1000];
    let stream = encode(&items);

    let blobs = decode(&stream);
    assert_eq!(blobs.len(), 1000);
    for (index, blob) in blobs.iter().enumerate() {
        assert_eq!(blob.as_ref(), b"helo", "blob {index} corrupted");
    }
}

#[test]
fn order_preserved_for_mixed_sizes() {
    let tiny = b"x".to_vec();
    let medium = vec![0x42u8; 300];
    let large: Vec<u8> = (0..70_000u32).map(|i| (i % 251) as u8).collect();
    let items: Vec<&[u8]> = vec![b"", &tiny, &medium, &large, b"tail"];

    let stream = encode(&items);
    let blobs = decode(&stream);

    assert_eq!(blobs.len(), items.len());
    for (index, (blob, item)) in blobs.iter().zip(&items).enumerate() {
        assert_eq!(blob.as_ref(), *item, "blob {index} differs");
    }
}

#[test]
fn binary_blobs_survive_unchanged() {
    // Payloads that contain member-header bytes must not confuse the
    // boundary scan — boundaries are positional, not magic-based.
    let gzip_magic_inside = [0x00, 0x1F, 0x8B, 0x08, 0xFF, 0x1F, 0x8B];
    let all_bytes: Vec<u8> = (0u16..=255).map(|b| b as u8).collect();
    let items: Vec<&[u8]> = vec![&gzip_magic_inside, &all_bytes];

    let stream = encode(&items);
    let blobs = decode(&stream);
    assert_eq!(blobs[0].as_ref(), gzip_magic_inside);
    assert_eq!(blobs[1].as_ref(), all_bytes);
}

// ── Re-framing ───────────────────────────────────────────────────────────────

#[test]
fn decoder_output_feeds_the_encoder_directly() {
    // Decode → encode without materializing: the decoder IS a blob
    // sequence, so a stream can be re-framed (e.g. at a different
    // compression level) in one bounded-memory pass.
    let original = ok_blobs(&[b"one", b"two", b"three"]);
    let stream = BlobEncoder::new(Vec::new()).encode(original).unwrap();

    let reframed = BlobEncoder::new(Vec::new())
        .with_level(flate2::Compression::best())
        .encode(BlobDecoder::new(&stream[..]))
        .unwrap();

    assert_eq!(
        decode(&reframed),
        vec![
            Blob::from_static(b"one"),
            Blob::from_static(b"two"),
            Blob::from_static(b"three"),
        ]
    );
}

#[test]
fn encoding_is_deterministic() {
    // Same blobs, same level, same bytes — members carry no timestamps
    // or other per-run state.
    let items: Vec<&[u8]> = vec![b"alpha", b"beta"];
    assert_eq!(encode(&items), encode(&items));
}
