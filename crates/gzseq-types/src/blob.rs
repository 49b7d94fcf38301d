use crate::error::BlobError;

/// An opaque, immutable byte payload — the unit of exchange through the
/// codec.
///
/// The codec assumes no internal structure: a blob is whatever the producer
/// handed over, byte for byte. [`bytes::Bytes`] gives us cheap clones and
/// zero-copy slicing, so a blob can be passed between pipeline stages
/// without re-allocating, while remaining immutable once yielded.
pub type Blob = bytes::Bytes;

/// One step of a blob sequence: a payload, or the error that ended it.
pub type BlobResult = Result<Blob, BlobError>;

/// A lazy, single-pass, ordered sequence of blobs.
///
/// This is the uniform interchange type between producers, the encoder, and
/// the decoder. Every step has exactly three outcomes:
///
/// ```text
///   Some(Ok(blob))  → the next payload, in order
///   Some(Err(e))    → the sequence failed; terminal
///   None            → the sequence is exhausted; terminal
/// ```
///
/// Contract for implementors:
///
/// - After yielding `Err`, yield nothing further (behave as fused).
/// - A sequence is a single pass over a live data source, not a reusable
///   collection. Sequences are moved into their consumer, so a second
///   iteration cannot be expressed.
/// - Early termination is the consumer's right: it may simply stop pulling
///   and drop the sequence. Any owned resources (readers, decompressor
///   state) must be released by `Drop`.
///
/// The trait is blanket-implemented; any iterator with the right item type
/// is a blob sequence. Consumers that accept one-shot inputs (such as the
/// encoder) take `IntoIterator<Item = BlobResult>` instead, which every
/// `BlobSequence` satisfies.
pub trait BlobSequence: Iterator<Item = BlobResult> {}

impl<I: Iterator<Item = BlobResult>> BlobSequence for I {}
