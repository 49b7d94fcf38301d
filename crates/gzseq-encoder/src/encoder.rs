use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use gzseq_types::BlobResult;

use crate::error::EncodeError;

/// Encoder — serializes a blob sequence into a concatenated-member
/// stream.
///
/// Each blob becomes exactly one gzip member (RFC 1952: header,
/// deflate-compressed body, CRC32 + length trailer), and members are
/// written back-to-back with no framing in between. Because every member
/// is a complete, standalone compressed unit, the stream can be produced
/// incrementally — the encoder never needs to know how many blobs are
/// coming — and a reader can validate and consume one blob without
/// having seen the rest.
///
/// # Usage
///
/// ```rust
/// use gzseq_encoder::BlobEncoder;
/// use gzseq_types::Blob;
///
/// let blobs = [Blob::from_static(b"helo")].into_iter().map(Ok);
/// let stream = BlobEncoder::new(Vec::new()).encode(blobs).unwrap();
/// assert!(!stream.is_empty());
/// ```
///
/// # Output layout
///
/// ```text
/// ┌──────────────┬─────────────────────────────────────────────┐
/// │ [N bytes]    │ member 0: gzip(blob 0) + CRC32/ISIZE trailer│
/// │ [N bytes]    │ member 1: gzip(blob 1) ...                  │
/// │ ...          │                                             │
/// └──────────────┴─────────────────────────────────────────────┘
/// ```
///
/// Zero blobs produce zero bytes — there is no stream preamble and no
/// terminator, so the empty sequence and the empty stream are the same
/// thing on both sides of the codec.
pub struct BlobEncoder<W: Write> {
    sink: W,
    level: Compression,
}

impl<W: Write> BlobEncoder<W> {
    /// Create an encoder writing to `sink` at the default compression
    /// level.
    #[must_use]
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            level: Compression::default(),
        }
    }

    /// Set the compression level applied to every member.
    #[must_use]
    pub fn with_level(mut self, level: Compression) -> Self {
        self.level = level;
        self
    }

    /// Consume the sequence and write one finalized member per blob.
    ///
    /// Members are strictly sequential: blob N's member is fully written
    /// and finalized (buffered deflate data flushed, trailer emitted)
    /// before any byte of member N+1 reaches the sink. Members are never
    /// interleaved or merged, and no member is finalized twice.
    ///
    /// Returns the sink on success so the caller can keep writing to it
    /// or flush it.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::Sequence`] if the sequence yields an error; the
    ///   operation aborts before a member is opened for that element, so
    ///   every member already in the sink is complete and independently
    ///   decodable.
    /// - [`EncodeError::Sink`] if a member body write or finalization
    ///   fails.
    /// - [`EncodeError::SinkAbort`] if a body write fails and closing
    ///   the broken member fails too; both failures are retained.
    pub fn encode<I>(mut self, blobs: I) -> Result<W, EncodeError>
    where
        I: IntoIterator<Item = BlobResult>,
    {
        for item in blobs {
            let blob = item?;
            self.write_member(&blob)?;
        }
        Ok(self.sink)
    }

    /// Write one blob as one complete member.
    fn write_member(&mut self, body: &[u8]) -> Result<(), EncodeError> {
        let mut member = GzEncoder::new(&mut self.sink, self.level);

        if let Err(write) = member.write_all(body) {
            // The broken member still has to be closed out; if that
            // fails as well, report both — the close failure must not
            // replace the write failure.
            return Err(match member.finish() {
                Ok(_) => EncodeError::Sink(write),
                Err(finish) => EncodeError::SinkAbort { write, finish },
            });
        }

        member.finish().map_err(EncodeError::Sink)?;
        Ok(())
    }
}

/// Encode `blobs` into `sink`, discarding the sink when done.
///
/// Convenience wrapper over [`BlobEncoder`] for callers that hold the
/// sink by reference (files, locked stdout) and don't need it back.
///
/// # Errors
///
/// Same conditions as [`BlobEncoder::encode`].
pub fn encode_to_writer<W, I>(sink: W, blobs: I) -> Result<(), EncodeError>
where
    W: Write,
    I: IntoIterator<Item = BlobResult>,
{
    BlobEncoder::new(sink).encode(blobs).map(|_| ())
}
