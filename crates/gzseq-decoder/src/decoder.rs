use std::io::{self, BufRead, Read};

use flate2::bufread::GzDecoder;
use gzseq_types::{Blob, BlobError, BlobResult};

/// Default per-blob byte ceiling: 1 MiB.
pub const MAX_BLOB_SIZE_DEFAULT: u64 = 1_048_576;

/// Decoder — lazily re-materializes a blob sequence from a
/// concatenated-member stream.
///
/// The decoder is itself the blob sequence: it implements
/// `Iterator<Item = BlobResult>`, parsing one gzip member per step and
/// yielding its decompressed body as one [`Blob`]. Nothing is read from
/// the source until the consumer pulls, and at most one member is held
/// in flight at a time, so arbitrarily long streams decode in bounded
/// memory.
///
/// Decoder output can be fed straight back into
/// [`BlobEncoder`](../gzseq_encoder/struct.BlobEncoder.html) to re-frame
/// a stream without materializing it.
///
/// # Memory bound
///
/// Every member body is read through a cap of
/// [`max_blob_size`](Self::max_blob_size) bytes
/// ([`MAX_BLOB_SIZE_DEFAULT`] unless overridden), so no single step can
/// allocate unbounded memory regardless of how the stream was produced.
/// Bytes beyond the cap are silently discarded — the member is still
/// drained to its trailer so the source stays aligned on the next member
/// boundary, but the consumer only sees the first `max_blob_size` bytes
/// and no error. Callers that need to detect truncation must carry a
/// length or checksum inside the blob payload itself.
///
/// # Usage
///
/// ```rust
/// use gzseq_decoder::BlobDecoder;
///
/// let stream: &[u8] = &[];
/// let mut blobs = BlobDecoder::new(stream);
/// assert!(blobs.next().is_none()); // empty stream ⇔ empty sequence
/// ```
pub struct BlobDecoder<R: BufRead> {
    source: R,
    max_blob_size: u64,
    state: DecodeState,
}

/// Internal state machine for the decoder.
///
/// ```text
///   Reading ──(member parsed)──▶ Reading
///   Reading ──(source exhausted at a boundary)──▶ Complete
///   Reading ──(read/format failure)──▶ Failed
/// ```
///
/// `Reading` means the source is positioned at a member boundary (or at
/// the very start of the stream — the two are indistinguishable, which
/// is what makes the empty stream decode to the empty sequence).
/// `Complete` and `Failed` are both terminal: once entered, the iterator
/// is fused and yields nothing further.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DecodeState {
    Reading,
    Complete,
    Failed,
}

impl<R: BufRead> BlobDecoder<R> {
    /// Create a decoder over `source` with the default 1 MiB per-blob
    /// cap.
    #[must_use]
    pub fn new(source: R) -> Self {
        Self {
            source,
            max_blob_size: MAX_BLOB_SIZE_DEFAULT,
            state: DecodeState::Reading,
        }
    }

    /// Set the per-blob byte ceiling.
    ///
    /// The cap applies independently to every member. A cap of zero is
    /// permitted and yields empty blobs while still consuming each
    /// member in full, so boundary alignment is preserved.
    #[must_use]
    pub fn with_max_blob_size(mut self, max_blob_size: u64) -> Self {
        self.max_blob_size = max_blob_size;
        self
    }

    /// The per-blob byte ceiling currently in effect.
    #[must_use]
    pub fn max_blob_size(&self) -> u64 {
        self.max_blob_size
    }

    /// Release the decoder and return the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Record a terminal failure and yield it as the sequence's final
    /// element.
    fn fail(&mut self, err: BlobError) -> Option<BlobResult> {
        self.state = DecodeState::Failed;
        Some(Err(err))
    }

    /// Parse one member from the current boundary position.
    ///
    /// The member reader is scoped to this call: it is created fresh for
    /// each member and dropped before returning, on every exit path. A
    /// `bufread::GzDecoder` stops at the first member's trailer rather
    /// than absorbing subsequent members, and consumes only what it
    /// parses from the shared `BufRead` buffer — together these keep the
    /// source positioned exactly at the next member boundary.
    fn read_member(&mut self) -> Option<BlobResult> {
        let member = GzDecoder::new(&mut self.source);
        let mut capped = member.take(self.max_blob_size);

        let mut body = Vec::new();
        if let Err(e) = capped.read_to_end(&mut body) {
            return self.fail(classify(e));
        }

        if body.len() as u64 == self.max_blob_size {
            // Cap reached: discard the rest of the member so the source
            // lands on the next boundary. The overflow is not an error.
            let mut member = capped.into_inner();
            if let Err(e) = io::copy(&mut member, &mut io::sink()) {
                return self.fail(classify(e));
            }
        }

        Some(Ok(Blob::from(body)))
    }
}

impl<R: BufRead> Iterator for BlobDecoder<R> {
    type Item = BlobResult;

    /// Advance the state machine by one member.
    ///
    /// Outcomes:
    ///
    /// - `Some(Ok(blob))` — one member was parsed; the source now sits
    ///   at the next boundary.
    /// - `Some(Err(e))` — the source failed or the bytes at the boundary
    ///   were not a valid member. Terminal: the next call returns `None`.
    /// - `None` — the source was exhausted at a member boundary. This is
    ///   the only normal way for the sequence to end and is never an
    ///   error.
    fn next(&mut self) -> Option<BlobResult> {
        match self.state {
            DecodeState::Complete | DecodeState::Failed => return None,
            DecodeState::Reading => {}
        }

        // Peek before opening a member reader: clean exhaustion at a
        // boundary ends the sequence, and must be distinguished from
        // every other failure.
        match self.source.fill_buf() {
            Ok(buf) if buf.is_empty() => {
                self.state = DecodeState::Complete;
                return None;
            }
            Ok(_) => {}
            Err(e) => return self.fail(BlobError::SourceIo(e)),
        }

        self.read_member()
    }
}

/// Split an I/O failure from the member reader into the two error kinds
/// the sequence distinguishes: flate2 reports header/body corruption as
/// `InvalidInput`/`InvalidData`, while genuine source failures keep
/// their original kinds and pass through.
fn classify(err: io::Error) -> BlobError {
    match err.kind() {
        io::ErrorKind::InvalidInput | io::ErrorKind::InvalidData => BlobError::Format(err),
        _ => BlobError::SourceIo(err),
    }
}
