use std::io;

/// The error carried inside a blob sequence.
///
/// Both codec directions speak this type — the decoder yields it and the
/// encoder aborts on it — which is what allows decoder output to be handed
/// straight back to the encoder for re-framing without translation.
///
/// Error hierarchy:
///
/// ```text
///   BlobError
///   ├── SourceIo   ← read failure on the underlying byte source
///   ├── Format     ← bytes at a member boundary are not a valid member
///   └── Producer   ← the stage feeding the sequence failed upstream
/// ```
///
/// Clean end-of-stream is never an error: an exhausted source is reported
/// by the sequence ending, not by any of these variants.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// Reading from the byte source failed.
    #[error("source read failed: {0}")]
    SourceIo(#[source] io::Error),

    /// The bytes at a member boundary did not parse as a member header,
    /// or the member body was corrupt (bad checksum, malformed deflate
    /// data).
    #[error("malformed stream member: {0}")]
    Format(#[source] io::Error),

    /// The producer feeding the sequence failed before a blob could be
    /// yielded. Carries whatever the upstream stage reported.
    #[error("blob producer failed: {0}")]
    Producer(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl BlobError {
    /// Wrap an upstream failure as a producer error.
    pub fn producer(err: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self::Producer(err.into())
    }
}
