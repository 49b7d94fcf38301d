use std::io;

use gzseq_types::BlobError;

/// Errors that can occur while encoding a blob sequence into a member
/// stream.
///
/// Error hierarchy:
///
/// ```text
///   EncodeError
///   ├── Sequence(BlobError)  ← the input sequence yielded an error
///   ├── Sink(io::Error)      ← writing or finalizing a member failed
///   └── SinkAbort            ← a body write failed AND finalizing the
///                              broken member failed; both are retained
/// ```
///
/// Any of these aborts the whole operation — there is no partial-success
/// mode and no retry. A `Sequence` error is returned before a member is
/// opened for the failing element, so the sink never receives a partial
/// member for it.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The blob sequence itself failed. Nothing was written for the
    /// failing element.
    #[error("blob sequence failed: {0}")]
    Sequence(#[from] BlobError),

    /// A write to the output sink failed — either the member body or the
    /// flush-and-trailer finalization step.
    #[error("sink write failed: {0}")]
    Sink(#[source] io::Error),

    /// The member body write failed, and closing out the broken member
    /// failed as well. The original write failure is never masked by the
    /// cleanup failure; both are reported.
    #[error("sink write failed: {write}; finalizing the member also failed: {finish}")]
    SinkAbort { write: io::Error, finish: io::Error },
}
