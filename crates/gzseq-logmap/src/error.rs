use gzseq_wire::WireError;

/// Errors from the record-mapping layer.
///
/// Error hierarchy:
///
/// ```text
///   MapError
///   ├── Json(serde_json::Error)  ← input line is not a JSON object
///   ├── Wire(WireError)          ← record bytes failed to decode
///   └── TrailingBytes            ← record decoded but bytes were left over
/// ```
///
/// Mapping a parsed record never fails: a missing or mistyped timestamp,
/// severity, or attribute simply falls back to its zero value, so only
/// malformed input lines and malformed record bytes are errors here.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// The input line did not parse as a JSON object.
    #[error("invalid JSON record: {0}")]
    Json(#[from] serde_json::Error),

    /// The record bytes were structurally invalid (truncated varint,
    /// length prefix out of bounds, non-UTF-8 string field).
    #[error(transparent)]
    Wire(#[from] WireError),

    /// A record decoded cleanly but did not account for the whole blob.
    #[error("record decoded but {extra} trailing bytes remain")]
    TrailingBytes { extra: usize },
}
