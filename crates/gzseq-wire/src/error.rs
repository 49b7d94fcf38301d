#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Varint encoding exceeded 10 bytes without terminating.
    #[error("varint too long: exceeded 10-byte limit")]
    VarintTooLong,

    /// Input ended before a complete varint or field could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// A length prefix claimed more bytes than the input holds.
    #[error("field length {claimed} exceeds remaining input ({remaining} bytes) at offset {offset}")]
    LengthOutOfBounds {
        offset: usize,
        claimed: u64,
        remaining: usize,
    },

    /// A string field contained invalid UTF-8.
    #[error("invalid UTF-8 in string field at offset {offset}")]
    InvalidUtf8 { offset: usize },
}
