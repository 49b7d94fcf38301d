use crate::error::WireError;
use crate::varint::{decode_varint, encode_varint};

// ── Encoding helpers ──────────────────────────────────────────────────
//
// These functions append one length-prefixed field to a `Vec<u8>`. The
// record serializer builds its body by chaining these; the layout is
// always: length varint, then the raw payload bytes.

/// Append a length-prefixed byte field.
///
/// Wire layout:
/// ```text
///   length (varint) │ data [length]
/// ```
pub fn encode_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    encode_varint(buf, data.len() as u64);
    buf.extend_from_slice(data);
}

/// Append a length-prefixed UTF-8 string field.
pub fn encode_str(buf: &mut Vec<u8>, s: &str) {
    encode_bytes(buf, s.as_bytes());
}

// ── Decoding helpers ──────────────────────────────────────────────────
//
// Decoding is a cursor-based walk: each call takes the full buffer plus
// the current offset and returns the payload with the number of bytes
// consumed, so the caller advances its own cursor.

/// Decode a length-prefixed byte field from `buf` starting at `offset`.
///
/// # Returns
///
/// `(payload, bytes_consumed)` where `bytes_consumed` covers both the
/// length varint and the payload.
///
/// # Errors
///
/// - [`WireError::LengthOutOfBounds`] if the prefix claims more bytes
///   than the buffer holds.
/// - Varint errors from the length prefix.
pub fn decode_bytes(buf: &[u8], offset: usize) -> Result<(&[u8], usize), WireError> {
    let (len, n) = decode_varint(buf, offset)?;
    let start = offset + n;

    let remaining = buf.len().saturating_sub(start);
    let len_usize = usize::try_from(len).map_err(|_| WireError::LengthOutOfBounds {
        offset: start,
        claimed: len,
        remaining,
    })?;
    if len_usize > remaining {
        return Err(WireError::LengthOutOfBounds {
            offset: start,
            claimed: len,
            remaining,
        });
    }

    Ok((&buf[start..start + len_usize], n + len_usize))
}

/// Decode a length-prefixed UTF-8 string field from `buf` at `offset`.
///
/// # Errors
///
/// [`WireError::InvalidUtf8`] when the payload is not valid UTF-8, plus
/// everything [`decode_bytes`] can report.
pub fn decode_str(buf: &[u8], offset: usize) -> Result<(&str, usize), WireError> {
    let (payload, consumed) = decode_bytes(buf, offset)?;
    let s = std::str::from_utf8(payload).map_err(|_| WireError::InvalidUtf8 { offset })?;
    Ok((s, consumed))
}
