use gzseq_wire::fields::{decode_str, encode_str};
use gzseq_wire::varint::{decode_varint, decode_zigzag, encode_varint, encode_zigzag};

use crate::error::MapError;
use crate::severity::Severity;

/// One typed key/value pair within an attribute group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyVal<T> {
    pub key: String,
    pub value: T,
}

/// A group of typed key/value pairs, split by value type.
///
/// JSON values map into the three vectors as string / integer / boolean;
/// values of any other JSON type are never placed here — the mapper
/// skips them during selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttrGroup {
    pub strings: Vec<KeyVal<String>>,
    pub ints: Vec<KeyVal<i64>>,
    pub bools: Vec<KeyVal<bool>>,
}

impl AttrGroup {
    /// Total number of entries across all three vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len() + self.ints.len() + self.bools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A fixed-schema log record — the value that becomes one blob.
///
/// # Wire layout
///
/// [`to_bytes`](Self::to_bytes) produces a self-contained, deterministic
/// encoding:
///
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │ timestamp_us  (zigzag varint)                            │
/// │ severity      (varint wire number)                       │
/// │ message       (varint length + UTF-8 bytes)              │
/// │ resource      (group, see below)                         │
/// │ attributes    (group)                                    │
/// └──────────────────────────────────────────────────────────┘
///
/// group := count (varint) │ (key str, value str)*     strings
///        │ count (varint) │ (key str, zigzag varint)* ints
///        │ count (varint) │ (key str, u8)*            bools
/// ```
///
/// Determinism matters because identical input lines under identical
/// configuration must produce identical blobs; group entries are already
/// in configured-key order when the mapper builds the record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogRecord {
    /// Microseconds since the Unix epoch; 0 when the input carried no
    /// usable timestamp.
    pub timestamp_us: i64,
    pub severity: Severity,
    pub message: String,
    pub resource: AttrGroup,
    pub attributes: AttrGroup,
}

impl LogRecord {
    /// Serialize the record into its deterministic binary form.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(64 + self.message.len());

        encode_zigzag(&mut buf, self.timestamp_us);
        encode_varint(&mut buf, u64::from(self.severity.to_wire()));
        encode_str(&mut buf, &self.message);
        encode_group(&mut buf, &self.resource);
        encode_group(&mut buf, &self.attributes);

        buf
    }

    /// Parse a record from its binary form.
    ///
    /// # Errors
    ///
    /// - [`MapError::Wire`] if a varint, length prefix, or string field
    ///   is malformed.
    /// - [`MapError::TrailingBytes`] if the record decoded cleanly but
    ///   did not account for the whole input.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, MapError> {
        let mut cursor = 0;

        let (timestamp_us, n) = decode_zigzag(buf, cursor)?;
        cursor += n;

        let (severity_raw, n) = decode_varint(buf, cursor)?;
        cursor += n;
        let severity = Severity::from_wire(severity_raw);

        let (message, n) = decode_str(buf, cursor)?;
        let message = message.to_string();
        cursor += n;

        let (resource, n) = decode_group(buf, cursor)?;
        cursor += n;

        let (attributes, n) = decode_group(buf, cursor)?;
        cursor += n;

        if cursor != buf.len() {
            return Err(MapError::TrailingBytes {
                extra: buf.len() - cursor,
            });
        }

        Ok(Self {
            timestamp_us,
            severity,
            message,
            resource,
            attributes,
        })
    }
}

fn encode_group(buf: &mut Vec<u8>, group: &AttrGroup) {
    encode_varint(buf, group.strings.len() as u64);
    for entry in &group.strings {
        encode_str(buf, &entry.key);
        encode_str(buf, &entry.value);
    }

    encode_varint(buf, group.ints.len() as u64);
    for entry in &group.ints {
        encode_str(buf, &entry.key);
        encode_zigzag(buf, entry.value);
    }

    encode_varint(buf, group.bools.len() as u64);
    for entry in &group.bools {
        encode_str(buf, &entry.key);
        buf.push(u8::from(entry.value));
    }
}

fn decode_group(buf: &[u8], offset: usize) -> Result<(AttrGroup, usize), MapError> {
    let mut cursor = offset;
    let mut group = AttrGroup::default();

    let (count, n) = decode_varint(buf, cursor)?;
    cursor += n;
    for _ in 0..count {
        let (key, n) = decode_str(buf, cursor)?;
        let key = key.to_string();
        cursor += n;
        let (value, n) = decode_str(buf, cursor)?;
        group.strings.push(KeyVal {
            key,
            value: value.to_string(),
        });
        cursor += n;
    }

    let (count, n) = decode_varint(buf, cursor)?;
    cursor += n;
    for _ in 0..count {
        let (key, n) = decode_str(buf, cursor)?;
        let key = key.to_string();
        cursor += n;
        let (value, n) = decode_zigzag(buf, cursor)?;
        group.ints.push(KeyVal { key, value });
        cursor += n;
    }

    let (count, n) = decode_varint(buf, cursor)?;
    cursor += n;
    for _ in 0..count {
        let (key, n) = decode_str(buf, cursor)?;
        let key = key.to_string();
        cursor += n;
        let raw = *buf
            .get(cursor)
            .ok_or(gzseq_wire::WireError::UnexpectedEof { offset: cursor })?;
        cursor += 1;
        group.bools.push(KeyVal {
            key,
            value: raw != 0,
        });
    }

    Ok((group, cursor - offset))
}
