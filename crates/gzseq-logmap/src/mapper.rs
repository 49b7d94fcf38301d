use std::collections::BTreeSet;
use std::io;

use chrono::{DateTime, NaiveDateTime};
use gzseq_types::{Blob, BlobError, BlobResult};
use serde_json::{Map, Value};

use crate::config::{MapperConfig, TimeFormat};
use crate::error::MapError;
use crate::record::{AttrGroup, KeyVal, LogRecord};
use crate::severity::Severity;

/// Maps newline-delimited JSON objects into [`LogRecord`]s and record
/// blobs.
///
/// One mapper holds one resolved [`MapperConfig`]; the same mapper can
/// convert any number of lines. Field extraction is deliberately
/// forgiving — a record is produced for every parseable line, and any
/// field that is missing or carries an unusable JSON type falls back to
/// its zero value:
///
/// ```text
/// ┌───────────┬───────────────────────────────────────────────────────┐
/// │ Field     │ Extraction rule                                       │
/// ├───────────┼───────────────────────────────────────────────────────┤
/// │ timestamp │ string → parse with `time_format`;                    │
/// │           │ number → seconds (fractional ok) → microseconds;      │
/// │           │ anything else → 0                                     │
/// │ severity  │ string → label table lookup; miss or non-string →     │
/// │           │ Unspecified                                           │
/// │ message   │ string kept verbatim; any other present value is      │
/// │           │ rendered as its JSON text; missing → "null"           │
/// │ groups    │ configured key present → string/int/bool copied;      │
/// │           │ other JSON types and absent keys ignored              │
/// └───────────┴───────────────────────────────────────────────────────┘
/// ```
///
/// Only an unparseable line is an error.
pub struct LineMapper {
    config: MapperConfig,
}

impl LineMapper {
    /// Build a mapper from an explicit configuration.
    #[must_use]
    pub fn new(config: MapperConfig) -> Self {
        Self { config }
    }

    /// The configuration this mapper was built from.
    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Parse one JSON line and convert it into a record.
    ///
    /// # Errors
    ///
    /// [`MapError::Json`] when the line is not a JSON object. Field
    /// extraction itself cannot fail.
    pub fn map(&self, line: &[u8]) -> Result<LogRecord, MapError> {
        let flat: Map<String, Value> = serde_json::from_slice(line)?;
        Ok(self.convert(&flat))
    }

    /// Convert an already-parsed flat object into a record.
    #[must_use]
    pub fn convert(&self, flat: &Map<String, Value>) -> LogRecord {
        let mut record = LogRecord::default();
        self.set_timestamp(flat, &mut record);
        self.set_severity(flat, &mut record);
        self.set_message(flat, &mut record);
        collect_group(&self.config.resource_keys, flat, &mut record.resource);
        collect_group(&self.config.attribute_keys, flat, &mut record.attributes);
        record
    }

    /// Adapt a line source into a blob sequence of encoded records.
    ///
    /// Each `Ok` line becomes one blob ([`LogRecord::to_bytes`]); a line
    /// read failure or parse failure is yielded once as
    /// [`BlobError::Producer`] and terminates the sequence, matching the
    /// sequence contract. The item type is what [`BufRead::lines`]
    /// produces, so a reader can be plugged in directly.
    ///
    /// [`BufRead::lines`]: std::io::BufRead::lines
    pub fn blobs<I>(&self, lines: I) -> RecordBlobs<'_, I::IntoIter>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        RecordBlobs {
            mapper: self,
            lines: lines.into_iter(),
            done: false,
        }
    }

    fn set_timestamp(&self, flat: &Map<String, Value>, record: &mut LogRecord) {
        match flat.get(&self.config.timestamp_key) {
            Some(Value::String(s)) => {
                if let Ok(micros) = parse_time(&self.config.time_format, s) {
                    record.timestamp_us = micros;
                }
            }
            Some(Value::Number(n)) => {
                // Numeric timestamps are seconds, possibly fractional.
                if let Some(seconds) = n.as_f64() {
                    #[allow(clippy::cast_possible_truncation)]
                    {
                        record.timestamp_us = (seconds * 1_000_000.0) as i64;
                    }
                }
            }
            _ => {}
        }
    }

    fn set_severity(&self, flat: &Map<String, Value>, record: &mut LogRecord) {
        record.severity = match flat.get(&self.config.severity_key) {
            Some(Value::String(label)) => self
                .config
                .severity_labels
                .get(label)
                .copied()
                .unwrap_or_default(),
            _ => Severity::Unspecified,
        };
    }

    fn set_message(&self, flat: &Map<String, Value>, record: &mut LogRecord) {
        record.message = match flat.get(&self.config.message_key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => Value::Null.to_string(),
        };
    }
}

/// Parse a string timestamp into microseconds since the Unix epoch.
fn parse_time(format: &TimeFormat, s: &str) -> Result<i64, chrono::ParseError> {
    match format {
        TimeFormat::Rfc3339 => Ok(DateTime::parse_from_rfc3339(s)?.timestamp_micros()),
        TimeFormat::Custom(fmt) => match DateTime::parse_from_str(s, fmt) {
            Ok(t) => Ok(t.timestamp_micros()),
            // No offset in the format: take the value as UTC.
            Err(_) => Ok(NaiveDateTime::parse_from_str(s, fmt)?
                .and_utc()
                .timestamp_micros()),
        },
    }
}

/// Copy the configured keys' values out of a flat object into a group.
///
/// Iteration follows the set's order, so the group layout — and with it
/// the record encoding — is deterministic for a fixed configuration.
fn collect_group(keys: &BTreeSet<String>, flat: &Map<String, Value>, group: &mut AttrGroup) {
    for key in keys {
        match flat.get(key) {
            Some(Value::String(s)) => group.strings.push(KeyVal {
                key: key.clone(),
                value: s.clone(),
            }),
            Some(Value::Number(n)) => {
                if let Some(f) = n.as_f64() {
                    #[allow(clippy::cast_possible_truncation)]
                    group.ints.push(KeyVal {
                        key: key.clone(),
                        value: f as i64,
                    });
                }
            }
            Some(Value::Bool(b)) => group.bools.push(KeyVal {
                key: key.clone(),
                value: *b,
            }),
            _ => {}
        }
    }
}

/// The blob sequence produced by [`LineMapper::blobs`].
///
/// Yields one encoded-record blob per input line. After the first error
/// — a failed line read or an unparseable line — the sequence is
/// terminal and yields nothing further.
pub struct RecordBlobs<'a, I> {
    mapper: &'a LineMapper,
    lines: I,
    done: bool,
}

impl<I> Iterator for RecordBlobs<'_, I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = BlobResult;

    fn next(&mut self) -> Option<BlobResult> {
        if self.done {
            return None;
        }

        let line = match self.lines.next()? {
            Ok(line) => line,
            Err(e) => {
                self.done = true;
                return Some(Err(BlobError::producer(e)));
            }
        };

        match self.mapper.map(line.as_bytes()) {
            Ok(record) => Some(Ok(Blob::from(record.to_bytes()))),
            Err(e) => {
                self.done = true;
                Some(Err(BlobError::producer(e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::parse_key_set;

    use super::*;

    fn mapper_with_keys(resource: &str, attrs: &str) -> LineMapper {
        LineMapper::new(MapperConfig {
            resource_keys: parse_key_set(resource),
            attribute_keys: parse_key_set(attrs),
            ..MapperConfig::default()
        })
    }

    #[test]
    fn maps_the_three_core_fields() {
        let mapper = LineMapper::new(MapperConfig::default());
        let record = mapper
            .map(br#"{"time":"2026-08-05T12:00:00Z","severity":"info","body":"started"}"#)
            .unwrap();

        assert_eq!(record.severity, Severity::Info);
        assert_eq!(record.message, "started");
        assert_eq!(record.timestamp_us, 1_785_931_200_000_000);
    }

    #[test]
    fn numeric_timestamp_is_fractional_seconds() {
        let mapper = LineMapper::new(MapperConfig::default());
        let record = mapper.map(br#"{"time":1700000000.25}"#).unwrap();
        assert_eq!(record.timestamp_us, 1_700_000_000_250_000);
    }

    #[test]
    fn unusable_timestamp_leaves_zero() {
        let mapper = LineMapper::new(MapperConfig::default());
        for line in [
            br#"{"time":true}"#.as_slice(),
            br#"{"time":"not a date"}"#.as_slice(),
            br#"{}"#.as_slice(),
        ] {
            assert_eq!(mapper.map(line).unwrap().timestamp_us, 0);
        }
    }

    #[test]
    fn unknown_or_mistyped_severity_is_unspecified() {
        let mapper = LineMapper::new(MapperConfig::default());
        assert_eq!(
            mapper.map(br#"{"severity":"verbose"}"#).unwrap().severity,
            Severity::Unspecified
        );
        assert_eq!(
            mapper.map(br#"{"severity":17}"#).unwrap().severity,
            Severity::Unspecified
        );
    }

    #[test]
    fn non_string_message_renders_as_json_text() {
        let mapper = LineMapper::new(MapperConfig::default());
        assert_eq!(mapper.map(br#"{"body":42}"#).unwrap().message, "42");
        assert_eq!(mapper.map(br#"{}"#).unwrap().message, "null");
    }

    #[test]
    fn groups_select_only_configured_keys_by_type() {
        let mapper = mapper_with_keys("host,region,port", "ok,ignored,count");
        let record = mapper
            .map(
                br#"{"host":"db-1","region":"eu","port":5432,"ok":true,"count":2.9,"ignored":[1,2],"extra":"dropped"}"#,
            )
            .unwrap();

        assert_eq!(
            record.resource.strings,
            vec![
                KeyVal { key: "host".to_string(), value: "db-1".to_string() },
                KeyVal { key: "region".to_string(), value: "eu".to_string() },
            ]
        );
        assert_eq!(
            record.resource.ints,
            vec![KeyVal { key: "port".to_string(), value: 5432 }]
        );
        // 2.9 truncates toward zero; the array under "ignored" is skipped
        assert_eq!(
            record.attributes.ints,
            vec![KeyVal { key: "count".to_string(), value: 2 }]
        );
        assert_eq!(
            record.attributes.bools,
            vec![KeyVal { key: "ok".to_string(), value: true }]
        );
        assert!(record.attributes.strings.is_empty());
    }

    #[test]
    fn custom_time_format_without_offset_is_utc() {
        let mapper = LineMapper::new(MapperConfig {
            time_format: TimeFormat::Custom("%Y-%m-%d %H:%M:%S".to_string()),
            ..MapperConfig::default()
        });
        let record = mapper.map(br#"{"time":"2026-08-05 12:00:00"}"#).unwrap();
        assert_eq!(record.timestamp_us, 1_785_931_200_000_000);
    }

    #[test]
    fn blobs_yield_one_encoded_record_per_line() {
        let mapper = LineMapper::new(MapperConfig::default());
        let lines = [
            Ok(r#"{"body":"one"}"#.to_string()),
            Ok(r#"{"body":"two"}"#.to_string()),
        ];

        let blobs: Vec<_> = mapper.blobs(lines).collect::<Result<Vec<_>, _>>().unwrap();
        assert_eq!(blobs.len(), 2);
        assert_eq!(LogRecord::from_bytes(&blobs[0]).unwrap().message, "one");
        assert_eq!(LogRecord::from_bytes(&blobs[1]).unwrap().message, "two");
    }

    #[test]
    fn blobs_are_terminal_after_a_bad_line() {
        let mapper = LineMapper::new(MapperConfig::default());
        let lines = [
            Ok(r#"{"body":"fine"}"#.to_string()),
            Ok("not json".to_string()),
            Ok(r#"{"body":"never reached"}"#.to_string()),
        ];

        let mut blobs = mapper.blobs(lines);
        assert!(blobs.next().unwrap().is_ok());
        assert!(matches!(
            blobs.next().unwrap(),
            Err(BlobError::Producer(_))
        ));
        assert!(blobs.next().is_none());
    }
}
