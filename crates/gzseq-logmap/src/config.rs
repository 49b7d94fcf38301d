use std::collections::{BTreeSet, HashMap};

use crate::severity::{self, Severity};

/// How the timestamp field's string form is parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TimeFormat {
    /// RFC 3339 with optional fractional seconds (e.g.
    /// `2026-08-05T12:00:00.250Z`).
    #[default]
    Rfc3339,
    /// A chrono strftime format string. Formats without a UTC offset are
    /// interpreted as UTC.
    Custom(String),
}

/// Configuration for the line → record mapping.
///
/// This is an explicit value constructed once by the caller and passed
/// into [`LineMapper::new`](crate::LineMapper::new) — there is no
/// ambient process-wide state. The CLI builds one from its flags and
/// environment variables at startup; library callers fill in the fields
/// directly.
///
/// ```text
/// ┌────────────────┬──────────────────────────────────────────────────┐
/// │ Field          │ Purpose                                          │
/// ├────────────────┼──────────────────────────────────────────────────┤
/// │ message_key    │ JSON key holding the record body ("body")        │
/// │ timestamp_key  │ JSON key holding the timestamp ("time")          │
/// │ time_format    │ string-timestamp parse format (RFC 3339)         │
/// │ severity_key   │ JSON key holding the severity label ("severity") │
/// │ severity_labels│ label → Severity table (case-variant defaults)   │
/// │ resource_keys  │ keys copied into the resource group              │
/// │ attribute_keys │ keys copied into the custom-attribute group      │
/// └────────────────┴──────────────────────────────────────────────────┘
/// ```
///
/// The two key sets are ordered (`BTreeSet`), and group entries are
/// emitted in set order, which keeps the record encoding deterministic
/// for a fixed configuration and input line.
#[derive(Clone, Debug)]
pub struct MapperConfig {
    pub message_key: String,
    pub timestamp_key: String,
    pub time_format: TimeFormat,
    pub severity_key: String,
    pub severity_labels: HashMap<String, Severity>,
    pub resource_keys: BTreeSet<String>,
    pub attribute_keys: BTreeSet<String>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            message_key: "body".to_string(),
            timestamp_key: "time".to_string(),
            time_format: TimeFormat::default(),
            severity_key: "severity".to_string(),
            severity_labels: severity::default_labels(),
            resource_keys: BTreeSet::new(),
            attribute_keys: BTreeSet::new(),
        }
    }
}

/// Split a comma-separated key list into an ordered set.
///
/// Surrounding whitespace is trimmed and empty segments are dropped, so
/// `"host,,region, pod"` yields `{host, pod, region}` and the empty
/// string yields the empty set.
#[must_use]
pub fn parse_key_set(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}
