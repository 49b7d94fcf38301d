use std::collections::HashMap;

/// Log severity level.
///
/// The wire numbers follow the OpenTelemetry severity-number anchors
/// (TRACE=1, DEBUG=5, INFO=9, WARN=13, ERROR=17, FATAL=21), with 0
/// reserved for records whose severity could not be determined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    #[default]
    Unspecified,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    /// The severity's wire number.
    #[must_use]
    pub fn to_wire(self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::Trace => 1,
            Self::Debug => 5,
            Self::Info => 9,
            Self::Warn => 13,
            Self::Error => 17,
            Self::Fatal => 21,
        }
    }

    /// Map a wire number back to a severity.
    ///
    /// Values off the anchor points fall back to `Unspecified`, the same
    /// defaulting applied to unrecognized labels on the way in.
    #[must_use]
    pub fn from_wire(value: u64) -> Self {
        match value {
            1 => Self::Trace,
            5 => Self::Debug,
            9 => Self::Info,
            13 => Self::Warn,
            17 => Self::Error,
            21 => Self::Fatal,
            _ => Self::Unspecified,
        }
    }

    /// Lowercase display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

/// The default label → severity table.
///
/// Lookup is by exact match, so the table carries the lower / Title /
/// UPPER spellings of each level plus the three "warning" variants.
/// Labels not in the table map to [`Severity::Unspecified`].
#[must_use]
pub fn default_labels() -> HashMap<String, Severity> {
    let entries = [
        ("trace", Severity::Trace),
        ("Trace", Severity::Trace),
        ("TRACE", Severity::Trace),
        ("debug", Severity::Debug),
        ("Debug", Severity::Debug),
        ("DEBUG", Severity::Debug),
        ("info", Severity::Info),
        ("Info", Severity::Info),
        ("INFO", Severity::Info),
        ("warn", Severity::Warn),
        ("Warn", Severity::Warn),
        ("WARN", Severity::Warn),
        ("warning", Severity::Warn),
        ("Warning", Severity::Warn),
        ("WARNING", Severity::Warn),
        ("error", Severity::Error),
        ("Error", Severity::Error),
        ("ERROR", Severity::Error),
        ("fatal", Severity::Fatal),
        ("Fatal", Severity::Fatal),
        ("FATAL", Severity::Fatal),
    ];
    entries
        .into_iter()
        .map(|(label, severity)| (label.to_string(), severity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_numbers_are_the_otel_anchors() {
        assert_eq!(Severity::Unspecified.to_wire(), 0);
        assert_eq!(Severity::Trace.to_wire(), 1);
        assert_eq!(Severity::Debug.to_wire(), 5);
        assert_eq!(Severity::Info.to_wire(), 9);
        assert_eq!(Severity::Warn.to_wire(), 13);
        assert_eq!(Severity::Error.to_wire(), 17);
        assert_eq!(Severity::Fatal.to_wire(), 21);
    }

    #[test]
    fn wire_roundtrip() {
        for severity in [
            Severity::Unspecified,
            Severity::Trace,
            Severity::Debug,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Fatal,
        ] {
            assert_eq!(Severity::from_wire(u64::from(severity.to_wire())), severity);
        }
    }

    #[test]
    fn off_anchor_wire_values_default_to_unspecified() {
        assert_eq!(Severity::from_wire(2), Severity::Unspecified);
        assert_eq!(Severity::from_wire(255), Severity::Unspecified);
    }

    #[test]
    fn default_table_covers_case_variants() {
        let labels = default_labels();
        assert_eq!(labels.get("warning"), Some(&Severity::Warn));
        assert_eq!(labels.get("WARNING"), Some(&Severity::Warn));
        assert_eq!(labels.get("Info"), Some(&Severity::Info));
        assert_eq!(labels.get("verbose"), None);
    }
}
