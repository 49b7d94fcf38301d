//! End-to-end tests for the full pipeline: JSON log lines → records →
//! blobs → member stream → blobs → records.
//!
//! The codec never looks inside a blob, so these tests are what ties the
//! two halves of the repository together: they prove that the record
//! bytes produced by the mapping layer survive the member stream intact
//! and in order, and that the whole pipeline is deterministic for a
//! fixed configuration.

use std::io;

use gzseq_decoder::BlobDecoder;
use gzseq_encoder::BlobEncoder;
use gzseq_logmap::{LineMapper, LogRecord, MapperConfig, Severity, parse_key_set};
use gzseq_types::BlobError;

fn lines(raw: &[&str]) -> Vec<io::Result<String>> {
    raw.iter().map(|line| Ok((*line).to_string())).collect()
}

fn sample_config() -> MapperConfig {
    MapperConfig {
        resource_keys: parse_key_set("host,region"),
        attribute_keys: parse_key_set("cached,attempt"),
        ..MapperConfig::default()
    }
}

const SAMPLE_LINES: &[&str] = &[
    r#"{"time":"2026-08-05T12:00:00Z","severity":"info","body":"started","host":"db-1","region":"eu","attempt":1}"#,
    r#"{"time":"2026-08-05T12:00:01Z","severity":"ERROR","body":"connection refused","host":"db-1","cached":false}"#,
    r#"{"time":1754395202.5,"body":"numeric timestamp"}"#,
];

/// Encode the sample lines into a member stream.
fn encode_sample() -> Vec<u8> {
    let mapper = LineMapper::new(sample_config());
    BlobEncoder::new(Vec::new())
        .encode(mapper.blobs(lines(SAMPLE_LINES)))
        .expect("sample lines should encode")
}

#[test]
fn records_survive_the_member_stream() {
    let stream = encode_sample();

    let records: Vec<LogRecord> = BlobDecoder::new(&stream[..])
        .map(|item| LogRecord::from_bytes(&item.expect("member should decode")))
        .collect::<Result<_, _>>()
        .expect("blobs should parse back into records");

    assert_eq!(records.len(), 3);

    assert_eq!(records[0].severity, Severity::Info);
    assert_eq!(records[0].message, "started");
    assert_eq!(records[0].resource.strings.len(), 2);
    assert_eq!(records[0].attributes.ints.len(), 1);

    assert_eq!(records[1].severity, Severity::Error);
    assert_eq!(records[1].message, "connection refused");
    assert_eq!(records[1].attributes.bools.len(), 1);

    assert_eq!(records[2].severity, Severity::Unspecified);
    assert_eq!(records[2].timestamp_us, 1_754_395_202_500_000);
}

#[test]
fn pipeline_is_deterministic() {
    assert_eq!(encode_sample(), encode_sample());
}

#[test]
fn bad_line_aborts_the_pipeline_after_a_valid_prefix() {
    let mapper = LineMapper::new(sample_config());
    let input = lines(&[SAMPLE_LINES[0], "{broken"]);

    let mut sink = Vec::new();
    let err = BlobEncoder::new(&mut sink)
        .encode(mapper.blobs(input))
        .unwrap_err();
    assert!(matches!(
        err,
        gzseq_encoder::EncodeError::Sequence(BlobError::Producer(_))
    ));

    // One complete member made it out before the abort.
    let decoded: Vec<_> = BlobDecoder::new(&sink[..])
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(
        LogRecord::from_bytes(&decoded[0]).unwrap().message,
        "started"
    );
}

#[test]
fn mapped_record_snapshot() {
    let mapper = LineMapper::new(sample_config());
    let record = mapper
        .map(SAMPLE_LINES[0].as_bytes())
        .expect("sample line should map");

    insta::assert_debug_snapshot!(record, @r#"
    LogRecord {
        timestamp_us: 1785931200000000,
        severity: Info,
        message: "started",
        resource: AttrGroup {
            strings: [
                KeyVal {
                    key: "host",
                    value: "db-1",
                },
                KeyVal {
                    key: "region",
                    value: "eu",
                },
            ],
            ints: [],
            bools: [],
        },
        attributes: AttrGroup {
            strings: [],
            ints: [
                KeyVal {
                    key: "attempt",
                    value: 1,
                },
            ],
            bools: [],
        },
    }
    "#);
}
