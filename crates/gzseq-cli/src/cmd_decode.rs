/// Implementation of `gzseq decode`.
///
/// The inverse of `gzseq encode`: walks the member stream lazily via
/// [`BlobDecoder`], parses each blob back into a [`LogRecord`], and
/// prints it as one JSON object per line:
///
/// ```json
/// {"timestamp_us":1785931200000000,"severity":"info","message":"started",
///  "resource":{"host":"db-1"},"attributes":{"ok":true}}
/// ```
///
/// The resource and attribute groups are flattened into plain JSON
/// objects; the typed split (string / int / bool) is recovered from the
/// JSON value types.
use std::io::Write;

use anyhow::{Context, Result};
use gzseq_decoder::BlobDecoder;
use gzseq_logmap::{AttrGroup, LogRecord};
use serde_json::{Map, Value, json};

use crate::DecodeArgs;

/// Run the `gzseq decode` command.
///
/// # Errors
///
/// Returns an error if the input or output cannot be opened, the stream
/// contains an invalid member, a blob is not a valid record, or a write
/// fails.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let reader = crate::open_input(&args.input)?;
    let mut writer = crate::open_output(args.output.as_deref())?;

    let decoder = BlobDecoder::new(reader).with_max_blob_size(args.max_blob_size);

    for (index, item) in decoder.enumerate() {
        let blob = item.with_context(|| format!("member {index}: decode failed"))?;
        let record = LogRecord::from_bytes(&blob)
            .with_context(|| format!("member {index}: blob is not a log record"))?;

        serde_json::to_writer(&mut writer, &record_to_json(&record))
            .with_context(|| format!("member {index}: write failed"))?;
        writer.write_all(b"\n")?;
    }

    writer.flush().context("flushing output failed")?;
    Ok(())
}

/// Render a record as a flat JSON object.
pub(crate) fn record_to_json(record: &LogRecord) -> Value {
    json!({
        "timestamp_us": record.timestamp_us,
        "severity": record.severity.name(),
        "message": record.message,
        "resource": group_to_json(&record.resource),
        "attributes": group_to_json(&record.attributes),
    })
}

fn group_to_json(group: &AttrGroup) -> Value {
    let mut obj = Map::new();
    for entry in &group.strings {
        obj.insert(entry.key.clone(), Value::from(entry.value.clone()));
    }
    for entry in &group.ints {
        obj.insert(entry.key.clone(), Value::from(entry.value));
    }
    for entry in &group.bools {
        obj.insert(entry.key.clone(), Value::from(entry.value));
    }
    Value::Object(obj)
}
