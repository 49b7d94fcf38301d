/// Implementation of `gzseq inspect`.
///
/// Walks the member stream and prints one summary line per blob without
/// materializing the stream:
///
/// ```text
/// #0      61 B  2026-08-05T12:00:00Z      info   started
/// #1      74 B  2026-08-05T12:00:01Z      error  connection refused
/// 2 members, 135 bytes decoded
/// ```
///
/// A blob that does not parse as a log record is reported as opaque and
/// the walk continues — inspect is a diagnostic, not a validator.
use anyhow::{Context, Result};
use chrono::DateTime;
use gzseq_decoder::BlobDecoder;
use gzseq_logmap::LogRecord;

use crate::InspectArgs;

/// Truncate previews so one member stays on one terminal line.
const PREVIEW_CHARS: usize = 48;

/// Run the `gzseq inspect` command.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or the stream itself
/// is invalid (source failure or malformed member). Unparseable record
/// bodies are reported inline, not returned as errors.
pub fn run(args: &InspectArgs) -> Result<()> {
    let reader = crate::open_input(&args.input)?;
    let decoder = BlobDecoder::new(reader).with_max_blob_size(args.max_blob_size);

    let mut members = 0usize;
    let mut total_bytes = 0usize;

    for (index, item) in decoder.enumerate() {
        let blob = item.with_context(|| format!("member {index}: decode failed"))?;
        members += 1;
        total_bytes += blob.len();

        match LogRecord::from_bytes(&blob) {
            Ok(record) => println!(
                "#{index}  {:>6} B  {}  {:<6} {}",
                blob.len(),
                format_timestamp(record.timestamp_us),
                record.severity.name(),
                preview(&record.message),
            ),
            Err(e) => println!(
                "#{index}  {:>6} B  (not a log record: {e})",
                blob.len(),
            ),
        }
    }

    println!("{members} members, {total_bytes} bytes decoded");
    Ok(())
}

fn format_timestamp(timestamp_us: i64) -> String {
    DateTime::from_timestamp_micros(timestamp_us)
        .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string())
}

fn preview(message: &str) -> String {
    let mut out: String = message.chars().take(PREVIEW_CHARS).collect();
    if message.chars().count() > PREVIEW_CHARS {
        out.push('…');
    }
    out
}
