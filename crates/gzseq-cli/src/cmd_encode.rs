/// Implementation of `gzseq encode`.
///
/// Builds a [`MapperConfig`] from the command-line flags (with the two
/// key sets falling back to `GZSEQ_RESOURCE_KEYS` / `GZSEQ_ATTRIBUTE_KEYS`),
/// then streams: input lines → [`LineMapper::blobs`] → [`BlobEncoder`].
/// Nothing is buffered beyond one record, so arbitrarily long inputs
/// encode in constant memory.
///
/// A line that fails to parse aborts the run; everything already written
/// is a sequence of complete members, so partial output remains decodable
/// up to the failure point.
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use flate2::Compression;
use gzseq_encoder::BlobEncoder;
use gzseq_logmap::{LineMapper, MapperConfig, TimeFormat, parse_key_set};

use crate::EncodeArgs;

/// Run the `gzseq encode` command.
///
/// # Errors
///
/// Returns an error if the input or output cannot be opened, a line
/// cannot be read or parsed as a JSON object, or a member write fails.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let config = MapperConfig {
        message_key: args.message_key.clone(),
        timestamp_key: args.time_key.clone(),
        time_format: args
            .time_format
            .as_ref()
            .map_or(TimeFormat::Rfc3339, |fmt| TimeFormat::Custom(fmt.clone())),
        severity_key: args.severity_key.clone(),
        resource_keys: parse_key_set(&args.resource_keys),
        attribute_keys: parse_key_set(&args.attribute_keys),
        ..MapperConfig::default()
    };
    let mapper = LineMapper::new(config);

    let reader = crate::open_input(&args.input)?;
    let sink = crate::open_output(args.output.as_deref())?;

    let mut sink = BlobEncoder::new(sink)
        .with_level(Compression::new(args.level))
        .encode(mapper.blobs(reader.lines()))
        .context("encoding failed")?;

    sink.flush().context("flushing output failed")?;
    Ok(())
}
