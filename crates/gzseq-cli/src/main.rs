/// gzseq command-line tool — convert newline-delimited JSON logs to and
/// from concatenated-gzip-member streams, and inspect existing streams.
///
/// # Command overview
///
/// ```text
/// gzseq <COMMAND> [OPTIONS]
///
/// Commands:
///   encode     Map JSON log lines to record blobs and write a member stream
///   decode     Read a member stream and print one JSON object per record
///   inspect    Print a per-member summary of a stream
///   help       Print help information
/// ```
///
/// Every command reads from a file or from stdin (`-`, the default) and
/// writes to `-o` or stdout, so the tool composes in pipes:
///
/// ```text
/// app | gzseq encode --resource-keys host,region > logs.gz
/// gzseq decode logs.gz | jq .message
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid input, etc.)|
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod cmd_decode;
mod cmd_encode;
mod cmd_inspect;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The gzseq command-line tool.
#[derive(Parser)]
#[command(name = "gzseq", version, about = "Blob / gzip-member stream codec CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Map JSON log lines to record blobs and write a member stream.
    Encode(EncodeArgs),
    /// Read a member stream and print one JSON object per record.
    Decode(DecodeArgs),
    /// Print a per-member summary of a stream.
    Inspect(InspectArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `gzseq encode`.
///
/// Reads newline-delimited JSON objects, maps each line into a fixed-schema
/// log record (timestamp, severity, message, resource and attribute groups),
/// and writes one gzip member per record to the output.
///
/// The two key-set flags select which JSON keys are copied into the
/// resource and custom-attribute groups. Both fall back to environment
/// variables so a pipeline can be configured without touching its command
/// line:
///
/// ```text
/// ┌───────────────────┬──────────────────────────┬─────────────────────────┐
/// │ Flag              │ Environment fallback     │ Meaning                 │
/// ├───────────────────┼──────────────────────────┼─────────────────────────┤
/// │ --resource-keys   │ GZSEQ_RESOURCE_KEYS      │ comma-separated keys    │
/// │ --attribute-keys  │ GZSEQ_ATTRIBUTE_KEYS     │ comma-separated keys    │
/// └───────────────────┴──────────────────────────┴─────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Input file of newline-delimited JSON objects, or `-` for stdin.
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Output stream file. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Comma-separated JSON keys copied into the resource group.
    #[arg(long, env = "GZSEQ_RESOURCE_KEYS", default_value = "")]
    pub resource_keys: String,

    /// Comma-separated JSON keys copied into the custom-attribute group.
    #[arg(long, env = "GZSEQ_ATTRIBUTE_KEYS", default_value = "")]
    pub attribute_keys: String,

    /// JSON key holding the record timestamp.
    #[arg(long, default_value = "time")]
    pub time_key: String,

    /// chrono strftime format for string timestamps. RFC 3339 when unset.
    #[arg(long)]
    pub time_format: Option<String>,

    /// JSON key holding the severity label.
    #[arg(long, default_value = "severity")]
    pub severity_key: String,

    /// JSON key holding the record message.
    #[arg(long, default_value = "body")]
    pub message_key: String,

    /// gzip compression level (0 = store, 9 = best).
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=9))]
    pub level: u32,
}

/// Arguments for `gzseq decode`.
///
/// Reads a concatenated-member stream, decodes one record per member, and
/// prints each record as a single-line JSON object. Per-member memory is
/// bounded by `--max-blob-size`; members larger than the cap are truncated
/// to it, which will surface here as a record parse error rather than an
/// allocation blow-up.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Input stream file, or `-` for stdin.
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Output file for the JSON lines. Defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Per-blob byte ceiling while decoding.
    #[arg(long, default_value_t = gzseq_decoder::MAX_BLOB_SIZE_DEFAULT)]
    pub max_blob_size: u64,
}

/// Arguments for `gzseq inspect`.
///
/// Walks the stream member by member and prints a one-line summary per
/// blob (index, decoded size, timestamp, severity, message preview)
/// followed by a total. Members that are not log records are reported as
/// opaque instead of aborting the walk.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Input stream file, or `-` for stdin.
    #[arg(default_value = "-")]
    pub input: PathBuf,

    /// Per-blob byte ceiling while decoding.
    #[arg(long, default_value_t = gzseq_decoder::MAX_BLOB_SIZE_DEFAULT)]
    pub max_blob_size: u64,
}

// ── Shared I/O plumbing ───────────────────────────────────────────────────────

/// Open `path` for buffered reading, with `-` meaning stdin.
pub(crate) fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path == Path::new("-") {
        Ok(Box::new(io::stdin().lock()))
    } else {
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Open `path` for buffered writing, with `None` meaning stdout.
pub(crate) fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        None => Ok(Box::new(io::stdout().lock())),
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
