#![warn(clippy::pedantic)]

//! Shared fixtures for the gzseq integration tests and benches.

use std::io::{self, Read};

use gzseq_encoder::BlobEncoder;
use gzseq_types::{Blob, BlobResult};

/// Wrap byte slices as an all-`Ok` blob sequence.
#[must_use]
pub fn ok_blobs(items: &[&[u8]]) -> Vec<BlobResult> {
    items
        .iter()
        .map(|item| Ok(Blob::copy_from_slice(item)))
        .collect()
}

/// Encode byte slices into a member stream at the default level.
///
/// # Panics
///
/// Panics if encoding fails, which an in-memory sink never does.
#[must_use]
pub fn encode(items: &[&[u8]]) -> Vec<u8> {
    BlobEncoder::new(Vec::new())
        .encode(ok_blobs(items))
        .expect("in-memory encode cannot fail")
}

/// A source that serves its payload and then fails instead of reporting
/// a clean end-of-stream.
///
/// Any read past the payload returns an error, so a test can prove that
/// a consumer which stopped early never caused another source read: had
/// the decoder read beyond the served bytes, the pull would have
/// surfaced this error instead of a blob.
pub struct TripwireReader {
    data: io::Cursor<Vec<u8>>,
}

impl TripwireReader {
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data: io::Cursor::new(data),
        }
    }
}

impl Read for TripwireReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.read(buf)?;
        if n == 0 {
            return Err(io::Error::other("tripwire: read past the served bytes"));
        }
        Ok(n)
    }
}
