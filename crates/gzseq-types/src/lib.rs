#![warn(clippy::pedantic)]

pub mod blob;
pub mod error;

pub use blob::{Blob, BlobResult, BlobSequence};
pub use error::BlobError;
