#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;

pub use encoder::{BlobEncoder, encode_to_writer};
pub use error::EncodeError;
