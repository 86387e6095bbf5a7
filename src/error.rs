//! Error types for LSB steganography.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for steganography operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while hiding or recovering a message.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image could not be decoded or encoded.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// An 8-bit group of the payload is not a binary number.
    #[error("Cannot decode bit group {index} ({group:?}) as a byte")]
    Decode { index: usize, group: String },

    /// The 16-bit length header is missing or malformed.
    #[error("There is nothing encoded: {0}")]
    Header(String),

    /// The grid has too few pixels for header and payload.
    #[error("Image too small: need {needed} pixels, have {available} pixels")]
    Capacity { needed: usize, available: usize },

    /// The grid ended before the declared payload length was read.
    #[error("Payload truncated: header declares {declared} bits, image holds {recovered}")]
    PayloadTruncated { declared: usize, recovered: usize },

    /// The payload bit count does not fit in the length header.
    #[error("Message too long: {bits} payload bits, maximum is {max}")]
    MessageTooLong { bits: usize, max: usize },

    /// A character cannot be represented in a single byte.
    #[error("Unsupported character {ch:?} at position {position}: only U+0000..=U+00FF can be hidden")]
    UnsupportedCharacter { ch: char, position: usize },

    /// Refused to write a hidden message through a lossy codec.
    #[error("Refusing lossy output {0}: recompression destroys the hidden bits")]
    LossyOutput(PathBuf),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
