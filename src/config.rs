//! Configuration constants and types for LSB steganography.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Width of the length header in bits.
pub const HEADER_BITS: usize = 16;

/// Bits written per character.
pub const BITS_PER_CHAR: usize = 8;

/// Largest payload length the header can declare.
pub const MAX_PAYLOAD_BITS: usize = u16::MAX as usize;

/// Longest message that fits under `MAX_PAYLOAD_BITS` (8191 characters).
pub const MAX_MESSAGE_CHARS: usize = MAX_PAYLOAD_BITS / BITS_PER_CHAR;

/// Default JPEG quality (same as the usual encoder default).
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Lowest accepted JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Highest accepted JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Configuration for reading and writing carrier images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Quality used when the output is JPEG.
    pub jpeg_quality: u8,

    /// Whether a hidden message may be written through a lossy codec.
    /// Recompression almost always destroys the red-channel LSBs.
    pub allow_lossy_output: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            allow_lossy_output: true,
        }
    }
}

impl CodecConfig {
    /// Create a codec configuration; quality is clamped into range.
    pub fn new(jpeg_quality: u8, allow_lossy_output: bool) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY),
            allow_lossy_output,
        }
    }

    /// Load a configuration from a TOML file.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: CodecConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_JPEG_QUALITY..=MAX_JPEG_QUALITY).contains(&self.jpeg_quality) {
            return Err(Error::Config(format!(
                "JPEG quality must be between {} and {}, got {}",
                MIN_JPEG_QUALITY, MAX_JPEG_QUALITY, self.jpeg_quality
            )));
        }
        Ok(())
    }
}
