//! LSB Image Steganography
//!
//! Hides a short text message in the least significant bit of each pixel's
//! red channel and recovers it later.
//!
//! # Features
//!
//! - **Bit codec**: eight binary digits per character, most significant first
//! - **Length header**: a 16-bit payload length precedes the message
//! - **Red-channel LSB embedding**: one bit per pixel, row-major, nothing else touched
//! - **Checked extraction**: missing headers and truncated payloads are reported
//! - **CLI Interface**: `encode`, `decode`, `capacity` and an interactive menu
//!
//! # Architecture
//!
//! ```text
//! Image file → Decode (PNG/JPEG) → Embed / Extract (red LSBs) → Encode → Image file
//! ```
//!
//! Hidden bits only survive lossless output. Re-saving as JPEG destroys them.
//!
//! # Example
//!
//! ```rust
//! use lsb_stego::stego::{embed, extract, PixelGrid};
//!
//! let carrier = PixelGrid::new(16, 16);
//! let stego = embed(carrier, "Hidden data").unwrap();
//!
//! assert_eq!(extract(&stego).unwrap(), "Hidden data");
//! ```

pub mod codec;
pub mod config;
pub mod encoding;
pub mod error;
pub mod files;
pub mod stego;

pub use config::CodecConfig;
pub use error::{Error, Result};
pub use stego::{embed, extract, PixelGrid};
