//! Red-channel LSB steganography over decoded pixel grids.
//!
//! One bit per pixel, written into the least significant bit of the red
//! channel in row-major order: a 16-bit payload length first, then eight bits
//! per character.
//!
//! ```text
//! text → bits (8/char) → [16-bit length][payload] → red LSBs, row-major
//! ```

mod embed;
mod extract;
mod grid;

pub use embed::{embed, embed_into, message_stream, EmbedSummary};
pub use extract::{extract, extract_bits, ExtractState};
pub use grid::{
    pixel_count, red_lsb, set_red_lsb, CapacityReport, PixelGrid, ScanOrder, RED, SCAN_ORDER,
};
