//! Writing a length-prefixed message into red-channel LSBs.

use crate::config::HEADER_BITS;
use crate::encoding::{encode_header, try_encode, BitString};
use crate::error::{Error, Result};
use crate::stego::grid::{pixel_count, set_red_lsb, PixelGrid, SCAN_ORDER};
use log::debug;

/// What an embedding wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSummary {
    /// Payload length declared in the header.
    pub payload_bits: usize,
    /// Header plus payload, one pixel each.
    pub pixels_used: usize,
    /// Pixels whose red value actually changed.
    pub pixels_changed: usize,
    /// Pixels in the grid.
    pub pixels_available: usize,
}

/// Build the bit stream for `text`: 16-bit length header, then payload.
pub fn message_stream(text: &str) -> Result<BitString> {
    let payload = try_encode(text)?;
    let header = encode_header(payload.len())?;

    let mut stream = BitString::with_capacity(HEADER_BITS + payload.len());
    stream.push_bits(&header);
    stream.push_bits(&payload);
    Ok(stream)
}

/// Hide `text` in the grid and hand the grid back.
///
/// See [`embed_into`] for the rules and failure modes.
///
/// # Example
///
/// ```
/// use lsb_stego::stego::{embed, extract, PixelGrid};
///
/// let grid = PixelGrid::new(8, 8);
/// let grid = embed(grid, "Hi").unwrap();
/// assert_eq!(extract(&grid).unwrap(), "Hi");
/// ```
pub fn embed(mut grid: PixelGrid, text: &str) -> Result<PixelGrid> {
    embed_into(&mut grid, text)?;
    Ok(grid)
}

/// Hide `text` in the grid in place.
///
/// Bits go one per pixel into the red channel's least significant bit,
/// in [`SCAN_ORDER`]. Pixels past the end of the message keep their
/// original values, and green, blue, alpha and the upper seven red bits are
/// never modified.
///
/// The grid is left untouched when an error is returned.
///
/// # Errors
///
/// - [`Error::UnsupportedCharacter`] for characters above U+00FF
/// - [`Error::MessageTooLong`] if the payload exceeds 65535 bits
/// - [`Error::Capacity`] if the grid has fewer pixels than header + payload
pub fn embed_into(grid: &mut PixelGrid, text: &str) -> Result<EmbedSummary> {
    let stream = message_stream(text)?;
    let needed = stream.len();
    let available = pixel_count(grid);

    if needed > available {
        return Err(Error::Capacity { needed, available });
    }

    let (width, height) = grid.dimensions();
    let mut changed = 0;
    for ((x, y), bit) in SCAN_ORDER.positions(width, height).zip(stream.bits()) {
        if set_red_lsb(grid.get_pixel_mut(x, y), bit) {
            changed += 1;
        }
    }

    let summary = EmbedSummary {
        payload_bits: needed - HEADER_BITS,
        pixels_used: needed,
        pixels_changed: changed,
        pixels_available: available,
    };
    debug!(
        "embedded {} payload bits into {}/{} pixels ({} changed)",
        summary.payload_bits, summary.pixels_used, summary.pixels_available, summary.pixels_changed
    );

    Ok(summary)
}
