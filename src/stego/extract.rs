//! Reading a length-prefixed message back out of red-channel LSBs.

use crate::config::HEADER_BITS;
use crate::encoding::{decode, parse_header, BitString};
use crate::error::{Error, Result};
use crate::stego::grid::{red_lsb, PixelGrid, SCAN_ORDER};
use log::debug;

/// Progress of an extraction, advanced one carrier bit at a time.
///
/// `AwaitingHeader` parses the length as soon as its sixteenth bit arrives
/// and moves on to `CollectingPayload`, or straight to `Done` for an empty
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractState {
    /// Fewer than 16 header bits read.
    AwaitingHeader { bits: BitString },
    /// Header parsed; payload bits still outstanding.
    CollectingPayload { length: usize, bits: BitString },
    /// All declared payload bits read.
    Done { bits: BitString },
}

impl Default for ExtractState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractState {
    /// Start in `AwaitingHeader` with no bits.
    pub fn new() -> Self {
        ExtractState::AwaitingHeader {
            bits: BitString::with_capacity(HEADER_BITS),
        }
    }

    /// Whether no further bits are wanted.
    pub fn is_done(&self) -> bool {
        matches!(self, ExtractState::Done { .. })
    }

    /// Feed the next carrier bit.
    ///
    /// Bits fed after `Done` are ignored.
    ///
    /// # Errors
    ///
    /// [`Error::Header`] if the completed header does not parse.
    pub fn push(self, bit: bool) -> Result<Self> {
        match self {
            ExtractState::AwaitingHeader { mut bits } => {
                bits.push_bit(bit);
                if bits.len() < HEADER_BITS {
                    return Ok(ExtractState::AwaitingHeader { bits });
                }
                let length = parse_header(&bits)?;
                debug!("header declares {} payload bits", length);
                Ok(Self::collecting(length, BitString::with_capacity(length)))
            }
            ExtractState::CollectingPayload { length, mut bits } => {
                bits.push_bit(bit);
                Ok(Self::collecting(length, bits))
            }
            done @ ExtractState::Done { .. } => Ok(done),
        }
    }

    fn collecting(length: usize, bits: BitString) -> Self {
        if bits.len() >= length {
            ExtractState::Done { bits }
        } else {
            ExtractState::CollectingPayload { length, bits }
        }
    }

    /// Close the extraction once the grid is exhausted or `Done` is reached.
    ///
    /// # Errors
    ///
    /// - [`Error::Header`] if the header never completed
    /// - [`Error::PayloadTruncated`] if fewer payload bits than declared were read
    pub fn finish(self) -> Result<BitString> {
        match self {
            ExtractState::AwaitingHeader { bits } => Err(Error::Header(format!(
                "image holds only {} of {} header bits",
                bits.len(),
                HEADER_BITS
            ))),
            ExtractState::CollectingPayload { length, bits } => Err(Error::PayloadTruncated {
                declared: length,
                recovered: bits.len(),
            }),
            ExtractState::Done { bits } => Ok(bits),
        }
    }
}

/// Read the raw payload bits from the grid, without decoding them.
pub fn extract_bits(grid: &PixelGrid) -> Result<BitString> {
    let (width, height) = grid.dimensions();
    let mut state = ExtractState::new();

    for (x, y) in SCAN_ORDER.positions(width, height) {
        if state.is_done() {
            break;
        }
        state = state.push(red_lsb(grid.get_pixel(x, y)))?;
    }

    state.finish()
}

/// Recover a message hidden with [`embed_into`](crate::stego::embed_into).
///
/// # Errors
///
/// - [`Error::Header`] when there is nothing encoded
/// - [`Error::PayloadTruncated`] when the image ends before the declared length
/// - [`Error::Decode`] if the payload bits do not form characters
pub fn extract(grid: &PixelGrid) -> Result<String> {
    let payload = extract_bits(grid)?;
    let text = decode(&payload)?;
    debug!(
        "extracted {} characters from {} payload bits",
        text.chars().count(),
        payload.len()
    );
    Ok(text)
}
