//! Fixed-width length header written ahead of the payload.

use crate::config::{HEADER_BITS, MAX_PAYLOAD_BITS};
use crate::encoding::bits::BitString;
use crate::error::{Error, Result};

/// Encode a payload bit count as a zero-padded 16-digit header.
///
/// # Errors
///
/// [`Error::MessageTooLong`] if the count does not fit in 16 bits.
pub fn encode_header(payload_bits: usize) -> Result<BitString> {
    if payload_bits > MAX_PAYLOAD_BITS {
        return Err(Error::MessageTooLong {
            bits: payload_bits,
            max: MAX_PAYLOAD_BITS,
        });
    }
    Ok(BitString::new(format!(
        "{:0width$b}",
        payload_bits,
        width = HEADER_BITS
    )))
}

/// Parse a 16-digit header back into a payload bit count.
///
/// # Errors
///
/// [`Error::Header`] if the header is not exactly 16 binary digits.
pub fn parse_header(header: &BitString) -> Result<usize> {
    let digits = header.as_str();
    if digits.chars().count() != HEADER_BITS {
        return Err(Error::Header(format!(
            "expected {} header bits, found {}",
            HEADER_BITS,
            digits.chars().count()
        )));
    }
    if !digits.chars().all(|c| c == '0' || c == '1') {
        return Err(Error::Header(format!("malformed header {:?}", digits)));
    }
    u16::from_str_radix(digits, 2)
        .map(usize::from)
        .map_err(|e| Error::Header(e.to_string()))
}
