//! Binary-digit encoding of messages and their length header.
//!
//! A hidden message is a 16-bit length header followed by eight digits per
//! character, both most significant bit first.

pub mod bits;
pub mod header;

pub use bits::{check_single_byte, decode, encode, try_encode, BitString};
pub use header::{encode_header, parse_header};
