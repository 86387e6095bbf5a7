//! Text to binary-digit conversion.
//!
//! Every character becomes eight `'0'`/`'1'` digits, most significant bit
//! first. Only characters in U+0000..=U+00FF survive the trip unchanged.

use crate::config::BITS_PER_CHAR;
use crate::error::{Error, Result};
use std::fmt;

/// An ordered sequence of binary digits.
///
/// Built by [`encode`] from text, or from any string with [`BitString::new`]
/// (digits are not validated until [`decode`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitString {
    digits: String,
    // Digit count, kept alongside since `digits` may hold multi-byte chars.
    len: usize,
}

impl BitString {
    /// Wrap a string of digits.
    pub fn new(digits: impl Into<String>) -> Self {
        let digits = digits.into();
        let len = digits.chars().count();
        Self { digits, len }
    }

    /// Create an empty bit string with room for `bits` digits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            digits: String::with_capacity(bits),
            len: 0,
        }
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no digits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        self.digits.push(if bit { '1' } else { '0' });
        self.len += 1;
    }

    /// Append all digits of another bit string.
    pub fn push_bits(&mut self, other: &BitString) {
        self.digits.push_str(&other.digits);
        self.len += other.len;
    }

    /// Iterate the digits as bits. Anything other than `'0'` reads as a one.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.digits.chars().map(|c| c != '0')
    }

    /// Borrow the digits.
    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl From<&str> for BitString {
    fn from(digits: &str) -> Self {
        Self::new(digits)
    }
}

/// Convert text to its binary-digit form, eight digits per character.
///
/// Characters above U+00FF keep only their low byte, so they do not
/// round-trip. Use [`try_encode`] to reject them instead.
///
/// # Example
///
/// ```
/// use lsb_stego::encoding::encode;
///
/// assert_eq!(encode("Hi").as_str(), "0100100001101001");
/// ```
pub fn encode(text: &str) -> BitString {
    let mut bits = BitString::with_capacity(text.chars().count() * BITS_PER_CHAR);
    for ch in text.chars() {
        push_byte(&mut bits, ch as u32 as u8);
    }
    bits
}

/// Convert text to binary digits, failing on characters above U+00FF.
pub fn try_encode(text: &str) -> Result<BitString> {
    check_single_byte(text)?;
    Ok(encode(text))
}

/// Ensure every character of `text` fits in one byte.
pub fn check_single_byte(text: &str) -> Result<()> {
    match text.chars().enumerate().find(|(_, ch)| *ch as u32 > 0xFF) {
        Some((position, ch)) => Err(Error::UnsupportedCharacter { ch, position }),
        None => Ok(()),
    }
}

fn push_byte(bits: &mut BitString, byte: u8) {
    for shift in (0..BITS_PER_CHAR).rev() {
        bits.push_bit((byte >> shift) & 1 == 1);
    }
}

/// Convert binary digits back to text.
///
/// A length that is not a multiple of eight is left-padded with zeros first,
/// which only preserves the message when the missing leading bits really are
/// zero. Each group of eight becomes one character in U+0000..=U+00FF.
///
/// # Errors
///
/// [`Error::Decode`] if a group contains anything but `'0'` and `'1'`.
pub fn decode(bits: &BitString) -> Result<String> {
    let digits: Vec<char> = bits.as_str().chars().collect();
    let padding = (BITS_PER_CHAR - digits.len() % BITS_PER_CHAR) % BITS_PER_CHAR;

    let mut padded = vec!['0'; padding];
    padded.extend(digits);

    padded
        .chunks(BITS_PER_CHAR)
        .enumerate()
        .map(|(index, group)| {
            parse_group(group)
                .map(char::from)
                .ok_or_else(|| Error::Decode {
                    index,
                    group: group.iter().collect(),
                })
        })
        .collect()
}

fn parse_group(group: &[char]) -> Option<u8> {
    group.iter().try_fold(0u8, |acc, digit| match digit {
        '0' => Some(acc << 1),
        '1' => Some((acc << 1) | 1),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_hi() {
        assert_eq!(encode("Hi").as_str(), "0100100001101001");
    }

    #[test]
    fn test_encode_empty() {
        let bits = encode("");
        assert!(bits.is_empty());
        assert_eq!(decode(&bits).unwrap(), "");
    }

    #[test]
    fn test_encode_pads_small_code_points() {
        assert_eq!(encode("\n").as_str(), "00001010");
        assert_eq!(encode("\0").as_str(), "00000000");
    }

    #[test]
    fn test_roundtrip_printable_ascii() {
        let text: String = (0x20u8..0x7F).map(char::from).collect();
        let bits = encode(&text);

        assert_eq!(bits.len(), text.len() * 8);
        assert_eq!(decode(&bits).unwrap(), text);
    }

    #[test]
    fn test_roundtrip_latin1() {
        let text = "café ÿ ©";
        assert_eq!(decode(&try_encode(text).unwrap()).unwrap(), text);
    }

    #[test]
    fn test_encode_keeps_low_byte_of_wide_chars() {
        // U+20AC is 0x20AC; only 0xAC survives.
        assert_eq!(encode("€").as_str(), "10101100");
        assert_eq!(decode(&encode("€")).unwrap(), "\u{AC}");
    }

    #[test]
    fn test_try_encode_rejects_wide_chars() {
        let result = try_encode("ab€");
        assert!(matches!(
            result,
            Err(Error::UnsupportedCharacter { ch: '€', position: 2 })
        ));
    }

    #[test]
    fn test_decode_pads_with_leading_zeros() {
        // 'A' = 01000001 with its leading zero dropped.
        assert_eq!(decode(&BitString::from("1000001")).unwrap(), "A");
    }

    #[test]
    fn test_decode_padding_corrupts_first_char_when_bits_are_not_zero() {
        // A stray leading bit shifts into the first group instead of vanishing.
        let bits = BitString::new(format!("1{}", encode("AB")));
        let decoded = decode(&bits).unwrap();

        assert_eq!(decoded.chars().count(), 3);
        assert_eq!(decoded.chars().next(), Some('\u{1}'));
        assert_ne!(decoded, "AB");
    }

    #[test]
    fn test_decode_invalid_digit() {
        let result = decode(&BitString::from("0100100001x01001"));
        match result {
            Err(Error::Decode { index, group }) => {
                assert_eq!(index, 1);
                assert_eq!(group, "01x01001");
            }
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_sign_prefix() {
        assert!(decode(&BitString::from("+0000001")).is_err());
    }

    #[test]
    fn test_push_and_iterate_bits() {
        let mut bits = BitString::default();
        bits.push_bit(true);
        bits.push_bit(false);
        bits.push_bits(&BitString::from("11"));

        assert_eq!(bits.as_str(), "1011");
        assert_eq!(bits.bits().collect::<Vec<_>>(), vec![true, false, true, true]);
    }
}
