//! Pixel grid access: scan order, red-channel LSBs and capacity.

use crate::config::{BITS_PER_CHAR, HEADER_BITS, MAX_PAYLOAD_BITS};
use image::Rgba;
use serde::{Deserialize, Serialize};

/// Decoded image, 8 bits per RGBA channel, addressed by `(x, y)`.
pub type PixelGrid = image::RgbaImage;

/// Index of the red channel within a pixel.
pub const RED: usize = 0;

/// Order in which pixels carry bits.
///
/// Embedding and extraction must walk the grid identically, otherwise the
/// message comes back scrambled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanOrder {
    /// Rows top to bottom (`y` outer), pixels left to right (`x` inner).
    RowMajor,
}

/// The scan order used by both embedding and extraction.
pub const SCAN_ORDER: ScanOrder = ScanOrder::RowMajor;

impl ScanOrder {
    /// Iterate pixel positions of a `width` x `height` grid in this order.
    pub fn positions(self, width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
        match self {
            ScanOrder::RowMajor => (0..height).flat_map(move |y| (0..width).map(move |x| (x, y))),
        }
    }
}

/// Total number of pixels (one carrier bit each).
pub fn pixel_count(grid: &PixelGrid) -> usize {
    let (width, height) = grid.dimensions();
    width as usize * height as usize
}

/// Least significant bit of the red channel.
pub fn red_lsb(pixel: &Rgba<u8>) -> bool {
    pixel[RED] & 1 == 1
}

/// Set or clear the red channel's least significant bit.
///
/// Returns whether the pixel changed.
pub fn set_red_lsb(pixel: &mut Rgba<u8>, bit: bool) -> bool {
    let before = pixel[RED];
    pixel[RED] = (before & !1) | u8::from(bit);
    pixel[RED] != before
}

/// How much text a grid of a given size can carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityReport {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Number of carrier pixels.
    pub pixels: usize,
    /// Payload bits available after the header.
    pub payload_bits: usize,
    /// Longest message that fits.
    pub max_chars: usize,
}

impl CapacityReport {
    /// Compute the capacity of a `width` x `height` grid.
    pub fn for_dimensions(width: u32, height: u32) -> Self {
        let pixels = width as usize * height as usize;
        let payload_bits = pixels.saturating_sub(HEADER_BITS).min(MAX_PAYLOAD_BITS);
        Self {
            width,
            height,
            pixels,
            payload_bits,
            max_chars: payload_bits / BITS_PER_CHAR,
        }
    }

    /// Compute the capacity of an existing grid.
    pub fn of(grid: &PixelGrid) -> Self {
        let (width, height) = grid.dimensions();
        Self::for_dimensions(width, height)
    }

    /// Whether a message of `chars` characters fits.
    pub fn fits(&self, chars: usize) -> bool {
        chars <= self.max_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_order() {
        let positions: Vec<_> = SCAN_ORDER.positions(3, 2).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn test_scan_order_matches_buffer_layout() {
        let grid = PixelGrid::new(5, 4);
        let walked: Vec<_> = SCAN_ORDER.positions(5, 4).collect();
        let buffer: Vec<_> = grid.enumerate_pixels().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(walked, buffer);
    }

    #[test]
    fn test_empty_dimensions() {
        assert_eq!(SCAN_ORDER.positions(0, 7).count(), 0);
        assert_eq!(SCAN_ORDER.positions(7, 0).count(), 0);
    }

    #[test]
    fn test_set_red_lsb_touches_only_low_red_bit() {
        let mut pixel = Rgba([0b1010_1010, 11, 22, 33]);

        assert!(set_red_lsb(&mut pixel, true));
        assert_eq!(pixel, Rgba([0b1010_1011, 11, 22, 33]));
        assert!(red_lsb(&pixel));

        assert!(!set_red_lsb(&mut pixel, true));
        assert!(set_red_lsb(&mut pixel, false));
        assert_eq!(pixel, Rgba([0b1010_1010, 11, 22, 33]));
    }

    #[test]
    fn test_capacity() {
        let report = CapacityReport::for_dimensions(10, 10);
        assert_eq!(report.pixels, 100);
        assert_eq!(report.payload_bits, 84);
        assert_eq!(report.max_chars, 10);
        assert!(report.fits(10));
        assert!(!report.fits(11));
    }

    #[test]
    fn test_capacity_smaller_than_header() {
        let report = CapacityReport::for_dimensions(3, 3);
        assert_eq!(report.payload_bits, 0);
        assert_eq!(report.max_chars, 0);
        assert!(report.fits(0));
    }

    #[test]
    fn test_capacity_capped_by_header() {
        let report = CapacityReport::for_dimensions(1000, 1000);
        assert_eq!(report.payload_bits, MAX_PAYLOAD_BITS);
        assert_eq!(report.max_chars, 8191);
    }
}
