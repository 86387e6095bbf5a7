//! Image codecs that turn files into pixel grids and back.
//!
//! The steganography layer only ever sees raw RGBA values. Which codec
//! reads or writes a file is picked from its extension: `.jpg`/`.jpeg`
//! select JPEG, anything else PNG.

use crate::config::CodecConfig;
use crate::error::Result;
use crate::stego::PixelGrid;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage, ImageEncoder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Carrier file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarrierFormat {
    /// Lossless; hidden bits survive.
    Png,
    /// Lossy; recompression scrambles hidden bits.
    Jpeg,
}

impl CarrierFormat {
    /// Pick the format from a file extension (case-insensitive).
    ///
    /// Paths without an extension are treated as PNG.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("jpg") | Some("jpeg") => CarrierFormat::Jpeg,
            _ => CarrierFormat::Png,
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            CarrierFormat::Png => image::ImageFormat::Png,
            CarrierFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

impl fmt::Display for CarrierFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarrierFormat::Png => f.write_str("PNG"),
            CarrierFormat::Jpeg => f.write_str("JPEG"),
        }
    }
}

/// Converts between encoded image bytes and a pixel grid.
pub trait ImageCodec: Send + Sync {
    /// Decode image bytes into an RGBA grid.
    fn decode(&self, bytes: &[u8]) -> Result<PixelGrid>;

    /// Encode a grid into image bytes.
    fn encode(&self, grid: &PixelGrid) -> Result<Vec<u8>>;

    /// Whether encoding may alter pixel values.
    fn is_lossy(&self) -> bool;

    /// Format handled by this codec.
    fn format(&self) -> CarrierFormat;
}

fn decode_as(bytes: &[u8], format: CarrierFormat) -> Result<PixelGrid> {
    let image = image::load_from_memory_with_format(bytes, format.image_format())?;
    Ok(image.to_rgba8())
}

/// Lossless PNG codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngCodec;

impl ImageCodec for PngCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelGrid> {
        decode_as(bytes, CarrierFormat::Png)
    }

    fn encode(&self, grid: &PixelGrid) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        PngEncoder::new(&mut bytes).write_image(
            grid.as_raw(),
            grid.width(),
            grid.height(),
            ColorType::Rgba8,
        )?;
        Ok(bytes)
    }

    fn is_lossy(&self) -> bool {
        false
    }

    fn format(&self) -> CarrierFormat {
        CarrierFormat::Png
    }
}

/// Lossy JPEG codec. Alpha is dropped on encode.
#[derive(Debug, Clone, Copy)]
pub struct JpegCodec {
    /// Encoder quality, 1 to 100.
    pub quality: u8,
}

impl JpegCodec {
    /// Create a JPEG codec with the given quality.
    pub fn new(quality: u8) -> Self {
        Self { quality }
    }
}

impl ImageCodec for JpegCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelGrid> {
        decode_as(bytes, CarrierFormat::Jpeg)
    }

    fn encode(&self, grid: &PixelGrid) -> Result<Vec<u8>> {
        let rgb = DynamicImage::ImageRgba8(grid.clone()).to_rgb8();
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, self.quality).write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ColorType::Rgb8,
        )?;
        Ok(bytes)
    }

    fn is_lossy(&self) -> bool {
        true
    }

    fn format(&self) -> CarrierFormat {
        CarrierFormat::Jpeg
    }
}

/// Create the codec for a format.
pub fn codec_for(format: CarrierFormat, config: &CodecConfig) -> Box<dyn ImageCodec> {
    match format {
        CarrierFormat::Png => Box::new(PngCodec),
        CarrierFormat::Jpeg => Box::new(JpegCodec::new(config.jpeg_quality)),
    }
}

/// Create the codec matching a file's extension.
pub fn codec_for_path(path: &Path, config: &CodecConfig) -> Box<dyn ImageCodec> {
    codec_for(CarrierFormat::from_path(path), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(width: u32, height: u32) -> PixelGrid {
        PixelGrid::from_fn(width, height, |x, y| {
            Rgba([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8, 255])
        })
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(CarrierFormat::from_path(Path::new("a.jpg")), CarrierFormat::Jpeg);
        assert_eq!(CarrierFormat::from_path(Path::new("a.JPEG")), CarrierFormat::Jpeg);
        assert_eq!(CarrierFormat::from_path(Path::new("dir.v2/a.png")), CarrierFormat::Png);
        assert_eq!(CarrierFormat::from_path(Path::new("a.bmp")), CarrierFormat::Png);
        assert_eq!(CarrierFormat::from_path(Path::new("noext")), CarrierFormat::Png);
    }

    #[test]
    fn test_png_preserves_pixels() {
        let grid = gradient(16, 16);
        let bytes = PngCodec.encode(&grid).unwrap();
        assert_eq!(PngCodec.decode(&bytes).unwrap(), grid);
    }

    #[test]
    fn test_jpeg_roundtrip_keeps_dimensions() {
        let codec = JpegCodec::new(90);
        let bytes = codec.encode(&gradient(16, 8)).unwrap();
        let decoded = codec.decode(&bytes).unwrap();

        assert_eq!(decoded.dimensions(), (16, 8));
        assert!(decoded.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(PngCodec.decode(b"not an image").is_err());
    }

    #[test]
    fn test_codec_selection() {
        let config = CodecConfig::new(60, true);

        let png = codec_for_path(Path::new("out.png"), &config);
        assert!(!png.is_lossy());
        assert_eq!(png.format(), CarrierFormat::Png);

        let jpeg = codec_for_path(Path::new("out.jpg"), &config);
        assert!(jpeg.is_lossy());
        assert_eq!(jpeg.format(), CarrierFormat::Jpeg);
    }
}
