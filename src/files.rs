//! File-level operations: read a carrier image, hide or reveal, write back.

use crate::codec::{codec_for_path, CarrierFormat};
use crate::config::CodecConfig;
use crate::error::{Error, Result};
use crate::stego::{embed_into, extract, CapacityReport, EmbedSummary, PixelGrid};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Outcome of hiding a message in a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HideReport {
    /// File the message was written to.
    pub output: PathBuf,
    /// Format of the written file.
    pub format: CarrierFormat,
    /// Characters hidden.
    pub chars: usize,
    /// Payload bits hidden.
    pub payload_bits: usize,
    /// Pixels whose red value changed.
    pub pixels_changed: usize,
    /// Whether the output went through a lossy codec.
    pub lossy: bool,
}

/// Load a carrier image, choosing the codec from its extension.
pub fn load_grid(path: &Path, config: &CodecConfig) -> Result<PixelGrid> {
    let codec = codec_for_path(path, config);
    let bytes = std::fs::read(path)?;
    let grid = codec.decode(&bytes)?;
    info!(
        "loaded {} as {} ({}x{})",
        path.display(),
        codec.format(),
        grid.width(),
        grid.height()
    );
    Ok(grid)
}

/// Write a grid, choosing the codec from the extension.
pub fn save_grid(path: &Path, grid: &PixelGrid, config: &CodecConfig) -> Result<()> {
    let codec = codec_for_path(path, config);
    let bytes = codec.encode(grid)?;
    std::fs::write(path, &bytes)?;
    info!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Hide `text` in `input` and save the result as `output`.
///
/// # Errors
///
/// Besides embedding errors, [`Error::LossyOutput`] when `output` selects a
/// lossy codec and the configuration forbids it. Nothing is written then.
pub fn hide_in_file(
    input: &Path,
    output: &Path,
    text: &str,
    config: &CodecConfig,
) -> Result<HideReport> {
    let format = CarrierFormat::from_path(output);
    let lossy = codec_for_path(output, config).is_lossy();
    if lossy {
        if !config.allow_lossy_output {
            return Err(Error::LossyOutput(output.to_path_buf()));
        }
        warn!(
            "{} output {} is lossy; the hidden message will likely not survive",
            format,
            output.display()
        );
    }

    let mut grid = load_grid(input, config)?;
    let EmbedSummary {
        payload_bits,
        pixels_changed,
        ..
    } = embed_into(&mut grid, text)?;
    save_grid(output, &grid, config)?;

    Ok(HideReport {
        output: output.to_path_buf(),
        format,
        chars: text.chars().count(),
        payload_bits,
        pixels_changed,
        lossy,
    })
}

/// Recover the message hidden in `input`.
pub fn reveal_from_file(input: &Path, config: &CodecConfig) -> Result<String> {
    let grid = load_grid(input, config)?;
    extract(&grid)
}

/// Report how much text `input` can carry.
pub fn capacity_of_file(input: &Path, config: &CodecConfig) -> Result<CapacityReport> {
    let grid = load_grid(input, config)?;
    Ok(CapacityReport::of(&grid))
}
