//! Visual day/night classification from mean image luminance.

use crate::features::error::VisualError;
use image::GrayImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default day/night cutoff for mean luminance on the 0-255 scale.
pub const DEFAULT_LUMINANCE_THRESHOLD: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualClassification {
    /// Arithmetic mean of the single-channel luminance over the full image.
    pub mean_luminance: f64,
    /// True when `mean_luminance` exceeds the threshold.
    pub is_day: bool,
}

/// Decodes the image at `path` and classifies it as day or night.
///
/// # Errors
///
/// Returns [`VisualError::Decode`] when the file cannot be opened or decoded.
/// The analysis pipeline treats that as a hard stop, not a silent fallback.
pub fn classify_brightness(
    path: &Path,
    threshold: f64,
) -> Result<VisualClassification, VisualError> {
    let image = image::open(path)?;
    Ok(classify_luma(&image.to_luma8(), threshold))
}

fn classify_luma(luma: &GrayImage, threshold: f64) -> VisualClassification {
    let pixels = luma.as_raw();
    let mean_luminance = if pixels.is_empty() {
        0.0
    } else {
        let sum: u64 = pixels.iter().map(|&p| u64::from(p)).sum();
        sum as f64 / pixels.len() as f64
    };
    VisualClassification {
        mean_luminance,
        is_day: mean_luminance > threshold,
    }
}
