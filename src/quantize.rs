use crate::distance::nearest_index;
use crate::error::{QuantizeError, Result};
use crate::kmeans::{Palette, Vector};

/// Replace every point of `dataset` with its nearest palette entry.
///
/// Order and count are preserved. Meant for the full-resolution dataset,
/// not the sample k-means was trained on.
pub fn quantize_dataset(dataset: &[Vector], palette: &Palette) -> Result<Vec<Vector>> {
    if palette.is_empty() {
        return Err(QuantizeError::EmptyPalette);
    }
    let channels = palette.channels();

    dataset
        .iter()
        .map(|point| {
            if point.len() != channels {
                return Err(QuantizeError::LengthMismatch {
                    expected: channels,
                    found: point.len(),
                });
            }
            let idx = nearest_index(point, palette.colors())?;
            Ok(palette.colors()[idx].clone())
        })
        .collect()
}

/// Store a channel value into a byte: clamp to `[0, 255]`, round half to even.
#[inline]
pub fn to_channel_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0).round_ties_even() as u8
}
