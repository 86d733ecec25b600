// ------------------------------------------------------------
// Image <-> dataset conversion
// ------------------------------------------------------------

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat, RgbaImage, imageops::FilterType};
use palette::Srgba;

use crate::downsample::{MAX_KMEANS_PIXELS, sample_dimensions};
use crate::error::{QuantizeError, Result};
use crate::kmeans::{DEFAULT_K, KMeans, Palette, Vector};
use crate::quantize::{quantize_dataset, to_channel_u8};

/// Channels per pixel in datasets extracted from images (RGBA).
pub const CHANNELS: usize = 4;

/// K-means pass cap used by the image pipeline. Once `k` exceeds the number
/// of distinct colors, empty clusters are reseeded on every pass and exact
/// convergence may never happen.
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000;

/// Settings for the image-level pipeline.
#[derive(Debug, Clone)]
pub struct QuantizeOptions {
    /// Number of palette colors.
    pub k: usize,
    /// Pixel budget for the k-means sample; `None` or `Some(0)` clusters at
    /// full resolution.
    pub max_pixels: Option<usize>,
    /// Cap on k-means passes; `None` runs until exact convergence.
    pub max_iterations: Option<usize>,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            max_pixels: Some(MAX_KMEANS_PIXELS),
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
        }
    }
}

impl QuantizeOptions {
    fn kmeans(&self) -> KMeans {
        let kmeans = KMeans::new(self.k);
        match self.max_iterations {
            Some(max) => kmeans.with_max_iterations(max),
            None => kmeans,
        }
    }
}

/// Result of quantizing an image.
#[derive(Debug, Clone)]
pub struct QuantizedImage {
    pub image: RgbaImage,
    pub palette: Palette,
}

/// Extract one RGBA vector per pixel, row-major.
///
/// When `budget` is set and the image has more pixels than that, the image is
/// resized first (see [`sample_dimensions`]).
pub fn pixel_dataset(img: &DynamicImage, budget: Option<usize>) -> Vec<Vector> {
    let (width, height) = img.dimensions();
    let rgba = match budget.and_then(|b| sample_dimensions(width, height, b)) {
        Some((w, h)) => image::imageops::resize(img, w, h, FilterType::Triangle),
        None => img.to_rgba8(),
    };

    rgba.as_raw()
        .chunks_exact(CHANNELS)
        .map(|px| px.iter().map(|&c| f64::from(c)).collect())
        .collect()
}

/// Inverse of [`pixel_dataset`] at full resolution.
pub fn render_dataset(width: u32, height: u32, dataset: &[Vector]) -> Result<RgbaImage> {
    let shape_mismatch = || QuantizeError::ShapeMismatch {
        points: dataset.len(),
        width,
        height,
    };
    if dataset.len() != width as usize * height as usize {
        return Err(shape_mismatch());
    }

    let mut raw = Vec::with_capacity(dataset.len() * CHANNELS);
    for point in dataset {
        if point.len() != CHANNELS {
            return Err(QuantizeError::LengthMismatch {
                expected: CHANNELS,
                found: point.len(),
            });
        }
        raw.extend(point.iter().map(|&v| to_channel_u8(v)));
    }

    RgbaImage::from_raw(width, height, raw).ok_or_else(shape_mismatch)
}

/// Cluster a (possibly downsampled) copy of `img`, then remap every pixel of
/// the full-resolution image onto the resulting palette.
pub fn quantize_image(img: &DynamicImage, options: &QuantizeOptions) -> Result<QuantizedImage> {
    let (width, height) = img.dimensions();

    let sample = pixel_dataset(img, options.max_pixels);
    let palette = options.kmeans().run(&sample)?;

    let full = pixel_dataset(img, None);
    let quantized = quantize_dataset(&full, &palette)?;
    let image = render_dataset(width, height, &quantized)?;

    Ok(QuantizedImage { image, palette })
}

/// Palette entries as 8-bit sRGBA. Missing color channels read as 0, a
/// missing alpha channel as opaque.
pub fn palette_srgba(palette: &Palette) -> Vec<Srgba<u8>> {
    palette
        .colors()
        .iter()
        .map(|c| {
            let channel = |i: usize, fallback: u8| c.get(i).map_or(fallback, |&v| to_channel_u8(v));
            Srgba::new(channel(0, 0), channel(1, 0), channel(2, 0), channel(3, u8::MAX))
        })
        .collect()
}

/// `RRGGBB` hex codes of the palette entries.
pub fn palette_hex(palette: &Palette) -> Vec<String> {
    palette_srgba(palette)
        .iter()
        .map(|c| format!("{:02X}{:02X}{:02X}", c.red, c.green, c.blue))
        .collect()
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}
