use wasm_bindgen::prelude::*;
use js_sys::{Array, Object, Reflect, Uint8Array};

pub mod centroid;
pub mod distance;
pub mod downsample;
pub mod error;
pub mod image_io;
pub mod kmeans;
pub mod quantize;
pub mod rng;

pub use centroid::centroid;
pub use distance::{nearest_index, squared_distance};
pub use downsample::{MAX_KMEANS_PIXELS, rescale_dimensions, sample_dimensions};
pub use error::QuantizeError;
pub use image_io::{
    DEFAULT_MAX_ITERATIONS, QuantizeOptions, QuantizedImage, encode_png, palette_hex, palette_srgba, pixel_dataset,
    quantize_image, render_dataset,
};
pub use kmeans::{DEFAULT_K, KMeans, Palette, Vector, run_kmeans};
pub use quantize::{quantize_dataset, to_channel_u8};
pub use rng::LcgRng;

/// Reduce an encoded image to `n_colors` colors.
///
/// Steps performed:
/// 1. Decode and extract an RGBA sample, downsampled to at most `max_pixels`
///    pixels (default 50 000, `0` disables downsampling).
/// 2. Run deterministic k-means (`k = n_colors`) on the sample, for at most
///    `max_iterations` passes (default 1 000, `0` runs until convergence).
/// 3. Re-color every pixel of the full-resolution image with its closest
///    palette entry.
///
/// Returns an object with `image` (PNG bytes as `Uint8Array`) and `palette`
/// (`RRGGBB` hex strings).
#[wasm_bindgen(js_name = quantize)]
pub fn quantize_js(
    input: Vec<u8>,
    n_colors: usize,
    max_pixels: Option<u32>,
    max_iterations: Option<u32>,
) -> Result<Object, JsValue> {
    let img = image::load_from_memory(&input)
        .map_err(|e| JsValue::from_str(&format!("Unable to decode image: {e}")))?;

    let options = js_options(n_colors, max_pixels, max_iterations);
    let quantized =
        quantize_image(&img, &options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let encoded = encode_png(&quantized.image)
        .map_err(|e| JsValue::from_str(&format!("PNG encode error: {e}")))?;

    let img_js = Uint8Array::from(encoded.as_slice());
    let palette_js = Array::new();
    for hex in palette_hex(&quantized.palette) {
        palette_js.push(&JsValue::from_str(&hex));
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("image"), &img_js)?;
    Reflect::set(&result, &JsValue::from_str("palette"), &palette_js)?;

    Ok(result)
}

fn js_options(n_colors: usize, max_pixels: Option<u32>, max_iterations: Option<u32>) -> QuantizeOptions {
    let max_iterations = max_iterations.map_or(DEFAULT_MAX_ITERATIONS, |i| i as usize);
    QuantizeOptions {
        k: n_colors,
        max_pixels: Some(max_pixels.map_or(MAX_KMEANS_PIXELS, |p| p as usize)),
        max_iterations: (max_iterations > 0).then_some(max_iterations),
    }
}

/// Native counterpart of [`quantize_js`]: PNG bytes plus palette hex codes.
#[cfg(not(target_arch = "wasm32"))]
pub fn quantize_bytes(
    input: &[u8],
    options: &QuantizeOptions,
) -> error::Result<(Vec<u8>, Vec<String>)> {
    let img = image::load_from_memory(input)?;
    let quantized = quantize_image(&img, options)?;
    let png = encode_png(&quantized.image)?;
    Ok((png, palette_hex(&quantized.palette)))
}
