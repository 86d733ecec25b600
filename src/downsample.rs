use tracing::debug;

/// Pixel budget for the k-means sample.
pub const MAX_KMEANS_PIXELS: usize = 50_000;

/// Rescale `width`×`height` so the area is close to `pixels` while keeping
/// the aspect ratio. Each extent is at least 1, and the area never exceeds
/// `pixels` (unless `pixels` is 0).
pub fn rescale_dimensions(width: u32, height: u32, pixels: usize) -> (u32, u32) {
    let aspect_ratio = width as f64 / height as f64;
    let scaling_factor = (pixels as f64 / aspect_ratio).sqrt();
    let rescaled_w = (aspect_ratio * scaling_factor).floor().max(1.0) as u32;
    let rescaled_h = scaling_factor.floor().max(1.0) as u32;

    // An extent clamped up to 1 would let the other one overshoot the budget.
    let fit = |other: u32| (pixels / other as usize).clamp(1, u32::MAX as usize) as u32;
    let rescaled_w = rescaled_w.min(fit(rescaled_h));
    let rescaled_h = rescaled_h.min(fit(rescaled_w));
    (rescaled_w, rescaled_h)
}

/// Dimensions to sample at for k-means, or `None` when the full image already
/// fits in `budget`.
pub fn sample_dimensions(width: u32, height: u32, budget: usize) -> Option<(u32, u32)> {
    let n_pixels = width as usize * height as usize;
    if budget == 0 || n_pixels <= budget {
        return None;
    }
    let (w, h) = rescale_dimensions(width, height, budget);
    debug!(width, height, w, h, budget, "downsampling k-means sample");
    Some((w, h))
}
