use crate::error::{QuantizeError, Result};

/// Per-channel mean of `points`, computed as a running mean
/// (`m += (x - m) / (i + 1)`) rather than sum-then-divide.
pub fn centroid<V: AsRef<[f64]>>(points: &[V]) -> Result<Vec<f64>> {
    let first = points.first().ok_or(QuantizeError::EmptyDataset)?;
    let channels = first.as_ref().len();
    let mut running = vec![0.0_f64; channels];

    for (i, point) in points.iter().enumerate() {
        let point = point.as_ref();
        if point.len() != channels {
            return Err(QuantizeError::LengthMismatch {
                expected: channels,
                found: point.len(),
            });
        }
        let n = (i + 1) as f64;
        for (mean, &value) in running.iter_mut().zip(point) {
            *mean += (value - *mean) / n;
        }
    }

    Ok(running)
}
