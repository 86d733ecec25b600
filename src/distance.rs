use crate::error::{QuantizeError, Result};

/// Sum of squared per-channel differences. No square root: only used to
/// compare distances.
pub fn squared_distance(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(QuantizeError::LengthMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }
    Ok(a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum())
}

/// Index of the candidate closest to `point`.
///
/// Ties go to the lowest index (strict less-than).
pub fn nearest_index<V: AsRef<[f64]>>(point: &[f64], candidates: &[V]) -> Result<usize> {
    let mut best_idx = None;
    let mut best_dist = f64::INFINITY;
    for (idx, candidate) in candidates.iter().enumerate() {
        let dist = squared_distance(point, candidate.as_ref())?;
        if best_idx.is_none() || dist < best_dist {
            best_dist = dist;
            best_idx = Some(idx);
        }
    }
    best_idx.ok_or(QuantizeError::EmptyPalette)
}
