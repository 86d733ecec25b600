//! Deterministic k-means over fixed-width channel vectors.
//!
//! A run seeds `k` centroids from dataset points drawn by a fresh
//! [`LcgRng`], then alternates assignment and update passes until no
//! centroid changes (exact equality). Empty clusters are reseeded from a
//! random dataset point.

use tracing::{debug, trace, warn};

use crate::centroid::centroid;
use crate::distance::nearest_index;
use crate::error::{QuantizeError, Result};
use crate::rng::LcgRng;

/// One color (or any fixed-width numeric tuple).
pub type Vector = Vec<f64>;

/// Number of clusters used when the caller has no preference.
pub const DEFAULT_K: usize = 3;

/// The `k` centroids produced by a k-means run.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Vector>,
}

impl Palette {
    /// Build a palette from caller-supplied colors.
    pub fn new(colors: Vec<Vector>) -> Result<Self> {
        if colors.is_empty() {
            return Err(QuantizeError::EmptyPalette);
        }
        channel_width(&colors)?;
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[Vector] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Channel width shared by every entry.
    pub fn channels(&self) -> usize {
        self.colors.first().map_or(0, Vec::len)
    }

    pub fn into_colors(self) -> Vec<Vector> {
        self.colors
    }
}

/// Checks that `dataset` is non-empty, that every vector has the width of
/// the first one, and that all values are finite. Returns that width.
pub(crate) fn channel_width(dataset: &[Vector]) -> Result<usize> {
    let first = dataset.first().ok_or(QuantizeError::EmptyDataset)?;
    let channels = first.len();
    if channels == 0 {
        return Err(QuantizeError::ZeroChannels);
    }
    for (index, v) in dataset.iter().enumerate() {
        if v.len() != channels {
            return Err(QuantizeError::LengthMismatch {
                expected: channels,
                found: v.len(),
            });
        }
        if !v.iter().all(|x| x.is_finite()) {
            return Err(QuantizeError::NonFinite { index });
        }
    }
    Ok(channels)
}

/// K-means configuration.
#[derive(Debug, Clone)]
pub struct KMeans {
    k: usize,
    max_iterations: Option<usize>,
}

impl KMeans {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iterations: None,
        }
    }

    /// Stop after `max_iterations` passes even if centroids still move.
    /// Without a cap the run continues until exact convergence.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Cluster `dataset` into exactly `k` centroids.
    pub fn run(&self, dataset: &[Vector]) -> Result<Palette> {
        let channels = channel_width(dataset)?;
        if self.k < 1 {
            return Err(QuantizeError::InvalidK(self.k));
        }
        let n = dataset.len();
        debug!(k = self.k, points = n, channels, "starting k-means");

        let mut rng = LcgRng::new();
        let mut centroids: Vec<Vector> = (0..self.k)
            .map(|_| dataset[rng.next_index(n)].clone())
            .collect();

        let mut iteration = 0usize;
        loop {
            iteration += 1;

            let mut clusters: Vec<Vec<&[f64]>> = vec![Vec::new(); self.k];
            for point in dataset {
                let nearest = nearest_index(point, &centroids)?;
                clusters[nearest].push(point.as_slice());
            }

            let mut converged = true;
            let mut reseeded = 0usize;
            for (current, members) in centroids.iter_mut().zip(&clusters) {
                let updated = if members.is_empty() {
                    reseeded += 1;
                    dataset[rng.next_index(n)].clone()
                } else {
                    centroid(members)?
                };
                converged &= updated == *current;
                *current = updated;
            }
            trace!(iteration, reseeded, converged, "k-means pass");

            if converged {
                debug!(iterations = iteration, "k-means converged");
                break;
            }
            if self.max_iterations.is_some_and(|max| iteration >= max) {
                warn!(
                    iterations = iteration,
                    "k-means stopped at iteration cap before converging"
                );
                break;
            }
        }

        Ok(Palette { colors: centroids })
    }
}

/// Run k-means to convergence with `k` clusters.
pub fn run_kmeans(dataset: &[Vector], k: usize) -> Result<Palette> {
    KMeans::new(k).run(dataset)
}
