//! Weighted categorical sampling.

use rand::prelude::*;

/// Categorical distribution over indices `0..n`, sampled through a
/// cumulative distribution table.
///
/// The random source is always passed in by the caller so that every draw
/// comes from the single seeded generator of the run.
#[derive(Debug, Clone)]
pub struct WeightedChoice {
    /// Cumulative probabilities; the last entry is 1.0.
    cdf: Vec<f64>,
}

impl WeightedChoice {
    /// Build a distribution from non-negative weights.
    ///
    /// Returns `None` when there are no weights, any weight is negative or
    /// non-finite, or the weights sum to zero (or overflow).
    pub fn new<I>(weights: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let weights: Vec<f64> = weights.into_iter().collect();
        if weights.is_empty() || weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return None;
        }

        let total: f64 = weights.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return None;
        }

        let mut cumulative = 0.0;
        let mut cdf: Vec<f64> = weights
            .iter()
            .map(|w| {
                cumulative += w / total;
                cumulative
            })
            .collect();
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        Some(Self { cdf })
    }

    /// Uniform distribution over `n` outcomes.
    pub fn uniform(n: usize) -> Option<Self> {
        Self::new(std::iter::repeat(1.0).take(n))
    }

    /// Weighted distribution, falling back to uniform when the weights are
    /// unusable (all zero, non-finite).
    pub fn or_uniform(weights: &[f64]) -> Option<Self> {
        Self::new(weights.iter().copied()).or_else(|| Self::uniform(weights.len()))
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.cdf.len()
    }

    /// Returns true if there are no outcomes.
    pub fn is_empty(&self) -> bool {
        self.cdf.is_empty()
    }

    /// Probability of outcome `index`.
    pub fn probability(&self, index: usize) -> f64 {
        match index {
            0 => self.cdf.first().copied().unwrap_or(0.0),
            i if i < self.cdf.len() => self.cdf[i] - self.cdf[i - 1],
            _ => 0.0,
        }
    }

    /// Draw an outcome index.
    pub fn sample(&self, rng: &mut impl Rng) -> usize {
        let r: f64 = rng.gen();
        let idx = self.cdf.partition_point(|&c| c <= r);
        idx.min(self.cdf.len() - 1)
    }

    /// Draw an element of `items`, which must be aligned with the weights.
    pub fn choose<'a, T>(&self, items: &'a [T], rng: &mut impl Rng) -> &'a T {
        &items[self.sample(rng)]
    }
}
