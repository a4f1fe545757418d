//! Two-component mixed exponential density.

use crate::error::DepthError;

const MAX_MEAN: f64 = 500.0;

/// Validated parameters of a two-component mixed exponential.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MixedExpParams {
    alpha: f64,
    mu1: f64,
    mu2: f64,
}

impl MixedExpParams {
    /// Creates the parameter set.
    ///
    /// # Errors
    ///
    /// - [`DepthError::InvalidAlpha`] unless `alpha` is in the open interval (0, 1).
    /// - [`DepthError::InvalidMean`] unless `mu1` and `mu2` are in (0, 500).
    pub fn new(alpha: f64, mu1: f64, mu2: f64) -> Result<Self, DepthError> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
            return Err(DepthError::InvalidAlpha { alpha });
        }
        for (component, mu) in [(1, mu1), (2, mu2)] {
            if !mu.is_finite() || mu <= 0.0 || mu >= MAX_MEAN {
                return Err(DepthError::InvalidMean { component, mu });
            }
        }
        Ok(Self { alpha, mu1, mu2 })
    }

    /// Mixing weight of the first component.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Mean of the first component.
    pub fn mu1(&self) -> f64 {
        self.mu1
    }

    /// Mean of the second component.
    pub fn mu2(&self) -> f64 {
        self.mu2
    }

    /// Untruncated density at `x`.
    pub fn pdf(&self, x: f64) -> f64 {
        self.alpha / self.mu1 * (-x / self.mu1).exp()
            + (1.0 - self.alpha) / self.mu2 * (-x / self.mu2).exp()
    }

    /// Untruncated mean, `α μ₁ + (1 − α) μ₂`.
    pub fn mean(&self) -> f64 {
        self.alpha * self.mu1 + (1.0 - self.alpha) * self.mu2
    }
}
