//! Numeric guards of the residual recursion.

use crate::error::ResidualError;

/// Stability bound and fallback values for the residual model.
///
/// # Example
///
/// ```
/// use wgen_residual::ResidualSettings;
///
/// let settings = ResidualSettings::new().with_stability_bound(3.5);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidualSettings {
    stability_bound: f64,
    chi_fallback: f64,
    epsilon_fallback: f64,
    initial_chi: f64,
}

impl ResidualSettings {
    /// Creates settings with defaults.
    ///
    /// Defaults: `stability_bound = 4.0`, `chi_fallback = 1.0`,
    /// `epsilon_fallback = 0.25`, `initial_chi = 1.0`.
    pub fn new() -> Self {
        Self {
            stability_bound: 4.0,
            chi_fallback: 1.0,
            epsilon_fallback: 0.25,
            initial_chi: 1.0,
        }
    }

    /// Sets the symmetric clip applied to every Chi element.
    pub fn with_stability_bound(mut self, bound: f64) -> Self {
        self.stability_bound = bound;
        self
    }

    /// Sets the value substituted for non-finite Chi elements.
    pub fn with_chi_fallback(mut self, value: f64) -> Self {
        self.chi_fallback = value;
        self
    }

    /// Sets the value substituted for non-finite noise elements.
    pub fn with_epsilon_fallback(mut self, value: f64) -> Self {
        self.epsilon_fallback = value;
        self
    }

    /// Sets the Chi value both buffers start from.
    pub fn with_initial_chi(mut self, value: f64) -> Self {
        self.initial_chi = value;
        self
    }

    // --- Accessors ---

    /// Symmetric clip applied to every Chi element.
    pub fn stability_bound(&self) -> f64 {
        self.stability_bound
    }

    /// Value substituted for non-finite Chi elements.
    pub fn chi_fallback(&self) -> f64 {
        self.chi_fallback
    }

    /// Value substituted for non-finite noise elements.
    pub fn epsilon_fallback(&self) -> f64 {
        self.epsilon_fallback
    }

    /// Chi value both buffers start from.
    pub fn initial_chi(&self) -> f64 {
        self.initial_chi
    }

    /// Validates this configuration.
    ///
    /// The bound must be finite and positive; every fallback must be finite
    /// and lie within the bound.
    pub fn validate(&self) -> Result<(), ResidualError> {
        let bound = self.stability_bound;
        if !bound.is_finite() || bound <= 0.0 {
            return Err(ResidualError::InvalidSetting {
                reason: format!("stability_bound must be finite and positive, got {bound}"),
            });
        }
        for (name, v) in [
            ("chi_fallback", self.chi_fallback),
            ("epsilon_fallback", self.epsilon_fallback),
            ("initial_chi", self.initial_chi),
        ] {
            if !v.is_finite() || v.abs() > bound {
                return Err(ResidualError::InvalidSetting {
                    reason: format!("{name} must be finite and within ±{bound}, got {v}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for ResidualSettings {
    fn default() -> Self {
        Self::new()
    }
}
