//! A single truncated depth distribution and its sampler.

use crate::error::DepthError;
use crate::mixed_exp::MixedExpParams;
use crate::quantile::{N_LEVELS, QuantileTable};
use crate::truncation::{TruncationOption, TruncationTables};

/// Truncated mixed-exponential depth distribution for one spatial unit,
/// month and period.
///
/// Immutable after construction. Sampling maps a probability in [0, 1] to a
/// depth in `[threshold, max_depth]` by linear interpolation into a
/// 101-level quantile table.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthDistribution {
    params: MixedExpParams,
    threshold: f64,
    max_depth: f64,
    table: QuantileTable,
}

impl DepthDistribution {
    /// Builds the distribution truncated to `[threshold, max_depth]`.
    ///
    /// # Errors
    ///
    /// - [`DepthError::InvalidThreshold`] if `threshold` is negative or non-finite.
    /// - [`DepthError::InvalidTruncation`] unless `max_depth` is finite and
    ///   greater than `threshold`.
    pub fn new(params: MixedExpParams, threshold: f64, max_depth: f64) -> Result<Self, DepthError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(DepthError::InvalidThreshold { threshold });
        }
        if !max_depth.is_finite() || max_depth <= threshold {
            return Err(DepthError::InvalidTruncation {
                max_depth,
                threshold,
            });
        }
        let table = QuantileTable::build(&params, threshold, max_depth);
        Ok(Self {
            params,
            threshold,
            max_depth,
            table,
        })
    }

    /// Builds the distribution for `unit` in `month`, resolving its
    /// truncation maximum from `truncation` with `option` at `period_index`.
    ///
    /// # Errors
    ///
    /// Any truncation lookup error, or the errors of [`DepthDistribution::new`].
    pub fn build(
        params: MixedExpParams,
        unit: usize,
        month: u8,
        option: TruncationOption,
        period_index: usize,
        truncation: &TruncationTables,
        threshold: f64,
    ) -> Result<Self, DepthError> {
        let max_depth = truncation.max_depth(option, unit, month, period_index)?;
        Self::new(params, threshold, max_depth)
    }

    /// Distribution parameters.
    pub fn params(&self) -> &MixedExpParams {
        &self.params
    }

    /// Wet/dry threshold depth (lower bound of the support).
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Truncation maximum (upper bound of the support).
    pub fn max_depth(&self) -> f64 {
        self.max_depth
    }

    /// Depths at probability levels 0.00, 0.01, ..., 1.00.
    pub fn quantiles(&self) -> &[f64; N_LEVELS] {
        self.table.depths()
    }

    /// Depth for probability `p`; values outside [0, 1] clamp to the ends.
    pub fn sample(&self, p: f64) -> f64 {
        self.table.interpolate(p)
    }

    /// Samples every probability in `probs`.
    pub fn sample_many(&self, probs: &[f64]) -> Vec<f64> {
        probs.iter().map(|&p| self.sample(p)).collect()
    }

    /// Samples every probability in `probs` into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`DepthError::BufferLengthMismatch`] if `out.len() != probs.len()`.
    pub fn sample_into(&self, probs: &[f64], out: &mut [f64]) -> Result<(), DepthError> {
        if out.len() != probs.len() {
            return Err(DepthError::BufferLengthMismatch {
                expected: probs.len(),
                got: out.len(),
            });
        }
        for (o, &p) in out.iter_mut().zip(probs) {
            *o = self.sample(p);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist() -> DepthDistribution {
        let params = MixedExpParams::new(0.6, 2.0, 15.0).unwrap();
        DepthDistribution::new(params, 0.2, 50.0).unwrap()
    }

    #[test]
    fn end_points() {
        let d = dist();
        assert_eq!(d.sample(0.0), 0.2);
        assert_eq!(d.sample(1.0), 50.0);
        assert_eq!(d.sample(-0.3), 0.2);
        assert_eq!(d.sample(1.7), 50.0);
    }

    #[test]
    fn quantiles_non_decreasing() {
        let d = dist();
        assert!(d.quantiles().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn sample_is_idempotent() {
        let d = dist();
        for p in [0.0, 0.123, 0.5, 0.999, 1.0] {
            assert_eq!(d.sample(p).to_bits(), d.sample(p).to_bits());
        }
    }

    #[test]
    fn array_form_matches_scalar() {
        let d = dist();
        let probs: Vec<f64> = (0..=40).map(|i| i as f64 / 40.0).collect();
        let many = d.sample_many(&probs);
        let mut out = vec![0.0; probs.len()];
        d.sample_into(&probs, &mut out).unwrap();
        for ((&p, &a), &b) in probs.iter().zip(&many).zip(&out) {
            assert_eq!(a.to_bits(), d.sample(p).to_bits());
            assert_eq!(b.to_bits(), a.to_bits());
        }
    }

    #[test]
    fn sample_into_rejects_wrong_length() {
        let d = dist();
        let mut out = [0.0; 2];
        assert_eq!(
            d.sample_into(&[0.1, 0.2, 0.3], &mut out).unwrap_err(),
            DepthError::BufferLengthMismatch {
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn rejects_bad_truncation() {
        let params = MixedExpParams::new(0.6, 2.0, 15.0).unwrap();
        assert!(matches!(
            DepthDistribution::new(params, 0.2, 0.2),
            Err(DepthError::InvalidTruncation { .. })
        ));
        assert!(matches!(
            DepthDistribution::new(params, 0.2, f64::NAN),
            Err(DepthError::InvalidTruncation { .. })
        ));
        assert!(matches!(
            DepthDistribution::new(params, -1.0, 10.0),
            Err(DepthError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn build_resolves_truncation() {
        let params = MixedExpParams::new(0.6, 2.0, 15.0).unwrap();
        let truncation = TruncationTables::new().with_baseline_design(vec![[75.0; 12]]);
        let d = DepthDistribution::build(
            params,
            0,
            4,
            TruncationOption::BaselineDesignStorm,
            0,
            &truncation,
            0.2,
        )
        .unwrap();
        assert_eq!(d.max_depth(), 75.0);
        assert_eq!(d.sample(1.0), 75.0);
    }
}
