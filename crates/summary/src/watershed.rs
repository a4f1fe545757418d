//! Area-weighted watershed series.

use wgen_pathway::{Pathway, RealizationOutput};

use crate::error::SummaryError;

/// Area weights of the spatial units, normalised to sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaWeights {
    weights: Vec<f64>,
}

impl AreaWeights {
    /// Normalises `weights`; fractions that already sum to one are kept as is.
    ///
    /// # Errors
    ///
    /// - [`SummaryError::InvalidWeight`] for a negative or non-finite weight.
    /// - [`SummaryError::ZeroWeights`] if the weights are empty or sum to zero.
    pub fn new(weights: Vec<f64>) -> Result<Self, SummaryError> {
        if let Some((unit, &weight)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(SummaryError::InvalidWeight { unit, weight });
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(SummaryError::ZeroWeights);
        }
        Ok(Self {
            weights: weights.into_iter().map(|w| w / total).collect(),
        })
    }

    /// Equal weight for each of `n_units` units.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::ZeroWeights`] if `n_units` is zero.
    pub fn uniform(n_units: usize) -> Result<Self, SummaryError> {
        Self::new(vec![1.0; n_units])
    }

    /// Normalised weights.
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always `false` for a constructed value.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Daily watershed-average series of one pathway.
#[derive(Debug, Clone, PartialEq)]
pub struct WatershedSeries {
    /// Area-weighted precipitation depth.
    pub precip: Vec<f64>,
    /// Maximum temperature.
    pub tmax: Vec<f64>,
    /// Minimum temperature.
    pub tmin: Vec<f64>,
    /// Average temperature, `(tmax + tmin) / 2`.
    pub tave: Vec<f64>,
}

/// Collapses the per-unit depths of `pathway` into one watershed series.
///
/// # Errors
///
/// Returns [`SummaryError::WeightCount`] unless there is one weight per unit.
pub fn watershed_series(
    output: &RealizationOutput,
    pathway: Pathway,
    weights: &AreaWeights,
) -> Result<WatershedSeries, SummaryError> {
    let series = output.series(pathway);
    if weights.len() != series.n_units() {
        return Err(SummaryError::WeightCount {
            expected: series.n_units(),
            got: weights.len(),
        });
    }
    let precip: Vec<f64> = (0..series.len())
        .map(|day| {
            series
                .depth_row(day)
                .iter()
                .zip(weights.as_slice())
                .map(|(d, w)| d * w)
                .sum::<f64>()
        })
        .collect();
    let tave: Vec<f64> = series
        .tmax()
        .iter()
        .zip(series.tmin())
        .map(|(hi, lo)| 0.5 * (hi + lo))
        .collect();
    Ok(WatershedSeries {
        precip,
        tmax: series.tmax().to_vec(),
        tmin: series.tmin().to_vec(),
        tave,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn weights_are_normalised() {
        let w = AreaWeights::new(vec![1.0, 3.0]).unwrap();
        assert_relative_eq!(w.as_slice()[0], 0.25);
        assert_relative_eq!(w.as_slice()[1], 0.75);
    }

    #[test]
    fn fractions_are_kept() {
        let w = AreaWeights::new(vec![0.2, 0.3, 0.5]).unwrap();
        assert_relative_eq!(w.as_slice()[2], 0.5);
    }

    #[test]
    fn rejects_bad_weights() {
        assert_eq!(
            AreaWeights::new(vec![0.5, -0.1]).unwrap_err(),
            SummaryError::InvalidWeight {
                unit: 1,
                weight: -0.1
            }
        );
        assert!(matches!(
            AreaWeights::new(vec![1.0, f64::NAN]),
            Err(SummaryError::InvalidWeight { unit: 1, .. })
        ));
        assert_eq!(AreaWeights::new(vec![0.0, 0.0]).unwrap_err(), SummaryError::ZeroWeights);
        assert_eq!(AreaWeights::uniform(0).unwrap_err(), SummaryError::ZeroWeights);
    }
}
