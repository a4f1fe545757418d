//! Day-of-year seasonal statistics and the temperature back-transform.

use wgen_calendar::Doy;
use wgen_spell::DayState;

use crate::error::ResidualError;
use crate::small_linalg::SmallVec;

/// Mean and standard deviation of one variable, indexed by day of year.
///
/// Series hold 365 or 366 entries; a single entry is used for every day.
/// Day 366 reuses the last entry of a 365-day series. A non-finite standard
/// deviation marks a day without usable spread; such days return the mean.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalSeries {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl SeasonalSeries {
    /// Creates a series.
    ///
    /// # Errors
    ///
    /// - [`ResidualError::LengthMismatch`] if the two series differ in length.
    /// - [`ResidualError::SeriesLength`] unless the length is 1, 365 or 366.
    /// - [`ResidualError::NonFiniteMean`] for a NaN or infinite mean.
    /// - [`ResidualError::NegativeStd`] for a finite negative deviation.
    pub fn new(mean: Vec<f64>, std: Vec<f64>) -> Result<Self, ResidualError> {
        if mean.len() != std.len() {
            return Err(ResidualError::LengthMismatch {
                mean: mean.len(),
                std: std.len(),
            });
        }
        if !matches!(mean.len(), 1 | 365 | 366) {
            return Err(ResidualError::SeriesLength { len: mean.len() });
        }
        if let Some(index) = mean.iter().position(|m| !m.is_finite()) {
            return Err(ResidualError::NonFiniteMean { index });
        }
        if let Some(index) = std.iter().position(|&s| s.is_finite() && s < 0.0) {
            return Err(ResidualError::NegativeStd {
                index,
                value: std[index],
            });
        }
        Ok(Self { mean, std })
    }

    /// Same mean and deviation on every day.
    ///
    /// # Errors
    ///
    /// See [`SeasonalSeries::new`].
    pub fn constant(mean: f64, std: f64) -> Result<Self, ResidualError> {
        Self::new(vec![mean], vec![std])
    }

    fn index(&self, doy: Doy) -> usize {
        doy.index().min(self.mean.len() - 1)
    }

    /// Seasonal mean on `doy`.
    pub fn mean(&self, doy: Doy) -> f64 {
        self.mean[self.index(doy)]
    }

    /// Converts a standardised anomaly into an absolute value on `doy`.
    ///
    /// Returns `mean + chi · std`, or the mean when the deviation is
    /// unavailable or the result is not finite.
    pub fn back_transform(&self, doy: Doy, chi: f64) -> f64 {
        let i = self.index(doy);
        let (mean, std) = (self.mean[i], self.std[i]);
        if !std.is_finite() {
            return mean;
        }
        let value = mean + chi * std;
        if value.is_finite() { value } else { mean }
    }
}

/// Seasonal series of every variable for dry and wet days of one period.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalTable<const K: usize> {
    // [variable][DayState::as_index()]
    series: [[SeasonalSeries; 2]; K],
}

impl<const K: usize> SeasonalTable<K> {
    /// Creates the table from `[variable][dry, wet]` series.
    pub fn new(series: [[SeasonalSeries; 2]; K]) -> Self {
        Self { series }
    }

    /// Series of `variable` on days in `state`.
    pub fn series(&self, variable: usize, state: DayState) -> &SeasonalSeries {
        &self.series[variable][state.as_index()]
    }

    /// Absolute values of every variable for a day in `state`.
    pub fn back_transform(&self, state: DayState, doy: Doy, chi: &SmallVec<K>) -> SmallVec<K> {
        let mut out = SmallVec::splat(0.0);
        for (k, (o, &c)) in out.data.iter_mut().zip(&chi.data).enumerate() {
            *o = self.series(k, state).back_transform(doy, c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doy(d: u16) -> Doy {
        Doy::new(d).unwrap()
    }

    #[test]
    fn rejects_bad_lengths() {
        assert_eq!(
            SeasonalSeries::new(vec![1.0; 12], vec![1.0; 12]).unwrap_err(),
            ResidualError::SeriesLength { len: 12 }
        );
        assert_eq!(
            SeasonalSeries::new(vec![1.0; 365], vec![1.0; 366]).unwrap_err(),
            ResidualError::LengthMismatch {
                mean: 365,
                std: 366
            }
        );
    }

    #[test]
    fn rejects_bad_values() {
        let mut mean = vec![10.0; 365];
        mean[3] = f64::NAN;
        assert_eq!(
            SeasonalSeries::new(mean, vec![1.0; 365]).unwrap_err(),
            ResidualError::NonFiniteMean { index: 3 }
        );
        assert!(matches!(
            SeasonalSeries::constant(10.0, -0.5),
            Err(ResidualError::NegativeStd { index: 0, .. })
        ));
    }

    #[test]
    fn back_transform_scales_anomaly() {
        let s = SeasonalSeries::constant(20.0, 3.0).unwrap();
        assert_eq!(s.back_transform(doy(100), 1.5), 24.5);
        assert_eq!(s.back_transform(doy(366), -2.0), 14.0);
    }

    #[test]
    fn zero_std_returns_mean() {
        let s = SeasonalSeries::constant(5.0, 0.0).unwrap();
        assert_eq!(s.back_transform(doy(10), 3.9), 5.0);
    }

    #[test]
    fn unavailable_std_returns_mean() {
        let s = SeasonalSeries::constant(5.0, f64::NAN).unwrap();
        assert_eq!(s.back_transform(doy(10), 1.0), 5.0);
        let s = SeasonalSeries::constant(5.0, f64::INFINITY).unwrap();
        assert_eq!(s.back_transform(doy(10), 1.0), 5.0);
    }

    #[test]
    fn non_finite_chi_returns_mean() {
        let s = SeasonalSeries::constant(5.0, 2.0).unwrap();
        assert_eq!(s.back_transform(doy(10), f64::NAN), 5.0);
    }

    #[test]
    fn day_366_reuses_last_entry_of_common_year_series() {
        let mean: Vec<f64> = (0..365).map(f64::from).collect();
        let s = SeasonalSeries::new(mean, vec![0.0; 365]).unwrap();
        assert_eq!(s.mean(doy(1)), 0.0);
        assert_eq!(s.mean(doy(365)), 364.0);
        assert_eq!(s.mean(doy(366)), 364.0);
    }

    #[test]
    fn table_selects_state_and_variable() {
        let table = SeasonalTable::<2>::new([
            [
                SeasonalSeries::constant(30.0, 2.0).unwrap(),
                SeasonalSeries::constant(25.0, 2.0).unwrap(),
            ],
            [
                SeasonalSeries::constant(15.0, 1.0).unwrap(),
                SeasonalSeries::constant(14.0, 1.0).unwrap(),
            ],
        ]);
        let chi = SmallVec::new([1.0, -1.0]);
        assert_eq!(
            table.back_transform(DayState::Dry, doy(1), &chi).data,
            [32.0, 14.0]
        );
        assert_eq!(
            table.back_transform(DayState::Wet, doy(1), &chi).data,
            [27.0, 13.0]
        );
    }
}
