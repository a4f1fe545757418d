//! Residual calibrations for every data and projection period.

use wgen_calendar::{PeriodKind, PeriodRef};

use crate::config::ResidualSettings;
use crate::error::ResidualError;
use crate::seasonal::SeasonalTable;
use crate::var::VarMatrices;

/// VAR(1) matrices and seasonal statistics of one calibration period.
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualPeriod<const K: usize> {
    matrices: VarMatrices<K>,
    seasonal: SeasonalTable<K>,
}

impl<const K: usize> ResidualPeriod<K> {
    /// Bundles the matrices and seasonal table of one period.
    pub fn new(matrices: VarMatrices<K>, seasonal: SeasonalTable<K>) -> Self {
        Self { matrices, seasonal }
    }

    /// Persistence and innovation matrices.
    pub fn matrices(&self) -> &VarMatrices<K> {
        &self.matrices
    }

    /// Seasonal means and deviations.
    pub fn seasonal(&self) -> &SeasonalTable<K> {
        &self.seasonal
    }
}

/// Complete residual calibration shared read-only across realizations.
#[derive(Debug, Clone)]
pub struct ResidualModel<const K: usize> {
    data: Vec<ResidualPeriod<K>>,
    projection: Vec<ResidualPeriod<K>>,
    settings: ResidualSettings,
}

impl<const K: usize> ResidualModel<K> {
    /// Creates the model.
    ///
    /// # Errors
    ///
    /// - [`ResidualError::NoDataPeriods`] if `data` is empty.
    /// - [`ResidualError::InvalidSetting`] if `settings` fail validation.
    pub fn new(
        data: Vec<ResidualPeriod<K>>,
        projection: Vec<ResidualPeriod<K>>,
        settings: ResidualSettings,
    ) -> Result<Self, ResidualError> {
        if data.is_empty() {
            return Err(ResidualError::NoDataPeriods);
        }
        settings.validate()?;
        Ok(Self {
            data,
            projection,
            settings,
        })
    }

    /// Numeric guards of the recursion.
    pub fn settings(&self) -> &ResidualSettings {
        &self.settings
    }

    /// Calibration of `period`.
    ///
    /// # Errors
    ///
    /// Returns [`ResidualError::MissingPeriod`] if `period` is not configured.
    pub fn period(&self, period: PeriodRef) -> Result<&ResidualPeriod<K>, ResidualError> {
        let list = match period.kind {
            PeriodKind::Data => &self.data,
            PeriodKind::Projection => &self.projection,
        };
        list.get(period.index).ok_or(ResidualError::MissingPeriod {
            kind: period.kind,
            index: period.index,
            available: list.len(),
        })
    }

    /// Verifies that every period the resolver can produce is calibrated.
    ///
    /// # Errors
    ///
    /// Returns [`ResidualError::MissingPeriod`] for the first uncovered period.
    pub fn check_periods(&self, n_data: usize, n_projection: usize) -> Result<(), ResidualError> {
        for (kind, list, needed) in [
            (PeriodKind::Data, &self.data, n_data),
            (PeriodKind::Projection, &self.projection, n_projection),
        ] {
            if needed > list.len() {
                return Err(ResidualError::MissingPeriod {
                    kind,
                    index: list.len(),
                    available: list.len(),
                });
            }
        }
        Ok(())
    }
}
