//! Error types for the wgen-residual crate.

use wgen_calendar::PeriodKind;

/// Error type for all fallible operations in the wgen-residual crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResidualError {
    /// Returned when an A or B matrix contains NaN or infinity.
    #[error("matrix {matrix} has a non-finite element at ({row}, {col})")]
    NonFiniteMatrix {
        /// `"A"` or `"B"`.
        matrix: &'static str,
        /// Row of the offending element.
        row: usize,
        /// Column of the offending element.
        col: usize,
    },

    /// Returned when a noise sampler has an unusable location or scale.
    #[error("invalid normal sampler for variable {variable}: loc {loc}, scale {scale}")]
    InvalidNormal {
        /// 0-based variable index.
        variable: usize,
        /// Location parameter.
        loc: f64,
        /// Scale parameter.
        scale: f64,
    },

    /// Returned when a seasonal series is not 1, 365 or 366 days long.
    #[error("seasonal series has {len} entries (must be 1, 365 or 366)")]
    SeriesLength {
        /// Offending length.
        len: usize,
    },

    /// Returned when mean and standard-deviation series differ in length.
    #[error("length mismatch: mean has {mean} entries, std has {std}")]
    LengthMismatch {
        /// Mean series length.
        mean: usize,
        /// Standard-deviation series length.
        std: usize,
    },

    /// Returned when a seasonal mean is NaN or infinite.
    #[error("seasonal mean at index {index} is not finite")]
    NonFiniteMean {
        /// 0-based day index.
        index: usize,
    },

    /// Returned when a finite seasonal standard deviation is negative.
    #[error("seasonal std at index {index} is negative: {value}")]
    NegativeStd {
        /// 0-based day index.
        index: usize,
        /// The negative value.
        value: f64,
    },

    /// Returned when residual settings are invalid.
    #[error("invalid residual settings: {reason}")]
    InvalidSetting {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when no data-period calibration is supplied.
    #[error("at least one data-period residual calibration is required")]
    NoDataPeriods,

    /// Returned when a period index has no calibration.
    #[error("no residual calibration for {kind:?} period {index} ({available} configured)")]
    MissingPeriod {
        /// Kind of the requested period.
        kind: PeriodKind,
        /// Requested 0-based index.
        index: usize,
        /// Calibrations of that kind.
        available: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_non_finite_matrix() {
        let e = ResidualError::NonFiniteMatrix {
            matrix: "B",
            row: 1,
            col: 0,
        };
        assert_eq!(e.to_string(), "matrix B has a non-finite element at (1, 0)");
    }

    #[test]
    fn error_series_length() {
        let e = ResidualError::SeriesLength { len: 12 };
        assert_eq!(
            e.to_string(),
            "seasonal series has 12 entries (must be 1, 365 or 366)"
        );
    }

    #[test]
    fn error_missing_period() {
        let e = ResidualError::MissingPeriod {
            kind: PeriodKind::Data,
            index: 2,
            available: 1,
        };
        assert_eq!(
            e.to_string(),
            "no residual calibration for Data period 2 (1 configured)"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ResidualError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ResidualError>();
    }
}
