//! Error types for the wgen-summary crate.

/// Error type for all fallible operations in the wgen-summary crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SummaryError {
    /// Returned when the number of area weights differs from the unit count.
    #[error("expected {expected} area weights (one per unit), got {got}")]
    WeightCount {
        /// Spatial units in the output.
        expected: usize,
        /// Weights supplied.
        got: usize,
    },

    /// Returned when an area weight is negative or not finite.
    #[error("invalid area weight for unit {unit}: {weight}")]
    InvalidWeight {
        /// 0-based unit index.
        unit: usize,
        /// Offending weight.
        weight: f64,
    },

    /// Returned when area weights sum to zero.
    #[error("area weights sum to zero")]
    ZeroWeights,

    /// Returned when the latitude is outside the open interval (-90, 90).
    #[error("invalid latitude: {latitude} degrees (must be finite and in (-90, 90))")]
    InvalidLatitude {
        /// Offending latitude.
        latitude: f64,
    },

    /// Returned when a monthly temperature-range norm is negative or not finite.
    #[error("invalid temperature-range norm for month {month}: {value}")]
    InvalidDeltaT {
        /// Month 1..=12.
        month: u8,
        /// Offending value.
        value: f64,
    },

    /// Returned when paired series differ in length.
    #[error("length mismatch: {dates} dates but {values} values")]
    LengthMismatch {
        /// Number of dates.
        dates: usize,
        /// Number of values.
        values: usize,
    },

    /// Returned when JSON serialization fails.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Message from the serializer.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_weight_count() {
        let e = SummaryError::WeightCount {
            expected: 3,
            got: 2,
        };
        assert_eq!(e.to_string(), "expected 3 area weights (one per unit), got 2");
    }

    #[test]
    fn error_invalid_latitude() {
        let e = SummaryError::InvalidLatitude { latitude: 95.0 };
        assert!(e.to_string().contains("95"));
    }

    #[test]
    fn error_serialization() {
        let e = SummaryError::Serialization {
            reason: "bad float".to_string(),
        };
        assert_eq!(e.to_string(), "serialization error: bad float");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<SummaryError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<SummaryError>();
    }
}
