//! Error types for the wgen-pathway crate.

use chrono::NaiveDate;
use wgen_calendar::CalendarError;
use wgen_depth::DepthError;
use wgen_residual::ResidualError;
use wgen_spell::SpellError;

/// Error type for all fallible operations in the wgen-pathway crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathwayError {
    /// Calendar or period-table error.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Spell-length model error.
    #[error(transparent)]
    Spell(#[from] SpellError),

    /// Precipitation-depth model error.
    #[error(transparent)]
    Depth(#[from] DepthError),

    /// Residual model error.
    #[error(transparent)]
    Residual(#[from] ResidualError),

    /// Returned when the simulation window ends before it starts.
    #[error("simulation ends ({end}) before it starts ({start})")]
    InvalidWindow {
        /// First simulated day.
        start: NaiveDate,
        /// Last simulated day.
        end: NaiveDate,
    },

    /// Returned when an ensemble is requested with no realizations.
    #[error("at least one realization is required")]
    NoRealizations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_wraps_component_errors() {
        let e: PathwayError = SpellError::InvalidMonth { month: 13 }.into();
        assert_eq!(e.to_string(), "invalid month: 13 (must be 1..=12)");
        assert!(matches!(e, PathwayError::Spell(_)));
    }

    #[test]
    fn error_invalid_window() {
        let e = PathwayError::InvalidWindow {
            start: NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        };
        assert_eq!(
            e.to_string(),
            "simulation ends (2000-01-01) before it starts (2001-01-01)"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<PathwayError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<PathwayError>();
    }
}
