//! Error types for the wgen-calendar crate.

use chrono::NaiveDate;

/// Error type for all fallible operations in the wgen-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside the valid range 1..=366.
    #[error("invalid day of year: {doy} (must be 1..=366)")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
    },

    /// Returned when a date interval does not end after it starts.
    #[error("invalid interval: end {end} is not after start {start}")]
    InvalidInterval {
        /// First day of the interval.
        start: NaiveDate,
        /// Exclusive end of the interval.
        end: NaiveDate,
    },

    /// Returned when a date range runs backwards.
    #[error("invalid date range: {end} is before {start}")]
    InvalidRange {
        /// First day of the range.
        start: NaiveDate,
        /// Last day of the range.
        end: NaiveDate,
    },

    /// Returned when the day after a date cannot be represented.
    #[error("date overflow after {date}")]
    DateOverflow {
        /// The last representable date.
        date: NaiveDate,
    },

    /// Returned when no data period is configured.
    #[error("at least one data period is required")]
    NoDataPeriods,

    /// Returned when two periods overlap or a kind is listed out of order.
    #[error("period starting {next_start} overlaps or precedes period ending {previous_end}")]
    OverlappingPeriods {
        /// Exclusive end of the earlier period.
        previous_end: NaiveDate,
        /// Start of the later period.
        next_start: NaiveDate,
    },
}
