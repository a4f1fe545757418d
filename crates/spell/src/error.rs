//! Error types for the wgen-spell crate.

use wgen_calendar::PeriodKind;

use crate::state::DayState;

/// Error type for all fallible operations in the wgen-spell crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpellError {
    /// Returned when the shape parameter is outside (0, 1000].
    #[error("invalid spell shape N: {n} (must be finite and in (0, 1000])")]
    InvalidShape {
        /// The invalid shape value.
        n: f64,
    },

    /// Returned when the probability parameter is outside (0, 10).
    #[error("invalid spell probability P: {p} (must be finite and in (0, 10))")]
    InvalidProbability {
        /// The invalid probability value.
        p: f64,
    },

    /// Returned when a month value is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },

    /// Returned when no data-period tables are supplied.
    #[error("at least one data-period spell table is required")]
    NoDataTables,

    /// Returned when a period index has no table.
    #[error("no spell table for {kind:?} period {index} ({available} configured)")]
    MissingPeriod {
        /// Kind of the requested period.
        kind: PeriodKind,
        /// Requested 0-based index.
        index: usize,
        /// Number of tables of that kind.
        available: usize,
    },

    /// Returned when a spell distribution's mean length reaches the sampling cap.
    #[error(
        "{state:?} spells of {kind:?} period {index}, month {month} average {mean:.0} days (cap {cap})"
    )]
    MeanAboveCap {
        /// Kind of the offending period.
        kind: PeriodKind,
        /// 0-based period index.
        index: usize,
        /// Month 1..=12.
        month: u8,
        /// Spell state.
        state: DayState,
        /// Expected spell length in days.
        mean: f64,
        /// Largest length a draw can return.
        cap: u32,
    },
}
