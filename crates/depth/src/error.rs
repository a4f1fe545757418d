//! Error types for the wgen-depth crate.

use crate::tables::DepthFamily;
use crate::truncation::TruncationOption;

/// Error type for all fallible operations in the wgen-depth crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DepthError {
    /// Returned when the mixing weight is outside (0, 1).
    #[error("invalid mixing weight alpha: {alpha} (must be in (0, 1))")]
    InvalidAlpha {
        /// The invalid weight.
        alpha: f64,
    },

    /// Returned when a component mean is outside (0, 500).
    #[error("invalid component mean mu{component}: {mu} (must be in (0, 500))")]
    InvalidMean {
        /// 1 or 2.
        component: u8,
        /// The invalid mean.
        mu: f64,
    },

    /// Returned when the wet/dry threshold is negative or non-finite.
    #[error("invalid wet/dry threshold: {threshold}")]
    InvalidThreshold {
        /// The invalid threshold.
        threshold: f64,
    },

    /// Returned when the truncation maximum does not exceed the threshold.
    #[error("invalid truncation maximum {max_depth} (must be finite and above threshold {threshold})")]
    InvalidTruncation {
        /// The offending maximum depth.
        max_depth: f64,
        /// The wet/dry threshold.
        threshold: f64,
    },

    /// Returned when a truncation option code is not 1..=5.
    #[error("unknown truncation option: {code} (must be 1..=5)")]
    UnknownTruncationCode {
        /// The unrecognised code.
        code: u8,
    },

    /// Returned when a truncation table has no row for the requested index.
    #[error("no {option:?} truncation entry at index {index} ({available} configured)")]
    MissingTruncation {
        /// Table that was consulted.
        option: TruncationOption,
        /// Requested row (region or period position).
        index: usize,
        /// Rows available.
        available: usize,
    },

    /// Returned when a spatial unit has no region mapping.
    #[error("spatial unit {unit} has no region mapping ({available} units mapped)")]
    UnmappedUnit {
        /// 0-based spatial unit index.
        unit: usize,
        /// Units with a mapping.
        available: usize,
    },

    /// Returned when a spatial unit index is past the grid's unit count.
    #[error("spatial unit {unit} out of range ({n_units} units)")]
    UnitOutOfRange {
        /// 0-based spatial unit index.
        unit: usize,
        /// Units in the grid.
        n_units: usize,
    },

    /// Returned when a month value is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month value.
        month: u8,
    },

    /// Returned when a depth family has no grid for a period.
    #[error("no {family:?} depth grid for period {period} ({available} configured)")]
    MissingPeriod {
        /// Family that was consulted.
        family: DepthFamily,
        /// Requested period position.
        period: usize,
        /// Grids available.
        available: usize,
    },

    /// Returned when grids disagree on the number of spatial units.
    #[error("{family:?} grid for period {period} has {got} spatial units, expected {expected}")]
    UnitCountMismatch {
        /// Family of the offending grid.
        family: DepthFamily,
        /// Period position of the offending grid.
        period: usize,
        /// Expected unit count.
        expected: usize,
        /// Actual unit count.
        got: usize,
    },

    /// Returned when a grid has no spatial units or no data periods exist.
    #[error("depth tables require at least one data period and one spatial unit")]
    Empty,

    /// Returned when a pre-allocated buffer has the wrong length.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLengthMismatch {
        /// Expected buffer length.
        expected: usize,
        /// Actual buffer length.
        got: usize,
    },
}
