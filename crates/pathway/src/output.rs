//! Columnar daily output of one realization.

use chrono::NaiveDate;
use wgen_spell::DayState;

use crate::state::{DayValues, Pathway};

/// Daily series of one pathway.
///
/// Depths are stored row-major, one row of `n_units` values per day.
#[derive(Debug, Clone, PartialEq)]
pub struct PathwaySeries {
    n_units: usize,
    wet: Vec<bool>,
    depth: Vec<f64>,
    tmax: Vec<f64>,
    tmin: Vec<f64>,
}

impl PathwaySeries {
    pub(crate) fn with_capacity(n_days: usize, n_units: usize) -> Self {
        Self {
            n_units,
            wet: Vec::with_capacity(n_days),
            depth: Vec::with_capacity(n_days * n_units),
            tmax: Vec::with_capacity(n_days),
            tmin: Vec::with_capacity(n_days),
        }
    }

    pub(crate) fn push(&mut self, values: DayValues, depths: &[f64]) {
        debug_assert_eq!(depths.len(), self.n_units);
        self.wet.push(values.state.is_wet());
        self.depth.extend_from_slice(depths);
        self.tmax.push(values.tmax);
        self.tmin.push(values.tmin);
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.wet.len()
    }

    /// Returns `true` if no day was simulated.
    pub fn is_empty(&self) -> bool {
        self.wet.is_empty()
    }

    /// Number of spatial units per day.
    pub fn n_units(&self) -> usize {
        self.n_units
    }

    /// Wet flag per day.
    pub fn wet(&self) -> &[bool] {
        &self.wet
    }

    /// All depths, row-major day × unit.
    pub fn depths(&self) -> &[f64] {
        &self.depth
    }

    /// Depths of every unit on `day`.
    pub fn depth_row(&self, day: usize) -> &[f64] {
        &self.depth[day * self.n_units..(day + 1) * self.n_units]
    }

    /// Maximum temperature per day.
    pub fn tmax(&self) -> &[f64] {
        &self.tmax
    }

    /// Minimum temperature per day.
    pub fn tmin(&self) -> &[f64] {
        &self.tmin
    }
}

/// One day of one pathway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayRecord<'a> {
    /// Calendar date.
    pub date: NaiveDate,
    /// Day state.
    pub state: DayState,
    /// Depth per spatial unit.
    pub depths: &'a [f64],
    /// Maximum temperature.
    pub tmax: f64,
    /// Minimum temperature.
    pub tmin: f64,
}

/// Dates plus the daily series of both pathways for one realization.
#[derive(Debug, Clone, PartialEq)]
pub struct RealizationOutput {
    realization: u64,
    dates: Vec<NaiveDate>,
    series: [PathwaySeries; 2],
}

impl RealizationOutput {
    pub(crate) fn new(realization: u64, dates: Vec<NaiveDate>, series: [PathwaySeries; 2]) -> Self {
        Self {
            realization,
            dates,
            series,
        }
    }

    /// Realization number.
    pub fn realization(&self) -> u64 {
        self.realization
    }

    /// Simulated dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Number of simulated days.
    pub fn n_days(&self) -> usize {
        self.dates.len()
    }

    /// Number of spatial units.
    pub fn n_units(&self) -> usize {
        self.series[0].n_units()
    }

    /// Series of `pathway`.
    pub fn series(&self, pathway: Pathway) -> &PathwaySeries {
        &self.series[pathway.as_index()]
    }

    /// Day `day` of `pathway`, or `None` past the end.
    pub fn record(&self, pathway: Pathway, day: usize) -> Option<DayRecord<'_>> {
        let date = *self.dates.get(day)?;
        let s = self.series(pathway);
        Some(DayRecord {
            date,
            state: if s.wet[day] {
                DayState::Wet
            } else {
                DayState::Dry
            },
            depths: s.depth_row(day),
            tmax: s.tmax[day],
            tmin: s.tmin[day],
        })
    }

    /// Every day of `pathway` in order.
    pub fn records(&self, pathway: Pathway) -> impl Iterator<Item = DayRecord<'_>> + '_ {
        (0..self.n_days()).filter_map(move |day| self.record(pathway, day))
    }
}
