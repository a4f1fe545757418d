//! Spell-run and wet-fraction statistics of a simulated day-state series.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use wgen_spell::DayState;

use crate::error::SummaryError;

/// A maximal run of consecutive days in the same state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellRun {
    /// State of every day in the run.
    pub state: DayState,
    /// Number of days.
    pub length: usize,
}

/// Splits a wet-flag series into maximal runs.
pub fn spell_runs(wet: &[bool]) -> Vec<SpellRun> {
    wet.chunk_by(|a, b| a == b)
        .map(|chunk| SpellRun {
            state: if chunk[0] {
                DayState::Wet
            } else {
                DayState::Dry
            },
            length: chunk.len(),
        })
        .collect()
}

/// Count, mean and maximum length of the runs of one state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpellStats {
    /// Number of runs.
    pub count: usize,
    /// Mean run length in days, 0 without runs.
    pub mean: f64,
    /// Longest run in days.
    pub max: usize,
}

impl SpellStats {
    /// Statistics of the `state` runs in `runs`.
    pub fn from_runs(runs: &[SpellRun], state: DayState) -> Self {
        let (count, total, max) = runs
            .iter()
            .filter(|r| r.state == state)
            .fold((0, 0, 0), |(n, sum, max), r| {
                (n + 1, sum + r.length, max.max(r.length))
            });
        Self {
            count,
            mean: if count == 0 {
                0.0
            } else {
                total as f64 / count as f64
            },
            max,
        }
    }
}

/// Fraction of wet days per calendar month, `None` for months never simulated.
///
/// # Errors
///
/// Returns [`SummaryError::LengthMismatch`] if the series differ in length.
pub fn monthly_wet_fraction(
    dates: &[NaiveDate],
    wet: &[bool],
) -> Result<[Option<f64>; 12], SummaryError> {
    if dates.len() != wet.len() {
        return Err(SummaryError::LengthMismatch {
            dates: dates.len(),
            values: wet.len(),
        });
    }
    let mut days = [0usize; 12];
    let mut wet_days = [0usize; 12];
    for (date, &w) in dates.iter().zip(wet) {
        let m = date.month0() as usize;
        days[m] += 1;
        wet_days[m] += usize::from(w);
    }
    Ok(std::array::from_fn(|m| {
        (days[m] > 0).then(|| wet_days[m] as f64 / days[m] as f64)
    }))
}
