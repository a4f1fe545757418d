//! Calibration periods and date-to-period resolution.

use chrono::NaiveDate;

use crate::error::CalendarError;

/// Kind of calibration period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKind {
    /// Calibrated against the historical record.
    Data,
    /// Calibrated against projected climate.
    Projection,
}

/// A period kind together with the period's position within that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeriodRef {
    /// Which table family the index refers to.
    pub kind: PeriodKind,
    /// 0-based position within the kind.
    pub index: usize,
}

impl PeriodRef {
    /// Reference to the data period at `index`.
    pub fn data(index: usize) -> Self {
        Self {
            kind: PeriodKind::Data,
            index,
        }
    }

    /// Reference to the projection period at `index`.
    pub fn projection(index: usize) -> Self {
        Self {
            kind: PeriodKind::Projection,
            index,
        }
    }

    /// Returns `true` for a data period.
    pub fn is_data(self) -> bool {
        self.kind == PeriodKind::Data
    }
}

/// Half-open date interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    /// Creates the interval `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidInterval`] unless `start < end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        if end <= start {
            return Err(CalendarError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates the interval covering `first` through `last`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::DateOverflow`] if the day after `last` is not
    /// representable, or [`CalendarError::InvalidInterval`] if `last < first`.
    pub fn from_inclusive(first: NaiveDate, last: NaiveDate) -> Result<Self, CalendarError> {
        let end = last
            .succ_opt()
            .ok_or(CalendarError::DateOverflow { date: last })?;
        Self::new(first, end)
    }

    /// First day of the interval.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Exclusive end of the interval.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns `true` if `date` lies in `[start, end)`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Maps calendar dates to data and projection periods.
///
/// Data periods and projection periods are each listed in chronological
/// order and may not overlap, neither within a kind nor across kinds. A date
/// that falls in no period resolves to the closest period in time order:
/// the first period before the timeline, the last period after it, and the
/// preceding period inside a gap.
#[derive(Debug, Clone)]
pub struct PeriodResolver {
    data: Vec<DateInterval>,
    projection: Vec<DateInterval>,
    timeline: Vec<(DateInterval, PeriodRef)>,
}

impl PeriodResolver {
    /// Creates a resolver from data and projection intervals.
    ///
    /// # Errors
    ///
    /// - [`CalendarError::NoDataPeriods`] if `data` is empty.
    /// - [`CalendarError::OverlappingPeriods`] if intervals within a kind are
    ///   out of order, or any two intervals overlap.
    pub fn new(
        data: Vec<DateInterval>,
        projection: Vec<DateInterval>,
    ) -> Result<Self, CalendarError> {
        if data.is_empty() {
            return Err(CalendarError::NoDataPeriods);
        }
        check_ordered(data.iter())?;
        check_ordered(projection.iter())?;

        let mut timeline: Vec<(DateInterval, PeriodRef)> = data
            .iter()
            .enumerate()
            .map(|(i, iv)| (*iv, PeriodRef::data(i)))
            .chain(
                projection
                    .iter()
                    .enumerate()
                    .map(|(i, iv)| (*iv, PeriodRef::projection(i))),
            )
            .collect();
        timeline.sort_by_key(|(iv, _)| iv.start);
        check_ordered(timeline.iter().map(|(iv, _)| iv))?;

        Ok(Self {
            data,
            projection,
            timeline,
        })
    }

    /// Number of data periods.
    pub fn n_data(&self) -> usize {
        self.data.len()
    }

    /// Number of projection periods.
    pub fn n_projection(&self) -> usize {
        self.projection.len()
    }

    /// Data period intervals in order.
    pub fn data_periods(&self) -> &[DateInterval] {
        &self.data
    }

    /// Projection period intervals in order.
    pub fn projection_periods(&self) -> &[DateInterval] {
        &self.projection
    }

    /// Resolves `date` to a data period index, clamping outside dates.
    ///
    /// A date between two data periods belongs to the earlier one, however
    /// close the later period starts.
    ///
    /// Used for the baseline pathway, which always runs on data-period
    /// calibration.
    pub fn resolve_data_period(&self, date: NaiveDate) -> usize {
        clamp_position(&self.data, date, |iv| iv)
    }

    /// Resolves `date` to the period of either kind that governs it.
    ///
    /// Gaps follow the same rule as [`PeriodResolver::resolve_data_period`]:
    /// the period in force until the next one starts.
    pub fn resolve_pathway_period(&self, date: NaiveDate) -> PeriodRef {
        let pos = clamp_position(&self.timeline, date, |(iv, _)| iv);
        self.timeline[pos].1
    }
}

fn check_ordered<'a>(intervals: impl Iterator<Item = &'a DateInterval>) -> Result<(), CalendarError> {
    let mut previous: Option<&DateInterval> = None;
    for iv in intervals {
        if let Some(prev) = previous {
            if iv.start < prev.end {
                return Err(CalendarError::OverlappingPeriods {
                    previous_end: prev.end,
                    next_start: iv.start,
                });
            }
        }
        previous = Some(iv);
    }
    Ok(())
}

/// Position of the last interval starting on or before `date`, or 0.
///
/// `items` must be non-empty and sorted by start.
fn clamp_position<T>(items: &[T], date: NaiveDate, interval: impl Fn(&T) -> &DateInterval) -> usize {
    items
        .partition_point(|item| interval(item).start <= date)
        .saturating_sub(1)
}
