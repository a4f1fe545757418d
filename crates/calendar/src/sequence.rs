//! Daily date sequences.

use chrono::NaiveDate;

use crate::error::CalendarError;

/// Returns every date from `start` to `end`, both inclusive.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidRange`] if `end` is before `start`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use wgen_calendar::date_sequence;
///
/// let start = NaiveDate::from_ymd_opt(2000, 2, 27).unwrap();
/// let end = NaiveDate::from_ymd_opt(2000, 3, 1).unwrap();
/// // Feb 27, Feb 28, Feb 29, Mar 1
/// assert_eq!(date_sequence(start, end).unwrap().len(), 4);
/// ```
pub fn date_sequence(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, CalendarError> {
    let n_days = n_days_inclusive(start, end)?;
    let mut dates = Vec::with_capacity(n_days);
    dates.extend(start.iter_days().take(n_days));
    Ok(dates)
}

/// Returns the number of days from `start` to `end`, both inclusive.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidRange`] if `end` is before `start`.
pub fn n_days_inclusive(start: NaiveDate, end: NaiveDate) -> Result<usize, CalendarError> {
    if end < start {
        return Err(CalendarError::InvalidRange { start, end });
    }
    Ok((end - start).num_days() as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_day() {
        let dates = date_sequence(date(2000, 6, 15), date(2000, 6, 15)).unwrap();
        assert_eq!(dates, vec![date(2000, 6, 15)]);
    }

    #[test]
    fn leap_year_has_366_days() {
        let dates = date_sequence(date(2000, 1, 1), date(2000, 12, 31)).unwrap();
        assert_eq!(dates.len(), 366);
        assert_eq!(dates[59], date(2000, 2, 29));
    }

    #[test]
    fn common_year_has_365_days() {
        assert_eq!(n_days_inclusive(date(2001, 1, 1), date(2001, 12, 31)).unwrap(), 365);
    }

    #[test]
    fn reversed_range_errors() {
        let err = date_sequence(date(2000, 1, 2), date(2000, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            CalendarError::InvalidRange {
                start: date(2000, 1, 2),
                end: date(2000, 1, 1),
            }
        );
    }

    #[test]
    fn crosses_year_boundary() {
        let dates = date_sequence(date(2000, 12, 30), date(2001, 1, 2)).unwrap();
        assert_eq!(
            dates,
            vec![
                date(2000, 12, 30),
                date(2000, 12, 31),
                date(2001, 1, 1),
                date(2001, 1, 2),
            ]
        );
    }
}
