//! Day-of-year newtype for the Gregorian calendar.

use chrono::{Datelike, NaiveDate};

use crate::error::CalendarError;

/// Day-of-year in the Gregorian calendar (1..=366).
///
/// Seasonal tables are indexed by this value; day 366 only occurs in leap
/// years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(u16);

/// Largest day-of-year value (December 31 of a leap year).
pub(crate) const MAX_DOY: u16 = 366;

impl Doy {
    /// Creates a new `Doy` from a day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=366.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=MAX_DOY).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Returns the day-of-year of a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        // chrono guarantees ordinal() in 1..=366
        Self(date.ordinal() as u16)
    }

    /// Returns the inner day-of-year value (1..=366).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index suitable for array indexing (0..=365).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid() {
        assert_eq!(Doy::new(1).unwrap().get(), 1);
        assert_eq!(Doy::new(366).unwrap().get(), 366);
    }

    #[test]
    fn new_invalid() {
        assert_eq!(Doy::new(0).unwrap_err(), CalendarError::InvalidDoy { doy: 0 });
        assert_eq!(
            Doy::new(367).unwrap_err(),
            CalendarError::InvalidDoy { doy: 367 }
        );
    }

    #[test]
    fn from_date_leap_and_common_years() {
        let leap = NaiveDate::from_ymd_opt(2000, 12, 31).unwrap();
        assert_eq!(Doy::from_date(leap).get(), 366);
        let common = NaiveDate::from_ymd_opt(2001, 12, 31).unwrap();
        assert_eq!(Doy::from_date(common).get(), 365);
        let march = NaiveDate::from_ymd_opt(2000, 3, 1).unwrap();
        assert_eq!(Doy::from_date(march).get(), 61);
    }

    #[test]
    fn index_is_zero_based() {
        let doy = Doy::new(59).unwrap();
        assert_eq!(doy.index(), 58);
    }

    #[test]
    fn ord_trait() {
        assert!(Doy::new(1).unwrap() < Doy::new(366).unwrap());
    }
}
