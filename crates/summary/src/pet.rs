//! Hargreaves–Samani potential evapotranspiration.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};
use wgen_calendar::Doy;

use crate::error::SummaryError;

/// Latitude used when none is configured, in degrees north.
pub const DEFAULT_LATITUDE_DEG: f64 = 30.0;

/// Default monthly temperature-range norms, January..December.
///
/// Each value is the square root of the difference between the mean monthly
/// maximum and minimum temperature.
pub const DEFAULT_MONTHLY_DELTA_T: [f64; 12] = [
    5.6328841, 5.7358650, 5.7279756, 5.6047048, 5.1975405, 4.6063037, 4.3182625, 4.4228131,
    5.0171359, 5.3738328, 5.5505123, 5.6000277,
];

/// Extraterrestrial radiation on `doy` at `latitude_rad`, in mm/day of
/// evaporation equivalent.
pub fn extraterrestrial_radiation(doy: Doy, latitude_rad: f64) -> f64 {
    let j = f64::from(doy.get());
    let angle = 2.0 * PI / 365.0 * j;
    let declination = 0.4093 * (angle - 1.405).sin();
    let inverse_distance = 1.0 + 0.033 * angle.cos();
    // Polar day and night saturate the sunset hour angle.
    let sunset = (-latitude_rad.tan() * declination.tan())
        .clamp(-1.0, 1.0)
        .acos();
    15.392
        * inverse_distance
        * (sunset * latitude_rad.sin() * declination.sin()
            + latitude_rad.cos() * declination.cos() * sunset.sin())
}

/// Checks a latitude in degrees.
///
/// # Errors
///
/// Returns [`SummaryError::InvalidLatitude`] unless it is finite and in (-90, 90).
pub fn validate_latitude(latitude_deg: f64) -> Result<(), SummaryError> {
    if !latitude_deg.is_finite() || latitude_deg.abs() >= 90.0 {
        return Err(SummaryError::InvalidLatitude {
            latitude: latitude_deg,
        });
    }
    Ok(())
}

/// Checks monthly temperature-range norms.
///
/// # Errors
///
/// Returns [`SummaryError::InvalidDeltaT`] for a negative or non-finite value.
pub fn validate_delta_t(monthly_delta_t: &[f64; 12]) -> Result<(), SummaryError> {
    for (m, &value) in monthly_delta_t.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(SummaryError::InvalidDeltaT {
                month: m as u8 + 1,
                value,
            });
        }
    }
    Ok(())
}

/// Daily PET `0.0023 · So · ΔT_month · (Tave + 17.8)`.
///
/// # Errors
///
/// - [`SummaryError::LengthMismatch`] if `dates` and `tave` differ in length.
/// - [`SummaryError::InvalidLatitude`] or [`SummaryError::InvalidDeltaT`]
///   for bad parameters.
pub fn hargreaves_samani(
    dates: &[NaiveDate],
    tave: &[f64],
    latitude_deg: f64,
    monthly_delta_t: &[f64; 12],
) -> Result<Vec<f64>, SummaryError> {
    if dates.len() != tave.len() {
        return Err(SummaryError::LengthMismatch {
            dates: dates.len(),
            values: tave.len(),
        });
    }
    validate_latitude(latitude_deg)?;
    validate_delta_t(monthly_delta_t)?;
    let latitude = latitude_deg.to_radians();
    Ok(dates
        .iter()
        .zip(tave)
        .map(|(&date, &t)| {
            let so = extraterrestrial_radiation(Doy::from_date(date), latitude);
            let delta_t = monthly_delta_t[date.month0() as usize];
            0.0023 * so * delta_t * (t + 17.8)
        })
        .collect())
}
