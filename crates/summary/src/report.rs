//! Per-realization summaries of both pathways and their difference.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use wgen_pathway::{Pathway, RealizationOutput};
use wgen_spell::DayState;

use crate::error::SummaryError;
use crate::pet::{
    DEFAULT_LATITUDE_DEG, DEFAULT_MONTHLY_DELTA_T, hargreaves_samani, validate_delta_t,
    validate_latitude,
};
use crate::spells::{SpellStats, monthly_wet_fraction, spell_runs};
use crate::watershed::{AreaWeights, watershed_series};

const DAYS_PER_YEAR: f64 = 365.25;

/// Watershed and PET parameters of a summary.
///
/// # Example
///
/// ```
/// use wgen_summary::{AreaWeights, SummarySettings};
///
/// let settings = SummarySettings::new(AreaWeights::uniform(3).unwrap()).with_latitude(35.5);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySettings {
    weights: AreaWeights,
    latitude_deg: f64,
    monthly_delta_t: [f64; 12],
}

impl SummarySettings {
    /// Creates settings with the default latitude and temperature-range norms.
    pub fn new(weights: AreaWeights) -> Self {
        Self {
            weights,
            latitude_deg: DEFAULT_LATITUDE_DEG,
            monthly_delta_t: DEFAULT_MONTHLY_DELTA_T,
        }
    }

    /// Sets the watershed latitude in degrees north.
    pub fn with_latitude(mut self, latitude_deg: f64) -> Self {
        self.latitude_deg = latitude_deg;
        self
    }

    /// Sets the monthly temperature-range norms, January..December.
    pub fn with_monthly_delta_t(mut self, monthly_delta_t: [f64; 12]) -> Self {
        self.monthly_delta_t = monthly_delta_t;
        self
    }

    /// Area weights.
    pub fn weights(&self) -> &AreaWeights {
        &self.weights
    }

    /// Latitude in degrees north.
    pub fn latitude_deg(&self) -> f64 {
        self.latitude_deg
    }

    /// Monthly temperature-range norms.
    pub fn monthly_delta_t(&self) -> &[f64; 12] {
        &self.monthly_delta_t
    }

    /// Validates latitude and norms.
    pub fn validate(&self) -> Result<(), SummaryError> {
        validate_latitude(self.latitude_deg)?;
        validate_delta_t(&self.monthly_delta_t)
    }
}

/// Means of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// Month 1..=12.
    pub month: u8,
    /// Simulated days in this month.
    pub days: usize,
    /// Mean daily watershed precipitation.
    pub precip: Option<f64>,
    /// Mean daily PET.
    pub pet: Option<f64>,
    /// Mean daily average temperature.
    pub tave: Option<f64>,
    /// Fraction of wet days.
    pub wet_fraction: Option<f64>,
}

/// Summary of one pathway of one realization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathwaySummary {
    /// Mean annual watershed precipitation.
    pub annual_precip: f64,
    /// Mean annual PET.
    pub annual_pet: f64,
    /// Mean daily maximum temperature.
    pub mean_tmax: f64,
    /// Mean daily minimum temperature.
    pub mean_tmin: f64,
    /// Mean daily average temperature.
    pub mean_tave: f64,
    /// Fraction of wet days.
    pub wet_fraction: f64,
    /// Wet spell statistics.
    pub wet_spells: SpellStats,
    /// Dry spell statistics.
    pub dry_spells: SpellStats,
    /// Calendar-month means.
    pub monthly: Vec<MonthlySummary>,
}

/// H1 − H0 difference of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyDelta {
    /// Month 1..=12.
    pub month: u8,
    /// Difference in mean daily precipitation.
    pub precip: Option<f64>,
    /// Difference in mean daily PET.
    pub pet: Option<f64>,
    /// Difference in mean daily average temperature.
    pub tave: Option<f64>,
}

/// H1 − H0 differences of one realization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaSummary {
    /// Difference in mean annual precipitation.
    pub annual_precip: f64,
    /// Difference in mean annual PET.
    pub annual_pet: f64,
    /// Difference in mean average temperature.
    pub mean_tave: f64,
    /// Calendar-month differences.
    pub monthly: Vec<MonthlyDelta>,
}

impl DeltaSummary {
    /// Computes `h1 − h0`.
    pub fn between(h0: &PathwaySummary, h1: &PathwaySummary) -> Self {
        let diff = |a: Option<f64>, b: Option<f64>| Some(b? - a?);
        Self {
            annual_precip: h1.annual_precip - h0.annual_precip,
            annual_pet: h1.annual_pet - h0.annual_pet,
            mean_tave: h1.mean_tave - h0.mean_tave,
            monthly: h0
                .monthly
                .iter()
                .zip(&h1.monthly)
                .map(|(a, b)| MonthlyDelta {
                    month: a.month,
                    precip: diff(a.precip, b.precip),
                    pet: diff(a.pet, b.pet),
                    tave: diff(a.tave, b.tave),
                })
                .collect(),
        }
    }
}

/// Both pathway summaries and their difference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealizationSummary {
    /// Realization number.
    pub realization: u64,
    /// First simulated day.
    pub start: NaiveDate,
    /// Last simulated day.
    pub end: NaiveDate,
    /// Simulated days.
    pub n_days: usize,
    /// Baseline pathway.
    pub h0: PathwaySummary,
    /// Alternative pathway.
    pub h1: PathwaySummary,
    /// `h1 − h0`.
    pub delta: DeltaSummary,
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

fn monthly_means(dates: &[NaiveDate], values: &[f64]) -> [Option<f64>; 12] {
    let mut sums = [0.0; 12];
    let mut counts = [0usize; 12];
    for (date, &v) in dates.iter().zip(values) {
        let m = date.month0() as usize;
        sums[m] += v;
        counts[m] += 1;
    }
    std::array::from_fn(|m| (counts[m] > 0).then(|| sums[m] / counts[m] as f64))
}

/// Summarises one pathway of `output`.
///
/// # Errors
///
/// Returns [`SummaryError::WeightCount`] for mismatched weights, or any
/// validation error of `settings`.
pub fn summarize_pathway(
    output: &RealizationOutput,
    pathway: Pathway,
    settings: &SummarySettings,
) -> Result<PathwaySummary, SummaryError> {
    settings.validate()?;
    let dates = output.dates();
    let ws = watershed_series(output, pathway, settings.weights())?;
    let pet = hargreaves_samani(
        dates,
        &ws.tave,
        settings.latitude_deg(),
        settings.monthly_delta_t(),
    )?;
    let wet = output.series(pathway).wet();
    let runs = spell_runs(wet);

    let precip_m = monthly_means(dates, &ws.precip);
    let pet_m = monthly_means(dates, &pet);
    let tave_m = monthly_means(dates, &ws.tave);
    let wet_m = monthly_wet_fraction(dates, wet)?;
    let mut days = [0usize; 12];
    for date in dates {
        days[date.month0() as usize] += 1;
    }

    Ok(PathwaySummary {
        annual_precip: mean(ws.precip.iter().copied()) * DAYS_PER_YEAR,
        annual_pet: mean(pet.iter().copied()) * DAYS_PER_YEAR,
        mean_tmax: mean(ws.tmax.iter().copied()),
        mean_tmin: mean(ws.tmin.iter().copied()),
        mean_tave: mean(ws.tave.iter().copied()),
        wet_fraction: mean(wet.iter().map(|&w| f64::from(u8::from(w)))),
        wet_spells: SpellStats::from_runs(&runs, DayState::Wet),
        dry_spells: SpellStats::from_runs(&runs, DayState::Dry),
        monthly: (0..12)
            .map(|m| MonthlySummary {
                month: m as u8 + 1,
                days: days[m],
                precip: precip_m[m],
                pet: pet_m[m],
                tave: tave_m[m],
                wet_fraction: wet_m[m],
            })
            .collect(),
    })
}

/// Summarises both pathways of `output` and their difference.
///
/// # Errors
///
/// See [`summarize_pathway`].
pub fn summarize_realization(
    output: &RealizationOutput,
    settings: &SummarySettings,
) -> Result<RealizationSummary, SummaryError> {
    let h0 = summarize_pathway(output, Pathway::H0, settings)?;
    let h1 = summarize_pathway(output, Pathway::H1, settings)?;
    let delta = DeltaSummary::between(&h0, &h1);
    let dates = output.dates();
    let (start, end) = match (dates.first(), dates.last()) {
        (Some(&s), Some(&e)) => (s, e),
        _ => {
            return Err(SummaryError::LengthMismatch {
                dates: 0,
                values: output.series(Pathway::H0).len(),
            });
        }
    };
    Ok(RealizationSummary {
        realization: output.realization(),
        start,
        end,
        n_days: dates.len(),
        h0,
        h1,
        delta,
    })
}

/// Serializes summaries to pretty-printed JSON.
///
/// # Errors
///
/// Returns [`SummaryError::Serialization`] if serialization fails.
pub fn to_json(summaries: &[RealizationSummary]) -> Result<String, SummaryError> {
    serde_json::to_string_pretty(summaries).map_err(|e| SummaryError::Serialization {
        reason: e.to_string(),
    })
}
