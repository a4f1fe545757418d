//! Watershed aggregation and per-realization summaries.
//!
//! Collapses the per-unit output of a realization into watershed series,
//! derives Hargreaves–Samani PET from the simulated temperatures, and reports
//! annual and monthly means, spell statistics and the H1 − H0 difference of
//! the paired pathways.
//!
//! # Pipeline
//!
//! ```text
//!  ┌───────────────────┐   ┌─────────────────┐   ┌──────────────┐   ┌────────────────────┐
//!  │ RealizationOutput │──▶│ WatershedSeries │──▶│  PET (H-S)   │──▶│ RealizationSummary │──▶ JSON
//!  │ (per unit)        │   │ (area-weighted) │   │              │   │ (H0, H1, delta)    │
//!  └───────────────────┘   └─────────────────┘   └──────────────┘   └────────────────────┘
//! ```

mod error;
mod pet;
mod report;
mod spells;
mod watershed;

pub use error::SummaryError;
pub use pet::{
    DEFAULT_LATITUDE_DEG, DEFAULT_MONTHLY_DELTA_T, extraterrestrial_radiation, hargreaves_samani,
};
pub use report::{
    DeltaSummary, MonthlyDelta, MonthlySummary, PathwaySummary, RealizationSummary,
    SummarySettings, summarize_pathway, summarize_realization, to_json,
};
pub use spells::{SpellRun, SpellStats, monthly_wet_fraction, spell_runs};
pub use watershed::{AreaWeights, WatershedSeries, watershed_series};
