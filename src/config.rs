use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

/// Top-level wgen configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WgenConfig {
    /// Simulation window and ensemble size.
    pub run: RunToml,

    /// Base seeds.
    #[serde(default)]
    pub seeds: SeedsToml,

    /// Data and projection periods.
    pub periods: PeriodsToml,

    /// Spell-length tables.
    pub spell: SpellToml,

    /// Precipitation-depth tables.
    pub depth: DepthToml,

    /// Temperature residual model.
    pub residual: ResidualToml,

    /// Watershed aggregation and PET.
    #[serde(default)]
    pub watershed: WatershedToml,
}

/// Reads and parses a configuration file.
pub fn load(path: &Path) -> Result<WgenConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// A value given once for every month, or once per month.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum Monthly<T> {
    Constant(T),
    PerMonth([T; 12]),
}

impl<T: Copy> Monthly<T> {
    pub fn expand(&self) -> [T; 12] {
        match *self {
            Monthly::Constant(v) => [v; 12],
            Monthly::PerMonth(v) => v,
        }
    }
}

/// A seasonal series: one value for every day, or 365/366 daily values.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Series {
    Constant(f64),
    Daily(Vec<f64>),
}

impl Series {
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Series::Constant(v) => vec![*v],
            Series::Daily(v) => v.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunToml {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default = "default_realizations")]
    pub realizations: u64,
    #[serde(default = "default_first_realization")]
    pub first_realization: u64,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

fn default_realizations() -> u64 {
    1
}
fn default_first_realization() -> u64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedsToml {
    #[serde(default = "default_standard_normal_seed")]
    pub standard_normal: u64,
    #[serde(default = "default_precipitation_depth_seed")]
    pub precipitation_depth: u64,
    #[serde(default = "default_wet_spell_seed")]
    pub wet_spell: u64,
    #[serde(default = "default_dry_spell_seed")]
    pub dry_spell: u64,
}

impl Default for SeedsToml {
    fn default() -> Self {
        Self {
            standard_normal: default_standard_normal_seed(),
            precipitation_depth: default_precipitation_depth_seed(),
            wet_spell: default_wet_spell_seed(),
            dry_spell: default_dry_spell_seed(),
        }
    }
}

fn default_standard_normal_seed() -> u64 {
    1
}
fn default_precipitation_depth_seed() -> u64 {
    2
}
fn default_wet_spell_seed() -> u64 {
    3
}
fn default_dry_spell_seed() -> u64 {
    4
}

/// Periods as inclusive `[first, last]` date pairs.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodsToml {
    pub data: Vec<[NaiveDate; 2]>,
    #[serde(default)]
    pub projection: Vec<[NaiveDate; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpellToml {
    /// `"projected"` or `"historical"`.
    #[serde(default = "default_spell_source")]
    pub source: String,
    pub data: Vec<SpellPeriodToml>,
    #[serde(default)]
    pub projection: Vec<SpellPeriodToml>,
}

fn default_spell_source() -> String {
    "projected".to_string()
}

/// Negative-binomial `[N, P]` pairs of one period.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpellPeriodToml {
    pub wet: Monthly<[f64; 2]>,
    pub dry: Monthly<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepthToml {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_data_truncation")]
    pub data_truncation: u8,
    #[serde(default = "default_projection_truncation")]
    pub projection_truncation: u8,
    #[serde(default = "default_baseline_truncation")]
    pub baseline_truncation: u8,
    /// Unit names; their count fixes the number of spatial units.
    pub units: Vec<String>,
    /// 0-based region of every unit.
    #[serde(default)]
    pub unit_regions: Vec<Monthly<usize>>,
    #[serde(default)]
    pub regional_max: Vec<Monthly<f64>>,
    #[serde(default)]
    pub projected_model_max: Vec<Monthly<f64>>,
    #[serde(default)]
    pub projected_scaled_max: Vec<Monthly<f64>>,
    #[serde(default)]
    pub baseline_design_max: Vec<Monthly<f64>>,
    #[serde(default)]
    pub alternative_design_max: Vec<Monthly<f64>>,
    pub data: Vec<DepthPeriodToml>,
    #[serde(default)]
    pub projection: Vec<DepthPeriodToml>,
}

fn default_threshold() -> f64 {
    wgen_depth::DEFAULT_THRESHOLD
}
fn default_data_truncation() -> u8 {
    1
}
fn default_projection_truncation() -> u8 {
    2
}
fn default_baseline_truncation() -> u8 {
    4
}

/// Mixed-exponential `[alpha, mu1, mu2]` triples of one period, given either
/// per unit or per region.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DepthPeriodToml {
    #[serde(default)]
    pub units: Option<Vec<Monthly<[f64; 3]>>>,
    #[serde(default)]
    pub regions: Option<Vec<Monthly<[f64; 3]>>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResidualToml {
    #[serde(default = "default_stability_bound")]
    pub stability_bound: f64,
    #[serde(default = "default_chi_fallback")]
    pub chi_fallback: f64,
    #[serde(default = "default_epsilon_fallback")]
    pub epsilon_fallback: f64,
    #[serde(default = "default_initial_chi")]
    pub initial_chi: f64,
    pub data: Vec<ResidualPeriodToml>,
    #[serde(default)]
    pub projection: Vec<ResidualPeriodToml>,
}

fn default_stability_bound() -> f64 {
    4.0
}
fn default_chi_fallback() -> f64 {
    1.0
}
fn default_epsilon_fallback() -> f64 {
    0.25
}
fn default_initial_chi() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResidualPeriodToml {
    pub a: [[f64; 2]; 2],
    pub b: [[f64; 2]; 2],
    pub tmax_dry: SeasonalToml,
    pub tmax_wet: SeasonalToml,
    pub tmin_dry: SeasonalToml,
    pub tmin_wet: SeasonalToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeasonalToml {
    pub mean: Series,
    pub std: Series,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatershedToml {
    /// Area weight per unit; equal weights when empty.
    #[serde(default)]
    pub area_weights: Vec<f64>,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_monthly_delta_t")]
    pub monthly_delta_t: [f64; 12],
}

impl Default for WatershedToml {
    fn default() -> Self {
        Self {
            area_weights: Vec::new(),
            latitude: default_latitude(),
            monthly_delta_t: default_monthly_delta_t(),
        }
    }
}

fn default_latitude() -> f64 {
    wgen_summary::DEFAULT_LATITUDE_DEG
}
fn default_monthly_delta_t() -> [f64; 12] {
    wgen_summary::DEFAULT_MONTHLY_DELTA_T
}
