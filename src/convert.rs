//! Pure conversion functions: TOML config structs -> crate API types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use wgen_calendar::{DateInterval, PeriodResolver};
use wgen_depth::{DepthGrid, DepthTables, MixedExpParams, TruncationOption, TruncationTables};
use wgen_pathway::{Calibration, RunSettings, SeedSet};
use wgen_residual::{
    N_VARIABLES, ResidualModel, ResidualPeriod, ResidualSettings, SeasonalSeries, SeasonalTable,
    SmallMat, VarMatrices,
};
use wgen_spell::{NegBinomial, PeriodSpells, SpellSource, SpellTables};
use wgen_summary::{AreaWeights, SummarySettings};

/// Parses a spell source name into the corresponding enum variant.
pub fn parse_spell_source(s: &str) -> Result<SpellSource> {
    match s.to_lowercase().as_str() {
        "projected" => Ok(SpellSource::Projected),
        "historical" => Ok(SpellSource::Historical),
        other => bail!("unknown spell source: {other:?}"),
    }
}

/// Parses a truncation option code (1..=5).
pub fn parse_truncation(code: u8) -> Result<TruncationOption> {
    TruncationOption::try_from(code).with_context(|| format!("invalid truncation option {code}"))
}

/// Builds the period resolver from inclusive date pairs.
pub fn build_resolver(periods: &PeriodsToml) -> Result<PeriodResolver> {
    let intervals = |pairs: &[[chrono::NaiveDate; 2]], kind: &str| -> Result<Vec<DateInterval>> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, [first, last])| {
                DateInterval::from_inclusive(*first, *last)
                    .with_context(|| format!("{kind} period {i}"))
            })
            .collect()
    };
    let data = intervals(&periods.data, "data")?;
    let projection = intervals(&periods.projection, "projection")?;
    Ok(PeriodResolver::new(data, projection)?)
}

fn build_period_spells(period: &SpellPeriodToml) -> Result<PeriodSpells> {
    let to_nb = |pairs: [[f64; 2]; 12]| -> Result<[NegBinomial; 12]> {
        let mut out = Vec::with_capacity(12);
        for (m, [n, p]) in pairs.into_iter().enumerate() {
            out.push(NegBinomial::new(n, p).with_context(|| format!("month {}", m + 1))?);
        }
        out.try_into()
            .map_err(|_| anyhow::anyhow!("expected 12 monthly distributions"))
    };
    Ok(PeriodSpells::new(
        to_nb(period.wet.expand()).context("wet spells")?,
        to_nb(period.dry.expand()).context("dry spells")?,
    ))
}

/// Builds the spell tables.
pub fn build_spell_tables(spell: &SpellToml) -> Result<SpellTables> {
    let source = parse_spell_source(&spell.source)?;
    let build = |periods: &[SpellPeriodToml], kind: &str| -> Result<Vec<PeriodSpells>> {
        periods
            .iter()
            .enumerate()
            .map(|(i, p)| build_period_spells(p).with_context(|| format!("[spell] {kind} period {i}")))
            .collect()
    };
    Ok(SpellTables::new(
        build(&spell.data, "data")?,
        build(&spell.projection, "projection")?,
        source,
    )?)
}

fn expand_tables(tables: &[Monthly<f64>]) -> Vec<[f64; 12]> {
    tables.iter().map(Monthly::expand).collect()
}

/// Builds the five maximum-depth tables.
pub fn build_truncation_tables(depth: &DepthToml) -> TruncationTables {
    TruncationTables::new()
        .with_regional(
            expand_tables(&depth.regional_max),
            depth.unit_regions.iter().map(Monthly::expand).collect(),
        )
        .with_projected_model(expand_tables(&depth.projected_model_max))
        .with_projected_scaled(expand_tables(&depth.projected_scaled_max))
        .with_baseline_design(expand_tables(&depth.baseline_design_max))
        .with_alternative_design(expand_tables(&depth.alternative_design_max))
}

/// Resolves the per-unit monthly parameters of one period.
///
/// Exactly one of `units` or `regions` must be set. Region parameters are
/// assigned to units through `unit_regions`, month by month.
pub fn resolve_unit_params(
    period: &DepthPeriodToml,
    depth: &DepthToml,
    truncation: &TruncationTables,
) -> Result<Vec<[MixedExpParams; 12]>> {
    let n_units = depth.units.len();
    let triples: Vec<[[f64; 3]; 12]> = match (&period.units, &period.regions) {
        (Some(units), None) => {
            if units.len() != n_units {
                bail!("expected parameters for {n_units} units, got {}", units.len());
            }
            units.iter().map(Monthly::expand).collect()
        }
        (None, Some(regions)) => {
            let regions: Vec<[[f64; 3]; 12]> = regions.iter().map(Monthly::expand).collect();
            let mut out = Vec::with_capacity(n_units);
            for unit in 0..n_units {
                let mut months = [[0.0; 3]; 12];
                for (m, slot) in months.iter_mut().enumerate() {
                    let region = truncation.region_of(unit, m as u8 + 1)?;
                    *slot = regions.get(region).with_context(|| {
                        format!("unit {unit} maps to region {region}, which has no parameters")
                    })?[m];
                }
                out.push(months);
            }
            out
        }
        (Some(_), Some(_)) => bail!("depth period must set exactly one of units or regions, got both"),
        (None, None) => bail!("depth period must set exactly one of units or regions, got neither"),
    };
    triples
        .iter()
        .enumerate()
        .map(|(unit, months)| -> Result<[MixedExpParams; 12]> {
            let mut out = Vec::with_capacity(12);
            for (m, &[alpha, mu1, mu2]) in months.iter().enumerate() {
                out.push(
                    MixedExpParams::new(alpha, mu1, mu2)
                        .with_context(|| format!("unit {unit}, month {}", m + 1))?,
                );
            }
            out.try_into()
                .map_err(|_| anyhow::anyhow!("expected 12 monthly parameter sets"))
        })
        .collect()
}

/// Builds the data, projection and baseline depth grids.
///
/// Baseline grids reuse the first data period's parameters, truncated with
/// the baseline option at each projection period's position.
pub fn build_depth_tables(depth: &DepthToml) -> Result<DepthTables> {
    if depth.units.is_empty() {
        bail!("[depth] units must name at least one spatial unit");
    }
    let truncation = build_truncation_tables(depth);
    let data_option = parse_truncation(depth.data_truncation)?;
    let projection_option = parse_truncation(depth.projection_truncation)?;
    let baseline_option = parse_truncation(depth.baseline_truncation)?;

    let mut data = Vec::with_capacity(depth.data.len());
    let mut data_params = Vec::with_capacity(depth.data.len());
    for (i, period) in depth.data.iter().enumerate() {
        let params = resolve_unit_params(period, depth, &truncation)
            .with_context(|| format!("[depth] data period {i}"))?;
        data.push(
            DepthGrid::build(&params, data_option, 0, &truncation, depth.threshold)
                .with_context(|| format!("[depth] data period {i}"))?,
        );
        data_params.push(params);
    }
    let Some(first_data) = data_params.first() else {
        bail!("[depth] requires at least one data period");
    };

    let mut projection = Vec::with_capacity(depth.projection.len());
    let mut baseline = Vec::with_capacity(depth.projection.len());
    for (i, period) in depth.projection.iter().enumerate() {
        let params = resolve_unit_params(period, depth, &truncation)
            .with_context(|| format!("[depth] projection period {i}"))?;
        projection.push(
            DepthGrid::build(&params, projection_option, i, &truncation, depth.threshold)
                .with_context(|| format!("[depth] projection period {i}"))?,
        );
        baseline.push(
            DepthGrid::build(first_data, baseline_option, i, &truncation, depth.threshold)
                .with_context(|| format!("[depth] baseline for projection period {i}"))?,
        );
    }
    Ok(DepthTables::new(data, projection, baseline)?)
}

fn build_seasonal(s: &SeasonalToml, name: &str) -> Result<SeasonalSeries> {
    SeasonalSeries::new(s.mean.to_vec(), s.std.to_vec()).with_context(|| name.to_string())
}

fn build_residual_period(p: &ResidualPeriodToml) -> Result<ResidualPeriod<N_VARIABLES>> {
    let matrices = VarMatrices::new(SmallMat::from_rows(p.a), SmallMat::from_rows(p.b))?;
    let seasonal = SeasonalTable::new([
        [
            build_seasonal(&p.tmax_dry, "tmax_dry")?,
            build_seasonal(&p.tmax_wet, "tmax_wet")?,
        ],
        [
            build_seasonal(&p.tmin_dry, "tmin_dry")?,
            build_seasonal(&p.tmin_wet, "tmin_wet")?,
        ],
    ]);
    Ok(ResidualPeriod::new(matrices, seasonal))
}

/// Builds the residual model.
pub fn build_residual_model(residual: &ResidualToml) -> Result<ResidualModel<N_VARIABLES>> {
    let settings = ResidualSettings::new()
        .with_stability_bound(residual.stability_bound)
        .with_chi_fallback(residual.chi_fallback)
        .with_epsilon_fallback(residual.epsilon_fallback)
        .with_initial_chi(residual.initial_chi);
    let build = |periods: &[ResidualPeriodToml], kind: &str| -> Result<Vec<_>> {
        periods
            .iter()
            .enumerate()
            .map(|(i, p)| build_residual_period(p).with_context(|| format!("[residual] {kind} period {i}")))
            .collect()
    };
    Ok(ResidualModel::new(
        build(&residual.data, "data")?,
        build(&residual.projection, "projection")?,
        settings,
    )?)
}

/// Builds and cross-checks the full calibration.
pub fn build_calibration(config: &WgenConfig) -> Result<Calibration> {
    let resolver = build_resolver(&config.periods).context("invalid [periods]")?;
    let spells = build_spell_tables(&config.spell).context("invalid [spell]")?;
    let depths = build_depth_tables(&config.depth).context("invalid [depth]")?;
    let residual = build_residual_model(&config.residual).context("invalid [residual]")?;
    Calibration::new(resolver, spells, depths, residual).context("inconsistent calibration")
}

/// Builds the run window, offsetting every base seed by `seed_offset`.
pub fn build_run_settings(config: &WgenConfig, seed_offset: u64) -> Result<RunSettings> {
    let s = &config.seeds;
    let seeds = SeedSet::new(
        s.standard_normal.wrapping_add(seed_offset),
        s.precipitation_depth.wrapping_add(seed_offset),
        s.wet_spell.wrapping_add(seed_offset),
        s.dry_spell.wrapping_add(seed_offset),
    );
    let run = RunSettings::new(config.run.start, config.run.end).with_seeds(seeds);
    run.validate().context("invalid [run]")?;
    Ok(run)
}

/// Realization numbers to simulate.
pub fn realization_numbers(first: u64, count: u64) -> Result<Vec<u64>> {
    if count == 0 {
        bail!("realizations must be at least 1");
    }
    Ok((0..count).map(|i| first.wrapping_add(i)).collect())
}

/// Builds the summary settings for `n_units` spatial units.
pub fn build_summary_settings(watershed: &WatershedToml, n_units: usize) -> Result<SummarySettings> {
    let weights = if watershed.area_weights.is_empty() {
        AreaWeights::uniform(n_units)?
    } else {
        if watershed.area_weights.len() != n_units {
            bail!(
                "[watershed] area_weights has {} entries, expected {n_units}",
                watershed.area_weights.len()
            );
        }
        AreaWeights::new(watershed.area_weights.clone())?
    };
    let settings = SummarySettings::new(weights)
        .with_latitude(watershed.latitude)
        .with_monthly_delta_t(watershed.monthly_delta_t);
    settings.validate().context("invalid [watershed]")?;
    Ok(settings)
}
