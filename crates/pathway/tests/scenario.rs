//! Single-unit scenario with one data period and no projection periods.

use approx::assert_relative_eq;
use chrono::{Datelike, NaiveDate};
use wgen_calendar::{DateInterval, PeriodResolver};
use wgen_depth::{DepthGrid, DepthTables, MixedExpParams, TruncationOption, TruncationTables};
use wgen_pathway::{Calibration, Pathway, RunSettings, SeedSet, simulate_ensemble, simulate_realization};
use wgen_residual::{
    ResidualModel, ResidualPeriod, ResidualSettings, SeasonalSeries, SeasonalTable, SmallMat,
    VarMatrices,
};
use wgen_spell::{NegBinomial, PeriodSpells, SpellSource, SpellTables};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One unit, alpha 0.6, mu1 2, mu2 15, max 50, wet NB(3, 0.6), dry NB(2, 0.5).
fn calibration() -> Calibration {
    calibration_with(PeriodSpells::uniform(
        NegBinomial::new(3.0, 0.6).unwrap(),
        NegBinomial::new(2.0, 0.5).unwrap(),
    ))
}

fn calibration_with(spells: PeriodSpells) -> Calibration {
    let resolver = PeriodResolver::new(
        vec![DateInterval::from_inclusive(date(1900, 1, 1), date(2100, 12, 31)).unwrap()],
        vec![],
    )
    .unwrap();

    let spells = SpellTables::new(vec![spells], vec![], SpellSource::Projected).unwrap();

    let params = MixedExpParams::new(0.6, 2.0, 15.0).unwrap();
    let truncation = TruncationTables::new().with_regional(vec![[50.0; 12]], vec![[0; 12]]);
    let grid = DepthGrid::build(
        &[[params; 12]],
        TruncationOption::Regional,
        0,
        &truncation,
        0.2,
    )
    .unwrap();
    let depths = DepthTables::new(vec![grid], vec![], vec![]).unwrap();

    let matrices = VarMatrices::new(
        SmallMat::from_rows([[0.61683454, 0.0860823], [0.10615798, 0.66408471]]),
        SmallMat::from_rows([[0.74574768, 0.0], [0.24627435, 0.64246926]]),
    )
    .unwrap();
    let s = |mean: f64, std: f64| SeasonalSeries::constant(mean, std).unwrap();
    let seasonal = SeasonalTable::new([[s(30.0, 3.0), s(26.0, 2.5)], [s(15.0, 2.0), s(16.0, 1.5)]]);
    let residual = ResidualModel::new(
        vec![ResidualPeriod::new(matrices, seasonal)],
        vec![],
        ResidualSettings::new(),
    )
    .unwrap();

    Calibration::new(resolver, spells, depths, residual).unwrap()
}

fn one_year() -> RunSettings {
    RunSettings::new(date(2001, 1, 1), date(2001, 12, 31)).with_seeds(SeedSet::new(1, 1, 1, 1))
}

#[test]
fn scenario_is_deterministic() {
    let cal = calibration();
    let a = simulate_realization(&cal, &one_year(), 1).unwrap();
    let b = simulate_realization(&cal, &one_year(), 1).unwrap();
    assert_eq!(a.n_days(), 365);
    assert_eq!(a, b);
}

#[test]
fn depths_respect_state_and_bounds() {
    let cal = calibration();
    let out = simulate_realization(&cal, &one_year(), 1).unwrap();
    let series = out.series(Pathway::H0);
    let mut n_wet = 0;
    for (day, &wet) in series.wet().iter().enumerate() {
        let d = series.depth_row(day)[0];
        if wet {
            n_wet += 1;
            assert!((0.2..=50.0).contains(&d), "day {day}: {d}");
        } else {
            assert_eq!(d, 0.0, "day {day}");
        }
    }
    assert!(n_wet > 0 && n_wet < 365, "wet days: {n_wet}");
}

#[test]
fn temperatures_are_finite() {
    let cal = calibration();
    let out = simulate_realization(&cal, &one_year(), 1).unwrap();
    for r in out.records(Pathway::H1) {
        assert!(r.tmax.is_finite() && r.tmin.is_finite(), "{}", r.date);
    }
}

#[test]
fn identical_calibration_gives_identical_pathways() {
    let cal = calibration();
    let out = simulate_realization(&cal, &one_year(), 3).unwrap();
    assert_eq!(out.series(Pathway::H0), out.series(Pathway::H1));
}

#[test]
fn realizations_differ() {
    let cal = calibration();
    let a = simulate_realization(&cal, &one_year(), 1).unwrap();
    let b = simulate_realization(&cal, &one_year(), 2).unwrap();
    assert_ne!(a.series(Pathway::H0), b.series(Pathway::H0));
}

#[test]
fn ensemble_matches_sequential_runs() {
    let cal = calibration();
    let run = one_year();
    let wet_days = |out: wgen_pathway::RealizationOutput| {
        out.series(Pathway::H0).wet().iter().filter(|&&w| w).count()
    };
    let parallel = simulate_ensemble(&cal, &run, &[1, 2, 3, 4], wet_days).unwrap();
    let sequential: Vec<usize> = [1, 2, 3, 4]
        .iter()
        .map(|&r| wet_days(simulate_realization(&cal, &run, r).unwrap()))
        .collect();
    assert_eq!(parallel, sequential);
}

#[test]
fn ensemble_requires_realizations() {
    let cal = calibration();
    assert!(simulate_ensemble(&cal, &one_year(), &[], |o| o.n_days()).is_err());
}

#[test]
fn reversed_window_is_rejected() {
    let cal = calibration();
    let run = RunSettings::new(date(2001, 2, 1), date(2001, 1, 1));
    assert!(simulate_realization(&cal, &run, 1).is_err());
}

#[test]
fn long_run_wet_fraction_matches_spell_means() {
    let cal = calibration();
    let start = date(2001, 1, 1);
    let end = start + chrono::Days::new(9_999);
    let run = RunSettings::new(start, end).with_seeds(SeedSet::new(5, 6, 7, 8));
    let out = simulate_realization(&cal, &run, 1).unwrap();
    assert_eq!(out.n_days(), 10_000);

    let wet = NegBinomial::new(3.0, 0.6).unwrap().mean_spell_days();
    let dry = NegBinomial::new(2.0, 0.5).unwrap().mean_spell_days();
    let expected = wet / (wet + dry);
    let observed = out.series(Pathway::H0).wet().iter().filter(|&&w| w).count() as f64 / 10_000.0;
    assert_relative_eq!(observed, expected, max_relative = 0.1);
}

#[test]
fn monthly_wet_fraction_follows_monthly_spell_means() {
    // Wet season Nov..Mar, dry season May..Sep, shoulder months in between.
    let season = |m: usize| match m + 1 {
        11 | 12 | 1 | 2 | 3 => 0,
        5..=9 => 1,
        _ => 2,
    };
    let wet_by_season = [(3.0, 0.5), (1.0, 0.7), (3.0, 0.6)];
    let dry_by_season = [(1.0, 0.6), (3.0, 0.4), (2.0, 0.5)];
    let nb = |(n, p): (f64, f64)| NegBinomial::new(n, p).unwrap();
    let wet: [NegBinomial; 12] = std::array::from_fn(|m| nb(wet_by_season[season(m)]));
    let dry: [NegBinomial; 12] = std::array::from_fn(|m| nb(dry_by_season[season(m)]));
    let cal = calibration_with(PeriodSpells::new(wet, dry));

    let start = date(2001, 1, 1);
    let run = RunSettings::new(start, start + chrono::Days::new(29_999))
        .with_seeds(SeedSet::new(11, 12, 13, 14));
    let out = simulate_realization(&cal, &run, 1).unwrap();

    let mut wet_days = [0usize; 12];
    let mut all_days = [0usize; 12];
    for (d, &w) in out.dates().iter().zip(out.series(Pathway::H0).wet()) {
        let m = d.month0() as usize;
        all_days[m] += 1;
        wet_days[m] += usize::from(w);
    }
    let fraction = |m: usize| wet_days[m] as f64 / all_days[m] as f64;
    let expected = |m: usize| {
        let w = wet[m].mean_spell_days();
        let d = dry[m].mean_spell_days();
        w / (w + d)
    };

    // January and July sit mid-season, away from the parameter changes.
    for m in [0, 6] {
        assert_relative_eq!(fraction(m), expected(m), max_relative = 0.1);
    }
    assert!(fraction(0) > 2.0 * fraction(6), "Jan {} vs Jul {}", fraction(0), fraction(6));
}
