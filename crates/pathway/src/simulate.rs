//! Realization driver and ensemble runner.

use chrono::Datelike;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};
use wgen_calendar::date_sequence;
use wgen_spell::DayState;

use crate::calibration::{Calibration, RunSettings};
use crate::error::PathwayError;
use crate::output::{PathwaySeries, RealizationOutput};
use crate::seeds::RandomStreams;
use crate::state::{Pathway, PathwayState};

/// Simulates one realization day by day.
///
/// Both pathways see the same daily draws; they differ only through the
/// calibration each one reads. The realization number offsets every base
/// seed, so the result depends only on `calibration`, `run` and
/// `realization`.
///
/// # Errors
///
/// - [`PathwayError::InvalidWindow`] if the run window is empty.
/// - Any table lookup error from the components.
#[tracing::instrument(skip_all, fields(realization = realization, n_days = tracing::field::Empty))]
pub fn simulate_realization(
    calibration: &Calibration,
    run: &RunSettings,
    realization: u64,
) -> Result<RealizationOutput, PathwayError> {
    run.validate()?;
    let dates = date_sequence(run.start(), run.end())?;
    tracing::Span::current().record("n_days", dates.len());

    let settings = calibration.residual_settings();
    let n_units = calibration.n_units();
    let seeds = run.seeds().for_realization(realization);
    let mut streams = RandomStreams::new(&seeds, settings.epsilon_fallback())?;

    let start = run.start();
    let mut start_rng = StdRng::seed_from_u64(run.seeds().start_state(realization));
    let start_state = if start_rng.random::<f64>() > 0.5 {
        DayState::Wet
    } else {
        DayState::Dry
    };
    let (wet_u, dry_u) = streams.initial_spells();
    let u = match start_state {
        DayState::Wet => wet_u,
        DayState::Dry => dry_u,
    };
    let month = start.month() as u8;
    let mut pathways = Vec::with_capacity(Pathway::ALL.len());
    for pathway in Pathway::ALL {
        let period = calibration.period(pathway, start);
        let duration = calibration.spell(period, start_state, month)?.quantile(u);
        debug!(pathway = pathway.label(), ?start_state, duration, "initial spell");
        pathways.push(PathwayState::new(start_state, duration, settings.initial_chi()));
    }

    let mut series = [
        PathwaySeries::with_capacity(dates.len(), n_units),
        PathwaySeries::with_capacity(dates.len(), n_units),
    ];
    let mut draws = streams.draw(n_units);
    let mut depths = vec![0.0; n_units];
    for (day, &date) in dates.iter().enumerate() {
        if day > 0 {
            streams.draw_into(&mut draws);
        }
        for (pathway, (state, out)) in Pathway::ALL
            .into_iter()
            .zip(pathways.iter_mut().zip(series.iter_mut()))
        {
            let values = state.step(calibration, pathway, date, &draws, &mut depths)?;
            out.push(values, &depths);
        }
    }

    info!(realization, n_days = dates.len(), "realization complete");
    Ok(RealizationOutput::new(realization, dates, series))
}

/// Simulates `realizations` in parallel and maps each output through `f`.
///
/// Results are returned in the order of `realizations`. Each realization
/// owns its streams and state; only `calibration` is shared.
///
/// # Errors
///
/// - [`PathwayError::NoRealizations`] if `realizations` is empty.
/// - The first error any realization returns.
#[tracing::instrument(skip_all, fields(n_realizations = realizations.len()))]
pub fn simulate_ensemble<T, F>(
    calibration: &Calibration,
    run: &RunSettings,
    realizations: &[u64],
    f: F,
) -> Result<Vec<T>, PathwayError>
where
    T: Send,
    F: Fn(RealizationOutput) -> T + Sync + Send,
{
    if realizations.is_empty() {
        return Err(PathwayError::NoRealizations);
    }
    run.validate()?;
    info!(
        start = %run.start(),
        end = %run.end(),
        n_units = calibration.n_units(),
        "simulating ensemble"
    );
    realizations
        .par_iter()
        .map(|&r| simulate_realization(calibration, run, r).map(&f))
        .collect()
}
