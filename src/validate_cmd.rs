use anyhow::Result;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::{config, convert};

/// Builds every table from the configuration and reports its shape.
pub fn run(args: ValidateArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    let calibration = convert::build_calibration(&config)?;
    let run = convert::build_run_settings(&config, 0)?;
    convert::build_summary_settings(&config.watershed, calibration.n_units())?;
    convert::realization_numbers(config.run.first_realization, config.run.realizations)?;

    let resolver = calibration.resolver();
    info!(
        n_data = resolver.n_data(),
        n_projection = resolver.n_projection(),
        n_units = calibration.n_units(),
        "calibration built"
    );
    println!(
        "{}: ok ({} data period(s), {} projection period(s), {} unit(s), {} day(s) per realization)",
        args.config.display(),
        resolver.n_data(),
        resolver.n_projection(),
        calibration.n_units(),
        run.n_days()?,
    );
    Ok(())
}
