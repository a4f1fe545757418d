use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use wgen_pathway::simulate_ensemble;
use wgen_summary::{RealizationSummary, summarize_realization, to_json};

use crate::cli::GenerateArgs;
use crate::config::{self, WgenConfig};
use crate::convert;

/// Run the full generation pipeline.
pub fn run(args: GenerateArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    let summaries = simulate(&config, args.seed_offset, args.realizations)?;
    let json = to_json(&summaries)?;

    match args.output.as_deref().or(config.run.output.as_deref()) {
        Some(path) => write_output(path, &json)?,
        None => println!("{json}"),
    }
    Ok(())
}

/// Builds the calibration and summarises every realization.
pub fn simulate(
    config: &WgenConfig,
    seed_offset: u64,
    realizations: Option<u64>,
) -> Result<Vec<RealizationSummary>> {
    let calibration = convert::build_calibration(config)?;
    let run = convert::build_run_settings(config, seed_offset)?;
    let summary = convert::build_summary_settings(&config.watershed, calibration.n_units())?;
    let numbers = convert::realization_numbers(
        config.run.first_realization,
        realizations.unwrap_or(config.run.realizations),
    )?;

    info!(
        n_realizations = numbers.len(),
        n_days = run.n_days()?,
        seed_offset,
        "starting simulation"
    );
    let summaries = simulate_ensemble(&calibration, &run, &numbers, |output| {
        summarize_realization(&output, &summary)
    })
    .context("simulation failed")?
    .into_iter()
    .collect::<Result<Vec<_>, _>>()
    .context("summary failed")?;
    info!(n_realizations = summaries.len(), "simulation complete");
    Ok(summaries)
}

fn write_output(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote summary");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = include_str!("../demos/wgen.toml");

    fn write_demo(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("wgen.toml");
        std::fs::write(&path, DEMO).unwrap();
        path
    }

    #[test]
    fn simulate_demo_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let config = config::load(&write_demo(dir.path())).unwrap();
        let first = simulate(&config, 0, None).unwrap();
        let second = simulate(&config, 0, None).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].realization, 1);
        assert_eq!(first[1].realization, 2);
        assert_eq!(to_json(&first).unwrap(), to_json(&second).unwrap());
    }

    #[test]
    fn seed_offset_changes_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = config::load(&write_demo(dir.path())).unwrap();
        let base = simulate(&config, 0, Some(1)).unwrap();
        let shifted = simulate(&config, 100, Some(1)).unwrap();
        assert_eq!(base.len(), 1);
        assert_ne!(to_json(&base).unwrap(), to_json(&shifted).unwrap());
    }

    #[test]
    fn run_writes_json_summary() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out").join("summary.json");
        run(GenerateArgs {
            config: write_demo(dir.path()),
            output: Some(output.clone()),
            seed_offset: 0,
            realizations: Some(1),
        })
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let summaries = value.as_array().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0]["n_days"], 3652);
        assert!(summaries[0]["h1"]["annual_precip"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn missing_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
