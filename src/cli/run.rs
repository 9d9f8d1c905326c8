use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use firevox_compare::pipeline::{run_scenario, RunSummary};
use firevox_compare::scenario::ScenarioConfig;

use super::ScenarioArg;

/// Render comparison charts for one scenario
pub fn run_one(
    scenario: Option<ScenarioArg>,
    config: Option<PathBuf>,
    data_dir: &Path,
    out_dir: &Path,
    summary_json: Option<PathBuf>,
) -> Result<()> {
    let scenario = match (config, scenario) {
        (Some(path), _) => ScenarioConfig::from_toml_file(&path)
            .with_context(|| format!("Failed to load scenario file: {}", path.display()))?,
        (None, Some(arg)) => ScenarioConfig::from(arg),
        (None, None) => anyhow::bail!("No scenario given"),
    };

    let summary = run_scenario(&scenario, data_dir, out_dir)
        .with_context(|| format!("Scenario '{}' failed", scenario.name))?;

    print_summary(&summary);
    write_summaries(summary_json, &[summary])
}

/// Render comparison charts for every built-in scenario
pub fn run_all(data_dir: &Path, out_dir: &Path, summary_json: Option<PathBuf>) -> Result<()> {
    let mut summaries = Vec::new();
    for scenario in ScenarioConfig::all_builtin() {
        let summary = run_scenario(&scenario, data_dir, out_dir)
            .with_context(|| format!("Scenario '{}' failed", scenario.name))?;
        print_summary(&summary);
        summaries.push(summary);
    }
    write_summaries(summary_json, &summaries)
}

fn write_summaries(path: Option<PathBuf>, summaries: &[RunSummary]) -> Result<()> {
    if let Some(path) = path {
        let json = serde_json::to_string_pretty(summaries)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write summary file: {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    #[cfg(feature = "colorized_output")]
    {
        use console::style;
        println!("{}", style(&summary.scenario).bold());
    }
    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", summary.scenario);
    }

    for chart in &summary.charts {
        let deviation = match (chart.rmse_kelvin, chart.max_abs_deviation_kelvin) {
            (Some(rmse), Some(max)) => format!("RMSE {rmse:.3} K, max |dev| {max:.3} K"),
            _ => "no overlap".to_string(),
        };
        println!(
            "  {}: {} vs {} samples, {}",
            chart.output, chart.primary_samples, chart.secondary_samples, deviation
        );
    }
}
