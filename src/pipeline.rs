//! The load → normalize → align → render pipeline.
//!
//! One parameterized pass replaces the three near-identical per-scenario
//! scripts: each primary source is loaded once with the union of columns its
//! charts need, temperature columns are normalized to Kelvin, every FireVox
//! trace is checked against the scenario's sampling grid, and one chart per
//! quantity is rendered. The run returns per-chart comparison statistics.

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use log::info;
use serde::Serialize;
use thiserror::Error;

use crate::loader::{self, LoaderError};
use crate::render::{self, ChartInput, RenderError};
use crate::scenario::{ChartSpec, ScenarioConfig, ScenarioError};
use crate::series::TimeSeries;

/// Legend label of the FireVox series on every chart.
pub const SECONDARY_LABEL: &str = "FireVox";

/// Errors raised while running a scenario.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error("{path}: expected {expected} samples for a {step} s grid, found {actual}")]
    LengthMismatch {
        path: String,
        expected: usize,
        actual: usize,
        step: f64,
    },

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Comparison statistics for one rendered chart.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSummary {
    pub output: String,
    pub title: String,
    pub primary_samples: usize,
    pub secondary_samples: usize,
    pub primary_final_kelvin: Option<f64>,
    pub secondary_final_kelvin: Option<f64>,
    /// Root-mean-square deviation of the FireVox trace from the simulator
    /// trace interpolated onto the FireVox grid, over their time overlap.
    pub rmse_kelvin: Option<f64>,
    pub max_abs_deviation_kelvin: Option<f64>,
}

/// Statistics for one scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub scenario: String,
    pub generated_at: String,
    pub charts: Vec<ChartSummary>,
}

/// Run one scenario: read everything under `data_dir`, write charts under
/// `out_dir`.
pub fn run_scenario(
    config: &ScenarioConfig,
    data_dir: &Path,
    out_dir: &Path,
) -> Result<RunSummary, PipelineError> {
    config.validate()?;
    std::fs::create_dir_all(out_dir).map_err(|source| PipelineError::OutputDir {
        path: out_dir.display().to_string(),
        source,
    })?;

    info!(
        "scenario '{}': {} chart(s), grid {} x {} s",
        config.name,
        config.charts.len(),
        config.grid.count,
        config.grid.step
    );

    // Union of the columns each primary source must provide.
    let mut wanted: Vec<Vec<&str>> = vec![Vec::new(); config.sources.len()];
    for chart in &config.charts {
        let columns = &mut wanted[chart.source];
        if !columns.contains(&chart.column.as_str()) {
            columns.push(&chart.column);
        }
    }

    // Load and normalize each source once, not once per chart.
    let mut sources: Vec<(Vec<f64>, HashMap<String, Vec<f64>>)> =
        Vec::with_capacity(config.sources.len());
    for (source, columns) in config.sources.iter().zip(&wanted) {
        let path = data_dir.join(&source.path);
        let data = loader::read_primary(&path, source.skip_rows, &source.time_column, columns)?;
        let by_name = columns
            .iter()
            .map(|c| c.to_string())
            .zip(data.columns.into_iter().map(|c| config.unit.to_kelvin(c)))
            .collect();
        sources.push((data.time, by_name));
    }

    let axis = config.grid.axis();
    let mut charts = Vec::with_capacity(config.charts.len());
    for chart in &config.charts {
        let (time, by_name) = &sources[chart.source];
        let values = by_name.get(&chart.column).cloned().unwrap_or_default();
        let primary = TimeSeries::new(time.clone(), values);

        let trace_path = data_dir.join(&chart.firevox);
        let trace = loader::read_secondary(&trace_path)?;
        if trace.len() != config.grid.points() {
            return Err(PipelineError::LengthMismatch {
                path: trace_path.display().to_string(),
                expected: config.grid.points(),
                actual: trace.len(),
                step: config.grid.step,
            });
        }
        let secondary = TimeSeries::new(axis.clone(), trace);

        let out_path = out_dir.join(&chart.output);
        render::render_chart(
            &ChartInput {
                title: &chart.title,
                primary_label: &config.primary_label,
                secondary_label: SECONDARY_LABEL,
                primary: &primary,
                secondary: &secondary,
                y_range: chart.y_range,
            },
            &out_path,
        )?;

        let summary = summarize(chart, &primary, &secondary);
        match summary.rmse_kelvin {
            Some(rmse) => info!("wrote {} (RMSE {:.3} K)", out_path.display(), rmse),
            None => info!("wrote {}", out_path.display()),
        }
        charts.push(summary);
    }

    Ok(RunSummary {
        scenario: config.name.clone(),
        generated_at: Utc::now().to_rfc3339(),
        charts,
    })
}

fn summarize(chart: &ChartSpec, primary: &TimeSeries, secondary: &TimeSeries) -> ChartSummary {
    let mut sum_sq = 0.0;
    let mut max_abs = 0.0f64;
    let mut overlap = 0usize;
    for (t, v) in secondary.points() {
        if let Some(reference) = primary.sample_at(t) {
            let deviation = v - reference;
            sum_sq += deviation * deviation;
            max_abs = max_abs.max(deviation.abs());
            overlap += 1;
        }
    }

    ChartSummary {
        output: chart.output.clone(),
        title: chart.title.clone(),
        primary_samples: primary.len(),
        secondary_samples: secondary.len(),
        primary_final_kelvin: primary.last_value(),
        secondary_final_kelvin: secondary.last_value(),
        rmse_kelvin: (overlap > 0).then(|| (sum_sq / overlap as f64).sqrt()),
        max_abs_deviation_kelvin: (overlap > 0).then_some(max_abs),
    }
}
