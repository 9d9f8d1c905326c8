//! Scenario configuration: which files to load, how to normalize them, and
//! which charts to draw.
//!
//! The three built-in scenarios reproduce the FireVox validation benchmarks
//! (conduction, convection, radiation) exactly, down to chart titles and
//! output file names. Custom scenarios can be supplied as TOML files with
//! the same shape, so paths and grid parameters are swappable without
//! touching source:
//!
//! ```toml
//! name = "convection"
//! primary_label = "FDS"
//! unit = "celsius"
//! grid = { step = 0.5, count = 3600 }
//!
//! [[sources]]
//! path = "convection/convective_cooling_devc.csv"
//! skip_rows = 1
//! time_column = "Time"
//!
//! [[charts]]
//! column = "inner temp"
//! firevox = "convection/hotPlateThermometer_3600.csv"
//! title = "Inner temperature of slab at (15, 15, 0) cm"
//! output = "conv_inner.png"
//! y_range = [1260.0, 1300.0]
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::series::{SampleGrid, TemperatureUnit};

/// Errors raised while loading or validating a scenario definition.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("chart '{output}' references primary source {source_index}, but the scenario defines {count}")]
    BadSourceIndex {
        output: String,
        source_index: usize,
        count: usize,
    },
}

/// One primary CSV and how to read it.
#[derive(Debug, Clone, Deserialize)]
pub struct PrimarySource {
    /// Path relative to the data directory.
    pub path: String,
    /// Lines to skip before the header row (FDS writes a units line first).
    #[serde(default)]
    pub skip_rows: usize,
    /// Name of the time column.
    pub time_column: String,
}

/// One quantity to compare: a named column of a primary source against one
/// FireVox trace, rendered to one output image.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartSpec {
    /// Index into the scenario's primary sources.
    #[serde(default)]
    pub source: usize,
    /// Column holding the simulator values.
    pub column: String,
    /// FireVox trace path relative to the data directory.
    pub firevox: String,
    /// Chart title.
    pub title: String,
    /// Output image file name.
    pub output: String,
    /// Optional fixed y-range `[min, max]` in Kelvin.
    #[serde(default)]
    pub y_range: Option<(f64, f64)>,
}

/// A full scenario: primary sources, FireVox traces, and the charts that
/// overlay them.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    /// Legend label for the simulator series (`FDS` or `SimScale`).
    pub primary_label: String,
    /// Unit of the primary temperature columns.
    #[serde(default)]
    pub unit: TemperatureUnit,
    /// Sampling grid shared by every FireVox trace in the scenario.
    pub grid: SampleGrid,
    pub sources: Vec<PrimarySource>,
    pub charts: Vec<ChartSpec>,
}

impl ScenarioConfig {
    /// The slab-conduction benchmark.
    ///
    /// SimScale probe exports, one file per probe, already Kelvin; FireVox
    /// thermometers sampled at 0.1 s for 100 s.
    pub fn conduction() -> Self {
        let probe = |path: &str| PrimarySource {
            path: path.to_string(),
            skip_rows: 0,
            time_column: "Time (s)".to_string(),
        };
        Self {
            name: "conduction".to_string(),
            primary_label: "SimScale".to_string(),
            unit: TemperatureUnit::Kelvin,
            grid: SampleGrid::new(0.1, 1000),
            sources: vec![
                probe("conduction/hotter.csv"),
                probe("conduction/colder.csv"),
            ],
            charts: vec![
                ChartSpec {
                    source: 0,
                    column: "TEMP".to_string(),
                    firevox: "conduction/thermometerHotterSide.csv".to_string(),
                    title: "Slab temperature at hotter (15, 15, 0) cm".to_string(),
                    output: "cond_hotter.png".to_string(),
                    y_range: None,
                },
                ChartSpec {
                    source: 1,
                    column: "TEMP".to_string(),
                    firevox: "conduction/thermometerColderSide.csv".to_string(),
                    title: "Slab temperature at colder (15, 15, 120) cm".to_string(),
                    output: "cond_colder.png".to_string(),
                    y_range: None,
                },
            ],
        }
    }

    /// The convective-cooling benchmark.
    ///
    /// One FDS device file (Celsius, units line above the header) holding
    /// three measured quantities; FireVox thermometers sampled at 0.5 s for
    /// 1800 s.
    pub fn convection() -> Self {
        let chart = |column: &str, firevox: &str, title: &str, output: &str| ChartSpec {
            source: 0,
            column: column.to_string(),
            firevox: firevox.to_string(),
            title: title.to_string(),
            output: output.to_string(),
            y_range: None,
        };
        Self {
            name: "convection".to_string(),
            primary_label: "FDS".to_string(),
            unit: TemperatureUnit::Celsius,
            grid: SampleGrid::new(0.5, 3600),
            sources: vec![PrimarySource {
                path: "convection/convective_cooling_devc.csv".to_string(),
                skip_rows: 1,
                time_column: "Time".to_string(),
            }],
            charts: vec![
                ChartSpec {
                    y_range: Some((1260.0, 1300.0)),
                    ..chart(
                        "inner temp",
                        "convection/hotPlateThermometer_3600.csv",
                        "Inner temperature of slab at (15, 15, 0) cm",
                        "conv_inner.png",
                    )
                },
                chart(
                    "gas temp",
                    "convection/gasThermometer_3600.csv",
                    "Air temperature at (15, 15, 120) cm",
                    "conv_air.png",
                ),
                chart(
                    "surface temp",
                    "convection/surfaceThermometer_3600.csv",
                    "Slab surface temperature at (15, 15, 100) cm",
                    "conv_surf.png",
                ),
            ],
        }
    }

    /// The two-plane radiation benchmark.
    ///
    /// One FDS device file per plane configuration (parallel and
    /// perpendicular), each with a hotter and a colder probe; FireVox
    /// thermometers sampled at 0.1 s for 2400 s.
    pub fn radiation() -> Self {
        let chart = |source: usize, column: &str, configuration: &str| ChartSpec {
            source,
            column: column.to_string(),
            firevox: format!(
                "radiation/firevox/{}_{configuration}.csv",
                if column == "Hotter" { "hotter" } else { "cooler" }
            ),
            title: format!(
                "Slab temperature of middle point of {} plane for {configuration} configuration",
                column.to_lowercase()
            ),
            output: format!("rad_{configuration}_{}.png", column.to_lowercase()),
            y_range: None,
        };
        let device = |path: &str| PrimarySource {
            path: path.to_string(),
            skip_rows: 1,
            time_column: "Time".to_string(),
        };
        Self {
            name: "radiation".to_string(),
            primary_label: "FDS".to_string(),
            unit: TemperatureUnit::Celsius,
            grid: SampleGrid::new(0.1, 24000),
            sources: vec![
                device("radiation/fds/geom_para_devc.csv"),
                device("radiation/fds/geom_perp_devc.csv"),
            ],
            charts: vec![
                chart(0, "Hotter", "parallel"),
                chart(0, "Colder", "parallel"),
                chart(1, "Hotter", "perpendicular"),
                chart(1, "Colder", "perpendicular"),
            ],
        }
    }

    /// Look up a built-in scenario by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "conduction" => Some(Self::conduction()),
            "convection" => Some(Self::convection()),
            "radiation" => Some(Self::radiation()),
            _ => None,
        }
    }

    /// Every built-in scenario, in benchmark order.
    pub fn all_builtin() -> Vec<Self> {
        vec![Self::conduction(), Self::convection(), Self::radiation()]
    }

    /// Load a scenario definition from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a scenario definition from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ScenarioError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-references between charts and sources.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        for chart in &self.charts {
            if chart.source >= self.sources.len() {
                return Err(ScenarioError::BadSourceIndex {
                    output: chart.output.clone(),
                    source_index: chart.source,
                    count: self.sources.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup() {
        assert!(ScenarioConfig::builtin("conduction").is_some());
        assert!(ScenarioConfig::builtin("convection").is_some());
        assert!(ScenarioConfig::builtin("radiation").is_some());
        assert!(ScenarioConfig::builtin("explosion").is_none());
        assert_eq!(ScenarioConfig::all_builtin().len(), 3);
    }

    #[test]
    fn convection_outputs_match_benchmark() {
        let config = ScenarioConfig::convection();
        let outputs: Vec<&str> = config.charts.iter().map(|c| c.output.as_str()).collect();
        assert_eq!(outputs, ["conv_inner.png", "conv_air.png", "conv_surf.png"]);
        assert_eq!(config.unit, TemperatureUnit::Celsius);
        assert_eq!(config.grid.points(), 3601);
        assert_eq!(config.charts[0].y_range, Some((1260.0, 1300.0)));
    }

    #[test]
    fn conduction_stays_in_kelvin() {
        let config = ScenarioConfig::conduction();
        assert_eq!(config.unit, TemperatureUnit::Kelvin);
        assert_eq!(config.grid.points(), 1001);
        assert_eq!(config.primary_label, "SimScale");
    }

    #[test]
    fn radiation_covers_both_configurations() {
        let config = ScenarioConfig::radiation();
        let outputs: Vec<&str> = config.charts.iter().map(|c| c.output.as_str()).collect();
        assert_eq!(
            outputs,
            [
                "rad_parallel_hotter.png",
                "rad_parallel_colder.png",
                "rad_perpendicular_hotter.png",
                "rad_perpendicular_colder.png",
            ]
        );
        assert_eq!(config.grid.points(), 24001);
        assert!(config.validate().is_ok());
        assert!(config.charts[0].firevox.ends_with("hotter_parallel.csv"));
        assert!(config.charts[1].firevox.ends_with("cooler_parallel.csv"));
    }

    #[test]
    fn parse_scenario_toml() {
        let toml = r#"
            name = "custom"
            primary_label = "FDS"
            unit = "celsius"
            grid = { step = 0.5, count = 10 }

            [[sources]]
            path = "run/devc.csv"
            skip_rows = 1
            time_column = "Time"

            [[charts]]
            column = "gas temp"
            firevox = "run/gas.csv"
            title = "Gas temperature"
            output = "gas.png"
            y_range = [280.0, 400.0]
        "#;

        let config = ScenarioConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.name, "custom");
        assert_eq!(config.unit, TemperatureUnit::Celsius);
        assert_eq!(config.grid, SampleGrid::new(0.5, 10));
        assert_eq!(config.sources[0].skip_rows, 1);
        assert_eq!(config.charts[0].y_range, Some((280.0, 400.0)));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
            name = "minimal"
            primary_label = "FDS"
            grid = { step = 0.1, count = 5 }

            [[sources]]
            path = "a.csv"
            time_column = "Time"

            [[charts]]
            column = "TEMP"
            firevox = "b.csv"
            title = "t"
            output = "o.png"
        "#;

        let config = ScenarioConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.unit, TemperatureUnit::Kelvin);
        assert_eq!(config.sources[0].skip_rows, 0);
        assert_eq!(config.charts[0].source, 0);
        assert_eq!(config.charts[0].y_range, None);
    }

    #[test]
    fn bad_source_index_is_rejected() {
        let toml = r#"
            name = "broken"
            primary_label = "FDS"
            grid = { step = 0.1, count = 5 }

            [[sources]]
            path = "a.csv"
            time_column = "Time"

            [[charts]]
            source = 3
            column = "TEMP"
            firevox = "b.csv"
            title = "t"
            output = "o.png"
        "#;

        let err = ScenarioConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(
            err,
            ScenarioError::BadSourceIndex {
                source_index: 3,
                count: 1,
                ..
            }
        ));
    }
}
