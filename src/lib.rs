//! # FireVox Comparison Charts
//!
//! Validation tooling for the FireVox voxel fire simulator. It loads
//! temperature traces recorded by FireVox virtual thermometers and by a
//! reference CFD simulator (FDS or SimScale), aligns them on a shared time
//! axis, and renders overlaid comparison charts for the three benchmark
//! scenarios: conduction, convection, and radiation.
//!
//! ## Data shapes
//!
//! - **Primary** files are simulator device output: CSV with a header row,
//!   a named time column, and optionally a units line to skip above the
//!   header (FDS `_devc.csv` files). FDS reports Celsius; SimScale probe
//!   exports are already Kelvin. Charts are always drawn in Kelvin.
//! - **Secondary** files are FireVox thermometer traces: headerless CSV with
//!   one value per line and no time column. Their axis is reconstructed from
//!   the scenario's fixed sampling grid (`step * i` for `i = 0..=count`).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use firevox_compare::pipeline::run_scenario;
//! use firevox_compare::scenario::ScenarioConfig;
//! use std::path::Path;
//!
//! let scenario = ScenarioConfig::convection();
//! let summary = run_scenario(&scenario, Path::new("data"), Path::new("plots"))?;
//! for chart in &summary.charts {
//!     println!("{}: RMSE {:?} K", chart.output, chart.rmse_kelvin);
//! }
//! # Ok::<(), firevox_compare::pipeline::PipelineError>(())
//! ```
//!
//! Custom scenarios can be loaded from TOML files with
//! [`ScenarioConfig::from_toml_file`](scenario::ScenarioConfig::from_toml_file),
//! so file paths and grid parameters are swappable without editing source.

pub mod loader;
pub mod pipeline;
pub mod render;
pub mod scenario;
pub mod series;
