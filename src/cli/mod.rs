use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use firevox_compare::scenario::ScenarioConfig;

mod info;
mod run;

/// FireVox vs. CFD temperature comparison charts
#[derive(Parser)]
#[command(name = "firevox-compare")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Built-in benchmark scenario.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ScenarioArg {
    /// Slab conduction vs. SimScale
    Conduction,
    /// Convective cooling vs. FDS
    Convection,
    /// Two-plane radiation vs. FDS
    Radiation,
}

impl From<ScenarioArg> for ScenarioConfig {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Conduction => ScenarioConfig::conduction(),
            ScenarioArg::Convection => ScenarioConfig::convection(),
            ScenarioArg::Radiation => ScenarioConfig::radiation(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render comparison charts for one scenario
    Run {
        /// Built-in scenario (not needed when --config is given)
        #[arg(value_name = "SCENARIO", value_enum, required_unless_present = "config")]
        scenario: Option<ScenarioArg>,

        /// Directory holding the simulator and FireVox CSV files
        #[arg(short, long, default_value = ".")]
        data_dir: PathBuf,

        /// Directory the PNG charts are written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Load a scenario definition from a TOML file instead
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write run statistics to a JSON file
        #[arg(long, value_name = "FILE")]
        summary_json: Option<PathBuf>,
    },

    /// Render comparison charts for every built-in scenario
    All {
        /// Directory holding the simulator and FireVox CSV files
        #[arg(short, long, default_value = ".")]
        data_dir: PathBuf,

        /// Directory the PNG charts are written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Write run statistics to a JSON file
        #[arg(long, value_name = "FILE")]
        summary_json: Option<PathBuf>,
    },

    /// Display information about a simulator or FireVox CSV file
    Info {
        /// Input CSV file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            scenario,
            data_dir,
            out_dir,
            config,
            summary_json,
        } => run::run_one(scenario, config, &data_dir, &out_dir, summary_json),
        Commands::All {
            data_dir,
            out_dir,
            summary_json,
        } => run::run_all(&data_dir, &out_dir, summary_json),
        Commands::Info { file } => info::run(&file),
    }
}
