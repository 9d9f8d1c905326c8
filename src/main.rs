//! # FireVox comparison chart generator
//!
//! Command-line front end for rendering FireVox vs. CFD temperature
//! comparison charts.
//!
//! ```bash
//! # Render one benchmark scenario
//! firevox-compare run convection --data-dir data --out-dir plots
//!
//! # Render every benchmark scenario
//! firevox-compare all --data-dir data --out-dir plots
//!
//! # Inspect a device or thermometer CSV
//! firevox-compare info data/convection/convective_cooling_devc.csv
//! ```

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    cli::init_logging(args.verbosity());
    cli::dispatch(args)
}
