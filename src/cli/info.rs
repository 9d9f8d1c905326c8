use anyhow::{Context, Result};
use std::path::Path;

use firevox_compare::loader;

/// Display information about a simulator or FireVox CSV file
pub fn run(file: &Path) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    println!("CSV File Information");
    println!("====================");
    println!("File: {}", file.display());
    println!();

    let records = read_records(file)?;

    // FireVox traces are headerless single-column numerics; device files
    // carry named header columns (and, for FDS, a units line above them).
    let is_trace = records
        .first()
        .map(|r| r.len() == 1 && r[0].parse::<f64>().is_ok())
        .unwrap_or(false);

    if is_trace {
        info_trace(file)
    } else {
        info_device(&records)
    }
}

fn read_records(file: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Failed to parse {}", file.display()))?;
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}

fn info_trace(file: &Path) -> Result<()> {
    let values = loader::read_secondary(file)?;
    println!("Shape: FireVox thermometer trace (headerless, single column)");
    println!("Samples: {}", values.len());
    if let (Some(first), Some(last)) = (values.first(), values.last()) {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        println!("First / last: {first} / {last}");
        println!("Min / max: {min} / {max}");
    }
    Ok(())
}

fn info_device(records: &[Vec<String>]) -> Result<()> {
    // The header is the record directly above the first all-numeric row;
    // anything above it (an FDS units line) counts as skipped.
    let data_start = records
        .iter()
        .position(|r| !r.is_empty() && r.iter().all(|f| f.parse::<f64>().is_ok()))
        .unwrap_or(records.len());
    if data_start == 0 {
        anyhow::bail!("No header row found above the data");
    }
    let header = &records[data_start - 1];
    let rows = &records[data_start..];

    println!("Shape: simulator device output (header + named columns)");
    println!("Skipped pre-header lines: {}", data_start - 1);
    println!("Data rows: {}", rows.len());
    println!();

    println!("Columns:");
    for (idx, name) in header.iter().enumerate() {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for row in rows {
            if let Some(v) = row.get(idx).and_then(|f| f.parse::<f64>().ok()) {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min.is_finite() {
            println!("  {:3}. {} (min {min}, max {max})", idx + 1, name);
        } else {
            println!("  {:3}. {}", idx + 1, name);
        }
    }

    Ok(())
}
