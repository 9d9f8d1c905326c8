//! CSV loading for the two dataset shapes the pipeline consumes.
//!
//! *Primary* files are simulator device output (FDS `_devc.csv` or SimScale
//! probe exports): a header row with named columns, one of them the time
//! axis, optionally preceded by lines to skip (FDS writes a units line above
//! the header). *Secondary* files are FireVox virtual-thermometer traces:
//! headerless, a single numeric value per line, no time column.
//!
//! Loading is fail-fast: a missing file, absent column, or malformed number
//! aborts the run with an error naming the offending file, column, and row.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use thiserror::Error;

/// Errors raised while reading device or thermometer CSV files.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("column '{column}' not found in {path} (available: {available})")]
    MissingColumn {
        path: String,
        column: String,
        available: String,
    },

    #[error("{path}: data row {row}, column '{column}': invalid number '{value}'")]
    InvalidNumber {
        path: String,
        row: usize,
        column: String,
        value: String,
    },
}

/// Columns extracted from a primary (simulator) CSV.
#[derive(Debug, Clone)]
pub struct PrimaryData {
    /// The time column, in file order.
    pub time: Vec<f64>,
    /// One value column per requested name, in request order.
    pub columns: Vec<Vec<f64>>,
}

/// Read named columns from a header-bearing simulator CSV.
///
/// `skip_rows` lines are consumed before the header row is parsed; every
/// subsequent record contributes one sample to each requested column.
pub fn read_primary(
    path: &Path,
    skip_rows: usize,
    time_column: &str,
    value_columns: &[&str],
) -> Result<PrimaryData, LoaderError> {
    let display = path.display().to_string();
    let io_err = |source| LoaderError::Io {
        path: display.clone(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    for _ in 0..skip_rows {
        line.clear();
        reader
            .read_line(&mut line)
            .map_err(|source| LoaderError::Io {
                path: display.clone(),
                source,
            })?;
    }

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| LoaderError::Csv {
            path: display.clone(),
            source,
        })?
        .clone();

    let find = |column: &str| -> Result<usize, LoaderError> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| LoaderError::MissingColumn {
                path: display.clone(),
                column: column.to_string(),
                available: headers.iter().collect::<Vec<_>>().join(", "),
            })
    };

    let time_idx = find(time_column)?;
    let value_indices = value_columns
        .iter()
        .map(|column| find(column))
        .collect::<Result<Vec<_>, _>>()?;

    let mut time = Vec::new();
    let mut columns = vec![Vec::new(); value_indices.len()];
    for (row, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|source| LoaderError::Csv {
            path: display.clone(),
            source,
        })?;
        time.push(parse_field(&record, time_idx, &display, row, time_column)?);
        for (slot, (&idx, &column)) in columns
            .iter_mut()
            .zip(value_indices.iter().zip(value_columns.iter()))
        {
            slot.push(parse_field(&record, idx, &display, row, column)?);
        }
    }

    debug!(
        "{}: {} rows, columns [{}]",
        display,
        time.len(),
        value_columns.join(", ")
    );
    Ok(PrimaryData { time, columns })
}

/// Read a headerless single-column FireVox thermometer trace.
///
/// An empty file yields an empty series; alignment against the sampling grid
/// is the pipeline's responsibility.
pub fn read_secondary(path: &Path) -> Result<Vec<f64>, LoaderError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| LoaderError::Io {
        path: display.clone(),
        source,
    })?;

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let mut values = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|source| LoaderError::Csv {
            path: display.clone(),
            source,
        })?;
        values.push(parse_field(&record, 0, &display, row, "0")?);
    }

    debug!("{}: {} samples", display, values.len());
    Ok(values)
}

fn parse_field(
    record: &StringRecord,
    idx: usize,
    path: &str,
    row: usize,
    column: &str,
) -> Result<f64, LoaderError> {
    let raw = record.get(idx).unwrap_or("");
    raw.parse().map_err(|_| LoaderError::InvalidNumber {
        path: path.to_string(),
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fixture(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn primary_roundtrip_preserves_order() {
        let file = fixture("Time (s),TEMP\n0.0,300.0\n0.5,301.5\n1.0,303.0\n");
        let data = read_primary(file.path(), 0, "Time (s)", &["TEMP"]).unwrap();
        assert_eq!(data.time, vec![0.0, 0.5, 1.0]);
        assert_eq!(data.columns, vec![vec![300.0, 301.5, 303.0]]);
    }

    #[test]
    fn skips_units_line_above_header() {
        // FDS device files carry a units row before the header.
        let file = fixture("s,C,C\nTime,Hotter,Colder\n0,20,10\n1,21,11\n");
        let data = read_primary(file.path(), 1, "Time", &["Hotter", "Colder"]).unwrap();
        assert_eq!(data.time, vec![0.0, 1.0]);
        assert_eq!(data.columns[0], vec![20.0, 21.0]);
        assert_eq!(data.columns[1], vec![10.0, 11.0]);
    }

    #[test]
    fn missing_column_names_file_and_candidates() {
        let file = fixture("Time,TEMP\n0,300\n");
        let err = read_primary(file.path(), 0, "Time", &["gas temp"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("gas temp"), "{message}");
        assert!(message.contains("TEMP"), "{message}");
    }

    #[test]
    fn malformed_number_is_rejected() {
        let file = fixture("Time,TEMP\n0,300\n1,oops\n");
        let err = read_primary(file.path(), 0, "Time", &["TEMP"]).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidNumber { row: 1, .. }), "{err}");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_primary(Path::new("/no/such/file.csv"), 0, "Time", &[]).unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
    }

    #[test]
    fn secondary_single_column() {
        let file = fixture("293.15\n293.80\n294.12\n");
        assert_eq!(
            read_secondary(file.path()).unwrap(),
            vec![293.15, 293.80, 294.12]
        );
    }

    #[test]
    fn empty_secondary_yields_empty_series() {
        let file = fixture("");
        assert!(read_secondary(file.path()).unwrap().is_empty());
    }
}
