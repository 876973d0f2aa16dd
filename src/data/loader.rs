use std::fs::File;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};

use super::model::{ResultFile, ResultRow};
use crate::config::ReportConfig;
use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Outcome of looking up one expected results file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovered {
    Found(PathBuf),
    Missing(PathBuf),
}

/// Check each expected file under the results directory, in configured order.
pub fn discover(config: &ReportConfig) -> Vec<Discovered> {
    config
        .expected_files
        .iter()
        .map(|name| {
            let path = config.input_path(name);
            if path.is_file() {
                Discovered::Found(path)
            } else {
                Discovered::Missing(path)
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one sample per line.
/// Every cell must parse as `f64`; surrounding whitespace is ignored.
///
/// A header-only (or entirely empty) file yields a [`ResultFile`] with no
/// rows. A file with data but no `time_column` is rejected.
pub fn load_csv(path: &Path, time_column: &str) -> Result<ResultFile, ParseError> {
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let csv_err = |source| ParseError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(csv_err)?;
        let row_no = idx + 1;

        let row = columns
            .iter()
            .zip(record.iter())
            .map(|(col, cell)| {
                cell.parse::<f64>()
                    .map(|v| (col.clone(), v))
                    .map_err(|_| ParseError::NotNumeric {
                        path: path.to_path_buf(),
                        row: row_no,
                        column: col.clone(),
                        value: cell.to_string(),
                    })
            })
            .collect::<Result<ResultRow, _>>()?;

        rows.push(row);
    }

    if !rows.is_empty() && !columns.iter().any(|c| c == time_column) {
        return Err(ParseError::MissingColumn {
            path: path.to_path_buf(),
            column: time_column.to_string(),
        });
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    log::debug!("Parsed {} rows x {} columns from {}", rows.len(), columns.len(), path.display());
    Ok(ResultFile::new(stem, columns, rows))
}
