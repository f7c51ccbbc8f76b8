//! Dataset loading: CSV file if present and well-formed, built-in default
//! otherwise.
//!
//! Failures are never surfaced to the caller of [`load`] and never logged;
//! the dashboard must render with defaults no matter what is on disk.
//! [`try_load`] exposes the failure reason so tests can assert on it.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use thiserror::Error;

use crate::datasets::Dataset;
use crate::table::{ColumnType, Table, Value};

#[derive(Debug, Error)]
pub enum DataUnavailable {
    #[error("no file at {0}")]
    Missing(PathBuf),
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed table in {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

/// Load a dataset, collapsing any failure into the built-in default.
pub fn load(dataset: Dataset, data_dir: &Path) -> Table {
    try_load(dataset, data_dir).unwrap_or_else(|_| dataset.default_table())
}

/// Load a dataset from its backing CSV, keeping the failure reason.
///
/// A file only replaces the default when its header matches the dataset
/// schema exactly and every cell coerces to the column type. Date cells are
/// parsed into a date type here, so downstream sorting and rolling windows
/// see real dates whether the table came from disk or from the default.
pub fn try_load(dataset: Dataset, data_dir: &Path) -> Result<Table, DataUnavailable> {
    let path = data_dir.join(dataset.file_name());
    if !path.exists() {
        return Err(DataUnavailable::Missing(path));
    }
    let content = fs::read_to_string(&path).map_err(|source| DataUnavailable::Io {
        path: path.clone(),
        source,
    })?;
    parse_table(dataset, &content).map_err(|reason| DataUnavailable::Malformed { path, reason })
}

fn parse_table(dataset: Dataset, content: &str) -> Result<Table, String> {
    let schema = dataset.schema();
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("unreadable header: {}", e))?
        .clone();
    if headers.len() != schema.len() {
        return Err(format!(
            "expected {} columns, found {}",
            schema.len(),
            headers.len()
        ));
    }
    for (found, (expected, _)) in headers.iter().zip(schema.iter()) {
        if found != *expected {
            return Err(format!(
                "expected column '{}', found '{}'",
                expected, found
            ));
        }
    }

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| format!("row {}: {}", line + 1, e))?;
        if record.len() != schema.len() {
            return Err(format!(
                "row {}: expected {} fields, found {}",
                line + 1,
                schema.len(),
                record.len()
            ));
        }
        let mut row = Vec::with_capacity(schema.len());
        for (raw, (name, ty)) in record.iter().zip(schema.iter()) {
            let value = parse_cell(raw, *ty)
                .map_err(|e| format!("row {}, column '{}': {}", line + 1, name, e))?;
            row.push(value);
        }
        rows.push(row);
    }
    Ok(Table::from_schema(schema, rows))
}

fn parse_cell(raw: &str, ty: ColumnType) -> Result<Value, String> {
    match ty {
        ColumnType::Int => raw
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| format!("'{}' is not an integer", raw)),
        ColumnType::Float => raw
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| format!("'{}' is not a number", raw)),
        ColumnType::Str => Ok(Value::Str(raw.to_string())),
        ColumnType::Date => parse_date(raw)
            .map(Value::Date)
            .ok_or_else(|| format!("'{}' is not a date", raw)),
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component
/// (exports from spreadsheet tools often carry one).
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let head = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_with_time_suffix() {
        let d = parse_date("2024-05-01 00:00:00").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(parse_date("2024-05-01"), Some(d));
        assert!(parse_date("May 1st").is_none());
    }

    #[test]
    fn test_parse_table_accepts_matching_header() {
        let content = "year,users_millions_est\n2009,0.2\n2015,5\n";
        let table = parse_table(Dataset::BlockchainAdoption, content).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_f64("users_millions_est"), vec![0.2, 5.0]);
    }

    #[test]
    fn test_parse_table_rejects_header_mismatch() {
        let content = "year,subscribers\n2009,0.2\n";
        let err = parse_table(Dataset::BlockchainAdoption, content).unwrap_err();
        assert!(err.contains("users_millions_est"), "{}", err);
    }

    #[test]
    fn test_parse_table_rejects_bad_cell() {
        let content = "year,users_millions_est\ntwenty,0.2\n";
        let err = parse_table(Dataset::BlockchainAdoption, content).unwrap_err();
        assert!(err.contains("not an integer"), "{}", err);
    }
}
