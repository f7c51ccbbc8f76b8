//! Loader contract: a dataset always comes back with its default schema,
//! whether the backing CSV is present, absent, malformed, or unreadable.

use std::fs;
use std::path::Path;

use blockpulse::datasets::Dataset;
use blockpulse::loader::{load, try_load, DataUnavailable};
use tempfile::TempDir;

fn assert_default_schema(dataset: Dataset, dir: &Path) {
    let table = load(dataset, dir);
    let schema = dataset.schema();
    assert_eq!(
        table.headers().len(),
        schema.len(),
        "{} column count",
        dataset.as_str()
    );
    for (header, (name, _)) in table.headers().iter().zip(schema.iter()) {
        assert_eq!(header, name, "{} column name", dataset.as_str());
    }
}

// ---------------------------------------------------------------------------
// No backing files: every dataset falls back to its default
// ---------------------------------------------------------------------------
#[test]
fn missing_files_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    for ds in Dataset::ALL {
        assert_default_schema(ds, dir.path());
        let err = try_load(ds, dir.path()).unwrap_err();
        assert!(
            matches!(err, DataUnavailable::Missing(_)),
            "{}: expected Missing, got {}",
            ds.as_str(),
            err
        );
    }
}

// ---------------------------------------------------------------------------
// Well-formed backing file replaces the default
// ---------------------------------------------------------------------------
#[test]
fn valid_file_replaces_default() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(Dataset::BlockchainAdoption.file_name()),
        "year,users_millions_est\n2009,0.2\n2015,5\n2020,50\n",
    )
    .unwrap();

    let table = load(Dataset::BlockchainAdoption, dir.path());
    assert_eq!(table.len(), 3);
    assert_eq!(table.column_i64("year"), vec![2009, 2015, 2020]);
    assert_eq!(table.column_f64("users_millions_est"), vec![0.2, 5.0, 50.0]);
}

// ---------------------------------------------------------------------------
// Malformed content: truncated, non-tabular, wrong header, bad cells
// ---------------------------------------------------------------------------
#[test]
fn malformed_files_fall_back_without_raising() {
    let cases: &[(&str, &str)] = &[
        ("truncated row", "year,users_millions_est\n2009\n"),
        ("non-tabular", "<html><body>not a csv</body></html>"),
        ("wrong header", "anno,utenti\n2009,0.2\n"),
        ("bad cell", "year,users_millions_est\nsoon,many\n"),
    ];
    for (label, content) in cases {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(Dataset::BlockchainAdoption.file_name()),
            content,
        )
        .unwrap();

        let err = try_load(Dataset::BlockchainAdoption, dir.path()).unwrap_err();
        assert!(
            matches!(err, DataUnavailable::Malformed { .. }),
            "{}: expected Malformed, got {}",
            label,
            err
        );
        // Collapsed form still hands back the intact default.
        let table = load(Dataset::BlockchainAdoption, dir.path());
        assert_eq!(table.column_i64("year"), vec![2009, 2015, 2020, 2025]);
    }
}

// ---------------------------------------------------------------------------
// Date normalization: file dates parse into real dates, with or without a
// time component, so sorting and rolling windows behave
// ---------------------------------------------------------------------------
#[test]
fn transaction_dates_are_parsed_and_sortable() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(Dataset::TransactionComparison.file_name()),
        "date,btc_daily_tx,swift_daily_msgs\n\
         2024-05-03,300,3000\n\
         2024-05-01 00:00:00,100,1000\n\
         2024-05-02,200,2000\n",
    )
    .unwrap();

    let table = load(Dataset::TransactionComparison, dir.path());
    assert_eq!(table.len(), 3);
    let sorted = table.sorted_by_date("date");
    assert_eq!(sorted.column_i64("btc_daily_tx"), vec![100, 200, 300]);
}

#[test]
fn unparseable_date_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(Dataset::TransactionComparison.file_name()),
        "date,btc_daily_tx,swift_daily_msgs\nyesterday,100,1000\n",
    )
    .unwrap();

    let err = try_load(Dataset::TransactionComparison, dir.path()).unwrap_err();
    assert!(matches!(err, DataUnavailable::Malformed { .. }));
    let table = load(Dataset::TransactionComparison, dir.path());
    assert_eq!(table.len(), 180);
}

// ---------------------------------------------------------------------------
// Re-reading the same file yields the same table
// ---------------------------------------------------------------------------
#[test]
fn loading_is_idempotent() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(Dataset::RemittanceFees.file_name()),
        "corridor,traditional_fee_pct,blockchain_fee_pct\nA→B,5.0,1.0\n",
    )
    .unwrap();

    let first = load(Dataset::RemittanceFees, dir.path());
    let second = load(Dataset::RemittanceFees, dir.path());
    assert_eq!(first.len(), second.len());
    assert_eq!(first.rows()[0], second.rows()[0]);
}
