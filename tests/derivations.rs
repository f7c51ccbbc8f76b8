//! End-to-end checks of the derived views over loaded tables, using the
//! same load-then-derive path the runner takes.

use std::fs;

use blockpulse::datasets::Dataset;
use blockpulse::derive::{
    format_usd, growth_projection, indexed_adoption, recent_daily_average, remittance_savings,
    risk_heatmap, smoothed_transactions, trailing_mean, MA_WINDOW,
};
use blockpulse::loader::load;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Indexed adoption over loaded tables
// ---------------------------------------------------------------------------
#[test]
fn indexed_adoption_from_files() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(Dataset::InternetAdoption.file_name()),
        "year,users_millions_est\n1995,100\n2000,500\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(Dataset::BlockchainAdoption.file_name()),
        "year,users_millions_est\n2009,1.0\n2015,5.0\n",
    )
    .unwrap();

    let internet = load(Dataset::InternetAdoption, dir.path());
    let blockchain = load(Dataset::BlockchainAdoption, dir.path());
    let points = indexed_adoption(&internet, &blockchain);

    assert_eq!(points.len(), 4);
    let blockchain_points: Vec<f64> = points
        .iter()
        .filter(|p| p.series == "Blockchain")
        .map(|p| p.index)
        .collect();
    assert_eq!(blockchain_points, vec![100.0, 500.0]);
    // Both series start at 100 regardless of absolute scale.
    let firsts: Vec<f64> = ["Internet", "Blockchain"]
        .iter()
        .map(|s| points.iter().find(|p| p.series == *s).unwrap().index)
        .collect();
    assert_eq!(firsts, vec![100.0, 100.0]);
}

// ---------------------------------------------------------------------------
// Rolling 7-day average over an unsorted file
// ---------------------------------------------------------------------------
#[test]
fn rolling_average_sorts_then_smooths() {
    let dir = TempDir::new().unwrap();
    // Seven days, deliberately shuffled on disk; values 10..70 by day.
    let mut lines = vec![
        "2024-01-04,40,40",
        "2024-01-01,10,10",
        "2024-01-07,70,70",
        "2024-01-02,20,20",
        "2024-01-06,60,60",
        "2024-01-03,30,30",
        "2024-01-05,50,50",
    ];
    lines.insert(0, "date,btc_daily_tx,swift_daily_msgs");
    fs::write(
        dir.path().join(Dataset::TransactionComparison.file_name()),
        lines.join("\n"),
    )
    .unwrap();

    let tx = load(Dataset::TransactionComparison, dir.path());
    let rows = smoothed_transactions(&tx, MA_WINDOW);
    assert_eq!(rows.len(), 7);
    for row in &rows[..6] {
        assert!(row.btc_ma.is_none(), "{} should have no MA", row.date);
        assert!(row.swift_ma.is_none());
    }
    assert_eq!(rows[6].btc_ma, Some(40.0));
    assert_eq!(rows[6].swift_ma, Some(40.0));
    // Sorted ascending despite the shuffled file.
    assert_eq!(rows[0].btc_daily_tx, 10.0);
    assert_eq!(rows[6].btc_daily_tx, 70.0);
}

#[test]
fn rolling_average_on_default_table() {
    let dir = TempDir::new().unwrap();
    let tx = load(Dataset::TransactionComparison, dir.path());
    let rows = smoothed_transactions(&tx, MA_WINDOW);
    assert_eq!(rows.len(), 180);
    assert!(rows[..MA_WINDOW - 1].iter().all(|r| r.btc_ma.is_none()));
    assert!(rows[MA_WINDOW - 1..].iter().all(|r| r.btc_ma.is_some()));
    // Trailing mean of the sawtooth stays within the raw value range.
    for row in &rows {
        if let Some(ma) = row.btc_ma {
            assert!((300_000.0..=370_800.0).contains(&ma), "ma out of range: {}", ma);
        }
    }
}

#[test]
fn trailing_mean_short_series_is_all_none() {
    assert_eq!(trailing_mean(&[1.0, 2.0, 3.0], 7), vec![None, None, None]);
}

// ---------------------------------------------------------------------------
// Remittance savings quote, currency-formatted
// ---------------------------------------------------------------------------
#[test]
fn savings_quote_formats_as_currency() {
    let dir = TempDir::new().unwrap();
    let fees = load(Dataset::RemittanceFees, dir.path());
    let quote = remittance_savings(&fees, "UAE→India", 1000.0).unwrap();
    assert_eq!(format_usd(quote.traditional_cost), "$65.00");
    assert_eq!(format_usd(quote.blockchain_cost), "$22.00");
    assert_eq!(format_usd(quote.savings), "$43.00");
}

// ---------------------------------------------------------------------------
// Growth projection and projected total
// ---------------------------------------------------------------------------
#[test]
fn projection_scales_and_sums() {
    let dir = TempDir::new().unwrap();
    let assets = load(Dataset::TokenizedAssets, dir.path());
    let proj = growth_projection(&assets, 60.0);
    assert_eq!(proj.assets.len(), 5);
    assert!((proj.assets[0].projected - 5.12).abs() < 1e-9);
    // Defaults sum to 15.2; +60% -> 24.32.
    assert!((proj.projected_total - 24.32).abs() < 1e-9);
    // Zero growth leaves values untouched.
    let flat = growth_projection(&assets, 0.0);
    for asset in &flat.assets {
        assert_eq!(asset.current, asset.projected);
    }
}

// ---------------------------------------------------------------------------
// Risk reshape produces two cells per factor
// ---------------------------------------------------------------------------
#[test]
fn heatmap_has_two_dimensions_per_factor() {
    let dir = TempDir::new().unwrap();
    let risk = load(Dataset::RiskOpportunity, dir.path());
    let cells = risk_heatmap(&risk);
    assert_eq!(cells.len(), risk.len() * 2);
    let security: Vec<_> = cells.iter().filter(|c| c.factor == "Security").collect();
    assert_eq!(security.len(), 2);
    assert_eq!(security[0].dimension, "Opportunity");
    assert_eq!(security[0].score, 7);
    assert_eq!(security[1].dimension, "Risk");
    assert_eq!(security[1].score, 4);
}

// ---------------------------------------------------------------------------
// Home-page KPI window
// ---------------------------------------------------------------------------
#[test]
fn recent_average_uses_trailing_window() {
    let dir = TempDir::new().unwrap();
    let tx = load(Dataset::TransactionComparison, dir.path());
    let avg = recent_daily_average(&tx, 30).unwrap();
    // Sawtooth default: every value sits between the base and the peak.
    assert!((300_000.0..=370_800.0).contains(&avg), "avg={}", avg);
}
