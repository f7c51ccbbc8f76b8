//! Derived views over loaded tables.
//!
//! Every function here is a pure transformation: table(s) plus a user-chosen
//! parameter in, a small displayable value out. Nothing retains state across
//! calls, and numeric edge cases (zero base value, short windows, unknown
//! corridor) yield skipped or missing results rather than errors.

use std::collections::VecDeque;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::table::Table;

pub const MA_WINDOW: usize = 7;
pub const KPI_WINDOW_DAYS: usize = 30;
pub const GENESIS_YEAR: i32 = 2009;

// =============================================================================
// Indexed adoption
// =============================================================================

/// One observation of a series rescaled so its first value equals 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedPoint {
    pub series: &'static str,
    pub year: i64,
    pub index: f64,
}

/// Long-form indexed view of both adoption curves, for shape comparison
/// across eras. A series with an empty table or a zero first value would
/// index to infinity, so it contributes no points at all.
pub fn indexed_adoption(internet: &Table, blockchain: &Table) -> Vec<IndexedPoint> {
    let mut out = Vec::new();
    push_indexed("Internet", internet, &mut out);
    push_indexed("Blockchain", blockchain, &mut out);
    out
}

fn push_indexed(series: &'static str, table: &Table, out: &mut Vec<IndexedPoint>) {
    let years = table.column_i64("year");
    let users = table.column_f64("users_millions_est");
    let base = match users.first() {
        Some(&b) if b != 0.0 => b,
        _ => return,
    };
    for (year, value) in years.into_iter().zip(users) {
        out.push(IndexedPoint {
            series,
            year,
            index: 100.0 * value / base,
        });
    }
}

// =============================================================================
// Rolling averages
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SmoothedRow {
    pub date: NaiveDate,
    pub btc_daily_tx: f64,
    pub btc_ma: Option<f64>,
    pub swift_daily_msgs: f64,
    pub swift_ma: Option<f64>,
}

/// Transaction table sorted by date with a trailing moving average alongside
/// each raw series. Positions with fewer than `window` samples carry None.
pub fn smoothed_transactions(tx: &Table, window: usize) -> Vec<SmoothedRow> {
    let sorted = tx.sorted_by_date("date");
    let dates = sorted.column_date("date");
    let btc = sorted.column_f64("btc_daily_tx");
    let swift = sorted.column_f64("swift_daily_msgs");
    let btc_ma = trailing_mean(&btc, window);
    let swift_ma = trailing_mean(&swift, window);

    dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| SmoothedRow {
            date,
            btc_daily_tx: btc[i],
            btc_ma: btc_ma[i],
            swift_daily_msgs: swift[i],
            swift_ma: swift_ma[i],
        })
        .collect()
}

/// Trailing simple moving average with a running-sum window.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut buf: VecDeque<f64> = VecDeque::with_capacity(window);
    let mut sum = 0.0;
    values
        .iter()
        .map(|&v| {
            sum += v;
            buf.push_back(v);
            if buf.len() > window {
                sum -= buf.pop_front().unwrap_or(0.0);
            }
            if buf.len() < window {
                None
            } else {
                Some(sum / window as f64)
            }
        })
        .collect()
}

/// Mean of the trailing `days` rows of btc_daily_tx (home-page KPI).
pub fn recent_daily_average(tx: &Table, days: usize) -> Option<f64> {
    let sorted = tx.sorted_by_date("date");
    let btc = sorted.column_f64("btc_daily_tx");
    if btc.is_empty() || days == 0 {
        return None;
    }
    let tail = &btc[btc.len().saturating_sub(days)..];
    Some(tail.iter().sum::<f64>() / tail.len() as f64)
}

pub fn years_since_genesis(today: NaiveDate) -> i32 {
    today.year() - GENESIS_YEAR
}

// =============================================================================
// Remittance savings
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct SavingsQuote {
    pub corridor: String,
    pub amount: f64,
    pub traditional_cost: f64,
    pub blockchain_cost: f64,
    pub savings: f64,
}

/// Fee comparison for one corridor at a given transfer amount.
/// Returns None when the corridor is not in the fee table.
pub fn remittance_savings(fees: &Table, corridor: &str, amount: f64) -> Option<SavingsQuote> {
    let row = fees
        .column_str("corridor")
        .iter()
        .position(|c| *c == corridor)?;
    let traditional_pct = fees.cell(row, "traditional_fee_pct")?.as_f64()?;
    let blockchain_pct = fees.cell(row, "blockchain_fee_pct")?.as_f64()?;
    let traditional_cost = amount * traditional_pct / 100.0;
    let blockchain_cost = amount * blockchain_pct / 100.0;
    Some(SavingsQuote {
        corridor: corridor.to_string(),
        amount,
        traditional_cost,
        blockchain_cost,
        savings: traditional_cost - blockchain_cost,
    })
}

// =============================================================================
// Growth projection
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProjectedAsset {
    pub asset_class: String,
    pub current: f64,
    pub projected: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    pub growth_pct: f64,
    pub assets: Vec<ProjectedAsset>,
    pub projected_total: f64,
}

/// What-if scaling of each tokenized asset class by `(1 + growth/100)`.
pub fn growth_projection(assets: &Table, growth_pct: f64) -> Projection {
    let factor = 1.0 + growth_pct / 100.0;
    let classes = assets.column_str("asset_class");
    let values = assets.column_f64("tokenized_value_usd_bn_est");
    let rows: Vec<ProjectedAsset> = classes
        .into_iter()
        .zip(values)
        .map(|(class, current)| ProjectedAsset {
            asset_class: class.to_string(),
            current,
            projected: current * factor,
        })
        .collect();
    let projected_total = rows.iter().map(|a| a.projected).sum();
    Projection {
        growth_pct,
        assets: rows,
        projected_total,
    }
}

// =============================================================================
// Risk/opportunity heatmap
// =============================================================================

pub const DIMENSION_OPPORTUNITY: &str = "Opportunity";
pub const DIMENSION_RISK: &str = "Risk";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatCell {
    pub factor: String,
    pub dimension: &'static str,
    pub score: i64,
}

/// Wide-to-long reshape of the risk table: one cell per (factor, dimension),
/// with the score columns relabeled for display.
pub fn risk_heatmap(risk: &Table) -> Vec<HeatCell> {
    let factors = risk.column_str("factor");
    let opportunity = risk.column_i64("opportunity_score");
    let risk_scores = risk.column_i64("risk_score");
    let mut out = Vec::with_capacity(factors.len() * 2);
    for (i, factor) in factors.into_iter().enumerate() {
        if let Some(&score) = opportunity.get(i) {
            out.push(HeatCell {
                factor: factor.to_string(),
                dimension: DIMENSION_OPPORTUNITY,
                score,
            });
        }
        if let Some(&score) = risk_scores.get(i) {
            out.push(HeatCell {
                factor: factor.to_string(),
                dimension: DIMENSION_RISK,
                score,
            });
        }
    }
    out
}

// =============================================================================
// CBDC tracker
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CbdcSummary {
    pub projects: usize,
    pub unique_countries: usize,
}

/// Sorted unique status values observed in the table (feeds the filter).
pub fn observed_statuses(cbdc: &Table) -> Vec<String> {
    let mut statuses: Vec<String> = cbdc
        .column_str("status")
        .into_iter()
        .map(str::to_string)
        .collect();
    statuses.sort();
    statuses.dedup();
    statuses
}

pub fn filter_by_status(cbdc: &Table, statuses: &[String]) -> Table {
    cbdc.filter_str("status", statuses)
}

pub fn cbdc_summary(filtered: &Table) -> CbdcSummary {
    let mut countries: Vec<&str> = filtered.column_str("country");
    countries.sort_unstable();
    countries.dedup();
    CbdcSummary {
        projects: filtered.len(),
        unique_countries: countries.len(),
    }
}

// =============================================================================
// Display formatting
// =============================================================================

/// Currency rendering with thousands separators and two decimals: `$1,234.56`.
pub fn format_usd(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    format!("{}${}.{:02}", sign, group_thousands(whole), frac)
}

/// Thousands grouping for counts and currency: 1234567 -> "1,234,567".
pub fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(",")
}
