use std::path::PathBuf;

use crate::pages::Page;

/// Runner configuration. Dashboard variants differ only in which pages are
/// active and how much table detail they print, so both are expressed here
/// as configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub pages: Vec<Page>,
    pub transfer_amount: f64,
    pub growth_pct: f64,
    /// None means "first corridor in the loaded fee table".
    pub corridor: Option<String>,
    /// None means "all statuses observed in the loaded table".
    pub cbdc_statuses: Option<Vec<String>>,
    /// Presentation mode truncates long tables in text output.
    pub presentation: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_dir: PathBuf::from(
                std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            ),
            pages: std::env::var("PAGES")
                .map(|v| Page::parse_list(&v))
                .unwrap_or_else(|_| Page::ALL.to_vec()),
            transfer_amount: parse_amount(std::env::var("TRANSFER_AMOUNT").ok()),
            growth_pct: parse_growth(std::env::var("GROWTH_PCT").ok()),
            corridor: std::env::var("CORRIDOR").ok().filter(|v| !v.is_empty()),
            cbdc_statuses: std::env::var("CBDC_STATUS").ok().map(|v| parse_list(&v)),
            presentation: std::env::var("PRESENTATION")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(true),
        }
    }
}

/// Transfer amount must be positive; anything else falls back to 1000.
fn parse_amount(raw: Option<String>) -> f64 {
    raw.and_then(|v| v.parse::<f64>().ok())
        .filter(|v| *v > 0.0)
        .unwrap_or(1000.0)
}

/// Growth percentage is clamped to the 0-200 slider range; default 60.
fn parse_growth(raw: Option<String>) -> f64 {
    raw.and_then(|v| v.parse::<f64>().ok())
        .map(|v| v.clamp(0.0, 200.0))
        .unwrap_or(60.0)
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
