//! Page-level assembly: load the tables a page needs, run its derivations,
//! and return a plain-text report for the runner to print.
//!
//! Every render loads fresh tables and recomputes from scratch; nothing is
//! cached between interactions.

use std::path::Path;

use chrono::Utc;
use serde_json::json;

use crate::config::Config;
use crate::datasets::Dataset;
use crate::derive::{self, format_usd, group_thousands, KPI_WINDOW_DAYS, MA_WINDOW};
use crate::loader;
use crate::logging::{json_log, obj, v_num, v_str};
use crate::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Adoption,
    Transactions,
    Tokenization,
    Risks,
    CbdcOutlook,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::Adoption,
        Page::Transactions,
        Page::Tokenization,
        Page::Risks,
        Page::CbdcOutlook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Adoption => "adoption",
            Page::Transactions => "transactions",
            Page::Tokenization => "tokenization",
            Page::Risks => "risks",
            Page::CbdcOutlook => "cbdc_outlook",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Blockchain adoption",
            Page::Adoption => "Adoption - Internet vs Blockchain",
            Page::Transactions => "Transactions & Costs",
            Page::Tokenization => "Tokenization - real-world assets on-chain",
            Page::Risks => "Risks vs Opportunities",
            Page::CbdcOutlook => "CBDC Outlook - sample tracker",
        }
    }

    pub fn parse(s: &str) -> Option<Page> {
        Page::ALL.iter().copied().find(|p| p.as_str() == s)
    }

    /// Comma-separated page list; "all" (or an empty/unrecognized list)
    /// selects every page, so a bad PAGES value never blanks the dashboard.
    pub fn parse_list(raw: &str) -> Vec<Page> {
        if raw.trim().eq_ignore_ascii_case("all") {
            return Page::ALL.to_vec();
        }
        let pages: Vec<Page> = raw
            .split(',')
            .filter_map(|s| Page::parse(s.trim()))
            .collect();
        if pages.is_empty() {
            Page::ALL.to_vec()
        } else {
            pages
        }
    }
}

/// All seven tables, loaded fresh for one render.
pub struct DashboardData {
    pub internet: Table,
    pub blockchain: Table,
    pub transactions: Table,
    pub fees: Table,
    pub assets: Table,
    pub risk: Table,
    pub cbdc: Table,
}

impl DashboardData {
    pub fn load(data_dir: &Path) -> Self {
        let data = Self {
            internet: loader::load(Dataset::InternetAdoption, data_dir),
            blockchain: loader::load(Dataset::BlockchainAdoption, data_dir),
            transactions: loader::load(Dataset::TransactionComparison, data_dir),
            fees: loader::load(Dataset::RemittanceFees, data_dir),
            assets: loader::load(Dataset::TokenizedAssets, data_dir),
            risk: loader::load(Dataset::RiskOpportunity, data_dir),
            cbdc: loader::load(Dataset::CbdcProjects, data_dir),
        };
        json_log(
            "datasets",
            "loaded",
            obj(&[
                ("data_dir", v_str(&data_dir.to_string_lossy())),
                ("internet_rows", v_num(data.internet.len() as f64)),
                ("blockchain_rows", v_num(data.blockchain.len() as f64)),
                ("transaction_rows", v_num(data.transactions.len() as f64)),
                ("fee_rows", v_num(data.fees.len() as f64)),
                ("asset_rows", v_num(data.assets.len() as f64)),
                ("risk_rows", v_num(data.risk.len() as f64)),
                ("cbdc_rows", v_num(data.cbdc.len() as f64)),
            ]),
        );
        data
    }
}

#[derive(Debug, Clone)]
pub struct PageReport {
    pub page: Page,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub body: String,
}

impl PageReport {
    fn new(page: Page) -> Self {
        Self {
            page,
            sections: Vec::new(),
        }
    }

    fn section(&mut self, title: &str, body: String) {
        self.sections.push(Section {
            title: title.to_string(),
            body,
        });
    }
}

/// Rows shown per table in presentation mode; 0 disables truncation.
fn detail_rows(cfg: &Config) -> usize {
    if cfg.presentation {
        10
    } else {
        0
    }
}

pub fn render_page(page: Page, data: &DashboardData, cfg: &Config) -> PageReport {
    let report = match page {
        Page::Home => render_home(data),
        Page::Adoption => render_adoption(data, cfg),
        Page::Transactions => render_transactions(data, cfg),
        Page::Tokenization => render_tokenization(data, cfg),
        Page::Risks => render_risks(data),
        Page::CbdcOutlook => render_cbdc(data, cfg),
    };
    json_log(
        "pages",
        "rendered",
        obj(&[
            ("page", v_str(page.as_str())),
            ("sections", v_num(report.sections.len() as f64)),
        ]),
    );
    report
}

fn render_home(data: &DashboardData) -> PageReport {
    let mut report = PageReport::new(Page::Home);
    let years = derive::years_since_genesis(Utc::now().date_naive());
    report.section(
        "Years since Bitcoin genesis",
        format!("{}+ (launched {})\n", years, derive::GENESIS_YEAR),
    );
    let avg = derive::recent_daily_average(&data.transactions, KPI_WINDOW_DAYS);
    report.section(
        "Avg daily BTC tx (30d)",
        match avg {
            Some(v) => format!("{}\n", group_thousands(v.round().max(0.0) as u64)),
            None => "n/a\n".to_string(),
        },
    );
    report.section(
        "CBDC projects in table",
        format!("{}\n", data.cbdc.len()),
    );
    report
}

fn render_adoption(data: &DashboardData, cfg: &Config) -> PageReport {
    let mut report = PageReport::new(Page::Adoption);
    let rows = detail_rows(cfg);
    report.section("Internet adoption (est.)", data.internet.render_text(rows));
    report.section(
        "Blockchain/Crypto adoption (est.)",
        data.blockchain.render_text(rows),
    );

    let indexed = derive::indexed_adoption(&data.internet, &data.blockchain);
    let mut body = String::new();
    for p in &indexed {
        body.push_str(&format!("{:<10}  {}  {:.1}\n", p.series, p.year, p.index));
    }
    if indexed.is_empty() {
        body.push_str("(no indexable series)\n");
    }
    report.section("Indexed adoption (start year = 100)", body);
    report
}

fn render_transactions(data: &DashboardData, cfg: &Config) -> PageReport {
    let mut report = PageReport::new(Page::Transactions);
    let smoothed = derive::smoothed_transactions(&data.transactions, MA_WINDOW);

    let mut body = String::new();
    body.push_str("date        btc_daily_tx  btc_ma7     swift_daily_msgs  swift_ma7\n");
    let max = detail_rows(cfg);
    let shown: Box<dyn Iterator<Item = &derive::SmoothedRow>> = if max > 0 && smoothed.len() > max
    {
        Box::new(smoothed.iter().skip(smoothed.len() - max))
    } else {
        Box::new(smoothed.iter())
    };
    for row in shown {
        body.push_str(&format!(
            "{}  {:>12}  {:>10}  {:>16}  {:>10}\n",
            row.date.format("%Y-%m-%d"),
            row.btc_daily_tx as i64,
            fmt_ma(row.btc_ma),
            row.swift_daily_msgs as i64,
            fmt_ma(row.swift_ma),
        ));
    }
    report.section("Daily activity vs 7-day average", body);

    let corridor = cfg
        .corridor
        .clone()
        .or_else(|| data.fees.column_str("corridor").first().map(|c| c.to_string()));
    let mut body = String::new();
    match corridor.and_then(|c| {
        derive::remittance_savings(&data.fees, &c, cfg.transfer_amount)
    }) {
        Some(quote) => {
            json_log(
                "pages",
                "savings_quote",
                obj(&[
                    ("corridor", v_str(&quote.corridor)),
                    ("amount", v_num(quote.amount)),
                    ("savings", v_num(quote.savings)),
                ]),
            );
            body.push_str(&format!(
                "{} on {}: traditional ~ {} | on-chain ~ {} -> save {}\n",
                format_usd(quote.amount),
                quote.corridor,
                format_usd(quote.traditional_cost),
                format_usd(quote.blockchain_cost),
                format_usd(quote.savings),
            ));
        }
        None => body.push_str("(corridor not found in fee table)\n"),
    }
    report.section("Remittance fee savings (illustrative)", body);
    report.section("Corridor fees (%)", data.fees.render_text(0));
    report
}

fn render_tokenization(data: &DashboardData, cfg: &Config) -> PageReport {
    let mut report = PageReport::new(Page::Tokenization);
    report.section(
        "Tokenized value by asset class (USD bn est.)",
        data.assets.render_text(0),
    );
    let projection = derive::growth_projection(&data.assets, cfg.growth_pct);
    let mut body = String::new();
    for asset in &projection.assets {
        body.push_str(&format!(
            "{:<14}  {:>6.2}  ->  {:>6.2}\n",
            asset.asset_class, asset.current, asset.projected
        ));
    }
    body.push_str(&format!(
        "Projected total at +{}%: {} bn\n",
        projection.growth_pct,
        format_usd(projection.projected_total),
    ));
    report.section("Scenario: 3-year growth (what-if)", body);
    report
}

fn render_risks(data: &DashboardData) -> PageReport {
    let mut report = PageReport::new(Page::Risks);
    let cells = derive::risk_heatmap(&data.risk);
    let mut body = String::new();
    body.push_str("factor               dimension    score\n");
    for cell in &cells {
        body.push_str(&format!(
            "{:<20} {:<12} {}\n",
            cell.factor, cell.dimension, cell.score
        ));
    }
    report.section("Risk/opportunity heatmap cells", body);
    report
}

fn render_cbdc(data: &DashboardData, cfg: &Config) -> PageReport {
    let mut report = PageReport::new(Page::CbdcOutlook);
    let statuses = match &cfg.cbdc_statuses {
        Some(s) => s.clone(),
        None => derive::observed_statuses(&data.cbdc),
    };
    let filtered = derive::filter_by_status(&data.cbdc, &statuses);
    let summary = derive::cbdc_summary(&filtered);
    json_log(
        "pages",
        "cbdc_filter",
        obj(&[
            ("statuses", json!(statuses)),
            ("projects", v_num(summary.projects as f64)),
            ("unique_countries", v_num(summary.unique_countries as f64)),
        ]),
    );
    report.section(
        "Filter",
        format!(
            "statuses: {} | projects listed: {} | unique countries: {}\n",
            statuses.join(", "),
            summary.projects,
            summary.unique_countries,
        ),
    );
    report.section("Projects", filtered.render_text(0));
    report
}

fn fmt_ma(ma: Option<f64>) -> String {
    match ma {
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}
