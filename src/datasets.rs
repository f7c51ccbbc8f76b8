//! The seven dashboard datasets: identifiers, file names, schemas, and the
//! built-in default tables used whenever no CSV backs a dataset.
//!
//! Defaults are pure constructors returning a fresh table per call; nothing
//! here is shared mutable state.

use chrono::{Duration, NaiveDate, Utc};

use crate::table::{ColumnType, Schema, Table, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    InternetAdoption,
    BlockchainAdoption,
    TransactionComparison,
    RemittanceFees,
    TokenizedAssets,
    RiskOpportunity,
    CbdcProjects,
}

pub const TX_DEFAULT_DAYS: usize = 180;

impl Dataset {
    pub const ALL: [Dataset; 7] = [
        Dataset::InternetAdoption,
        Dataset::BlockchainAdoption,
        Dataset::TransactionComparison,
        Dataset::RemittanceFees,
        Dataset::TokenizedAssets,
        Dataset::RiskOpportunity,
        Dataset::CbdcProjects,
    ];

    /// CSV file name looked up under the configured data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::InternetAdoption => "adoption_internet.csv",
            Dataset::BlockchainAdoption => "adoption_blockchain.csv",
            Dataset::TransactionComparison => "transactions_comparison.csv",
            Dataset::RemittanceFees => "remittance_fees.csv",
            Dataset::TokenizedAssets => "tokenization_assets.csv",
            Dataset::RiskOpportunity => "risks_opportunities.csv",
            Dataset::CbdcProjects => "cbdc_projects.csv",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::InternetAdoption => "internet_adoption",
            Dataset::BlockchainAdoption => "blockchain_adoption",
            Dataset::TransactionComparison => "transaction_comparison",
            Dataset::RemittanceFees => "remittance_fees",
            Dataset::TokenizedAssets => "tokenized_assets",
            Dataset::RiskOpportunity => "risk_opportunity",
            Dataset::CbdcProjects => "cbdc_projects",
        }
    }

    pub fn schema(&self) -> Schema {
        match self {
            Dataset::InternetAdoption | Dataset::BlockchainAdoption => &[
                ("year", ColumnType::Int),
                ("users_millions_est", ColumnType::Float),
            ],
            Dataset::TransactionComparison => &[
                ("date", ColumnType::Date),
                ("btc_daily_tx", ColumnType::Int),
                ("swift_daily_msgs", ColumnType::Int),
            ],
            Dataset::RemittanceFees => &[
                ("corridor", ColumnType::Str),
                ("traditional_fee_pct", ColumnType::Float),
                ("blockchain_fee_pct", ColumnType::Float),
            ],
            Dataset::TokenizedAssets => &[
                ("asset_class", ColumnType::Str),
                ("tokenized_value_usd_bn_est", ColumnType::Float),
            ],
            Dataset::RiskOpportunity => &[
                ("factor", ColumnType::Str),
                ("opportunity_score", ColumnType::Int),
                ("risk_score", ColumnType::Int),
            ],
            Dataset::CbdcProjects => &[
                ("country", ColumnType::Str),
                ("project", ColumnType::Str),
                ("status", ColumnType::Str),
            ],
        }
    }

    /// Fresh default table, schema-identical to what a backing CSV would hold.
    pub fn default_table(&self) -> Table {
        match self {
            Dataset::InternetAdoption => adoption_table(
                &[1985, 1990, 1995, 2000, 2005],
                &[1.0, 10.0, 100.0, 500.0, 1100.0],
            ),
            Dataset::BlockchainAdoption => {
                adoption_table(&[2009, 2015, 2020, 2025], &[0.2, 5.0, 50.0, 280.0])
            }
            Dataset::TransactionComparison => {
                default_transactions(Utc::now().date_naive(), TX_DEFAULT_DAYS)
            }
            Dataset::RemittanceFees => {
                let rows = [
                    ("UAE→India", 6.5, 2.2),
                    ("UAE→Philippines", 7.2, 2.5),
                    ("KSA→Pakistan", 6.8, 2.3),
                    ("US→Mexico", 5.9, 1.8),
                    ("EU→Morocco", 6.1, 2.1),
                ]
                .iter()
                .map(|(corridor, trad, chain)| {
                    vec![
                        Value::Str((*corridor).to_string()),
                        Value::Float(*trad),
                        Value::Float(*chain),
                    ]
                })
                .collect();
                Table::from_schema(self.schema(), rows)
            }
            Dataset::TokenizedAssets => {
                let rows = [
                    ("Real Estate", 3.2),
                    ("Art", 0.6),
                    ("Bonds", 5.1),
                    ("Equity", 4.0),
                    ("Commodities", 2.3),
                ]
                .iter()
                .map(|(class, value)| {
                    vec![Value::Str((*class).to_string()), Value::Float(*value)]
                })
                .collect();
                Table::from_schema(self.schema(), rows)
            }
            Dataset::RiskOpportunity => {
                let rows = [
                    ("Transparency", 9, 2),
                    ("Financial Inclusion", 8, 3),
                    ("Cost Efficiency", 8, 3),
                    ("Speed/Settlement", 8, 2),
                    ("Volatility", 3, 8),
                    ("Regulatory Clarity", 5, 6),
                    ("Scams/Fraud", 4, 7),
                    ("Security", 7, 4),
                ]
                .iter()
                .map(|(factor, opp, risk)| {
                    vec![
                        Value::Str((*factor).to_string()),
                        Value::Int(*opp),
                        Value::Int(*risk),
                    ]
                })
                .collect();
                Table::from_schema(self.schema(), rows)
            }
            Dataset::CbdcProjects => {
                let rows = [
                    ("China", "e-CNY", "Pilot"),
                    ("EU", "Digital Euro", "Preparation"),
                    ("UAE", "mBridge/Aber", "Pilot"),
                    ("India", "Digital Rupee", "Pilot"),
                    ("Brazil", "Drex", "Pilot"),
                    ("Singapore", "Ubin/Orchid", "Experimentation"),
                ]
                .iter()
                .map(|(country, project, status)| {
                    vec![
                        Value::Str((*country).to_string()),
                        Value::Str((*project).to_string()),
                        Value::Str((*status).to_string()),
                    ]
                })
                .collect();
                Table::from_schema(self.schema(), rows)
            }
        }
    }
}

fn adoption_table(years: &[i64], users: &[f64]) -> Table {
    let rows = years
        .iter()
        .zip(users.iter())
        .map(|(y, u)| vec![Value::Int(*y), Value::Float(*u)])
        .collect();
    Table::from_schema(Dataset::InternetAdoption.schema(), rows)
}

/// Synthetic daily activity: `days` contiguous rows ending at `today`, with a
/// 60-day sawtooth on top of each base level.
fn default_transactions(today: NaiveDate, days: usize) -> Table {
    let start = today - Duration::days(days as i64 - 1);
    let rows = (0..days)
        .map(|i| {
            let cycle = (i % 60) as i64;
            vec![
                Value::Date(start + Duration::days(i as i64)),
                Value::Int(300_000 + cycle * 1_200),
                Value::Int(35_000_000 + cycle * 120_000),
            ]
        })
        .collect();
    Table::from_schema(Dataset::TransactionComparison.schema(), rows)
}
