//! blockpulse - data layer for a blockchain-adoption analytics dashboard.
//!
//! Loads seven tabular datasets from optional CSV files (falling back to
//! built-in defaults) and computes the derived views the presentation layer
//! displays: indexed adoption curves, rolling transaction averages,
//! remittance fee savings, tokenization growth projections, a
//! risk/opportunity heatmap reshape, and CBDC tracker filtering.

pub mod config;
pub mod datasets;
pub mod derive;
pub mod loader;
pub mod logging;
pub mod pages;
pub mod table;
