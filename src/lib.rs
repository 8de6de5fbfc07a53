//! # fx-trade-report
//!
//! Daily FX trading report: fetch live spot rates, value a small book of
//! trades with a simulated market move, and export the result as a
//! spreadsheet for a downstream pricing macro.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: currencies, pairs, trades, the trade book
//! - **market** — Spot-rate providers and the Alpha Vantage client
//! - **valuation** — Market-rate shocks and the P&L engine
//! - **report** — File naming, spreadsheet export, macro automation
//! - **pipeline** — The end-to-end run with injectable collaborators

pub mod config;
pub mod core;
pub mod market;
pub mod pipeline;
pub mod report;
pub mod valuation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::core::currency::{CurrencyCode, CurrencyPair};
    pub use crate::core::trade::{Trade, TradeBook, TradeId, TradeType};
    pub use crate::market::quote::{fetch_rate, quote_book, QuoteError, RateProvider};
    pub use crate::pipeline::{Pipeline, PipelineError, RunSummary};
    pub use crate::report::automation::{MacroRequest, MacroRunner};
    pub use crate::report::paths::ReportPaths;
    pub use crate::report::xlsx::{ReportWriter, XlsxReportWriter};
    pub use crate::valuation::engine::{TradeReport, ValuationEngine, ValuedTrade};
    pub use crate::valuation::shock::{FixedShock, ShockSource, UniformShock};
}
