use chrono::NaiveDate;
use fx_trade_report::config::Config;
use fx_trade_report::core::currency::CurrencyPair;
use fx_trade_report::core::trade::TradeBook;
use fx_trade_report::market::alpha_vantage::parse_exchange_rate;
use fx_trade_report::market::quote::{QuoteError, RateProvider};
use fx_trade_report::pipeline::{DefaultPipeline, Pipeline};
use fx_trade_report::report::automation::{MacroError, MacroRequest, MacroRunner, PRICING_MACRO_NAME};
use fx_trade_report::report::paths::ReportPaths;
use fx_trade_report::report::xlsx::XlsxReportWriter;
use fx_trade_report::valuation::shock::{FixedShock, UniformShock};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

/// Serves canned Alpha Vantage bodies through the real response parser.
struct CannedQuotes {
    bodies: HashMap<String, String>,
    calls: RefCell<usize>,
}

impl CannedQuotes {
    fn new(bodies: &[(&str, &str)]) -> Self {
        Self {
            bodies: bodies
                .iter()
                .map(|(pair, body)| (pair.to_string(), body.to_string()))
                .collect(),
            calls: RefCell::new(0),
        }
    }

    fn scenario() -> Self {
        Self::new(&[
            ("EUR/USD", rate_body("1.10").as_str()),
            ("GBP/USD", rate_body("1.27").as_str()),
            ("USD/JPY", rate_body("150.0").as_str()),
        ])
    }
}

impl RateProvider for CannedQuotes {
    fn spot_rate(&self, pair: &CurrencyPair) -> Result<Decimal, QuoteError> {
        *self.calls.borrow_mut() += 1;
        let body = self
            .bodies
            .get(&pair.to_string())
            .map(String::as_str)
            .unwrap_or("");
        parse_exchange_rate(body)
    }
}

fn rate_body(rate: &str) -> String {
    format!(
        r#"{{"Realtime Currency Exchange Rate": {{"1. From_Currency Code": "X", "5. Exchange Rate": "{}"}}}}"#,
        rate
    )
}

#[derive(Default)]
struct RecordingMacro {
    requests: RefCell<Vec<MacroRequest>>,
}

impl MacroRunner for RecordingMacro {
    fn inject_and_run(&self, request: &MacroRequest) -> Result<PathBuf, MacroError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(request.macro_enabled_copy.clone())
    }
}

struct FailingMacro;

impl MacroRunner for FailingMacro {
    fn inject_and_run(&self, _request: &MacroRequest) -> Result<PathBuf, MacroError> {
        Err(MacroError::NoHost)
    }
}

fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 20).unwrap()
}

/// Full run: canned quotes → zero shock → real xlsx file → recorded macro call.
#[test]
fn zero_shock_scenario_end_to_end() {
    let dir = TempDir::new().unwrap();
    let paths = ReportPaths::for_date(dir.path(), report_date());
    let macro_runner = RecordingMacro::default();

    let mut pipeline = Pipeline {
        provider: CannedQuotes::scenario(),
        shocks: FixedShock(Decimal::ZERO),
        writer: XlsxReportWriter,
        macro_runner: &macro_runner,
    };
    let summary = pipeline.run(&TradeBook::standard(), &paths).unwrap();

    assert_eq!(summary.requested, 3);
    assert_eq!(summary.priced(), 3);
    let pnls: Vec<Decimal> = summary.report.rows().iter().map(|r| r.pnl).collect();
    assert_eq!(pnls, vec![Decimal::ZERO; 3]);
    let market: Vec<Decimal> = summary.report.rows().iter().map(|r| r.market_rate).collect();
    assert_eq!(market, vec![dec!(1.10), dec!(1.27), dec!(150.0)]);

    assert!(summary.report_path.ends_with("FX_Trading_Report_09-20-24.xlsx"));
    assert!(summary.report_path.exists());

    let requests = macro_runner.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].workbook, paths.workbook);
    assert_eq!(requests[0].macro_name, PRICING_MACRO_NAME);
    assert_eq!(summary.macro_copy, Some(paths.macro_enabled_copy.clone()));
}

/// A malformed GBP/USD response drops that trade and nothing else.
#[test]
fn malformed_quote_drops_one_row() {
    let dir = TempDir::new().unwrap();
    let paths = ReportPaths::for_date(dir.path(), report_date());

    let mut pipeline = Pipeline {
        provider: CannedQuotes::new(&[
            ("EUR/USD", rate_body("1.10").as_str()),
            ("GBP/USD", "{\"Realtime Currency Exchange Rate\": "),
            ("USD/JPY", rate_body("150.0").as_str()),
        ]),
        shocks: FixedShock(Decimal::ZERO),
        writer: XlsxReportWriter,
        macro_runner: RecordingMacro::default(),
    };
    let summary = pipeline.run(&TradeBook::standard(), &paths).unwrap();

    assert_eq!(summary.priced(), 2);
    let pairs: Vec<String> = summary
        .report
        .rows()
        .iter()
        .map(|r| r.currency_pair.to_string())
        .collect();
    assert_eq!(pairs, vec!["EUR/USD", "USD/JPY"]);
    assert_eq!(*pipeline.provider.calls.borrow(), 3);
}

/// Shock of +2% everywhere: pnl = fx_rate * 0.02 * notional.
#[test]
fn max_shock_scenario() {
    let dir = TempDir::new().unwrap();
    let mut pipeline = Pipeline {
        provider: CannedQuotes::scenario(),
        shocks: FixedShock(dec!(0.02)),
        writer: XlsxReportWriter,
        macro_runner: RecordingMacro::default(),
    };
    let summary = pipeline
        .run(&TradeBook::standard(), &ReportPaths::for_date(dir.path(), report_date()))
        .unwrap();

    for row in summary.report.rows() {
        assert_eq!(row.pnl, row.fx_rate * dec!(0.02) * row.notional);
    }
}

/// Every fetch failing still writes an (empty) report.
#[test]
fn all_quotes_fail() {
    let dir = TempDir::new().unwrap();
    let mut pipeline = Pipeline {
        provider: CannedQuotes::new(&[]),
        shocks: FixedShock(Decimal::ZERO),
        writer: XlsxReportWriter,
        macro_runner: RecordingMacro::default(),
    };
    let summary = pipeline
        .run(&TradeBook::standard(), &ReportPaths::for_date(dir.path(), report_date()))
        .unwrap();

    assert_eq!(summary.priced(), 0);
    assert!(summary.report_path.exists());
}

/// Automation failure is logged, not fatal.
#[test]
fn macro_failure_keeps_report() {
    let dir = TempDir::new().unwrap();
    let mut pipeline = Pipeline {
        provider: CannedQuotes::scenario(),
        shocks: UniformShock::seeded(11),
        writer: XlsxReportWriter,
        macro_runner: FailingMacro,
    };
    let summary = pipeline
        .run(&TradeBook::standard(), &ReportPaths::for_date(dir.path(), report_date()))
        .unwrap();

    assert_eq!(summary.priced(), 3);
    assert_eq!(summary.macro_copy, None);
    assert!(summary.report_path.exists());
}

/// Same seed, same report.
#[test]
fn seeded_runs_are_reproducible() {
    let run = |seed| {
        let dir = TempDir::new().unwrap();
        let mut pipeline = Pipeline {
            provider: CannedQuotes::scenario(),
            shocks: UniformShock::seeded(seed),
            writer: XlsxReportWriter,
            macro_runner: FailingMacro,
        };
        pipeline
            .run(&TradeBook::standard(), &ReportPaths::for_date(dir.path(), report_date()))
            .unwrap()
            .report
    };
    assert_eq!(run(5), run(5));
}

/// Production collaborators can be built without touching the network.
#[test]
fn default_pipeline_from_config() {
    let mut config = Config::new("demo", "reports");
    config.macro_host = Some(PathBuf::from("/opt/xl-host"));
    assert!(DefaultPipeline::from_config(&config).is_ok());
}

/// Report rows serialize with the trade fields intact.
#[test]
fn report_serializes() {
    let dir = TempDir::new().unwrap();
    let mut pipeline = Pipeline {
        provider: CannedQuotes::scenario(),
        shocks: FixedShock(Decimal::ZERO),
        writer: XlsxReportWriter,
        macro_runner: FailingMacro,
    };
    let summary = pipeline
        .run(&TradeBook::standard(), &ReportPaths::for_date(dir.path(), report_date()))
        .unwrap();

    let json: serde_json::Value = serde_json::to_value(&summary.report).unwrap();
    assert_eq!(json["rows"][0]["trade_id"], "T001");
    assert_eq!(json["rows"][2]["trade_type"], "NDF");
}
