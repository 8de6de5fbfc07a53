//! The end-to-end run: quote, value, export, automate.
//!
//! Every collaborator is injected so a run can be driven without network,
//! file system or spreadsheet application.

use crate::config::{Config, ConfigError};
use crate::core::trade::TradeBook;
use crate::market::alpha_vantage::AlphaVantageClient;
use crate::market::quote::{quote_book, QuoteError, RateProvider};
use crate::report::automation::{
    ExternalMacroRunner, MacroRequest, MacroRunner, SkippedMacroRunner,
};
use crate::report::paths::ReportPaths;
use crate::report::xlsx::{ExportError, ReportWriter, XlsxReportWriter};
use crate::valuation::engine::{TradeReport, ValuationEngine};
use crate::valuation::shock::{ShockSource, UniformShock};
use log::{error, info, warn};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("could not set up quote client: {0}")]
    Client(#[from] QuoteError),
    #[error("report export failed: {0}")]
    Export(#[from] ExportError),
}

/// Outcome of one run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Trades in the input book.
    pub requested: usize,
    pub report: TradeReport,
    pub report_path: PathBuf,
    /// Set only when the macro step succeeded.
    pub macro_copy: Option<PathBuf>,
}

impl RunSummary {
    pub fn priced(&self) -> usize {
        self.report.len()
    }
}

pub struct Pipeline<P, S, W, M> {
    pub provider: P,
    pub shocks: S,
    pub writer: W,
    pub macro_runner: M,
}

/// The production collaborators.
pub type DefaultPipeline =
    Pipeline<AlphaVantageClient, UniformShock, XlsxReportWriter, Box<dyn MacroRunner>>;

impl DefaultPipeline {
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let provider = AlphaVantageClient::with_base_url(&config.api_key, &config.quote_url)?;
        let macro_runner: Box<dyn MacroRunner> = match &config.macro_host {
            Some(host) => Box::new(ExternalMacroRunner::new(host)),
            None => Box::new(SkippedMacroRunner),
        };
        Ok(Pipeline {
            provider,
            shocks: UniformShock::from_entropy(),
            writer: XlsxReportWriter,
            macro_runner,
        })
    }
}

impl<P, S, W, M> Pipeline<P, S, W, M>
where
    P: RateProvider,
    S: ShockSource,
    W: ReportWriter,
    M: MacroRunner,
{
    /// Run once against `book`, writing to `paths`.
    ///
    /// Fetch failures drop the trade; export failures end the run;
    /// automation failures are logged and the run still succeeds.
    pub fn run(
        &mut self,
        book: &TradeBook,
        paths: &ReportPaths,
    ) -> Result<RunSummary, PipelineError> {
        let quoted = quote_book(book, &self.provider);
        if quoted.dropped() > 0 {
            warn!(
                "{} of {} trades dropped for lack of a rate",
                quoted.dropped(),
                quoted.requested()
            );
        }

        let report = ValuationEngine::value(&quoted, &mut self.shocks);
        info!("Valued {} trades", report.len());

        self.writer.write_report(&report, &paths.workbook)?;

        let request = MacroRequest::pricing(&paths.workbook, &paths.macro_enabled_copy);
        let macro_copy = match self.macro_runner.inject_and_run(&request) {
            Ok(copy) => {
                info!(
                    "VBA macro added and executed successfully at {}!",
                    copy.display()
                );
                Some(copy)
            }
            Err(e) => {
                error!("Error automating Excel: {}", e);
                None
            }
        };

        Ok(RunSummary {
            requested: book.len(),
            report,
            report_path: paths.workbook.clone(),
            macro_copy,
        })
    }
}

/// Load configuration through `lookup`, then run the standard book with
/// production collaborators. Fails before any request if the API key is
/// missing.
pub fn run_from_lookup<F, D>(lookup: F, paths_for: D) -> Result<RunSummary, PipelineError>
where
    F: Fn(&str) -> Option<String>,
    D: FnOnce(&Config) -> ReportPaths,
{
    let config = Config::from_lookup(lookup)?;
    let paths = paths_for(&config);
    DefaultPipeline::from_config(&config)?.run(&TradeBook::standard(), &paths)
}
