//! fx-trade-report
//!
//! Fetch spot rates for the standard trade book, value it, write
//! `FX_Trading_Report_<MM-DD-YY>.xlsx` and hand it to the pricing macro.
//!
//! # Usage
//!
//! ```bash
//! # ALPHA_VANTAGE_API_KEY may also come from a .env file
//! ALPHA_VANTAGE_API_KEY=... FX_REPORT_DIR=reports fx-trade-report
//! ```

use fx_trade_report::pipeline::run_from_lookup;
use fx_trade_report::report::paths::ReportPaths;
use log::error;
use std::process;

fn main() {
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let result = run_from_lookup(
        |key| std::env::var(key).ok(),
        |config| ReportPaths::today(&config.output_dir),
    );

    match result {
        Ok(summary) => {
            println!("{}", summary.report);
            println!(
                "Priced {} of {} trades → {}",
                summary.priced(),
                summary.requested,
                summary.report_path.display()
            );
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
