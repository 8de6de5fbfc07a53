//! Spreadsheet export of the valued trade table.
//!
//! Column order and header names are fixed: the pricing macro addresses
//! Notional and FX_Rate by position (columns 3 and 4).

use crate::valuation::engine::TradeReport;
use log::info;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Report header, in column order.
pub const COLUMNS: [&str; 7] = [
    "Trade_ID",
    "Currency_Pair",
    "Notional",
    "FX_Rate",
    "Trade_Type",
    "Market_Rate",
    "PnL",
];

const SHEET_NAME: &str = "Sheet1";

/// Errors writing the report file. These end the run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{column} value {value} is not representable as a spreadsheet number")]
    Number { column: &'static str, value: Decimal },
}

/// Serializes a report to a file.
pub trait ReportWriter {
    fn write_report(&self, report: &TradeReport, path: &Path) -> Result<(), ExportError>;
}

impl<W: ReportWriter + ?Sized> ReportWriter for &W {
    fn write_report(&self, report: &TradeReport, path: &Path) -> Result<(), ExportError> {
        (**self).write_report(report, path)
    }
}

/// Writes `.xlsx` workbooks with a single sheet.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxReportWriter;

impl ReportWriter for XlsxReportWriter {
    fn write_report(&self, report: &TradeReport, path: &Path) -> Result<(), ExportError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (col, name) in COLUMNS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *name, &header)?;
        }

        for (i, row) in report.rows().iter().enumerate() {
            let r = i as u32 + 1;
            sheet.write_string(r, 0, row.trade_id.as_str())?;
            sheet.write_string(r, 1, row.currency_pair.to_string())?;
            sheet.write_number(r, 2, number(COLUMNS[2], row.notional)?)?;
            sheet.write_number(r, 3, number(COLUMNS[3], row.fx_rate)?)?;
            sheet.write_string(r, 4, row.trade_type.as_str())?;
            sheet.write_number(r, 5, number(COLUMNS[5], row.market_rate)?)?;
            sheet.write_number(r, 6, number(COLUMNS[6], row.pnl)?)?;
        }

        workbook.save(path)?;
        info!(
            "FX Trading Report with real-time data generated successfully at {}.",
            path.display()
        );
        Ok(())
    }
}

fn number(column: &'static str, value: Decimal) -> Result<f64, ExportError> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or(ExportError::Number { column, value })
}
