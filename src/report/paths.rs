use chrono::NaiveDate;
use std::path::{Path, PathBuf};

const REPORT_PREFIX: &str = "FX_Trading_Report";
const DATE_STAMP: &str = "%m-%d-%y";

/// Date-stamped locations of the report and its macro-enabled copy.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use fx_trade_report::report::paths::ReportPaths;
///
/// let date = NaiveDate::from_ymd_opt(2024, 9, 5).unwrap();
/// let paths = ReportPaths::for_date("reports", date);
/// assert!(paths.workbook.ends_with("FX_Trading_Report_09-05-24.xlsx"));
/// assert!(paths.macro_enabled_copy.ends_with("FX_Trading_Report_macro_09-05-24.xlsm"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub workbook: PathBuf,
    pub macro_enabled_copy: PathBuf,
}

impl ReportPaths {
    pub fn for_date(dir: impl AsRef<Path>, date: NaiveDate) -> Self {
        let stamp = date.format(DATE_STAMP);
        let dir = dir.as_ref();
        Self {
            workbook: dir.join(format!("{REPORT_PREFIX}_{stamp}.xlsx")),
            macro_enabled_copy: dir.join(format!("{REPORT_PREFIX}_macro_{stamp}.xlsm")),
        }
    }

    /// Paths for the current local date.
    pub fn today(dir: impl AsRef<Path>) -> Self {
        Self::for_date(dir, chrono::Local::now().date_naive())
    }
}
