//! Spreadsheet-application automation: inject the pricing macro into the
//! exported workbook, save a macro-enabled copy and run the macro.
//!
//! The pipeline only sees [`MacroRunner`]. Driving a real spreadsheet
//! application is delegated to an external host program.

use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus};
use thiserror::Error;

pub const PRICING_MACRO_NAME: &str = "CalculateFXPricing";

/// Adds an `FX_Pricing` column (column 8) holding `Notional * FX_Rate`
/// (columns 3 and 4) for every data row.
pub const PRICING_MACRO: &str = r#"Sub CalculateFXPricing()
    Dim lastRow As Long
    lastRow = Cells(Rows.Count, 1).End(xlUp).Row

    Cells(1, 8).Value = "FX_Pricing"

    Dim i As Long
    For i = 2 To lastRow
        Cells(i, 8).Value = Cells(i, 3).Value * Cells(i, 4).Value
    Next i

    MsgBox "FX Pricing calculated!"
End Sub
"#;

#[derive(Debug, Error)]
pub enum MacroError {
    #[error("no spreadsheet automation host configured")]
    NoHost,
    #[error("failed to start automation host {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("automation I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("automation host exited with {0}")]
    Failed(ExitStatus),
}

/// What to inject, where, and what to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroRequest {
    pub workbook: PathBuf,
    pub macro_enabled_copy: PathBuf,
    pub module_source: String,
    pub macro_name: String,
}

impl MacroRequest {
    /// The standard pricing macro against the given workbook.
    pub fn pricing(workbook: impl Into<PathBuf>, macro_enabled_copy: impl Into<PathBuf>) -> Self {
        Self {
            workbook: workbook.into(),
            macro_enabled_copy: macro_enabled_copy.into(),
            module_source: PRICING_MACRO.to_string(),
            macro_name: PRICING_MACRO_NAME.to_string(),
        }
    }
}

pub trait MacroRunner {
    /// Inject and run the macro; returns the macro-enabled copy's path.
    fn inject_and_run(&self, request: &MacroRequest) -> Result<PathBuf, MacroError>;
}

impl<M: MacroRunner + ?Sized> MacroRunner for &M {
    fn inject_and_run(&self, request: &MacroRequest) -> Result<PathBuf, MacroError> {
        (**self).inject_and_run(request)
    }
}

impl<M: MacroRunner + ?Sized> MacroRunner for Box<M> {
    fn inject_and_run(&self, request: &MacroRequest) -> Result<PathBuf, MacroError> {
        (**self).inject_and_run(request)
    }
}

/// Used when no automation host is available on this machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkippedMacroRunner;

impl MacroRunner for SkippedMacroRunner {
    fn inject_and_run(&self, _request: &MacroRequest) -> Result<PathBuf, MacroError> {
        Err(MacroError::NoHost)
    }
}

/// Delegates to an external program invoked as
/// `<program> <workbook> <module.bas> <macro_enabled_copy> <macro_name>`.
///
/// The program is expected to open the workbook, add the module, save the
/// macro-enabled copy, run the macro, save, close and quit, exiting 0 on
/// success.
#[derive(Debug, Clone)]
pub struct ExternalMacroRunner {
    program: PathBuf,
}

impl ExternalMacroRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl MacroRunner for ExternalMacroRunner {
    fn inject_and_run(&self, request: &MacroRequest) -> Result<PathBuf, MacroError> {
        let module = ModuleFile::write(&request.workbook, &request.module_source)?;

        let child = Command::new(&self.program)
            .arg(&request.workbook)
            .arg(module.path())
            .arg(&request.macro_enabled_copy)
            .arg(&request.macro_name)
            .spawn()
            .map_err(|source| MacroError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        debug!("Automation host {} started", self.program.display());

        let status = HostProcess(Some(child)).wait()?;
        if !status.success() {
            return Err(MacroError::Failed(status));
        }
        Ok(request.macro_enabled_copy.clone())
    }
}

/// Kills and reaps the host if dropped before it was waited on.
struct HostProcess(Option<Child>);

impl HostProcess {
    fn wait(mut self) -> io::Result<ExitStatus> {
        match self.0.take() {
            Some(mut child) => child.wait(),
            None => Err(io::Error::new(io::ErrorKind::Other, "host already reaped")),
        }
    }
}

impl Drop for HostProcess {
    fn drop(&mut self) {
        if let Some(mut child) = self.0.take() {
            if let Err(e) = child.kill() {
                warn!("Failed to stop automation host: {}", e);
            }
            let _ = child.wait();
        }
    }
}

/// Macro source written next to the workbook, removed on drop.
struct ModuleFile(PathBuf);

impl ModuleFile {
    fn write(workbook: &Path, source: &str) -> io::Result<Self> {
        let path = workbook.with_extension("bas");
        fs::write(&path, source)?;
        Ok(Self(path))
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for ModuleFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.0);
    }
}
