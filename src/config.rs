//! Runtime configuration. The binary loads `.env` with dotenvy and then
//! reads the process environment through [`Config::from_lookup`].

use crate::market::alpha_vantage::ALPHA_VANTAGE_BASE_URL;
use std::path::PathBuf;
use thiserror::Error;

pub const API_KEY_VAR: &str = "ALPHA_VANTAGE_API_KEY";
pub const REPORT_DIR_VAR: &str = "FX_REPORT_DIR";
pub const QUOTE_URL_VAR: &str = "ALPHA_VANTAGE_URL";
pub const MACRO_HOST_VAR: &str = "FX_MACRO_HOST";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API Key not found. Please set ALPHA_VANTAGE_API_KEY in the .env file.")]
    MissingApiKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    /// Directory the report files are written to.
    pub output_dir: PathBuf,
    pub quote_url: String,
    /// External spreadsheet automation program, if any.
    pub macro_host: Option<PathBuf>,
}

impl Config {
    pub fn new(api_key: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_key: api_key.into(),
            output_dir: output_dir.into(),
            quote_url: ALPHA_VANTAGE_BASE_URL.to_string(),
            macro_host: None,
        }
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key,
            output_dir: get(REPORT_DIR_VAR).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(".")),
            quote_url: get(QUOTE_URL_VAR).unwrap_or_else(|| ALPHA_VANTAGE_BASE_URL.to_string()),
            macro_host: get(MACRO_HOST_VAR).map(PathBuf::from),
        })
    }
}
