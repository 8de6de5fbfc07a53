use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// ISO 4217-style currency code.
///
/// No local validation is performed: whatever the quote service accepts
/// is a valid code.
///
/// # Examples
///
/// ```
/// use fx_trade_report::core::currency::CurrencyCode;
///
/// let eur = CurrencyCode::new("EUR");
/// let usd = CurrencyCode::new("USD");
/// assert_ne!(eur, usd);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Errors arising from parsing a currency pair.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairError {
    #[error("currency pair must look like BASE/QUOTE, got {0:?}")]
    Malformed(String),
}

/// An ordered (base, quote) pair. A rate on this pair is quote units per
/// one unit of base.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: CurrencyCode,
    pub quote: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(base: impl Into<CurrencyCode>, quote: impl Into<CurrencyCode>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = PairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((base, quote))
                if !base.trim().is_empty() && !quote.trim().is_empty() && !quote.contains('/') =>
            {
                Ok(Self::new(base.trim(), quote.trim()))
            }
            _ => Err(PairError::Malformed(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_equality() {
        let a = CurrencyCode::new("USD");
        let b = CurrencyCode::new("USD");
        assert_eq!(a, b);
    }

    #[test]
    fn test_pair_display() {
        let pair = CurrencyPair::new("EUR", "USD");
        assert_eq!(pair.to_string(), "EUR/USD");
    }

    #[test]
    fn test_pair_parse() {
        let pair: CurrencyPair = "USD/JPY".parse().unwrap();
        assert_eq!(pair.base.as_str(), "USD");
        assert_eq!(pair.quote.as_str(), "JPY");
    }

    #[test]
    fn test_pair_parse_malformed() {
        assert!("EURUSD".parse::<CurrencyPair>().is_err());
        assert!("EUR/".parse::<CurrencyPair>().is_err());
        assert!("EUR/USD/JPY".parse::<CurrencyPair>().is_err());
    }
}
