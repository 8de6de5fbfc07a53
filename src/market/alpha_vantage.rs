//! Alpha Vantage realtime currency exchange rate client.
//!
//! Uses the `CURRENCY_EXCHANGE_RATE` function. The service reports
//! throttling and bad keys as a 200 response carrying a `Note`,
//! `Information` or `Error Message` body instead of the rate block.

use crate::core::currency::CurrencyPair;
use crate::market::quote::{QuoteError, RateProvider};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";

const RATE_BLOCK: &str = "Realtime Currency Exchange Rate";
const RATE_FIELD: &str = "5. Exchange Rate";
const SERVICE_MESSAGE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Blocking Alpha Vantage client. No retry, no timeout override.
pub struct AlphaVantageClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl AlphaVantageClient {
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, QuoteError> {
        let client = Client::builder().build()?;
        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client,
        })
    }

    fn request_url(&self, pair: &CurrencyPair) -> String {
        format!(
            "{}?function=CURRENCY_EXCHANGE_RATE&from_currency={}&to_currency={}&apikey={}",
            self.base_url, pair.base, pair.quote, self.api_key
        )
    }
}

impl RateProvider for AlphaVantageClient {
    fn spot_rate(&self, pair: &CurrencyPair) -> Result<Decimal, QuoteError> {
        let response = self.client.get(self.request_url(pair)).send()?;
        check_status(response.status())?;

        let body = response.text()?;
        parse_exchange_rate(&body)
    }
}

fn check_status(status: StatusCode) -> Result<(), QuoteError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(QuoteError::Status(status.as_u16()))
    }
}

/// Extract the realtime exchange rate from a `CURRENCY_EXCHANGE_RATE` body.
pub fn parse_exchange_rate(body: &str) -> Result<Decimal, QuoteError> {
    let value: Value = serde_json::from_str(body)?;

    let block = match value.get(RATE_BLOCK) {
        Some(block) => block,
        None => {
            if let Some(message) = SERVICE_MESSAGE_KEYS
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_str))
            {
                return Err(QuoteError::ServiceMessage(message.to_string()));
            }
            return Err(QuoteError::MissingField(RATE_BLOCK));
        }
    };

    let raw = block
        .get(RATE_FIELD)
        .ok_or(QuoteError::MissingField(RATE_FIELD))?;

    let rate = match raw {
        Value::String(s) => parse_rate(s.trim())?,
        Value::Number(n) => parse_rate(&n.to_string())?,
        other => return Err(QuoteError::InvalidRate(other.to_string())),
    };

    if rate <= Decimal::ZERO {
        return Err(QuoteError::InvalidRate(rate.to_string()));
    }
    Ok(rate)
}

/// Plain decimal first, then exponent form (`1.2e-5`).
fn parse_rate(text: &str) -> Result<Decimal, QuoteError> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| QuoteError::InvalidRate(text.to_string()))
}
