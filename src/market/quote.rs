use crate::core::currency::CurrencyPair;
use crate::core::trade::{Trade, TradeBook};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Why a spot quote could not be obtained.
///
/// Every variant is recoverable: the trade is dropped and the run continues.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("quote service returned status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("response is missing field {0:?}")]
    MissingField(&'static str),
    #[error("invalid exchange rate {0:?}")]
    InvalidRate(String),
    #[error("quote service message: {0}")]
    ServiceMessage(String),
}

/// A source of current spot rates.
pub trait RateProvider {
    /// Quote-per-base spot rate for `pair`. One outbound request per call.
    fn spot_rate(&self, pair: &CurrencyPair) -> Result<Decimal, QuoteError>;
}

impl<P: RateProvider + ?Sized> RateProvider for &P {
    fn spot_rate(&self, pair: &CurrencyPair) -> Result<Decimal, QuoteError> {
        (**self).spot_rate(pair)
    }
}

/// Fetch a rate, converting any failure into `None` after logging it.
pub fn fetch_rate<P: RateProvider + ?Sized>(provider: &P, pair: &CurrencyPair) -> Option<Decimal> {
    match provider.spot_rate(pair) {
        Ok(rate) if rate > Decimal::ZERO => {
            debug!("Fetched {} = {}", pair, rate);
            Some(rate)
        }
        Ok(rate) => {
            warn!(
                "Error fetching data for {}: {}",
                pair,
                QuoteError::InvalidRate(rate.to_string())
            );
            None
        }
        Err(e) => {
            warn!("Error fetching data for {}: {}", pair, e);
            None
        }
    }
}

/// A trade with a known spot rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotedTrade {
    pub trade: Trade,
    /// Quote-per-base spot rate at fetch time. Always positive.
    pub fx_rate: Decimal,
}

/// The book after quoting, holding only the trades that got a rate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuotedBook {
    quoted: Vec<QuotedTrade>,
    /// Number of trades in the book before unpriced ones were dropped.
    requested: usize,
}

impl QuotedBook {
    pub fn quoted(&self) -> &[QuotedTrade] {
        &self.quoted
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn len(&self) -> usize {
        self.quoted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quoted.is_empty()
    }

    /// Number of trades dropped for lack of a rate.
    pub fn dropped(&self) -> usize {
        self.requested - self.quoted.len()
    }
}

/// Fetch a rate for every trade, in book order, and drop trades whose
/// fetch failed.
///
/// One request per trade; rates are not cached across trades.
pub fn quote_book<P: RateProvider + ?Sized>(book: &TradeBook, provider: &P) -> QuotedBook {
    let quoted = book
        .trades()
        .iter()
        .filter_map(|trade| {
            fetch_rate(provider, trade.pair()).map(|fx_rate| QuotedTrade {
                trade: trade.clone(),
                fx_rate,
            })
        })
        .collect();

    QuotedBook {
        quoted,
        requested: book.len(),
    }
}
