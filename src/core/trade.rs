use crate::core::currency::CurrencyPair;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque trade identifier, unique within one report.
///
/// Assigned by the caller; the pipeline never generates or interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(String);

impl TradeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TradeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Kind of FX trade. Informational only; valuation ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeType {
    Forward,
    Spot,
    #[serde(rename = "NDF")]
    Ndf,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Forward => "Forward",
            TradeType::Spot => "Spot",
            TradeType::Ndf => "NDF",
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synthetic FX trade before any market data is attached.
///
/// # Examples
///
/// ```
/// use fx_trade_report::core::currency::CurrencyPair;
/// use fx_trade_report::core::trade::{Trade, TradeType};
/// use rust_decimal_macros::dec;
///
/// let trade = Trade::new("T001", CurrencyPair::new("EUR", "USD"), dec!(1_000_000), TradeType::Forward);
/// assert_eq!(trade.notional(), dec!(1_000_000));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    id: TradeId,
    pair: CurrencyPair,
    /// Principal in base-currency units. Always positive.
    notional: Decimal,
    trade_type: TradeType,
}

impl Trade {
    /// Create a new trade.
    ///
    /// # Panics
    ///
    /// Panics if `notional` is not positive.
    pub fn new(
        id: impl Into<TradeId>,
        pair: CurrencyPair,
        notional: Decimal,
        trade_type: TradeType,
    ) -> Self {
        assert!(
            notional > Decimal::ZERO,
            "Trade notional must be positive, got {}",
            notional
        );
        Self {
            id: id.into(),
            pair,
            notional,
            trade_type,
        }
    }

    pub fn id(&self) -> &TradeId {
        &self.id
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn notional(&self) -> Decimal {
        self.notional
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }
}

/// The working set of trades for one report run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeBook {
    trades: Vec<Trade>,
}

impl TradeBook {
    pub fn new() -> Self {
        Self { trades: Vec::new() }
    }

    /// The fixed three-trade book the report is normally run against.
    pub fn standard() -> Self {
        use rust_decimal_macros::dec;

        [
            Trade::new("T001", CurrencyPair::new("EUR", "USD"), dec!(1_000_000), TradeType::Forward),
            Trade::new("T002", CurrencyPair::new("GBP", "USD"), dec!(1_500_000), TradeType::Spot),
            Trade::new("T003", CurrencyPair::new("USD", "JPY"), dec!(1_200_000), TradeType::Ndf),
        ]
        .into_iter()
        .collect()
    }

    pub fn add(&mut self, trade: Trade) {
        self.trades.push(trade);
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

impl FromIterator<Trade> for TradeBook {
    fn from_iter<T: IntoIterator<Item = Trade>>(iter: T) -> Self {
        Self {
            trades: iter.into_iter().collect(),
        }
    }
}
