use crate::core::currency::{CurrencyCode, CurrencyPair};
use crate::core::trade::{TradeId, TradeType};
use crate::market::quote::{QuotedBook, QuotedTrade};
use crate::valuation::shock::ShockSource;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One fully priced row of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedTrade {
    pub trade_id: TradeId,
    pub currency_pair: CurrencyPair,
    /// Base-currency units.
    pub notional: Decimal,
    /// Quoted spot rate.
    pub fx_rate: Decimal,
    pub trade_type: TradeType,
    /// `fx_rate * (1 + shock)`.
    pub market_rate: Decimal,
    /// `(market_rate - fx_rate) * notional`, in quote-currency units.
    pub pnl: Decimal,
}

impl ValuedTrade {
    /// Price a single quoted trade under the given shock.
    pub fn price(quoted: &QuotedTrade, shock: Decimal) -> Self {
        let fx_rate = quoted.fx_rate;
        let notional = quoted.trade.notional();
        let market_rate = fx_rate * (Decimal::ONE + shock);
        let pnl = (market_rate - fx_rate) * notional;

        Self {
            trade_id: quoted.trade.id().clone(),
            currency_pair: quoted.trade.pair().clone(),
            notional,
            fx_rate,
            trade_type: quoted.trade.trade_type(),
            market_rate,
            pnl,
        }
    }

    /// Currency the P&L is expressed in.
    pub fn pnl_currency(&self) -> &CurrencyCode {
        &self.currency_pair.quote
    }
}

/// The valued table for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeReport {
    rows: Vec<ValuedTrade>,
}

impl TradeReport {
    pub fn rows(&self) -> &[ValuedTrade] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// P&L summed per quote currency. Rows in different currencies are
    /// never added together.
    pub fn pnl_by_currency(&self) -> BTreeMap<CurrencyCode, Decimal> {
        let mut totals = BTreeMap::new();
        for row in &self.rows {
            *totals
                .entry(row.pnl_currency().clone())
                .or_insert(Decimal::ZERO) += row.pnl;
        }
        totals
    }
}

impl FromIterator<ValuedTrade> for TradeReport {
    fn from_iter<T: IntoIterator<Item = ValuedTrade>>(iter: T) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for TradeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== FX Trading Report ===")?;
        writeln!(
            f,
            "{:<8} {:<8} {:>14} {:>12} {:<8} {:>12} {:>16}",
            "Trade", "Pair", "Notional", "FX Rate", "Type", "Market", "PnL"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<8} {:<8} {:>14} {:>12} {:<8} {:>12} {:>16}",
                row.trade_id.as_str(),
                row.currency_pair.to_string(),
                row.notional.to_string(),
                row.fx_rate.round_dp(6).to_string(),
                row.trade_type.as_str(),
                row.market_rate.round_dp(6).to_string(),
                row.pnl.round_dp(2).to_string(),
            )?;
        }

        writeln!(f, "\nPnL by currency:")?;
        for (currency, total) in self.pnl_by_currency() {
            writeln!(f, "  {}: {}", currency, total.round_dp(2))?;
        }
        Ok(())
    }
}

/// Placeholder mark-to-market: a random shock on the quoted rate.
///
/// Trade type, tenor and curves play no part.
pub struct ValuationEngine;

impl ValuationEngine {
    /// Value every quoted trade, drawing one shock per trade in book order.
    pub fn value<S: ShockSource + ?Sized>(book: &QuotedBook, shocks: &mut S) -> TradeReport {
        book.quoted()
            .iter()
            .map(|quoted| ValuedTrade::price(quoted, shocks.next_shock()))
            .collect()
    }
}
