//! Authoritative trade collection.

use super::error::JournalError;
use super::trade::Trade;

/// Owns the canonical ordered collection of trades. Newest-inserted first
/// (default display order); readers that need a different order apply their
/// own explicit sort.
#[derive(Debug, Clone, Default)]
pub struct TradeStore {
    trades: Vec<Trade>,
}

impl TradeStore {
    pub fn new() -> Self {
        TradeStore { trades: Vec::new() }
    }

    /// Wraps an already-loaded collection, preserving its order.
    pub fn from_trades(trades: Vec<Trade>) -> Self {
        TradeStore { trades }
    }

    /// Prepends the trade. Callers supply unique ids (e.g. from a monotonic
    /// clock); the store does not police collisions.
    pub fn insert(&mut self, trade: Trade) {
        self.trades.insert(0, trade);
    }

    /// Removes the trade with this id. Idempotent: returns false when no such
    /// trade exists, which is not an error.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.trades.len();
        self.trades.retain(|t| t.id != id);
        self.trades.len() != before
    }

    /// Atomically replaces the whole collection. Every incoming record must
    /// pass shape validation or the batch is rejected wholesale and the store
    /// is left untouched.
    pub fn replace_all(&mut self, trades: Vec<Trade>) -> Result<(), JournalError> {
        for (index, trade) in trades.iter().enumerate() {
            check_shape(index, trade)?;
        }
        self.trades = trades;
        Ok(())
    }

    pub fn all(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

fn check_shape(index: usize, trade: &Trade) -> Result<(), JournalError> {
    let reject = |reason: String| JournalError::ImportShape {
        reason: format!("record {index} (id {id}): {reason}", id = trade.id),
    };

    if trade.pair.trim().is_empty() {
        return Err(reject("pair must not be empty".to_string()));
    }
    for (field, value) in [
        ("entryPrice", trade.entry_price),
        ("exitPrice", trade.exit_price),
        ("positionSize", trade.position_size),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(reject(format!("{field} must be a positive number")));
        }
    }
    if !trade.pnl.is_finite() {
        return Err(reject("pnl must be a finite number".to_string()));
    }
    for (field, value) in [("stopLoss", trade.stop_loss), ("takeProfit", trade.take_profit)] {
        if let Some(v) = value {
            if !v.is_finite() {
                return Err(reject(format!("{field} must be a finite number")));
            }
        }
    }
    Ok(())
}
