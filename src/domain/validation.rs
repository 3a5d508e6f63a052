//! Input validation and trade construction.

use chrono::{NaiveDate, NaiveTime};

use super::error::JournalError;
use super::pnl::compute_pnl;
use super::trade::{Direction, Trade};

/// Raw field values collected by an outer surface (CLI flags, an import row).
/// Nothing downstream of [`build_trade`] ever sees unvalidated input.
#[derive(Debug, Clone)]
pub struct TradeInput {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub pair: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub position_size: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub notes: String,
    pub emotional_state: String,
}

/// Validates the input and builds the immutable trade record. The pnl and
/// chronological timestamp are derived here, exactly once.
pub fn build_trade(input: TradeInput, id: i64) -> Result<Trade, JournalError> {
    let pair = input.pair.trim().to_uppercase();
    if pair.is_empty() {
        return Err(JournalError::validation("pair", "pair is required"));
    }

    require_positive("entryPrice", input.entry_price)?;
    require_positive("exitPrice", input.exit_price)?;
    require_positive("positionSize", input.position_size)?;

    if let Some(sl) = input.stop_loss {
        require_finite("stopLoss", sl)?;
    }
    if let Some(tp) = input.take_profit {
        require_finite("takeProfit", tp)?;
    }

    let pnl = compute_pnl(
        &pair,
        input.direction,
        input.entry_price,
        input.exit_price,
        input.position_size,
    );
    let timestamp = Trade::derive_timestamp(input.date, input.time);

    Ok(Trade {
        id,
        date: input.date,
        time: input.time,
        pair,
        direction: input.direction,
        entry_price: input.entry_price,
        exit_price: input.exit_price,
        position_size: input.position_size,
        stop_loss: input.stop_loss,
        take_profit: input.take_profit,
        pnl,
        notes: input.notes.trim().to_string(),
        emotional_state: input.emotional_state.trim().to_string(),
        timestamp,
    })
}

fn require_positive(field: &str, value: f64) -> Result<(), JournalError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(JournalError::validation(
            field,
            "must be a number greater than 0",
        ));
    }
    Ok(())
}

fn require_finite(field: &str, value: f64) -> Result<(), JournalError> {
    if !value.is_finite() {
        return Err(JournalError::validation(field, "must be a finite number"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> TradeInput {
        TradeInput {
            date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            pair: "xauusd".to_string(),
            direction: Direction::Long,
            entry_price: 2045.50,
            exit_price: 2055.25,
            position_size: 0.1,
            stop_loss: Some(2040.0),
            take_profit: Some(2060.0),
            notes: "  broke resistance  ".to_string(),
            emotional_state: "Confident".to_string(),
        }
    }

    #[test]
    fn builds_trade_with_derived_fields() {
        let trade = build_trade(sample_input(), 7).unwrap();
        assert_eq!(trade.id, 7);
        assert_eq!(trade.pair, "XAUUSD");
        assert!((trade.pnl - 97.50).abs() < 1e-9);
        assert_eq!(trade.notes, "broke resistance");
        assert_eq!(
            trade.timestamp,
            Trade::derive_timestamp(trade.date, trade.time)
        );
    }

    #[test]
    fn rejects_non_positive_prices() {
        let mut input = sample_input();
        input.entry_price = 0.0;
        let err = build_trade(input, 1).unwrap_err();
        assert!(err.to_string().contains("entryPrice"));

        let mut input = sample_input();
        input.exit_price = -5.0;
        assert!(build_trade(input, 1).is_err());

        let mut input = sample_input();
        input.position_size = 0.0;
        assert!(build_trade(input, 1).is_err());
    }

    #[test]
    fn rejects_unparseable_numbers() {
        let mut input = sample_input();
        input.entry_price = f64::NAN;
        assert!(build_trade(input, 1).is_err());

        let mut input = sample_input();
        input.stop_loss = Some(f64::INFINITY);
        let err = build_trade(input, 1).unwrap_err();
        assert!(err.to_string().contains("stopLoss"));
    }

    #[test]
    fn rejects_blank_pair() {
        let mut input = sample_input();
        input.pair = "   ".to_string();
        let err = build_trade(input, 1).unwrap_err();
        assert!(matches!(err, JournalError::Validation { ref field, .. } if field == "pair"));
    }

    #[test]
    fn optional_levels_may_be_absent() {
        let mut input = sample_input();
        input.stop_loss = None;
        input.take_profit = None;
        let trade = build_trade(input, 1).unwrap();
        assert_eq!(trade.stop_loss, None);
        assert_eq!(trade.take_profit, None);
    }
}
