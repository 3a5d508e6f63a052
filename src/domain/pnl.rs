//! Realized P&L computation.

use super::trade::Direction;

/// The metal instrument quotes in whole dollars per ounce rather than pips.
pub const GOLD_PAIR: &str = "XAUUSD";

const GOLD_MULTIPLIER: f64 = 100.0;
const PIP_MULTIPLIER: f64 = 10_000.0;

/// Instrument-specific contract multiplier: 100 for gold, standard pip
/// scaling of 10000 for currency pairs.
pub fn contract_multiplier(pair: &str) -> f64 {
    if pair == GOLD_PAIR {
        GOLD_MULTIPLIER
    } else {
        PIP_MULTIPLIER
    }
}

/// Pure function of the five inputs. Computed once at trade creation and
/// stored on the record, never recomputed from stale fields elsewhere.
pub fn compute_pnl(
    pair: &str,
    direction: Direction,
    entry_price: f64,
    exit_price: f64,
    position_size: f64,
) -> f64 {
    let price_diff = match direction {
        Direction::Long => exit_price - entry_price,
        Direction::Short => entry_price - exit_price,
    };
    price_diff * position_size * contract_multiplier(pair)
}
