//! Aggregate journal statistics.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::trade::Trade;

/// Dashboard aggregates over a trade collection. All values are defined on
/// empty input (zero, never a division error). Trades with a non-finite
/// stored pnl contribute nothing to sums and count as breakeven.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub total_trades: usize,
    pub trades_won: usize,
    pub trades_lost: usize,
    pub trades_breakeven: usize,
    /// Percentage of trades with strictly positive pnl, one decimal.
    pub win_rate: f64,
    pub total_pnl: f64,
    pub today_pnl: f64,
    pub avg_win: f64,
    /// Signed mean over losing trades, so at most zero.
    pub avg_loss: f64,
    /// `abs(avg_win / avg_loss)`; saturates to 0 with no losers rather than
    /// reporting an infinite factor.
    pub profit_factor: f64,
}

impl Metrics {
    /// `today` is caller-supplied; the domain never reads a clock.
    pub fn compute(trades: &[Trade], today: NaiveDate) -> Self {
        let mut trades_won = 0usize;
        let mut trades_lost = 0usize;
        let mut trades_breakeven = 0usize;
        let mut total_wins = 0.0_f64;
        let mut total_losses = 0.0_f64;
        let mut total_pnl = 0.0_f64;
        let mut today_pnl = 0.0_f64;

        for trade in trades {
            let pnl = trade.pnl;
            if !pnl.is_finite() {
                trades_breakeven += 1;
                continue;
            }
            if pnl > 0.0 {
                trades_won += 1;
                total_wins += pnl;
            } else if pnl < 0.0 {
                trades_lost += 1;
                total_losses += pnl;
            } else {
                trades_breakeven += 1;
            }
            total_pnl += pnl;
            if trade.date == today {
                today_pnl += pnl;
            }
        }

        let total_trades = trades.len();
        let win_rate = if total_trades > 0 {
            round_one_decimal(trades_won as f64 / total_trades as f64 * 100.0)
        } else {
            0.0
        };

        let avg_win = if trades_won > 0 {
            total_wins / trades_won as f64
        } else {
            0.0
        };
        let avg_loss = if trades_lost > 0 {
            total_losses / trades_lost as f64
        } else {
            0.0
        };
        let profit_factor = if avg_loss != 0.0 {
            (avg_win / avg_loss).abs()
        } else {
            0.0
        };

        Metrics {
            total_trades,
            trades_won,
            trades_lost,
            trades_breakeven,
            win_rate,
            total_pnl,
            today_pnl,
            avg_win,
            avg_loss,
            profit_factor,
        }
    }
}

/// One point per trade on the cumulative equity curve.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    /// 1-based chronological trade number.
    pub trade_number: usize,
    pub cumulative_pnl: f64,
}

/// Running pnl sum in chronological order (by derived timestamp), regardless
/// of storage or display order.
pub fn cumulative_series(trades: &[Trade]) -> Vec<EquityPoint> {
    let mut chronological: Vec<&Trade> = trades.iter().collect();
    chronological.sort_by_key(|t| t.timestamp);

    let mut cumulative = 0.0_f64;
    chronological
        .iter()
        .enumerate()
        .map(|(i, trade)| {
            if trade.pnl.is_finite() {
                cumulative += trade.pnl;
            }
            EquityPoint {
                trade_number: i + 1,
                cumulative_pnl: cumulative,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPnl {
    /// YYYY-MM bucket key.
    pub month: String,
    pub pnl: f64,
}

/// Pnl summed per year-month bucket, keys ascending (lexical order equals
/// chronological order for YYYY-MM).
pub fn monthly_pnl(trades: &[Trade]) -> Vec<MonthlyPnl> {
    let mut buckets: HashMap<String, f64> = HashMap::new();
    for trade in trades {
        if trade.pnl.is_finite() {
            *buckets.entry(trade.month_key()).or_insert(0.0) += trade.pnl;
        }
    }

    let mut months: Vec<MonthlyPnl> = buckets
        .into_iter()
        .map(|(month, pnl)| MonthlyPnl { month, pnl })
        .collect();
    months.sort_by(|a, b| a.month.cmp(&b.month));
    months
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairWinRate {
    pub pair: String,
    pub win_rate: f64,
}

/// Win rate restricted to each of the caller-supplied pairs. A pair with no
/// trades reports 0, not an error.
pub fn win_rate_by_pair(trades: &[Trade], pairs: &[String]) -> Vec<PairWinRate> {
    pairs
        .iter()
        .map(|pair| {
            let mut total = 0usize;
            let mut wins = 0usize;
            for trade in trades.iter().filter(|t| t.pair == *pair) {
                total += 1;
                if trade.pnl.is_finite() && trade.pnl > 0.0 {
                    wins += 1;
                }
            }
            let win_rate = if total > 0 {
                round_one_decimal(wins as f64 / total as f64 * 100.0)
            } else {
                0.0
            };
            PairWinRate {
                pair: pair.clone(),
                win_rate,
            }
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
