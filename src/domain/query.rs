//! Filtered and sorted views over the trade list.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::str::FromStr;

use super::error::JournalError;
use super::trade::{Direction, Trade};

/// Outcome filter: a breakeven trade (pnl == 0) matches neither variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Profit,
    Loss,
}

/// Conjunctive filter; every clause is optional. Date bounds are inclusive.
#[derive(Debug, Clone, Default)]
pub struct TradeFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub pair: Option<String>,
    pub direction: Option<Direction>,
    pub outcome: Option<Outcome>,
}

impl TradeFilter {
    pub fn matches(&self, trade: &Trade) -> bool {
        if let Some(start) = self.start_date {
            if trade.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if trade.date > end {
                return false;
            }
        }
        if let Some(ref pair) = self.pair {
            if trade.pair != *pair {
                return false;
            }
        }
        if let Some(direction) = self.direction {
            if trade.direction != direction {
                return false;
            }
        }
        match self.outcome {
            Some(Outcome::Profit) if trade.pnl <= 0.0 => return false,
            Some(Outcome::Loss) if trade.pnl >= 0.0 => return false,
            _ => {}
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Time,
    Pair,
    Direction,
    EntryPrice,
    ExitPrice,
    PositionSize,
    Pnl,
}

impl FromStr for SortField {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "time" => Ok(SortField::Time),
            "pair" => Ok(SortField::Pair),
            "direction" => Ok(SortField::Direction),
            "entry" | "entry-price" => Ok(SortField::EntryPrice),
            "exit" | "exit-price" => Ok(SortField::ExitPrice),
            "size" | "position-size" => Ok(SortField::PositionSize),
            "pnl" => Ok(SortField::Pnl),
            _ => Err(JournalError::validation(
                "sort-by",
                format!("unknown sort field {s:?}"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Produces a new ordered sequence; the input is never mutated. With no sort
/// the filtered trades keep their input order, and with an empty filter the
/// result equals the input as a multiset.
pub fn apply(trades: &[Trade], filter: &TradeFilter, sort: Option<&SortSpec>) -> Vec<Trade> {
    let mut view: Vec<Trade> = trades.iter().filter(|t| filter.matches(t)).cloned().collect();

    if let Some(spec) = sort {
        view.sort_by(|a, b| {
            let ord = compare_field(a, b, spec.field);
            match spec.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
    view
}

fn compare_field(a: &Trade, b: &Trade, field: SortField) -> Ordering {
    match field {
        // Date compares the derived instant so same-day trades order by time.
        SortField::Date => a.timestamp.cmp(&b.timestamp),
        SortField::Time => a.time.cmp(&b.time),
        SortField::Pair => a.pair.cmp(&b.pair),
        SortField::Direction => a.direction.cmp(&b.direction),
        SortField::EntryPrice => a.entry_price.total_cmp(&b.entry_price),
        SortField::ExitPrice => a.exit_price.total_cmp(&b.exit_price),
        SortField::PositionSize => a.position_size.total_cmp(&b.position_size),
        SortField::Pnl => a.pnl.total_cmp(&b.pnl),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pnl::compute_pnl;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_trade(
        id: i64,
        day: (i32, u32, u32),
        hm: (u32, u32),
        pair: &str,
        direction: Direction,
        entry: f64,
        exit: f64,
        size: f64,
    ) -> Trade {
        let date = date(day.0, day.1, day.2);
        let time = NaiveTime::from_hms_opt(hm.0, hm.1, 0).unwrap();
        Trade {
            id,
            date,
            time,
            pair: pair.to_string(),
            direction,
            entry_price: entry,
            exit_price: exit,
            position_size: size,
            stop_loss: None,
            take_profit: None,
            pnl: compute_pnl(pair, direction, entry, exit, size),
            notes: String::new(),
            emotional_state: "Neutral".to_string(),
            timestamp: Trade::derive_timestamp(date, time),
        }
    }

    fn sample_trades() -> Vec<Trade> {
        vec![
            make_trade(3, (2025, 8, 2), (11, 0), "USDJPY", Direction::Long, 149.25, 148.80, 0.08),
            make_trade(2, (2025, 8, 1), (14, 45), "EURJPY", Direction::Short, 165.80, 164.20, 0.05),
            make_trade(1, (2025, 8, 1), (9, 30), "XAUUSD", Direction::Long, 2045.50, 2055.25, 0.1),
        ]
    }

    fn ids(trades: &[Trade]) -> Vec<i64> {
        trades.iter().map(|t| t.id).collect()
    }

    #[test]
    fn empty_filter_is_multiset_identity() {
        let trades = sample_trades();
        let view = apply(&trades, &TradeFilter::default(), None);

        let mut expected = ids(&trades);
        let mut got = ids(&view);
        expected.sort_unstable();
        got.sort_unstable();
        assert_eq!(got, expected);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let trades = sample_trades();
        let filter = TradeFilter {
            start_date: Some(date(2025, 8, 1)),
            end_date: Some(date(2025, 8, 1)),
            ..Default::default()
        };
        let view = apply(&trades, &filter, None);
        assert_eq!(ids(&view), vec![2, 1]);
    }

    #[test]
    fn pair_filter_is_exact_match() {
        let trades = sample_trades();
        let filter = TradeFilter {
            pair: Some("EURJPY".to_string()),
            ..Default::default()
        };
        let view = apply(&trades, &filter, None);
        assert_eq!(ids(&view), vec![2]);
    }

    #[test]
    fn direction_filter() {
        let trades = sample_trades();
        let filter = TradeFilter {
            direction: Some(Direction::Long),
            ..Default::default()
        };
        let view = apply(&trades, &filter, None);
        assert_eq!(ids(&view), vec![3, 1]);
    }

    #[test]
    fn outcome_filters_exclude_breakeven() {
        let mut trades = sample_trades();
        let mut flat = make_trade(4, (2025, 8, 3), (10, 0), "GBPJPY", Direction::Long, 190.0, 190.0, 0.1);
        flat.pnl = 0.0;
        trades.push(flat);

        let profit = TradeFilter {
            outcome: Some(Outcome::Profit),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&trades, &profit, None)), vec![2, 1]);

        let loss = TradeFilter {
            outcome: Some(Outcome::Loss),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&trades, &loss, None)), vec![3]);
    }

    #[test]
    fn clauses_are_conjunctive() {
        let trades = sample_trades();
        let filter = TradeFilter {
            start_date: Some(date(2025, 8, 1)),
            end_date: Some(date(2025, 8, 2)),
            direction: Some(Direction::Long),
            outcome: Some(Outcome::Profit),
            ..Default::default()
        };
        let view = apply(&trades, &filter, None);
        assert_eq!(ids(&view), vec![1]);
    }

    #[test]
    fn date_sort_orders_same_day_trades_by_time() {
        let trades = sample_trades();
        let spec = SortSpec {
            field: SortField::Date,
            direction: SortDirection::Ascending,
        };
        let view = apply(&trades, &TradeFilter::default(), Some(&spec));
        assert_eq!(ids(&view), vec![1, 2, 3]);
    }

    #[test]
    fn descending_sort_reverses_ascending() {
        let trades = sample_trades();
        let asc = apply(
            &trades,
            &TradeFilter::default(),
            Some(&SortSpec {
                field: SortField::Date,
                direction: SortDirection::Ascending,
            }),
        );
        let desc = apply(
            &trades,
            &TradeFilter::default(),
            Some(&SortSpec {
                field: SortField::Date,
                direction: SortDirection::Descending,
            }),
        );

        let mut reversed = ids(&asc);
        reversed.reverse();
        assert_eq!(ids(&desc), reversed);
    }

    #[test]
    fn pnl_sort() {
        let trades = sample_trades();
        let spec = SortSpec {
            field: SortField::Pnl,
            direction: SortDirection::Descending,
        };
        let view = apply(&trades, &TradeFilter::default(), Some(&spec));
        assert_eq!(ids(&view), vec![2, 1, 3]); // 800, 97.5, -360
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let trades = sample_trades();
        let before = ids(&trades);
        let _ = apply(
            &trades,
            &TradeFilter::default(),
            Some(&SortSpec {
                field: SortField::Pair,
                direction: SortDirection::Ascending,
            }),
        );
        assert_eq!(ids(&trades), before);
    }

    #[test]
    fn sort_field_from_str() {
        assert_eq!("date".parse::<SortField>().unwrap(), SortField::Date);
        assert_eq!("entry".parse::<SortField>().unwrap(), SortField::EntryPrice);
        assert_eq!("PNL".parse::<SortField>().unwrap(), SortField::Pnl);
        assert!("volume".parse::<SortField>().is_err());
    }
}
