#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use pipjournal::domain::error::JournalError;
use pipjournal::domain::pnl::compute_pnl;
use pipjournal::domain::trade::{Direction, Trade};
use pipjournal::ports::storage_port::StoragePort;
use std::cell::RefCell;

pub struct MockStoragePort {
    pub initial: Vec<Trade>,
    pub saved: RefCell<Vec<Vec<Trade>>>,
    pub fail_save: bool,
}

impl MockStoragePort {
    pub fn new() -> Self {
        Self {
            initial: Vec::new(),
            saved: RefCell::new(Vec::new()),
            fail_save: false,
        }
    }

    pub fn with_trades(mut self, trades: Vec<Trade>) -> Self {
        self.initial = trades;
        self
    }

    pub fn failing_save(mut self) -> Self {
        self.fail_save = true;
        self
    }

    pub fn last_saved(&self) -> Option<Vec<Trade>> {
        self.saved.borrow().last().cloned()
    }
}

impl StoragePort for MockStoragePort {
    fn load(&self) -> Result<Vec<Trade>, JournalError> {
        Ok(self.initial.clone())
    }

    fn save(&self, trades: &[Trade]) -> Result<(), JournalError> {
        if self.fail_save {
            return Err(JournalError::Storage {
                reason: "disk full".to_string(),
            });
        }
        self.saved.borrow_mut().push(trades.to_vec());
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn make_trade(
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
    let time = time(hm.0, hm.1);
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

/// Three closed trades across two days: a gold win (97.50), a yen-cross win
/// (800.00) and a yen-cross loss (-360.00).
pub fn sample_trades() -> Vec<Trade> {
    vec![
        make_trade(1, (2025, 8, 1), (9, 30), "XAUUSD", Direction::Long, 2045.50, 2055.25, 0.1),
        make_trade(2, (2025, 8, 1), (14, 45), "EURJPY", Direction::Short, 165.80, 164.20, 0.05),
        make_trade(3, (2025, 8, 2), (11, 0), "USDJPY", Direction::Long, 149.25, 148.80, 0.08),
    ]
}

pub fn ids(trades: &[Trade]) -> Vec<i64> {
    trades.iter().map(|t| t.id).collect()
}
