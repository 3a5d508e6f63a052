//! Trade record and direction types.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::JournalError;

/// Whether a trade profits from rising (Long) or falling (Short) price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => write!(f, "Long"),
            Direction::Short => write!(f, "Short"),
        }
    }
}

impl FromStr for Direction {
    type Err = JournalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "long" => Ok(Direction::Long),
            "short" => Ok(Direction::Short),
            _ => Err(JournalError::validation(
                "direction",
                format!("expected Long or Short, got {s:?}"),
            )),
        }
    }
}

/// A closed trade. Immutable once built: `pnl` and `timestamp` are derived
/// exactly once at creation and persisted with the record.
///
/// Serialized field names match the journal's on-disk layout (camelCase,
/// `date` as YYYY-MM-DD, `time` as HH:MM).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: i64,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    #[serde(with = "clock_time")]
    pub time: NaiveTime,
    pub pair: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub position_size: f64,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub pnl: f64,
    pub notes: String,
    pub emotional_state: String,
    pub timestamp: i64,
}

impl Trade {
    /// Epoch seconds for `date` at `time`, used for chronological ordering
    /// independent of string comparison.
    pub fn derive_timestamp(date: NaiveDate, time: NaiveTime) -> i64 {
        date.and_time(time).and_utc().timestamp()
    }

    /// Year-month bucket key (YYYY-MM). Lexical order equals chronological
    /// order for this format.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

mod clock_time {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}
