//! Trading session window.

use chrono::NaiveTime;

use super::error::JournalError;

pub const DEFAULT_SESSION_START: &str = "07:00";
pub const DEFAULT_SESSION_END: &str = "19:30";

const TIME_FORMAT: &str = "%H:%M";

/// Preferred trading hours. A trade outside the window is worth a warning,
/// never a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl SessionWindow {
    pub fn parse(start: &str, end: &str) -> Result<Self, JournalError> {
        let start = parse_clock("sessionStart", start)?;
        let end = parse_clock("sessionEnd", end)?;
        Ok(SessionWindow { start, end })
    }

    /// Inclusive on both ends.
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time <= self.end
    }
}

impl Default for SessionWindow {
    fn default() -> Self {
        // The defaults are compile-time constants in the accepted format.
        SessionWindow::parse(DEFAULT_SESSION_START, DEFAULT_SESSION_END).unwrap()
    }
}

pub fn parse_clock(field: &str, value: &str) -> Result<NaiveTime, JournalError> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT).map_err(|_| {
        JournalError::validation(field, format!("expected HH:MM, got {value:?}"))
    })
}
