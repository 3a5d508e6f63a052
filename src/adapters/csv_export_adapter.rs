//! CSV export adapter.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::error::JournalError;
use crate::domain::trade::Trade;

const HEADERS: [&str; 9] = [
    "Date",
    "Time",
    "Pair",
    "Direction",
    "Entry Price",
    "Exit Price",
    "Position Size",
    "P&L",
    "Notes",
];

pub fn write_csv<W: Write>(writer: W, trades: &[Trade]) -> Result<(), JournalError> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(HEADERS).map_err(csv_error)?;
    for trade in trades {
        wtr.write_record([
            trade.date.format("%Y-%m-%d").to_string(),
            trade.time.format("%H:%M").to_string(),
            trade.pair.clone(),
            trade.direction.to_string(),
            trade.entry_price.to_string(),
            trade.exit_price.to_string(),
            trade.position_size.to_string(),
            format!("{:.2}", trade.pnl),
            trade.notes.clone(),
        ])
        .map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn export_csv(path: &Path, trades: &[Trade]) -> Result<(), JournalError> {
    let file = File::create(path).map_err(|e| JournalError::Storage {
        reason: format!("failed to create {}: {}", path.display(), e),
    })?;
    write_csv(file, trades)
}

fn csv_error(e: csv::Error) -> JournalError {
    JournalError::Storage {
        reason: format!("CSV write error: {e}"),
    }
}
