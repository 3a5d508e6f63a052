//! CLI definition and dispatch.

use chrono::{Local, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::backup_adapter;
use crate::adapters::csv_export_adapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_storage_adapter::JsonStorageAdapter;
use crate::domain::error::JournalError;
use crate::domain::metrics::{self, Metrics};
use crate::domain::query::{self, Outcome, SortDirection, SortField, SortSpec, TradeFilter};
use crate::domain::session::{self, SessionWindow, DEFAULT_SESSION_END, DEFAULT_SESSION_START};
use crate::domain::store::TradeStore;
use crate::domain::trade::Direction;
use crate::domain::validation::{build_trade, TradeInput};
use crate::ports::config_port::ConfigPort;
use crate::ports::storage_port::StoragePort;

pub const DEFAULT_DATA_PATH: &str = "journal.json";

/// Pairs shown by `pairs` when none are given; mirrors the analytics panel
/// of the journal UI.
const DEFAULT_PAIRS: [&str; 4] = ["XAUUSD", "EURJPY", "USDJPY", "GBPJPY"];

#[derive(Parser, Debug)]
#[command(name = "pipjournal", about = "Local-first trading journal")]
pub struct Cli {
    /// Path to an INI settings file ([journal] data_path, [session] start/end)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a closed trade
    Add {
        /// Trade date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Entry time (HH:MM), defaults to now
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        pair: String,
        /// Long or Short
        #[arg(long)]
        direction: String,
        #[arg(long)]
        entry_price: f64,
        #[arg(long)]
        exit_price: f64,
        #[arg(long)]
        position_size: f64,
        #[arg(long)]
        stop_loss: Option<f64>,
        #[arg(long)]
        take_profit: Option<f64>,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long, default_value = "Neutral")]
        emotional_state: String,
    },
    /// List trades with optional filters and sorting
    List {
        /// Inclusive start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Inclusive end date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long)]
        pair: Option<String>,
        #[arg(long)]
        direction: Option<String>,
        #[arg(long, conflicts_with = "loss_only")]
        profit_only: bool,
        #[arg(long)]
        loss_only: bool,
        /// date, time, pair, direction, entry, exit, size or pnl
        #[arg(long, default_value = "date")]
        sort_by: String,
        #[arg(long)]
        desc: bool,
    },
    /// Show aggregate journal statistics
    Stats,
    /// Show monthly P&L buckets
    Monthly,
    /// Show win rate per pair
    Pairs {
        /// Comma-separated pair list
        #[arg(long, value_delimiter = ',')]
        pairs: Vec<String>,
    },
    /// Delete a trade by id (no-op when absent)
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Delete all trades
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Export a JSON backup envelope
    Export {
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Import a JSON backup, replacing all trades
    Import {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Export the trade table as CSV
    ExportCsv {
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub data_path: PathBuf,
    pub session: SessionWindow,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            session: SessionWindow::default(),
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let settings = match load_settings(cli.config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match cli.command {
        Command::Add {
            date,
            time,
            pair,
            direction,
            entry_price,
            exit_price,
            position_size,
            stop_loss,
            take_profit,
            notes,
            emotional_state,
        } => report(run_add(
            &settings,
            AddArgs {
                date,
                time,
                pair,
                direction,
                entry_price,
                exit_price,
                position_size,
                stop_loss,
                take_profit,
                notes,
                emotional_state,
            },
        )),
        Command::List {
            from,
            to,
            pair,
            direction,
            profit_only,
            loss_only,
            sort_by,
            desc,
        } => report(run_list(
            &settings,
            ListArgs {
                from,
                to,
                pair,
                direction,
                profit_only,
                loss_only,
                sort_by,
                desc,
            },
        )),
        Command::Stats => report(run_stats(&settings)),
        Command::Monthly => report(run_monthly(&settings)),
        Command::Pairs { pairs } => report(run_pairs(&settings, pairs)),
        Command::Delete { id } => report(run_delete(&settings, id)),
        Command::Clear { yes } => {
            if !yes {
                eprintln!("error: refusing to clear the journal without --yes");
                ExitCode::from(1)
            } else {
                report(run_clear(&settings))
            }
        }
        Command::Export { output } => report(run_export(&settings, &output)),
        Command::Import { input } => report(run_import(&settings, &input)),
        Command::ExportCsv { output } => report(run_export_csv(&settings, &output)),
    }
}

fn report(result: Result<(), JournalError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_settings(config_path: Option<&PathBuf>) -> Result<Settings, JournalError> {
    let Some(path) = config_path else {
        return Ok(Settings::default());
    };

    let adapter = FileConfigAdapter::from_file(path).map_err(|e| JournalError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let data_path = adapter
        .get_string("journal", "data_path")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

    let start = adapter
        .get_string("session", "start")
        .unwrap_or_else(|| DEFAULT_SESSION_START.to_string());
    let end = adapter
        .get_string("session", "end")
        .unwrap_or_else(|| DEFAULT_SESSION_END.to_string());
    let session =
        SessionWindow::parse(&start, &end).map_err(|e| JournalError::ConfigInvalid {
            section: "session".to_string(),
            key: "start/end".to_string(),
            reason: e.to_string(),
        })?;

    Ok(Settings { data_path, session })
}

fn storage(settings: &Settings) -> JsonStorageAdapter {
    JsonStorageAdapter::new(settings.data_path.clone())
}

fn load_store(adapter: &JsonStorageAdapter) -> Result<TradeStore, JournalError> {
    adapter.load().map(TradeStore::from_trades)
}

struct AddArgs {
    date: Option<NaiveDate>,
    time: Option<String>,
    pair: String,
    direction: String,
    entry_price: f64,
    exit_price: f64,
    position_size: f64,
    stop_loss: Option<f64>,
    take_profit: Option<f64>,
    notes: String,
    emotional_state: String,
}

fn run_add(settings: &Settings, args: AddArgs) -> Result<(), JournalError> {
    // The clock is read once, here at the edge; the domain stays pure.
    let now = Local::now();
    let date = args.date.unwrap_or_else(|| now.date_naive());
    let time = match args.time {
        Some(ref s) => session::parse_clock("time", s)?,
        None => session::parse_clock("time", &now.format("%H:%M").to_string())?,
    };
    let direction: Direction = args.direction.parse()?;

    let input = TradeInput {
        date,
        time,
        pair: args.pair,
        direction,
        entry_price: args.entry_price,
        exit_price: args.exit_price,
        position_size: args.position_size,
        stop_loss: args.stop_loss,
        take_profit: args.take_profit,
        notes: args.notes,
        emotional_state: args.emotional_state,
    };
    let id = Utc::now().timestamp_millis();
    let trade = build_trade(input, id)?;

    if !settings.session.contains(trade.time) {
        eprintln!(
            "note: {} is outside the preferred session ({} - {})",
            trade.time.format("%H:%M"),
            settings.session.start.format("%H:%M"),
            settings.session.end.format("%H:%M"),
        );
    }

    let adapter = storage(settings);
    let mut store = load_store(&adapter)?;
    store.insert(trade.clone());
    adapter.save(store.all())?;

    println!(
        "Trade {} recorded: {} {} P&L ${:.2}",
        trade.id, trade.pair, trade.direction, trade.pnl
    );
    Ok(())
}

struct ListArgs {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    pair: Option<String>,
    direction: Option<String>,
    profit_only: bool,
    loss_only: bool,
    sort_by: String,
    desc: bool,
}

fn run_list(settings: &Settings, args: ListArgs) -> Result<(), JournalError> {
    let filter = TradeFilter {
        start_date: args.from,
        end_date: args.to,
        pair: args.pair.map(|p| p.trim().to_uppercase()),
        direction: args.direction.as_deref().map(str::parse).transpose()?,
        outcome: if args.profit_only {
            Some(Outcome::Profit)
        } else if args.loss_only {
            Some(Outcome::Loss)
        } else {
            None
        },
    };
    let spec = SortSpec {
        field: args.sort_by.parse::<SortField>()?,
        direction: if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        },
    };

    let store = load_store(&storage(settings))?;
    let view = query::apply(store.all(), &filter, Some(&spec));

    if view.is_empty() {
        eprintln!("No trades match.");
        return Ok(());
    }

    println!(
        "{:<12} {:<6} {:<8} {:<6} {:>10} {:>10} {:>6} {:>10}  {}",
        "Date", "Time", "Pair", "Dir", "Entry", "Exit", "Size", "P&L", "Id"
    );
    for t in &view {
        let date = t.date.to_string();
        let time = t.time.format("%H:%M").to_string();
        let direction = t.direction.to_string();
        println!(
            "{date:<12} {time:<6} {pair:<8} {direction:<6} {entry:>10.5} {exit:>10.5} {size:>6.2} {pnl:>10.2}  {id}",
            pair = t.pair,
            entry = t.entry_price,
            exit = t.exit_price,
            size = t.position_size,
            pnl = t.pnl,
            id = t.id,
        );
    }
    eprintln!("{} trades", view.len());
    Ok(())
}

fn run_stats(settings: &Settings) -> Result<(), JournalError> {
    let store = load_store(&storage(settings))?;
    let today = Local::now().date_naive();
    let m = Metrics::compute(store.all(), today);

    println!("=== Journal Stats ===");
    println!("Total Trades:     {}", m.total_trades);
    println!(
        "Wins / Losses / Flat: {} / {} / {}",
        m.trades_won, m.trades_lost, m.trades_breakeven
    );
    println!("Win Rate:         {:.1}%", m.win_rate);
    println!("Total P&L:        ${:.2}", m.total_pnl);
    println!("Today P&L:        ${:.2}", m.today_pnl);
    println!("Average Win:      ${:.2}", m.avg_win);
    println!("Average Loss:     ${:.2}", m.avg_loss);
    println!("Profit Factor:    {:.2}", m.profit_factor);

    let series = metrics::cumulative_series(store.all());
    if let Some(last) = series.last() {
        println!(
            "Equity after {} trades: ${:.2}",
            last.trade_number, last.cumulative_pnl
        );
    }
    Ok(())
}

fn run_monthly(settings: &Settings) -> Result<(), JournalError> {
    let store = load_store(&storage(settings))?;
    let buckets = metrics::monthly_pnl(store.all());
    if buckets.is_empty() {
        eprintln!("No trades yet.");
        return Ok(());
    }
    for bucket in &buckets {
        println!("{}  ${:>10.2}", bucket.month, bucket.pnl);
    }
    Ok(())
}

fn run_pairs(settings: &Settings, pairs: Vec<String>) -> Result<(), JournalError> {
    let pairs: Vec<String> = if pairs.is_empty() {
        DEFAULT_PAIRS.iter().map(|p| p.to_string()).collect()
    } else {
        pairs.iter().map(|p| p.trim().to_uppercase()).collect()
    };

    let store = load_store(&storage(settings))?;
    for rate in metrics::win_rate_by_pair(store.all(), &pairs) {
        println!("{:<8} {:>5.1}%", rate.pair, rate.win_rate);
    }
    Ok(())
}

fn run_delete(settings: &Settings, id: i64) -> Result<(), JournalError> {
    let adapter = storage(settings);
    let mut store = load_store(&adapter)?;
    if store.delete(id) {
        adapter.save(store.all())?;
        println!("Trade {id} deleted");
    } else {
        eprintln!("no trade with id {id} (nothing to delete)");
    }
    Ok(())
}

fn run_clear(settings: &Settings) -> Result<(), JournalError> {
    let adapter = storage(settings);
    let mut store = load_store(&adapter)?;
    let count = store.len();
    store.replace_all(Vec::new())?;
    adapter.save(store.all())?;
    println!("Cleared {count} trades");
    Ok(())
}

fn run_export(settings: &Settings, output: &PathBuf) -> Result<(), JournalError> {
    let store = load_store(&storage(settings))?;
    backup_adapter::write_backup(output, store.all(), &settings.session, Utc::now())?;
    println!("Backup written to: {}", output.display());
    Ok(())
}

fn run_import(settings: &Settings, input: &PathBuf) -> Result<(), JournalError> {
    let envelope = backup_adapter::read_backup(input)?;

    if let Some(ref backup_settings) = envelope.settings {
        let window = backup_settings
            .session_window()
            .map_err(|e| JournalError::ImportShape {
                reason: e.to_string(),
            })?;
        if window != settings.session {
            eprintln!(
                "note: backup session window ({} - {}) differs from the configured one; config file is left untouched",
                window.start.format("%H:%M"),
                window.end.format("%H:%M"),
            );
        }
    }

    let adapter = storage(settings);
    let mut store = load_store(&adapter)?;
    store.replace_all(envelope.trades)?;
    adapter.save(store.all())?;

    println!("Imported {} trades from {}", store.len(), input.display());
    Ok(())
}

fn run_export_csv(settings: &Settings, output: &PathBuf) -> Result<(), JournalError> {
    let store = load_store(&storage(settings))?;
    csv_export_adapter::export_csv(output, store.all())?;
    println!("CSV written to: {}", output.display());
    Ok(())
}
