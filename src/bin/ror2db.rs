//! ror2db: convert a ROR JSON data dump to a SQLite database
//!
//! The table structure is similar to the structure provided by Digital
//! Science for the GRID data: one `ror` core table plus lookup tables for
//! acronyms, aliases, links, types, labels, relationships, addresses and
//! external identifiers, all keyed by `ror_id`.
//!
//! Usage:
//!   # Convert a dump; writes v1.1-2022-06-16-ror-data.db next to the input
//!   ror2db -i v1.1-2022-06-16-ror-data.json
//!
//!   # Verbose logging, appended to a file
//!   ror2db -i ror-data.json --loglevel debug --logto conversion.log

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use ror2db::config::ROR_V1;
use ror2db::{db, input};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ror2db")]
#[command(about = "Convert a ROR JSON data dump to a SQLite database", long_about = None)]
struct Args {
    /// File with the ROR JSON dump
    #[arg(short = 'i', long, value_name = "FILE")]
    input_file: PathBuf,

    /// Logging level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    loglevel: LogLevel,

    /// Log file (will append to file if exists)
    #[arg(long, value_name = "FILE")]
    logto: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Debug,
    Info,
    Warning,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
        }
    }
}

/// Timestamped `time:LEVEL:target: message` lines, to stderr or appended to
/// the `--logto` file.
fn init_logging(args: &Args) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(args.loglevel.into());
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{}:{}:{}: {}",
            buf.timestamp_seconds(),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(path) = &args.logto {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let records = input::load_records(&args.input_file)?;
    info!(
        "File {} has {} records",
        args.input_file.display(),
        records.len()
    );

    info!("Creating tables");
    let tables = ror2db::convert(&records, &ROR_V1)?;

    let database = db::database_path(&args.input_file);
    let mut conn = db::open(&database)?;
    db::write_tables(&mut conn, &tables)?;
    info!("Database {} created.", database.display());

    info!("Table counts:");
    db::report_counts(&conn)?;

    Ok(())
}
