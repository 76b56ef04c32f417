//! Command-line front end for timetable extraction
//!
//! **Usage:**
//! ```bash
//! rusty-timetable [--config <file>] <FILE> [--filter <glob>]   # list sheets
//! rusty-timetable [--config <file>] <FILE> --sheet <name> [--pretty]
//! rusty-timetable [--config <file>] <FILE> --speciality <name> [--pretty]
//! ```
//!
//! Records are printed to stdout as JSON, row faults are logged to stderr.
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use rusty_timetable::ScheduleScraper;
use rusty_timetable::TimetableConfig;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Extract a class timetable from a spreadsheet
#[derive(Parser, Debug)]
#[command(name = "rusty-timetable")]
#[command(about = "Extract a weekly class timetable from a spreadsheet")]
#[command(version)]
struct Args {
    /// Spreadsheet file (.xlsx, .xlsm, .xlam or .ods)
    file: PathBuf,

    /// Sheet to extract; sheet names are listed when neither this nor --speciality is given
    #[arg(short, long, conflicts_with = "speciality")]
    sheet: Option<String>,

    /// Speciality to extract, looked up in the [specialities] table of the config
    #[arg(long)]
    speciality: Option<String>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE", env = "RUSTY_TIMETABLE_CONFIG")]
    config: Option<PathBuf>,

    /// Glob pattern restricting listed sheet names
    #[arg(long, value_name = "GLOB", conflicts_with_all = ["sheet", "speciality"])]
    filter: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_timetable=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => TimetableConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TimetableConfig::default(),
    };
    let scraper = ScheduleScraper::with_config(args.file.as_path(), config);

    let extraction = if let Some(sheet) = &args.sheet {
        scraper
            .extract(sheet)
            .with_context(|| format!("Failed to extract sheet \"{}\"", sheet))?
    } else if let Some(speciality) = &args.speciality {
        scraper
            .extract_speciality(speciality)
            .with_context(|| format!("Failed to extract speciality \"{}\"", speciality))?
    } else {
        let names = match &args.filter {
            Some(pattern) => scraper.sheet_names_matching(pattern),
            None => scraper.sheet_names(),
        }
        .with_context(|| format!("Failed to list sheets of {}", args.file.display()))?;
        return print_json(&names, args.pretty);
    };

    print_json(&extraction.records, args.pretty)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", json);
    Ok(())
}
