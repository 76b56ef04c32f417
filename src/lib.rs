//! # Rusty Timetable
//!
//! Extracts a weekly class timetable from the spreadsheets published by a
//! scheduling office. The sheets carry a fixed banner, merged lecture blocks
//! and day names in English, Kazakh or Russian; the crate turns one sheet into
//! a normalized sequence of schedule records.
//!
//! ## Features
//!
//! - **Pure Rust readers**: Office Open XML workbooks (`.xlsx`, `.xlsm`, `.xlam`)
//!   and OpenDocument spreadsheets (`.ods`), from a path or from bytes in memory
//! - **Sheet discovery**: list sheet names in workbook order without reading rows
//! - **Template layouts**: five- and six-column sheets, with the banner offsets
//!   configurable through TOML
//! - **Per-row faults**: an unrecognized day name rejects its row only
//!
//! ## Example
//!
//! ```no_run
//! use rusty_timetable::ScheduleScraper;
//!
//! let scraper = ScheduleScraper::new("timetable.xlsx");
//! for sheet in scraper.sheet_names()? {
//!     let extraction = scraper.extract(&sheet)?;
//!     println!("{}: {} records", sheet, extraction.records.len());
//! }
//! # Ok::<(), rusty_timetable::RustyTimetableError>(())
//! ```
pub mod config;
pub mod error;
mod helpers;
pub mod spreadsheet;
pub mod timetable;

pub use config::TimetableConfig;
pub use error::RustyTimetableError;
pub use spreadsheet::cell::CellValue;
pub use spreadsheet::Format;
pub use spreadsheet::Source;
pub use timetable::extract;
pub use timetable::Extraction;
pub use timetable::ScheduleRecord;
pub use timetable::ScheduleScraper;
pub use timetable::Weekday;
