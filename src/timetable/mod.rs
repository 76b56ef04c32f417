//! # Timetable Extraction
//!
//! The extraction pipeline runs four stages over one sheet:
//!
//! 1. [`resolver`] lists the sheets of a source or reads one as a [`RawTable`]
//! 2. [`columns`] probes the header row, picks the column layout and drops the banner
//! 3. [`normalize`] forward-fills the lecture blocks and drops rows without a time
//! 4. [`clean`] trims values, filters noise rows and translates day names
//!
//! Source, sheet and shape problems abort the call. Problems confined to one
//! row are returned as [`RowFault`]s next to the records.
use crate::config::TimetableConfig;
use crate::error::RustyTimetableError;
use crate::spreadsheet::Source;
use glob::Pattern;
use serde::Serialize;
use thiserror::Error;

pub mod clean;
pub mod columns;
pub mod normalize;
pub mod resolver;
pub mod table;
pub mod weekday;

pub use clean::FaultKind;
pub use clean::RowFault;
pub use clean::ScheduleRecord;
pub use columns::ColumnLayout;
pub use table::RawTable;
pub use weekday::Weekday;

/// Sheets whose shape does not follow the template.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Sheet \"{sheet}\" has {rows} data rows, the header probe needs {required}")]
    MalformedSheetShape { sheet: String, rows: usize, required: usize },

    #[error("Sheet \"{sheet}\" has {count} columns, expected 5 or 6")]
    UnsupportedColumnCount { sheet: String, count: usize },
}

/// Records and row faults extracted from one sheet, both in sheet order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Extraction {
    pub sheet: String,
    pub records: Vec<ScheduleRecord>,
    pub faults: Vec<RowFault>,
}

/// Runs the whole pipeline over one sheet of a source.
pub fn extract(source: &Source, sheet: &str, config: &TimetableConfig) -> Result<Extraction, RustyTimetableError> {
    let raw = resolver::read_table(source, sheet)?;
    extract_table(raw, config)
}

/// Runs the mapping, normalizing and cleaning stages over an already read table.
pub fn extract_table(raw: RawTable, config: &TimetableConfig) -> Result<Extraction, RustyTimetableError> {
    let mapped = columns::map_columns(raw, &config.layout)?;
    let sheet = mapped.sheet.to_owned();
    let rows = normalize::normalize(mapped);

    let mut records = Vec::new();
    let mut faults = Vec::new();
    for result in clean::clean(rows, &config.headers) {
        match result {
            Ok(record) => records.push(record),
            Err(fault) => {
                tracing::warn!(sheet = %sheet, row = fault.row, "{}", fault.kind);
                faults.push(fault);
            }
        }
    }
    tracing::info!(sheet = %sheet, records = records.len(), faults = faults.len(), "extract timetable");
    Ok(Extraction { sheet, records, faults })
}

/// Entry point bundling a source with its configuration.
///
/// ```no_run
/// use rusty_timetable::ScheduleScraper;
///
/// let scraper = ScheduleScraper::new("timetable.xlsx");
/// let extraction = scraper.extract("ИС 1ао")?;
/// # Ok::<(), rusty_timetable::RustyTimetableError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ScheduleScraper {
    source: Source,
    config: TimetableConfig,
}

impl ScheduleScraper {
    pub fn new(source: impl Into<Source>) -> Self {
        Self::with_config(source, TimetableConfig::default())
    }

    pub fn with_config(source: impl Into<Source>, config: TimetableConfig) -> Self {
        Self {
            source: source.into(),
            config,
        }
    }

    /// Sheet names in source-declared order.
    pub fn sheet_names(&self) -> Result<Vec<String>, RustyTimetableError> {
        resolver::list_sheets(&self.source)
    }

    /// Sheet names matching a glob pattern, in source-declared order.
    pub fn sheet_names_matching(&self, pattern: &str) -> Result<Vec<String>, RustyTimetableError> {
        let pattern = Pattern::new(pattern)?;
        let names = self.sheet_names()?;
        Ok(names.into_iter().filter(|name| pattern.matches(name)).collect())
    }

    pub fn extract(&self, sheet: &str) -> Result<Extraction, RustyTimetableError> {
        extract(&self.source, sheet, &self.config)
    }

    /// Extracts the sheet configured for a speciality.
    pub fn extract_speciality(&self, speciality: &str) -> Result<Extraction, RustyTimetableError> {
        let sheet = self.config.sheet_for_speciality(speciality)?;
        tracing::debug!(speciality, sheet, "resolve speciality");
        self.extract(sheet)
    }
}
