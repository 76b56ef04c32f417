//! Row cleaning, admission and day translation
//!
//! Every normalized row becomes either a [`ScheduleRecord`], a [`RowFault`]
//! or nothing at all: rows rejected by one of the admission predicates are
//! noise (repeated header rows, notes in the time column) and are dropped
//! without a fault.
use crate::config::HeaderTokens;
use crate::spreadsheet::cell::CellValue;
use crate::timetable::normalize::NormalizedRow;
use crate::timetable::weekday::Weekday;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use thiserror::Error;

/// Lesson time range such as `9.00 - 9.50`, matched at the start of the value.
static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}\.\d{2}\s*-\s*\d{1,2}\.\d{2}").expect("Hardcode regex pattern"));

/// Whether a value starts with a lesson time range.
pub fn is_time_range(value: &str) -> bool {
    TIME_PATTERN.is_match(value)
}

/// A validated timetable entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScheduleRecord {
    day: Weekday,
    time: String,
    subject: Option<String>,
    teacher: Option<String>,
    room: Option<String>,
}

impl ScheduleRecord {
    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn teacher(&self) -> Option<&str> {
        self.teacher.as_deref()
    }

    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }
}

/// A data-quality problem confined to one row.
#[derive(Error, Clone, Debug, PartialEq, Serialize)]
#[error("row {row}: {kind}")]
pub struct RowFault {
    /// One-based sheet row number
    pub row: usize,
    pub kind: FaultKind,
}

#[derive(Error, Clone, Debug, PartialEq, Serialize)]
pub enum FaultKind {
    #[error("unknown day \"{token}\"")]
    UnknownDayToken { token: String },

    #[error("missing day")]
    MissingDay,
}

/// A row with every cell stringified and trimmed; empty cells are absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextRow {
    /// Zero-based row index in the sheet
    pub sheet_row: usize,
    pub day: Option<String>,
    pub time: Option<String>,
    pub subject: Option<String>,
    pub teacher: Option<String>,
    pub room: Option<String>,
}

impl TextRow {
    pub fn from_normalized(row: &NormalizedRow) -> Self {
        Self {
            sheet_row: row.sheet_row,
            day: row.day.as_ref().and_then(to_text),
            time: to_text(&row.time),
            subject: row.subject.as_ref().and_then(to_text),
            teacher: row.teacher.as_ref().and_then(to_text),
            room: row.room.as_ref().and_then(to_text),
        }
    }
}

fn to_text(value: &CellValue) -> Option<String> {
    let text = value.to_text();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Admission predicates, applied in [`Predicate::CHAIN`] order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// Time starts with a lesson time range
    TimeRange,
    /// Neither Day nor Time carries a header token
    NotInlineHeader,
}

impl Predicate {
    pub const CHAIN: [Predicate; 2] = [Predicate::TimeRange, Predicate::NotInlineHeader];

    pub fn name(&self) -> &'static str {
        match self {
            Predicate::TimeRange => "TimeRange",
            Predicate::NotInlineHeader => "NotInlineHeader",
        }
    }

    pub fn admits(&self, row: &TextRow, headers: &HeaderTokens) -> bool {
        match self {
            Predicate::TimeRange => row.time.as_deref().is_some_and(is_time_range),
            Predicate::NotInlineHeader => {
                row.day.as_deref() != Some(headers.day.as_str()) && row.time.as_deref() != Some(headers.time.as_str())
            }
        }
    }
}

/// Returns the first predicate of the chain rejecting the row.
pub fn rejection(row: &TextRow, headers: &HeaderTokens) -> Option<Predicate> {
    Predicate::CHAIN.into_iter().find(|predicate| !predicate.admits(row, headers))
}

/// Cleans, filters and translates rows lazily, in input order.
pub fn clean<'a, I>(rows: I, headers: &'a HeaderTokens) -> impl Iterator<Item = Result<ScheduleRecord, RowFault>> + 'a
where
    I: IntoIterator<Item = NormalizedRow>,
    I::IntoIter: 'a,
{
    rows.into_iter().filter_map(move |row| clean_row(&row, headers))
}

/// Cleans one row; `None` when an admission predicate rejects it.
pub fn clean_row(row: &NormalizedRow, headers: &HeaderTokens) -> Option<Result<ScheduleRecord, RowFault>> {
    let text = TextRow::from_normalized(row);
    if let Some(predicate) = rejection(&text, headers) {
        tracing::trace!(row = text.sheet_row + 1, predicate = predicate.name(), "reject row");
        return None;
    }
    let TextRow { sheet_row, day, time, subject, teacher, room } = text;
    let fault = |kind| RowFault { row: sheet_row + 1, kind };
    let result = match day {
        None => Err(fault(FaultKind::MissingDay)),
        Some(token) => match Weekday::from_token(&token) {
            None => Err(fault(FaultKind::UnknownDayToken { token })),
            Some(day) => Ok(ScheduleRecord {
                day,
                // Admitted rows always carry a time
                time: time.unwrap_or_default(),
                subject,
                teacher,
                room,
            }),
        },
    };
    Some(result)
}
