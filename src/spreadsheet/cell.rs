use crate::error::RustyTimetableError;
use crate::spreadsheet::reference::index_to_reference;
use chrono::Duration;
use chrono::NaiveDate;
use iso8601_duration::Duration as IsoDuration;
use serde::Serialize;
use std::fmt::Display;

/// Types of cell data in spreadsheet files.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) enum CellType {
    #[default]
    Empty,
    /// Boolean values stored as `1`/`0`
    Boolean,
    /// Numeric values
    Number,
    /// Date/time values stored as numbers from 1900 epoch
    NumberDateTime1900,
    /// Date values stored as numbers from 1900 epoch
    NumberDate1900,
    /// Time values stored as numbers from 1900 epoch
    NumberTime1900,
    /// Date/time values stored as numbers from 1904 epoch
    NumberDateTime1904,
    /// Date values stored as numbers from 1904 epoch
    NumberDate1904,
    /// Time values stored as numbers from 1904 epoch
    NumberTime1904,
    /// ISO 8601 date/time strings
    IsoDateTime,
    /// ISO 8601 duration strings
    IsoDuration,
    /// Text, either inline or resolved from the shared string table
    InlineString,
    /// Error values such as `#N/A`
    Error,
}

impl CellType {
    /// Parses built-in Excel number format IDs to determine cell type.
    pub(crate) fn parse_builtin_number_format_id(id: &str, is_1904: bool) -> Option<Self> {
        match id {
            "22" => Some(if is_1904 { Self::NumberDateTime1904 } else { Self::NumberDateTime1900 }),
            "14" | "15" | "16" | "17" => Some(if is_1904 { Self::NumberDate1904 } else { Self::NumberDate1900 }),
            "18" | "19" | "20" | "21" | "45" | "46" | "47" => Some(if is_1904 { Self::NumberTime1904 } else { Self::NumberTime1900 }),
            _ => None,
        }
    }

    /// Parses custom number format strings to determine cell type.
    /// Literal text, escapes and bracketed sections (colors, locales) are skipped.
    pub(crate) fn parse_custom_number_format(format: &str, is_1904: bool) -> Self {
        let mut is_escaped = false;
        let mut is_literal = false;
        let mut is_bracket = false;
        let mut is_date = false;
        let mut is_time = false;
        for character in format.chars() {
            match character {
                _ if is_escaped => is_escaped = false,
                '_' | '\\' => is_escaped = true,

                '"' if is_literal => is_literal = false,
                '"' if !is_bracket => is_literal = true,

                ']' if is_bracket => is_bracket = false,
                '[' if !is_literal => is_bracket = true,
                _ if is_literal || is_bracket => (),

                'Y' | 'y' | 'D' | 'd' => is_date = true,
                'H' | 'h' | 'S' | 's' => is_time = true,
                _ => (),
            }
        }

        match (is_date, is_time, is_1904) {
            (true, true, false) => Self::NumberDateTime1900,
            (true, true, true) => Self::NumberDateTime1904,
            (true, false, false) => Self::NumberDate1900,
            (true, false, true) => Self::NumberDate1904,
            (false, true, false) => Self::NumberTime1900,
            (false, true, true) => Self::NumberTime1904,
            (false, false, _) => Self::Number,
        }
    }
}

/// A materialized cell value: text or a number. Absent cells are `None` at the call site.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Returns the text form of the value; numbers use their decimal form,
    /// integral numbers without a fractional part (`204`, not `204.0`).
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(text) => write!(f, "{}", text),
            CellValue::Number(number) if number.fract() == 0.0 && number.abs() < 1e15 => {
                write!(f, "{}", *number as i64)
            }
            CellValue::Number(number) => write!(f, "{}", number),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// Represents a single cell in a spreadsheet with position, type, and value.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    /// Row index (0-based)
    pub(crate) row: usize,
    /// Column index (0-based)
    pub(crate) col: usize,
    /// Cell data type
    pub(crate) kind: CellType,
    /// Raw cell value as stored in the file
    pub(crate) value: String,
}

impl Cell {
    /// Returns the Excel-style cell reference (e.g., "A1", "B2").
    pub(crate) fn reference(&self) -> String {
        index_to_reference(self.row, self.col)
    }

    /// Converts the stored value to a cell value.
    ///
    /// Dates and times become ISO text, booleans become `true`/`false`,
    /// error and empty cells have no value.
    pub(crate) fn to_value(&self) -> Option<CellValue> {
        let text = match self.kind {
            CellType::Empty | CellType::Error => return None,
            CellType::InlineString => return Some(CellValue::Text(self.value.to_owned())),
            CellType::Boolean => Ok(if self.value == "1" { "true" } else { "false" }.to_owned()),
            CellType::Number => {
                return Some(match self.value.trim().parse::<f64>() {
                    Ok(number) => CellValue::Number(number),
                    Err(_) => CellValue::Text(self.value.to_owned()),
                })
            }
            CellType::NumberDate1900 => to_date_string(&self.value, false),
            CellType::NumberDate1904 => to_date_string(&self.value, true),
            CellType::NumberDateTime1900 => to_datetime_string(&self.value, false),
            CellType::NumberDateTime1904 => to_datetime_string(&self.value, true),
            CellType::NumberTime1900 | CellType::NumberTime1904 => to_time_string(&self.value),
            CellType::IsoDateTime => Ok(self.value.replace('T', " ")),
            CellType::IsoDuration => to_duration_string(&self.value),
        };
        match text {
            Ok(text) => Some(CellValue::Text(text)),
            Err(error) => {
                tracing::debug!(cell = %self.reference(), value = %self.value, %error, "keep raw value");
                Some(CellValue::Text(self.value.to_owned()))
            }
        }
    }
}

/// Converts Excel numeric date to ISO date string.
/// Handles the Lotus 1-2-3 leap year bug for the 1900 epoch.
fn to_date_string(value: &str, is_1904: bool) -> Result<String, RustyTimetableError> {
    let days = value.parse::<f64>()?.trunc() as i64;
    let offset = if is_1904 {
        1462
    } else if days < 60 {
        1
    } else {
        0
    };
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default();
    let date = epoch + Duration::days(days + offset);
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Converts Excel numeric time (fraction of a day) to ISO time string.
fn to_time_string(value: &str) -> Result<String, RustyTimetableError> {
    let factor = value.parse::<f64>()?.fract();
    let mut rest = (factor * 86_400_000f64).round() as i64;
    let milliseconds = rest % 1_000;
    rest /= 1_000;
    let seconds = rest % 60;
    rest /= 60;
    let minutes = rest % 60;
    let hours = rest / 60;
    let timestamp = if milliseconds > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}.{milliseconds:03}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    };
    Ok(timestamp)
}

/// Converts Excel numeric datetime to ISO datetime string.
fn to_datetime_string(value: &str, is_1904: bool) -> Result<String, RustyTimetableError> {
    let date = to_date_string(value, is_1904)?;
    let time = to_time_string(value)?;
    Ok(format!("{date} {time}"))
}

/// Converts an ISO 8601 duration (`PT09H30M00S`, used by ODS time cells) to `HH:MM:SS`.
fn to_duration_string(value: &str) -> Result<String, RustyTimetableError> {
    let duration = value.parse::<IsoDuration>().map_err(|_| {
        RustyTimetableError::WithContextError(format!("parse '{}' to iso8601 duration failed", value))
    })?;
    let hours = duration.day as i64 * 24 + duration.hour as i64;
    Ok(format!("{:02}:{:02}:{:02}", hours, duration.minute as i64, duration.second as i64))
}
