//! Header probing and column mapping
//!
//! The template lays out either five columns (Day, Time, Subject, Teacher,
//! Room) or six, with a leading placeholder column. The layout is chosen
//! once per sheet from the width of the header probe row.
use crate::config::LayoutConfig;
use crate::error::RustyTimetableError;
use crate::spreadsheet::cell::CellValue;
use crate::timetable::table::RawRow;
use crate::timetable::table::RawTable;
use crate::timetable::LayoutError;

/// Column layout of a timetable sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColumnLayout {
    /// Day, Time, Subject, Teacher, Room
    FiveColumn,
    /// Placeholder, Day, Time, Subject, Teacher, Room
    SixColumn,
}

impl ColumnLayout {
    /// Selects the layout for a header probe row of `count` cells.
    pub fn from_width(count: usize) -> Option<ColumnLayout> {
        match count {
            5 => Some(ColumnLayout::FiveColumn),
            6 => Some(ColumnLayout::SixColumn),
            _ => None,
        }
    }

    pub fn column_names(&self) -> &'static [&'static str] {
        match self {
            ColumnLayout::FiveColumn => &["Day", "Time", "Subject", "Teacher", "Room"],
            ColumnLayout::SixColumn => &["Placeholder", "Day", "Time", "Subject", "Teacher", "Room"],
        }
    }
}

/// A row addressed by semantic column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MappedRow {
    /// Zero-based row index in the sheet
    pub sheet_row: usize,
    /// Only set for the six-column layout
    pub placeholder: Option<CellValue>,
    pub day: Option<CellValue>,
    pub time: Option<CellValue>,
    pub subject: Option<CellValue>,
    pub teacher: Option<CellValue>,
    pub room: Option<CellValue>,
}

impl MappedRow {
    fn from_raw(layout: ColumnLayout, row: RawRow) -> Self {
        let mut cells = row.cells.into_iter();
        let placeholder = match layout {
            ColumnLayout::SixColumn => cells.next().flatten(),
            ColumnLayout::FiveColumn => None,
        };
        let mut next = || cells.next().flatten();
        MappedRow {
            sheet_row: row.sheet_row,
            placeholder,
            day: next(),
            time: next(),
            subject: next(),
            teacher: next(),
            room: next(),
        }
    }
}

/// The data rows of a sheet under its resolved layout, indexed from zero.
#[derive(Clone, Debug, PartialEq)]
pub struct MappedTable {
    pub sheet: String,
    pub layout: ColumnLayout,
    pub rows: Vec<MappedRow>,
}

/// Maps a raw table onto the semantic columns.
///
/// The label rows are consumed first. The first column is forward-filled
/// over all data rows, the row at `header_probe_row` selects the layout and
/// rows at data offsets below `banner_rows` are dropped.
///
/// # Errors
///
/// - `MalformedSheetShape` if the header probe row does not exist
/// - `UnsupportedColumnCount` if the table is neither five nor six columns wide
pub fn map_columns(raw: RawTable, config: &LayoutConfig) -> Result<MappedTable, RustyTimetableError> {
    let RawTable { sheet, rows, .. } = raw;
    let mut rows: Vec<RawRow> = rows.into_iter().skip(config.label_rows).collect();

    let mut last: Option<CellValue> = None;
    for row in rows.iter_mut() {
        if let Some(cell) = row.cells.first_mut() {
            match cell {
                None => *cell = last.clone(),
                Some(value) => last = Some(value.clone()),
            }
        }
    }

    let probe = rows.get(config.header_probe_row).ok_or_else(|| LayoutError::MalformedSheetShape {
        sheet: sheet.to_owned(),
        rows: rows.len(),
        required: config.header_probe_row + 1,
    })?;
    let count = probe.cells.len();
    let layout = ColumnLayout::from_width(count).ok_or_else(|| LayoutError::UnsupportedColumnCount {
        sheet: sheet.to_owned(),
        count,
    })?;
    tracing::debug!(sheet = %sheet, columns = ?layout.column_names(), "map columns");

    let rows = rows
        .into_iter()
        .skip(config.banner_rows)
        .map(|row| MappedRow::from_raw(layout, row))
        .collect();
    Ok(MappedTable { sheet, layout, rows })
}
