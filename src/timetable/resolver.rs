//! Sheet discovery and selection
use crate::error::RustyTimetableError;
use crate::spreadsheet::open_spreadsheet;
use crate::spreadsheet::Source;
use crate::timetable::table::RawTable;

/// Result of resolving a source against an optional sheet selector.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    /// Sheet names in source-declared order
    Sheets(Vec<String>),
    Table(RawTable),
}

/// Lists the sheets of a source, or reads one sheet when a name is given.
///
/// # Errors
///
/// - `SourceNotFound` if the source cannot be opened
/// - `SheetNotFound` if the named sheet does not exist
pub fn resolve(source: &Source, sheet: Option<&str>) -> Result<Resolution, RustyTimetableError> {
    match sheet {
        None => Ok(Resolution::Sheets(list_sheets(source)?)),
        Some(sheet) => Ok(Resolution::Table(read_table(source, sheet)?)),
    }
}

/// Returns sheet names in source-declared order without reading any rows.
pub fn list_sheets(source: &Source) -> Result<Vec<String>, RustyTimetableError> {
    let spreadsheet = open_spreadsheet(source)?;
    let names = spreadsheet.sheet_names();
    tracing::debug!(source = %spreadsheet.name(), sheets = names.len(), "list sheets");
    Ok(names)
}

/// Reads one sheet as a raw table.
pub fn read_table(source: &Source, sheet: &str) -> Result<RawTable, RustyTimetableError> {
    let mut spreadsheet = open_spreadsheet(source)?;
    let sheet = spreadsheet.read_sheet(sheet)?;
    if sheet.is_empty() {
        tracing::debug!(source = %sheet.file_name, sheet = %sheet.name, "sheet has no cells");
    } else {
        tracing::debug!(source = %sheet.file_name, sheet = %sheet.name, cells = sheet.cells.len(), "read sheet");
    }
    Ok(RawTable::from_sheet(&sheet))
}
