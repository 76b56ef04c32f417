//! # Spreadsheet Reading Module
//!
//! Pure-Rust readers for Office Open XML workbooks (`.xlsx`, `.xlsm`, `.xlam`)
//! and OpenDocument spreadsheets (`.ods`). Both formats are zip archives of XML
//! parts; each reader lists sheets in workbook order and materializes one sheet
//! as sparse cells.
use crate::error::RustyTimetableError;
use crate::helpers::reader::UnifiedReader;
use crate::spreadsheet::ods::OdsSpreadsheet;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::xlsx::XlsxSpreadsheet;
use std::ffi::OsStr;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

pub mod cell;
pub(crate) mod excel;
pub mod ods;
pub(crate) mod reference;
pub(crate) mod sheet;
pub(crate) mod xlsx;

/// Errors raised while opening a spreadsheet or selecting one of its sheets.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    /// The source file cannot be opened
    #[error("File \"{0}\" not found")]
    SourceNotFound(String),

    /// The requested sheet does not exist in the source
    #[error("Sheet name \"{sheet}\" not found in \"{file}\"")]
    SheetNotFound { file: String, sheet: String },

    /// Unsupported or unrecognized file format
    #[error("Cannot detect file format for '{0}'")]
    InvalidFileFormat(String),

    /// A part the format requires is missing from the archive
    #[error("Missing '{0}' in spreadsheet archive")]
    FileError(String),

    /// The workbook declares no sheets
    #[error("Spreadsheet '{0}' contains no sheets")]
    SpreadsheetEmptyError(String),

    #[error("Spreadsheet '{0}' is password protected")]
    SpreadsheetPasswordProtectedError(String),
}

/// Container format of a spreadsheet source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Format {
    /// Office Open XML workbook
    Xlsx,
    /// OpenDocument spreadsheet
    Ods,
}

impl Format {
    /// Detects the format from a file extension, ignoring ASCII case.
    pub fn from_path(path: &Path) -> Option<Format> {
        let extension = path.extension().and_then(OsStr::to_str)?.to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlam" => Some(Format::Xlsx),
            "ods" => Some(Format::Ods),
            _ => None,
        }
    }
}

/// Where a spreadsheet comes from: a local file or bytes already in memory.
#[derive(Clone, Debug)]
pub enum Source {
    Path(PathBuf),
    Bytes {
        /// Display name used in diagnostics
        name: String,
        format: Format,
        bytes: Vec<u8>,
    },
}

impl Source {
    /// Returns the identifier reported in diagnostics.
    pub fn name(&self) -> String {
        match self {
            Source::Path(path) => path.display().to_string(),
            Source::Bytes { name, .. } => name.to_owned(),
        }
    }
}

impl From<&str> for Source {
    fn from(path: &str) -> Self {
        Source::Path(PathBuf::from(path))
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

/// Common interface of the format readers.
pub(crate) trait Spreadsheet {
    /// Returns the source name of this spreadsheet
    fn name(&self) -> String;

    /// Returns the sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// Reads every cell of the named sheet
    fn read_sheet(&mut self, sheet_name: &str) -> Result<Sheet, RustyTimetableError>;
}

/// Opens a spreadsheet source with the reader matching its format.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened (`SourceNotFound`)
/// - The format is not supported (`InvalidFileFormat`)
/// - The archive or its workbook parts are corrupted
pub(crate) fn open_spreadsheet(source: &Source) -> Result<Box<dyn Spreadsheet>, RustyTimetableError> {
    let name = source.name();
    let (reader, format) = match source {
        Source::Path(path) => {
            let format = Format::from_path(path).ok_or_else(|| SpreadsheetError::InvalidFileFormat(name.to_owned()))?;
            (UnifiedReader::open(path)?, format)
        }
        Source::Bytes { format, bytes, .. } => (UnifiedReader::from_bytes(bytes.to_owned()), *format),
    };
    tracing::debug!(source = %name, ?format, "open spreadsheet");
    let spreadsheet: Box<dyn Spreadsheet> = match format {
        Format::Xlsx => Box::new(XlsxSpreadsheet::open(&name, reader)?),
        Format::Ods => Box::new(OdsSpreadsheet::open(&name, reader)?),
    };
    Ok(spreadsheet)
}
