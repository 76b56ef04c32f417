use crate::error::RustyTimetableError;
use crate::helpers::reader::UnifiedReader;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::Spreadsheet;
use crate::spreadsheet::SpreadsheetError;
use quick_xml::events::Event;
use quick_xml::name::QName;
use std::io::Read;
use thiserror::Error;
use zip::ZipArchive;

/// ODS file MIME type identifier
const MIME_TYPE: &[u8] = b"application/vnd.oasis.opendocument.spreadsheet";
/// Part holding the sheet contents
const CONTENT: &str = "content.xml";
/// XML element name for table (sheet)
const TABLE: QName = QName(b"table:table");
/// XML element name for table row
const TABLE_ROW: QName = QName(b"table:table-row");
/// XML element name for table cell
const TABLE_CELL: QName = QName(b"table:table-cell");
/// XML element name for covered table cell (merged cells)
const TABLE_COVERED_CELL: QName = QName(b"table:covered-table-cell");
/// XML element name for annotations (comments)
const ANNOTATION: QName = QName(b"office:annotation");
/// XML element name for paragraph text
const PARAGRAPH: QName = QName(b"text:p");
/// XML element name for string (space) text
const STRING: QName = QName(b"text:s");

/// Error types specific to ODS spreadsheet processing
#[derive(Error, Debug)]
pub enum OdsError {
    /// Invalid ODS MIME type detected in file
    #[error("Invalid ODS MIME type")]
    MimeTypeError,
}

/// ODS spreadsheet handler for reading OpenDocument Spreadsheet files
pub(crate) struct OdsSpreadsheet {
    /// Source name of the ODS file
    name: String,
    /// ZIP archive containing the ODS parts
    zip: ZipArchive<UnifiedReader>,
    /// Table names in document order
    sheets: Vec<String>,
}

impl OdsSpreadsheet {
    /// Opens an ODS archive, validates its format and lists its tables
    ///
    /// # Arguments
    /// * `name` - Source name used in diagnostics
    /// * `reader` - Reader positioned at the start of the archive
    pub(crate) fn open(name: &str, reader: UnifiedReader) -> Result<Self, RustyTimetableError> {
        let mut zip = ZipArchive::new(reader)?;
        check_mime(&mut zip)?;
        if is_password_protected(&mut zip)? {
            Err(SpreadsheetError::SpreadsheetPasswordProtectedError(name.to_owned()))?;
        }
        let sheets = load_sheet_names(&mut zip)?;
        if sheets.is_empty() {
            Err(SpreadsheetError::SpreadsheetEmptyError(name.to_owned()))?;
        }
        Ok(OdsSpreadsheet {
            name: name.to_owned(),
            zip,
            sheets,
        })
    }
}

impl Spreadsheet for OdsSpreadsheet {
    fn name(&self) -> String {
        self.name.to_owned()
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.to_owned()
    }

    /// Reads the named table, expanding repeated rows and columns.
    /// Annotation text is not part of the cell value.
    fn read_sheet(&mut self, sheet_name: &str) -> Result<Sheet, RustyTimetableError> {
        let not_found = || SpreadsheetError::SheetNotFound {
            file: self.name.to_owned(),
            sheet: sheet_name.to_owned(),
        };
        if !self.sheets.iter().any(|name| name == sheet_name) {
            Err(not_found())?;
        }
        let mut reader = self.zip
            .xml_reader(CONTENT)?
            .ok_or_else(|| SpreadsheetError::FileError(CONTENT.to_owned()))?;

        let mut found = false;
        match_xml_events!(reader => {
            Event::Start(event) if event.name() == TABLE => {
                if event.get_attribute_value("table:name")?.as_deref() == Some(sheet_name) {
                    found = true;
                    break;
                }
            }
        });
        if !found {
            Err(not_found())?;
        }

        let mut sheet = Sheet::new(&self.name, sheet_name);
        let mut row = 0usize;
        let mut col = 0usize;
        let mut rows_repeated = 1usize;
        let mut cols_repeated = 1usize;
        let mut kind = CellType::default();
        let mut value = String::new();
        // Whether string content of the current cell is being collected
        let mut element_context = false;
        let mut comment_context = false;
        match_xml_events!(reader => {
            Event::End(event) if event.name() == TABLE => break,
            Event::Start(event) if event.name() == TABLE_ROW => {
                rows_repeated = event.parse_attribute_value("table:number-rows-repeated")?.unwrap_or(1);
                col = 0;
            }
            Event::End(event) if event.name() == TABLE_ROW => row += rows_repeated,
            Event::Start(event) if event.name() == TABLE_CELL || event.name() == TABLE_COVERED_CELL => {
                value.clear();
                cols_repeated = event.parse_attribute_value("table:number-columns-repeated")?.unwrap_or(1);
                let value_type = event.get_attribute_value("office:value-type")?;
                kind = match value_type.as_deref() {
                    None => CellType::Empty,
                    Some("boolean") => CellType::Boolean,
                    Some("date") => CellType::IsoDateTime,
                    Some("time") => CellType::IsoDuration,
                    Some("string") => {
                        let is_error = event.get_attribute_value("calcext:value-type")?
                            .map(|cow| cow == "error")
                            .unwrap_or(false);
                        if is_error { CellType::Error } else { CellType::InlineString }
                    }
                    Some(_) => CellType::Number,
                };
                let attribute = match kind {
                    CellType::Boolean => "office:boolean-value",
                    CellType::IsoDateTime => "office:date-value",
                    CellType::IsoDuration => "office:time-value",
                    _ => "office:value",
                };
                match kind {
                    CellType::InlineString | CellType::Error => element_context = true,
                    CellType::Boolean => {
                        let truthy = event.get_attribute_value(attribute)?
                            .map(|cow| cow != "false" && cow != "0")
                            .unwrap_or(false);
                        value.push(if truthy { '1' } else { '0' });
                    }
                    CellType::Empty => (),
                    _ => if let Some(data) = event.get_attribute_value(attribute)? {
                        value.push_str(&data);
                    }
                }
            }
            Event::End(event) if event.name() == TABLE_CELL || event.name() == TABLE_COVERED_CELL => {
                if kind == CellType::Error {
                    tracing::debug!(sheet = sheet_name, cell = %index_to_reference(row, col), value = %value, "skip error cell");
                } else if kind != CellType::Empty && !value.is_empty() {
                    for row_offset in 0..rows_repeated {
                        for col_offset in 0..cols_repeated {
                            sheet.push(Cell {
                                row: row + row_offset,
                                col: col + col_offset,
                                kind,
                                value: value.to_owned(),
                            });
                        }
                    }
                }
                col += cols_repeated;
                kind = CellType::Empty;
                element_context = false;
                comment_context = false;
            }
            Event::Start(event) if element_context && event.name() == ANNOTATION => comment_context = true,
            Event::End(event) if element_context && event.name() == ANNOTATION => comment_context = false,
            Event::Start(event) if element_context && !comment_context && event.name() == PARAGRAPH => {
                if !value.is_empty() {
                    value.push('\n');
                }
            }
            Event::Start(event) if element_context && !comment_context && event.name() == STRING => {
                let count = event.parse_attribute_value("text:c")?.unwrap_or(1usize);
                value.extend(std::iter::repeat(' ').take(count));
            }
            Event::Text(event) if element_context && !comment_context => value.push_bytes_text(&event)?,
            Event::GeneralRef(event) if element_context && !comment_context => value.push_bytes_ref(&event)?,
        });
        Ok(sheet)
    }
}

/// Lists the table names of `content.xml` in document order
fn load_sheet_names(zip: &mut ZipArchive<UnifiedReader>) -> Result<Vec<String>, RustyTimetableError> {
    let mut reader = zip
        .xml_reader(CONTENT)?
        .ok_or_else(|| SpreadsheetError::FileError(CONTENT.to_owned()))?;
    let mut names = Vec::<String>::new();
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TABLE => {
            if let Some(name) = event.get_attribute_value("table:name")? {
                names.push(name.to_string());
            }
        }
    });
    Ok(names)
}

/// Validates the `mimetype` part when present
fn check_mime(zip: &mut ZipArchive<UnifiedReader>) -> Result<(), RustyTimetableError> {
    if let Some(file) = &mut zip.file("mimetype")? {
        let mut buffer = Vec::with_capacity(MIME_TYPE.len());
        file.read_to_end(&mut buffer)?;
        if buffer.trim_ascii() != MIME_TYPE {
            Err(OdsError::MimeTypeError)?;
        }
    }
    Ok(())
}

/// Checks the manifest for encryption data on any file entry
fn is_password_protected(zip: &mut ZipArchive<UnifiedReader>) -> Result<bool, RustyTimetableError> {
    let mut reader = match zip.xml_reader("META-INF/manifest.xml")? {
        Some(reader) => reader,
        None => return Ok(false),
    };
    let mut in_file_entry = false;
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == QName(b"manifest:file-entry") => in_file_entry = true,
        Event::End(event) if event.name() == QName(b"manifest:file-entry") => in_file_entry = false,
        Event::Start(event) if in_file_entry && event.name() == QName(b"manifest:encryption-data") => {
            return Ok(true);
        }
    });
    Ok(false)
}
