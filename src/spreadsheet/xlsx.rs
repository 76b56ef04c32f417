use crate::error::ResultMessage;
use crate::error::RustyTimetableError;
use crate::helpers::reader::UnifiedReader;
use crate::helpers::xml::XmlAttributeHelper;
use crate::helpers::xml::XmlNodeHelper;
use crate::helpers::xml::XmlReader;
use crate::helpers::xml::XmlTextContextHelper;
use crate::helpers::zip::ZipHelper;
use crate::match_xml_events;
use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellType;
use crate::spreadsheet::excel;
use crate::spreadsheet::excel::load_relationships;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::reference::reference_to_index;
use crate::spreadsheet::sheet::Sheet;
use crate::spreadsheet::Spreadsheet;
use crate::spreadsheet::SpreadsheetError;
use quick_xml::events::Event;
use quick_xml::name::QName;
use std::borrow::Cow;
use std::collections::HashMap;
use std::io::BufReader;
use zip::read::ZipFile;
use zip::ZipArchive;

// XML tag names for parsing Excel XLSX format
const TAG_CUSTOM_FORMATS: QName = QName(b"numFmts"); // Custom number formats container
const TAG_CUSTOM_FORMAT: QName = QName(b"numFmt");   // Individual custom number format
const TAG_FORMAT_INDEXES: QName = QName(b"cellXfs");  // Cell format indexes container
const TAG_FORMAT_INDEX: QName = QName(b"xf");         // Individual cell format index
const TAG_SHARED_STRING_ITEM: QName = QName(b"si");   // Shared string table item
const TAG_PHONETIC_TEXT: QName = QName(b"rPh");       // Phonetic text for Asian languages
const TAG_TEXT: QName = QName(b"t");                  // Text content within strings
const TAG_WORKBOOK_PROPERTIES: QName = QName(b"workbookPr"); // Workbook properties
const TAG_SHEET: QName = QName(b"sheet");             // Worksheet definition
const TAG_ROW: QName = QName(b"row");                 // Row in worksheet
const TAG_CELL: QName = QName(b"c");                  // Cell in worksheet
const TAG_INLINE_STRING: QName = QName(b"is");        // Inline string value
const TAG_VALUE: QName = QName(b"v");                 // Cell value content

/// Represents an Excel XLSX spreadsheet file
pub(crate) struct XlsxSpreadsheet {
    /// Source name of the spreadsheet
    name: String,
    /// ZIP archive containing the XLSX parts
    zip: ZipArchive<UnifiedReader>,
    /// Cell type implied by each cell style
    number_formats: Vec<CellType>,
    /// Worksheets as (name, zip_path) pairs in workbook order
    sheets: Vec<(String, String)>,
    /// Shared string table, loaded with the first sheet
    shared_strings: Option<Vec<String>>,
}

impl XlsxSpreadsheet {
    /// Opens an XLSX archive and parses its workbook structure
    ///
    /// # Arguments
    /// * `name` - Source name used in diagnostics
    /// * `reader` - Reader positioned at the start of the archive
    pub(crate) fn open(name: &str, reader: UnifiedReader) -> Result<XlsxSpreadsheet, RustyTimetableError> {
        let mut zip = ZipArchive::new(reader)?;
        let (sheets, is_1904) = load_workbook(&mut zip)?;
        if sheets.is_empty() {
            Err(SpreadsheetError::SpreadsheetEmptyError(name.to_owned()))?
        }
        let number_formats = load_number_formats(&mut zip, is_1904).with_prefix(name)?;
        Ok(XlsxSpreadsheet {
            name: name.to_owned(),
            zip,
            number_formats,
            sheets,
            shared_strings: None,
        })
    }
}

impl Spreadsheet for XlsxSpreadsheet {
    fn name(&self) -> String {
        self.name.to_owned()
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.to_owned()).collect()
    }

    /// Reads a worksheet part into sparse cells.
    ///
    /// Shared-string cells are resolved against the shared string table and
    /// error cells (`#N/A`, `#REF!`, ...) are dropped.
    fn read_sheet(&mut self, sheet_name: &str) -> Result<Sheet, RustyTimetableError> {
        let zip_path = self.sheets.iter()
            .find(|(name, _)| name == sheet_name)
            .map(|(_, zip_path)| zip_path.to_owned())
            .ok_or_else(|| SpreadsheetError::SheetNotFound {
                file: self.name.to_owned(),
                sheet: sheet_name.to_owned(),
            })?;
        if self.shared_strings.is_none() {
            self.shared_strings = Some(load_shared_strings(&mut self.zip).with_prefix(&self.name)?);
        }
        let shared_strings: &[String] = self.shared_strings.as_deref().unwrap_or(&[]);

        let mut sheet = Sheet::new(&self.name, sheet_name);
        let mut row = 0usize;
        let mut col = 0usize;
        let mut next_row = 0usize;
        let mut next_col = 0usize;
        let mut kind = CellType::default();
        let mut is_shared = false;
        let mut value = String::new();
        let mut reader = self.zip.xml_reader(&zip_path)?
            .ok_or_else(|| SpreadsheetError::FileError(zip_path.to_owned()))?;
        match_xml_events!(reader => {
            Event::Start(event) if event.name() == TAG_ROW => {
                row = event.parse_attribute_value::<usize>("r")?
                    .filter(|number| *number > 0)
                    .map(|number| number - 1)
                    .unwrap_or(next_row);
                next_row = row + 1;
                next_col = 0;
            }
            Event::Start(event) if event.name() == TAG_CELL => {
                (row, col) = event.get_attribute_value("r")?
                    .and_then(|reference| reference_to_index(&reference))
                    .unwrap_or((row, next_col));
                next_col = col + 1;
                value.clear();
                is_shared = false;
                kind = match event.get_attribute_value("t")?.as_deref() {
                    Some("inlineStr") | Some("str") => CellType::InlineString,
                    Some("s") => {
                        is_shared = true;
                        CellType::InlineString
                    }
                    Some("d") => CellType::IsoDateTime,
                    Some("b") => CellType::Boolean,
                    Some("e") => CellType::Error,
                    _ => CellType::Number,
                };
                if kind == CellType::Number {
                    if let Some(style) = event.parse_attribute_value::<usize>("s")? {
                        kind = self.number_formats.get(style).copied().unwrap_or(CellType::Number);
                    }
                }
            }
            Event::Start(event) if kind != CellType::Empty && event.name() == TAG_INLINE_STRING => {
                value = read_string_value(&mut reader, TAG_INLINE_STRING, false)?;
            }
            Event::Start(event) if kind != CellType::Empty && event.name() == TAG_VALUE => {
                value = read_string_value(&mut reader, TAG_VALUE, true)?;
            }
            Event::End(event) if event.name() == TAG_CELL => {
                if kind == CellType::Error {
                    tracing::debug!(sheet = sheet_name, cell = %index_to_reference(row, col), value = %value, "skip error cell");
                } else if kind != CellType::Empty && !value.is_empty() {
                    let text = if is_shared {
                        let index = value.trim().parse::<usize>()?;
                        shared_strings.get(index).cloned().unwrap_or_default()
                    } else {
                        value.to_owned()
                    };
                    if !text.is_empty() {
                        sheet.push(Cell { row, col, kind, value: text });
                    }
                }
                kind = CellType::Empty;
            }
        });
        Ok(sheet)
    }
}

/// Loads the worksheet names in workbook order and the date system
///
/// # Returns
/// Tuple of (worksheets, is_1904_date_system) where worksheets are (name, zip_path) pairs
fn load_workbook(zip: &mut ZipArchive<UnifiedReader>) -> Result<(Vec<(String, String)>, bool), RustyTimetableError> {
    let relationships = load_relationships(zip, "xl/_rels/workbook.xml.rels")?;
    let mut reader = zip.xml_reader("xl/workbook.xml")?
        .ok_or_else(|| SpreadsheetError::FileError("xl/workbook.xml".to_string()))?;
    let mut sheets: Vec<(String, String)> = Vec::new();
    let mut is_1904 = false;
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHEET => {
            let mut name = None::<Cow<str>>;
            let mut id = None::<Cow<str>>;
            for result in event.attributes() {
                let attribute = result?;
                // The relationship id lives in the `r:` namespace
                let key = attribute.key.local_name();
                if key.as_ref() == b"name" {
                    name = Some(attribute.get_value()?);
                } else if key.as_ref() == b"id" {
                    id = Some(attribute.get_value()?);
                }
            }
            if let Some((name, id)) = name.zip(id) {
                if let Some(path) = relationships.get(&*id) {
                    sheets.push((name.to_string(), path.to_owned()));
                }
            }
        }
        Event::Start(event) if event.name() == TAG_WORKBOOK_PROPERTIES => {
            is_1904 = event.get_attribute_value("date1904")?
                .map(|value| value == "1" || value == "true")
                .unwrap_or(false);
        }
    });
    Ok((sheets, is_1904))
}

/// Loads the shared string table; workbooks without one have no shared strings
fn load_shared_strings(zip: &mut ZipArchive<UnifiedReader>) -> Result<Vec<String>, RustyTimetableError> {
    let mut shared_strings = Vec::<String>::new();
    let mut reader = match zip.xml_reader("xl/sharedStrings.xml")? {
        Some(reader) => reader,
        None => return Ok(shared_strings),
    };
    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_SHARED_STRING_ITEM => {
            shared_strings.push(read_string_value(&mut reader, TAG_SHARED_STRING_ITEM, false)?);
        }
    });
    Ok(shared_strings)
}

/// Loads the cell type implied by each cell style in `xl/styles.xml`
fn load_number_formats(zip: &mut ZipArchive<UnifiedReader>, is_1904: bool) -> Result<Vec<CellType>, RustyTimetableError> {
    let mut reader = match zip.xml_reader("xl/styles.xml")? {
        Some(reader) => reader,
        None => return Ok(Vec::new()),
    };

    let mut custom_formats_context = false;
    let mut custom_formats = HashMap::<String, CellType>::new();
    let mut format_indexes_context = false;
    let mut format_indexes = Vec::<String>::new();

    match_xml_events!(reader => {
        Event::Start(event) if event.name() == TAG_CUSTOM_FORMATS => custom_formats_context = true,
        Event::End(event) if event.name() == TAG_CUSTOM_FORMATS => custom_formats_context = false,
        Event::Start(event) if custom_formats_context && event.name() == TAG_CUSTOM_FORMAT => {
            let id = event.get_attribute_value("numFmtId")?;
            let format = event.get_attribute_value("formatCode")?;
            if let Some((id, format)) = id.zip(format) {
                custom_formats.insert(id.to_string(), CellType::parse_custom_number_format(&format, is_1904));
            }
        }
        Event::Start(event) if event.name() == TAG_FORMAT_INDEXES => format_indexes_context = true,
        Event::End(event) if event.name() == TAG_FORMAT_INDEXES => break,
        Event::Start(event) if format_indexes_context && event.name() == TAG_FORMAT_INDEX => {
            let id = event.get_attribute_value("numFmtId")?;
            format_indexes.push(id.map(|id| id.to_string()).unwrap_or_else(|| "0".to_owned()));
        }
    });

    Ok(excel::load_number_formats(format_indexes, custom_formats, is_1904))
}

/// Reads the text of a string element, skipping phonetic annotations
///
/// # Arguments
/// * `reader` - XML reader positioned just after the opening tag
/// * `end_tag` - XML tag that closes the string content
/// * `is_text_content` - Whether text directly inside the element counts (true for `<v>`)
fn read_string_value(
    reader: &mut XmlReader<BufReader<ZipFile<'_, UnifiedReader>>>,
    end_tag: QName,
    is_text_content: bool,
) -> Result<String, RustyTimetableError> {
    let mut is_phonetic_text = false;
    let mut is_text = is_text_content;
    let mut text = String::new();
    match_xml_events!(reader => {
        Event::End(event) if event.name() == end_tag => break,
        Event::Start(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = true,
        Event::End(event) if event.name() == TAG_PHONETIC_TEXT => is_phonetic_text = false,
        Event::Start(event) if !is_phonetic_text && event.name() == TAG_TEXT => is_text = true,
        Event::End(event) if is_text && event.name() == TAG_TEXT => is_text = is_text_content,
        Event::Text(event) if is_text => text.push_bytes_text(&event)?,
        Event::CData(event) if is_text => text.push_str(&event.xml_content()?),
        Event::GeneralRef(event) if is_text => text.push_bytes_ref(&event)?,
    });
    Ok(text)
}
