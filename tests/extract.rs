use rusty_timetable::config::ConfigError;
use rusty_timetable::spreadsheet::SpreadsheetError;
use rusty_timetable::timetable::resolver::resolve;
use rusty_timetable::timetable::resolver::Resolution;
use rusty_timetable::timetable::FaultKind;
use rusty_timetable::timetable::LayoutError;
use rusty_timetable::timetable::RowFault;
use rusty_timetable::Format;
use rusty_timetable::RustyTimetableError;
use rusty_timetable::ScheduleScraper;
use rusty_timetable::Source;
use rusty_timetable::TimetableConfig;
use rusty_timetable::Weekday;
use std::fs::File;
use std::io::Cursor;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

type Rows = Vec<Vec<&'static str>>;

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn column_name(mut col: usize) -> String {
    let mut name = String::new();
    loop {
        name.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            return name;
        }
        col = col / 26 - 1;
    }
}

fn write_parts<W: Write + Seek>(writer: W, parts: &[(String, String)]) -> W {
    let mut zip = ZipWriter::new(writer);
    for (name, content) in parts {
        zip.start_file(name.as_str(), SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap()
}

/// Workbook parts with inline strings; cells that parse as numbers are stored as numbers.
fn xlsx_parts(sheets: &[(&str, Rows)]) -> Vec<(String, String)> {
    let mut workbook = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    let mut relationships = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    let mut parts = Vec::new();
    for (index, (name, rows)) in sheets.iter().enumerate() {
        let number = index + 1;
        workbook.push_str(&format!(r#"<sheet name="{}" sheetId="{number}" r:id="rId{number}"/>"#, escape(name)));
        relationships.push_str(&format!(
            r#"<Relationship Id="rId{number}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{number}.xml"/>"#
        ));
        let mut sheet = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
        );
        for (row, cells) in rows.iter().enumerate() {
            sheet.push_str(&format!(r#"<row r="{}">"#, row + 1));
            for (col, value) in cells.iter().enumerate().filter(|(_, value)| !value.is_empty()) {
                let reference = format!("{}{}", column_name(col), row + 1);
                if value.parse::<f64>().is_ok() {
                    sheet.push_str(&format!(r#"<c r="{reference}"><v>{value}</v></c>"#));
                } else {
                    sheet.push_str(&format!(r#"<c r="{reference}" t="inlineStr"><is><t>{}</t></is></c>"#, escape(value)));
                }
            }
            sheet.push_str("</row>");
        }
        sheet.push_str("</sheetData></worksheet>");
        parts.push((format!("xl/worksheets/sheet{number}.xml"), sheet));
    }
    workbook.push_str("</sheets></workbook>");
    relationships.push_str("</Relationships>");
    parts.push(("xl/workbook.xml".to_owned(), workbook));
    parts.push(("xl/_rels/workbook.xml.rels".to_owned(), relationships));
    parts
}

fn ods_parts(sheets: &[(&str, Rows)]) -> Vec<(String, String)> {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"><office:body><office:spreadsheet>"#,
    );
    for (name, rows) in sheets {
        content.push_str(&format!(r#"<table:table table:name="{}">"#, escape(name)));
        for cells in rows {
            content.push_str("<table:table-row>");
            for value in cells {
                if value.is_empty() {
                    content.push_str("<table:table-cell/>");
                } else if value.parse::<f64>().is_ok() {
                    content.push_str(&format!(
                        r#"<table:table-cell office:value-type="float" office:value="{value}"><text:p>{value}</text:p></table:table-cell>"#
                    ));
                } else {
                    content.push_str(&format!(
                        r#"<table:table-cell office:value-type="string"><text:p>{}</text:p></table:table-cell>"#,
                        escape(value)
                    ));
                }
            }
            content.push_str("</table:table-row>");
        }
        content.push_str("</table:table>");
    }
    content.push_str("</office:spreadsheet></office:body></office:document-content>");
    vec![
        ("mimetype".to_owned(), "application/vnd.oasis.opendocument.spreadsheet".to_owned()),
        ("content.xml".to_owned(), content),
    ]
}

fn write_xlsx(dir: &TempDir, file_name: &str, sheets: &[(&str, Rows)]) -> PathBuf {
    let path = dir.path().join(file_name);
    write_parts(File::create(&path).unwrap(), &xlsx_parts(sheets));
    path
}

fn write_ods(dir: &TempDir, file_name: &str, sheets: &[(&str, Rows)]) -> PathBuf {
    let path = dir.path().join(file_name);
    write_parts(File::create(&path).unwrap(), &ods_parts(sheets));
    path
}

/// The producer template: a label row, the banner and the header row at data offset 11.
fn template() -> Rows {
    let mut rows: Rows = vec![vec![""; 6]; 13];
    rows[0] = vec!["", "", "", "", "", ""];
    rows[1][1] = "Университет";
    rows[3][1] = "РАСПИСАНИЕ ЗАНЯТИЙ";
    rows[12] = vec!["", "Дни", "Время", "Пән", "Оқытушы", "Аудитория"];
    rows
}

fn timetable(lessons: Rows) -> Rows {
    let mut rows = template();
    rows.extend(lessons);
    rows
}

fn monday_block() -> Rows {
    timetable(vec![
        vec!["", "Дүйсенбі", "9.00 - 9.50", "Algebra", "Ivanov", "204"],
        vec!["", "", "10.00 - 10.50", "", "", ""],
    ])
}

#[test]
fn test_discovery_order() {
    let dir = TempDir::new().unwrap();
    let xlsx = write_xlsx(&dir, "timetable.xlsx", &[("A", monday_block()), ("B", template())]);
    let ods = write_ods(&dir, "timetable.ods", &[("A", monday_block()), ("B", template())]);
    for path in [xlsx, ods] {
        let scraper = ScheduleScraper::new(path.as_path());
        assert_eq!(scraper.sheet_names().unwrap(), vec!["A", "B"]);
        assert_eq!(
            resolve(&Source::from(path.as_path()), None).unwrap(),
            Resolution::Sheets(vec!["A".to_owned(), "B".to_owned()])
        );
    }
}

#[test]
fn test_sheet_filter() {
    let dir = TempDir::new().unwrap();
    let path = write_xlsx(&dir, "timetable.xlsx", &[("ИС 1ао", template()), ("ВТ 2", template()), ("ИС 2ао", template())]);
    let scraper = ScheduleScraper::new(path.as_path());
    assert_eq!(scraper.sheet_names_matching("ИС*").unwrap(), vec!["ИС 1ао", "ИС 2ао"]);
    assert!(matches!(scraper.sheet_names_matching("[ИС"), Err(RustyTimetableError::PatternError(_))));
}

#[test]
fn test_monday_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = write_xlsx(&dir, "timetable.xlsx", &[("ИС 1ао", monday_block())]);
    let extraction = ScheduleScraper::new(path.as_path()).extract("ИС 1ао").unwrap();

    assert_eq!(extraction.sheet, "ИС 1ао");
    assert!(extraction.faults.is_empty());
    assert_eq!(extraction.records.len(), 2);
    let [first, second] = [&extraction.records[0], &extraction.records[1]];
    assert_eq!(first.day(), Weekday::Monday);
    assert_eq!(first.time(), "9.00 - 9.50");
    assert_eq!(first.subject(), Some("Algebra"));
    assert_eq!(first.teacher(), Some("Ivanov"));
    assert_eq!(first.room(), Some("204"));
    assert_eq!(second.day(), Weekday::Monday);
    assert_eq!(second.time(), "10.00 - 10.50");
    assert_eq!(second.subject(), Some("Algebra"));
    assert_eq!(second.teacher(), Some("Ivanov"));
    assert_eq!(second.room(), Some("204"));

    let json = serde_json::to_value(&extraction.records).unwrap();
    assert_eq!(
        json[1],
        serde_json::json!({"Day": "Monday", "Time": "10.00 - 10.50", "Subject": "Algebra", "Teacher": "Ivanov", "Room": "204"})
    );
}

#[test]
fn test_five_column_sheet() {
    let mut rows: Rows = template().into_iter().map(|row| row[1..].to_vec()).collect();
    rows.push(vec!["Бейсенбі", "8.00-8.50", "History", "Sadykova", "310"]);
    rows.push(vec!["", "", "", "", ""]);
    rows.push(vec!["", "9.00-9.50", "", "", "311"]);
    let dir = TempDir::new().unwrap();
    let path = write_xlsx(&dir, "timetable.xlsx", &[("ВТ 2", rows)]);
    let extraction = ScheduleScraper::new(path.as_path()).extract("ВТ 2").unwrap();

    assert_eq!(extraction.records.len(), 2);
    assert!(extraction.records.iter().all(|record| record.day() == Weekday::Thursday));
    assert_eq!(extraction.records[1].subject(), Some("History"));
    assert_eq!(extraction.records[1].room(), Some("311"));
}

#[test]
fn test_colon_time_excluded() {
    let dir = TempDir::new().unwrap();
    let rows = timetable(vec![
        vec!["", "Сейсенбі", "09:00-09:50", "Algebra", "Ivanov", "204"],
        vec!["", "", "10.00-10.50", "Physics", "", ""],
    ]);
    let path = write_xlsx(&dir, "timetable.xlsx", &[("A", rows)]);
    let extraction = ScheduleScraper::new(path.as_path()).extract("A").unwrap();

    assert!(extraction.faults.is_empty());
    assert_eq!(extraction.records.len(), 1);
    assert_eq!(extraction.records[0].time(), "10.00-10.50");
    assert_eq!(extraction.records[0].day(), Weekday::Tuesday);
}

#[test]
fn test_unknown_day_is_isolated_fault() {
    let dir = TempDir::new().unwrap();
    let rows = timetable(vec![
        vec!["", "Сәрсенбі", "9.00-9.50", "Algebra", "Ivanov", "204"],
        vec!["", "Zzzday", "10.00-10.50", "Physics", "Petrov", "205"],
        vec!["", "Жұма", "11.00-11.50", "Chemistry", "Sidorov", "206"],
    ]);
    let path = write_xlsx(&dir, "timetable.xlsx", &[("A", rows)]);
    let extraction = ScheduleScraper::new(path.as_path()).extract("A").unwrap();

    let days: Vec<_> = extraction.records.iter().map(|record| record.day()).collect();
    assert_eq!(days, vec![Weekday::Wednesday, Weekday::Friday]);
    assert_eq!(
        extraction.faults,
        vec![RowFault {
            row: 15,
            kind: FaultKind::UnknownDayToken { token: "Zzzday".to_owned() }
        }]
    );
}

#[test]
fn test_sheet_not_found() {
    let dir = TempDir::new().unwrap();
    let path = write_xlsx(&dir, "timetable.xlsx", &[("A", template())]);
    let error = ScheduleScraper::new(path.as_path()).extract("Missing").unwrap_err();
    match error.as_spreadsheet_error() {
        Some(SpreadsheetError::SheetNotFound { file, sheet }) => {
            assert_eq!(file, &path.display().to_string());
            assert_eq!(sheet, "Missing");
        }
        _ => panic!("expected SheetNotFound, got {:?}", error),
    }
    assert_eq!(error.to_string(), format!("Sheet name \"Missing\" not found in \"{}\"", path.display()));
}

#[test]
fn test_source_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.xlsx");
    let scraper = ScheduleScraper::new(path.as_path());
    for error in [scraper.sheet_names().unwrap_err(), scraper.extract("A").unwrap_err()] {
        match error {
            RustyTimetableError::SpreadsheetError(SpreadsheetError::SourceNotFound(name)) => {
                assert_eq!(name, path.display().to_string())
            }
            other => panic!("expected SourceNotFound, got {:?}", other),
        }
    }
}

#[test]
fn test_short_sheet_shape_fault() {
    let dir = TempDir::new().unwrap();
    let rows: Rows = template().into_iter().take(8).collect();
    let path = write_xlsx(&dir, "timetable.xlsx", &[("A", rows)]);
    match ScheduleScraper::new(path.as_path()).extract("A") {
        Err(RustyTimetableError::LayoutError(LayoutError::MalformedSheetShape { sheet, required, .. })) => {
            assert_eq!(sheet, "A");
            assert_eq!(required, 12);
        }
        other => panic!("expected MalformedSheetShape, got {:?}", other),
    }
}

#[test]
fn test_ods_extraction() {
    let dir = TempDir::new().unwrap();
    let path = write_ods(&dir, "timetable.ods", &[("ИС 1ао", monday_block())]);
    let extraction = ScheduleScraper::new(path.as_path()).extract("ИС 1ао").unwrap();

    assert_eq!(extraction.records.len(), 2);
    assert_eq!(extraction.records[1].day(), Weekday::Monday);
    assert_eq!(extraction.records[1].room(), Some("204"));
}

#[test]
fn test_bytes_source() {
    let bytes = write_parts(Cursor::new(Vec::new()), &xlsx_parts(&[("A", monday_block())])).into_inner();
    let source = Source::Bytes {
        name: "upload".to_owned(),
        format: Format::Xlsx,
        bytes,
    };
    let extraction = rusty_timetable::extract(&source, "A", &TimetableConfig::default()).unwrap();
    assert_eq!(extraction.records.len(), 2);
}

#[test]
fn test_extract_speciality() {
    let dir = TempDir::new().unwrap();
    let path = write_xlsx(&dir, "timetable.xlsx", &[("ИС 1ао", monday_block())]);
    let config = TimetableConfig::parse("[specialities]\n\"Information Systems\" = \"ИС 1ао\"\n").unwrap();
    let scraper = ScheduleScraper::with_config(Path::new(&path), config);

    let extraction = scraper.extract_speciality("Information Systems").unwrap();
    assert_eq!(extraction.sheet, "ИС 1ао");
    assert_eq!(extraction.records.len(), 2);
    assert!(matches!(
        scraper.extract_speciality("Law"),
        Err(RustyTimetableError::ConfigError(ConfigError::UnknownSpeciality(_)))
    ));
}
