use crate::spreadsheet::cell::CellValue;
use crate::timetable::columns::MappedRow;
use crate::timetable::columns::MappedTable;

/// A data row with a time cell, projected to the five semantic columns.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedRow {
    /// Zero-based row index in the sheet
    pub sheet_row: usize,
    pub day: Option<CellValue>,
    pub time: CellValue,
    pub subject: Option<CellValue>,
    pub teacher: Option<CellValue>,
    pub room: Option<CellValue>,
}

/// Forward-fills Day, Teacher, Subject and Room, then keeps the rows that
/// have a time, in order.
pub fn normalize(mapped: MappedTable) -> Vec<NormalizedRow> {
    let mut rows = mapped.rows;
    forward_fill(&mut rows);
    rows.into_iter()
        .filter_map(|row| {
            let time = row.time?;
            Some(NormalizedRow {
                sheet_row: row.sheet_row,
                day: row.day,
                time,
                subject: row.subject,
                teacher: row.teacher,
                room: row.room,
            })
        })
        .collect()
}

/// Replaces absent Day, Teacher, Subject and Room cells with the last value
/// seen above them. Each column is filled independently; Time is never filled.
pub fn forward_fill(rows: &mut [MappedRow]) {
    let mut day = None;
    let mut teacher = None;
    let mut subject = None;
    let mut room = None;
    for row in rows.iter_mut() {
        fill(&mut row.day, &mut day);
        fill(&mut row.teacher, &mut teacher);
        fill(&mut row.subject, &mut subject);
        fill(&mut row.room, &mut room);
    }
}

fn fill(cell: &mut Option<CellValue>, last: &mut Option<CellValue>) {
    match cell {
        None => cell.clone_from(last),
        Some(value) => *last = Some(value.clone()),
    }
}
