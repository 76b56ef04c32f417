use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::sheet::Sheet;

/// One row of a raw table.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRow {
    /// Zero-based row index in the sheet
    pub sheet_row: usize,
    pub cells: Vec<Option<CellValue>>,
}

/// A sheet materialized as a rectangular grid anchored at A1.
#[derive(Clone, Debug, PartialEq)]
pub struct RawTable {
    /// Name of the sheet the table was read from
    pub sheet: String,
    /// Number of cells in every row
    pub width: usize,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    /// Builds a table from rows of cells, padding short rows with absent cells.
    /// Row `i` of the input is sheet row `i`.
    pub fn from_rows(sheet: &str, rows: Vec<Vec<Option<CellValue>>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(sheet_row, mut cells)| {
                cells.resize(width, None);
                RawRow { sheet_row, cells }
            })
            .collect();
        Self {
            sheet: sheet.to_owned(),
            width,
            rows,
        }
    }

    pub(crate) fn from_sheet(sheet: &Sheet) -> Self {
        Self::from_rows(&sheet.name, sheet.to_grid())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
