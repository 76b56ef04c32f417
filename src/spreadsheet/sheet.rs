use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::cell::CellValue;

/// Represents a sheet read from a spreadsheet file.
/// Cells are stored sparsely in the order they were read (row-major).
#[derive(Debug)]
pub(crate) struct Sheet {
    /// Source file name
    pub(crate) file_name: String,
    /// Sheet name
    pub(crate) name: String,
    /// All non-empty cells in the sheet
    pub(crate) cells: Vec<Cell>,
    /// Largest row index holding a cell
    pub(crate) row_upper_bound: Option<usize>,
    /// Largest column index holding a cell
    pub(crate) col_upper_bound: Option<usize>,
}

impl Sheet {
    pub(crate) fn new(file_name: &str, name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            cells: Vec::new(),
            row_upper_bound: None,
            col_upper_bound: None,
        }
    }

    /// Returns true if the sheet contains no cells.
    pub(crate) fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Adds a cell to the sheet, widening the bounds.
    pub(crate) fn push(&mut self, cell: Cell) {
        self.row_upper_bound = Some(self.row_upper_bound.map_or(cell.row, |row| row.max(cell.row)));
        self.col_upper_bound = Some(self.col_upper_bound.map_or(cell.col, |col| col.max(cell.col)));
        self.cells.push(cell);
    }

    /// Lays the cells out as a dense grid anchored at A1.
    ///
    /// Every row has the same width (the widest used column); cells without a
    /// value are `None`. Trailing rows without cells are not materialized.
    pub(crate) fn to_grid(&self) -> Vec<Vec<Option<CellValue>>> {
        let (Some(row_upper), Some(col_upper)) = (self.row_upper_bound, self.col_upper_bound) else {
            return Vec::new();
        };
        let mut grid = vec![vec![None; col_upper + 1]; row_upper + 1];
        for cell in &self.cells {
            grid[cell.row][cell.col] = cell.to_value();
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spreadsheet::cell::CellType;

    fn push(sheet: &mut Sheet, row: usize, col: usize, value: &str) {
        sheet.push(Cell {
            row,
            col,
            kind: CellType::InlineString,
            value: value.to_owned(),
        });
    }

    #[test]
    fn sheet_initial() {
        let sheet = Sheet::new("timetable.xlsx", "ИС 1ао");
        assert!(sheet.is_empty());
        assert_eq!(sheet.row_upper_bound, None);
        assert_eq!(sheet.col_upper_bound, None);
        assert!(sheet.to_grid().is_empty());
    }

    #[test]
    fn sheet_update() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 1, 1, "a");
        push(&mut sheet, 1, 3, "b");
        push(&mut sheet, 3, 2, "c");

        assert_eq!(sheet.cells.len(), 3);
        assert_eq!(sheet.row_upper_bound, Some(3));
        assert_eq!(sheet.col_upper_bound, Some(3));
    }

    #[test]
    fn sheet_grid_is_rectangular_from_a1() {
        let mut sheet = Sheet::new("", "");
        push(&mut sheet, 1, 1, "a");
        push(&mut sheet, 2, 3, "b");

        let grid = sheet.to_grid();
        assert_eq!(grid.len(), 3);
        assert!(grid.iter().all(|row| row.len() == 4));
        assert_eq!(grid[0], vec![None, None, None, None]);
        assert_eq!(grid[1][1], Some(CellValue::Text("a".to_owned())));
        assert_eq!(grid[2][3], Some(CellValue::Text("b".to_owned())));
    }
}
