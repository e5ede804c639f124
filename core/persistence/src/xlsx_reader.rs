//! FILENAME: core/persistence/src/xlsx_reader.rs

use crate::PersistenceError;
use calamine::{open_workbook, Data, Reader, Xlsx};
use engine::{CellValue, Grid};
use std::path::Path;

/// Reads one named sheet of an XLSX workbook into a value grid.
/// Fails with `SheetNotFound` when the workbook has no sheet of that name.
pub fn load_sheet(path: &Path, sheet_name: &str) -> Result<Grid, PersistenceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;

    if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
        return Err(PersistenceError::SheetNotFound(sheet_name.to_string()));
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| PersistenceError::InvalidFormat(e.to_string()))?;

    // The range may not start at A1; offset so grid coordinates stay
    // absolute sheet coordinates (the capacity block B5:E29 depends on it).
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    let mut grid = Grid::new();
    for (row_idx, row) in range.rows().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let value = match cell {
                Data::Empty => continue,
                Data::String(s) => CellValue::Text(s.clone()),
                Data::Float(f) => CellValue::Number(*f),
                Data::Int(i) => CellValue::Number(*i as f64),
                Data::Bool(b) => CellValue::Boolean(*b),
                Data::Error(e) => CellValue::Error(format!("{:?}", e)),
                Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
                Data::DateTimeIso(s) => CellValue::Text(s.clone()),
                Data::DurationIso(s) => CellValue::Text(s.clone()),
            };

            grid.set_cell(start_row + row_idx as u32, start_col + col_idx as u32, value);
        }
    }

    Ok(grid)
}
