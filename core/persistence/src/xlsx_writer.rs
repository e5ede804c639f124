//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::PersistenceError;
use engine::{CellValue, Grid};
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use std::path::Path;

/// Writes a value grid into a workbook holding the single named sheet,
/// replacing whatever file was at `path`. Values only; no styling.
pub fn save_sheet(path: &Path, sheet_name: &str, grid: &Grid) -> Result<(), PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();

    let worksheet = xlsx.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for ((row, col), value) in &grid.cells {
        match value {
            CellValue::Empty => {}
            CellValue::Number(n) => {
                worksheet.write_number(*row, *col as u16, *n)?;
            }
            CellValue::Text(s) => {
                worksheet.write_string(*row, *col as u16, s)?;
            }
            CellValue::Boolean(b) => {
                worksheet.write_boolean(*row, *col as u16, *b)?;
            }
            CellValue::Error(_) => {
                worksheet.write_string(*row, *col as u16, "#ERROR!")?;
            }
        }
    }

    xlsx.save(path)?;
    Ok(())
}
