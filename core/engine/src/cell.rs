//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the value type held by a single spreadsheet cell.
//! CONTEXT: Questionnaire and registry sheets are read as raw value grids.
//! No formulas or styles are carried; only the data matters for extraction
//! and merging.

use serde::{Deserialize, Serialize};

/// Represents the raw data within a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    /// An error marker read from the source workbook (e.g. a #DIV/0! cell).
    Error(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Returns the display value of the cell as a String.
    /// Numbers without a fractional part render without decimals, so a tax
    /// ID stored as `7712345678.0` comes back as `"7712345678"`.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
            CellValue::Error(e) => e.clone(),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        CellValue::Text(text)
    }
}

impl From<f64> for CellValue {
    fn from(num: f64) -> Self {
        CellValue::Number(num)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}
