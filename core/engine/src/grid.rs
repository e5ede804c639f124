//! FILENAME: core/engine/src/grid.rs
//! PURPOSE: Manages the collection of cells of one sheet (the value grid).
//! CONTEXT: This file defines the `Grid` struct which acts as the container
//! for one sheet's data. It uses a sparse storage strategy (HashMap) so
//! loosely filled questionnaire sheets cost only what they contain. Lookups
//! past the edge of the data return an empty value, never an error.

use std::collections::HashMap;

use crate::cell::CellValue;

/// A sheet read as a rectangular, possibly sparse grid of cell values.
/// Row and Col are 0-based indices.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    /// Sparse storage: keys are (row, col), values are cell values.
    pub cells: HashMap<(u32, u32), CellValue>,

    /// Tracks the highest row index currently in use.
    pub max_row: u32,

    /// Tracks the highest column index currently in use.
    pub max_col: u32,
}

impl Grid {
    /// Creates a new, empty Grid.
    pub fn new() -> Self {
        Grid {
            cells: HashMap::new(),
            max_row: 0,
            max_col: 0,
        }
    }

    /// Sets a cell at the specified coordinates.
    /// Empty values are not stored (sparse invariant).
    /// Updates max_row/max_col boundaries automatically.
    pub fn set_cell(&mut self, row: u32, col: u32, value: CellValue) {
        if value.is_empty() {
            return;
        }
        if row > self.max_row {
            self.max_row = row;
        }
        if col > self.max_col {
            self.max_col = col;
        }
        self.cells.insert((row, col), value);
    }

    /// Retrieves a reference to a cell at the specified coordinates.
    /// Returns None if the cell is empty (not stored).
    pub fn get_cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// Missing-cell tolerant lookup: an out-of-range or blank position
    /// yields `CellValue::Empty`.
    pub fn value_at(&self, row: u32, col: u32) -> CellValue {
        self.cells
            .get(&(row, col))
            .cloned()
            .unwrap_or(CellValue::Empty)
    }

    /// Trimmed display text of the cell; empty string for missing cells.
    pub fn text_at(&self, row: u32, col: u32) -> String {
        match self.cells.get(&(row, col)) {
            Some(value) => value.display_value().trim().to_string(),
            None => String::new(),
        }
    }

    /// True when the position holds no value or only whitespace text.
    pub fn is_blank(&self, row: u32, col: u32) -> bool {
        match self.cells.get(&(row, col)) {
            None => true,
            Some(CellValue::Empty) => true,
            Some(CellValue::Text(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }

    /// Number of rows in use; 0 for an empty grid.
    pub fn row_count(&self) -> u32 {
        if self.cells.is_empty() {
            0
        } else {
            self.max_row + 1
        }
    }

    /// Number of columns in use; 0 for an empty grid.
    pub fn col_count(&self) -> u32 {
        if self.cells.is_empty() {
            0
        } else {
            self.max_col + 1
        }
    }

    /// Dense snapshot of every row in order, each sized to the grid width.
    pub fn to_rows(&self) -> Vec<Vec<CellValue>> {
        let width = self.col_count() as usize;
        (0..self.row_count())
            .map(|row| {
                (0..width as u32)
                    .map(|col| self.value_at(row, col))
                    .collect()
            })
            .collect()
    }

    /// Rebuilds a grid from dense rows. Empty cells are not stored.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let mut grid = Grid::new();
        for (row_idx, row) in rows.into_iter().enumerate() {
            for (col_idx, value) in row.into_iter().enumerate() {
                grid.set_cell(row_idx as u32, col_idx as u32, value);
            }
        }
        grid
    }
}
