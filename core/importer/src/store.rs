//! FILENAME: core/importer/src/store.rs
//! PURPOSE: Workbook access seam for the batch orchestrator.
//! CONTEXT: The orchestrator only needs "read a named sheet as a grid" and
//! "overwrite a named sheet with a grid". Production uses the XLSX-backed
//! store; tests supply an in-memory implementation.

use engine::Grid;
use persistence::PersistenceError;
use std::path::Path;

pub trait WorkbookStore {
    fn read_sheet(&self, path: &Path, sheet: &str) -> Result<Grid, PersistenceError>;

    /// Replaces the workbook at `path` with one holding the single named
    /// sheet. The registry tool has always rewritten the whole file.
    fn write_sheet(&self, path: &Path, sheet: &str, grid: &Grid) -> Result<(), PersistenceError>;
}

/// Store backed by real XLSX files on disk.
#[derive(Debug, Default)]
pub struct XlsxStore;

impl WorkbookStore for XlsxStore {
    fn read_sheet(&self, path: &Path, sheet: &str) -> Result<Grid, PersistenceError> {
        persistence::load_sheet(path, sheet)
    }

    fn write_sheet(&self, path: &Path, sheet: &str, grid: &Grid) -> Result<(), PersistenceError> {
        persistence::save_sheet(path, sheet, grid)
    }
}
