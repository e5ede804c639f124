//! FILENAME: core/persistence/src/lib.rs
//! Persistence Module
//!
//! Handles reading and writing workbook sheets as value grids in XLSX
//! format. The importer addresses sheets by name and rewrites exactly one,
//! so the API is sheet-oriented rather than workbook-oriented.

mod error;
mod xlsx_reader;
mod xlsx_writer;

pub use error::PersistenceError;
pub use xlsx_reader::load_sheet;
pub use xlsx_writer::save_sheet;
