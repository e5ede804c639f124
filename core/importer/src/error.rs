//! FILENAME: core/importer/src/error.rs

use thiserror::Error;

/// Fatal import failures. Per-file extraction problems are not errors at
/// this level; they degrade to WARN/SKIP entries in the import report.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The registry sheet has no row carrying both the "№" and "ИНН"
    /// header markers within the scan window. Nothing can be merged
    /// without knowing the column positions, so the batch aborts before
    /// any write.
    #[error("Не найден заголовок в реестре.")]
    HeaderNotFound,

    /// Reading or writing the registry workbook failed.
    #[error(transparent)]
    Workbook(#[from] persistence::PersistenceError),
}
