//! FILENAME: core/importer/src/batch.rs
//! PURPOSE: Drives the per-file extraction pipeline and the single registry
//! merge at the end of a batch.
//! CONTEXT: Files are processed strictly in the order supplied. Per-file
//! problems degrade to SKIP/WARN entries and processing continues; registry
//! problems abort the run before anything is written. The registry is read
//! once and rewritten at most once.

use crate::capacity::has_capacity;
use crate::categories::{extract_category_pairs, CategoryGroupPair};
use crate::error::ImportError;
use crate::fields::extract_form_fields;
use crate::registry::Registry;
use crate::report::LogEntry;
use crate::store::WorkbookStore;
use crate::{SHEET_CAPACITY, SHEET_CATEGORIES, SHEET_FORM, SHEET_REGISTRY};
use log::debug;
use std::path::{Path, PathBuf};

/// Filenames starting with this word are assumed to be the registry itself
/// and are never imported.
const REGISTRY_NAME_PREFIX: &str = "реестр";

/// Outcome of one batch run: the structured log, the registry location when
/// it was rewritten, and the number of rows merged in.
#[derive(Debug)]
pub struct ImportReport {
    pub entries: Vec<LogEntry>,
    pub updated_registry: Option<PathBuf>,
    pub rows_added: usize,
}

/// Imports every questionnaire in `files` into the registry at
/// `registry_path`. The registry is rewritten once at the end, and only
/// when at least one row was generated.
pub fn run_import<S: WorkbookStore>(
    store: &S,
    files: &[PathBuf],
    registry_path: &Path,
    fallback_groups: &[String],
) -> Result<ImportReport, ImportError> {
    let registry_grid = store.read_sheet(registry_path, SHEET_REGISTRY)?;
    let mut registry = Registry::from_grid(&registry_grid)?;

    let mut entries = Vec::new();

    for file in files {
        let name = file_name(file);

        if !has_xlsx_extension(file) {
            entries.push(LogEntry::skip(&name, "не .xlsx"));
            continue;
        }
        if name.to_lowercase().starts_with(REGISTRY_NAME_PREFIX) {
            entries.push(LogEntry::skip(&name, "похоже на реестр, пропускаю"));
            continue;
        }

        // A questionnaire without a readable form sheet yields no row at
        // all; the other two sheets are optional.
        let fields = match store.read_sheet(file, SHEET_FORM) {
            Ok(grid) => extract_form_fields(&grid),
            Err(e) => {
                entries.push(LogEntry::warn(&name, format!("ошибка чтения анкеты: {}", e)));
                continue;
            }
        };

        let mut pairs = match store.read_sheet(file, SHEET_CATEGORIES) {
            Ok(grid) => extract_category_pairs(&grid, fallback_groups),
            Err(e) => {
                entries.push(LogEntry::warn(&name, format!("ошибка чтения ТК/ТГ: {}", e)));
                Vec::new()
            }
        };
        if pairs.is_empty() {
            pairs.push(CategoryGroupPair::empty());
        }

        let warehouse = store
            .read_sheet(file, SHEET_CAPACITY)
            .map(|grid| has_capacity(&grid))
            .unwrap_or(false);

        for pair in &pairs {
            registry.append_entry(&fields, pair, warehouse);
        }
        debug!("{}: {} pair(s), warehouse={}", name, pairs.len(), warehouse);
        entries.push(LogEntry::ok(&name, format!("строк добавлено — {}", pairs.len())));
    }

    let rows_added = registry.appended_rows();
    if rows_added == 0 {
        entries.push(LogEntry::note("Новые строки не добавлены."));
        return Ok(ImportReport {
            entries,
            updated_registry: None,
            rows_added: 0,
        });
    }

    store.write_sheet(registry_path, SHEET_REGISTRY, &registry.into_grid())?;
    entries.push(LogEntry::note(format!(
        "Готово: обновлён файл {}",
        registry_path.display()
    )));

    Ok(ImportReport {
        entries,
        updated_registry: Some(registry_path.to_path_buf()),
        rows_added,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn has_xlsx_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false)
}
