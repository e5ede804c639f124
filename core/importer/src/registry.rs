//! FILENAME: core/importer/src/registry.rs
//! PURPOSE: Locates the registry table, assigns sequential keys and merges
//! newly generated supplier rows into the grid.
//! CONTEXT: The registry is a hand-maintained workbook with banner rows
//! above the real header. The header row is identified by its "№" and
//! "ИНН" cells and columns are addressed by their exact captions. New rows
//! go directly below the header, ahead of the existing data rows, which is
//! how the registry has historically been kept.

use crate::categories::CategoryGroupPair;
use crate::error::ImportError;
use crate::fields::FormFields;
use engine::{CellValue, Grid};
use log::debug;
use std::collections::HashMap;

/// Header scan window.
const HEADER_SCAN_ROWS: usize = 15;
/// Column holding the sequential key in the data area, independent of
/// where the "№" caption sits.
const KEY_COLUMN: usize = 1;

// Registry column captions, matched by exact text (unlike the fuzzy
// questionnaire matching; the registry layout is under our control).
const COL_SEQ: &str = "№";
const COL_ORG_NAME: &str = "Полное наименование организации:";
const COL_INN: &str = "ИНН:";
const COL_CONTACT: &str = "Контактное лицо:";
const COL_POSITION: &str = "Должность:";
const COL_PHONE: &str = "Телефон";
const COL_EMAIL: &str = "E-mail:";
const COL_TAX_REGIME: &str = "Система налогообложения: указать с НДС или без НДС";
const COL_REGION: &str = "Регион (Астрахань/Екатеринбург)";
const COL_CATEGORY: &str = "ТОВАРНАЯ КАТЕГОРИЯ (ТК)";
const COL_GROUP: &str = "ТОВАРНАЯ ГРУППА (ТГ)";
const COL_WAREHOUSE: &str = "Наличие складка (да/нет)";

/// Warehouse flag labels.
const WAREHOUSE_YES: &str = "ДА";
const WAREHOUSE_NO: &str = "НЕТ";

/// The registry grid parsed far enough to merge new rows into it.
#[derive(Debug)]
pub struct Registry {
    rows: Vec<Vec<CellValue>>,
    header_row: usize,
    columns: HashMap<String, usize>,
    width: usize,
    next_key: i64,
    appended: Vec<Vec<CellValue>>,
}

impl Registry {
    /// Parses the registry grid. Fails with `HeaderNotFound` when no row
    /// within the scan window carries both header markers; nothing can be
    /// merged without knowing the column positions.
    pub fn from_grid(grid: &Grid) -> Result<Self, ImportError> {
        let rows = grid.to_rows();
        let header_row = find_header_row(&rows).ok_or(ImportError::HeaderNotFound)?;

        let mut columns = HashMap::new();
        for (idx, cell) in rows[header_row].iter().enumerate() {
            columns.insert(cell.display_value(), idx);
        }
        let width = rows[header_row].len();

        let next_key = next_sequential_key(&rows[header_row + 1..]);
        debug!("registry header at row {}, next key {}", header_row, next_key);

        Ok(Registry {
            rows,
            header_row,
            columns,
            width,
            next_key,
            appended: Vec::new(),
        })
    }

    /// Builds and queues one registry row for a (questionnaire, pair)
    /// combination, consuming the next sequential key. Captions missing
    /// from the registry header leave their column unset.
    pub fn append_entry(&mut self, fields: &FormFields, pair: &CategoryGroupPair, has_warehouse: bool) {
        let columns = &self.columns;
        let mut row = vec![CellValue::Empty; self.width];
        {
            let mut set = |caption: &str, value: CellValue| {
                if let Some(&idx) = columns.get(caption) {
                    if idx < row.len() {
                        row[idx] = value;
                    }
                }
            };

            set(COL_SEQ, CellValue::Number(self.next_key as f64));
            set(COL_ORG_NAME, text(&fields.registry_name));
            set(COL_INN, text(&fields.inn));
            set(COL_CONTACT, text(&fields.contact));
            set(COL_POSITION, text(&fields.position));
            set(COL_PHONE, text(&fields.phone));
            set(COL_EMAIL, text(&fields.email));
            set(COL_TAX_REGIME, text(&fields.tax_regime));
            set(COL_REGION, text(&fields.region));
            set(COL_CATEGORY, text(&pair.category));
            set(COL_GROUP, text(&pair.group));
            set(
                COL_WAREHOUSE,
                text(if has_warehouse { WAREHOUSE_YES } else { WAREHOUSE_NO }),
            );
        }
        self.next_key += 1;
        self.appended.push(row);
    }

    /// Number of rows queued so far in this batch.
    pub fn appended_rows(&self) -> usize {
        self.appended.len()
    }

    /// Assembles the merged registry: everything up to and including the
    /// header, the new rows in generation order, then the pre-existing
    /// data rows. New rows sit directly below the header.
    pub fn into_grid(self) -> Grid {
        let Registry {
            mut rows,
            header_row,
            appended,
            ..
        } = self;

        let existing_data = rows.split_off(header_row + 1);
        rows.extend(appended);
        rows.extend(existing_data);
        Grid::from_rows(rows)
    }
}

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

/// A header row carries a cell equal to "№" and a cell mentioning "ИНН".
fn find_header_row(rows: &[Vec<CellValue>]) -> Option<usize> {
    rows.iter().take(HEADER_SCAN_ROWS).position(|row| {
        let mut has_seq = false;
        let mut has_inn = false;
        for cell in row {
            let text = cell.display_value();
            has_seq |= text == COL_SEQ;
            has_inn |= text.contains("ИНН");
        }
        has_seq && has_inn
    })
}

/// One past the highest numeric key below the header, or 1 when the data
/// area holds none. Keys are read from the second column and tolerate a
/// decimal comma.
fn next_sequential_key(data_rows: &[Vec<CellValue>]) -> i64 {
    let mut max_key: Option<i64> = None;
    for row in data_rows {
        let Some(cell) = row.get(KEY_COLUMN) else {
            continue;
        };
        let normalized = cell.display_value().replace(',', ".");
        if let Ok(num) = normalized.trim().parse::<f64>() {
            let key = num as i64;
            max_key = Some(max_key.map_or(key, |current| current.max(key)));
        }
    }
    max_key.map_or(1, |max| max + 1)
}
