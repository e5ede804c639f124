//! FILENAME: core/importer/src/categories.rs
//! PURPOSE: Detects which category/group rows are checked in the appendix
//! matrix sheet.
//! CONTEXT: The sheet is a table with a "mark with a checkmark" column.
//! Header wording and column positions drift between questionnaire
//! revisions, so the header row and the relevant columns are located by
//! substring. When no row is recognizably marked, a configured list of
//! group names is searched literally as a last resort.

use engine::{coord_to_a1, Grid};
use log::{debug, warn};
use std::collections::HashSet;

/// Header phrase identifying the mark column.
const MARK_HEADER: &str = "отметить галочкой";
/// Header fragment identifying the category column.
const CATEGORY_HEADER: &str = "категор";
/// Header fragments identifying the group column.
const GROUP_HEADERS: &[&str] = &["группа", "тг"];
/// Cell contents accepted as a set checkmark (compared lowercased, trimmed).
const TRUTHY_MARKS: &[&str] = &["x", "х", "✓", "да", "true", "1", "+", "y", "yes"];
/// Header discovery gives up after this many rows.
const HEADER_SCAN_ROWS: u32 = 20;

/// One checked (category, group) selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CategoryGroupPair {
    pub category: String,
    pub group: String,
}

impl CategoryGroupPair {
    pub fn new(category: impl Into<String>, group: impl Into<String>) -> Self {
        CategoryGroupPair {
            category: category.into(),
            group: group.into(),
        }
    }

    /// Placeholder pair used when a questionnaire has no readable selection.
    pub fn empty() -> Self {
        CategoryGroupPair::default()
    }
}

/// Extracts the checked (category, group) pairs from the matrix sheet, in
/// first-seen order, deduplicated, with empty-group pairs dropped. Yields
/// nothing (rather than failing) when the sheet has no recognizable header.
pub fn extract_category_pairs(grid: &Grid, fallback_groups: &[String]) -> Vec<CategoryGroupPair> {
    let mut result = Vec::new();

    if let Some((header_row, mark_col)) = find_mark_header(grid) {
        let category_col = find_header_col(grid, header_row, &[CATEGORY_HEADER]);
        let group_col = find_header_col(grid, header_row, GROUP_HEADERS);
        debug!(
            "category matrix header at {}: category col {:?}, group col {:?}",
            coord_to_a1((header_row, mark_col)),
            category_col,
            group_col
        );

        if let (Some(category_col), Some(group_col)) = (category_col, group_col) {
            for row in header_row + 1..grid.row_count() {
                let category = grid.text_at(row, category_col);
                let group = grid.text_at(row, group_col);
                if category.is_empty() && group.is_empty() {
                    continue;
                }
                let mark = grid.text_at(row, mark_col).to_lowercase();
                if TRUTHY_MARKS.contains(&mark.as_str()) {
                    result.push(CategoryGroupPair::new(category, group));
                }
            }
        }
    }

    if result.is_empty() && !fallback_groups.is_empty() {
        warn!(
            "no marked category rows; scanning for {} configured fallback group(s)",
            fallback_groups.len()
        );
        result = scan_fallback_groups(grid, fallback_groups);
    }

    result.retain(|pair| !pair.group.is_empty());
    dedup_pairs(result)
}

/// Finds the header row and mark column: the first row within the scan
/// window containing the mark-column phrase.
fn find_mark_header(grid: &Grid) -> Option<(u32, u32)> {
    let limit = grid.row_count().min(HEADER_SCAN_ROWS);
    for row in 0..limit {
        for col in 0..grid.col_count() {
            if grid.text_at(row, col).to_lowercase().contains(MARK_HEADER) {
                return Some((row, col));
            }
        }
    }
    None
}

/// First column of the header row whose text contains any fragment.
fn find_header_col(grid: &Grid, header_row: u32, fragments: &[&str]) -> Option<u32> {
    (0..grid.col_count()).find(|&col| {
        let text = grid.text_at(header_row, col).to_lowercase();
        fragments.iter().any(|fragment| text.contains(fragment))
    })
}

/// Last-resort detection: any cell equal to a configured group name becomes
/// a pair, with the cell to its left as the category guess.
fn scan_fallback_groups(grid: &Grid, fallback_groups: &[String]) -> Vec<CategoryGroupPair> {
    let mut result = Vec::new();
    for row in 0..grid.row_count() {
        for col in 0..grid.col_count() {
            let text = grid.text_at(row, col);
            if fallback_groups
                .iter()
                .any(|group| text.to_lowercase() == group.to_lowercase())
            {
                let category = if col > 0 {
                    grid.text_at(row, col - 1)
                } else {
                    String::new()
                };
                result.push(CategoryGroupPair::new(category, text));
            }
        }
    }
    result
}

/// Drops duplicate pairs, keeping first-seen order.
fn dedup_pairs(pairs: Vec<CategoryGroupPair>) -> Vec<CategoryGroupPair> {
    let mut seen = HashSet::new();
    pairs
        .into_iter()
        .filter(|pair| seen.insert(pair.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::CellValue;

    fn matrix_grid(rows: &[&[&str]]) -> Grid {
        let mut grid = Grid::new();
        for (row, cells) in rows.iter().enumerate() {
            for (col, text) in cells.iter().enumerate() {
                if !text.is_empty() {
                    grid.set_cell(row as u32, col as u32, CellValue::from(*text));
                }
            }
        }
        grid
    }

    fn no_fallback() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_extracts_marked_rows() {
        let grid = matrix_grid(&[
            &["Приложение №1"],
            &["Товарная категория", "Товарная группа (ТГ)", "Отметить галочкой"],
            &["Бакалея", "Крупы", "x"],
            &["Бакалея", "Макароны", ""],
            &["Напитки", "Соки", "Х"],
        ]);

        let pairs = extract_category_pairs(&grid, &no_fallback());
        assert_eq!(
            pairs,
            vec![
                CategoryGroupPair::new("Бакалея", "Крупы"),
                CategoryGroupPair::new("Напитки", "Соки"),
            ]
        );
    }

    #[test]
    fn test_accepts_checkmark_vocabulary() {
        let grid = matrix_grid(&[
            &["Категория", "Группа", "Отметить галочкой"],
            &["А", "Г1", "✓"],
            &["А", "Г2", "да"],
            &["А", "Г3", "+"],
            &["А", "Г4", "1"],
            &["А", "Г5", "нет"],
        ]);

        let pairs = extract_category_pairs(&grid, &no_fallback());
        let groups: Vec<&str> = pairs.iter().map(|p| p.group.as_str()).collect();
        assert_eq!(groups, vec!["Г1", "Г2", "Г3", "Г4"]);
    }

    #[test]
    fn test_deduplicates_preserving_first_seen_order() {
        let grid = matrix_grid(&[
            &["Категория", "Группа", "Отметить галочкой"],
            &["Напитки", "Соки", "x"],
            &["Бакалея", "Крупы", "x"],
            &["Напитки", "Соки", "x"],
        ]);

        let pairs = extract_category_pairs(&grid, &no_fallback());
        assert_eq!(
            pairs,
            vec![
                CategoryGroupPair::new("Напитки", "Соки"),
                CategoryGroupPair::new("Бакалея", "Крупы"),
            ]
        );
    }

    #[test]
    fn test_no_header_yields_empty_result() {
        let grid = matrix_grid(&[
            &["Какая-то таблица", "без нужных колонок"],
            &["Бакалея", "Крупы", "x"],
        ]);

        assert!(extract_category_pairs(&grid, &no_fallback()).is_empty());
    }

    #[test]
    fn test_fallback_emits_pair_with_preceding_cell_as_category() {
        // Header exists but nothing is marked; the configured group name
        // appears elsewhere in the sheet.
        let grid = matrix_grid(&[
            &["Категория", "Группа", "Отметить галочкой"],
            &["Бакалея", "Крупы", ""],
            &["Напитки", "Beverages", ""],
        ]);
        let fallback = vec!["beverages".to_string()];

        let pairs = extract_category_pairs(&grid, &fallback);
        assert_eq!(pairs, vec![CategoryGroupPair::new("Напитки", "Beverages")]);
    }

    #[test]
    fn test_fallback_in_first_column_has_empty_category() {
        let grid = matrix_grid(&[&["Напитки"]]);
        let fallback = vec!["Напитки".to_string()];

        let pairs = extract_category_pairs(&grid, &fallback);
        assert_eq!(pairs, vec![CategoryGroupPair::new("", "Напитки")]);
    }

    #[test]
    fn test_marked_row_with_empty_group_is_dropped() {
        let grid = matrix_grid(&[
            &["Категория", "Группа", "Отметить галочкой"],
            &["Бакалея", "", "x"],
            &["Напитки", "Соки", "x"],
        ]);

        let pairs = extract_category_pairs(&grid, &no_fallback());
        assert_eq!(pairs, vec![CategoryGroupPair::new("Напитки", "Соки")]);
    }
}
