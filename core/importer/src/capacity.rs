//! FILENAME: core/importer/src/capacity.rs
//! PURPOSE: Determines whether a questionnaire declares production capacity.
//! CONTEXT: The capacity sheet is a fixed matrix; the declaration area is
//! the B5:E29 block. Anything entered there counts as a declaration,
//! regardless of content. Cells outside the block are ignored.

use engine::{a1_to_coord, Grid};

/// True iff at least one cell of the B5:E29 block is non-blank.
pub fn has_capacity(grid: &Grid) -> bool {
    let (start_row, start_col) = a1_to_coord("B", 5);
    let (end_row, end_col) = a1_to_coord("E", 29);

    for row in start_row..=end_row {
        for col in start_col..=end_col {
            if !grid.is_blank(row, col) {
                return true;
            }
        }
    }
    false
}
