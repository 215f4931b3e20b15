use itertools::Itertools;

use crate::grid::Grid;

/// True when no row, column, or box contains a repeated digit. Empty cells
/// never count as duplicates; a partially filled grid is valid as long as
/// its givens are consistent.
///
/// Scan order is rows 0..=8, then columns, then boxes, stopping at the
/// first bad group.
pub fn is_valid(grid: &Grid) -> bool {
    for r in 0..9 { if !group_ok(grid.row_values(r)) { return false; } }
    for c in 0..9 { if !group_ok(grid.col_values(c)) { return false; } }
    for b in 0..9 { if !group_ok(grid.box_values(b)) { return false; } }
    true
}

fn group_ok(values: [u8; 9]) -> bool {
    values.iter().filter(|&&d| d != 0).all_unique()
}

/// Marks every cell that participates in a duplicate within its row,
/// column, or box. Diagnostic companion to `is_valid` for callers that
/// want to highlight the offending cells.
pub fn conflict_mask(grid: &Grid) -> [[bool; 9]; 9] {
    let mut mask = [[false; 9]; 9];

    for r in 0..9 {
        let counts = value_counts(grid.row_values(r));
        for c in 0..9 {
            let v = grid.row_values(r)[c] as usize;
            if v != 0 && counts[v] > 1 { mask[r][c] = true; }
        }
    }

    for c in 0..9 {
        let counts = value_counts(grid.col_values(c));
        for r in 0..9 {
            let v = grid.col_values(c)[r] as usize;
            if v != 0 && counts[v] > 1 { mask[r][c] = true; }
        }
    }

    for b in 0..9 {
        let counts = value_counts(grid.box_values(b));
        let br = (b / 3) * 3;
        let bc = (b % 3) * 3;
        for i in 0..9 {
            let v = grid.box_values(b)[i] as usize;
            if v != 0 && counts[v] > 1 { mask[br + i/3][bc + i%3] = true; }
        }
    }

    mask
}

fn value_counts(values: [u8; 9]) -> [u8; 10] {
    let mut counts = [0u8; 10];
    for v in values { counts[v as usize] += 1; }
    counts
}
