//! Board comparison and diagnostic grid formatting

use crate::markers::BOARD_DIMENSION;

/// Exact structural equality between two numeric boards.
///
/// The fractional king codes must match exactly; there is no tolerance.
/// A plain piece (1.0) never equals a king (1.1).
pub fn boards_match(expected: &[f64], actual: &[f64]) -> bool {
    expected.len() == actual.len() && expected.iter().zip(actual).all(|(e, a)| e == a)
}

/// Reshape a flat row-major board into 8 rows of 8 cells.
pub fn to_grid(board: &[f64]) -> Vec<Vec<f64>> {
    board
        .chunks(BOARD_DIMENSION)
        .map(|row| row.to_vec())
        .collect()
}

/// Render a grid as a bracketed block, one row per line. Presentation
/// only; comparison always happens on the flat boards.
pub fn grid_to_string(grid: &[Vec<f64>]) -> String {
    let rows: Vec<String> = grid
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            format!("  [{}]", cells.join(", "))
        })
        .collect();
    format!("[\n{}\n]", rows.join(",\n"))
}

/// Convenience: flat board straight to its grid string.
pub fn board_grid_string(board: &[f64]) -> String {
    grid_to_string(&to_grid(board))
}
