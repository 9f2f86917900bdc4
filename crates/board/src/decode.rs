//! Board decoder: rendered marker strings -> numeric board

use crate::error::{Error, Result};
use crate::markers::{BOARD_SIZE, SRC_PATTERN_TABLE};

/// Decode a single `src` attribute into its numeric piece code.
///
/// The table is scanned in order and the first substring match wins, so
/// the more specific king/selected markers resolve before the plain
/// markers they textually contain. Unrecognized markers decode to empty.
pub fn decode_marker(src: &str) -> f64 {
    for (pattern, value) in SRC_PATTERN_TABLE {
        if src.contains(pattern) {
            return *value;
        }
    }
    0.0
}

/// Decode a full capture: one optional `src` per cell in row-major order.
/// A cell with no marker attribute decodes to empty.
pub fn decode_capture(cells: &[Option<String>]) -> Result<Vec<f64>> {
    if cells.len() != BOARD_SIZE {
        return Err(Error::BadCaptureLength {
            actual: cells.len(),
            expected: BOARD_SIZE,
        });
    }

    Ok(cells
        .iter()
        .map(|src| src.as_deref().map_or(0.0, decode_marker))
        .collect())
}
