//! Checkers Board Model
//!
//! Shared pure logic for the checkers E2E harness: the numeric board
//! encoding, the marker decoder, board comparison, and the scenario
//! catalogue. Nothing in this crate touches a browser; the `checkers-e2e`
//! crate drives the live page and feeds its captures through these
//! functions.

pub mod catalog;
pub mod decode;
pub mod encode;
pub mod error;
pub mod grid;
pub mod markers;
pub mod types;

// Re-export the pipeline entry points
pub use decode::{decode_capture, decode_marker};
pub use encode::encode_state;
pub use error::{Error, Result};
pub use grid::{board_grid_string, boards_match};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{piece_value, SRC_PATTERN_TABLE};

    /// Encode a state, synthesize the `src` strings the page would render
    /// for it, and decode them back. Seeding the live surface with a state
    /// and capturing it immediately must behave the same way.
    #[test]
    fn encode_decode_round_trip() {
        let state = catalog::endgame_board();
        let expected = encode_state(&state).unwrap();

        let cells: Vec<Option<String>> = expected
            .iter()
            .map(|&value| {
                if value == 0.0 {
                    Some("checkers/gray.png".to_string())
                } else {
                    let pattern = SRC_PATTERN_TABLE
                        .iter()
                        .find(|(_, v)| *v == value)
                        .map(|(p, _)| *p)
                        .unwrap();
                    Some(format!("checkers/{pattern}.png"))
                }
            })
            .collect();

        let decoded = decode_capture(&cells).unwrap();
        assert!(boards_match(&expected, &decoded));
    }

    #[test]
    fn encoder_and_decoder_share_one_code_space() {
        for color in [PieceColor::Orange, PieceColor::Blue] {
            for is_king in [false, true] {
                let value = piece_value(color, is_king);
                assert!(
                    SRC_PATTERN_TABLE.iter().any(|(_, v)| *v == value),
                    "no decoder pattern produces {value}"
                );
            }
        }
    }
}
