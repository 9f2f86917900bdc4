//! Visual marker constants and the numeric piece-value encoding
//!
//! The game renders every square as an `<img>` whose `src` embeds one of a
//! small set of marker substrings (`you1`, `me1k`, `gray`, ...). Everything
//! the harness infers about board state flows through these mappings.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{PieceColor, PieceState};

pub const BOARD_DIMENSION: usize = 8;
pub const BOARD_SIZE: usize = BOARD_DIMENSION * BOARD_DIMENSION;
pub const INITIAL_PIECE_COUNT: usize = 12;

/// `name` attribute prefix; the square at (x, y) is `space{x}{y}`.
pub const SQUARE_NAME_PREFIX: &str = "space";

/// Marker shown on an empty square.
pub const EMPTY_SQUARE_MARKER: &str = "gray";

/// sessionStorage key the game reads during initialization to seed a
/// custom starting board.
pub const BOARD_SEED_STORAGE_KEY: &str = "checkersCustomBoardState";

/// Route serving the game page.
pub const DEFAULT_GAME_ROUTE: &str = "/checkers";

pub const DEFAULT_GAME_OVER_TIMEOUT_MS: u64 = 5000;
pub const QUICK_STATUS_CHECK_TIMEOUT_MS: u64 = 500;

/// Marker substring for a piece of the given color and visual state.
pub const fn piece_marker(color: PieceColor, state: PieceState) -> &'static str {
    match (color, state) {
        (PieceColor::Orange, PieceState::Normal) => "you1",
        (PieceColor::Orange, PieceState::King) => "you1k",
        (PieceColor::Orange, PieceState::Selected) => "you2",
        (PieceColor::Blue, PieceState::Normal) => "me1",
        (PieceColor::Blue, PieceState::King) => "me1k",
        (PieceColor::Blue, PieceState::Selected) => "me2",
    }
}

/// Signed numeric code for a piece: orange positive, blue negative, kings
/// carry the 0.1 fractional marker.
pub const fn piece_value(color: PieceColor, is_king: bool) -> f64 {
    match (color, is_king) {
        (PieceColor::Orange, false) => 1.0,
        (PieceColor::Orange, true) => 1.1,
        (PieceColor::Blue, false) => -1.0,
        (PieceColor::Blue, true) => -1.1,
    }
}

/// Decoder pattern table, ordered most-specific-first.
///
/// `you1k` contains `you1`, so a naive order would decode a king as a
/// plain piece. Every pattern that is a superstring of another must appear
/// before it; `decode::table_order_is_most_specific_first` pins this down.
pub const SRC_PATTERN_TABLE: &[(&str, f64)] = &[
    ("you2k", 1.1),
    ("me2k", -1.1),
    ("you1k", 1.1),
    ("me1k", -1.1),
    ("you2", 1.0),
    ("me2", -1.0),
    ("you1", 1.0),
    ("me1", -1.0),
];

/// Prompt shown when it is the player's turn to pick a piece.
pub const SELECT_PIECE_PROMPT: &str = "Select an orange piece";

/// Any terminal game-over message.
pub static GAME_OVER_MESSAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(You won|You lose|Game over)").expect("static regex"));

/// The player (orange) has won.
pub static PLAYER_WIN_MESSAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)you\s+won").expect("static regex"));

/// The player has lost; blue has won.
pub static PLAYER_LOSE_MESSAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)you\s+lose").expect("static regex"));

/// Complaint shown when the player clicks an opponent piece.
pub static OPPONENT_PIECE_MESSAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Click on your orange piece|Select an orange piece").expect("static regex")
});

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(PieceColor::Orange, false => 1.0)]
    #[test_case(PieceColor::Orange, true => 1.1)]
    #[test_case(PieceColor::Blue, false => -1.0)]
    #[test_case(PieceColor::Blue, true => -1.1)]
    fn piece_values(color: PieceColor, is_king: bool) -> f64 {
        piece_value(color, is_king)
    }

    #[test]
    fn king_markers_extend_normal_markers() {
        for color in [PieceColor::Orange, PieceColor::Blue] {
            let normal = piece_marker(color, PieceState::Normal);
            let king = piece_marker(color, PieceState::King);
            assert!(king.contains(normal), "{king} should contain {normal}");
        }
    }

    #[test]
    fn message_patterns_classify_expected_text() {
        assert!(GAME_OVER_MESSAGE.is_match("You won! Game over."));
        assert!(PLAYER_WIN_MESSAGE.is_match("you  won"));
        assert!(PLAYER_LOSE_MESSAGE.is_match("You lose, try again"));
        assert!(!PLAYER_WIN_MESSAGE.is_match(SELECT_PIECE_PROMPT));
        assert!(OPPONENT_PIECE_MESSAGE.is_match(SELECT_PIECE_PROMPT));
        assert!(OPPONENT_PIECE_MESSAGE.is_match("click on your orange piece"));
    }
}
