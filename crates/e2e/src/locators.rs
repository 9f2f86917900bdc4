//! CSS selector builders for the rendered board
//!
//! Every square is an `<img name="space{x}{y}">` whose `src` carries the
//! visual marker; all addressing goes through these builders so the
//! selector grammar lives in one place.

use checkers_board::markers::{piece_marker, EMPTY_SQUARE_MARKER, SQUARE_NAME_PREFIX};
use checkers_board::{GamePosition, PieceColor, PieceState};

/// `name` attribute of the square at a position, e.g. `space13`.
pub fn square_name(at: GamePosition) -> String {
    format!("{SQUARE_NAME_PREFIX}{}{}", at.x, at.y)
}

/// The clickable square element, regardless of content.
pub fn clickable_square(at: GamePosition) -> String {
    format!(r#"img[name="{}"]"#, square_name(at))
}

/// A piece of the given color and visual state at a position.
///
/// Marker matching is by substring, so the normal-state selector also
/// matches a king of the same color (`you1k` contains `you1`).
pub fn piece(at: GamePosition, color: PieceColor, state: PieceState) -> String {
    format!(
        r#"img[name="{}"][src*="{}"]"#,
        square_name(at),
        piece_marker(color, state)
    )
}

/// The selected marker of either color at a position.
pub fn selected_piece(at: GamePosition) -> String {
    let name = square_name(at);
    format!(
        r#"img[name="{name}"][src*="{orange}"], img[name="{name}"][src*="{blue}"]"#,
        orange = piece_marker(PieceColor::Orange, PieceState::Selected),
        blue = piece_marker(PieceColor::Blue, PieceState::Selected),
    )
}

/// A piece of a color at a position, in any visual state. Used when the
/// selection state after a refused interaction is not the game's to
/// promise, only that the piece is still there.
pub fn piece_any_state(at: GamePosition, color: PieceColor) -> String {
    let name = square_name(at);
    [PieceState::Normal, PieceState::King, PieceState::Selected]
        .iter()
        .map(|state| {
            format!(
                r#"img[name="{name}"][src*="{}"]"#,
                piece_marker(color, *state)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// An empty square at a position.
pub fn empty_square(at: GamePosition) -> String {
    format!(
        r#"img[name="{}"][src*="{EMPTY_SQUARE_MARKER}"]"#,
        square_name(at)
    )
}

/// Every rendered piece of a color, in any visual state.
pub fn all_pieces(color: PieceColor) -> String {
    [PieceState::Normal, PieceState::King, PieceState::Selected]
        .iter()
        .map(|state| format!(r#"img[src*="{}"]"#, piece_marker(color, *state)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// The message region(s) the game writes status text into.
pub fn message_display() -> &'static str {
    r#"#message, p[align="center"]"#
}
