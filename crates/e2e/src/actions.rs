//! Move and turn execution primitives
//!
//! Translates declarative `MoveData` into interaction steps and classifies
//! observed message text into a terminal status. Post-conditions of a
//! plain move (piece at `to`, `from` empty) are the caller's to assert;
//! jump captures verify their own capture effect.

use checkers_board::markers::{
    DEFAULT_GAME_OVER_TIMEOUT_MS, GAME_OVER_MESSAGE, PLAYER_LOSE_MESSAGE, PLAYER_WIN_MESSAGE,
};
use checkers_board::{GamePosition, GameStatus, MoveData, PieceColor, PieceState};

use crate::error::E2eResult;
use crate::locators;
use crate::script::{GameAction, DEFAULT_WAIT_TIMEOUT_MS};

fn wait_visible(selector: String) -> GameAction {
    GameAction::WaitVisible {
        selector,
        timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
    }
}

fn wait_hidden(selector: String) -> GameAction {
    GameAction::WaitHidden {
        selector,
        timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
    }
}

fn click(selector: String) -> GameAction {
    GameAction::Click { selector }
}

/// Select a piece: it must be visible first, and clicking it must bring up
/// the selected marker.
pub fn select_piece(at: GamePosition, color: PieceColor) -> Vec<GameAction> {
    vec![
        wait_visible(locators::piece(at, color, PieceState::Normal)),
        click(locators::clickable_square(at)),
        wait_visible(locators::selected_piece(at)),
    ]
}

/// Click an already-selected piece again: the selection marker must give
/// way to the normal marker.
pub fn deselect_piece(at: GamePosition, color: PieceColor) -> Vec<GameAction> {
    vec![
        click(locators::selected_piece(at)),
        wait_visible(locators::piece(at, color, PieceState::Normal)),
        wait_hidden(locators::selected_piece(at)),
    ]
}

/// Select a second piece while one is selected. The two selection states
/// are mutually exclusive, so the first marker must disappear.
pub fn switch_selection(
    from: GamePosition,
    to: GamePosition,
    color: PieceColor,
) -> Vec<GameAction> {
    let mut actions = select_piece(to, color);
    actions.push(wait_hidden(locators::selected_piece(from)));
    actions
}

/// Click an opponent piece: the game must refuse, complain in the message
/// region, and leave the clicked piece exactly where it was.
pub fn attempt_invalid_selection(
    at: GamePosition,
    color: PieceColor,
    expected_message: &str,
) -> Vec<GameAction> {
    vec![
        click(locators::clickable_square(at)),
        GameAction::ExpectMessage {
            pattern: expected_message.to_string(),
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
        },
        wait_visible(locators::piece(at, color, PieceState::Normal)),
    ]
}

/// Click an illegal destination for the currently selected piece: the move
/// must be refused and the piece must stay at `from`, in whatever visual
/// state the refusal leaves it. The destination square is the caller's to
/// assert, since it may hold anything.
pub fn attempt_invalid_move(
    from: GamePosition,
    to: GamePosition,
    player: PieceColor,
) -> Vec<GameAction> {
    vec![
        click(locators::clickable_square(to)),
        wait_visible(locators::piece_any_state(from, player)),
    ]
}

/// One full player turn. Jumps assert the captured opponent piece is
/// present before the move and that its square is empty afterwards.
pub fn player_turn(mv: &MoveData) -> E2eResult<Vec<GameAction>> {
    mv.validate()?;

    let mut actions = Vec::new();

    if mv.is_jump {
        if let Some(captured) = mv.captured_piece {
            actions.push(wait_visible(locators::piece(
                captured,
                mv.player.opponent(),
                PieceState::Normal,
            )));
        }
    }

    actions.extend(select_piece(mv.from, mv.player));
    actions.push(click(locators::clickable_square(mv.to)));

    if mv.is_jump {
        if let Some(captured) = mv.captured_piece {
            actions.push(wait_visible(locators::empty_square(captured)));
        }
    }

    Ok(actions)
}

/// Assert a piece of a color (and king state) is visible at a position.
pub fn verify_piece_at(at: GamePosition, color: PieceColor, is_king: bool) -> GameAction {
    let state = if is_king {
        PieceState::King
    } else {
        PieceState::Normal
    };
    wait_visible(locators::piece(at, color, state))
}

/// Assert a square shows the empty marker.
pub fn verify_empty(at: GamePosition) -> GameAction {
    wait_visible(locators::empty_square(at))
}

/// Bounded poll for a terminal-status message. `None` uses the default
/// 5 s window; pass a short window for fast negative checks.
pub fn poll_game_over(timeout_ms: Option<u64>) -> GameAction {
    GameAction::PollStatus {
        label: "result".to_string(),
        timeout_ms: timeout_ms.unwrap_or(DEFAULT_GAME_OVER_TIMEOUT_MS),
    }
}

/// Classify message text, from the acting player's (orange) perspective.
///
/// Absent, empty, unrecognized, or non-terminal text all classify as
/// in-progress: a poll timing out is the normal "game still going"
/// signal, never an error.
pub fn classify_message(text: Option<&str>) -> GameStatus {
    let Some(text) = text else {
        return GameStatus::InProgress;
    };
    if !GAME_OVER_MESSAGE.is_match(text) {
        return GameStatus::InProgress;
    }
    if PLAYER_WIN_MESSAGE.is_match(text) {
        GameStatus::OrangeWins
    } else if PLAYER_LOSE_MESSAGE.is_match(text) {
        GameStatus::BlueWins
    } else {
        GameStatus::InProgress
    }
}
