//! Board encoder: declarative game state -> flat numeric board

use tracing::warn;

use crate::error::{Error, Result};
use crate::markers::{piece_value, BOARD_SIZE};
use crate::types::GameState;

/// Encode a game state as a flat row-major board of length 64.
///
/// Positions are bounds-checked and rejected, never clamped. Occupancy is
/// not checked: when two fixture pieces share a cell the later write wins,
/// which is the authoring trust boundary for hand-written fixtures. An
/// overwrite is logged so a bad fixture is at least visible.
pub fn encode_state(state: &GameState) -> Result<Vec<f64>> {
    let mut board = vec![0.0; BOARD_SIZE];

    for piece in state.pieces() {
        let pos = piece.position;
        if !pos.in_bounds() {
            return Err(Error::OutOfBounds { x: pos.x, y: pos.y });
        }

        let index = pos.cell_index();
        if board[index] != 0.0 {
            warn!("fixture places two pieces at {pos}; keeping the later one");
        }
        board[index] = piece_value(piece.color, piece.is_king);
    }

    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GamePosition, PieceColor, PieceData};
    use test_case::test_case;

    fn state_with(orange: Vec<PieceData>, blue: Vec<PieceData>) -> GameState {
        GameState {
            orange_pieces: orange,
            blue_pieces: blue,
            current_turn: PieceColor::Orange,
            game_over: false,
        }
    }

    #[test]
    fn empty_state_encodes_to_all_zeroes() {
        let board = encode_state(&state_with(vec![], vec![])).unwrap();
        assert_eq!(board.len(), BOARD_SIZE);
        assert!(board.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn all_four_piece_codes_are_produced() {
        let state = state_with(
            vec![
                PieceData::normal(PieceColor::Orange, 0, 0),
                PieceData::king(PieceColor::Orange, 2, 0),
            ],
            vec![
                PieceData::normal(PieceColor::Blue, 1, 7),
                PieceData::king(PieceColor::Blue, 3, 7),
            ],
        );
        let board = encode_state(&state).unwrap();
        assert_eq!(board[0], 1.0);
        assert_eq!(board[2], 1.1);
        assert_eq!(board[8 * 7 + 1], -1.0);
        assert_eq!(board[8 * 7 + 3], -1.1);
    }

    #[test_case(8, 0)]
    #[test_case(-1, 3)]
    #[test_case(0, 8)]
    #[test_case(3, -2)]
    fn out_of_bounds_positions_are_rejected(x: i32, y: i32) {
        let state = state_with(vec![PieceData::normal(PieceColor::Orange, x, y)], vec![]);
        let err = encode_state(&state).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { x: ex, y: ey } if ex == x && ey == y));
    }

    #[test]
    fn corner_position_is_accepted() {
        let state = state_with(vec![PieceData::normal(PieceColor::Orange, 7, 7)], vec![]);
        let board = encode_state(&state).unwrap();
        assert_eq!(board[63], 1.0);
    }

    #[test]
    fn overlapping_pieces_keep_the_later_write() {
        let state = state_with(
            vec![PieceData::normal(PieceColor::Orange, 4, 4)],
            vec![PieceData::king(PieceColor::Blue, 4, 4)],
        );
        let board = encode_state(&state).unwrap();
        assert_eq!(board[8 * 4 + 4], -1.1);
    }
}
