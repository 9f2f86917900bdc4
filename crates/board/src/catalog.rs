//! Literal scenario catalogue
//!
//! Fixtures are built once at first access and handed out as deep clones,
//! so a running scenario can never alias or mutate catalogue state.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;

use crate::types::{
    BoardTestScenario, GamePosition, GameState, GameStatus, MoveData, PieceColor, PieceCounts,
    PieceData,
};

fn rank(color: PieceColor, y: i32, first_x: i32) -> Vec<PieceData> {
    (0..4)
        .map(|i| PieceData::normal(color, first_x + 2 * i, y))
        .collect()
}

fn state(orange: Vec<PieceData>, blue: Vec<PieceData>, turn: PieceColor) -> GameState {
    GameState {
        orange_pieces: orange,
        blue_pieces: blue,
        current_turn: turn,
        game_over: false,
    }
}

/// Standard opening: twelve pieces per side on alternating dark squares.
pub fn initial_board() -> GameState {
    let mut orange = rank(PieceColor::Orange, 0, 0);
    orange.extend(rank(PieceColor::Orange, 1, 1));
    orange.extend(rank(PieceColor::Orange, 2, 0));

    let mut blue = rank(PieceColor::Blue, 5, 1);
    blue.extend(rank(PieceColor::Blue, 6, 0));
    blue.extend(rank(PieceColor::Blue, 7, 1));

    state(orange, blue, PieceColor::Orange)
}

/// Two orange pieces, one a step away from the back row; one blue piece.
pub fn king_promotion_board() -> GameState {
    state(
        vec![
            PieceData::normal(PieceColor::Orange, 2, 6),
            PieceData::normal(PieceColor::Orange, 0, 0),
        ],
        vec![PieceData::normal(PieceColor::Blue, 7, 7)],
        PieceColor::Orange,
    )
}

/// Minimal endgame with kings on both sides.
pub fn endgame_board() -> GameState {
    state(
        vec![
            PieceData::king(PieceColor::Orange, 0, 0),
            PieceData::normal(PieceColor::Orange, 2, 2),
        ],
        vec![PieceData::king(PieceColor::Blue, 7, 7)],
        PieceColor::Orange,
    )
}

/// A blue piece sits on the diagonal ready to be jumped.
pub fn jump_capture_board() -> GameState {
    state(
        vec![
            PieceData::normal(PieceColor::Orange, 0, 2),
            PieceData::normal(PieceColor::Orange, 4, 2),
        ],
        vec![
            PieceData::normal(PieceColor::Blue, 1, 3),
            PieceData::normal(PieceColor::Blue, 6, 6),
        ],
        PieceColor::Orange,
    )
}

/// The opening board after orange has played three forward steps.
fn opening_after_three_moves() -> GameState {
    let mut orange = rank(PieceColor::Orange, 0, 0);
    orange.extend(rank(PieceColor::Orange, 1, 1));
    orange.extend([
        PieceData::normal(PieceColor::Orange, 1, 3),
        PieceData::normal(PieceColor::Orange, 3, 3),
        PieceData::normal(PieceColor::Orange, 5, 3),
        PieceData::normal(PieceColor::Orange, 6, 2),
    ]);

    state(orange, initial_board().blue_pieces, PieceColor::Blue)
}

static CATALOG: Lazy<BTreeMap<&'static str, BoardTestScenario>> = Lazy::new(build_catalog);

fn build_catalog() -> BTreeMap<&'static str, BoardTestScenario> {
    let mut catalog = BTreeMap::new();

    // Gameplay scenarios: piece-count baselines around single moves.
    catalog.insert(
        "basic-movement",
        BoardTestScenario {
            name: "Basic Movement".into(),
            description: "Execute basic piece movement successfully".into(),
            board_state: initial_board(),
            moves: vec![MoveData::step(
                GamePosition::new(0, 2),
                GamePosition::new(1, 3),
            )],
            expected_board: None,
            expected_counts: Some(PieceCounts {
                orange: 12,
                blue: 12,
            }),
            expected_result: Some(GameStatus::InProgress),
        },
    );

    catalog.insert(
        "state-consistency",
        BoardTestScenario {
            name: "State Consistency".into(),
            description: "Maintain game state consistency throughout play".into(),
            board_state: initial_board(),
            moves: vec![MoveData::step(
                GamePosition::new(0, 2),
                GamePosition::new(1, 3),
            )],
            expected_board: None,
            expected_counts: Some(PieceCounts {
                orange: 12,
                blue: 12,
            }),
            expected_result: Some(GameStatus::InProgress),
        },
    );

    catalog.insert(
        "king-promotion",
        BoardTestScenario {
            name: "King Promotion".into(),
            description: "Orange piece is promoted to king on reaching the far row".into(),
            board_state: king_promotion_board(),
            moves: vec![MoveData::step(
                GamePosition::new(2, 6),
                GamePosition::new(1, 7),
            )],
            expected_board: None,
            expected_counts: Some(PieceCounts { orange: 2, blue: 1 }),
            expected_result: None,
        },
    );

    catalog.insert(
        "jump-capture",
        BoardTestScenario {
            name: "Jump Capture".into(),
            description: "Orange captures the blue piece it jumps over".into(),
            board_state: jump_capture_board(),
            moves: vec![MoveData::jump(
                GamePosition::new(0, 2),
                GamePosition::new(2, 4),
                GamePosition::new(1, 3),
            )],
            expected_board: Some(state(
                vec![
                    PieceData::normal(PieceColor::Orange, 2, 4),
                    PieceData::normal(PieceColor::Orange, 4, 2),
                ],
                vec![PieceData::normal(PieceColor::Blue, 6, 6)],
                PieceColor::Blue,
            )),
            expected_counts: Some(PieceCounts { orange: 2, blue: 2 }),
            expected_result: None,
        },
    );

    catalog.insert(
        "sequential-moves",
        BoardTestScenario {
            name: "Sequential Moves".into(),
            description: "Execute multiple moves in sequence to test game flow".into(),
            board_state: state(
                vec![
                    PieceData::normal(PieceColor::Orange, 0, 2),
                    PieceData::normal(PieceColor::Orange, 2, 2),
                    PieceData::normal(PieceColor::Orange, 4, 2),
                ],
                vec![
                    PieceData::normal(PieceColor::Blue, 1, 5),
                    PieceData::normal(PieceColor::Blue, 3, 5),
                ],
                PieceColor::Orange,
            ),
            moves: vec![MoveData::step(
                GamePosition::new(0, 2),
                GamePosition::new(1, 3),
            )],
            expected_board: None,
            expected_counts: Some(PieceCounts { orange: 3, blue: 2 }),
            expected_result: None,
        },
    );

    // Board-configuration scenarios: full expected-board verification.
    catalog.insert(
        "opening-sequence",
        BoardTestScenario {
            name: "Opening Sequence".into(),
            description: "Standard starting position, then three forward steps".into(),
            board_state: initial_board(),
            moves: vec![
                MoveData::step(GamePosition::new(0, 2), GamePosition::new(1, 3)),
                MoveData::step(GamePosition::new(2, 2), GamePosition::new(3, 3)),
                MoveData::step(GamePosition::new(4, 2), GamePosition::new(5, 3)),
            ],
            expected_board: Some(opening_after_three_moves()),
            expected_counts: Some(PieceCounts {
                orange: 12,
                blue: 12,
            }),
            expected_result: Some(GameStatus::InProgress),
        },
    );

    catalog.insert(
        "king-promotion-setup",
        BoardTestScenario {
            name: "King Promotion Setup".into(),
            description: "Board configured for testing promotion to king".into(),
            board_state: king_promotion_board(),
            moves: vec![],
            expected_board: Some(king_promotion_board()),
            expected_counts: Some(PieceCounts { orange: 2, blue: 1 }),
            expected_result: Some(GameStatus::InProgress),
        },
    );

    catalog.insert(
        "minimal-endgame",
        BoardTestScenario {
            name: "Minimal Endgame".into(),
            description: "Endgame setup with few pieces including kings".into(),
            board_state: endgame_board(),
            moves: vec![],
            expected_board: Some(endgame_board()),
            expected_counts: Some(PieceCounts { orange: 2, blue: 1 }),
            expected_result: Some(GameStatus::InProgress),
        },
    );

    // Endgame scenarios: terminal-result classification.
    catalog.insert(
        "king-vs-king",
        BoardTestScenario {
            name: "King vs King Duel".into(),
            description: "Single king against single king keeps the game going".into(),
            board_state: state(
                vec![PieceData::king(PieceColor::Orange, 0, 2)],
                vec![PieceData::king(PieceColor::Blue, 6, 4)],
                PieceColor::Orange,
            ),
            moves: vec![MoveData::step(
                GamePosition::new(0, 2),
                GamePosition::new(1, 1),
            )],
            expected_board: Some(state(
                vec![PieceData::king(PieceColor::Orange, 1, 1)],
                vec![PieceData::king(PieceColor::Blue, 6, 4)],
                PieceColor::Blue,
            )),
            expected_counts: Some(PieceCounts { orange: 1, blue: 1 }),
            expected_result: Some(GameStatus::InProgress),
        },
    );

    catalog.insert(
        "king-hunt",
        BoardTestScenario {
            name: "King Hunt".into(),
            description: "Orange king corners and captures the last blue piece".into(),
            board_state: state(
                vec![
                    PieceData::king(PieceColor::Orange, 3, 5),
                    PieceData::normal(PieceColor::Orange, 0, 4),
                ],
                vec![PieceData::normal(PieceColor::Blue, 4, 6)],
                PieceColor::Orange,
            ),
            moves: vec![MoveData::jump(
                GamePosition::new(3, 5),
                GamePosition::new(5, 7),
                GamePosition::new(4, 6),
            )],
            expected_board: Some(state(
                vec![
                    PieceData::king(PieceColor::Orange, 5, 7),
                    PieceData::normal(PieceColor::Orange, 0, 4),
                ],
                vec![],
                PieceColor::Blue,
            )),
            expected_counts: Some(PieceCounts { orange: 2, blue: 1 }),
            expected_result: Some(GameStatus::OrangeWins),
        },
    );

    catalog.insert(
        "final-pieces",
        BoardTestScenario {
            name: "Final Pieces".into(),
            description: "Sparse endgame spread apart to avoid forced jumps".into(),
            board_state: state(
                vec![
                    PieceData::normal(PieceColor::Orange, 0, 2),
                    PieceData::normal(PieceColor::Orange, 4, 2),
                ],
                vec![
                    PieceData::normal(PieceColor::Blue, 2, 4),
                    PieceData::normal(PieceColor::Blue, 6, 6),
                ],
                PieceColor::Orange,
            ),
            moves: vec![],
            expected_board: Some(state(
                vec![
                    PieceData::normal(PieceColor::Orange, 0, 2),
                    PieceData::normal(PieceColor::Orange, 4, 2),
                ],
                vec![
                    PieceData::normal(PieceColor::Blue, 2, 4),
                    PieceData::normal(PieceColor::Blue, 6, 6),
                ],
                PieceColor::Orange,
            )),
            expected_counts: Some(PieceCounts { orange: 2, blue: 2 }),
            expected_result: Some(GameStatus::InProgress),
        },
    );

    catalog.insert(
        "orange-victory",
        BoardTestScenario {
            name: "Orange Victory".into(),
            description: "Orange king captures the last blue piece to win".into(),
            board_state: state(
                vec![PieceData::king(PieceColor::Orange, 3, 3)],
                vec![PieceData::normal(PieceColor::Blue, 4, 4)],
                PieceColor::Orange,
            ),
            moves: vec![MoveData::jump(
                GamePosition::new(3, 3),
                GamePosition::new(5, 5),
                GamePosition::new(4, 4),
            )],
            expected_board: Some(state(
                vec![PieceData::king(PieceColor::Orange, 5, 5)],
                vec![],
                PieceColor::Blue,
            )),
            expected_counts: Some(PieceCounts { orange: 1, blue: 1 }),
            expected_result: Some(GameStatus::OrangeWins),
        },
    );

    // No expected board here: the blue reply that wins the game also
    // removes the orange piece, so only the terminal result is stable.
    catalog.insert(
        "blue-victory",
        BoardTestScenario {
            name: "Blue Victory".into(),
            description: "Orange steps into range and the blue king captures to win".into(),
            board_state: state(
                vec![PieceData::normal(PieceColor::Orange, 4, 4)],
                vec![PieceData::king(PieceColor::Blue, 2, 6)],
                PieceColor::Orange,
            ),
            moves: vec![MoveData::step(
                GamePosition::new(4, 4),
                GamePosition::new(3, 5),
            )],
            expected_board: None,
            expected_counts: Some(PieceCounts { orange: 1, blue: 1 }),
            expected_result: Some(GameStatus::BlueWins),
        },
    );

    catalog
}

/// Look up a scenario by key, returning an independent deep copy.
pub fn scenario(key: &str) -> Option<BoardTestScenario> {
    CATALOG.get(key).cloned()
}

/// All scenario keys in stable (sorted) order.
pub fn scenario_keys() -> Vec<&'static str> {
    CATALOG.keys().copied().collect()
}

/// Deep copies of every scenario, in key order.
pub fn all_scenarios() -> Vec<BoardTestScenario> {
    CATALOG.values().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_state;
    use crate::markers::INITIAL_PIECE_COUNT;

    #[test]
    fn initial_board_has_twelve_pieces_per_side() {
        let board = initial_board();
        assert_eq!(board.orange_pieces.len(), INITIAL_PIECE_COUNT);
        assert_eq!(board.blue_pieces.len(), INITIAL_PIECE_COUNT);
    }

    #[test]
    fn every_scenario_is_well_formed() {
        for scenario in all_scenarios() {
            scenario
                .validate()
                .unwrap_or_else(|e| panic!("{}: {e}", scenario.name));
            encode_state(&scenario.board_state)
                .unwrap_or_else(|e| panic!("{}: {e}", scenario.name));
            if let Some(expected) = &scenario.expected_board {
                encode_state(expected).unwrap_or_else(|e| panic!("{}: {e}", scenario.name));
            }
        }
    }

    #[test]
    fn lookups_return_independent_copies() {
        let mut first = scenario("basic-movement").unwrap();
        first.moves.clear();
        let second = scenario("basic-movement").unwrap();
        assert_eq!(second.moves.len(), 1);
    }

    #[test]
    fn opening_sequence_moves_land_on_the_expected_board() {
        let scenario = scenario("opening-sequence").unwrap();
        let expected = scenario.expected_board.unwrap();
        let board = encode_state(&expected).unwrap();
        for mv in &scenario.moves {
            assert_eq!(board[mv.from.cell_index()], 0.0, "{} should be vacated", mv.from);
            assert_eq!(board[mv.to.cell_index()], 1.0, "{} should be occupied", mv.to);
        }
    }

    #[test]
    fn win_scenarios_expect_an_empty_losing_side() {
        for key in ["king-hunt", "orange-victory"] {
            let scenario = scenario(key).unwrap();
            assert_eq!(scenario.expected_result, Some(GameStatus::OrangeWins));
            let expected = scenario.expected_board.unwrap();
            assert!(expected.blue_pieces.is_empty());
        }
    }
}
