//! Core types for the checkers E2E harness

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::markers::BOARD_DIMENSION;

/// A cell on the 8x8 board.
///
/// Coordinates are signed so that malformed fixture positions are
/// representable and can be rejected by the encoder instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GamePosition {
    pub x: i32,
    pub y: i32,
}

impl GamePosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when both coordinates lie within `[0, BOARD_DIMENSION)`.
    pub fn in_bounds(&self) -> bool {
        let dim = BOARD_DIMENSION as i32;
        (0..dim).contains(&self.x) && (0..dim).contains(&self.y)
    }

    /// Row-major cell index (`8*y + x`). Caller must check bounds first.
    pub fn cell_index(&self) -> usize {
        BOARD_DIMENSION * self.y as usize + self.x as usize
    }
}

impl std::fmt::Display for GamePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Piece ownership / side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceColor {
    Orange,
    Blue,
}

impl PieceColor {
    pub fn opponent(&self) -> Self {
        match self {
            PieceColor::Orange => PieceColor::Blue,
            PieceColor::Blue => PieceColor::Orange,
        }
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceColor::Orange => write!(f, "orange"),
            PieceColor::Blue => write!(f, "blue"),
        }
    }
}

/// Visual state a rendered piece can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceState {
    Normal,
    King,
    Selected,
}

/// Terminal status, derived by classifying the surface's message text.
/// Never stored authoritatively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    InProgress,
    OrangeWins,
    BlueWins,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in-progress"),
            GameStatus::OrangeWins => write!(f, "orange-wins"),
            GameStatus::BlueWins => write!(f, "blue-wins"),
        }
    }
}

/// One piece in a declarative board description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceData {
    pub position: GamePosition,
    pub is_king: bool,
    pub color: PieceColor,
}

impl PieceData {
    pub const fn normal(color: PieceColor, x: i32, y: i32) -> Self {
        Self {
            position: GamePosition::new(x, y),
            is_king: false,
            color,
        }
    }

    pub const fn king(color: PieceColor, x: i32, y: i32) -> Self {
        Self {
            position: GamePosition::new(x, y),
            is_king: true,
            color,
        }
    }
}

/// Declarative board description. Built as literal fixture data and cloned
/// per scenario run; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub orange_pieces: Vec<PieceData>,
    pub blue_pieces: Vec<PieceData>,
    pub current_turn: PieceColor,
    pub game_over: bool,
}

impl GameState {
    /// All pieces of both colors, orange first.
    pub fn pieces(&self) -> impl Iterator<Item = &PieceData> {
        self.orange_pieces.iter().chain(self.blue_pieces.iter())
    }

    pub fn count(&self, color: PieceColor) -> usize {
        match color {
            PieceColor::Orange => self.orange_pieces.len(),
            PieceColor::Blue => self.blue_pieces.len(),
        }
    }
}

/// One ply against the live board.
///
/// The acting side is an explicit field rather than an implicit default;
/// the constructors set it to orange, the color that moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveData {
    pub from: GamePosition,
    pub to: GamePosition,
    pub is_jump: bool,
    pub captured_piece: Option<GamePosition>,
    pub player: PieceColor,
}

impl MoveData {
    /// A plain diagonal step by the orange player.
    pub const fn step(from: GamePosition, to: GamePosition) -> Self {
        Self {
            from,
            to,
            is_jump: false,
            captured_piece: None,
            player: PieceColor::Orange,
        }
    }

    /// A jump capture by the orange player. `captured` is the cell the
    /// jumped-over opposing piece vacates.
    pub const fn jump(from: GamePosition, to: GamePosition, captured: GamePosition) -> Self {
        Self {
            from,
            to,
            is_jump: true,
            captured_piece: Some(captured),
            player: PieceColor::Orange,
        }
    }

    pub fn by(mut self, player: PieceColor) -> Self {
        self.player = player;
        self
    }

    /// Reject malformed moves before any browser interaction happens.
    pub fn validate(&self) -> Result<()> {
        if self.is_jump && self.captured_piece.is_none() {
            return Err(Error::MalformedJump {
                from: self.from,
                to: self.to,
            });
        }
        Ok(())
    }
}

/// Expected piece counts for a pre-move baseline check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceCounts {
    pub orange: usize,
    pub blue: usize,
}

/// One immutable test fixture: a starting board, a move sequence, and the
/// expectations to assert against the live surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardTestScenario {
    pub name: String,
    pub description: String,
    pub board_state: GameState,
    pub moves: Vec<MoveData>,
    pub expected_board: Option<GameState>,
    pub expected_counts: Option<PieceCounts>,
    pub expected_result: Option<GameStatus>,
}

impl BoardTestScenario {
    /// Validate every move up front; a malformed fixture should fail before
    /// the browser is ever touched.
    pub fn validate(&self) -> Result<()> {
        for mv in &self.moves {
            mv.validate()?;
        }
        Ok(())
    }
}
