//! Layout - declarative starting configuration
//!
//! A layout is a square grid of cell tokens, one row per line:
//!
//! ```text
//! N N N N
//! B B B B
//! R R R R
//! G # # *P
//! ```
//!
//! `N`/`B`/`R`/`P`/`Q` seed a piece of that kind, `G` is the goal, `#` is
//! unoccupiable and `.` is empty. A leading `*` marks the mover, which must
//! be a stepper. Steppers seeded on the promotion row are placed promoted.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Position, SquareKind, MAX_BOARD_SIZE};
use crate::pieces::{Piece, PieceId, PieceKind, Role};
use crate::rules::promotes_on;

/// Rows of the reference puzzle
pub const REFERENCE_ROWS: [&str; 4] = ["N N N N", "B B B B", "R R R R", "G # # *P"];

/// Reasons a layout cannot become a board
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },

    #[error("layout is {size}x{size}, largest supported is {max}x{max}")]
    TooLarge { size: usize, max: u8 },

    #[error("unknown cell token {token:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, token: String },

    #[error("layout needs exactly one goal square, found {0}")]
    GoalCount(usize),

    #[error("layout needs exactly one mover, found {0}")]
    MoverCount(usize),

    #[error("mover must start as a Stepper, found {0:?}")]
    MoverNotStepper(PieceKind),

    #[error("failed to read layout: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid layout JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One parsed cell token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Goal,
    Unoccupiable,
    Piece { kind: PieceKind, mover: bool },
}

impl Cell {
    pub fn parse(token: &str) -> Option<Cell> {
        match token {
            "." => Some(Cell::Empty),
            "G" => Some(Cell::Goal),
            "#" => Some(Cell::Unoccupiable),
            _ => {
                let (mover, rest) = match token.strip_prefix('*') {
                    Some(rest) => (true, rest),
                    None => (false, token),
                };
                let mut chars = rest.chars();
                let symbol = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                PieceKind::from_symbol(symbol).map(|kind| Cell::Piece { kind, mover })
            }
        }
    }
}

/// Named grid of cell tokens
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default = "default_name")]
    pub name: String,
    pub rows: Vec<String>,
}

fn default_name() -> String {
    "unnamed".to_string()
}

impl Layout {
    /// The fixed reference puzzle
    pub fn reference() -> Self {
        Self {
            name: "reference".to_string(),
            rows: REFERENCE_ROWS.iter().map(|r| r.to_string()).collect(),
        }
    }

    /// Parse a text grid; blank lines and `;` comments are skipped
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let rows: Vec<String> = text
            .lines()
            .map(|line| line.split(';').next().unwrap_or("").trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        let layout = Self {
            name: default_name(),
            rows,
        };
        layout.cells()?;
        Ok(layout)
    }

    /// Parse `{ "name": ..., "rows": [...] }`
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let layout: Layout = serde_json::from_str(json)?;
        layout.cells()?;
        Ok(layout)
    }

    /// Load from a file: `.json` is JSON, anything else is a text grid
    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let mut layout = if is_json {
            Self::from_json(&content)?
        } else {
            Self::parse(&content)?
        };
        if layout.name == "unnamed" {
            if let Some(stem) = path.file_stem() {
                layout.name = stem.to_string_lossy().into_owned();
            }
        }
        Ok(layout)
    }

    /// Tokenize into a square grid of cells
    pub fn cells(&self) -> Result<Vec<Vec<Cell>>, LayoutError> {
        if self.rows.is_empty() {
            return Err(LayoutError::Empty);
        }
        let size = self.rows.len();
        if size > MAX_BOARD_SIZE as usize {
            return Err(LayoutError::TooLarge { size, max: MAX_BOARD_SIZE });
        }

        let mut grid = Vec::with_capacity(size);
        for (row, line) in self.rows.iter().enumerate() {
            let cells = line
                .split_whitespace()
                .enumerate()
                .map(|(col, token)| {
                    Cell::parse(token).ok_or_else(|| LayoutError::UnknownCell {
                        row,
                        col,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if cells.len() != size {
                return Err(LayoutError::NotSquare {
                    row,
                    len: cells.len(),
                    expected: size,
                });
            }
            grid.push(cells);
        }
        Ok(grid)
    }

    /// Validate and build the starting board
    pub fn build(&self) -> Result<Board, LayoutError> {
        let grid = self.cells()?;
        let size = grid.len() as u8;

        let mut goals = Vec::new();
        let mut movers = Vec::new();
        let mut kinds = Vec::with_capacity(grid.len() * grid.len());
        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let pos = Position::new(row as u8, col as u8);
                kinds.push(match cell {
                    Cell::Goal => {
                        goals.push(pos);
                        SquareKind::Goal
                    }
                    Cell::Unoccupiable => SquareKind::Unoccupiable,
                    Cell::Piece { kind, mover: true } => {
                        movers.push(*kind);
                        SquareKind::Ordinary
                    }
                    _ => SquareKind::Ordinary,
                });
            }
        }

        let goal = match goals.as_slice() {
            [goal] => *goal,
            _ => return Err(LayoutError::GoalCount(goals.len())),
        };
        match movers.as_slice() {
            [PieceKind::Stepper] => {}
            [kind] => return Err(LayoutError::MoverNotStepper(*kind)),
            _ => return Err(LayoutError::MoverCount(movers.len())),
        }

        // Identities are handed out in row-major seed order
        let mut board = Board::from_kinds(size, kinds, goal);
        let mut next_id = 0u8;
        for (row, cells) in grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Cell::Piece { kind, mover } = *cell {
                    let piece = Piece {
                        kind,
                        position: Position::new(row as u8, col as u8),
                        id: PieceId(next_id),
                        role: if mover { Role::Mover } else { Role::Helper },
                    };
                    // Steppers seeded on the promotion row start promoted
                    if promotes_on(&board, &piece, piece.position) {
                        tracing::debug!("{:?} seeded on promotion row at {}", kind, piece.position);
                        board.place(piece.promoted());
                    } else {
                        board.place(piece);
                    }
                    next_id = next_id.wrapping_add(1);
                }
            }
        }

        tracing::debug!(
            "Built layout {}: {}x{}, {} pieces",
            self.name,
            size,
            size,
            board.piece_count()
        );
        Ok(board)
    }
}

/// Starting board of the reference puzzle
pub fn initial_board() -> Board {
    Layout::reference()
        .build()
        .expect("reference layout is well-formed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_builds() {
        let board = Layout::reference().build().unwrap();
        let mover = board.mover().unwrap();
        assert_eq!(mover.kind, PieceKind::Stepper);
        assert_eq!(mover.position, Position::new(3, 3));
        assert_eq!(board.pieces().filter(|p| !p.is_mover()).count(), 12);
    }

    #[test]
    fn test_identity_tokens_are_unique() {
        let board = initial_board();
        let mut ids: Vec<_> = board.pieces().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), board.piece_count());
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let layout = Layout::parse("; tiny\n\nG .\n*P .\n").unwrap();
        assert_eq!(layout.rows, vec!["G .", "*P ."]);
        let board = layout.build().unwrap();
        assert_eq!(board.size(), 2);
        assert_eq!(board.goal(), Position::new(0, 0));
    }

    #[test]
    fn test_steppers_on_promotion_row_start_promoted() {
        let board = Layout::parse("*P . G\n. . .\nP . .").unwrap().build().unwrap();
        let mover = board.mover().unwrap();
        assert_eq!(mover.position, Position::new(0, 0));
        assert_eq!(mover.kind, PieceKind::CombinedSlider);
        assert!(!crate::rules::legal_destinations(mover, &board).is_empty());

        // Helper steppers below the promotion row are untouched
        let helper = board.piece_at(Position::new(2, 0)).unwrap();
        assert_eq!(helper.kind, PieceKind::Stepper);
        assert_eq!(helper.id, PieceId(1));

        let seeded_helper = Layout::parse("P G\n*P .").unwrap().build().unwrap();
        assert_eq!(seeded_helper.piece_at(Position::new(0, 0)).unwrap().kind, PieceKind::CombinedSlider);
        assert_eq!(seeded_helper.mover().unwrap().kind, PieceKind::Stepper);
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let err = Layout::parse("N N\n*P\n").unwrap_err();
        assert!(matches!(err, LayoutError::NotSquare { row: 1, len: 1, expected: 2 }));
    }

    #[test]
    fn test_rejects_unknown_token() {
        let err = Layout::parse("K G\n*P .\n").unwrap_err();
        assert!(matches!(err, LayoutError::UnknownCell { row: 0, col: 0, .. }));
    }

    #[test]
    fn test_rejects_goal_and_mover_counts() {
        let no_goal = Layout::parse("*P .\n. .\n").unwrap();
        assert!(matches!(no_goal.build(), Err(LayoutError::GoalCount(0))));

        let two_goals = Layout::parse("*P G\nG .\n").unwrap();
        assert!(matches!(two_goals.build(), Err(LayoutError::GoalCount(2))));

        let two_movers = Layout::parse("*P G\n*P .\n").unwrap();
        assert!(matches!(two_movers.build(), Err(LayoutError::MoverCount(2))));

        let no_mover = Layout::parse("P G\n. .\n").unwrap();
        assert!(matches!(no_mover.build(), Err(LayoutError::MoverCount(0))));
    }

    #[test]
    fn test_rejects_non_stepper_mover() {
        let layout = Layout::parse("*R G\n. .\n").unwrap();
        assert!(matches!(
            layout.build(),
            Err(LayoutError::MoverNotStepper(PieceKind::OrthogonalSlider))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{ "name": "corner", "rows": ["G .", ". *P"] }"#;
        let layout = Layout::from_json(json).unwrap();
        assert_eq!(layout.name, "corner");
        assert!(layout.build().is_ok());

        let unnamed = Layout::from_json(r#"{ "rows": ["G .", ". *P"] }"#).unwrap();
        assert_eq!(unnamed.name, "unnamed");

        assert!(matches!(Layout::from_json("{"), Err(LayoutError::Json(_))));
    }
}
