//! Square grid geometry and board storage

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pieces::{Piece, Role};

/// Reference board dimension (4x4)
pub const DEFAULT_BOARD_SIZE: u8 = 4;

/// Largest dimension a layout may declare
pub const MAX_BOARD_SIZE: u8 = 16;

/// Grid coordinates, 0-indexed from the top-left corner
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two squares
    pub fn manhattan(&self, other: Position) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// What a square is, independent of what stands on it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareKind {
    Ordinary,
    Goal,
    Unoccupiable,
}

/// One cell of the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub kind: SquareKind,
    pub occupant: Option<Piece>,
}

// ============================================================================
// BOARD
// ============================================================================

/// Full grid snapshot (clone to derive a successor)
///
/// Boards handed out by this crate are never mutated in place: every
/// board-producing operation returns a fresh value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: u8,
    /// Row-major squares, `size * size` long
    squares: Vec<Square>,
    goal: Position,
}

impl Board {
    /// Create an unpopulated board from square kinds. The caller guarantees
    /// `kinds.len() == size * size` and that `goal` is the only Goal square.
    pub(crate) fn from_kinds(size: u8, kinds: Vec<SquareKind>, goal: Position) -> Self {
        let squares = kinds
            .into_iter()
            .map(|kind| Square { kind, occupant: None })
            .collect();
        Self { size, squares, goal }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Board dimension (squares per side)
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Position of the Goal square
    pub fn goal(&self) -> Position {
        self.goal
    }

    /// Row a forward-only stepper promotes on
    pub fn promotion_row(&self) -> u8 {
        let (dr, _) = crate::pieces::FORWARD;
        if dr < 0 {
            0
        } else {
            self.size - 1
        }
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Step from `pos` by a signed offset, `None` if it leaves the board
    pub fn offset(&self, pos: Position, dr: i8, dc: i8) -> Option<Position> {
        let row = pos.row as i16 + dr as i16;
        let col = pos.col as i16 + dc as i16;
        if row < 0 || col < 0 || row >= self.size as i16 || col >= self.size as i16 {
            return None;
        }
        Some(Position::new(row as u8, col as u8))
    }

    pub fn square(&self, pos: Position) -> Option<&Square> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.squares.get(self.index(pos))
    }

    /// Kind of the square at `pos`, `None` when off the board
    pub fn square_kind(&self, pos: Position) -> Option<SquareKind> {
        self.square(pos).map(|sq| sq.kind)
    }

    /// Piece at `pos`, if any
    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.square(pos).and_then(|sq| sq.occupant.as_ref())
    }

    /// In bounds, not Unoccupiable, and empty
    pub fn is_open(&self, pos: Position) -> bool {
        match self.square(pos) {
            Some(sq) => sq.kind != SquareKind::Unoccupiable && sq.occupant.is_none(),
            None => false,
        }
    }

    /// Iterate pieces in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.squares.iter().filter_map(|sq| sq.occupant.as_ref())
    }

    /// Number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    /// The piece carrying the mover identity class
    pub fn mover(&self) -> Option<&Piece> {
        self.pieces().find(|p| p.role == Role::Mover)
    }

    /// Iterate all positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// Squares in row-major order
    pub(crate) fn squares(&self) -> &[Square] {
        &self.squares
    }

    // ========================================================================
    // MUTATION (crate-internal, only on freshly cloned boards)
    // ========================================================================

    pub(crate) fn take(&mut self, pos: Position) -> Option<Piece> {
        let idx = self.index(pos);
        self.squares.get_mut(idx).and_then(|sq| sq.occupant.take())
    }

    /// Write `piece` into the square its position names
    pub(crate) fn place(&mut self, piece: Piece) {
        let idx = self.index(piece.position);
        if let Some(sq) = self.squares.get_mut(idx) {
            sq.occupant = Some(piece);
        }
    }

    fn index(&self, pos: Position) -> usize {
        pos.row as usize * self.size as usize + pos.col as usize
    }

    /// Check the structural invariants: stored positions match squares,
    /// no piece stands on an Unoccupiable square, identities are unique,
    /// at most one mover is present.
    pub(crate) fn is_consistent(&self) -> bool {
        let mut ids = Vec::with_capacity(self.squares.len());
        let mut movers = 0;
        for (pos, sq) in self.positions().zip(&self.squares) {
            if let Some(piece) = sq.occupant {
                if piece.position != pos || sq.kind == SquareKind::Unoccupiable {
                    return false;
                }
                if ids.contains(&piece.id) {
                    return false;
                }
                ids.push(piece.id);
                if piece.role == Role::Mover {
                    movers += 1;
                }
            }
        }
        movers <= 1
    }
}

impl fmt::Display for Board {
    /// Render as a layout grid: same tokens `Layout::parse` accepts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            let mut tokens = Vec::with_capacity(self.size as usize);
            for col in 0..self.size {
                let sq = &self.squares[self.index(Position::new(row, col))];
                let token = match (sq.occupant, sq.kind) {
                    (Some(piece), _) => {
                        let symbol = piece.kind.symbol();
                        if piece.role == Role::Mover {
                            format!("*{symbol}")
                        } else {
                            symbol.to_string()
                        }
                    }
                    (None, SquareKind::Goal) => "G".to_string(),
                    (None, SquareKind::Unoccupiable) => "#".to_string(),
                    (None, SquareKind::Ordinary) => ".".to_string(),
                };
                tokens.push(format!("{token:>2}"));
            }
            writeln!(f, "{}", tokens.join(" "))?;
        }
        Ok(())
    }
}
