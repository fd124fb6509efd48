//! Piece kind definitions and movement templates

use serde::{Deserialize, Serialize};

use crate::board::Position;

/// Movement archetype
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Leaper,
    DiagonalSlider,
    OrthogonalSlider,
    Stepper,
    CombinedSlider,
}

/// How a kind covers ground
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Movement {
    Jump(&'static [(i8, i8)]), // Land on fixed offsets, nothing in between matters
    Slide(&'static [(i8, i8)]), // Walk rays until blocked
    Step((i8, i8)),            // Single step, one direction
}

/// Knight-style (±2,±1)/(±1,±2) offsets as (drow, dcol)
pub const LEAPER_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const DIAGONAL_RAYS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub const ORTHOGONAL_RAYS: [(i8, i8); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

pub const COMBINED_RAYS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Forward direction for steppers (toward row 0)
pub const FORWARD: (i8, i8) = (-1, 0);

/// Kind definition
#[derive(Clone, Debug)]
pub struct PieceSpec {
    pub kind: PieceKind,
    pub name: &'static str,
    pub symbol: char,
    pub movement: Movement,
    /// Kind this piece becomes on the promotion row
    pub promotes_to: Option<PieceKind>,
}

impl PieceSpec {
    const fn new(
        kind: PieceKind,
        name: &'static str,
        symbol: char,
        movement: Movement,
        promotes_to: Option<PieceKind>,
    ) -> Self {
        Self {
            kind,
            name,
            symbol,
            movement,
            promotes_to,
        }
    }
}

/// All kinds, indexed by `PieceKind as usize`
pub static PIECE_SPECS: [PieceSpec; 5] = [
    PieceSpec::new(PieceKind::Leaper, "Leaper", 'N', Movement::Jump(&LEAPER_OFFSETS), None),
    PieceSpec::new(PieceKind::DiagonalSlider, "Diagonal Slider", 'B', Movement::Slide(&DIAGONAL_RAYS), None),
    PieceSpec::new(PieceKind::OrthogonalSlider, "Orthogonal Slider", 'R', Movement::Slide(&ORTHOGONAL_RAYS), None),
    PieceSpec::new(PieceKind::Stepper, "Stepper", 'P', Movement::Step(FORWARD), Some(PieceKind::CombinedSlider)),
    PieceSpec::new(PieceKind::CombinedSlider, "Combined Slider", 'Q', Movement::Slide(&COMBINED_RAYS), None),
];

impl PieceKind {
    pub const ALL: [PieceKind; 5] = [
        PieceKind::Leaper,
        PieceKind::DiagonalSlider,
        PieceKind::OrthogonalSlider,
        PieceKind::Stepper,
        PieceKind::CombinedSlider,
    ];

    pub fn spec(self) -> &'static PieceSpec {
        &PIECE_SPECS[self as usize]
    }

    pub fn movement(self) -> Movement {
        self.spec().movement
    }

    pub fn symbol(self) -> char {
        self.spec().symbol
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn promotes_to(self) -> Option<PieceKind> {
        self.spec().promotes_to
    }

    /// Parse a layout symbol (`N`, `B`, `R`, `P`, `Q`)
    pub fn from_symbol(symbol: char) -> Option<PieceKind> {
        PIECE_SPECS
            .iter()
            .find(|spec| spec.symbol == symbol)
            .map(|spec| spec.kind)
    }

    /// Nonzero 3-bit code used by fingerprinting
    pub(crate) fn code(self) -> u8 {
        self as u8 + 1
    }
}

/// Opaque identity token, assigned once per board initialization
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    pub fn index(self) -> u8 {
        self.0
    }
}

/// Identity class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Mover,
    Helper,
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub position: Position,
    pub id: PieceId,
    pub role: Role,
}

impl Piece {
    pub fn is_mover(&self) -> bool {
        self.role == Role::Mover
    }

    /// Same identity, new square
    pub(crate) fn moved_to(self, position: Position) -> Piece {
        Piece { position, ..self }
    }

    /// Same identity, promoted kind
    pub(crate) fn promoted(self) -> Piece {
        match self.kind.promotes_to() {
            Some(kind) => Piece { kind, ..self },
            None => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(PieceKind::from_symbol('N'), Some(PieceKind::Leaper));
        assert_eq!(PieceKind::from_symbol('Q'), Some(PieceKind::CombinedSlider));
        assert_eq!(PieceKind::from_symbol('K'), None);
    }

    #[test]
    fn test_spec_table_indexing() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.spec().kind, kind, "{} misplaced in table", kind.name());
        }
    }

    #[test]
    fn test_only_stepper_promotes() {
        for kind in PieceKind::ALL {
            let expected = (kind == PieceKind::Stepper).then_some(PieceKind::CombinedSlider);
            assert_eq!(kind.promotes_to(), expected);
        }
    }

    #[test]
    fn test_promotion_keeps_identity() {
        let piece = Piece {
            kind: PieceKind::Stepper,
            position: Position::new(0, 3),
            id: PieceId(12),
            role: Role::Mover,
        };
        let promoted = piece.promoted();
        assert_eq!(promoted.kind, PieceKind::CombinedSlider);
        assert_eq!(promoted.id, piece.id);
        assert_eq!(promoted.role, Role::Mover);
        assert_eq!(promoted.position, piece.position);
    }
}
