//! Static board analysis for display and tooling
//!
//! Reports where the mover stands relative to promotion and the goal using
//! the same route walks as the informed-search estimate.

use std::fmt;

use serde::Serialize;

use crate::board::{Board, Position};
use crate::heuristic::{column_blockers, column_first_blockers, estimate, promotion_square, route_blockers};
use crate::rules::is_promoted;

/// Move count that may be unbounded
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    Finite(u32),
    Infinite,
}

impl Distance {
    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(n) => write!(f, "{}", n),
            Distance::Infinite => write!(f, "inf"),
        }
    }
}

/// Snapshot of the mover's situation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BoardAnalysis {
    pub mover_position: Option<Position>,
    pub promoted: bool,
    /// Rows left before promotion (0 once promoted)
    pub moves_to_promotion: Distance,
    /// Pieces in the mover's column between it and the promotion row
    pub pieces_above: u32,
    /// Heuristic estimate of remaining moves
    pub moves_to_goal: Distance,
    /// Pieces on the mover's route to the goal
    pub blocking_count: u32,
}

impl BoardAnalysis {
    fn without_mover() -> Self {
        Self {
            mover_position: None,
            promoted: false,
            moves_to_promotion: Distance::Infinite,
            pieces_above: 0,
            moves_to_goal: Distance::Infinite,
            blocking_count: 0,
        }
    }
}

/// Analyze `board`. Never fails; a board without a mover reports
/// unbounded distances.
pub fn analyze(board: &Board) -> BoardAnalysis {
    let Some(mover) = board.mover() else {
        return BoardAnalysis::without_mover();
    };

    let pos = mover.position;
    let goal = board.goal();
    let promotion = promotion_square(board, pos);
    let promoted = is_promoted(mover);
    let pieces_above = column_blockers(board, pos, promotion.row);

    let (moves_to_promotion, blocking_count) = if promoted {
        (0, column_first_blockers(board, pos, goal))
    } else {
        (
            pos.row.abs_diff(promotion.row) as u32,
            pieces_above + route_blockers(board, promotion, goal),
        )
    };

    BoardAnalysis {
        mover_position: Some(pos),
        promoted,
        moves_to_promotion: Distance::Finite(moves_to_promotion),
        pieces_above,
        moves_to_goal: Distance::Finite(estimate(board)),
        blocking_count,
    }
}
