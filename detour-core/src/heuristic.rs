//! Remaining-cost estimate for informed search
//!
//! The estimate charges one unit per square the mover still has to cover
//! and one unit (times `blocker_weight`) per piece standing on its route.
//! It is deliberately inadmissible: a blocker that costs several moves to
//! clear is charged once, while a blocker vacated by the same move that
//! clears another is charged twice. Informed search therefore returns short
//! solutions quickly but not always minimal ones.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Position};
use crate::rules::is_promoted;

/// Estimate reported when no mover is on the board
pub const NO_MOVER_ESTIMATE: u32 = u32::MAX / 2;

/// Heuristic weights
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heuristics {
    /// Cost charged per piece on the mover's route
    pub blocker_weight: u32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self { blocker_weight: 1 }
    }
}

/// Estimate with default weights
pub fn estimate(board: &Board) -> u32 {
    estimate_with(board, &Heuristics::default())
}

/// Estimate remaining moves to a winning board
pub fn estimate_with(board: &Board, heuristics: &Heuristics) -> u32 {
    let mover = match board.mover() {
        Some(m) => *m,
        None => return NO_MOVER_ESTIMATE,
    };
    let goal = board.goal();

    if is_promoted(&mover) {
        return mover.position.manhattan(goal);
    }

    let pos = mover.position;
    let promotion = promotion_square(board, pos);
    let distance = pos.row.abs_diff(promotion.row) as u32 + promotion.manhattan(goal);
    let blockers = column_blockers(board, pos, promotion.row) + route_blockers(board, promotion, goal);

    distance.saturating_add(blockers.saturating_mul(heuristics.blocker_weight))
}

/// Square where the mover would promote, straight ahead in its column
pub(crate) fn promotion_square(board: &Board, pos: Position) -> Position {
    Position::new(board.promotion_row(), pos.col)
}

/// Pieces strictly between `pos` and `target_row` in `pos`'s column,
/// `target_row` included
pub(crate) fn column_blockers(board: &Board, pos: Position, target_row: u8) -> u32 {
    count_pieces(board, walk(pos, Position::new(target_row, pos.col)))
}

/// Pieces on the two-leg route from `from` to `goal`: along `from`'s row to
/// the goal column, then along the goal column to the goal row. `from` is
/// excluded, `goal` is included.
pub(crate) fn route_blockers(board: &Board, from: Position, goal: Position) -> u32 {
    let corner = Position::new(from.row, goal.col);
    count_pieces(board, walk(from, corner)) + count_pieces(board, walk(corner, goal))
}

/// Pieces on the two-leg route taken column first: along `from`'s column to
/// the goal row, then along the goal row to the goal column
pub(crate) fn column_first_blockers(board: &Board, from: Position, goal: Position) -> u32 {
    let corner = Position::new(goal.row, from.col);
    count_pieces(board, walk(from, corner)) + count_pieces(board, walk(corner, goal))
}

/// Squares after `from` up to and including `to` along a shared row or column
fn walk(from: Position, to: Position) -> impl Iterator<Item = Position> {
    let dr = (to.row as i16 - from.row as i16).signum();
    let dc = (to.col as i16 - from.col as i16).signum();
    let steps = from.row.abs_diff(to.row).max(from.col.abs_diff(to.col)) as i16;
    (1..=steps).map(move |i| {
        Position::new(
            (from.row as i16 + dr * i) as u8,
            (from.col as i16 + dc * i) as u8,
        )
    })
}

fn count_pieces(board: &Board, squares: impl Iterator<Item = Position>) -> u32 {
    squares.filter(|pos| board.piece_at(*pos).is_some()).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{initial_board, Layout};

    #[test]
    fn test_reference_estimate() {
        // 3 rows up + (0,3)->(3,0) is 6, column (2,3),(1,3),(0,3) has 3 pieces,
        // row 0 (0,2),(0,1),(0,0) has 3, column 0 (1,0),(2,0) has 2, goal empty
        assert_eq!(estimate(&initial_board()), 3 + 6 + 3 + 3 + 2);
    }

    #[test]
    fn test_clear_board_is_pure_distance() {
        let board = Layout::parse(". . . .\n. . . .\n. . . .\nG . . *P").unwrap().build().unwrap();
        assert_eq!(estimate(&board), 3 + 6);
    }

    #[test]
    fn test_promoted_mover_uses_manhattan() {
        let board = Layout::parse("Q N N Q\nB B B B\nR R R R\nG # # *P").unwrap().build().unwrap();
        let mut promoted = board.clone();
        let mover = promoted.take(Position::new(3, 3)).unwrap();
        promoted.place(mover.promoted());
        // Blockers are ignored once promoted
        assert_eq!(estimate(&promoted), 3);
    }

    #[test]
    fn test_blocker_weight_scales_penalty() {
        let board = initial_board();
        let heavy = Heuristics { blocker_weight: 3 };
        assert_eq!(estimate_with(&board, &heavy), 9 + 8 * 3);
    }

    #[test]
    fn test_huge_blocker_weight_saturates() {
        let board = initial_board();
        let extreme = Heuristics { blocker_weight: u32::MAX };
        assert_eq!(estimate_with(&board, &extreme), u32::MAX);

        // A clear route never touches the weight
        let clear = Layout::parse(". . . .\n. . . .\n. . . .\nG . . *P").unwrap().build().unwrap();
        assert_eq!(estimate_with(&clear, &extreme), 9);
    }

    #[test]
    fn test_no_mover_sentinel() {
        let mut board = initial_board();
        board.take(Position::new(3, 3));
        assert_eq!(estimate(&board), NO_MOVER_ESTIMATE);
    }

    #[test]
    fn test_walk_excludes_start() {
        let squares: Vec<_> = walk(Position::new(0, 3), Position::new(0, 0)).collect();
        assert_eq!(squares, vec![Position::new(0, 2), Position::new(0, 1), Position::new(0, 0)]);
        assert_eq!(walk(Position::new(2, 2), Position::new(2, 2)).count(), 0);
    }
}
