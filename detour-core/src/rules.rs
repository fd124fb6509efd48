//! Move generation, move application, promotion and the win predicate

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Position, SquareKind};
use crate::pieces::{Movement, Piece, PieceKind};

// ============================================================================
// CORE TYPES
// ============================================================================

/// A relocation of one piece (description only, see [`apply_move`])
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// Pre-move snapshot of the piece
    pub piece: Piece,
    pub promotes: bool,
}

impl Move {
    /// Describe moving `piece` to `to` on `board`
    pub fn new(board: &Board, piece: Piece, to: Position) -> Self {
        Self {
            from: piece.position,
            to,
            piece,
            promotes: promotes_on(board, &piece, to),
        }
    }
}

/// Result of a successful [`apply_move`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub board: Board,
    pub promoted: bool,
    pub won: bool,
}

/// Why a move was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("no piece at {0}")]
    NoPieceAt(Position),

    #[error("piece at {0} does not match the move's snapshot")]
    PieceMismatch(Position),

    #[error("{to} is not reachable from {from}")]
    UnreachableDestination { from: Position, to: Position },
}

// ============================================================================
// MOVE GENERATION
// ============================================================================

/// Every square `piece` may move to on `board`.
///
/// Pieces block but never capture, so a destination is always in bounds,
/// not Unoccupiable, and empty. Order is unspecified; treat it as a set.
pub fn legal_destinations(piece: &Piece, board: &Board) -> Vec<Position> {
    let mut out = Vec::new();
    match piece.kind.movement() {
        Movement::Jump(offsets) => generate_jump_destinations(board, piece.position, offsets, &mut out),
        Movement::Slide(rays) => generate_slide_destinations(board, piece.position, rays, &mut out),
        Movement::Step(dir) => generate_step_destination(board, piece.position, dir, &mut out),
    }
    out
}

/// Every legal move for every piece (all pieces are player-controlled)
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut dests = Vec::new();
    for piece in board.pieces() {
        dests.clear();
        match piece.kind.movement() {
            Movement::Jump(offsets) => generate_jump_destinations(board, piece.position, offsets, &mut dests),
            Movement::Slide(rays) => generate_slide_destinations(board, piece.position, rays, &mut dests),
            Movement::Step(dir) => generate_step_destination(board, piece.position, dir, &mut dests),
        }
        moves.extend(dests.iter().map(|&to| Move::new(board, *piece, to)));
    }
    moves
}

fn generate_jump_destinations(board: &Board, pos: Position, offsets: &[(i8, i8)], out: &mut Vec<Position>) {
    for &(dr, dc) in offsets {
        if let Some(dest) = board.offset(pos, dr, dc) {
            if board.is_open(dest) {
                out.push(dest);
            }
        }
    }
}

fn generate_slide_destinations(board: &Board, pos: Position, rays: &[(i8, i8)], out: &mut Vec<Position>) {
    for &(dr, dc) in rays {
        let mut current = pos;
        while let Some(next) = board.offset(current, dr, dc) {
            if !board.is_open(next) {
                break; // Blocked
            }
            out.push(next);
            current = next;
        }
    }
}

fn generate_step_destination(board: &Board, pos: Position, (dr, dc): (i8, i8), out: &mut Vec<Position>) {
    if let Some(dest) = board.offset(pos, dr, dc) {
        if board.is_open(dest) {
            out.push(dest);
        }
    }
}

// ============================================================================
// APPLY MOVE
// ============================================================================

/// Validate `mv` against `board` and return the successor board.
///
/// The piece standing on `mv.from` must equal the move's snapshot and
/// `mv.to` must be one of its legal destinations. `board` is untouched
/// either way.
pub fn apply_move(board: &Board, mv: &Move) -> Result<MoveOutcome, IllegalMove> {
    let piece = board.piece_at(mv.from).ok_or(IllegalMove::NoPieceAt(mv.from))?;
    if *piece != mv.piece {
        return Err(IllegalMove::PieceMismatch(mv.from));
    }
    if !legal_destinations(piece, board).contains(&mv.to) {
        return Err(IllegalMove::UnreachableDestination { from: mv.from, to: mv.to });
    }

    let promoted = promotes_on(board, piece, mv.to);
    let next = play(board, piece, mv.to);
    let won = is_win(&next);
    Ok(MoveOutcome {
        board: next,
        promoted,
        won,
    })
}

/// Apply a move already known to be legal (drawn from [`legal_moves`])
pub(crate) fn play(board: &Board, piece: &Piece, to: Position) -> Board {
    let mut next = board.clone();
    next.take(piece.position);
    let mut moved = piece.moved_to(to);
    if promotes_on(board, piece, to) {
        moved = moved.promoted();
    }
    next.place(moved);
    debug_assert!(next.is_consistent(), "move broke board invariants");
    next
}

/// Would `piece` promote by landing on `to`?
pub fn promotes_on(board: &Board, piece: &Piece, to: Position) -> bool {
    piece.kind.promotes_to().is_some() && to.row == board.promotion_row()
}

// ============================================================================
// WIN PREDICATE
// ============================================================================

/// Goal square holds the mover (helpers on the goal never count)
pub fn is_win(board: &Board) -> bool {
    let goal = board.goal();
    debug_assert_eq!(board.square_kind(goal), Some(SquareKind::Goal));
    board.piece_at(goal).is_some_and(|p| p.is_mover())
}

/// Mover has been promoted out of its stepper form
pub fn is_promoted(piece: &Piece) -> bool {
    piece.kind == PieceKind::CombinedSlider
}

/// Replay `moves` from `start`, returning the final board
pub fn replay(start: &Board, moves: &[Move]) -> Result<Board, IllegalMove> {
    let mut board = start.clone();
    for mv in moves {
        board = apply_move(&board, mv)?.board;
    }
    Ok(board)
}

// ============================================================================
// TESTS
// ============================================================================
