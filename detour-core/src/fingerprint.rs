//! Canonical board keys for visited-state deduplication
//!
//! Each square contributes a 4-bit code (0 = empty, 1..=5 = kind, bit 3 =
//! mover) in row-major order, so the key depends only on which kinds stand
//! where. Identity tokens and move history never enter it. The key is exact
//! for every board size.

use serde::Serialize;

use crate::board::{Board, Square};
use crate::pieces::Role;

/// Squares that fit a single `u128`
const PACKED_SQUARES: usize = 32;

/// Codes per chunk of a wide key
const CODES_PER_CHUNK: usize = 16;

const MOVER_BIT: u8 = 0b1000;

/// Comparable, hashable board key
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Fingerprint {
    /// Boards of up to 32 squares
    Packed(u128),
    /// Larger boards: 16 square codes per chunk, row-major
    Wide(Box<[u64]>),
}

/// Fingerprint of `board`'s (kind, role, position) occupancy
pub fn fingerprint(board: &Board) -> Fingerprint {
    let squares = board.squares();
    if squares.len() <= PACKED_SQUARES {
        let packed = squares
            .iter()
            .fold(0u128, |acc, sq| (acc << 4) | square_code(sq) as u128);
        Fingerprint::Packed(packed)
    } else {
        let chunks = squares
            .chunks(CODES_PER_CHUNK)
            .map(|chunk| chunk.iter().fold(0u64, |acc, sq| (acc << 4) | square_code(sq) as u64))
            .collect();
        Fingerprint::Wide(chunks)
    }
}

fn square_code(square: &Square) -> u8 {
    match square.occupant {
        Some(piece) if piece.role == Role::Mover => piece.kind.code() | MOVER_BIT,
        Some(piece) => piece.kind.code(),
        None => 0,
    }
}
