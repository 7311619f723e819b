//! Attack pattern generation for every piece kind.
//!
//! Leapers (king, knight, pawn-capture) come from per-square const tables
//! built at compile time; sliders (rook, bishop, queen) ray-cast against an
//! occupancy mask, including the first blocker and never wrapping around a
//! board edge. One `MovePattern` descriptor per kind drives a single dispatch
//! instead of a near-identical function per piece type.

use crate::board::bitboard::Bitboard;
use crate::board::piece::{Color, PieceKind};
use crate::board::square::Square;

pub const KING_ATTACKS: [Bitboard; 64] = generate_leaper_attacks(&KING_OFFSETS);
pub const KNIGHT_ATTACKS: [Bitboard; 64] = generate_leaper_attacks(&KNIGHT_OFFSETS);
pub const LIGHT_PAWN_ATTACKS: [Bitboard; 64] = generate_leaper_attacks(&LIGHT_PAWN_OFFSETS);
pub const DARK_PAWN_ATTACKS: [Bitboard; 64] = generate_leaper_attacks(&DARK_PAWN_OFFSETS);

const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const LIGHT_PAWN_OFFSETS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const DARK_PAWN_OFFSETS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const QUEEN_DIRECTIONS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// How a piece kind reaches squares: a fixed offset table or slider rays.
#[derive(Debug, Clone, Copy)]
pub enum MovePattern {
    Leaper(&'static [Bitboard; 64]),
    Slider(&'static [(i32, i32)]),
}

/// Descriptor for the attack pattern of `kind` as seen from `color`'s side.
/// Only the pawn pattern is color-dependent.
#[inline]
pub const fn pattern_for(kind: PieceKind, color: Color) -> MovePattern {
    match kind {
        PieceKind::Pawn => match color {
            Color::Light => MovePattern::Leaper(&LIGHT_PAWN_ATTACKS),
            Color::Dark => MovePattern::Leaper(&DARK_PAWN_ATTACKS),
        },
        PieceKind::Knight => MovePattern::Leaper(&KNIGHT_ATTACKS),
        PieceKind::King => MovePattern::Leaper(&KING_ATTACKS),
        PieceKind::Bishop => MovePattern::Slider(&BISHOP_DIRECTIONS),
        PieceKind::Rook => MovePattern::Slider(&ROOK_DIRECTIONS),
        PieceKind::Queen => MovePattern::Slider(&QUEEN_DIRECTIONS),
    }
}

/// Attacked-set of `kind` from `square` given `occupancy` as the obstruction
/// mask. For pawns this is the capture diagonals only.
pub fn attacks_from(
    kind: PieceKind,
    color: Color,
    square: Square,
    occupancy: Bitboard,
) -> Bitboard {
    match pattern_for(kind, color) {
        MovePattern::Leaper(table) => table[square as usize],
        MovePattern::Slider(directions) => directions
            .iter()
            .fold(0u64, |acc, &(file_step, rank_step)| {
                acc | trace_ray(square, file_step, rank_step, occupancy)
            }),
    }
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    attacks_from(PieceKind::Rook, Color::Light, square, occupancy)
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    attacks_from(PieceKind::Bishop, Color::Light, square, occupancy)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    rook_attacks(square, occupancy) | bishop_attacks(square, occupancy)
}

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square as usize],
        Color::Dark => DARK_PAWN_ATTACKS[square as usize],
    }
}

/// Walk one ray, including empty squares and the first occupied square, then
/// stop. Board edges terminate the ray without wraparound.
pub fn trace_ray(
    square: Square,
    file_step: i32,
    rank_step: i32,
    occupancy: Bitboard,
) -> Bitboard {
    let mut file = (square as i32 % 8) + file_step;
    let mut rank = (square as i32 / 8) + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if occupancy & bit != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

const fn generate_leaper_attacks(offsets: &[(i32, i32)]) -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;

        let mut i = 0usize;
        while i < offsets.len() {
            attacks |= set_if_valid(file + offsets[i].0, rank + offsets[i].1);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> Bitboard {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }
    1u64 << ((rank as usize) * 8 + (file as usize))
}
