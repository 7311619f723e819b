//! Pawn moveable-set generation.
//!
//! Pawn pushes and captures obey different occupancy rules, and the capture
//! diagonals double as the pawn's attacked-set for check detection, so the
//! two are kept apart: `patterns::pawn_attacks` holds the diagonals, this
//! module combines them with the push logic into the moveable set.

use crate::board::bitboard::{square_mask, Bitboard};
use crate::board::piece::Color;
use crate::board::square::{rank_of, Square};
use crate::moves::patterns::pawn_attacks;

const LIGHT_START_RANK: u8 = 1;
const DARK_START_RANK: u8 = 6;

/// Forward pushes only: one square onto an empty square, plus the double
/// push from the start rank when both squares are empty.
pub fn pawn_pushes(color: Color, square: Square, occupancy: Bitboard) -> Bitboard {
    let rank = rank_of(square);
    let (single, double, start_rank) = match color {
        Color::Light => {
            if rank >= 7 {
                return 0;
            }
            (square + 8, square.checked_add(16), LIGHT_START_RANK)
        }
        Color::Dark => {
            if rank == 0 {
                return 0;
            }
            (square - 8, square.checked_sub(16), DARK_START_RANK)
        }
    };

    let single_mask = square_mask(single);
    if occupancy & single_mask != 0 {
        return 0;
    }

    let mut pushes = single_mask;
    if rank == start_rank {
        if let Some(double) = double {
            let double_mask = square_mask(double);
            if occupancy & double_mask == 0 {
                pushes |= double_mask;
            }
        }
    }
    pushes
}

/// Full moveable set: pushes onto empty squares plus diagonal captures onto
/// enemy-occupied squares only. No en passant.
pub fn pawn_moveable(
    color: Color,
    square: Square,
    occupancy_all: Bitboard,
    enemy_occupancy: Bitboard,
) -> Bitboard {
    pawn_pushes(color, square, occupancy_all) | (pawn_attacks(color, square) & enemy_occupancy)
}
