//! Bitboard primitives shared by every other subsystem.
//!
//! A `Bitboard` is a 64-bit mask with one bit per square, LSB = a1. The
//! `SetBits` iterator walks set bits lazily via `trailing_zeros`, replacing
//! manual 64-iteration scans at every call site.

use crate::board::square::Square;

pub type Bitboard = u64;

pub const EMPTY_BOARD: Bitboard = 0;
pub const FULL_BOARD: Bitboard = !0;

#[inline]
pub const fn square_mask(square: Square) -> Bitboard {
    1u64 << square
}

/// True when more than one bit is set. Only meaningful for non-zero masks.
#[inline]
pub const fn has_multiple_bits(mask: Bitboard) -> bool {
    mask & mask.wrapping_sub(1) != 0
}

/// Lazy iterator over the indices of set bits, lowest first.
#[derive(Debug, Clone, Copy)]
pub struct SetBits(Bitboard);

impl Iterator for SetBits {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let square = self.0.trailing_zeros() as Square;
        self.0 &= self.0 - 1;
        Some(square)
    }
}

#[inline]
pub fn set_bits(mask: Bitboard) -> SetBits {
    SetBits(mask)
}
