//! Check detection via the superpiece technique.
//!
//! Each enemy kind's attack pattern is projected from the defending king's
//! own square and intersected with the real enemy masks. Direct checkers land
//! in the capture mask; sliding checkers additionally produce a push mask of
//! interposition squares, computed component-wise (orthogonal rays against
//! orthogonal rays, diagonal against diagonal) so crossing lines cannot leak
//! spurious squares in.

use crate::board::bitboard::{has_multiple_bits, set_bits, Bitboard};
use crate::board::piece::{Color, PieceKind};
use crate::board::position::Position;
use crate::moves::patterns::{
    attacks_from, bishop_attacks, pawn_attacks, rook_attacks, KNIGHT_ATTACKS,
};

/// Squares giving check (capture) and squares that would block a sliding
/// check if occupied by a defender (push).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckMasks {
    pub capture: Bitboard,
    pub push: Bitboard,
}

impl CheckMasks {
    #[inline]
    pub const fn in_check(&self) -> bool {
        self.capture != 0
    }

    /// Double check: more than one checker. Only meaningful while in check.
    #[inline]
    pub const fn is_double(&self) -> bool {
        has_multiple_bits(self.capture)
    }

    /// Squares a non-king defender may move to while in check: capture the
    /// checker or interpose on the checking ray.
    #[inline]
    pub const fn restriction(&self) -> Bitboard {
        self.capture | self.push
    }
}

/// Check masks for `defender`'s king. A board with no such king reports no
/// check; the callers that require a king surface that as an error instead.
pub fn check_masks(position: &Position, defender: Color) -> CheckMasks {
    let Some(king_sq) = position.king_square(defender) else {
        return CheckMasks::default();
    };
    let enemy = defender.opposite();
    let occupancy = position.occupancy_all;

    let mut capture: Bitboard = 0;
    let mut push: Bitboard = 0;

    // Leaper checkers: project the defender's own pawn pattern (a Light king
    // is checked by Dark pawns sitting on Light-pawn attack squares).
    capture |= pawn_attacks(defender, king_sq) & position.bitboard(enemy, PieceKind::Pawn);
    capture |= KNIGHT_ATTACKS[king_sq as usize] & position.bitboard(enemy, PieceKind::Knight);

    let diagonal_sliders = position.bitboard(enemy, PieceKind::Bishop)
        | position.bitboard(enemy, PieceKind::Queen);
    let orthogonal_sliders = position.bitboard(enemy, PieceKind::Rook)
        | position.bitboard(enemy, PieceKind::Queen);

    let diagonals_from_king = bishop_attacks(king_sq, occupancy);
    let orthogonals_from_king = rook_attacks(king_sq, occupancy);

    let diagonal_checkers = diagonals_from_king & diagonal_sliders;
    let orthogonal_checkers = orthogonals_from_king & orthogonal_sliders;
    capture |= diagonal_checkers | orthogonal_checkers;

    for checker in set_bits(diagonal_checkers) {
        push |= diagonals_from_king & bishop_attacks(checker, occupancy);
    }
    for checker in set_bits(orthogonal_checkers) {
        push |= orthogonals_from_king & rook_attacks(checker, occupancy);
    }

    CheckMasks { capture, push }
}

/// Union of every attack pattern of `attacker`'s pieces against the given
/// obstruction mask. Pawns contribute their capture diagonals only.
pub fn attacked_squares(position: &Position, attacker: Color, occupancy: Bitboard) -> Bitboard {
    let mut attacked: Bitboard = 0;
    for kind in PieceKind::ALL {
        for square in set_bits(position.bitboard(attacker, kind)) {
            attacked |= attacks_from(kind, attacker, square, occupancy);
        }
    }
    attacked
}

/// Squares the defending king may not step onto. The defender's king is
/// removed from the obstruction mask so a slider's ray still threatens the
/// square behind the king along the same line.
pub fn king_danger_squares(position: &Position, defender: Color) -> Bitboard {
    let king_bb = position.bitboard(defender, PieceKind::King);
    attacked_squares(
        position,
        defender.opposite(),
        position.occupancy_all & !king_bb,
    )
}

/// Both kings' masks, indexed by color. Only one should report check in a
/// legal game; both are computed so the caller can verify that.
pub fn both_kings_check_masks(position: &Position) -> [CheckMasks; 2] {
    [
        check_masks(position, Color::Light),
        check_masks(position, Color::Dark),
    ]
}

/// Convenience wrapper used where only the boolean matters.
#[inline]
pub fn is_in_check(position: &Position, defender: Color) -> bool {
    check_masks(position, defender).in_check()
}
