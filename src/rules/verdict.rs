//! Terminal-state classification.
//!
//! After a move completes, the side now to move either has a legal move
//! (play continues), or the position is checkmate when its king is attacked
//! and stalemate otherwise. Both kings' check masks are computed so callers
//! can also spot an impossible position where the mover left its own king
//! attacked.

use crate::board::piece::Color;
use crate::board::position::Position;
use crate::rules::check::both_kings_check_masks;
use crate::rules::legal::side_has_legal_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Continue,
    /// The named color is mated.
    Checkmate(Color),
    Stalemate,
}

impl Verdict {
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Verdict::Continue)
    }
}

/// Classify the position for the side to move.
pub fn assess(position: &Position) -> Verdict {
    let side = position.side_to_move;
    let masks = both_kings_check_masks(position);

    if side_has_legal_move(position, side) {
        return Verdict::Continue;
    }
    if masks[side.index()].in_check() {
        Verdict::Checkmate(side)
    } else {
        Verdict::Stalemate
    }
}
