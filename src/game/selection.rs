//! Piece selection state machine.
//!
//! Two states: `Free` (the cursor roams) and `Locked(square)` (a piece of
//! the side to move is held and its legal destinations are cached). Cursor
//! motion never changes the lock; only a confirm press does. The open-move
//! cache is computed lazily on lock and dropped on unlock or execution, so
//! the ray casting runs once per selection, not once per cursor step.

use crate::board::bitboard::{square_mask, Bitboard};
use crate::board::position::Position;
use crate::board::square::Square;
use crate::rules::legal::legal_destinations;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Free,
    Locked(Square),
}

/// What a confirm press resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// A friendly piece is now held.
    Locked(Square),
    /// The press did not land on a lockable square or a destination.
    Unlocked,
    /// Nothing happened (pressed an empty or enemy square while free).
    Refused,
    /// The held piece should move from `from` to `to`.
    MoveChosen { from: Square, to: Square },
}

#[derive(Debug, Default)]
pub struct Selector {
    state: LockState,
    open_moves: Option<Bitboard>,
}

impl Default for LockState {
    fn default() -> Self {
        LockState::Free
    }
}

impl Selector {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> LockState {
        self.state
    }

    /// Cached destination set of the held piece; empty when free.
    pub fn open_moves(&mut self, position: &Position) -> Bitboard {
        match self.state {
            LockState::Free => 0,
            LockState::Locked(from) => {
                *self
                    .open_moves
                    .get_or_insert_with(|| legal_destinations(position, from))
            }
        }
    }

    /// Handle one confirmed press on `square`.
    pub fn confirm(&mut self, position: &Position, square: Square) -> SelectionOutcome {
        match self.state {
            LockState::Free => {
                let lockable = position
                    .piece_at(square)
                    .is_some_and(|piece| piece.color == position.side_to_move);
                if !lockable {
                    return SelectionOutcome::Refused;
                }
                self.state = LockState::Locked(square);
                self.open_moves = None;
                SelectionOutcome::Locked(square)
            }
            LockState::Locked(from) => {
                let destinations = self.open_moves(position);
                if destinations & square_mask(square) != 0 {
                    self.release();
                    SelectionOutcome::MoveChosen { from, to: square }
                } else {
                    self.release();
                    SelectionOutcome::Unlocked
                }
            }
        }
    }

    /// Drop the lock and the cache, e.g. after a move executes.
    pub fn release(&mut self) {
        self.state = LockState::Free;
        self.open_moves = None;
    }
}
