//! The interactive poll loop.
//!
//! Each `poll` runs three stages in order: sample the confirm button through
//! the debounce filter and resolve a press against the selector, acknowledge
//! any cursor movement, then repaint. Painting is incremental: the desired
//! frame (piece glyphs plus cursor/lock/candidate highlights) is diffed
//! against the last painted frame and only changed squares reach the
//! display, matching the panel driver's one-square-at-a-time contract.
//!
//! A terminal verdict paints a banner and freezes the controller; a rules
//! error (unreachable through the selection layer) does the same as a fault.

use std::sync::Arc;

use crate::board::bitboard::square_mask;
use crate::board::piece::Color;
use crate::board::square::{to_display, to_index, Square};
use crate::game::selection::{LockState, SelectionOutcome, Selector};
use crate::game::session::GameSession;
use crate::hal::cursor::SharedCursor;
use crate::hal::display::{glyph, BoardDisplay, SquareStyle};
use crate::hal::input::{ConfirmButton, Debounce};
use crate::rules::errors::RulesError;
use crate::rules::verdict::Verdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerStatus {
    Running,
    Finished(Verdict),
    Fault(RulesError),
}

pub struct GameController<D: BoardDisplay, B: ConfirmButton> {
    session: GameSession,
    selector: Selector,
    cursor: Arc<SharedCursor>,
    display: D,
    button: B,
    debounce: Debounce,
    status: ControllerStatus,
    painted: [(char, SquareStyle); 64],
}

impl<D: BoardDisplay, B: ConfirmButton> GameController<D, B> {
    pub fn new(session: GameSession, cursor: Arc<SharedCursor>, display: D, button: B) -> Self {
        let mut controller = Self {
            session,
            selector: Selector::new(),
            cursor,
            display,
            button,
            debounce: Debounce::new(),
            status: ControllerStatus::Running,
            painted: [('\0', SquareStyle::Plain); 64],
        };
        controller.repaint();
        controller
    }

    #[inline]
    pub fn status(&self) -> ControllerStatus {
        self.status
    }

    #[inline]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[inline]
    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }

    /// One controller step. Input is ignored permanently once the status
    /// leaves `Running`.
    pub fn poll(&mut self) -> ControllerStatus {
        if self.status != ControllerStatus::Running {
            return self.status;
        }

        // Acknowledge movement; the frame diff below repaints what changed.
        let _ = self.cursor.take_movement();

        let pressed = self.debounce.update(self.button.sample());
        if pressed {
            self.handle_confirm(self.cursor_square());
        }

        self.repaint();
        self.status
    }

    fn cursor_square(&self) -> Square {
        let pos = self.cursor.position();
        to_index(pos % 8, pos / 8)
    }

    fn handle_confirm(&mut self, square: Square) {
        let outcome = self.selector.confirm(self.session.position(), square);
        let SelectionOutcome::MoveChosen { from, to } = outcome else {
            return;
        };

        match self.session.play(from, to) {
            Ok(verdict) if verdict.is_terminal() => {
                self.status = ControllerStatus::Finished(verdict);
            }
            Ok(_) => {}
            Err(error) => {
                self.status = ControllerStatus::Fault(error);
            }
        }
    }

    fn repaint(&mut self) {
        let cursor_square = self.cursor_square();
        let locked = match self.selector.state() {
            LockState::Locked(square) => Some(square),
            LockState::Free => None,
        };
        let candidates = self.selector.open_moves(self.session.position());

        for square in 0u8..64 {
            let style = if square == cursor_square {
                SquareStyle::Cursor
            } else if locked == Some(square) {
                SquareStyle::Locked
            } else if candidates & square_mask(square) != 0 {
                SquareStyle::Candidate
            } else {
                SquareStyle::Plain
            };
            let glyph = glyph(self.session.position().piece_at(square));

            let (x, y) = to_display(square);
            let cell = (glyph, style);
            if self.painted[square as usize] != cell {
                self.display.paint_square(x, y, glyph, style);
                self.painted[square as usize] = cell;
            }
        }

        self.display.status_line(&self.status_text());
    }

    fn status_text(&self) -> String {
        match self.status {
            ControllerStatus::Running => match self.session.turn() {
                Color::Light => "Light to move".to_string(),
                Color::Dark => "Dark to move".to_string(),
            },
            ControllerStatus::Finished(Verdict::Checkmate(loser)) => {
                format!("Checkmate: {:?} wins", loser.opposite())
            }
            ControllerStatus::Finished(Verdict::Stalemate) => "Stalemate".to_string(),
            ControllerStatus::Finished(Verdict::Continue) => "Light to move".to_string(),
            ControllerStatus::Fault(error) => format!("fault: {error}"),
        }
    }
}
