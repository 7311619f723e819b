//! Tick-shared cursor state.
//!
//! The rotary tick handler runs asynchronously with respect to the poll loop
//! and mutates the cursor, a multi-word structure, so every access outside
//! the handler goes through a scoped critical section: enter, run the
//! closure, release on every exit path. On the host the section is a mutex;
//! on hardware the same shape is interrupt masking.
//!
//! The cursor walks the display linearly (row-major, wrapping at 64), which
//! is how a single encoder sweeps a two-dimensional board.

use std::sync::{Mutex, PoisonError};

/// Cursor cell contents: current and last-acknowledged display positions
/// (linear, `y * 8 + x`) plus the redraw-needed flag.
#[derive(Debug, Clone, Copy)]
pub struct CursorSnapshot {
    pub pos: u8,
    pub prev: u8,
    pub redraw: bool,
}

#[derive(Debug)]
pub struct SharedCursor {
    cell: Mutex<CursorSnapshot>,
}

impl SharedCursor {
    pub fn new(start: u8) -> Self {
        Self {
            cell: Mutex::new(CursorSnapshot {
                pos: start % 64,
                prev: start % 64,
                redraw: false,
            }),
        }
    }

    /// Scoped critical section over the cursor cell.
    pub fn with<T>(&self, f: impl FnOnce(&mut CursorSnapshot) -> T) -> T {
        let mut guard = self
            .cell
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Tick-handler entry point: advance the cursor and flag a redraw.
    /// `prev` is left alone so coalesced ticks still repaint the square the
    /// poll loop last acknowledged.
    pub fn apply_delta(&self, delta: i8) {
        if delta == 0 {
            return;
        }
        self.with(|cell| {
            cell.pos = (i16::from(cell.pos) + i16::from(delta)).rem_euclid(64) as u8;
            cell.redraw = true;
        });
    }

    /// Consume a pending movement: returns `(previous, current)` positions
    /// exactly once per flagged movement and acknowledges the new position.
    pub fn take_movement(&self) -> Option<(u8, u8)> {
        self.with(|cell| {
            if !cell.redraw {
                return None;
            }
            let movement = (cell.prev, cell.pos);
            cell.prev = cell.pos;
            cell.redraw = false;
            Some(movement)
        })
    }

    #[inline]
    pub fn position(&self) -> u8 {
        self.with(|cell| cell.pos)
    }
}
