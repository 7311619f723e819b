//! Board display abstraction.
//!
//! The controller paints one square at a time through `BoardDisplay`, the
//! same contract the firmware LCD driver offers, and never repaints squares
//! that did not change. Display coordinates are top-left origin with the
//! Dark back rank on row 0.
//!
//! `TerminalDisplay` is the host implementation: a frame buffer flushed as
//! ANSI truecolor, keeping the panel's checker palette.

use std::io::{self, Write};

use crate::board::piece::Piece;

/// Glyph for a square's occupant: the algebraic letter, or a blank.
#[inline]
pub fn glyph(piece: Option<Piece>) -> char {
    piece.map_or(' ', |p| p.letter())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const LIGHT_SQUARE: Rgb = Rgb { r: 240, g: 217, b: 183 };
pub const DARK_SQUARE: Rgb = Rgb { r: 180, g: 135, b: 102 };
pub const CURSOR_TINT: Rgb = Rgb { r: 120, g: 180, b: 240 };
pub const LOCKED_TINT: Rgb = Rgb { r: 240, g: 200, b: 80 };
pub const CANDIDATE_TINT: Rgb = Rgb { r: 140, g: 220, b: 140 };

/// How a square is currently highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareStyle {
    Plain,
    Cursor,
    Locked,
    Candidate,
}

impl SquareStyle {
    /// Background color for a square at display `(x, y)`.
    pub fn background(self, x: u8, y: u8) -> Rgb {
        match self {
            SquareStyle::Plain => {
                if (x + y) % 2 == 0 {
                    LIGHT_SQUARE
                } else {
                    DARK_SQUARE
                }
            }
            SquareStyle::Cursor => CURSOR_TINT,
            SquareStyle::Locked => LOCKED_TINT,
            SquareStyle::Candidate => CANDIDATE_TINT,
        }
    }
}

pub trait BoardDisplay {
    /// Paint one square. `glyph` is the piece letter, or `' '` when empty.
    fn paint_square(&mut self, x: u8, y: u8, glyph: char, style: SquareStyle);

    /// Replace the one-line status area under the board.
    fn status_line(&mut self, text: &str);
}

/// Host-side display: an 8x8 cell buffer plus status text, flushed on demand.
pub struct TerminalDisplay {
    cells: [[(char, SquareStyle); 8]; 8],
    status: String,
    credits: &'static str,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            cells: [[(' ', SquareStyle::Plain); 8]; 8],
            status: String::new(),
            credits: "rotate to move, press to select",
        }
    }

    /// Flush the frame buffer to `out` as ANSI truecolor.
    pub fn present(&self, out: &mut impl Write) -> io::Result<()> {
        for (y, row) in self.cells.iter().enumerate() {
            write!(out, "{} ", 8 - y)?;
            for (x, &(glyph, style)) in row.iter().enumerate() {
                let bg = style.background(x as u8, y as u8);
                write!(
                    out,
                    "\x1b[48;2;{};{};{}m\x1b[30m {} \x1b[0m",
                    bg.r, bg.g, bg.b, glyph
                )?;
            }
            writeln!(out)?;
        }
        writeln!(out, "   a  b  c  d  e  f  g  h")?;
        writeln!(out, "{}", self.status)?;
        writeln!(out, "{}", self.credits)?;
        out.flush()
    }

    pub fn cell(&self, x: u8, y: u8) -> (char, SquareStyle) {
        self.cells[y as usize][x as usize]
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardDisplay for TerminalDisplay {
    fn paint_square(&mut self, x: u8, y: u8, glyph: char, style: SquareStyle) {
        self.cells[y as usize][x as usize] = (glyph, style);
    }

    fn status_line(&mut self, text: &str) {
        self.status.clear();
        self.status.push_str(text);
    }
}
