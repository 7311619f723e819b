//! Piece, color, and kind types.
//!
//! Color is kept separate from kind so the per-kind bitboards can be laid out
//! as `[color][kind]`. The letter mapping here is also the wire alphabet of
//! the board import format.

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::Light, Color::Dark];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }
}

/// Piece kind, color-independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Uppercase algebraic letter for the kind.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// A colored piece as stored in the mirror board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Wire-format letter: uppercase for Light, lowercase for Dark.
    #[inline]
    pub fn letter(self) -> char {
        match self.color {
            Color::Light => self.kind.letter(),
            Color::Dark => self.kind.letter().to_ascii_lowercase(),
        }
    }

    pub fn from_letter(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Light
        } else if ch.is_ascii_lowercase() {
            Color::Dark
        } else {
            return None;
        };

        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };

        Some(Self { color, kind })
    }
}
