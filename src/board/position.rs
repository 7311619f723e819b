//! Canonical board state.
//!
//! `Position` owns the twelve per-kind bitboards, the per-color and combined
//! occupancy aggregates, the mirror array used for O(1) occupancy queries,
//! the side to move, and the castling rights. The bitboards are the source of
//! truth for legality; the mirror is kept exactly consistent with them and is
//! only ever consulted for rendering and selection.

use crate::board::bitboard::{set_bits, square_mask, Bitboard};
use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::square::Square;
use crate::utils::board_import::{parse_board, START_BOARD};

pub type CastlingRights = u8;

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;

#[derive(Debug, Clone)]
pub struct Position {
    // [color][kind]
    pub pieces: [[Bitboard; 6]; 2],

    // Occupancy aggregates, always the union of their constituents.
    pub occupancy_by_color: [Bitboard; 2],
    pub occupancy_all: Bitboard,

    // Rendering/selection mirror of the bitboards.
    pub mirror: [Option<Piece>; 64],

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            mirror: [None; 64],
            side_to_move: Color::Light,
            castling_rights: 0,
        }
    }
}

impl Position {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new_game() -> Self {
        parse_board(START_BOARD)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mirror[square as usize]
    }

    #[inline]
    pub fn bitboard(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.bitboard(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    /// Rebuild both aggregates from the per-kind masks.
    pub fn recalc_occupancy(&mut self) {
        for color in Color::BOTH {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::Light.index()]
            | self.occupancy_by_color[Color::Dark.index()];
    }

    /// Full structural check: aggregates match their unions, no square is
    /// claimed by two kind masks, and the mirror agrees with the bitboards.
    pub fn is_consistent(&self) -> bool {
        let mut seen: Bitboard = 0;
        for color in Color::BOTH {
            let mut union: Bitboard = 0;
            for kind in PieceKind::ALL {
                let bb = self.bitboard(color, kind);
                if bb & seen != 0 {
                    return false;
                }
                seen |= bb;
                union |= bb;
            }
            if union != self.occupancy_by_color[color.index()] {
                return false;
            }
        }
        if self.occupancy_all
            != self.occupancy_by_color[0] | self.occupancy_by_color[1]
        {
            return false;
        }

        for square in 0u8..64 {
            let from_masks = Color::BOTH.iter().find_map(|&color| {
                PieceKind::ALL.iter().find_map(|&kind| {
                    if self.bitboard(color, kind) & square_mask(square) != 0 {
                        Some(Piece::new(color, kind))
                    } else {
                        None
                    }
                })
            });
            if from_masks != self.mirror[square as usize] {
                return false;
            }
        }
        true
    }

    /// Squares occupied by `color`, as an iterator of indices.
    #[inline]
    pub fn squares_of(&self, color: Color) -> impl Iterator<Item = Square> {
        set_bits(self.occupancy_by_color[color.index()])
    }
}

#[cfg(test)]
mod tests {
    use super::{Position, CASTLE_DARK_QUEENSIDE, CASTLE_LIGHT_KINGSIDE};
    use crate::board::piece::{Color, Piece, PieceKind};

    #[test]
    fn new_game_is_structurally_consistent() {
        let position = Position::new_game();
        assert!(position.is_consistent());
        assert_eq!(position.occupancy_all.count_ones(), 32);
        assert_eq!(position.side_to_move, Color::Light);
    }

    #[test]
    fn new_game_grants_all_castling_rights() {
        let position = Position::new_game();
        assert_ne!(position.castling_rights & CASTLE_LIGHT_KINGSIDE, 0);
        assert_ne!(position.castling_rights & CASTLE_DARK_QUEENSIDE, 0);
        assert_eq!(position.castling_rights.count_ones(), 4);
    }

    #[test]
    fn kings_sit_on_their_home_squares() {
        let position = Position::new_game();
        assert_eq!(position.king_square(Color::Light), Some(4));
        assert_eq!(position.king_square(Color::Dark), Some(60));
        assert_eq!(
            position.piece_at(4),
            Some(Piece::new(Color::Light, PieceKind::King))
        );
    }
}
