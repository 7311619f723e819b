//! The 64-character board wire format.
//!
//! Row-major from the far (Dark) rank to the near rank, left file to right:
//! `PNBRQK` for Light, lowercase for Dark, `.` for empty. Any other character
//! is silently an empty square, and a short string leaves the remaining
//! squares empty; leniency is deliberate, not an error path. Castling rights
//! are granted per side only when both the king and that corner's rook stand
//! on their home squares, which keeps the rights monotonic for any import.

use crate::board::bitboard::square_mask;
use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::position::Position;
use crate::board::square::to_index;
use crate::rules::castling::{geometry, CastleSide};

pub const START_BOARD: &str = "\
rnbqkbnr\
pppppppp\
................................\
PPPPPPPP\
RNBQKBNR";

/// Build a position from the wire format. Light is left to move; callers
/// flip `side_to_move` for mid-game imports.
pub fn parse_board(text: &str) -> Position {
    let mut position = Position::empty();

    for (i, ch) in text.chars().take(64).enumerate() {
        let x = (i % 8) as u8;
        let y = (i / 8) as u8;
        let square = to_index(x, y);

        if let Some(piece) = Piece::from_letter(ch) {
            position.pieces[piece.color.index()][piece.kind.index()] |= square_mask(square);
            position.mirror[square as usize] = Some(piece);
        }
    }

    position.recalc_occupancy();
    position.castling_rights = inferred_rights(&position);
    position
}

/// Exact inverse of `parse_board` for well-formed boards.
pub fn export_board(position: &Position) -> String {
    let mut out = String::with_capacity(64);
    for y in 0u8..8 {
        for x in 0u8..8 {
            let square = to_index(x, y);
            match position.piece_at(square) {
                Some(piece) => out.push(piece.letter()),
                None => out.push('.'),
            }
        }
    }
    out
}

fn inferred_rights(position: &Position) -> u8 {
    let mut rights = 0u8;
    for color in Color::BOTH {
        for side in [CastleSide::KingSide, CastleSide::QueenSide] {
            let geo = geometry(color, side);
            let king_home = position.bitboard(color, PieceKind::King)
                == square_mask(geo.king_from);
            let rook_home = position.bitboard(color, PieceKind::Rook)
                & square_mask(geo.rook_from)
                != 0;
            if king_home && rook_home {
                rights |= geo.rights_bit;
            }
        }
    }
    rights
}

#[cfg(test)]
mod tests {
    use super::{export_board, parse_board, START_BOARD};
    use crate::board::piece::{Color, PieceKind};
    use crate::board::position::{CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE};

    #[test]
    fn start_board_round_trips_exactly() {
        let position = parse_board(START_BOARD);
        assert_eq!(export_board(&position), START_BOARD);
        assert!(position.is_consistent());
    }

    #[test]
    fn start_board_reproduces_the_standard_bitboards() {
        let position = parse_board(START_BOARD);
        assert_eq!(
            position.bitboard(Color::Light, PieceKind::Pawn),
            0x0000_0000_0000_FF00
        );
        assert_eq!(
            position.bitboard(Color::Dark, PieceKind::Pawn),
            0x00FF_0000_0000_0000
        );
        assert_eq!(
            position.bitboard(Color::Light, PieceKind::King),
            0x0000_0000_0000_0010
        );
        assert_eq!(
            position.bitboard(Color::Dark, PieceKind::Queen),
            0x0800_0000_0000_0000
        );
        assert_eq!(position.occupancy_all, 0xFFFF_0000_0000_FFFF);
    }

    #[test]
    fn unknown_characters_are_silently_empty() {
        let noisy = "x?!#@...k........................................K..............";
        let position = parse_board(noisy);
        assert_eq!(position.occupancy_all.count_ones(), 2);
        assert!(position.is_consistent());
    }

    #[test]
    fn short_strings_leave_the_rest_empty() {
        // Eight chars fill the Dark back rank only; king and both rooks are
        // on their home squares, so both Dark rights are granted.
        let position = parse_board("rnbqkbnr");
        assert_eq!(position.occupancy_all.count_ones(), 8);
        assert_eq!(
            position.castling_rights,
            CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE
        );

        // A displaced king grants nothing.
        let displaced = parse_board(".k......");
        assert_eq!(displaced.occupancy_all.count_ones(), 1);
        assert_eq!(displaced.castling_rights, 0);
    }
}
