//! Castling rights, legality, and execution.
//!
//! Rights are four monotonic bits, only ever cleared. Legality per side
//! requires the rights bit, an unattacked king path (checked against the
//! opponent attacked-set with the king excluded from the obstruction mask, so
//! castling out of check is refused), and a clear orthogonal ray from the
//! king's square to the rook's corner. Execution relocates king and rook in
//! one call and retires both of the color's rights bits, touching only the
//! four squares involved.

use crate::board::bitboard::{square_mask, Bitboard};
use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::position::{
    Position, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE, CASTLE_LIGHT_KINGSIDE,
    CASTLE_LIGHT_QUEENSIDE,
};
use crate::board::square::Square;
use crate::moves::patterns::rook_attacks;
use crate::rules::check::attacked_squares;
use crate::rules::errors::{RulesError, RulesResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

/// Static geometry of one castle: the rights bit, the four squares touched,
/// and the squares the king occupies or transits (all must be unattacked).
#[derive(Debug, Clone, Copy)]
pub struct CastleGeometry {
    pub rights_bit: u8,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    pub safe_path: Bitboard,
}

const LIGHT_KINGSIDE: CastleGeometry = CastleGeometry {
    rights_bit: CASTLE_LIGHT_KINGSIDE,
    king_from: 4,
    king_to: 6,
    rook_from: 7,
    rook_to: 5,
    safe_path: (1 << 4) | (1 << 5) | (1 << 6),
};

const LIGHT_QUEENSIDE: CastleGeometry = CastleGeometry {
    rights_bit: CASTLE_LIGHT_QUEENSIDE,
    king_from: 4,
    king_to: 2,
    rook_from: 0,
    rook_to: 3,
    safe_path: (1 << 4) | (1 << 3) | (1 << 2),
};

const DARK_KINGSIDE: CastleGeometry = CastleGeometry {
    rights_bit: CASTLE_DARK_KINGSIDE,
    king_from: 60,
    king_to: 62,
    rook_from: 63,
    rook_to: 61,
    safe_path: (1 << 60) | (1 << 61) | (1 << 62),
};

const DARK_QUEENSIDE: CastleGeometry = CastleGeometry {
    rights_bit: CASTLE_DARK_QUEENSIDE,
    king_from: 60,
    king_to: 58,
    rook_from: 56,
    rook_to: 59,
    safe_path: (1 << 60) | (1 << 59) | (1 << 58),
};

#[inline]
pub const fn geometry(color: Color, side: CastleSide) -> &'static CastleGeometry {
    match (color, side) {
        (Color::Light, CastleSide::KingSide) => &LIGHT_KINGSIDE,
        (Color::Light, CastleSide::QueenSide) => &LIGHT_QUEENSIDE,
        (Color::Dark, CastleSide::KingSide) => &DARK_KINGSIDE,
        (Color::Dark, CastleSide::QueenSide) => &DARK_QUEENSIDE,
    }
}

/// Which castle a corner square belongs to for `color`, if any.
#[inline]
pub const fn side_for_corner(color: Color, corner: Square) -> Option<CastleSide> {
    match (color, corner) {
        (Color::Light, 7) | (Color::Dark, 63) => Some(CastleSide::KingSide),
        (Color::Light, 0) | (Color::Dark, 56) => Some(CastleSide::QueenSide),
        _ => None,
    }
}

/// Rights bits retired when `square` is vacated or captured.
#[inline]
pub const fn rights_retired_by_square(square: Square) -> u8 {
    match square {
        0 => CASTLE_LIGHT_QUEENSIDE,
        7 => CASTLE_LIGHT_KINGSIDE,
        56 => CASTLE_DARK_QUEENSIDE,
        63 => CASTLE_DARK_KINGSIDE,
        4 => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
        60 => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
        _ => 0,
    }
}

/// Full legality check for one side's castle.
pub fn can_castle(position: &Position, color: Color, side: CastleSide) -> bool {
    let geo = geometry(color, side);

    if position.castling_rights & geo.rights_bit == 0 {
        return false;
    }

    // Rights can survive an imported mid-game board; re-verify the pieces.
    let king_bb = position.bitboard(color, PieceKind::King);
    if king_bb != square_mask(geo.king_from) {
        return false;
    }
    if position.bitboard(color, PieceKind::Rook) & square_mask(geo.rook_from) == 0 {
        return false;
    }

    // The rook's own ray from the king must reach the corner: confirms no
    // piece stands between them (covers the extra b-file square on the
    // queen side, which the king never transits).
    if rook_attacks(geo.king_from, position.occupancy_all) & square_mask(geo.rook_from) == 0 {
        return false;
    }

    // King path unattacked, with the king excluded from the obstruction
    // mask exactly as in ordinary flight-square computation.
    let danger = attacked_squares(
        position,
        color.opposite(),
        position.occupancy_all & !king_bb,
    );
    geo.safe_path & danger == 0
}

/// Execute the castle whose rook sits on `corner`. The corner must match one
/// of the four patterns; anything else is a fatal logic error. Both of the
/// color's rights bits are cleared, the mirror and aggregates are updated for
/// exactly the four squares touched, and the turn passes to the opponent.
pub fn execute_castle(
    position: &mut Position,
    color: Color,
    corner: Square,
) -> RulesResult<CastleSide> {
    let side = side_for_corner(color, corner).ok_or(RulesError::UnknownCastleCorner(corner))?;
    let geo = geometry(color, side);

    if position.bitboard(color, PieceKind::King) & square_mask(geo.king_from) == 0 {
        return Err(RulesError::MissingKing(color));
    }
    if position.bitboard(color, PieceKind::Rook) & square_mask(geo.rook_from) == 0 {
        return Err(RulesError::CastleRookMissing(corner));
    }

    let king_idx = PieceKind::King.index();
    let rook_idx = PieceKind::Rook.index();
    let color_idx = color.index();

    let vacated = square_mask(geo.king_from) | square_mask(geo.rook_from);
    let occupied = square_mask(geo.king_to) | square_mask(geo.rook_to);

    position.pieces[color_idx][king_idx] &= !square_mask(geo.king_from);
    position.pieces[color_idx][king_idx] |= square_mask(geo.king_to);
    position.pieces[color_idx][rook_idx] &= !square_mask(geo.rook_from);
    position.pieces[color_idx][rook_idx] |= square_mask(geo.rook_to);

    position.occupancy_by_color[color_idx] &= !vacated;
    position.occupancy_by_color[color_idx] |= occupied;
    position.occupancy_all =
        position.occupancy_by_color[0] | position.occupancy_by_color[1];

    position.mirror[geo.king_from as usize] = None;
    position.mirror[geo.rook_from as usize] = None;
    position.mirror[geo.king_to as usize] = Some(Piece::new(color, PieceKind::King));
    position.mirror[geo.rook_to as usize] = Some(Piece::new(color, PieceKind::Rook));

    position.castling_rights &= !(geometry(color, CastleSide::KingSide).rights_bit
        | geometry(color, CastleSide::QueenSide).rights_bit);
    position.side_to_move = color.opposite();

    Ok(side)
}

#[cfg(test)]
mod tests {
    use super::{can_castle, execute_castle, CastleSide};
    use crate::board::piece::{Color, PieceKind};
    use crate::board::position::CASTLE_LIGHT_KINGSIDE;
    use crate::rules::errors::RulesError;
    use crate::utils::board_import::parse_board;

    // Light king e1 and rook h1 with a clear path; Dark rook d8, king a8.
    const KINGSIDE_READY: &str = "\
k..r....\
........\
........\
........\
........\
........\
........\
....K..R";

    #[test]
    fn clear_unattacked_path_allows_kingside_castle() {
        let position = parse_board(KINGSIDE_READY);
        assert!(can_castle(&position, Color::Light, CastleSide::KingSide));
    }

    #[test]
    fn attacked_transit_square_refuses_castle() {
        // Move the Dark rook to f8: it sweeps f1.
        let board = "\
k....r..\
........\
........\
........\
........\
........\
........\
....K..R";
        let position = parse_board(board);
        assert!(!can_castle(&position, Color::Light, CastleSide::KingSide));
    }

    #[test]
    fn blocking_piece_refuses_castle() {
        let board = "\
k..r....\
........\
........\
........\
........\
........\
........\
....K.NR";
        let position = parse_board(board);
        assert!(!can_castle(&position, Color::Light, CastleSide::KingSide));
    }

    #[test]
    fn cleared_rights_refuse_castle() {
        let mut position = parse_board(KINGSIDE_READY);
        position.castling_rights &= !CASTLE_LIGHT_KINGSIDE;
        assert!(!can_castle(&position, Color::Light, CastleSide::KingSide));
    }

    #[test]
    fn execution_relocates_both_pieces_atomically() {
        let mut position = parse_board(KINGSIDE_READY);
        let side = execute_castle(&mut position, Color::Light, 7).expect("castle executes");
        assert_eq!(side, CastleSide::KingSide);

        assert_eq!(position.king_square(Color::Light), Some(6));
        assert_ne!(
            position.bitboard(Color::Light, PieceKind::Rook) & (1 << 5),
            0
        );
        assert_eq!(position.piece_at(4), None);
        assert_eq!(position.piece_at(7), None);
        assert_eq!(position.castling_rights & CASTLE_LIGHT_KINGSIDE, 0);
        assert_eq!(position.side_to_move, Color::Dark);
        assert!(position.is_consistent());
    }

    #[test]
    fn queenside_execution_uses_the_long_geometry() {
        let board = "\
k.......\
........\
........\
........\
........\
........\
........\
R...K...";
        let mut position = parse_board(board);
        assert!(can_castle(&position, Color::Light, CastleSide::QueenSide));
        execute_castle(&mut position, Color::Light, 0).expect("castle executes");
        assert_eq!(position.king_square(Color::Light), Some(2));
        assert_ne!(
            position.bitboard(Color::Light, PieceKind::Rook) & (1 << 3),
            0
        );
        assert!(position.is_consistent());
    }

    #[test]
    fn unknown_corner_is_a_fatal_logic_error() {
        let mut position = parse_board(KINGSIDE_READY);
        let err = execute_castle(&mut position, Color::Light, 42).unwrap_err();
        assert_eq!(err, RulesError::UnknownCastleCorner(42));
    }
}
