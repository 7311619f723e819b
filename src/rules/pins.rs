//! Absolute pin resolution.
//!
//! A piece is pinned when removing it from the occupancy lets an enemy slider
//! reach its own king along one ray. The pin mask is the intersection of that
//! slider's ray set and the king's ray set of the same component (computed
//! with the candidate excluded), plus the pinner's square: the pinned piece
//! may still slide along the ray or capture the pinner.
//!
//! Only the first pin found is honored, carrying the source design's
//! assumption that a piece cannot be pinned by two attackers at once. The
//! playout harness probes that assumption on every position it visits.

use crate::board::bitboard::{set_bits, square_mask, Bitboard, FULL_BOARD};
use crate::board::piece::PieceKind;
use crate::board::position::Position;
use crate::board::square::Square;
use crate::moves::patterns::{bishop_attacks, rook_attacks};

/// Restriction mask for the piece on `square`: all squares when unpinned,
/// the pin ray plus the pinner's square otherwise.
pub fn pin_mask(position: &Position, square: Square) -> Bitboard {
    let Some(piece) = position.piece_at(square) else {
        return FULL_BOARD;
    };
    let Some(king_sq) = position.king_square(piece.color) else {
        return FULL_BOARD;
    };
    if square == king_sq {
        return FULL_BOARD;
    }

    let enemy = piece.color.opposite();
    let candidate = square_mask(square);
    let occupancy = position.occupancy_all & !candidate;

    let diagonal_sliders = position.bitboard(enemy, PieceKind::Bishop)
        | position.bitboard(enemy, PieceKind::Queen);
    let orthogonal_sliders = position.bitboard(enemy, PieceKind::Rook)
        | position.bitboard(enemy, PieceKind::Queen);

    let diagonals_from_king = bishop_attacks(king_sq, occupancy);
    for pinner in set_bits(diagonals_from_king & diagonal_sliders) {
        let line = diagonals_from_king & bishop_attacks(pinner, occupancy);
        if line & candidate != 0 {
            return line | square_mask(pinner);
        }
    }

    let orthogonals_from_king = rook_attacks(king_sq, occupancy);
    for pinner in set_bits(orthogonals_from_king & orthogonal_sliders) {
        let line = orthogonals_from_king & rook_attacks(pinner, occupancy);
        if line & candidate != 0 {
            return line | square_mask(pinner);
        }
    }

    FULL_BOARD
}

/// Number of distinct enemy sliders whose line (with the candidate removed)
/// passes through `square` toward the friendly king. Used by the playout
/// property test to probe the single-pin assumption.
pub fn aligned_pinner_count(position: &Position, square: Square) -> u32 {
    let Some(piece) = position.piece_at(square) else {
        return 0;
    };
    let Some(king_sq) = position.king_square(piece.color) else {
        return 0;
    };
    if square == king_sq {
        return 0;
    }

    let enemy = piece.color.opposite();
    let candidate = square_mask(square);
    let occupancy = position.occupancy_all & !candidate;
    let mut count = 0u32;

    let diagonal_sliders = position.bitboard(enemy, PieceKind::Bishop)
        | position.bitboard(enemy, PieceKind::Queen);
    let diagonals_from_king = bishop_attacks(king_sq, occupancy);
    for pinner in set_bits(diagonals_from_king & diagonal_sliders) {
        if diagonals_from_king & bishop_attacks(pinner, occupancy) & candidate != 0 {
            count += 1;
        }
    }

    let orthogonal_sliders = position.bitboard(enemy, PieceKind::Rook)
        | position.bitboard(enemy, PieceKind::Queen);
    let orthogonals_from_king = rook_attacks(king_sq, occupancy);
    for pinner in set_bits(orthogonals_from_king & orthogonal_sliders) {
        if orthogonals_from_king & rook_attacks(pinner, occupancy) & candidate != 0 {
            count += 1;
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::{aligned_pinner_count, pin_mask};
    use crate::board::bitboard::{square_mask, FULL_BOARD};
    use crate::utils::board_import::parse_board;

    // Light king c1, Light rook d2, Dark bishop f4, Dark king h8.
    const DIAGONAL_PIN_BOARD: &str = "\
.......k\
........\
........\
........\
.....b..\
........\
...R....\
..K.....";

    #[test]
    fn rook_pinned_on_a_diagonal_gets_the_pin_ray() {
        let position = parse_board(DIAGONAL_PIN_BOARD);
        let mask = pin_mask(&position, 11); // d2
        let expected = square_mask(11) | square_mask(20) | square_mask(29); // d2, e3, f4
        assert_eq!(mask, expected);
        assert_eq!(aligned_pinner_count(&position, 11), 1);
    }

    #[test]
    fn unpinned_piece_is_unrestricted() {
        // Same board plus a Light rook on a5, far from any ray to c1.
        let board = "\
.......k\
........\
........\
R.......\
.....b..\
........\
...R....\
..K.....";
        let position = parse_board(board);
        assert_eq!(pin_mask(&position, 32), FULL_BOARD); // a5
        assert_eq!(aligned_pinner_count(&position, 32), 0);
    }

    #[test]
    fn file_pin_allows_sliding_along_the_file() {
        // Light king e1, Light rook e4, Dark rook e8.
        let board = "\
....r..k\
........\
........\
........\
....R...\
........\
........\
....K...";
        let position = parse_board(board);
        let mask = pin_mask(&position, 28); // e4
        // Every square of the e-file between king and pinner, plus the pinner.
        let expected = square_mask(12)
            | square_mask(20)
            | square_mask(28)
            | square_mask(36)
            | square_mask(44)
            | square_mask(52)
            | square_mask(60);
        assert_eq!(mask, expected);
    }

    #[test]
    fn shielded_piece_is_not_pinned() {
        // A second Light piece between the rook and the bishop breaks the pin.
        let board = "\
.......k\
........\
........\
........\
.....b..\
....N...\
...R....\
..K.....";
        let position = parse_board(board);
        assert_eq!(pin_mask(&position, 11), FULL_BOARD); // d2 no longer pinned
    }
}
