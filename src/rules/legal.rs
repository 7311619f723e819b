//! Full legal destination sets.
//!
//! Combines the raw generators with the check and pin masks: a king keeps
//! only flight squares outside the opponent's king-excluded attacked-set
//! (plus castle gestures); any other piece is restricted to the check
//! resolution squares while in check, and to its pin ray when pinned. No
//! move is ever simulated; legality falls out of the masks.

use crate::board::bitboard::{set_bits, square_mask, Bitboard};
use crate::board::piece::{Color, PieceKind};
use crate::board::position::Position;
use crate::board::square::Square;
use crate::moves::patterns::{attacks_from, KING_ATTACKS, KNIGHT_ATTACKS};
use crate::moves::pawn::pawn_moveable;
use crate::rules::apply::play_move;
use crate::rules::castling::{can_castle, geometry, side_for_corner, CastleSide};
use crate::rules::check::{check_masks, king_danger_squares};
use crate::rules::errors::RulesResult;
use crate::rules::pins::pin_mask;

/// Legal destination bitboard for the piece on `from`. Empty squares and
/// enemy pieces appear directly; a friendly rook (from the king) or the
/// friendly king (from a corner rook) marks a legal castle gesture.
pub fn legal_destinations(position: &Position, from: Square) -> Bitboard {
    let Some(piece) = position.piece_at(from) else {
        return 0;
    };
    let color = piece.color;
    let own_occupancy = position.occupancy_by_color[color.index()];
    let enemy_occupancy = position.occupancy_by_color[color.opposite().index()];
    let checks = check_masks(position, color);

    if piece.kind == PieceKind::King {
        let danger = king_danger_squares(position, color);
        let mut destinations =
            KING_ATTACKS[from as usize] & !own_occupancy & !danger;

        for side in [CastleSide::KingSide, CastleSide::QueenSide] {
            if can_castle(position, color, side) {
                destinations |= square_mask(geometry(color, side).rook_from);
            }
        }
        return destinations;
    }

    // Under double check only the king may move.
    if checks.is_double() {
        return 0;
    }

    let mut destinations = match piece.kind {
        PieceKind::Pawn => pawn_moveable(color, from, position.occupancy_all, enemy_occupancy),
        PieceKind::Knight => KNIGHT_ATTACKS[from as usize] & !own_occupancy,
        _ => attacks_from(piece.kind, color, from, position.occupancy_all) & !own_occupancy,
    };

    if checks.in_check() {
        destinations &= checks.restriction();
    }
    destinations &= pin_mask(position, from);

    // A corner rook offers the castle gesture onto its own king's square.
    if piece.kind == PieceKind::Rook {
        if let Some(side) = side_for_corner(color, from) {
            if can_castle(position, color, side) {
                destinations |= square_mask(geometry(color, side).king_from);
            }
        }
    }

    destinations
}

/// Total number of legal destination squares for the side to move. A legal
/// castle contributes two bits, one gesture per endpoint; `perft` is the
/// counter that deduplicates them.
pub fn count_legal_moves(position: &Position) -> usize {
    position
        .squares_of(position.side_to_move)
        .map(|from| legal_destinations(position, from).count_ones() as usize)
        .sum()
}

/// Whether `color` has any legal move at all.
pub fn side_has_legal_move(position: &Position, color: Color) -> bool {
    set_bits(position.occupancy_by_color[color.index()])
        .any(|from| legal_destinations(position, from) != 0)
}

/// Node-count walk over the legal move space, cloning per branch. Used as an
/// independent reference for the ray casting (standard counts hold through
/// depth 3 without en passant or promotion). A castle is branched once, from
/// the king endpoint: the rook-endpoint gesture reaches the same child.
pub fn perft(position: &Position, depth: u32) -> RulesResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let side = position.side_to_move;
    let own_occupancy = position.occupancy_by_color[side.index()];
    let mut nodes = 0u64;
    for from in position.squares_of(side) {
        let is_rook = position
            .piece_at(from)
            .is_some_and(|piece| piece.kind == PieceKind::Rook);
        for to in set_bits(legal_destinations(position, from)) {
            // Friendly destinations only ever encode castle gestures.
            if is_rook && own_occupancy & square_mask(to) != 0 {
                continue;
            }
            let mut next = position.clone();
            play_move(&mut next, from, to)?;
            nodes += perft(&next, depth - 1)?;
        }
    }
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::{count_legal_moves, legal_destinations, perft, side_has_legal_move};
    use crate::board::bitboard::{set_bits, square_mask};
    use crate::board::piece::Color;
    use crate::board::position::Position;
    use crate::utils::board_import::parse_board;

    #[test]
    fn starting_position_has_twenty_moves() {
        let position = Position::new_game();
        assert_eq!(count_legal_moves(&position), 20);
        // Recomputation is non-mutating and stable.
        assert_eq!(count_legal_moves(&position), 20);
        assert!(side_has_legal_move(&position, Color::Light));
    }

    #[test]
    fn perft_matches_reference_counts() {
        let position = Position::new_game();
        assert_eq!(perft(&position, 1).expect("perft runs"), 20);
        assert_eq!(perft(&position, 2).expect("perft runs"), 400);
        assert_eq!(perft(&position, 3).expect("perft runs"), 8902);
    }

    #[test]
    fn checked_king_cannot_retreat_along_the_ray() {
        // Dark king e4 checked by the Light rook on e1.
        let board = "\
.......K\
........\
........\
........\
....k...\
........\
........\
....R...";
        let mut position = parse_board(board);
        position.side_to_move = Color::Dark;

        let destinations = legal_destinations(&position, 28);
        assert_eq!(destinations & square_mask(36), 0); // e5 behind the king
        assert_eq!(destinations & square_mask(20), 0); // e3 toward the rook
        assert_ne!(destinations & square_mask(35), 0); // d5 is fine
        assert_eq!(destinations.count_ones(), 6);
    }

    #[test]
    fn double_check_silences_every_other_piece() {
        // Rook e1 and bishop b1 both check the Dark king on e4.
        let board = "\
.n.....K\
........\
........\
........\
....k...\
........\
........\
.B..R...";
        let mut position = parse_board(board);
        position.side_to_move = Color::Dark;

        assert_eq!(legal_destinations(&position, 57), 0); // b8 knight frozen
        assert_ne!(legal_destinations(&position, 28), 0); // king still moves
    }

    #[test]
    fn interposition_and_capture_resolve_a_single_check() {
        // Dark rooks: b3 can only block on e3, a1 can only capture on e1.
        let board = "\
.......K\
........\
........\
........\
....k...\
.r......\
........\
r...R...";
        let mut position = parse_board(board);
        position.side_to_move = Color::Dark;

        let blocker = legal_destinations(&position, 17); // b3
        assert_eq!(blocker, square_mask(20)); // e3 interposition only

        let capturer = legal_destinations(&position, 0); // a1
        assert_eq!(capturer, square_mask(4)); // capture the checker only
    }

    #[test]
    fn pinned_rook_on_a_diagonal_has_no_moves() {
        let board = "\
.......k\
........\
........\
........\
.....b..\
........\
...R....\
..K.....";
        let position = parse_board(board);
        assert_eq!(legal_destinations(&position, 11), 0);
    }

    #[test]
    fn castle_gesture_appears_from_both_endpoints() {
        let board = "\
k..r....\
........\
........\
........\
........\
........\
........\
....K..R";
        let position = parse_board(board);

        let king_moves = legal_destinations(&position, 4);
        assert_ne!(king_moves & square_mask(7), 0); // king onto own rook

        let rook_moves = legal_destinations(&position, 7);
        assert_ne!(rook_moves & square_mask(4), 0); // rook onto own king
    }

    #[test]
    fn perft_counts_a_castle_once() {
        // Light can castle short; the destination count sees both gesture
        // endpoints, the node count sees one move.
        let board = "\
k..r....\
........\
........\
........\
........\
........\
........\
....K..R";
        let position = parse_board(board);
        // King: f1, e2, f2 plus the h1 gesture; rook: g1, f1, h2..h8 plus
        // the e1 gesture.
        assert_eq!(count_legal_moves(&position), 14);
        assert_eq!(perft(&position, 1).expect("perft runs"), 13);
    }

    #[test]
    fn every_destination_is_empty_enemy_or_castle_partner() {
        let position = Position::new_game();
        for from in position.squares_of(Color::Light) {
            for to in set_bits(legal_destinations(&position, from)) {
                let occupant = position.piece_at(to);
                assert!(occupant.map_or(true, |p| p.color == Color::Dark));
            }
        }
    }
}
