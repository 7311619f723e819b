//! The move executor.
//!
//! Applies a validated move to the bitboards and the mirror array in place:
//! origin bit out, destination bit in, captured enemy bit out, side aggregate
//! maintained incrementally, combined aggregate recomputed as the union, and
//! castling rights retired when a king moves or a corner rook square is
//! vacated or captured. There is no rollback; trial positions clone first.

use crate::board::bitboard::square_mask;
use crate::board::piece::{Piece, PieceKind};
use crate::board::position::Position;
use crate::board::square::Square;
use crate::rules::castling::{execute_castle, rights_retired_by_square, CastleSide};
use crate::rules::errors::{RulesError, RulesResult};

/// What a confirmed selection turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedMove {
    Standard {
        piece: Piece,
        captured: Option<Piece>,
        from: Square,
        to: Square,
    },
    Castle {
        side: CastleSide,
        piece: Piece,
    },
}

/// Apply an ordinary (non-castling) move. The destination must be empty or
/// hold an enemy piece.
pub fn apply_move(position: &mut Position, from: Square, to: Square) -> RulesResult<AppliedMove> {
    let piece = position
        .piece_at(from)
        .ok_or(RulesError::EmptyOrigin(from))?;
    let captured = position.piece_at(to);
    if let Some(target) = captured {
        if target.color == piece.color {
            return Err(RulesError::FriendlyDestination(to));
        }
    }

    let from_mask = square_mask(from);
    let to_mask = square_mask(to);
    let color_idx = piece.color.index();

    position.pieces[color_idx][piece.kind.index()] &= !from_mask;
    position.pieces[color_idx][piece.kind.index()] |= to_mask;
    position.occupancy_by_color[color_idx] &= !from_mask;
    position.occupancy_by_color[color_idx] |= to_mask;

    if let Some(target) = captured {
        let enemy_idx = target.color.index();
        position.pieces[enemy_idx][target.kind.index()] &= !to_mask;
        position.occupancy_by_color[enemy_idx] &= !to_mask;
    }

    position.occupancy_all =
        position.occupancy_by_color[0] | position.occupancy_by_color[1];

    // Rights retire when a king moves, or when either endpoint is a tracked
    // rook corner (vacated or captured).
    if piece.kind == PieceKind::King {
        position.castling_rights &= !rights_retired_by_square(from);
    }
    position.castling_rights &= !(rights_retired_by_corner_only(from) | rights_retired_by_corner_only(to));

    position.mirror[from as usize] = None;
    position.mirror[to as usize] = Some(piece);

    position.side_to_move = piece.color.opposite();

    Ok(AppliedMove::Standard {
        piece,
        captured,
        from,
        to,
    })
}

#[inline]
fn rights_retired_by_corner_only(square: Square) -> u8 {
    match square {
        0 | 7 | 56 | 63 => rights_retired_by_square(square),
        _ => 0,
    }
}

/// Route a confirmed origin/destination pair: a destination holding a
/// friendly piece is a castling gesture (king onto own rook, or rook onto
/// own king); anything else is an ordinary move.
pub fn play_move(position: &mut Position, from: Square, to: Square) -> RulesResult<AppliedMove> {
    let piece = position
        .piece_at(from)
        .ok_or(RulesError::EmptyOrigin(from))?;

    if let Some(target) = position.piece_at(to) {
        if target.color == piece.color {
            let corner = match (piece.kind, target.kind) {
                (PieceKind::King, PieceKind::Rook) => to,
                (PieceKind::Rook, PieceKind::King) => from,
                _ => return Err(RulesError::FriendlyDestination(to)),
            };
            let side = execute_castle(position, piece.color, corner)?;
            return Ok(AppliedMove::Castle { side, piece });
        }
    }

    apply_move(position, from, to)
}

#[cfg(test)]
mod tests {
    use super::{apply_move, play_move, AppliedMove};
    use crate::board::piece::{Color, PieceKind};
    use crate::board::position::{Position, CASTLE_DARK_KINGSIDE, CASTLE_LIGHT_KINGSIDE};
    use crate::rules::castling::CastleSide;

    #[test]
    fn quiet_move_keeps_the_position_consistent() {
        let mut position = Position::new_game();
        apply_move(&mut position, 12, 28).expect("e2-e4 applies"); // e2-e4
        assert!(position.is_consistent());
        assert_eq!(position.side_to_move, Color::Dark);
        assert_eq!(position.piece_at(12), None);
        assert_eq!(
            position.piece_at(28).map(|p| p.kind),
            Some(PieceKind::Pawn)
        );
    }

    #[test]
    fn capture_removes_the_enemy_bit_and_aggregate() {
        let mut position = Position::new_game();
        apply_move(&mut position, 12, 28).expect("e2-e4"); // e4
        apply_move(&mut position, 51, 35).expect("d7-d5"); // d5
        let applied = apply_move(&mut position, 28, 35).expect("exd5");

        match applied {
            AppliedMove::Standard { captured, .. } => {
                assert_eq!(captured.map(|p| p.kind), Some(PieceKind::Pawn));
            }
            _ => panic!("expected a standard capture"),
        }
        assert!(position.is_consistent());
        assert_eq!(
            position.bitboard(Color::Dark, PieceKind::Pawn).count_ones(),
            7
        );
    }

    #[test]
    fn rook_leaving_its_corner_retires_the_right() {
        let mut position = Position::new_game();
        // Clear g1/h2-ish path artificially: lift the h1 rook to h3 via h2.
        position.mirror[15] = None; // drop the h2 pawn for the test
        position.pieces[Color::Light.index()][PieceKind::Pawn.index()] &= !(1u64 << 15);
        position.recalc_occupancy();

        apply_move(&mut position, 7, 23).expect("h1-h3");
        assert_eq!(position.castling_rights & CASTLE_LIGHT_KINGSIDE, 0);
        assert!(position.is_consistent());
    }

    #[test]
    fn capturing_a_corner_rook_retires_the_enemy_right() {
        let mut position = Position::new_game();
        // Teleport a Light rook onto h8 by brute force through the API:
        // h1 rook takes everything in a straight artificial line is not
        // possible, so drop the blocking pieces from the h-file first.
        for square in [15u8, 55u8] {
            if let Some(piece) = position.piece_at(square) {
                position.pieces[piece.color.index()][piece.kind.index()] &=
                    !(1u64 << square);
                position.mirror[square as usize] = None;
            }
        }
        position.recalc_occupancy();

        apply_move(&mut position, 7, 63).expect("hxh8");
        assert_eq!(position.castling_rights & CASTLE_DARK_KINGSIDE, 0);
        assert!(position.is_consistent());
    }

    #[test]
    fn king_onto_own_rook_routes_to_castling() {
        let mut position = Position::new_game();
        for square in [5u8, 6u8] {
            if let Some(piece) = position.piece_at(square) {
                position.pieces[piece.color.index()][piece.kind.index()] &=
                    !(1u64 << square);
                position.mirror[square as usize] = None;
            }
        }
        position.recalc_occupancy();

        let applied = play_move(&mut position, 4, 7).expect("castles");
        assert!(matches!(
            applied,
            AppliedMove::Castle {
                side: CastleSide::KingSide,
                ..
            }
        ));
        assert_eq!(position.king_square(Color::Light), Some(6));
        assert!(position.is_consistent());
    }
}
