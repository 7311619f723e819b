//! Terminal-oriented board renderer.
//!
//! Produces a human-readable view of a `Position` from the mirror array for
//! debugging, tests, and the host simulator. Optionally overlays a selection
//! mask, showing candidate destination squares.

use crate::board::bitboard::{square_mask, Bitboard};
use crate::board::position::Position;

/// Render the board to a string, ranks 8 down to 1.
pub fn render_position(position: &Position) -> String {
    render_with_marks(position, 0)
}

/// Render with `marks` overlaid: empty marked squares show `*`, occupied
/// marked squares are bracketed.
pub fn render_with_marks(position: &Position, marks: Bitboard) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0u8..8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0u8..8 {
            let square = rank * 8 + file;
            let marked = marks & square_mask(square) != 0;
            match position.piece_at(square) {
                Some(piece) if marked => {
                    // Bracket capture candidates; costs the column spacer.
                    out.pop();
                    out.push('[');
                    out.push(piece.letter());
                    out.push(']');
                    continue;
                }
                Some(piece) => out.push(piece.letter()),
                None if marked => out.push('*'),
                None => out.push('.'),
            }
            out.push(' ');
        }

        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");
    out
}

#[cfg(test)]
mod tests {
    use super::{render_position, render_with_marks};
    use crate::board::bitboard::square_mask;
    use crate::board::position::Position;

    #[test]
    fn start_position_renders_both_back_ranks() {
        let text = render_position(&Position::new_game());
        assert!(text.contains("r n b q k b n r"));
        assert!(text.contains("R N B Q K B N R"));
    }

    #[test]
    fn marks_show_as_asterisks_on_empty_squares() {
        let text = render_with_marks(&Position::new_game(), square_mask(28)); // e4
        assert!(text.contains('*'));
    }
}
