//! Square indexing and the display/rank-file coordinate mapper.
//!
//! Two coordinate systems coexist: the linear rank-file index used by the
//! bitboards (`index = file + rank * 8`, a1 = 0) and display coordinates
//! `(x, y)` with the origin at the top-left of the screen, so display row 0
//! is the far (Dark) back rank. The conversion is a pure bijection.

pub type Square = u8;

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / 8
}

/// Display coordinates to rank-file index, flipping vertically.
#[inline]
pub const fn to_index(x: u8, y: u8) -> Square {
    x + (7 - y) * 8
}

/// Rank-file index back to display coordinates.
#[inline]
pub const fn to_display(square: Square) -> (u8, u8) {
    (file_of(square), 7 - rank_of(square))
}

/// Long-algebraic square name, used by the move log and diagnostics.
pub fn algebraic(square: Square) -> String {
    let file = char::from(b'a' + file_of(square));
    let rank = char::from(b'1' + rank_of(square));
    let mut name = String::with_capacity(2);
    name.push(file);
    name.push(rank);
    name
}

#[cfg(test)]
mod tests {
    use super::{algebraic, to_display, to_index};

    #[test]
    fn display_round_trips_for_all_squares() {
        for y in 0u8..8 {
            for x in 0u8..8 {
                let index = to_index(x, y);
                assert_eq!(to_display(index), (x, y));
            }
        }
    }

    #[test]
    fn corner_squares_map_as_expected() {
        // Bottom-left of the display is a1, top-left is a8.
        assert_eq!(to_index(0, 7), 0);
        assert_eq!(to_index(0, 0), 56);
        assert_eq!(to_index(7, 7), 7);
        assert_eq!(algebraic(to_index(4, 6)), "e2");
    }
}
