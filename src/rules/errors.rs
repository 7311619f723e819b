use std::error::Error;
use std::fmt;

use crate::board::piece::Color;
use crate::board::square::Square;

pub type RulesResult<T> = Result<T, RulesError>;

/// Internally-unreachable states surfaced as errors. The interactive
/// controller treats any of these as fatal and stops processing input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RulesError {
    EmptyOrigin(Square),
    FriendlyDestination(Square),
    MissingKing(Color),
    UnknownCastleCorner(Square),
    CastleRookMissing(Square),
    GameFinished,
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::EmptyOrigin(sq) => {
                write!(f, "no piece on origin square {sq}")
            }
            RulesError::FriendlyDestination(sq) => {
                write!(f, "destination square {sq} holds a friendly piece")
            }
            RulesError::MissingKing(color) => {
                write!(f, "no {color:?} king on the board")
            }
            RulesError::UnknownCastleCorner(sq) => {
                write!(f, "square {sq} is not a castling corner")
            }
            RulesError::CastleRookMissing(sq) => {
                write!(f, "no rook on castling corner {sq}")
            }
            RulesError::GameFinished => {
                write!(f, "the game has already ended")
            }
        }
    }
}

impl Error for RulesError {}
