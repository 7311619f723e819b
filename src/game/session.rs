//! One game from start to verdict.
//!
//! `GameSession` owns the position, the running verdict, and a timestamped
//! move log. Moves arrive as validated origin/destination pairs (the
//! selection layer only offers squares from the legal destination set) and
//! are routed through the executor, which recognizes the castle gesture.

use chrono::{DateTime, Local};

use crate::board::piece::Color;
use crate::board::position::Position;
use crate::board::square::{algebraic, Square};
use crate::rules::apply::{play_move, AppliedMove};
use crate::rules::castling::CastleSide;
use crate::rules::errors::{RulesError, RulesResult};
use crate::rules::verdict::{assess, Verdict};

#[derive(Debug, Clone)]
pub struct MoveLogEntry {
    pub ply: u32,
    pub color: Color,
    pub notation: String,
    pub at: DateTime<Local>,
}

#[derive(Debug)]
pub struct GameSession {
    position: Position,
    verdict: Verdict,
    log: Vec<MoveLogEntry>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::from_position(Position::new_game())
    }

    pub fn from_position(position: Position) -> Self {
        let verdict = assess(&position);
        Self {
            position,
            verdict,
            log: Vec::new(),
        }
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    #[inline]
    pub fn log(&self) -> &[MoveLogEntry] {
        &self.log
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.position.side_to_move
    }

    /// Execute one move, log it, and reassess the game. Refused once the
    /// game has ended.
    pub fn play(&mut self, from: Square, to: Square) -> RulesResult<Verdict> {
        if self.verdict.is_terminal() {
            return Err(RulesError::GameFinished);
        }

        let mover = self.position.side_to_move;
        let applied = play_move(&mut self.position, from, to)?;

        self.log.push(MoveLogEntry {
            ply: self.log.len() as u32 + 1,
            color: mover,
            notation: notate(&applied),
            at: Local::now(),
        });

        self.verdict = assess(&self.position);
        Ok(self.verdict)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

fn notate(applied: &AppliedMove) -> String {
    match applied {
        AppliedMove::Standard {
            piece,
            captured,
            from,
            to,
        } => {
            let mut text = String::with_capacity(6);
            text.push(piece.kind.letter());
            text.push_str(&algebraic(*from));
            if captured.is_some() {
                text.push('x');
            }
            text.push_str(&algebraic(*to));
            text
        }
        AppliedMove::Castle { side, .. } => match side {
            CastleSide::KingSide => "O-O".to_string(),
            CastleSide::QueenSide => "O-O-O".to_string(),
        },
    }
}
