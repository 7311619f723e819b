//! Seeded random playouts.
//!
//! Drives whole games through `play_move` with uniformly random legal moves,
//! checking structural consistency after every ply and recording the widest
//! pin fan seen. The rules layer resolves at most one pin ray per piece, and
//! this harness is the standing probe that random play never produces more.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::bitboard::set_bits;
use crate::board::position::Position;
use crate::board::square::Square;
use crate::rules::apply::play_move;
use crate::rules::errors::RulesResult;
use crate::rules::legal::legal_destinations;
use crate::rules::pins::aligned_pinner_count;
use crate::rules::verdict::{assess, Verdict};

#[derive(Debug, Clone, Copy)]
pub struct PlayoutStats {
    pub plies: u32,
    pub verdict: Verdict,
    /// Largest number of distinct pinning rays aimed at a single piece.
    pub max_aligned_pinners: u32,
    pub consistent: bool,
}

/// Play one random game from `position`, at most `max_plies` plies.
pub fn random_playout(
    position: &Position,
    seed: u64,
    max_plies: u32,
) -> RulesResult<PlayoutStats> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut current = position.clone();
    let mut stats = PlayoutStats {
        plies: 0,
        verdict: Verdict::Continue,
        max_aligned_pinners: 0,
        consistent: true,
    };

    loop {
        stats.verdict = assess(&current);
        if stats.verdict.is_terminal() || stats.plies >= max_plies {
            break;
        }

        let choices: Vec<(Square, Square)> = current
            .squares_of(current.side_to_move)
            .flat_map(|from| {
                set_bits(legal_destinations(&current, from)).map(move |to| (from, to))
            })
            .collect();

        // A non-terminal verdict guarantees at least one choice.
        let Some(&(from, to)) = choices.choose(&mut rng) else {
            break;
        };
        play_move(&mut current, from, to)?;
        stats.plies += 1;

        stats.consistent &= current.is_consistent();
        for square in current.squares_of(current.side_to_move) {
            stats.max_aligned_pinners =
                stats.max_aligned_pinners.max(aligned_pinner_count(&current, square));
        }
    }

    Ok(stats)
}
