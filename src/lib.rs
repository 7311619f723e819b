//! Crate root module declarations for the Quince Chess project.
//!
//! This file exposes all top-level subsystems (board representation, move
//! patterns, the rules layer, the interactive game layer, the hardware
//! abstraction, and utility helpers) so binaries, tests, and benches can
//! import stable module paths.

pub mod board {
    pub mod bitboard;
    pub mod piece;
    pub mod position;
    pub mod square;
}

pub mod moves {
    pub mod patterns;
    pub mod pawn;
}

pub mod rules {
    pub mod apply;
    pub mod castling;
    pub mod check;
    pub mod errors;
    pub mod legal;
    pub mod pins;
    pub mod verdict;
}

pub mod game {
    pub mod controller;
    pub mod selection;
    pub mod session;
}

pub mod hal {
    pub mod cursor;
    pub mod display;
    pub mod input;
}

pub mod utils {
    pub mod board_import;
    pub mod playout;
    pub mod render;
}
