//! **fifteen-core** — Board model and move rules for the fifteen puzzle.
//!
//! This crate provides the foundational types shared by the solver and the
//! scramble generator: board squares, tile pieces, slide directions and
//! moves, and the immutable [`Board`] state with its validation errors and
//! text/exchange representations.

pub mod board;
pub mod moves;
pub mod square;

pub use board::{Board, IllegalMove, MalformedBoard};
pub use moves::Move;
pub use square::{Direction, SIDE, Square, Tile};
