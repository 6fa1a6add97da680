//! **fifteen-solver** — A* search engine for the fifteen puzzle.
//!
//! The driver ([`solve`], [`solve_with_progress`]) expands positions from
//! a frontier ordered by `f = g + h`, where `h` is the larger of two
//! admissible measures of the board (misplaced pieces, total Manhattan
//! distance). The frontier is an indexed binary min-heap supporting
//! in-place key updates, so rediscovering a cheaper route to an open
//! position reparents its node instead of enqueueing a duplicate.
//! Expanded positions are tracked in a closed index, and the immediate
//! reverse of the move that produced a node is never generated.
//!
//! A search returns a [`Solution`] (root-to-goal list of [`Step`]s), or
//! `None` when the goal is unreachable — detected up front by the board's
//! permutation-parity test rather than by exhausting the state space.

mod astar;
mod heap;
mod node;

pub use astar::{Progress, Solution, Step, solve, solve_with_progress};
pub use node::heuristic;
