//! The A* driver.

use std::collections::HashMap;

use fifteen_core::{Board, Move};

use crate::heap::Frontier;
use crate::node::{NodeId, Nodes};

/// Snapshot handed to the progress sink when a newly popped node's
/// heuristic sets a new low-water mark for the search.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// The improving position.
    pub board: &'a Board,
    /// Moves from the start to this position.
    pub g: u32,
    /// Heuristic cost of this position, the new low-water mark.
    pub h: u32,
    /// Nodes popped so far, this one included.
    pub iterations: u64,
    /// Current frontier size.
    pub frontier_len: usize,
    /// Positions expanded so far.
    pub closed_len: usize,
}

/// One entry of a solution path: a position and the move that produced
/// it. The root entry carries no move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub board: Board,
    pub via: Option<Move>,
}

/// An ordered path from the start position to the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    steps: Vec<Step>,
}

impl Solution {
    /// All steps, root first. Never empty: a solved start yields the
    /// single root entry.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The moves of the path in play order.
    pub fn moves(&self) -> impl Iterator<Item = Move> {
        self.steps.iter().filter_map(|step| step.via)
    }

    /// Number of moves from start to goal.
    pub fn move_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// The start position.
    pub fn start(&self) -> &Board {
        &self.steps[0].board
    }

    /// The final, solved position.
    pub fn end(&self) -> &Board {
        &self.steps[self.steps.len() - 1].board
    }
}

/// Solve a position, returning the move path or `None` when the goal is
/// unreachable.
pub fn solve(start: &Board) -> Option<Solution> {
    solve_with_progress(start, |_| {})
}

/// [`solve`], reporting to `progress` whenever a popped node improves on
/// the best heuristic seen so far. The sink is observational only; the
/// search runs identically with or without it.
pub fn solve_with_progress(
    start: &Board,
    mut progress: impl FnMut(Progress<'_>),
) -> Option<Solution> {
    if !start.is_solvable() {
        log::debug!("start position fails the parity test; no solution");
        return None;
    }

    let mut nodes = Nodes::new();
    let mut frontier = Frontier::new();
    let mut open: HashMap<Board, NodeId> = HashMap::new();
    let mut closed: HashMap<Board, u32> = HashMap::new();

    let root = nodes.insert(*start, None, 0, None);
    frontier.push(&mut nodes, root);
    open.insert(*start, root);

    let mut iterations: u64 = 0;
    let mut best_h = u32::MAX;

    while let Some(id) = frontier.pop(&mut nodes) {
        iterations += 1;
        let board = nodes[id].board;
        let g = nodes[id].g;
        let h = nodes[id].h;
        open.remove(&board);

        if board.is_solved() {
            log::debug!(
                "solved in {g} moves after {iterations} iterations, {} nodes generated",
                nodes.len()
            );
            return Some(reconstruct(&nodes, id));
        }

        closed.insert(board, g);

        if h < best_h {
            best_h = h;
            progress(Progress {
                board: &board,
                g,
                h,
                iterations,
                frontier_len: frontier.len(),
                closed_len: closed.len(),
            });
        }

        let reverse = nodes[id].via.map(|mv| mv.direction().opposite());
        for mv in board.legal_moves() {
            if reverse == Some(mv.direction()) {
                continue;
            }
            // legal_moves only yields applicable moves; failure here is a
            // board-invariant breach, not an input error.
            let next = board
                .apply(mv)
                .unwrap_or_else(|err| panic!("legal move {mv} failed to apply: {err}"));
            let g_next = g + 1;

            if let Some(&expanded_g) = closed.get(&next) {
                if expanded_g <= g_next {
                    continue;
                }
                // A cheaper route to an already expanded position; put it
                // back in play.
                closed.remove(&next);
            }
            match open.get(&next) {
                Some(&known) if nodes[known].g <= g_next => {}
                Some(&known) => {
                    nodes.reparent(known, id, mv, g_next);
                    frontier.update(&mut nodes, known);
                }
                None => {
                    let fresh = nodes.insert(next, Some(mv), g_next, Some(id));
                    frontier.push(&mut nodes, fresh);
                    open.insert(next, fresh);
                }
            }
        }
    }

    log::debug!("frontier exhausted after {iterations} iterations; no solution");
    None
}

/// Walk parent links from the solution node back to the root, then flip
/// the path into play order.
fn reconstruct(nodes: &Nodes, goal: NodeId) -> Solution {
    let mut steps = Vec::new();
    let mut cursor = Some(goal);
    while let Some(id) = cursor {
        let node = &nodes[id];
        steps.push(Step {
            board: node.board,
            via: node.via,
        });
        cursor = node.parent;
    }
    steps.reverse();
    Solution { steps }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Solution {
    /// Wire form for consumers: the move list and its length, without the
    /// intermediate boards.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let moves: Vec<Move> = self.moves().collect();
        let mut s = serializer.serialize_struct("Solution", 2)?;
        s.serialize_field("moves", &moves)?;
        s.serialize_field("moveCount", &moves.len())?;
        s.end()
    }
}
