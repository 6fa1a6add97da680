//! Search-graph nodes and the arena that owns them.

use std::ops::{Index, IndexMut};

use fifteen_core::{Board, Move};

/// Heuristic cost of a position: the larger of its misplaced-piece count
/// and its total Manhattan distance. Both components are admissible and
/// consistent for unit-cost moves, so their maximum is too.
///
/// Both measures are cached on the board at construction, so this is a
/// pair of field reads.
#[inline]
pub fn heuristic(board: &Board) -> u32 {
    board.misplaced_pieces().max(board.total_distance())
}

/// Slot sentinel for nodes not currently enqueued in the frontier.
pub(crate) const NO_SLOT: usize = usize::MAX;

/// Index of a node in its arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

/// One search node: a position, how it was reached, and path costs.
pub(crate) struct Node {
    pub(crate) board: Board,
    /// The move that produced this position; `None` for the root.
    pub(crate) via: Option<Move>,
    /// Moves from the root.
    pub(crate) g: u32,
    /// Heuristic cost, fixed at insertion.
    pub(crate) h: u32,
    pub(crate) parent: Option<NodeId>,
    /// Current index in the frontier's backing array, or [`NO_SLOT`].
    pub(crate) slot: usize,
}

impl Node {
    /// The frontier key.
    #[inline]
    pub(crate) fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Growable arena owning every node of a single search.
///
/// Parent links are indices into the arena rather than owning pointers,
/// so reconstructing a path is an index walk and dropping the search
/// frees everything at once.
#[derive(Default)]
pub(crate) struct Nodes {
    arena: Vec<Node>,
}

impl Nodes {
    pub(crate) fn new() -> Self {
        Self { arena: Vec::new() }
    }

    /// Append a node, computing its heuristic once.
    pub(crate) fn insert(
        &mut self,
        board: Board,
        via: Option<Move>,
        g: u32,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.arena.len());
        let h = heuristic(&board);
        self.arena.push(Node {
            board,
            via,
            g,
            h,
            parent,
            slot: NO_SLOT,
        });
        id
    }

    /// Redirect a node onto a cheaper parent in place, rewriting its
    /// producing move and cost. The caller restores the node's heap
    /// position afterwards.
    pub(crate) fn reparent(&mut self, id: NodeId, parent: NodeId, via: Move, g: u32) {
        let node = &mut self.arena[id.0];
        node.parent = Some(parent);
        node.via = Some(via);
        node.g = g;
    }

    /// Nodes generated so far.
    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }
}

impl Index<NodeId> for Nodes {
    type Output = Node;

    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.arena[id.0]
    }
}

impl IndexMut<NodeId> for Nodes {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.arena[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fifteen_core::{Direction, Square, Tile};

    #[test]
    fn heuristic_of_goal_is_zero() {
        assert_eq!(heuristic(&Board::solved()), 0);
    }

    #[test]
    fn heuristic_tracks_the_dominant_measure() {
        // One tile a single step out of place: both measures read 1.
        let board = Board::from_rows([
            [1, 2, 3, 4],
            [5, 6, 7, 8],
            [9, 10, 11, 12],
            [13, 14, 0, 15],
        ])
        .unwrap();
        assert_eq!(heuristic(&board), 1);

        // One tile far from home: distance 6 dominates misplaced 1.
        let far = Board::from_rows([
            [0, 2, 3, 4],
            [5, 6, 7, 8],
            [9, 10, 11, 12],
            [13, 14, 15, 1],
        ])
        .unwrap();
        assert_eq!(far.misplaced_pieces(), 1);
        assert_eq!(heuristic(&far), 6);
    }

    #[test]
    fn insert_fills_costs_and_links() {
        let mut nodes = Nodes::new();
        let root = nodes.insert(Board::solved(), None, 0, None);

        let board = Board::solved();
        let mv = board.legal_moves()[0];
        let child_board = board.apply(mv).unwrap();
        let child = nodes.insert(child_board, Some(mv), 1, Some(root));

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[root].g, 0);
        assert_eq!(nodes[root].h, 0);
        assert_eq!(nodes[root].parent, None);
        assert_eq!(nodes[root].slot, NO_SLOT);
        assert_eq!(nodes[child].g, 1);
        assert_eq!(nodes[child].h, heuristic(&child_board));
        assert_eq!(nodes[child].f(), 2);
        assert_eq!(nodes[child].parent, Some(root));
        assert_eq!(nodes[child].via, Some(mv));
    }

    #[test]
    fn reparent_rewrites_route_fields() {
        let mut nodes = Nodes::new();
        let board = Board::solved();
        let old_parent = nodes.insert(board, None, 4, None);
        let new_parent = nodes.insert(board, None, 1, None);

        let mv = Move::new(
            Tile::new(15),
            Square::new(3, 4).unwrap(),
            Direction::Right,
        )
        .unwrap();
        let child_board = board.apply(board.legal_moves()[0]).unwrap();
        let child = nodes.insert(child_board, Some(mv), 5, Some(old_parent));
        let h_before = nodes[child].h;

        nodes.reparent(child, new_parent, mv, 2);
        assert_eq!(nodes[child].parent, Some(new_parent));
        assert_eq!(nodes[child].g, 2);
        assert_eq!(nodes[child].via, Some(mv));
        assert_eq!(nodes[child].h, h_before);
        assert_eq!(nodes[child].board, child_board);
    }
}
