//! The search frontier: an indexed binary min-heap.
//!
//! Nodes are ordered by `f`, read from the arena. Each enqueued node
//! carries its current slot in the backing array, and every swap made by
//! sift-up or sift-down rewrites the slots of both nodes involved. A node
//! whose key changed can therefore be repaired from its true position
//! ([`Frontier::update`]) without any searching.

use fifteen_core::Board;

use crate::node::{NO_SLOT, NodeId, Nodes};

/// Min-heap over node ids, keyed by `f = g + h`.
///
/// After every public operation:
/// - parent `f` ≤ child `f` along every heap edge;
/// - every enqueued id's stored slot equals its index in the backing
///   array, and dequeued ids hold [`NO_SLOT`].
#[derive(Default)]
pub(crate) struct Frontier {
    heap: Vec<NodeId>,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self { heap: Vec::new() }
    }

    /// Number of enqueued nodes.
    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// Append at the end and sift up.
    pub(crate) fn push(&mut self, nodes: &mut Nodes, id: NodeId) {
        let slot = self.heap.len();
        self.heap.push(id);
        nodes[id].slot = slot;
        self.sift_up(nodes, slot);
    }

    /// Remove and return a smallest-f id, moving the last entry to the
    /// root and sifting it down.
    pub(crate) fn pop(&mut self, nodes: &mut Nodes) -> Option<NodeId> {
        if self.heap.is_empty() {
            return None;
        }
        let top = self.heap.swap_remove(0);
        nodes[top].slot = NO_SLOT;
        if let Some(&moved) = self.heap.first() {
            nodes[moved].slot = 0;
            self.sift_down(nodes, 0);
        }
        Some(top)
    }

    /// Restore heap order for an enqueued id whose key changed (after
    /// reparenting), sifting from its stored slot in both directions.
    pub(crate) fn update(&mut self, nodes: &mut Nodes, id: NodeId) {
        let slot = nodes[id].slot;
        self.sift_up(nodes, slot);
        // Sift-up may have moved the node; reread before going down.
        let slot = nodes[id].slot;
        self.sift_down(nodes, slot);
    }

    /// Locate an enqueued id holding the given position. Linear scan; the
    /// driver keeps its own open index and never needs this on the search
    /// path.
    #[allow(dead_code)]
    pub(crate) fn find(&self, nodes: &Nodes, board: &Board) -> Option<NodeId> {
        self.heap
            .iter()
            .copied()
            .find(|&id| nodes[id].board == *board)
    }

    fn sift_up(&mut self, nodes: &mut Nodes, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if nodes[self.heap[i]].f() < nodes[self.heap[parent]].f() {
                self.swap_slots(nodes, i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, nodes: &mut Nodes, mut i: usize) {
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut smallest = i;
            if left < self.heap.len()
                && nodes[self.heap[left]].f() < nodes[self.heap[smallest]].f()
            {
                smallest = left;
            }
            if right < self.heap.len()
                && nodes[self.heap[right]].f() < nodes[self.heap[smallest]].f()
            {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap_slots(nodes, i, smallest);
            i = smallest;
        }
    }

    /// Swap two heap entries, keeping both stored slots live.
    fn swap_slots(&mut self, nodes: &mut Nodes, i: usize, j: usize) {
        self.heap.swap(i, j);
        nodes[self.heap[i]].slot = i;
        nodes[self.heap[j]].slot = j;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{RngExt, SeedableRng};

    /// A node whose f is exactly `key`: the goal board has h = 0, so g
    /// carries the whole key.
    fn node_with_f(nodes: &mut Nodes, key: u32) -> NodeId {
        nodes.insert(Board::solved(), None, key, None)
    }

    /// Both structural invariants, checked slot by slot.
    fn assert_sound(frontier: &Frontier, nodes: &Nodes) {
        for (i, &id) in frontier.heap.iter().enumerate() {
            assert_eq!(nodes[id].slot, i, "stale slot at index {i}");
            if i > 0 {
                let parent = frontier.heap[(i - 1) / 2];
                assert!(
                    nodes[parent].f() <= nodes[id].f(),
                    "heap order broken between {} and its parent",
                    i
                );
            }
        }
    }

    #[test]
    fn pops_in_key_order() {
        let mut nodes = Nodes::new();
        let mut frontier = Frontier::new();
        for key in [9, 3, 7, 1, 8, 2, 5, 0, 6, 4] {
            let id = node_with_f(&mut nodes, key);
            frontier.push(&mut nodes, id);
            assert_sound(&frontier, &nodes);
        }
        assert_eq!(frontier.len(), 10);

        let mut popped = Vec::new();
        while let Some(id) = frontier.pop(&mut nodes) {
            assert_eq!(nodes[id].slot, NO_SLOT);
            popped.push(nodes[id].f());
            assert_sound(&frontier, &nodes);
        }
        assert_eq!(popped, (0..10).collect::<Vec<_>>());
        assert_eq!(frontier.pop(&mut nodes), None);
    }

    #[test]
    fn update_after_key_decrease_moves_toward_root() {
        let mut nodes = Nodes::new();
        let mut frontier = Frontier::new();
        let ids: Vec<NodeId> = [10, 20, 30, 40, 50]
            .into_iter()
            .map(|key| {
                let id = node_with_f(&mut nodes, key);
                frontier.push(&mut nodes, id);
                id
            })
            .collect();

        // Drop the largest key below everything else.
        nodes[ids[4]].g = 5;
        frontier.update(&mut nodes, ids[4]);
        assert_sound(&frontier, &nodes);
        assert_eq!(frontier.pop(&mut nodes), Some(ids[4]));
        assert_eq!(frontier.pop(&mut nodes), Some(ids[0]));
    }

    #[test]
    fn update_after_key_increase_moves_toward_leaves() {
        let mut nodes = Nodes::new();
        let mut frontier = Frontier::new();
        let ids: Vec<NodeId> = [10, 20, 30, 40, 50]
            .into_iter()
            .map(|key| {
                let id = node_with_f(&mut nodes, key);
                frontier.push(&mut nodes, id);
                id
            })
            .collect();

        // Push the current minimum above everything else.
        nodes[ids[0]].g = 99;
        frontier.update(&mut nodes, ids[0]);
        assert_sound(&frontier, &nodes);
        assert_eq!(frontier.pop(&mut nodes), Some(ids[1]));
        let mut rest = Vec::new();
        while let Some(id) = frontier.pop(&mut nodes) {
            rest.push(id);
        }
        assert_eq!(rest.last(), Some(&ids[0]));
    }

    #[test]
    fn find_locates_by_position() {
        let mut nodes = Nodes::new();
        let mut frontier = Frontier::new();

        let goal = Board::solved();
        let first = goal.legal_moves()[0];
        let shifted = goal.apply(first).unwrap();
        // Step onward, not straight back, so the third position really is
        // absent from the frontier.
        let onward = shifted
            .legal_moves()
            .into_iter()
            .find(|mv| mv.direction() != first.direction().opposite())
            .unwrap();
        let absent = shifted.apply(onward).unwrap();

        let a = nodes.insert(goal, None, 0, None);
        let b = nodes.insert(shifted, None, 1, None);
        frontier.push(&mut nodes, a);
        frontier.push(&mut nodes, b);

        assert_eq!(frontier.find(&nodes, &goal), Some(a));
        assert_eq!(frontier.find(&nodes, &shifted), Some(b));
        assert_eq!(frontier.find(&nodes, &absent), None);

        frontier.pop(&mut nodes);
        assert_eq!(frontier.find(&nodes, &goal), None);
    }

    #[test]
    fn randomized_interleaving_keeps_invariants() {
        let mut rng = SmallRng::seed_from_u64(0xF1F7EE);
        let mut nodes = Nodes::new();
        let mut frontier = Frontier::new();
        let mut live: Vec<NodeId> = Vec::new();

        for _ in 0..600 {
            match rng.random_range(0..4u32) {
                // Push twice as often as the other operations so the
                // heap grows enough to get interesting.
                0 | 1 => {
                    let id = node_with_f(&mut nodes, rng.random_range(0..100));
                    frontier.push(&mut nodes, id);
                    live.push(id);
                }
                2 if !live.is_empty() => {
                    let id = live[rng.random_range(0..live.len())];
                    nodes[id].g = rng.random_range(0..100);
                    frontier.update(&mut nodes, id);
                }
                3 if !live.is_empty() => {
                    let popped = frontier.pop(&mut nodes).unwrap();
                    let min = live.iter().map(|&id| nodes[id].f()).min().unwrap();
                    assert_eq!(nodes[popped].f(), min);
                    assert_eq!(nodes[popped].slot, NO_SLOT);
                    let at = live.iter().position(|&id| id == popped).unwrap();
                    live.remove(at);
                }
                _ => {}
            }
            assert_eq!(frontier.len(), live.len());
            assert_sound(&frontier, &nodes);
        }

        let mut last = 0;
        while let Some(id) = frontier.pop(&mut nodes) {
            assert!(nodes[id].f() >= last);
            last = nodes[id].f();
            assert_sound(&frontier, &nodes);
        }
    }
}
