//! Search state storage and path reconstruction
//!
//! Uses arena allocation: every state a run generates is appended once and
//! never written again, and parent links are indices into the same arena.

use crate::board::Board;
use crate::rules::Move;

// ============================================================================
// TYPES
// ============================================================================

/// Node identifier (index into arena)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// One expanded or queued search state
#[derive(Clone, Debug)]
pub struct SearchNode {
    pub board: Board,
    /// Moves from the start board
    pub cost: u32,
    /// Heuristic remainder (always 0 for exhaustive search)
    pub estimate: u32,
    /// Move that produced this board (None for root)
    pub via: Option<Move>,
    /// Parent node (None for root)
    pub parent: Option<NodeId>,
}

impl SearchNode {
    pub fn root(board: Board, estimate: u32) -> Self {
        Self {
            board,
            cost: 0,
            estimate,
            via: None,
            parent: None,
        }
    }

    /// `cost + estimate`, saturating
    pub fn total(&self) -> u32 {
        self.cost.saturating_add(self.estimate)
    }
}

// ============================================================================
// ARENA
// ============================================================================

#[derive(Debug)]
pub struct SearchArena {
    nodes: Vec<SearchNode>,
}

impl SearchArena {
    /// Create an arena holding only the root
    pub fn new(root: SearchNode) -> Self {
        Self { nodes: vec![root] }
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// Append a node, returning its id
    pub fn push(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Moves from the root to `goal`, in play order
    pub fn reconstruct(&self, goal: NodeId) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.get(goal).cost as usize);
        let mut current = Some(goal);
        while let Some(id) = current {
            let node = self.get(id);
            if let Some(mv) = node.via {
                moves.push(mv);
            }
            current = node.parent;
        }
        moves.reverse();
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Position;
    use crate::layout::initial_board;
    use crate::rules::{apply_move, replay};

    fn child(arena: &SearchArena, parent: NodeId, from: Position, to: Position) -> SearchNode {
        let board = &arena.get(parent).board;
        let mv = Move::new(board, *board.piece_at(from).unwrap(), to);
        SearchNode {
            board: apply_move(board, &mv).unwrap().board,
            cost: arena.get(parent).cost + 1,
            estimate: 0,
            via: Some(mv),
            parent: Some(parent),
        }
    }

    #[test]
    fn test_root_reconstructs_empty() {
        let arena = SearchArena::new(SearchNode::root(initial_board(), 0));
        assert_eq!(arena.len(), 1);
        assert!(arena.reconstruct(NodeId::ROOT).is_empty());
    }

    #[test]
    fn test_reconstruct_replays_to_node() {
        let start = initial_board();
        let mut arena = SearchArena::new(SearchNode::root(start.clone(), 0));
        let a = arena.push(child(&arena, NodeId::ROOT, Position::new(2, 0), Position::new(3, 0)));
        let b = arena.push(child(&arena, a, Position::new(2, 1), Position::new(2, 0)));
        let c = arena.push(child(&arena, b, Position::new(2, 2), Position::new(2, 1)));

        let moves = arena.reconstruct(c);
        assert_eq!(moves.len(), 3);
        assert_eq!(moves[0].from, Position::new(2, 0));
        assert_eq!(moves[2].to, Position::new(2, 1));
        assert_eq!(replay(&start, &moves).unwrap(), arena.get(c).board);
    }

    #[test]
    fn test_total_saturates() {
        let mut node = SearchNode::root(initial_board(), u32::MAX);
        node.cost = 5;
        assert_eq!(node.total(), u32::MAX);
    }
}
