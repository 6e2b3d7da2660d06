//! Arena-backed game tree.
//!
//! Every node lives in one `Vec` and refers to its children by a contiguous
//! index range, so a whole generation is released by dropping the tree.
//! Evaluations are write-once cells: search may fill them from several worker
//! threads, but each node is only ever assigned by the task that owns it.

use std::ops::Range;
use std::sync::OnceLock;

use crate::game_state::chess_types::{Color, Move};
use crate::game_state::position_state::PositionState;

/// Handle of a node inside its `GameTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub struct TreeNode {
    position: PositionState,
    depth: u8,
    mv: Option<Move>,
    evaluation: OnceLock<i32>,
    pub(crate) first_child: u32,
    pub(crate) child_count: u32,
}

impl TreeNode {
    pub(crate) fn new(position: PositionState, depth: u8, mv: Option<Move>) -> Self {
        Self {
            position,
            depth,
            mv,
            evaluation: OnceLock::new(),
            first_child: 0,
            child_count: 0,
        }
    }

    /// Fresh copy without children or evaluation.
    pub(crate) fn detached(&self) -> Self {
        Self::new(self.position, self.depth, self.mv)
    }

    #[inline]
    pub fn position(&self) -> &PositionState {
        &self.position
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Move that produced this node from its parent; `None` at the root.
    #[inline]
    pub fn mv(&self) -> Option<Move> {
        self.mv
    }

    #[inline]
    pub fn evaluation(&self) -> Option<i32> {
        self.evaluation.get().copied()
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.child_count == 0
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.child_count as usize
    }

    /// Records the node's value. A second assignment is ignored.
    #[inline]
    pub(crate) fn set_evaluation(&self, value: i32) {
        let _ = self.evaluation.set(value);
    }
}

/// Appends `children` as one contiguous block owned by `parent`.
pub(crate) fn push_children(
    nodes: &mut Vec<TreeNode>,
    parent: usize,
    children: impl IntoIterator<Item = (Move, PositionState)>,
) -> Range<usize> {
    let depth = nodes[parent].depth + 1;
    let start = nodes.len();
    nodes.extend(
        children
            .into_iter()
            .map(|(mv, position)| TreeNode::new(position, depth, Some(mv))),
    );
    let end = nodes.len();
    nodes[parent].first_child = start as u32;
    nodes[parent].child_count = (end - start) as u32;
    start..end
}

#[derive(Debug)]
pub struct GameTree {
    nodes: Vec<TreeNode>,
    side_to_move: Color,
    max_depth: u8,
}

impl GameTree {
    /// Tree holding only `root`, with `side_to_move` to play there.
    pub fn new(root: PositionState, side_to_move: Color, max_depth: u8) -> Self {
        Self {
            nodes: vec![TreeNode::new(root, 0, None)],
            side_to_move,
            max_depth,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id.index()]
    }

    /// The side to move at the root; evaluations favour this side.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Side to move at `id`: the root side on even depths.
    #[inline]
    pub fn mover_at(&self, id: NodeId) -> Color {
        if self.node(id).depth % 2 == 0 {
            self.side_to_move
        } else {
            self.side_to_move.opposite()
        }
    }

    /// Children of `id` in generation order.
    pub fn children(&self, id: NodeId) -> impl ExactSizeIterator<Item = NodeId> + Clone {
        let node = self.node(id);
        (node.first_child..node.first_child + node.child_count).map(NodeId)
    }

    /// Attaches `children` to a node that has none yet.
    pub fn add_children(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = (Move, PositionState)>,
    ) -> Vec<NodeId> {
        debug_assert!(self.node(parent).is_leaf());
        push_children(&mut self.nodes, parent.index(), children)
            .map(|index| NodeId(index as u32))
            .collect()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Forgets every evaluation so the tree can be searched again.
    pub fn clear_evaluations(&mut self) {
        for node in &mut self.nodes {
            node.evaluation.take();
        }
    }

    /// First root child holding the maximal evaluation, scanning left to right.
    pub fn best_root_child(&self) -> Option<NodeId> {
        let mut best: Option<(NodeId, i32)> = None;
        for child in self.children(self.root()) {
            let Some(value) = self.node(child).evaluation() else {
                continue;
            };
            match best {
                Some((_, current)) if value <= current => {}
                _ => best = Some((child, value)),
            }
        }
        best.map(|(id, _)| id)
    }

    /// Moves a separately expanded block of nodes into the arena.
    ///
    /// `local[..group_len]` are detached copies of this tree's nodes
    /// `first..first + group_len`; everything after them is their expansion,
    /// with child ranges expressed in `local` indices.
    pub(crate) fn graft(&mut self, first: usize, group_len: usize, local: Vec<TreeNode>) {
        let offset = (self.nodes.len() - group_len) as u32;
        self.nodes.reserve(local.len().saturating_sub(group_len));
        for (index, mut node) in local.into_iter().enumerate() {
            if node.child_count > 0 {
                node.first_child += offset;
            }
            if index < group_len {
                let target = &mut self.nodes[first + index];
                target.first_child = node.first_child;
                target.child_count = node.child_count;
            } else {
                self.nodes.push(node);
            }
        }
    }

    pub(crate) fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut Vec<TreeNode> {
        &mut self.nodes
    }
}
